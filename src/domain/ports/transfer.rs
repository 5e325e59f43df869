//! Transfer Strategy Port
//!
//! Mirrors a local artifact tree to a deploy target.

use std::path::PathBuf;

use super::CommandRunner;
use crate::domain::entities::SyncReport;
use crate::domain::value_objects::{DeployTarget, ExclusionSet};
use crate::error::DeployResult;

/// Everything a transfer needs to mirror one tree.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    /// Local artifact directory (its contents are mirrored, not the directory itself)
    pub source: PathBuf,
    pub target: DeployTarget,
    pub exclusions: ExclusionSet,
    /// Remove destination files that are absent from the source
    pub delete: bool,
    /// ssh program used as the remote shell
    pub ssh: String,
}

/// Strategy for mirroring the artifact tree to a target.
pub trait TransferStrategy: Send + Sync {
    /// Name of this transfer method (for logging)
    fn name(&self) -> &'static str;

    /// Apply the mirror.
    ///
    /// Excluded paths are neither sent nor deleted. Running twice with an
    /// unchanged source leaves the destination unchanged the second time.
    fn transfer(&self, request: &SyncRequest, runner: &dyn CommandRunner)
        -> DeployResult<SyncReport>;

    /// Compute what [`transfer`](Self::transfer) would change without changing anything.
    fn plan(&self, request: &SyncRequest, runner: &dyn CommandRunner) -> DeployResult<SyncReport>;
}
