//! Pipeline Steps
//!
//! Each step wraps exactly one external command:
//! - `BuildStep` - local build tool
//! - `SyncStep` - mirror transfer of the artifact tree
//! - `PermissionStep` - recursive chown of the deployment root
//! - `RestartStep` - supervisor restart of the service

mod build;
mod permissions;
mod restart;
mod sync;

pub use build::BuildStep;
pub use permissions::PermissionStep;
pub use restart::{supervisor_failure, RestartStep};
pub use sync::SyncStep;

use super::context::RemoteContext;
use crate::domain::entities::SyncReport;
use crate::domain::ports::CommandRunner;
use crate::domain::value_objects::{StepKind, StepScope};
use crate::error::DeployResult;

/// What a successful step hands back to the pipeline.
#[derive(Debug, Clone, Default)]
pub struct StepOutput {
    pub sync: Option<SyncReport>,
}

/// One operational step of the pipeline.
pub trait Step: Send + Sync {
    fn kind(&self) -> StepKind;

    /// Whether remote commands run inside the deployment root.
    fn scope(&self) -> StepScope {
        StepScope::TargetDir
    }

    /// Run the step's command. Any error aborts the pipeline.
    fn run(&self, runner: &dyn CommandRunner, context: &RemoteContext)
        -> DeployResult<StepOutput>;
}
