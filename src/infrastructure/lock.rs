//! Deploy lock
//!
//! Advisory lock file in the project directory so two deploys from the same
//! checkout cannot interleave. Deploys from other machines are not covered.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{DeployError, DeployResult};

/// Lock file name, created in the project directory.
pub const LOCK_FILE: &str = ".riepete-deploy.lock";

/// Held for the duration of a deploy; released on drop.
#[derive(Debug)]
pub struct DeployLock {
    file: File,
    path: PathBuf,
}

impl DeployLock {
    /// Take the lock without waiting.
    pub fn acquire(project_dir: &Path) -> DeployResult<Self> {
        let path = project_dir.join(LOCK_FILE);
        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;

        if file.try_lock_exclusive().is_err() {
            return Err(DeployError::Locked { path });
        }
        tracing::debug!(lock = %path.display(), "acquired deploy lock");
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DeployLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
