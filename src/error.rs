//! Error types for riepete-deploy
//!
//! Library code returns [`DeployResult`]; the binary wraps it in `anyhow`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::value_objects::{IgnoreError, StepKind};

/// Result type alias for deploy operations
pub type DeployResult<T> = Result<T, DeployError>;

/// Main error type for deploy operations
#[derive(Error, Debug)]
pub enum DeployError {
    /// Build tool exited non-zero
    #[error("build failed: `{command}` {exit}")]
    BuildFailed { command: String, exit: ExitInfo },

    /// Build tool succeeded but the artifact directory is missing
    #[error("build failed: artifact directory {} was not produced", .path.display())]
    ArtifactMissing { path: PathBuf },

    /// rsync (or the connection underneath it) failed
    #[error("transfer failed: `{command}` {exit}")]
    TransferFailed { command: String, exit: ExitInfo },

    /// Local mirror could not read or write a path
    #[error("transfer failed: {}: {message}", .path.display())]
    TransferIo { path: PathBuf, message: String },

    /// chown on the target directory failed
    #[error("permission fix failed: `{command}` {exit}")]
    PermissionFailed { command: String, exit: ExitInfo },

    /// Supervisor did not restart the service
    #[error("restart failed: `{command}` {detail}")]
    RestartFailed { command: String, detail: String },

    /// External program could not be spawned
    #[error("could not run `{program}`: {source}")]
    ToolNotFound {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {}: {message}", .file.display())]
    InvalidConfig { file: PathBuf, message: String },

    /// Deploy target spec is malformed
    #[error("invalid deploy target '{spec}': {reason}")]
    InvalidTarget { spec: String, reason: String },

    /// Service account is not `owner` or `owner:group`
    #[error("invalid service account '{value}' (expected owner or owner:group)")]
    InvalidServiceAccount { value: String },

    /// Build command is empty
    #[error("build command is empty")]
    EmptyBuildCommand,

    /// Ignore file could not be loaded
    #[error(transparent)]
    Ignore(#[from] IgnoreError),

    /// Another deploy from this checkout holds the lock
    #[error("another deploy is running (lock held on {})", .path.display())]
    Locked { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeployError {
    /// The pipeline step this error belongs to, if it is a step failure.
    pub fn step_kind(&self) -> Option<StepKind> {
        match self {
            Self::BuildFailed { .. } | Self::ArtifactMissing { .. } | Self::EmptyBuildCommand => {
                Some(StepKind::Build)
            }
            Self::TransferFailed { .. } | Self::TransferIo { .. } | Self::Ignore(_) => {
                Some(StepKind::Sync)
            }
            Self::PermissionFailed { .. } => Some(StepKind::FixPermissions),
            Self::RestartFailed { .. } => Some(StepKind::Restart),
            _ => None,
        }
    }
}

/// Exit code of an external command, `None` when it was killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitInfo(pub Option<i32>);

impl fmt::Display for ExitInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(code) => write!(f, "exited with status {}", code),
            None => write!(f, "was terminated by a signal"),
        }
    }
}
