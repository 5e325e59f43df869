//! riepete-deploy - deployment orchestrator for the riepete server
//!
//! Builds the project locally, mirrors the artifact tree to the deployment
//! root, optionally resets its ownership and restarts the supervised
//! service. Every step wraps one external tool (sbt, rsync over ssh, chown,
//! supervisorctl).

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{DeployUseCase, Pipeline, RemoteContext};
pub use config::Config;
pub use domain::entities::{PipelineReport, StepStatus, SyncReport};
pub use domain::value_objects::{DeployTarget, ExclusionSet, ServiceAccount, StepKind, Task};
pub use error::{DeployError, DeployResult};
