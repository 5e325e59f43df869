//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT spawn processes or touch the network itself
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - Builds and runs the pipeline for a task
//!
//! ## Pipeline
//!
//! - `Pipeline` - Explicit ordered step list (invoke or skip)
//! - `RemoteContext` - Scoped remote working directory
//! - `steps` - Build, sync, permission fix and restart steps

pub mod context;
pub mod deploy;
pub mod pipeline;
pub mod steps;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::{ContextGuard, RemoteContext};
pub use deploy::{DeployUseCase, PERMISSIONS_DISABLED_REASON};
pub use pipeline::{Invocation, Pipeline};
pub use steps::{BuildStep, PermissionStep, RestartStep, Step, StepOutput, SyncStep};
