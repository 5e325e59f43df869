//! Domain Value Objects
//!
//! Immutable value types that describe what a deploy operates on.

mod deploy_target;
mod exclusion_set;
mod service_account;
mod step;

pub use deploy_target::DeployTarget;
pub use exclusion_set::{ExclusionSet, IgnoreError, DEFAULT_EXCLUDES};
pub use service_account::ServiceAccount;
pub use step::{StepKind, StepScope, Task};
