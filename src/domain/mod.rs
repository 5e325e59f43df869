//! Domain Layer
//!
//! Pure deploy vocabulary without I/O: targets, accounts, exclusions,
//! step kinds, reports, and the ports the infrastructure layer implements.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable values (DeployTarget, ServiceAccount, ExclusionSet, StepKind)
//! - `entities/` - Step and sync reports produced by a pipeline run
//! - `services/` - Pure command construction (remote shell scripts, quoting)
//! - `ports/` - Interfaces for running commands, transferring trees, observing events

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
