//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod command_runner;
pub mod deploy_events;
pub mod transfer;

pub use command_runner::{CommandOutcome, CommandRunner, CommandSpec};
pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use transfer::{SyncRequest, TransferStrategy};
