//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `process` - Command runners (system, dry-run)
//! - `transfer/` - Transfer strategies (rsync, local mirror)
//! - `events/` - Event sinks (NDJSON)
//! - `lock` - Per-checkout deploy lock

pub mod events;
pub mod lock;
pub mod process;
pub mod transfer;

pub use events::JsonEventSink;
pub use lock::{DeployLock, LOCK_FILE};
pub use process::{DryRunRunner, SystemCommandRunner};
pub use transfer::{strategy_for, LocalMirrorTransfer, RsyncTransfer};
