//! Transfer Strategies
//!
//! - `RsyncTransfer` - rsync over ssh for remote targets
//! - `LocalMirrorTransfer` - in-process mirror for host-less targets

mod itemize;
mod local;
mod rsync;

pub use itemize::parse_itemized;
pub use local::LocalMirrorTransfer;
pub use rsync::RsyncTransfer;

use std::sync::Arc;

use crate::domain::ports::TransferStrategy;
use crate::domain::value_objects::DeployTarget;

/// Pick the strategy for a target: rsync when it has a host, the local mirror otherwise.
pub fn strategy_for(target: &DeployTarget, rsync_program: &str) -> Arc<dyn TransferStrategy> {
    if target.is_remote() {
        Arc::new(RsyncTransfer::new(rsync_program))
    } else {
        Arc::new(LocalMirrorTransfer::new())
    }
}
