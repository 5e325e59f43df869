//! Domain Entities
//!
//! Records produced while a pipeline runs.
//! - `SyncReport` - What a mirror sync created, updated and deleted
//! - `StepReport` / `PipelineReport` - Per-step outcome and overall state

mod pipeline_report;
mod sync_report;

pub use pipeline_report::{PipelineReport, PipelineState, StepReport, StepStatus};
pub use sync_report::SyncReport;
