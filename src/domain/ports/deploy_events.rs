//! Deploy Event Port
//!
//! Provides an observable interface for pipeline runs.
//! Enables progress reporting, JSON event streams, and debugging.

use std::time::Duration;

use crate::domain::entities::SyncReport;
use crate::domain::value_objects::{StepKind, Task};

/// Event emitted while a pipeline runs
#[derive(Debug, Clone)]
pub enum DeployEvent {
    /// Pipeline started
    Started {
        task: Task,
        target: String,
        steps: Vec<StepKind>,
    },

    /// A step is about to run
    StepStarted { kind: StepKind },

    /// A step finished successfully
    StepSucceeded { kind: StepKind, elapsed: Duration },

    /// A declared step was deliberately not invoked
    StepSkipped { kind: StepKind, reason: String },

    /// A step failed; the remaining steps will not run
    StepFailed { kind: StepKind, error: String },

    /// Sync finished with a change report
    SyncSummary { report: SyncReport },

    /// Pipeline finished
    Completed {
        task: Task,
        success: bool,
        elapsed: Duration,
    },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: Step lines in the terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}
}
