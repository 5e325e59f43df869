//! JSON Event Sink
//!
//! Outputs pipeline events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, mut event: serde_json::Value) {
        if let Some(obj) = event.as_object_mut() {
            obj.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON form of an event, without the timestamp.
pub fn event_json(event: &DeployEvent) -> serde_json::Value {
    match event {
        DeployEvent::Started {
            task,
            target,
            steps,
        } => serde_json::json!({
            "event": "start",
            "task": task.as_str(),
            "target": target,
            "steps": steps.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
        }),

        DeployEvent::StepStarted { kind } => serde_json::json!({
            "event": "step_start",
            "step": kind.as_str(),
        }),

        DeployEvent::StepSucceeded { kind, elapsed } => serde_json::json!({
            "event": "step_ok",
            "step": kind.as_str(),
            "elapsed_ms": elapsed.as_millis() as u64,
        }),

        DeployEvent::StepSkipped { kind, reason } => serde_json::json!({
            "event": "step_skipped",
            "step": kind.as_str(),
            "reason": reason,
        }),

        DeployEvent::StepFailed { kind, error } => serde_json::json!({
            "event": "step_failed",
            "step": kind.as_str(),
            "error": error,
        }),

        DeployEvent::SyncSummary { report } => {
            let paths = |list: &[std::path::PathBuf]| {
                list.iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
            };
            serde_json::json!({
                "event": "sync_summary",
                "created": paths(&report.created),
                "updated": paths(&report.updated),
                "deleted": paths(&report.deleted),
                "unchanged": report.unchanged,
                "dry_run": report.dry_run,
            })
        }

        DeployEvent::Completed {
            task,
            success,
            elapsed,
        } => serde_json::json!({
            "event": "complete",
            "task": task.as_str(),
            "success": success,
            "elapsed_ms": elapsed.as_millis() as u64,
        }),
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.write_event(event_json(&event));
    }
}
