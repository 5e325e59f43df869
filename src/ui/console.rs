//! Terminal event sink: one line per step event, printed as it happens so
//! it interleaves correctly with the external tools' own output.

use std::io::{self, Write};
use std::sync::Mutex;

use riepete_deploy::domain::ports::{DeployEvent, DeployEventSink};

use crate::ui::context::UiContext;
use crate::ui::views::pipeline::{
    render_completed, render_step_failed, render_step_skipped, render_step_started,
    render_step_succeeded, render_sync_summary,
};

pub struct ConsoleEventSink {
    ui: UiContext,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    pub fn stdout(ui: UiContext) -> Self {
        Self::with_writer(ui, io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(ui: UiContext, writer: W) -> Self {
        Self {
            ui,
            out: Mutex::new(Box::new(writer)),
        }
    }

    fn render(&self, event: &DeployEvent) -> Option<String> {
        let (color, unicode) = (self.ui.color, self.ui.unicode);
        let line = match event {
            // The header is printed by the command before the run starts.
            DeployEvent::Started { .. } => return None,
            DeployEvent::StepStarted { kind } => render_step_started(*kind, color, unicode),
            DeployEvent::StepSucceeded { kind, elapsed } => {
                render_step_succeeded(*kind, *elapsed, color, unicode)
            }
            DeployEvent::StepSkipped { kind, reason } => {
                render_step_skipped(*kind, reason, color, unicode)
            }
            DeployEvent::StepFailed { kind, .. } => render_step_failed(*kind, color, unicode),
            DeployEvent::SyncSummary { report } => {
                if self.ui.verbose == 0 && report.is_noop() && !report.dry_run {
                    return None;
                }
                render_sync_summary(report, color, unicode)
            }
            DeployEvent::Completed {
                task,
                success,
                elapsed,
            } => format!("\n{}", render_completed(*task, *success, *elapsed, color, unicode)),
        };
        Some(line)
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        let Some(line) = self.render(&event) else {
            return;
        };
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", line);
            let _ = out.flush();
        }
    }
}
