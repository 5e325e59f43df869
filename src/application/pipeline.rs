//! Pipeline
//!
//! An explicit, ordered list of steps. Every declared step is either invoked
//! or reported as skipped with a reason; nothing is merely named.

use std::time::Instant;

use super::context::RemoteContext;
use super::steps::Step;
use crate::domain::entities::{PipelineReport, PipelineState, StepReport, StepStatus};
use crate::domain::ports::{CommandRunner, DeployEvent, DeployEventSink};
use crate::domain::value_objects::{DeployTarget, StepKind, StepScope, Task};

/// Whether a declared step runs.
pub enum Invocation {
    Invoke(Box<dyn Step>),
    Skip { kind: StepKind, reason: String },
}

impl Invocation {
    pub fn kind(&self) -> StepKind {
        match self {
            Invocation::Invoke(step) => step.kind(),
            Invocation::Skip { kind, .. } => *kind,
        }
    }

    pub fn is_invoked(&self) -> bool {
        matches!(self, Invocation::Invoke(_))
    }
}

/// Ordered steps of one task against one target.
pub struct Pipeline {
    task: Task,
    target: DeployTarget,
    entries: Vec<Invocation>,
}

impl Pipeline {
    pub fn new(task: Task, target: DeployTarget) -> Self {
        Self {
            task,
            target,
            entries: Vec::new(),
        }
    }

    pub fn invoke(mut self, step: impl Step + 'static) -> Self {
        self.entries.push(Invocation::Invoke(Box::new(step)));
        self
    }

    pub fn skip(mut self, kind: StepKind, reason: impl Into<String>) -> Self {
        self.entries.push(Invocation::Skip {
            kind,
            reason: reason.into(),
        });
        self
    }

    pub fn task(&self) -> Task {
        self.task
    }

    pub fn target(&self) -> &DeployTarget {
        &self.target
    }

    pub fn entries(&self) -> &[Invocation] {
        &self.entries
    }

    /// Declared step kinds, in order.
    pub fn steps(&self) -> Vec<StepKind> {
        self.entries.iter().map(Invocation::kind).collect()
    }

    pub fn run(&self, runner: &dyn CommandRunner, events: &dyn DeployEventSink) -> PipelineReport {
        let mut context = RemoteContext::new();
        self.run_in(&mut context, runner, events)
    }

    /// Run every entry in order, stopping at the first failure.
    ///
    /// Steps after a failure are reported as `NotRun`. `context` is back at
    /// its starting directory when this returns.
    pub fn run_in(
        &self,
        context: &mut RemoteContext,
        runner: &dyn CommandRunner,
        events: &dyn DeployEventSink,
    ) -> PipelineReport {
        let started = Instant::now();
        let mut report = PipelineReport::new(self.task);

        events.on_event(DeployEvent::Started {
            task: self.task,
            target: self.target.to_string(),
            steps: self.steps(),
        });

        for entry in &self.entries {
            if report.state.is_terminal() {
                report.steps.push(StepReport::not_run(entry.kind()));
                continue;
            }

            let step = match entry {
                Invocation::Skip { kind, reason } => {
                    tracing::info!(step = %kind, %reason, "skipping step");
                    events.on_event(DeployEvent::StepSkipped {
                        kind: *kind,
                        reason: reason.clone(),
                    });
                    report.steps.push(StepReport {
                        kind: *kind,
                        status: StepStatus::Skipped {
                            reason: reason.clone(),
                        },
                        elapsed: std::time::Duration::ZERO,
                        sync: None,
                    });
                    continue;
                }
                Invocation::Invoke(step) => step,
            };

            let kind = step.kind();
            report.state = PipelineState::Running(kind);
            events.on_event(DeployEvent::StepStarted { kind });
            tracing::info!(step = %kind, "running step");

            let step_started = Instant::now();
            let result = match step.scope() {
                StepScope::TargetDir => {
                    let guard = context.enter(self.target.path());
                    step.run(runner, &guard)
                }
                StepScope::Outside => step.run(runner, context),
            };
            let elapsed = step_started.elapsed();

            match result {
                Ok(output) => {
                    if let Some(sync) = &output.sync {
                        events.on_event(DeployEvent::SyncSummary {
                            report: sync.clone(),
                        });
                    }
                    events.on_event(DeployEvent::StepSucceeded { kind, elapsed });
                    report.steps.push(StepReport {
                        kind,
                        status: StepStatus::Succeeded,
                        elapsed,
                        sync: output.sync,
                    });
                }
                Err(err) => {
                    tracing::debug!(step = %kind, error = %err, "step failed");
                    events.on_event(DeployEvent::StepFailed {
                        kind,
                        error: err.to_string(),
                    });
                    report.steps.push(StepReport {
                        kind,
                        status: StepStatus::Failed {
                            message: err.to_string(),
                        },
                        elapsed,
                        sync: None,
                    });
                    report.fail(kind, err);
                }
            }
        }

        if !report.state.is_terminal() {
            report.state = PipelineState::Done;
        }

        events.on_event(DeployEvent::Completed {
            task: self.task,
            success: report.is_success(),
            elapsed: started.elapsed(),
        });

        report
    }
}
