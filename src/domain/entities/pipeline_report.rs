//! Pipeline and step report entities

use std::time::Duration;

use super::SyncReport;
use crate::domain::value_objects::{StepKind, Task};
use crate::error::{DeployError, DeployResult};

/// Outcome of one pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Succeeded,
    /// Declared in the pipeline but deliberately not invoked
    Skipped { reason: String },
    Failed { message: String },
    /// Never reached because an earlier step failed
    NotRun,
}

/// Record of one pipeline step.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub kind: StepKind,
    pub status: StepStatus,
    pub elapsed: Duration,
    /// Present for sync steps that produced a change report
    pub sync: Option<SyncReport>,
}

impl StepReport {
    pub fn not_run(kind: StepKind) -> Self {
        Self {
            kind,
            status: StepStatus::NotRun,
            elapsed: Duration::ZERO,
            sync: None,
        }
    }

    /// True when the step actually executed (succeeded or failed).
    pub fn was_invoked(&self) -> bool {
        matches!(
            self.status,
            StepStatus::Succeeded | StepStatus::Failed { .. }
        )
    }
}

/// State machine of a pipeline run.
///
/// `Pending → Running(Build) → Running(Sync) → Running(FixPermissions)
/// → Running(Restart) → Done`, with any failure moving to `Failed(step)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Pending,
    Running(StepKind),
    Done,
    Failed(StepKind),
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed(_))
    }
}

/// Result of running a task's pipeline.
#[derive(Debug)]
pub struct PipelineReport {
    pub task: Task,
    pub steps: Vec<StepReport>,
    pub state: PipelineState,
    failure: Option<DeployError>,
}

impl PipelineReport {
    pub fn new(task: Task) -> Self {
        Self {
            task,
            steps: Vec::new(),
            state: PipelineState::Pending,
            failure: None,
        }
    }

    /// Mark the run failed at `kind` with `error`.
    pub fn fail(&mut self, kind: StepKind, error: DeployError) {
        self.state = PipelineState::Failed(kind);
        self.failure = Some(error);
    }

    pub fn is_success(&self) -> bool {
        self.state == PipelineState::Done
    }

    pub fn failure(&self) -> Option<&DeployError> {
        self.failure.as_ref()
    }

    pub fn step(&self, kind: StepKind) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.kind == kind)
    }

    /// Kinds of the steps that were actually executed, in order.
    pub fn invoked(&self) -> Vec<StepKind> {
        self.steps
            .iter()
            .filter(|s| s.was_invoked())
            .map(|s| s.kind)
            .collect()
    }

    pub fn total_elapsed(&self) -> Duration {
        self.steps.iter().map(|s| s.elapsed).sum()
    }

    /// Convert into a `Result`, yielding the failure if the run failed.
    pub fn into_result(mut self) -> DeployResult<Self> {
        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}
