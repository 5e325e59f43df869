//! Pipeline step and task identifiers.

use std::fmt;

/// One operational step of the deploy pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Build,
    Sync,
    FixPermissions,
    Restart,
}

impl StepKind {
    /// Pipeline order.
    pub const ALL: [StepKind; 4] = [
        StepKind::Build,
        StepKind::Sync,
        StepKind::FixPermissions,
        StepKind::Restart,
    ];

    /// Stable identifier used in CLI output and JSON events.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Build => "build",
            StepKind::Sync => "sync",
            StepKind::FixPermissions => "fix-permissions",
            StepKind::Restart => "restart",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a step's remote commands run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepScope {
    /// Inside the deployment root (`cd <target> && ...`)
    TargetDir,
    /// In the login directory of the remote user
    Outside,
}

/// A named task the CLI can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// The full pipeline
    Deploy,
    /// A single step
    Step(StepKind),
}

impl Task {
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Deploy => "deploy",
            Task::Step(kind) => kind.as_str(),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
