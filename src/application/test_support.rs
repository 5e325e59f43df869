//! Test doubles for the command runner and event sink ports.

use std::sync::Mutex;

use crate::domain::ports::{CommandOutcome, CommandRunner, CommandSpec, DeployEvent, DeployEventSink};
use crate::error::{DeployError, DeployResult};

/// Records every command and answers from a script of canned outcomes.
///
/// A rule matches when its needle occurs in the rendered command line;
/// unmatched commands succeed with empty output.
#[derive(Default)]
pub struct ScriptedRunner {
    rules: Vec<(String, CommandOutcome)>,
    missing: Vec<String>,
    dry_run: bool,
    calls: Mutex<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, needle: &str, outcome: CommandOutcome) -> Self {
        self.rules.push((needle.to_string(), outcome));
        self
    }

    /// Spawning `program` fails as if it were not installed.
    pub fn missing(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.program).collect()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> DeployResult<CommandOutcome> {
        self.calls.lock().unwrap().push(spec.clone());

        if self.missing.contains(&spec.program) {
            return Err(DeployError::ToolNotFound {
                program: spec.program.clone(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }

        let line = spec.to_string();
        Ok(self
            .rules
            .iter()
            .find(|(needle, _)| line.contains(needle.as_str()))
            .map(|(_, outcome)| outcome.clone())
            .unwrap_or_else(CommandOutcome::success))
    }

    fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

/// Collects events for assertions.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<DeployEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DeployEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl DeployEventSink for RecordingSink {
    fn on_event(&self, event: DeployEvent) {
        self.events.lock().unwrap().push(event);
    }
}
