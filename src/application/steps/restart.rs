//! Restart step: ask supervisor to restart the service.
//!
//! `supervisorctl` has historically exited 0 even when the restart failed,
//! so its output is inspected as well as its exit status.

use super::{Step, StepOutput};
use crate::application::context::RemoteContext;
use crate::domain::ports::{CommandRunner, CommandSpec};
use crate::domain::services::{quote, shell_command};
use crate::domain::value_objects::{DeployTarget, StepKind, StepScope};
use crate::error::{DeployError, DeployResult};

#[derive(Debug, Clone)]
pub struct RestartStep {
    target: DeployTarget,
    service: String,
    supervisorctl: String,
    sudo: bool,
    ssh: String,
}

impl RestartStep {
    pub fn new(
        target: DeployTarget,
        service: impl Into<String>,
        supervisorctl: impl Into<String>,
        sudo: bool,
        ssh: impl Into<String>,
    ) -> Self {
        Self {
            target,
            service: service.into(),
            supervisorctl: supervisorctl.into(),
            sudo,
            ssh: ssh.into(),
        }
    }

    /// `[sudo ]supervisorctl restart <service>`
    pub fn script(&self) -> String {
        let restart = format!(
            "{} restart {}",
            quote(&self.supervisorctl),
            quote(&self.service)
        );
        if self.sudo {
            format!("sudo {}", restart)
        } else {
            restart
        }
    }

    pub fn command(&self, context: &RemoteContext) -> CommandSpec {
        shell_command(&self.target, &self.ssh, context.cwd(), &self.script()).capture_output()
    }
}

impl Step for RestartStep {
    fn kind(&self) -> StepKind {
        StepKind::Restart
    }

    fn scope(&self) -> StepScope {
        StepScope::Outside
    }

    fn run(&self, runner: &dyn CommandRunner, context: &RemoteContext) -> DeployResult<StepOutput> {
        let spec = self.command(context);
        let outcome = runner.run(&spec)?;
        let output = outcome.combined_output();

        if !outcome.is_success() {
            let detail = match supervisor_failure(&output) {
                Some(line) => format!("{}: {}", outcome.exit_info(), line),
                None => outcome.exit_info().to_string(),
            };
            return Err(DeployError::RestartFailed {
                command: spec.to_string(),
                detail,
            });
        }
        if let Some(line) = supervisor_failure(&output) {
            return Err(DeployError::RestartFailed {
                command: spec.to_string(),
                detail: format!("supervisor reported: {}", line),
            });
        }

        Ok(StepOutput::default())
    }
}

/// First supervisor output line that reports a failed restart.
///
/// `ERROR (not running)` from the stop half of a restart is not a failure.
pub fn supervisor_failure(output: &str) -> Option<&str> {
    output.lines().map(str::trim).find(|line| {
        let lower = line.to_ascii_lowercase();
        if lower.contains("no such process") || lower.contains("no such group") {
            return true;
        }
        line.contains("ERROR") && !line.contains("ERROR (not running)")
    })
}
