//! Permission step: hand the deployment root to the service account.

use super::{Step, StepOutput};
use crate::application::context::RemoteContext;
use crate::domain::ports::{CommandRunner, CommandSpec};
use crate::domain::services::{quote, quote_path, shell_command};
use crate::domain::value_objects::{DeployTarget, ServiceAccount, StepKind};
use crate::error::{DeployError, DeployResult};

#[derive(Debug, Clone)]
pub struct PermissionStep {
    target: DeployTarget,
    account: ServiceAccount,
    sudo: bool,
    ssh: String,
}

impl PermissionStep {
    pub fn new(target: DeployTarget, account: ServiceAccount, sudo: bool, ssh: impl Into<String>) -> Self {
        Self {
            target,
            account,
            sudo,
            ssh: ssh.into(),
        }
    }

    /// `[sudo ]chown owner:group -R <path>`
    pub fn script(&self) -> String {
        let chown = format!(
            "chown {} -R {}",
            quote(&self.account.to_string()),
            quote_path(self.target.path())
        );
        if self.sudo {
            format!("sudo {}", chown)
        } else {
            chown
        }
    }

    pub fn command(&self, context: &RemoteContext) -> CommandSpec {
        shell_command(&self.target, &self.ssh, context.cwd(), &self.script())
    }
}

impl Step for PermissionStep {
    fn kind(&self) -> StepKind {
        StepKind::FixPermissions
    }

    fn run(&self, runner: &dyn CommandRunner, context: &RemoteContext) -> DeployResult<StepOutput> {
        let spec = self.command(context);
        let outcome = runner.run(&spec)?;
        if !outcome.is_success() {
            return Err(DeployError::PermissionFailed {
                command: spec.to_string(),
                exit: outcome.exit_info(),
            });
        }
        Ok(StepOutput::default())
    }
}
