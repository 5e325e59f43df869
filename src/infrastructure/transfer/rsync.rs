//! Rsync Transfer Strategy
//!
//! Mirrors the artifact tree to a remote host with rsync over ssh.

use super::itemize::parse_itemized;
use crate::domain::entities::SyncReport;
use crate::domain::ports::{CommandRunner, CommandSpec, SyncRequest, TransferStrategy};
use crate::error::{DeployError, DeployResult};

/// Transfer strategy using rsync
pub struct RsyncTransfer {
    program: String,
}

impl RsyncTransfer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// `rsync -pthrvz [--delete] --exclude ... [--exclude-from ...] -e <ssh> <src>/ <host:path>`
    pub fn command(&self, request: &SyncRequest) -> CommandSpec {
        let mut spec = CommandSpec::new(self.program.as_str()).arg("-pthrvz");
        if request.delete {
            spec = spec.arg("--delete");
        }
        for pattern in request.exclusions.patterns() {
            spec = spec.arg("--exclude").arg(pattern.as_str());
        }
        if let Some(ignore_file) = request.exclusions.ignore_file() {
            spec = spec
                .arg("--exclude-from")
                .arg(ignore_file.display().to_string());
        }
        spec.arg("-e")
            .arg(request.ssh.as_str())
            // trailing slash = copy contents
            .arg(format!("{}/", request.source.display()))
            .arg(request.target.rsync_destination())
    }

    fn run_checked(&self, spec: &CommandSpec, runner: &dyn CommandRunner) -> DeployResult<String> {
        let outcome = runner.run(spec)?;
        if !outcome.is_success() {
            return Err(DeployError::TransferFailed {
                command: spec.to_string(),
                exit: outcome.exit_info(),
            });
        }
        Ok(outcome.stdout)
    }
}

impl Default for RsyncTransfer {
    fn default() -> Self {
        Self::new("rsync")
    }
}

impl TransferStrategy for RsyncTransfer {
    fn name(&self) -> &'static str {
        "rsync"
    }

    fn transfer(&self, request: &SyncRequest, runner: &dyn CommandRunner) -> DeployResult<SyncReport> {
        let spec = self.command(request);
        self.run_checked(&spec, runner)?;
        // rsync's own -v output is the change listing; no itemized report here
        Ok(SyncReport {
            dry_run: runner.is_dry_run(),
            ..SyncReport::default()
        })
    }

    fn plan(&self, request: &SyncRequest, runner: &dyn CommandRunner) -> DeployResult<SyncReport> {
        let mut spec = self.command(request).capture_output();
        spec.args.insert(1, "--itemize-changes".to_string());
        spec.args.insert(1, "--dry-run".to_string());
        let stdout = self.run_checked(&spec, runner)?;
        Ok(parse_itemized(&stdout, true))
    }
}
