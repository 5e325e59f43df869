//! Sync step: mirror the artifact tree to the deployment root.

use std::path::PathBuf;
use std::sync::Arc;

use super::{Step, StepOutput};
use crate::application::context::RemoteContext;
use crate::config::Config;
use crate::domain::entities::SyncReport;
use crate::domain::ports::{CommandRunner, SyncRequest, TransferStrategy};
use crate::domain::value_objects::{DeployTarget, ExclusionSet, StepKind};
use crate::error::{DeployError, DeployResult};

pub struct SyncStep {
    project_dir: PathBuf,
    artifact_dir: PathBuf,
    target: DeployTarget,
    exclude: Vec<String>,
    ignore_file: PathBuf,
    delete: bool,
    ssh: String,
    transfer: Arc<dyn TransferStrategy>,
}

impl SyncStep {
    pub fn new(
        project_dir: impl Into<PathBuf>,
        config: &Config,
        target: DeployTarget,
        transfer: Arc<dyn TransferStrategy>,
    ) -> Self {
        Self {
            project_dir: project_dir.into(),
            artifact_dir: config.build.artifact_dir.clone(),
            target,
            exclude: config.sync.exclude.clone(),
            ignore_file: config.sync.ignore_file.clone(),
            delete: config.sync.delete,
            ssh: config.tools.ssh.clone(),
            transfer,
        }
    }

    pub fn source(&self) -> PathBuf {
        self.project_dir.join(&self.artifact_dir)
    }

    /// Build the transfer request, loading the ignore file from the project directory.
    pub fn request(&self) -> DeployResult<SyncRequest> {
        let source = self.source();
        let exclusions = ExclusionSet::load(
            &source,
            &self.exclude,
            &self.project_dir.join(&self.ignore_file),
        )?;
        Ok(SyncRequest {
            source,
            target: self.target.clone(),
            exclusions,
            delete: self.delete,
            ssh: self.ssh.clone(),
        })
    }

    /// What the sync would change, without changing anything.
    pub fn plan(&self, runner: &dyn CommandRunner) -> DeployResult<SyncReport> {
        let request = self.request()?;
        self.require_source(&request)?;
        self.transfer.plan(&request, runner)
    }

    fn require_source(&self, request: &SyncRequest) -> DeployResult<()> {
        if request.source.is_dir() {
            Ok(())
        } else {
            Err(DeployError::TransferIo {
                path: request.source.clone(),
                message: "artifact directory does not exist (run the build first)".to_string(),
            })
        }
    }
}

impl Step for SyncStep {
    fn kind(&self) -> StepKind {
        StepKind::Sync
    }

    fn run(&self, runner: &dyn CommandRunner, _context: &RemoteContext) -> DeployResult<StepOutput> {
        let request = self.request()?;
        if !runner.is_dry_run() {
            self.require_source(&request)?;
        }

        tracing::info!(
            transfer = self.transfer.name(),
            source = %request.source.display(),
            target = %request.target,
            "syncing artifact tree"
        );
        let report = self.transfer.transfer(&request, runner)?;
        Ok(StepOutput { sync: Some(report) })
    }
}
