//! Deploy Use Case
//!
//! Builds the explicit step list for a task:
//! 1. Build the artifact tree locally
//! 2. Mirror it to the deployment root
//! 3. Reset ownership (only when `permissions.on_deploy` is set)
//! 4. Restart the supervised service
//!
//! Single-step tasks get a pipeline with just that step, always invoked.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::pipeline::Pipeline;
use crate::application::steps::{BuildStep, PermissionStep, RestartStep, SyncStep};
use crate::config::Config;
use crate::domain::entities::{PipelineReport, SyncReport};
use crate::domain::ports::{CommandRunner, DeployEventSink, TransferStrategy};
use crate::domain::value_objects::{DeployTarget, StepKind, Task};
use crate::error::DeployResult;

/// Reason reported when `deploy` declares the permission fix but does not run it.
pub const PERMISSIONS_DISABLED_REASON: &str = "disabled (permissions.on_deploy = false)";

/// Deploy use case - one project checkout against one target
pub struct DeployUseCase {
    config: Config,
    project_dir: PathBuf,
    target: DeployTarget,
    transfer: Arc<dyn TransferStrategy>,
}

impl DeployUseCase {
    /// Target is taken from the configuration.
    pub fn new(
        config: Config,
        project_dir: impl Into<PathBuf>,
        transfer: Arc<dyn TransferStrategy>,
    ) -> DeployResult<Self> {
        let target = config.deploy_target()?;
        Ok(Self {
            config,
            project_dir: project_dir.into(),
            target,
            transfer,
        })
    }

    /// Use `target` instead of the configured `[target]` (e.g. from `--target`).
    pub fn for_target(
        config: Config,
        project_dir: impl Into<PathBuf>,
        target: DeployTarget,
        transfer: Arc<dyn TransferStrategy>,
    ) -> Self {
        Self {
            config,
            project_dir: project_dir.into(),
            target,
            transfer,
        }
    }

    /// Replace the target.
    pub fn with_target(mut self, target: DeployTarget) -> Self {
        self.target = target;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn target(&self) -> &DeployTarget {
        &self.target
    }

    /// The step list for `task`.
    pub fn pipeline(&self, task: Task) -> DeployResult<Pipeline> {
        let mut pipeline = Pipeline::new(task, self.target.clone());

        let kinds: &[StepKind] = match &task {
            Task::Deploy => &StepKind::ALL,
            Task::Step(kind) => std::slice::from_ref(kind),
        };

        for kind in kinds {
            pipeline = match kind {
                StepKind::Build => pipeline.invoke(self.build_step()),
                StepKind::Sync => pipeline.invoke(self.sync_step()),
                StepKind::FixPermissions => {
                    if task == Task::Deploy && !self.config.permissions.on_deploy {
                        pipeline.skip(StepKind::FixPermissions, PERMISSIONS_DISABLED_REASON)
                    } else {
                        pipeline.invoke(self.permission_step()?)
                    }
                }
                StepKind::Restart => pipeline.invoke(self.restart_step()),
            };
        }

        Ok(pipeline)
    }

    /// Run `task`. Step failures are recorded in the report, not returned.
    pub fn execute(
        &self,
        task: Task,
        runner: &dyn CommandRunner,
        events: &dyn DeployEventSink,
    ) -> DeployResult<PipelineReport> {
        let pipeline = self.pipeline(task)?;
        tracing::info!(
            task = %task,
            target = %self.target,
            transfer = self.transfer.name(),
            dry_run = runner.is_dry_run(),
            "starting pipeline"
        );
        Ok(pipeline.run(runner, events))
    }

    /// Preview the sync without changing the target.
    pub fn plan(&self, runner: &dyn CommandRunner) -> DeployResult<SyncReport> {
        self.sync_step().plan(runner)
    }

    fn build_step(&self) -> BuildStep {
        BuildStep::new(
            &self.project_dir,
            self.config.build.command.clone(),
            self.config.build.artifact_dir.clone(),
        )
    }

    fn sync_step(&self) -> SyncStep {
        SyncStep::new(
            &self.project_dir,
            &self.config,
            self.target.clone(),
            Arc::clone(&self.transfer),
        )
    }

    fn permission_step(&self) -> DeployResult<PermissionStep> {
        Ok(PermissionStep::new(
            self.target.clone(),
            self.config.service_account()?,
            self.config.permissions.sudo,
            self.config.tools.ssh.clone(),
        ))
    }

    fn restart_step(&self) -> RestartStep {
        RestartStep::new(
            self.target.clone(),
            self.config.restart.service.clone(),
            self.config.restart.supervisorctl.clone(),
            self.config.restart.sudo,
            self.config.tools.ssh.clone(),
        )
    }
}
