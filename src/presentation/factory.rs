//! Use Case Factory
//!
//! Creates use cases and runners with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::Path;

use crate::application::DeployUseCase;
use crate::config::Config;
use crate::domain::ports::CommandRunner;
use crate::domain::value_objects::DeployTarget;
use crate::error::DeployResult;
use crate::infrastructure::{strategy_for, DryRunRunner, SystemCommandRunner};

/// Create a deploy use case for `project_dir`.
///
/// `target` overrides the configured `[target]`; the transfer strategy
/// follows the resolved target (rsync for hosts, local mirror otherwise).
pub fn create_deploy_use_case(
    config: Config,
    project_dir: &Path,
    target: Option<DeployTarget>,
) -> DeployResult<DeployUseCase> {
    let target = match target {
        Some(target) => target,
        None => config.deploy_target()?,
    };
    let transfer = strategy_for(&target, &config.tools.rsync);
    Ok(DeployUseCase::for_target(config, project_dir, target, transfer))
}

/// Create the command runner for a run.
pub fn create_runner(dry_run: bool, json: bool) -> Box<dyn CommandRunner> {
    if dry_run {
        Box::new(DryRunRunner::new(json))
    } else {
        Box::new(SystemCommandRunner::new().json(json))
    }
}
