//! Build step: run the local build tool and check for its artifact.

use std::path::PathBuf;

use super::{Step, StepOutput};
use crate::application::context::RemoteContext;
use crate::domain::ports::{CommandRunner, CommandSpec};
use crate::domain::value_objects::{StepKind, StepScope};
use crate::error::{DeployError, DeployResult};

#[derive(Debug, Clone)]
pub struct BuildStep {
    project_dir: PathBuf,
    command: Vec<String>,
    artifact_dir: PathBuf,
}

impl BuildStep {
    /// `artifact_dir` is resolved against `project_dir` when relative.
    pub fn new(project_dir: impl Into<PathBuf>, command: Vec<String>, artifact_dir: PathBuf) -> Self {
        Self {
            project_dir: project_dir.into(),
            command,
            artifact_dir,
        }
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.project_dir.join(&self.artifact_dir)
    }

    pub fn command(&self) -> DeployResult<CommandSpec> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or(DeployError::EmptyBuildCommand)?;
        Ok(CommandSpec::new(program.as_str())
            .args(args.iter().map(String::as_str))
            .current_dir(&self.project_dir))
    }
}

impl Step for BuildStep {
    fn kind(&self) -> StepKind {
        StepKind::Build
    }

    fn scope(&self) -> StepScope {
        StepScope::Outside
    }

    fn run(&self, runner: &dyn CommandRunner, _context: &RemoteContext) -> DeployResult<StepOutput> {
        let spec = self.command()?;
        let outcome = runner.run(&spec)?;
        if !outcome.is_success() {
            return Err(DeployError::BuildFailed {
                command: spec.to_string(),
                exit: outcome.exit_info(),
            });
        }

        let artifact = self.artifact_path();
        if !runner.is_dry_run() && !artifact.is_dir() {
            return Err(DeployError::ArtifactMissing { path: artifact });
        }
        tracing::debug!(artifact = %artifact.display(), "build produced artifact tree");

        Ok(StepOutput::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::ScriptedRunner;
    use crate::domain::ports::CommandOutcome;
    use std::fs;
    use tempfile::tempdir;

    fn sbt_dist(dir: &std::path::Path) -> BuildStep {
        BuildStep::new(
            dir,
            vec!["sbt".to_string(), "dist".to_string()],
            PathBuf::from("target/riepete-dist"),
        )
    }

    #[test]
    fn runs_build_in_project_dir() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("target/riepete-dist")).unwrap();
        let runner = ScriptedRunner::new();

        sbt_dist(dir.path())
            .run(&runner, &RemoteContext::new())
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "sbt");
        assert_eq!(calls[0].args, vec!["dist"]);
        assert_eq!(calls[0].cwd.as_deref(), Some(dir.path()));
    }

    #[test]
    fn non_zero_exit_is_build_failure() {
        let dir = tempdir().unwrap();
        let runner = ScriptedRunner::new().respond("sbt", CommandOutcome::exit(1));

        let err = sbt_dist(dir.path())
            .run(&runner, &RemoteContext::new())
            .unwrap_err();

        assert!(matches!(err, DeployError::BuildFailed { .. }));
        assert!(err.to_string().contains("`sbt dist` exited with status 1"));
    }

    #[test]
    fn missing_artifact_is_build_failure() {
        let dir = tempdir().unwrap();
        let runner = ScriptedRunner::new();

        let err = sbt_dist(dir.path())
            .run(&runner, &RemoteContext::new())
            .unwrap_err();

        assert!(matches!(err, DeployError::ArtifactMissing { .. }));
    }

    #[test]
    fn dry_run_does_not_require_artifact() {
        let dir = tempdir().unwrap();
        let runner = ScriptedRunner::new().dry_run();

        assert!(sbt_dist(dir.path())
            .run(&runner, &RemoteContext::new())
            .is_ok());
    }

    #[test]
    fn empty_command_is_rejected() {
        let step = BuildStep::new("/src", Vec::new(), PathBuf::from("dist"));
        assert!(matches!(
            step.command(),
            Err(DeployError::EmptyBuildCommand)
        ));
    }
}
