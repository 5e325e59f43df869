//! Command runners
//!
//! `SystemCommandRunner` spawns external tools with inherited stdio so their
//! own output reaches the user unchanged. `DryRunRunner` only prints the
//! command lines.

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::sync::Mutex;

use crate::domain::ports::{CommandOutcome, CommandRunner, CommandSpec};
use crate::error::{DeployError, DeployResult};

/// Runs commands for real.
#[derive(Debug, Default)]
pub struct SystemCommandRunner {
    /// Keep stdout clean for NDJSON: child stdout goes to stderr
    json: bool,
}

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    fn command(spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        if let Some(dir) = &spec.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn spawn_error(spec: &CommandSpec, err: io::Error) -> DeployError {
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => DeployError::ToolNotFound {
                program: spec.program.clone(),
                source: err,
            },
            _ => DeployError::Io(err),
        }
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, spec: &CommandSpec) -> DeployResult<CommandOutcome> {
        tracing::info!(command = %spec, "running");

        let mut cmd = Self::command(spec);
        cmd.stdin(Stdio::inherit());

        if spec.capture {
            let output = cmd.output().map_err(|e| Self::spawn_error(spec, e))?;
            let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

            // Captured output is still shown to the user.
            if self.json {
                eprint!("{}", stdout);
            } else {
                print!("{}", stdout);
            }
            eprint!("{}", stderr);

            tracing::debug!(code = ?output.status.code(), "command finished");
            return Ok(CommandOutcome {
                code: output.status.code(),
                stdout,
                stderr,
            });
        }

        if self.json {
            cmd.stdout(Stdio::from(io::stderr()));
        } else {
            cmd.stdout(Stdio::inherit());
        }
        cmd.stderr(Stdio::inherit());

        let status = cmd.status().map_err(|e| Self::spawn_error(spec, e))?;
        tracing::debug!(code = ?status.code(), "command finished");

        Ok(CommandOutcome {
            code: status.code(),
            ..CommandOutcome::default()
        })
    }
}

/// Prints each command instead of running it.
pub struct DryRunRunner {
    out: Mutex<Box<dyn Write + Send>>,
    commands: Mutex<Vec<String>>,
}

impl DryRunRunner {
    /// Print to stdout (or stderr when stdout carries JSON).
    pub fn new(json: bool) -> Self {
        if json {
            Self::with_writer(io::stderr())
        } else {
            Self::with_writer(io::stdout())
        }
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
            commands: Mutex::new(Vec::new()),
        }
    }

    /// Command lines printed so far.
    pub fn commands(&self) -> Vec<String> {
        self.commands
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

impl CommandRunner for DryRunRunner {
    fn run(&self, spec: &CommandSpec) -> DeployResult<CommandOutcome> {
        let line = match &spec.cwd {
            Some(dir) => format!("(cd {}) {}", dir.display(), spec),
            None => spec.to_string(),
        };
        if let Ok(mut out) = self.out.lock() {
            writeln!(out, "$ {}", line)?;
            out.flush()?;
        }
        if let Ok(mut commands) = self.commands.lock() {
            commands.push(line);
        }
        Ok(CommandOutcome::success())
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn dry_run_prints_and_succeeds() {
        let buf = SharedBuf::default();
        let runner = DryRunRunner::with_writer(buf.clone());

        let outcome = runner
            .run(&CommandSpec::new("ssh").arg("riepete").arg("sudo supervisorctl restart riepete"))
            .unwrap();

        assert!(outcome.is_success());
        assert!(runner.is_dry_run());
        let printed = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert_eq!(printed, "$ ssh riepete 'sudo supervisorctl restart riepete'\n");
        assert_eq!(runner.commands().len(), 1);
    }

    #[test]
    fn dry_run_shows_working_directory() {
        let runner = DryRunRunner::with_writer(io::sink());
        runner
            .run(&CommandSpec::new("sbt").arg("dist").current_dir("/src/riepete"))
            .unwrap();
        assert_eq!(runner.commands(), vec!["(cd /src/riepete) sbt dist"]);
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_reports_exit_code() {
        let runner = SystemCommandRunner::new();
        let outcome = runner
            .run(&CommandSpec::new("sh").args(["-c", "exit 3"]))
            .unwrap();
        assert_eq!(outcome.code, Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_captures_output() {
        let runner = SystemCommandRunner::new().json(true);
        let outcome = runner
            .run(
                &CommandSpec::new("sh")
                    .args(["-c", "echo 'riepete: started'"])
                    .capture_output(),
            )
            .unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.stdout, "riepete: started\n");
    }

    #[test]
    fn missing_program_is_tool_not_found() {
        let runner = SystemCommandRunner::new();
        let err = runner
            .run(&CommandSpec::new("riepete-deploy-no-such-tool"))
            .unwrap_err();
        assert!(matches!(err, DeployError::ToolNotFound { .. }));
    }
}
