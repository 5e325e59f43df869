//! Command Runner Port
//!
//! Every pipeline step is one external command. Steps describe the command
//! as a [`CommandSpec`]; a runner decides how (or whether) to execute it.

use std::fmt;
use std::path::PathBuf;

use crate::domain::services::shell::quote;
use crate::error::{DeployResult, ExitInfo};

/// An external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Local working directory (inherits the current one when `None`)
    pub cwd: Option<PathBuf>,
    /// Capture stdout/stderr so the caller can inspect them
    pub capture: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            capture: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn capture_output(mut self) -> Self {
        self.capture = true;
        self
    }
}

impl fmt::Display for CommandSpec {
    /// Shell-quoted command line, suitable for copy and paste.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

/// How an external command finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Exit code, `None` if killed by a signal
    pub code: Option<i32>,
    /// Captured stdout (empty unless `capture` was set)
    pub stdout: String,
    /// Captured stderr (empty unless `capture` was set)
    pub stderr: String,
}

impl CommandOutcome {
    pub fn success() -> Self {
        Self {
            code: Some(0),
            ..Self::default()
        }
    }

    pub fn exit(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn exit_info(&self) -> ExitInfo {
        ExitInfo(self.code)
    }

    /// stdout followed by stderr.
    pub fn combined_output(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

/// Executes external commands on behalf of pipeline steps.
///
/// Implementations:
/// - `SystemCommandRunner`: spawns the process, streaming its output
/// - `DryRunRunner`: prints the command line and reports success
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion.
    ///
    /// A non-zero exit is not an error here; it is reported in the outcome.
    /// Errors mean the command could not be started at all.
    fn run(&self, spec: &CommandSpec) -> DeployResult<CommandOutcome>;

    /// True when commands are only printed, never executed.
    fn is_dry_run(&self) -> bool {
        false
    }
}
