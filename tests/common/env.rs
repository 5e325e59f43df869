//! Test environment builder for isolated riepete-deploy runs.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Variables the binary reads that must not leak in from the host.
const SCRUBBED_ENV: &[&str] = &[
    "RIEPETE_DEPLOY_HOST",
    "RIEPETE_DEPLOY_PATH",
    "RIEPETE_DEPLOY_SERVICE",
    "RIEPETE_DEPLOY_OWNER",
    "RIEPETE_DEPLOY_SSH",
    "RIEPETE_DEPLOY_RSYNC",
    "RIEPETE_DEPLOY_FIX_PERMISSIONS",
    "RIEPETE_DEPLOY_VERBOSITY",
    "RIEPETE_DEPLOY_LOG",
];

/// Each fake tool logs `<name> <args>` and honours `FAKE_<NAME>_OUTPUT`
/// and `FAKE_<NAME>_EXIT`.
const FAKE_TOOLS: &[(&str, &str)] = &[
    ("sbt", "SBT"),
    ("ssh", "SSH"),
    ("rsync", "RSYNC"),
    ("supervisorctl", "SUPERVISORCTL"),
    ("chown", "CHOWN"),
];

/// Result of running the CLI
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated environment: project checkout, home, deployment root and fake tools.
pub struct TestEnv {
    root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    /// Project deploying to `riepete:/opt/riepete` with `sudo` turned off.
    pub fn remote() -> Self {
        let env = Self::bare();
        env.write_config(
            r#"[target]
host = "riepete"
path = "/opt/riepete"

[restart]
sudo = false
"#,
        );
        env
    }

    /// Project whose target is the local `deploy/` directory.
    pub fn local() -> Self {
        let env = Self::bare();
        fs::create_dir_all(env.deploy_root()).unwrap();
        env.write_config(&format!(
            r#"[target]
host = ""
path = "{}"

[restart]
sudo = false
"#,
            env.deploy_root().display()
        ));
        env
    }

    fn bare() -> Self {
        let root = tempfile::tempdir().unwrap();
        let bin = root.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        fs::create_dir_all(root.path().join("project")).unwrap();
        fs::create_dir_all(root.path().join("home")).unwrap();

        for (name, var) in FAKE_TOOLS {
            let script = format!(
                r#"#!/bin/sh
echo "{name} $*" >> "$FAKE_TOOL_LOG"
if [ -n "$FAKE_{var}_OUTPUT" ]; then
  printf '%s\n' "$FAKE_{var}_OUTPUT"
fi
exit "${{FAKE_{var}_EXIT:-0}}"
"#
            );
            let path = bin.join(name);
            fs::write(&path, script).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }

        Self { root, bin }
    }

    pub fn project_dir(&self) -> PathBuf {
        self.root.path().join("project")
    }

    pub fn deploy_root(&self) -> PathBuf {
        self.root.path().join("deploy")
    }

    pub fn artifact_dir(&self) -> PathBuf {
        self.project_dir().join("target/riepete-dist")
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.project_dir().join("deploy.toml"), content).unwrap();
    }

    pub fn append_config(&self, content: &str) {
        let path = self.project_dir().join("deploy.toml");
        let mut existing = fs::read_to_string(&path).unwrap_or_default();
        existing.push_str(content);
        fs::write(path, existing).unwrap();
    }

    /// Write a file into the artifact tree the fake build "produces".
    pub fn write_artifact(&self, relative: &str, content: &str) {
        write_file(&self.artifact_dir().join(relative), content);
    }

    /// Write a file directly into the local deployment root.
    pub fn write_deployed(&self, relative: &str, content: &str) {
        write_file(&self.deploy_root().join(relative), content);
    }

    pub fn read_deployed(&self, relative: &str) -> Option<String> {
        fs::read_to_string(self.deploy_root().join(relative)).ok()
    }

    /// Invocations of the fake tools, in order.
    pub fn tool_log(&self) -> Vec<String> {
        fs::read_to_string(self.tool_log_path())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Program names of the logged invocations, in order.
    pub fn tools_invoked(&self) -> Vec<String> {
        self.tool_log()
            .iter()
            .filter_map(|line| line.split_whitespace().next().map(str::to_string))
            .collect()
    }

    fn tool_log_path(&self) -> PathBuf {
        self.root.path().join("tools.log")
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut paths = vec![self.bin.clone()];
        if let Some(existing) = std::env::var_os("PATH") {
            paths.extend(std::env::split_paths(&existing));
        }
        let path = std::env::join_paths(paths).unwrap();

        let home = self.root.path().join("home");
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_riepete-deploy"));
        cmd.current_dir(self.project_dir())
            .args(args)
            .env("PATH", path)
            .env("HOME", &home)
            .env("XDG_CONFIG_HOME", home.join(".config"))
            .env("FAKE_TOOL_LOG", self.tool_log_path())
            .env("NO_COLOR", "1");
        for key in SCRUBBED_ENV {
            cmd.env_remove(key);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        to_result(cmd.output().expect("failed to execute riepete-deploy"))
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
