//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{DeployTarget, ServiceAccount, DEFAULT_EXCLUDES};
use crate::error::DeployResult;

use super::loader::{self, ConfigWarning};

/// `[target]` - where the artifact tree is deployed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// ssh host (alias from ~/.ssh/config or `user@host`); empty for a local directory
    #[serde(default = "default_host", skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default = "default_target_path")]
    pub path: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            path: default_target_path(),
        }
    }
}

fn default_host() -> Option<String> {
    Some("riepete".to_string())
}

fn default_target_path() -> String {
    "/opt/riepete".to_string()
}

/// `[build]` - local build command and its output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_build_command")]
    pub command: Vec<String>,

    /// Artifact directory, relative to the project directory
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            command: default_build_command(),
            artifact_dir: default_artifact_dir(),
        }
    }
}

fn default_build_command() -> Vec<String> {
    vec!["sbt".to_string(), "dist".to_string()]
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("target/riepete-dist")
}

/// `[sync]` - mirror settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_excludes")]
    pub exclude: Vec<String>,

    /// Ignore file merged into the exclusion set, relative to the project directory
    #[serde(default = "default_ignore_file")]
    pub ignore_file: PathBuf,

    #[serde(default = "default_true")]
    pub delete: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            exclude: default_excludes(),
            ignore_file: default_ignore_file(),
            delete: true,
        }
    }
}

fn default_excludes() -> Vec<String> {
    DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect()
}

fn default_ignore_file() -> PathBuf {
    PathBuf::from(".gitignore")
}

/// `[permissions]` - ownership reset of the deployment root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionsConfig {
    /// `owner:group` (or `owner`)
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Run the ownership reset as part of `deploy`
    #[serde(default)]
    pub on_deploy: bool,

    #[serde(default)]
    pub sudo: bool,
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            on_deploy: false,
            sudo: false,
        }
    }
}

fn default_owner() -> String {
    "riemann:riemann".to_string()
}

/// `[restart]` - supervisor restart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestartConfig {
    #[serde(default = "default_service")]
    pub service: String,

    #[serde(default = "default_supervisorctl")]
    pub supervisorctl: String,

    #[serde(default = "default_true")]
    pub sudo: bool,
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            service: default_service(),
            supervisorctl: default_supervisorctl(),
            sudo: true,
        }
    }
}

fn default_service() -> String {
    "riepete".to_string()
}

fn default_supervisorctl() -> String {
    "supervisorctl".to_string()
}

/// `[tools]` - external programs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_ssh")]
    pub ssh: String,

    #[serde(default = "default_rsync")]
    pub rsync: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ssh: default_ssh(),
            rsync: default_rsync(),
        }
    }
}

fn default_ssh() -> String {
    "ssh".to_string()
}

fn default_rsync() -> String {
    "rsync".to_string()
}

/// `[output]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,

    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// `tracing` filter directive for this level.
    pub fn log_directive(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub permissions: PermissionsConfig,

    #[serde(default)]
    pub restart: RestartConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> DeployResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> DeployResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Resolve the config for a project: explicit file, project file, user file, defaults.
    pub fn load_layered(
        project_dir: &Path,
        explicit: Option<&Path>,
    ) -> DeployResult<(Self, Option<PathBuf>, Vec<ConfigWarning>)> {
        loader::load_layered(project_dir, explicit)
    }

    /// Apply environment variable overrides (RIEPETE_DEPLOY_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// The configured deploy target. `host = ""` selects a local directory.
    pub fn deploy_target(&self) -> DeployResult<DeployTarget> {
        let host = self.target.host.as_deref().filter(|h| !h.trim().is_empty());
        DeployTarget::from_parts(host, &self.target.path)
    }

    /// The configured service account.
    pub fn service_account(&self) -> DeployResult<ServiceAccount> {
        self.permissions.owner.parse()
    }
}
