//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DeployError, DeployResult};

use super::types::{Config, Verbosity};

/// Project config file name, looked up in the project directory.
pub const PROJECT_CONFIG_FILE: &str = "deploy.toml";

/// Env var prefix for overrides.
pub const ENV_PREFIX: &str = "RIEPETE_DEPLOY_";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> DeployResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| DeployError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| DeployError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve configuration for a project directory.
///
/// Precedence: explicit `--config` file, `<project>/deploy.toml`, user config
/// (`$XDG_CONFIG_HOME/riepete-deploy/config.toml`), built-in defaults. The
/// first file found wins; env overrides are applied on top.
pub fn load_layered(
    project_dir: &Path,
    explicit: Option<&Path>,
) -> DeployResult<(Config, Option<PathBuf>, Vec<ConfigWarning>)> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let project_config = project_dir.join(PROJECT_CONFIG_FILE);
            if project_config.is_file() {
                Some(project_config)
            } else {
                user_config_path().filter(|p| p.is_file())
            }
        }
    };

    match candidate {
        Some(path) => {
            tracing::debug!(config = %path.display(), "loading configuration");
            let (config, warnings) = load_with_warnings(&path)?;
            Ok((with_env_overrides(config), Some(path), warnings))
        }
        None => {
            tracing::debug!("no configuration file found, using defaults");
            Ok((with_env_overrides(Config::default()), None, Vec::new()))
        }
    }
}

/// User-level config file location.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("riepete-deploy").join("config.toml"))
}

/// Apply environment variable overrides (RIEPETE_DEPLOY_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides read through `get_env`.
pub fn apply_env_overrides(mut config: Config, get_env: impl Fn(&str) -> Option<String>) -> Config {
    let var = |name: &str| get_env(&format!("{}{}", ENV_PREFIX, name));

    if let Some(host) = var("HOST") {
        config.target.host = Some(host);
    }
    if let Some(path) = var("PATH") {
        config.target.path = path;
    }
    if let Some(service) = var("SERVICE") {
        config.restart.service = service;
    }
    if let Some(owner) = var("OWNER") {
        config.permissions.owner = owner;
    }
    if let Some(ssh) = var("SSH") {
        config.tools.ssh = ssh;
    }
    if let Some(rsync) = var("RSYNC") {
        config.tools.rsync = rsync;
    }

    if let Some(value) = var("FIX_PERMISSIONS") {
        match parse_bool(&value) {
            Some(on) => config.permissions.on_deploy = on,
            None => tracing::warn!(
                "ignoring {}FIX_PERMISSIONS='{}' (expected true/false)",
                ENV_PREFIX,
                value
            ),
        }
    }

    if let Some(value) = var("VERBOSITY") {
        config.output.verbosity = match value.to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "normal" => Verbosity::Normal,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            other => {
                tracing::warn!(
                    "ignoring {}VERBOSITY='{}' (expected quiet, normal, verbose or debug)",
                    ENV_PREFIX,
                    other
                );
                config.output.verbosity
            }
        };
    }

    config
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "target",
        "host",
        "path",
        "build",
        "command",
        "artifact_dir",
        "sync",
        "exclude",
        "ignore_file",
        "delete",
        "permissions",
        "owner",
        "on_deploy",
        "sudo",
        "restart",
        "service",
        "supervisorctl",
        "tools",
        "ssh",
        "rsync",
        "output",
        "verbosity",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
