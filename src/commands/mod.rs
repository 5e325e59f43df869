//! Command handlers for the CLI binary.

pub mod config;
pub mod plan;
pub mod task;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use riepete_deploy::config::{Config, ConfigWarning};
use riepete_deploy::DeployTarget;

use crate::ui::context::UiContext;

/// Everything a command needs after flags and config are resolved.
pub struct Session {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub project_dir: PathBuf,
    pub target: Option<DeployTarget>,
    pub ui: UiContext,
}

impl Session {
    /// Target from `--target`, falling back to `[target]`.
    pub fn resolve_target(&self) -> Result<DeployTarget> {
        match &self.target {
            Some(target) => Ok(target.clone()),
            None => Ok(self.config.deploy_target()?),
        }
    }
}

/// Parse `--target`, if given.
pub fn parse_target(spec: Option<&str>) -> Result<Option<DeployTarget>> {
    spec.map(|s| DeployTarget::parse(s).with_context(|| format!("invalid --target '{}'", s)))
        .transpose()
}

pub fn print_config_warnings(path: &Path, warnings: &[ConfigWarning], json: bool) {
    for w in warnings {
        if json {
            let _ = crate::ui::json::emit(serde_json::json!({
                "event": "warning",
                "kind": "unknown_config_key",
                "key": w.key,
                "file": path.display().to_string(),
                "line": w.line,
                "suggestion": w.suggestion,
            }));
            continue;
        }

        match w.line {
            Some(line) => eprintln!(
                "warning: unknown config key '{}' in {}:{}",
                w.key,
                path.display(),
                line
            ),
            None => eprintln!("warning: unknown config key '{}' in {}", w.key, path.display()),
        }
        if let Some(suggestion) = &w.suggestion {
            eprintln!("  did you mean '{}'?", suggestion);
        }
    }
}
