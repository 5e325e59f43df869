//! Configuration module
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (RIEPETE_DEPLOY_*)
//! 3. Explicit `--config` file, else project `deploy.toml`
//! 4. User config (~/.config/riepete-deploy/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    apply_env_overrides, user_config_path, ConfigWarning, ENV_PREFIX, PROJECT_CONFIG_FILE,
};
pub use types::{
    BuildConfig, ColorMode, Config, OutputConfig, PermissionsConfig, RestartConfig, SyncConfig,
    TargetConfig, ToolsConfig, Verbosity,
};
