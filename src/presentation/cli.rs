//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! Global flags (--json, --color, --verbose, --config, --project-dir,
//! --target) are inherited by all subcommands. Tasks take no positional
//! arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// riepete-deploy - build, ship and restart the riepete server
#[derive(Parser, Debug)]
#[command(name = "riepete-deploy")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI (NDJSON events on stdout)
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ./deploy.toml, then the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Project checkout to build and deploy
    #[arg(long, global = true, value_name = "PATH", default_value = ".")]
    pub project_dir: PathBuf,

    /// Deploy target as host:/path or a local /path (overrides [target])
    #[arg(long, global = true, value_name = "TARGET")]
    pub target: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Build, sync, fix permissions (if enabled) and restart
    Deploy {
        /// Print the external commands without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Run the build tool only
    #[command(visible_alias = "compile")]
    Build,

    /// Mirror the artifact tree to the target only
    Sync {
        /// Print the external commands without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Reset ownership of the deployment root
    #[command(visible_alias = "reset-permissions")]
    FixPermissions,

    /// Restart the supervised service
    Restart,

    /// Preview what sync would change
    Plan,

    /// Print the resolved configuration as TOML
    Config,
}
