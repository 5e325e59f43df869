//! riepete-deploy CLI
//!
//! Usage: riepete-deploy [OPTIONS] <COMMAND>
//!
//! Commands:
//!   deploy            Build, sync, fix permissions (if enabled) and restart
//!   build             Run the build tool only
//!   sync              Mirror the artifact tree to the target only
//!   fix-permissions   Reset ownership of the deployment root
//!   restart           Restart the supervised service
//!   plan              Preview what sync would change
//!   config            Print the resolved configuration

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use riepete_deploy::config::{Config, Verbosity};
use riepete_deploy::presentation::{Cli, Commands};
use riepete_deploy::{StepKind, Task};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

mod commands;
mod ui;

use commands::{parse_target, print_config_warnings, Session};
use ui::context::UiContext;
use ui::error::print_error;

const LOG_ENV: &str = "RIEPETE_DEPLOY_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();
    let log_filter = init_tracing(cli.verbose);

    let session = match load_session(&cli, log_filter.as_ref()) {
        Ok(session) => session,
        Err(e) => {
            let fallback = UiContext::new(cli.json, cli.verbose, cli.color, &Config::default());
            print_error(&e, fallback.json, fallback.color, fallback.unicode);
            return ExitCode::FAILURE;
        }
    };

    match run(&cli.command, &session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e, session.ui.json, session.ui.color, session.ui.unicode);
            ExitCode::FAILURE
        }
    }
}

fn load_session(cli: &Cli, log_filter: Option<&LogFilter>) -> Result<Session> {
    let (config, config_path, warnings) =
        Config::load_layered(&cli.project_dir, cli.config.as_deref())?;

    if let Some(log_filter) = log_filter {
        log_filter.apply_verbosity(config.output.verbosity);
    }

    if let Some(path) = &config_path {
        print_config_warnings(path, &warnings, cli.json);
    }

    let ui = UiContext::new(cli.json, cli.verbose, cli.color, &config);
    let target = parse_target(cli.target.as_deref())?;

    Ok(Session {
        config,
        config_path,
        project_dir: cli.project_dir.clone(),
        target,
        ui,
    })
}

fn run(command: &Commands, session: &Session) -> Result<()> {
    use commands::task::cmd_task;

    match command {
        Commands::Deploy { dry_run } => cmd_task(session, Task::Deploy, *dry_run),
        Commands::Build => cmd_task(session, Task::Step(StepKind::Build), false),
        Commands::Sync { dry_run } => cmd_task(session, Task::Step(StepKind::Sync), *dry_run),
        Commands::FixPermissions => {
            cmd_task(session, Task::Step(StepKind::FixPermissions), false)
        }
        Commands::Restart => cmd_task(session, Task::Step(StepKind::Restart), false),
        Commands::Plan => commands::plan::cmd_plan(session),
        Commands::Config => commands::config::cmd_config(session),
    }
}

/// Handle on the log filter while the configured verbosity is still unknown.
///
/// `None` from [`init_tracing`] means `-v` or `RIEPETE_DEPLOY_LOG` already
/// fixed the filter.
struct LogFilter {
    handle: reload::Handle<EnvFilter, Registry>,
}

impl LogFilter {
    fn apply_verbosity(&self, verbosity: Verbosity) {
        if let Err(e) = self.handle.reload(EnvFilter::new(verbosity.log_directive())) {
            tracing::debug!(error = %e, "could not reload log filter");
        }
    }
}

/// Logs go to stderr; stdout carries the progress view or JSON events.
///
/// Installed before the config loads so that its warnings are not lost.
fn init_tracing(verbose: u8) -> Option<LogFilter> {
    let (directive, configurable) = match verbose {
        0 => (Verbosity::default().log_directive(), true),
        1 => ("info", false),
        2 => ("debug", false),
        _ => ("trace", false),
    };
    let (filter, from_env) = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(directive), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .is_ok();

    (installed && configurable && !from_env).then_some(LogFilter { handle })
}
