use anyhow::Result;
use riepete_deploy::domain::ports::DeployEventSink;
use riepete_deploy::infrastructure::{DeployLock, JsonEventSink};
use riepete_deploy::presentation::{create_deploy_use_case, create_runner};
use riepete_deploy::Task;

use super::Session;
use crate::ui::console::ConsoleEventSink;
use crate::ui::views::pipeline::render_task_header;

/// Run a pipeline task (`deploy` or a single step).
pub fn cmd_task(session: &Session, task: Task, dry_run: bool) -> Result<()> {
    let target = session.resolve_target()?;
    let use_case = create_deploy_use_case(
        session.config.clone(),
        &session.project_dir,
        Some(target.clone()),
    )?;

    // Dry runs change nothing, so they do not contend for the lock.
    let _lock = if dry_run {
        None
    } else {
        Some(DeployLock::acquire(&session.project_dir)?)
    };

    let ui = session.ui;
    if !ui.json {
        let transfer = if target.is_remote() { "rsync" } else { "local mirror" };
        print!(
            "{}",
            render_task_header(task, &target, transfer, dry_run, ui.color, ui.unicode)
        );
        println!();
    }

    let runner = create_runner(dry_run, ui.json);
    let sink: Box<dyn DeployEventSink> = if ui.json {
        Box::new(JsonEventSink::stdout())
    } else {
        Box::new(ConsoleEventSink::stdout(ui))
    };

    let report = use_case.execute(task, runner.as_ref(), sink.as_ref())?;
    report.into_result()?;
    Ok(())
}
