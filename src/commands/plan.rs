use anyhow::Result;
use riepete_deploy::presentation::{create_deploy_use_case, create_runner};
use serde_json::json;

use super::Session;
use crate::ui::views::plan::render_plan;

/// Preview what a sync would change, without touching the target.
pub fn cmd_plan(session: &Session) -> Result<()> {
    let target = session.resolve_target()?;
    let use_case =
        create_deploy_use_case(session.config.clone(), &session.project_dir, Some(target.clone()))?;
    let source = session.project_dir.join(&session.config.build.artifact_dir);

    let runner = create_runner(false, session.ui.json);
    let report = use_case.plan(runner.as_ref())?;

    if session.ui.json {
        crate::ui::json::emit(json!({
            "event": "plan",
            "source": source.display().to_string(),
            "target": target.to_string(),
            "created": report.created,
            "updated": report.updated,
            "deleted": report.deleted,
            "unchanged": report.unchanged,
        }))?;
        return Ok(());
    }

    print!(
        "{}",
        render_plan(&source, &target, &report, session.ui.color, session.ui.unicode)
    );
    Ok(())
}
