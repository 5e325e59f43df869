use riepete_deploy::DeployError;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        ColoredText::error(err.to_string()).bold().render(supports_color)
    );

    for cause in err.chain().skip(1) {
        out.push_str(&format!("  caused by: {}\n", cause));
    }

    if let Some(hint) = err.downcast_ref::<DeployError>().and_then(hint) {
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            ColoredText::dim(hint).render(supports_color)
        ));
    }
    out
}

fn hint(err: &DeployError) -> Option<String> {
    match err {
        DeployError::ToolNotFound { program, .. } => Some(format!(
            "install `{}` or point [tools] / [build] in deploy.toml at it",
            program
        )),
        DeployError::Locked { path } => Some(format!(
            "wait for the other deploy to finish; the lock is released when it exits ({})",
            path.display()
        )),
        DeployError::ArtifactMissing { .. } => {
            Some("check build.artifact_dir in deploy.toml".to_string())
        }
        DeployError::RestartFailed { .. } => {
            Some("files already synced stay in place; fix the service and run `restart`".to_string())
        }
        _ => None,
    }
}

pub fn print_error(err: &anyhow::Error, json: bool, supports_color: bool, supports_unicode: bool) {
    if json {
        let step = err
            .downcast_ref::<DeployError>()
            .and_then(DeployError::step_kind)
            .map(|k| k.as_str());
        let output = serde_json::json!({
            "event": "error",
            "message": err.to_string(),
            "step": step,
        });
        let _ = crate::ui::json::emit(output);
        return;
    }

    eprint!("{}", format_error(err, supports_color, supports_unicode));
}
