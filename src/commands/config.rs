use anyhow::Result;
use serde_json::json;

use super::Session;

/// Print the effective configuration.
pub fn cmd_config(session: &Session) -> Result<()> {
    let rendered = toml::to_string_pretty(&session.config)?;

    if session.ui.json {
        crate::ui::json::emit(json!({
            "event": "config",
            "source": session.config_path.as_ref().map(|p| p.display().to_string()),
            "config": serde_json::to_value(&session.config)?,
        }))?;
        return Ok(());
    }

    match &session.config_path {
        Some(path) => println!("# loaded from {}", path.display()),
        None => println!("# built-in defaults (no config file found)"),
    }
    print!("{}", rendered);
    Ok(())
}
