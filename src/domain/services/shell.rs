//! Shell command construction
//!
//! Remote steps run one shell script through `ssh <host> '<script>'`; local
//! targets run the same script through `sh -c`.

use crate::domain::ports::CommandSpec;
use crate::domain::value_objects::DeployTarget;

/// Quote a word for POSIX sh, leaving plain words untouched.
pub fn quote(s: &str) -> String {
    let plain = !s.is_empty()
        && s.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-')
        });
    if plain {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', "'\\''"))
    }
}

/// Quote a path, keeping a leading `~/` outside the quotes so the remote
/// shell still expands it.
pub fn quote_path(path: &str) -> String {
    if path == "~" {
        return path.to_string();
    }
    match path.strip_prefix("~/") {
        Some("") => "~/".to_string(),
        Some(rest) => format!("~/{}", quote(rest)),
        None => quote(path),
    }
}

/// Command that runs `script` on the target's host, optionally inside `cwd`.
pub fn shell_command(
    target: &DeployTarget,
    ssh: &str,
    cwd: Option<&str>,
    script: &str,
) -> CommandSpec {
    let script = match cwd {
        Some(dir) => format!("cd {} && {}", quote_path(dir), script),
        None => script.to_string(),
    };

    match target.host() {
        Some(host) => CommandSpec::new(ssh).arg(host).arg(script),
        None => CommandSpec::new("sh").arg("-c").arg(script),
    }
}
