//! Deploy target value object - where the artifact tree is mirrored to.

use std::fmt;

use crate::error::{DeployError, DeployResult};

/// Deployment root, optionally on a remote host.
///
/// Specs follow the rsync/scp convention:
/// - `host:/opt/riepete` or `user@host:/opt/riepete` - remote directory
/// - `/srv/staging/riepete` - local directory (no host)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployTarget {
    host: Option<String>,
    path: String,
}

impl DeployTarget {
    /// Target on a remote host reached through ssh.
    pub fn remote(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            path: path.into(),
        }
    }

    /// Target directory on this machine.
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            host: None,
            path: path.into(),
        }
    }

    /// Parse a `host:path` / `user@host:path` / `path` spec.
    pub fn parse(spec: &str) -> DeployResult<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(invalid(spec, "target is empty"));
        }

        // A colon after a slash belongs to a local path, not a host separator.
        let split = spec
            .split_once(':')
            .filter(|(host, _)| !host.contains('/'));

        match split {
            Some((host, path)) => {
                if host.is_empty() {
                    return Err(invalid(spec, "host is empty"));
                }
                if path.is_empty() {
                    return Err(invalid(spec, "remote path is empty"));
                }
                Ok(Self::remote(host, path))
            }
            None => Ok(Self::local(spec)),
        }
    }

    /// Build a target from the `[target]` config section.
    pub fn from_parts(host: Option<&str>, path: &str) -> DeployResult<Self> {
        if path.trim().is_empty() {
            return Err(invalid(path, "target.path is empty"));
        }
        match host.map(str::trim) {
            Some("") => Err(invalid(path, "target.host is empty")),
            Some(host) => Ok(Self::remote(host, path)),
            None => Ok(Self::local(path)),
        }
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_remote(&self) -> bool {
        self.host.is_some()
    }

    /// Destination argument for rsync (`host:path` or `path`).
    pub fn rsync_destination(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DeployTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.host {
            Some(host) => write!(f, "{}:{}", host, self.path),
            None => write!(f, "{}", self.path),
        }
    }
}

fn invalid(spec: &str, reason: &str) -> DeployError {
    DeployError::InvalidTarget {
        spec: spec.to_string(),
        reason: reason.to_string(),
    }
}
