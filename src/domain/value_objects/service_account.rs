//! Service account value object (`owner:group`).

use std::fmt;
use std::str::FromStr;

use crate::error::DeployError;

/// OS user and group that own the deployed files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAccount {
    owner: String,
    group: String,
}

impl ServiceAccount {
    pub fn new(owner: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            group: group.into(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn group(&self) -> &str {
        &self.group
    }
}

impl FromStr for ServiceAccount {
    type Err = DeployError;

    /// `owner` alone means `owner:owner`, as chown does with a trailing colon.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || DeployError::InvalidServiceAccount {
            value: value.to_string(),
        };
        let valid_name = |name: &str| {
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        };

        let (owner, group) = match value.trim().split_once(':') {
            Some((owner, group)) => (owner, group),
            None => (value.trim(), value.trim()),
        };

        if !valid_name(owner) || !valid_name(group) {
            return Err(invalid());
        }
        Ok(Self::new(owner, group))
    }
}

impl fmt::Display for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.owner, self.group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_group() {
        let account: ServiceAccount = "riemann:riemann".parse().unwrap();
        assert_eq!(account.owner(), "riemann");
        assert_eq!(account.group(), "riemann");
        assert_eq!(account.to_string(), "riemann:riemann");
    }

    #[test]
    fn bare_owner_reuses_name_as_group() {
        let account: ServiceAccount = "riemann".parse().unwrap();
        assert_eq!(account, ServiceAccount::new("riemann", "riemann"));
    }

    #[test]
    fn rejects_shell_metacharacters() {
        assert!("riemann;rm -rf /".parse::<ServiceAccount>().is_err());
        assert!("riemann:$(id)".parse::<ServiceAccount>().is_err());
    }

    #[test]
    fn rejects_missing_parts() {
        assert!(":riemann".parse::<ServiceAccount>().is_err());
        assert!("riemann:".parse::<ServiceAccount>().is_err());
        assert!("".parse::<ServiceAccount>().is_err());
    }
}
