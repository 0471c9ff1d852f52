//! Author/committer identity written into every synthesized commit.

use crate::error::Error;
use crate::ports::ConfiguredIdentity;

/// A validated `name <email>` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    name: String,
    email: String,
}

impl Identity {
    /// Validates a name and email.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentity`] if either part is blank or contains
    /// angle brackets or line breaks, any of which would break the
    /// `author`/`committer` lines of the stream.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self, Error> {
        let name = name.into().trim().to_string();
        let email = email.into().trim().to_string();
        for (field, value) in [("name", &name), ("email", &email)] {
            if value.is_empty() {
                return Err(Error::InvalidIdentity(format!("{field} is empty")));
            }
            if value.contains(['<', '>', '\n', '\r']) {
                return Err(Error::InvalidIdentity(format!(
                    "{field} {value:?} contains '<', '>' or a line break"
                )));
            }
        }
        Ok(Self { name, email })
    }

    /// Uses the configured identity, filling missing parts from the fallbacks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentity`] if the resulting identity is invalid.
    pub fn resolve(
        configured: &ConfiguredIdentity,
        fallback_name: &str,
        fallback_email: &str,
    ) -> Result<Self, Error> {
        let pick = |value: &Option<String>, fallback: &str| {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty()).unwrap_or(fallback).to_string()
        };
        Self::new(pick(&configured.name, fallback_name), pick(&configured.email, fallback_email))
    }

    /// The author name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The author email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_stream_breaking_characters() {
        assert!(Identity::new("Ada <x>", "ada@example.com").is_err());
        assert!(Identity::new("Ada", "ada@example.com\nfrom :1").is_err());
        assert!(Identity::new("  ", "ada@example.com").is_err());
    }

    #[test]
    fn trims_whitespace() {
        let id = Identity::new(" Ada ", " ada@example.com\t").unwrap();
        assert_eq!(id.name(), "Ada");
        assert_eq!(id.email(), "ada@example.com");
    }

    #[test]
    fn resolve_prefers_configured_values() {
        let configured = ConfiguredIdentity {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
        };
        let id = Identity::resolve(&configured, "gitdraw", "gitdraw@local").unwrap();
        assert_eq!(id.name(), "Ada");
        assert_eq!(id.email(), "ada@example.com");
    }

    #[test]
    fn resolve_falls_back_for_missing_or_blank_values() {
        let configured = ConfiguredIdentity { name: Some("   ".to_string()), email: None };
        let id = Identity::resolve(&configured, "gitdraw", "gitdraw@local").unwrap();
        assert_eq!(id.name(), "gitdraw");
        assert_eq!(id.email(), "gitdraw@local");
    }
}
