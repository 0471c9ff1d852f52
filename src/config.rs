//! Runtime configuration.
//!
//! Settings start from built-in defaults, are optionally replaced by a YAML
//! file named in `GITDRAW_CONFIG`, and finally overridden field by field by
//! `GITDRAW_*` environment variables. A `.env` file in the working directory
//! is loaded first.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::stream::validate_intensity;

/// Environment variable naming a YAML settings file.
pub const CONFIG_ENV: &str = "GITDRAW_CONFIG";

/// User-tunable settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default directory for the generated repository.
    pub output_dir: PathBuf,
    /// Default commits per text date.
    pub intensity: u32,
    /// Commits per background date when background fill is enabled.
    pub background_intensity: u32,
    /// Author name used when git has no `user.name`.
    pub author_name: String,
    /// Author email used when git has no `user.email`.
    pub author_email: String,
    /// Program invoked for repository operations.
    pub git_program: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("gitdraw-repo"),
            intensity: 15,
            background_intensity: 1,
            author_name: "gitdraw".to_string(),
            author_email: "gitdraw@local".to_string(),
            git_program: "git".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from `.env`, the optional YAML file, and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the YAML file cannot be read or parsed or
    /// an override is malformed.
    pub fn load() -> Result<Self, Error> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings using `lookup` in place of the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`Settings::load`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut settings = match lookup(CONFIG_ENV) {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .map_err(|e| Error::Config(format!("reading {path}: {e}")))?;
                Self::from_yaml(&text)?
            }
            None => Self::default(),
        };
        settings.apply_overrides(&lookup)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parses settings from YAML; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed YAML.
    pub fn from_yaml(text: &str) -> Result<Self, Error> {
        serde_yaml::from_str(text).map_err(|e| Error::Config(format!("parsing settings: {e}")))
    }

    fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) -> Result<(), Error> {
        if let Some(dir) = lookup("GITDRAW_OUTPUT") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(value) = lookup("GITDRAW_INTENSITY") {
            self.intensity = parse_number("GITDRAW_INTENSITY", &value)?;
        }
        if let Some(value) = lookup("GITDRAW_BACKGROUND_INTENSITY") {
            self.background_intensity = parse_number("GITDRAW_BACKGROUND_INTENSITY", &value)?;
        }
        if let Some(name) = lookup("GITDRAW_AUTHOR_NAME") {
            self.author_name = name;
        }
        if let Some(email) = lookup("GITDRAW_AUTHOR_EMAIL") {
            self.author_email = email;
        }
        if let Some(program) = lookup("GITDRAW_GIT") {
            self.git_program = program;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), Error> {
        validate_intensity(self.intensity)
            .and_then(|_| validate_intensity(self.background_intensity))
            .map_err(|e| Error::Config(e.to_string()))?;
        if self.git_program.trim().is_empty() {
            return Err(Error::Config("git program cannot be empty".to_string()));
        }
        Ok(())
    }
}

fn parse_number(key: &str, value: &str) -> Result<u32, Error> {
    value.trim().parse().map_err(|_| Error::Config(format!("{key} must be a number, got {value:?}")))
}
