//! Settings builder
//!
//! Merges settings from files and code.

use crate::config::{DefaultValue, ParserSettings, SettingsFile};
use crate::error::ConfigError;

/// Builder for merging settings sources
///
/// File settings are loaded first; code-supplied values set afterwards
/// take precedence.
pub struct SettingsBuilder {
    settings: ParserSettings,
}

impl SettingsBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            settings: ParserSettings::default(),
        }
    }

    /// Load settings from a file, or from the default locations for
    /// `program` when no path is given
    ///
    /// An explicit path that cannot be loaded is an error; a missing default
    /// file is not.
    pub fn with_file(mut self, path: Option<&str>, program: &str) -> Result<Self, ConfigError> {
        let file_settings = match path {
            Some(path) => Some(SettingsFile::load(path)?),
            None => SettingsFile::load_default(program),
        };

        if let Some(settings) = file_settings {
            self.settings = settings;
        }

        Ok(self)
    }

    /// Override the program name
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.settings.program = Some(program.into());
        self
    }

    /// Override the description
    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.settings.about = Some(about.into());
        self
    }

    /// Override the version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.settings.version = Some(version.into());
        self
    }

    /// Override the env var prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.settings.env_prefix = Some(prefix.into());
        self
    }

    /// Override whether defaults are shown in help
    pub fn with_show_defaults(mut self, show: bool) -> Self {
        self.settings.show_defaults = show;
        self
    }

    /// Add or replace the default for one argument
    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<DefaultValue>) -> Self {
        self.settings.defaults.insert(name.into(), value.into());
        self
    }

    /// Build the final settings
    pub fn build(self) -> ParserSettings {
        self.settings
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
