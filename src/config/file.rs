//! Settings file loading
//!
//! Handles loading parser settings from TOML files.

use crate::config::ParserSettings;
use crate::error::ConfigError;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Settings file handler
pub struct SettingsFile;

impl SettingsFile {
    /// Load settings from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ParserSettings, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::FileNotFound(path.display().to_string()),
            _ => ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            },
        })?;

        let settings: ParserSettings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings for `program` from the default locations
    pub fn load_default(program: &str) -> Option<ParserSettings> {
        for path in Self::default_paths(program) {
            if path.exists() {
                match Self::load(&path) {
                    Ok(settings) => {
                        log::info!("Loaded argument settings from {}", path.display());
                        return Some(settings);
                    }
                    Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
                }
            }
        }
        None
    }

    /// Get default settings file paths for `program`; the first one that exists wins
    pub fn default_paths(program: &str) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // User config
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join(program).join("config.toml"));
        }

        // Current directory
        paths.push(PathBuf::from(format!("{}.toml", program)));
        paths.push(PathBuf::from(format!(".{}.toml", program)));

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_paths_not_empty() {
        let paths = SettingsFile::default_paths("sku-args");
        assert!(!paths.is_empty());
        assert!(paths.contains(&PathBuf::from("sku-args.toml")));
    }

    #[test]
    fn test_load_missing_file() {
        let result = SettingsFile::load("/nonexistent/path/config.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_directory_is_read_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = SettingsFile::load(dir.path());
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "about = \"Sku lookup\"").unwrap();
        writeln!(file, "[defaults]").unwrap();
        writeln!(file, "groups = \"a\"").unwrap();

        let settings = SettingsFile::load(file.path()).unwrap();
        assert_eq!(settings.about.as_deref(), Some("Sku lookup"));
        assert_eq!(settings.raw_defaults()["groups"], vec!["a".to_string()]);
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "show_defaults = \"maybe\"").unwrap();

        let result = SettingsFile::load(file.path());
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }

    #[test]
    fn test_load_default_none_for_unknown_program() {
        assert!(SettingsFile::load_default("argschema-test-no-such-program").is_none());
    }
}
