//! Parser settings
//!
//! Handles TOML settings file parsing and merging with code-supplied
//! settings.

pub mod builder;
pub mod file;

pub use builder::SettingsBuilder;
pub use file::SettingsFile;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Settings applied to the parser built for a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Program name shown in usage and help
    pub program: Option<String>,
    /// One-line description shown in help
    pub about: Option<String>,
    /// Version reported by `--version`; no version flag when unset
    pub version: Option<String>,
    /// Prefix for env var fallbacks (`PREFIX_NAME`)
    pub env_prefix: Option<String>,
    /// Show default values in help
    pub show_defaults: bool,
    /// Default values by argument name
    pub defaults: BTreeMap<String, DefaultValue>,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            program: None,
            about: None,
            version: None,
            env_prefix: None,
            show_defaults: true,
            defaults: BTreeMap::new(),
        }
    }
}

impl ParserSettings {
    /// Program name, or a generic one when unset
    pub fn program_name(&self) -> &str {
        self.program.as_deref().unwrap_or("arguments")
    }

    /// Configured defaults rendered as command-line strings
    pub fn raw_defaults(&self) -> BTreeMap<String, Vec<String>> {
        self.defaults
            .iter()
            .map(|(name, value)| (name.clone(), value.to_raw()))
            .collect()
    }
}

/// Default value as written in a settings file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl DefaultValue {
    fn to_raw(&self) -> Vec<String> {
        match self {
            DefaultValue::Scalar(scalar) => vec![scalar.to_string()],
            DefaultValue::List(items) => items.iter().map(Scalar::to_string).collect(),
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::Scalar(Scalar::Text(value.to_string()))
    }
}

/// Scalar TOML value usable as a default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}
