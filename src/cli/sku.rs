//! `SkuArguments`: the schema behind the `sku-args` binary

use crate::argument::{Argument, ValueType};
use crate::arguments::Arguments;
use crate::config::{ParserSettings, SettingsBuilder};
use crate::error::{Result, SchemaError};
use crate::schema::Schema;
use crate::values::ParsedValues;

use clap::ValueEnum;
use clap_complete::Shell;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Program name used in usage, help and settings file lookup
pub const PROGRAM: &str = "sku-args";

/// Env var naming an explicit settings file
pub const CONFIG_ENV: &str = "SKU_ARGS_CONFIG";

/// Prefix for per-argument env var fallbacks (`SKU_GROUPS`, ...)
pub const ENV_PREFIX: &str = "SKU";

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Table, OutputFormat::Json, OutputFormat::Compact];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Compact => "compact",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| format!("unknown output format '{}'", s))
    }
}

fn shell_names() -> Vec<String> {
    Shell::value_variants()
        .iter()
        .filter_map(ValueEnum::to_possible_value)
        .map(|value| value.get_name().to_string())
        .collect()
}

/// Arguments accepted by `sku-args`
#[derive(Debug, Clone, PartialEq)]
pub struct SkuArguments {
    groups: String,
    format: OutputFormat,
    limit: Option<i64>,
    tags: Vec<String>,
    verbose: bool,
    completions: Option<Shell>,
}

impl SkuArguments {
    /// Raw comma-separated group categories, exactly as supplied
    pub fn groups(&self) -> &str {
        &self.groups
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn limit(&self) -> Option<i64> {
        self.limit
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Shell to print a completion script for, instead of the groups
    pub fn completions(&self) -> Option<Shell> {
        self.completions
    }

    /// Group categories split on `,`, trimmed, blanks dropped
    pub fn group_list(&self) -> Vec<String> {
        self.groups
            .split(',')
            .map(str::trim)
            .filter(|group| !group.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Arguments for SkuArguments {
    fn schema() -> Schema {
        Schema::new()
            .argument(
                Argument::new("groups")
                    .help("Sku group categories, comma separated")
                    .metavar("g")
                    .short('g')
                    .required_unless("completions"),
            )
            .argument(
                Argument::new("format")
                    .help("Output format")
                    .metavar("FORMAT")
                    .choices(OutputFormat::ALL.iter().map(OutputFormat::as_str))
                    .default_value(OutputFormat::default().as_str()),
            )
            .argument(
                Argument::new("limit")
                    .help("Print at most this many groups")
                    .metavar("N")
                    .value_type(ValueType::Integer)
                    .optional(),
            )
            .argument(
                Argument::new("tags")
                    .help("Tags attached to every group")
                    .metavar("TAG")
                    .list()
                    .delimiter(',')
                    .optional(),
            )
            .argument(
                Argument::new("verbose")
                    .help("Enable verbose output")
                    .switch()
                    .short('v'),
            )
            .argument(
                Argument::new("completions")
                    .help("Print a shell completion script and exit")
                    .metavar("SHELL")
                    .choices(shell_names())
                    .optional(),
            )
    }

    fn from_values(values: &mut ParsedValues) -> std::result::Result<Self, SchemaError> {
        let format: String = values.take("format")?;
        let format = format
            .parse::<OutputFormat>()
            .map_err(|message| SchemaError::InvalidValue {
                name: "format".to_string(),
                message,
            })?;

        let completions = values
            .take_optional::<String>("completions")?
            .map(|name| {
                <Shell as ValueEnum>::from_str(&name, false).map_err(|message| {
                    SchemaError::InvalidValue {
                        name: "completions".to_string(),
                        message,
                    }
                })
            })
            .transpose()?;

        Ok(Self {
            groups: values.take_optional("groups")?.unwrap_or_default(),
            format,
            limit: values.take_optional("limit")?,
            tags: values.take_or_default("tags")?,
            verbose: values.take("verbose")?,
            completions,
        })
    }

    fn settings() -> Result<ParserSettings> {
        let path = std::env::var(CONFIG_ENV).ok();
        let settings = SettingsBuilder::new()
            .with_file(path.as_deref(), PROGRAM)?
            .with_program(PROGRAM)
            .with_about("Print the sku group categories given on the command line")
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_env_prefix(ENV_PREFIX)
            .build();
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_groups() {
        let args = SkuArguments::try_parse_args(["--groups", "a,b,c"]).unwrap();
        assert_eq!(args.groups(), "a,b,c");
        assert_eq!(args.format(), OutputFormat::Table);
        assert_eq!(args.limit(), None);
        assert!(args.tags().is_empty());
        assert!(!args.verbose());
    }

    #[test]
    fn test_parse_all_flags() {
        let args = SkuArguments::try_parse_args([
            "-g", "a, b,,c", "--format", "json", "--limit", "2", "--tags", "x,y", "-v",
        ])
        .unwrap();
        assert_eq!(args.group_list(), vec!["a", "b", "c"]);
        assert_eq!(args.format(), OutputFormat::Json);
        assert_eq!(args.limit(), Some(2));
        assert_eq!(args.tags(), ["x".to_string(), "y".to_string()]);
        assert!(args.verbose());
    }

    #[test]
    fn test_invalid_format_rejected() {
        let result = SkuArguments::try_parse_args(["--groups", "a", "--format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_completions_without_groups() {
        let args = SkuArguments::try_parse_args(["--completions", "bash"]).unwrap();
        assert_eq!(args.completions(), Some(Shell::Bash));
        assert_eq!(args.groups(), "");

        assert!(SkuArguments::try_parse_args(["--completions", "tcsh"]).is_err());
        assert!(SkuArguments::try_parse_args(Vec::<&str>::new()).is_err());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("compact".parse::<OutputFormat>(), Ok(OutputFormat::Compact));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_schema_is_valid() {
        assert!(SkuArguments::schema().validate().is_ok());
    }
}
