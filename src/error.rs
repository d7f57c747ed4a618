//! Unified error types for argschema
//!
//! This module defines all error types used throughout the library.
//! Uses thiserror for ergonomic error definitions.

use clap::error::ErrorKind;
use thiserror::Error;

/// Top-level error type returned by the fallible parse operations
#[derive(Error, Debug)]
pub enum ArgumentsError {
    /// The command line did not satisfy the registered flags
    #[error("Argument error: {0}")]
    Usage(#[from] UsageError),

    /// The schema or its constructor is inconsistent
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Error from settings file parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error (writing help or completions)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArgumentsError {
    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ArgumentsError::Usage(e) => e.exit_code(),
            ArgumentsError::Schema(_) | ArgumentsError::Config(_) | ArgumentsError::Io(_) => 1,
        }
    }
}

/// Malformed or missing command-line input, as reported by clap
///
/// Help and version requests are also surfaced through this type so the
/// caller decides whether to print and exit.
#[derive(Error, Debug)]
#[error("{}", .0.to_string().trim_end())]
pub struct UsageError(#[source] clap::Error);

impl UsageError {
    /// The kind of failure reported by the parsing engine
    pub fn kind(&self) -> ErrorKind {
        self.0.kind()
    }

    /// Exit code clap would use for this error (0 for help/version)
    pub fn exit_code(&self) -> i32 {
        self.0.exit_code()
    }

    /// Whether the user asked for `--help` or `--version`
    pub fn is_help_request(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        )
    }

    /// Print the usage message and terminate the process
    pub fn exit(&self) -> ! {
        self.0.exit()
    }

    /// Access the underlying clap error
    pub fn inner(&self) -> &clap::Error {
        &self.0
    }
}

impl From<clap::Error> for UsageError {
    fn from(err: clap::Error) -> Self {
        Self(err)
    }
}

/// Programming mistakes in a schema or in the type consuming it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Argument declared without a name
    #[error("Argument name cannot be empty")]
    EmptyName,

    /// Name contains characters that cannot form a long flag
    #[error("Invalid argument name '{0}': use letters, digits, '_' or '-'")]
    InvalidName(String),

    /// Name or short flag collides with one the parser provides
    #[error("Argument '{0}' collides with a built-in flag")]
    ReservedName(String),

    /// Two arguments declared with the same name
    #[error("Argument '{0}' is declared more than once")]
    DuplicateArgument(String),

    /// Two arguments share a short flag
    #[error("Short flag '-{short}' is used by both '{first}' and '{second}'")]
    DuplicateShort {
        short: char,
        first: String,
        second: String,
    },

    /// An option combination the parser cannot express
    #[error("Invalid option for '{name}': {message}")]
    InvalidOption { name: String, message: String },

    /// Default value does not fit the argument
    #[error("Invalid default for '{name}': {message}")]
    InvalidDefault { name: String, message: String },

    /// Constructor asked for an argument the schema does not declare
    #[error("'{0}' is not a declared argument")]
    UnknownArgument(String),

    /// Constructor required a value that was not supplied
    #[error("No value for '{0}': declare a default or read it as optional")]
    MissingValue(String),

    /// Constructor read a value as the wrong type
    #[error("Argument '{name}' holds {found}, not {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: String,
    },

    /// Parsed value was rejected while building the instance
    #[error("Invalid value for '{name}': {message}")]
    InvalidValue { name: String, message: String },

    /// Constructor ignored a declared argument
    #[error("'{0}' Argument must be consumed by the constructor")]
    UnconsumedArgument(String),
}

/// Errors from settings file parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Settings file exists but cannot be read
    #[error("Cannot read configuration file {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A configured default cannot be used for its argument
    #[error("Invalid default for '{name}': {message}")]
    InvalidDefault { name: String, message: String },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias using ArgumentsError
pub type Result<T> = std::result::Result<T, ArgumentsError>;
