//! argschema - declarative argument schemas on top of clap
//!
//! Describe a type's command-line flags once, as an ordered list of
//! [`Argument`] descriptors, and parse the process arguments straight into
//! that type.
//!
//! # Modules
//!
//! - [`argument`]: Argument descriptors and typed values
//! - [`arguments`]: The [`Arguments`] trait implemented by schema types
//! - [`cli`]: The `sku-args` tool built on this library
//! - [`config`]: Parser settings and settings files
//! - [`error`]: Error types
//! - [`parser`]: Schema-to-clap translation
//! - [`schema`]: Ordered argument registration lists
//! - [`values`]: Parsed values handed to constructors

pub mod argument;
pub mod arguments;
pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod schema;
pub mod values;

pub use argument::{flag_name, Action, Argument, FromValue, Value, ValueType};
pub use arguments::Arguments;
pub use config::{ParserSettings, SettingsBuilder, SettingsFile};
pub use error::{ArgumentsError, ConfigError, Result, SchemaError, UsageError};
pub use parser::ArgumentParser;
pub use schema::Schema;
pub use values::ParsedValues;
