//! The `Arguments` trait
//!
//! A type becomes a command-line schema by listing its arguments in
//! [`Arguments::schema`] and building itself from the parsed values in
//! [`Arguments::from_values`]. The provided methods drive the parser.
//!
//! ```no_run
//! use argschema::{Argument, Arguments, ParsedValues, Schema, SchemaError};
//!
//! struct SkuArguments {
//!     groups: String,
//! }
//!
//! impl Arguments for SkuArguments {
//!     fn schema() -> Schema {
//!         Schema::new().argument(
//!             Argument::new("groups")
//!                 .help("Sku group categories")
//!                 .metavar("g"),
//!         )
//!     }
//!
//!     fn from_values(values: &mut ParsedValues) -> Result<Self, SchemaError> {
//!         Ok(Self {
//!             groups: values.take("groups")?,
//!         })
//!     }
//! }
//!
//! let args = SkuArguments::parse();
//! println!("{}", args.groups);
//! ```

use crate::config::ParserSettings;
use crate::error::{ArgumentsError, Result, SchemaError};
use crate::parser::ArgumentParser;
use crate::schema::Schema;
use crate::values::ParsedValues;

use clap_complete::Shell;
use std::ffi::OsString;
use std::io::Write;

/// A type whose fields are populated from command-line flags
pub trait Arguments: Sized {
    /// Declared arguments, in the order they are registered and shown
    fn schema() -> Schema;

    /// Build the type from parsed values
    ///
    /// Every declared argument must be taken exactly by name; anything left
    /// over is reported as [`SchemaError::UnconsumedArgument`].
    fn from_values(values: &mut ParsedValues) -> std::result::Result<Self, SchemaError>;

    /// Parser settings (program name, version, defaults, ...)
    fn settings() -> Result<ParserSettings> {
        Ok(ParserSettings::default())
    }

    /// Parser for this type's schema and settings
    fn parser() -> Result<ArgumentParser> {
        ArgumentParser::new(Self::schema(), Self::settings()?)
    }

    /// Parse a full argument vector (first item is the program name)
    fn try_parse_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let parser = Self::parser()?;
        let mut values = parser.parse_from(args)?;
        let instance = Self::from_values(&mut values)?;
        values.finish()?;
        Ok(instance)
    }

    /// Parse arguments that do not include the program name
    fn try_parse_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let program = OsString::from(Self::settings()?.program_name());
        Self::try_parse_from(std::iter::once(program).chain(args.into_iter().map(Into::into)))
    }

    /// Parse the process arguments
    fn try_parse() -> Result<Self> {
        Self::try_parse_from(std::env::args_os())
    }

    /// Parse the process arguments, exiting on failure
    ///
    /// Usage errors print clap's message and exit with its status (2, or 0
    /// for `--help`/`--version`). Schema and settings errors are bugs in the
    /// calling program; they are reported and exit with status 1.
    fn parse() -> Self {
        match Self::try_parse() {
            Ok(instance) => instance,
            Err(ArgumentsError::Usage(e)) => e.exit(),
            Err(e) => {
                log::error!("{}", e);
                eprintln!("Error: {}", e);
                std::process::exit(e.exit_code());
            }
        }
    }

    /// The clap command built for this type
    fn command() -> Result<clap::Command> {
        Ok(Self::parser()?.command())
    }

    /// Rendered help text
    fn help() -> Result<String> {
        Ok(Self::parser()?.help())
    }

    /// Write a shell completion script
    fn completions(shell: Shell, out: &mut dyn Write) -> Result<()> {
        Self::parser()?.completions(shell, out);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::{Argument, ValueType};
    use crate::config::SettingsBuilder;
    use clap::error::ErrorKind;

    #[derive(Debug)]
    struct SkuArguments {
        groups: String,
        limit: Option<i64>,
    }

    impl SkuArguments {
        fn groups(&self) -> &str {
            &self.groups
        }
    }

    impl Arguments for SkuArguments {
        fn schema() -> Schema {
            Schema::new()
                .argument(
                    Argument::new("groups")
                        .help("Sku group categories...")
                        .metavar("g"),
                )
                .argument(
                    Argument::new("limit")
                        .value_type(ValueType::Integer)
                        .optional(),
                )
        }

        fn from_values(values: &mut ParsedValues) -> std::result::Result<Self, SchemaError> {
            Ok(Self {
                groups: values.take("groups")?,
                limit: values.take_optional("limit")?,
            })
        }

        fn settings() -> Result<ParserSettings> {
            Ok(SettingsBuilder::new().with_program("sku").build())
        }
    }

    /// Constructor that forgets one declared argument
    #[derive(Debug)]
    struct Forgetful;

    impl Arguments for Forgetful {
        fn schema() -> Schema {
            Schema::new()
                .argument(Argument::new("groups"))
                .argument(Argument::new("extra").optional())
        }

        fn from_values(values: &mut ParsedValues) -> std::result::Result<Self, SchemaError> {
            let _: String = values.take("groups")?;
            Ok(Self)
        }
    }

    /// Constructor that reads an undeclared argument
    #[derive(Debug)]
    struct Misspelled;

    impl Arguments for Misspelled {
        fn schema() -> Schema {
            Schema::new().argument(Argument::new("groups"))
        }

        fn from_values(values: &mut ParsedValues) -> std::result::Result<Self, SchemaError> {
            let _: String = values.take("group")?;
            Ok(Self)
        }
    }

    #[test]
    fn test_parse_args_round_trip() {
        let args = SkuArguments::try_parse_args(["--groups", "a,b,c"]).unwrap();
        assert_eq!(args.groups(), "a,b,c");
        assert_eq!(args.limit, None);
    }

    #[test]
    fn test_parse_from_with_program_name() {
        let args = SkuArguments::try_parse_from(["sku", "--groups", "x", "--limit", "4"]).unwrap();
        assert_eq!(args.groups(), "x");
        assert_eq!(args.limit, Some(4));
    }

    #[test]
    fn test_empty_args_is_usage_error() {
        let err = SkuArguments::try_parse_args(Vec::<String>::new()).unwrap_err();
        match err {
            ArgumentsError::Usage(e) => {
                assert_eq!(e.kind(), ErrorKind::MissingRequiredArgument);
                assert_eq!(e.exit_code(), 2);
            }
            other => panic!("Expected usage error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_flag_is_usage_error() {
        let err = SkuArguments::try_parse_args(["--groups", "a", "--group", "b"]).unwrap_err();
        assert!(matches!(err, ArgumentsError::Usage(_)));
    }

    #[test]
    fn test_unconsumed_argument_is_schema_error() {
        let err = Forgetful::try_parse_args(["--groups", "a"]).unwrap_err();
        assert!(matches!(
            err,
            ArgumentsError::Schema(SchemaError::UnconsumedArgument(ref name)) if name == "extra"
        ));
    }

    #[test]
    fn test_undeclared_argument_is_schema_error() {
        let err = Misspelled::try_parse_args(["--groups", "a"]).unwrap_err();
        assert!(matches!(
            err,
            ArgumentsError::Schema(SchemaError::UnknownArgument(_))
        ));
    }

    #[test]
    fn test_help_text() {
        let help = SkuArguments::help().unwrap();
        assert!(help.contains("--groups <g>"));
        assert!(help.contains("Sku group categories..."));
    }

    #[test]
    fn test_command_is_deterministic() {
        let first = SkuArguments::command().unwrap();
        let second = SkuArguments::command().unwrap();
        let longs = |cmd: &clap::Command| -> Vec<String> {
            cmd.get_arguments()
                .filter_map(|a| a.get_long().map(str::to_string))
                .collect()
        };
        assert_eq!(longs(&first), vec!["groups", "limit"]);
        assert_eq!(longs(&first), longs(&second));
    }

    #[test]
    fn test_completions_written() {
        let mut out = Vec::new();
        SkuArguments::completions(Shell::Zsh, &mut out).unwrap();
        assert!(!out.is_empty());
    }
}
