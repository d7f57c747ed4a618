//! Schema-driven argument parser
//!
//! Translates a [`Schema`] into clap registration calls, runs clap, and
//! translates its matches back into [`ParsedValues`]. Tokenizing, type
//! coercion, env fallback, defaults and help formatting are left to clap.

use crate::argument::{long_name, Action, Argument, Value, ValueType};
use crate::config::ParserSettings;
use crate::error::{ArgumentsError, UsageError};
use crate::schema::Schema;
use crate::values::ParsedValues;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use clap_complete::Shell;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

/// Parser for one schema under one set of settings
#[derive(Debug, Clone)]
pub struct ArgumentParser {
    schema: Schema,
    settings: ParserSettings,
}

impl ArgumentParser {
    /// Validate the schema and apply the settings to it
    ///
    /// # Errors
    /// `Schema` for invalid descriptors, `Config` for unusable defaults.
    pub fn new(mut schema: Schema, settings: ParserSettings) -> Result<Self, ArgumentsError> {
        schema.validate()?;
        if settings.version.is_some() {
            schema.check_version_flags()?;
        }

        schema.apply_defaults(&settings.raw_defaults())?;
        if let Some(prefix) = &settings.env_prefix {
            schema.apply_env_prefix(prefix);
        }

        Ok(Self { schema, settings })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    /// Build the clap command with one flag per declared argument
    pub fn command(&self) -> Command {
        let mut command = Command::new(self.settings.program_name().to_string());

        if let Some(about) = &self.settings.about {
            command = command.about(about.clone());
        }
        if let Some(version) = &self.settings.version {
            command = command.version(version.clone());
        }

        self.schema
            .arguments()
            .iter()
            .fold(command, |command, arg| command.arg(self.register(arg)))
    }

    fn register(&self, arg: &Argument) -> Arg {
        log::debug!(
            "Registering {} ({:?}, {}, required: {})",
            arg.flag(),
            arg.get_action(),
            arg.get_value_type(),
            arg.is_required()
        );

        let mut clap_arg = Arg::new(arg.get_name().to_string())
            .long(long_name(arg.get_name()))
            .required(arg.is_required());

        if arg.is_conditionally_required() {
            clap_arg = clap_arg.required_unless_present_any(arg.get_required_unless().to_vec());
        }

        if let Some(help) = arg.get_help() {
            clap_arg = clap_arg.help(help.to_string());
        }
        if let Some(short) = arg.get_short() {
            clap_arg = clap_arg.short(short);
        }
        if let Some(var) = arg.get_env() {
            clap_arg = clap_arg.env(var.to_string());
        }

        match arg.get_action() {
            Action::Switch => clap_arg.action(ArgAction::SetTrue),
            Action::Count => clap_arg.action(ArgAction::Count),
            Action::Store => {
                clap_arg = self.register_value(clap_arg, arg).action(ArgAction::Set);
                if let Some(default) = arg.get_default() {
                    clap_arg = clap_arg.default_value(default.to_arg_string());
                }
                if let Some(missing) = arg.get_missing_value() {
                    clap_arg = clap_arg
                        .num_args(0..=1)
                        .default_missing_value(missing.to_arg_string());
                }
                clap_arg
            }
            Action::List => {
                clap_arg = self
                    .register_value(clap_arg, arg)
                    .action(ArgAction::Append)
                    .num_args(1..);
                if let Some(delimiter) = arg.get_delimiter() {
                    clap_arg = clap_arg.value_delimiter(delimiter);
                }
                if let Some(Value::List(items)) = arg.get_default() {
                    clap_arg = clap_arg.default_values(items.iter().map(Value::to_arg_string));
                }
                clap_arg
            }
        }
    }

    fn register_value(&self, clap_arg: Arg, arg: &Argument) -> Arg {
        let numeric = matches!(arg.get_value_type(), ValueType::Integer | ValueType::Float);
        let clap_arg = clap_arg
            .value_name(arg.get_metavar().to_string())
            .hide_default_value(!self.settings.show_defaults)
            .allow_negative_numbers(numeric);

        let choices = arg.get_choices();
        if !choices.is_empty() {
            let parser = PossibleValuesParser::new(choices.iter().cloned());
            return match arg.get_value_type() {
                ValueType::Integer => clap_arg.value_parser(parser.try_map(|s| s.parse::<i64>())),
                _ => clap_arg.value_parser(parser),
            };
        }

        match arg.get_value_type() {
            ValueType::String => clap_arg.value_parser(value_parser!(String)),
            ValueType::Integer => clap_arg.value_parser(value_parser!(i64)),
            ValueType::Float => clap_arg.value_parser(value_parser!(f64)),
            ValueType::Bool => clap_arg.value_parser(value_parser!(bool)),
            ValueType::Path => clap_arg.value_parser(value_parser!(PathBuf)),
        }
    }

    /// Parse a full argument vector (first item is the program name)
    pub fn parse_from<I, T>(&self, args: I) -> Result<ParsedValues, UsageError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command().try_get_matches_from(args)?;
        let values = self.collect(&matches);
        log::debug!(
            "Parsed {} of {} declared arguments",
            values.present(),
            values.len()
        );
        Ok(values)
    }

    fn collect(&self, matches: &ArgMatches) -> ParsedValues {
        let mut values = ParsedValues::new();
        for arg in self.schema.arguments() {
            let id = arg.get_name();
            let value = match arg.get_action() {
                Action::Switch => Some(Value::Bool(matches.get_flag(id))),
                Action::Count => Some(Value::Integer(i64::from(matches.get_count(id)))),
                Action::Store => single_value(matches, id, arg.get_value_type()),
                Action::List => list_value(matches, id, arg.get_value_type()),
            };
            values.insert(id, value);
        }
        values
    }

    /// Rendered help text
    pub fn help(&self) -> String {
        self.command().render_help().to_string()
    }

    /// Rendered one-line usage
    pub fn usage(&self) -> String {
        self.command().render_usage().to_string()
    }

    /// Write a completion script for `shell`
    pub fn completions(&self, shell: Shell, out: &mut dyn Write) {
        let mut command = self.command();
        let name = self.settings.program_name().to_string();
        clap_complete::generate(shell, &mut command, name, out);
    }
}

fn single_value(matches: &ArgMatches, id: &str, value_type: ValueType) -> Option<Value> {
    match value_type {
        ValueType::String => matches.get_one::<String>(id).cloned().map(Value::String),
        ValueType::Integer => matches.get_one::<i64>(id).copied().map(Value::Integer),
        ValueType::Float => matches.get_one::<f64>(id).copied().map(Value::Float),
        ValueType::Bool => matches.get_one::<bool>(id).copied().map(Value::Bool),
        ValueType::Path => matches.get_one::<PathBuf>(id).cloned().map(Value::Path),
    }
}

fn list_value(matches: &ArgMatches, id: &str, value_type: ValueType) -> Option<Value> {
    let items: Vec<Value> = match value_type {
        ValueType::String => matches
            .get_many::<String>(id)?
            .cloned()
            .map(Value::String)
            .collect(),
        ValueType::Integer => matches
            .get_many::<i64>(id)?
            .copied()
            .map(Value::Integer)
            .collect(),
        ValueType::Float => matches
            .get_many::<f64>(id)?
            .copied()
            .map(Value::Float)
            .collect(),
        ValueType::Bool => matches
            .get_many::<bool>(id)?
            .copied()
            .map(Value::Bool)
            .collect(),
        ValueType::Path => matches
            .get_many::<PathBuf>(id)?
            .cloned()
            .map(Value::Path)
            .collect(),
    };
    Some(Value::List(items))
}
