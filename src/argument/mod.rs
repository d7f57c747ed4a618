//! Argument descriptors
//!
//! An [`Argument`] records everything the parser needs to register one
//! long flag: help text, metavar, value type and the extra parser options.
//! Descriptors are validated on registration (fail-fast pattern).

pub mod value;

pub use value::{FromValue, Value, ValueType};

use crate::error::SchemaError;

/// Prefix for long-option flags
pub const FLAG_PREFIX: &str = "--";

/// Names the parser reserves for its own flags
const RESERVED_NAMES: &[&str] = &["help"];

/// Short flags the parser reserves for its own flags
const RESERVED_SHORTS: &[char] = &['h'];

/// How the parser stores what it sees for a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// Take a single value (`--name VALUE`)
    #[default]
    Store,
    /// Presence sets `true` (`--name`)
    Switch,
    /// Each occurrence increments a counter (`--name --name`)
    Count,
    /// Take one or more values, repeatable (`--name a b --name c`)
    List,
}

impl Action {
    /// Whether the flag consumes values from the command line
    pub const fn takes_value(&self) -> bool {
        matches!(self, Action::Store | Action::List)
    }
}

/// Derive the long flag name for an argument name
///
/// Underscores become hyphens: `max_items` → `max-items`.
pub fn long_name(name: &str) -> String {
    name.replace('_', "-")
}

/// Derive the full flag for an argument name: `groups` → `--groups`
pub fn flag_name(name: &str) -> String {
    format!("{}{}", FLAG_PREFIX, long_name(name))
}

/// Descriptor for one declared command-line argument
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    name: String,
    help: Option<String>,
    metavar: Option<String>,
    value_type: ValueType,
    action: Action,
    default: Option<Value>,
    choices: Vec<String>,
    short: Option<char>,
    env: Option<String>,
    missing_value: Option<Value>,
    delimiter: Option<char>,
    optional: bool,
    required_unless: Vec<String>,
}

impl Argument {
    /// Declare an argument taking a single string value
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: None,
            metavar: None,
            value_type: ValueType::default(),
            action: Action::default(),
            default: None,
            choices: Vec::new(),
            short: None,
            env: None,
            missing_value: None,
            delimiter: None,
            optional: false,
            required_unless: Vec::new(),
        }
    }

    /// Help text shown next to the flag
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Placeholder shown for the value in usage and help
    pub fn metavar(mut self, metavar: impl Into<String>) -> Self {
        self.metavar = Some(metavar.into());
        self
    }

    /// Type the value is coerced to
    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    /// Make this a boolean switch
    pub fn switch(mut self) -> Self {
        self.action = Action::Switch;
        self.value_type = ValueType::Bool;
        self
    }

    /// Make this an occurrence counter
    pub fn count(mut self) -> Self {
        self.action = Action::Count;
        self.value_type = ValueType::Integer;
        self
    }

    /// Accept one or more values, repeatable
    pub fn list(mut self) -> Self {
        self.action = Action::List;
        self
    }

    /// Value used when the flag is absent; makes the argument optional
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Restrict the accepted values
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Single-character alias (`-g`)
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Environment variable read when the flag is absent
    pub fn env(mut self, var: impl Into<String>) -> Self {
        self.env = Some(var.into());
        self
    }

    /// Value used when the flag is given without one (`--name`)
    pub fn missing_value(mut self, value: impl Into<Value>) -> Self {
        self.missing_value = Some(value.into());
        self
    }

    /// Split each list value on this character
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Allow the flag to be absent with no default
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Drop the requirement when the named argument is present
    pub fn required_unless(mut self, name: impl Into<String>) -> Self {
        self.required_unless.push(name.into());
        self
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Long flag including the `--` prefix
    pub fn flag(&self) -> String {
        flag_name(&self.name)
    }

    pub fn get_help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Metavar for help output, falling back to the value type's name
    pub fn get_metavar(&self) -> &str {
        self.metavar.as_deref().unwrap_or(self.value_type.metavar())
    }

    pub fn get_value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn get_action(&self) -> Action {
        self.action
    }

    pub fn get_default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn get_choices(&self) -> &[String] {
        &self.choices
    }

    pub fn get_short(&self) -> Option<char> {
        self.short
    }

    pub fn get_env(&self) -> Option<&str> {
        self.env.as_deref()
    }

    pub fn get_missing_value(&self) -> Option<&Value> {
        self.missing_value.as_ref()
    }

    pub fn get_delimiter(&self) -> Option<char> {
        self.delimiter
    }

    /// Arguments whose presence lifts the requirement on this one
    pub fn get_required_unless(&self) -> &[String] {
        &self.required_unless
    }

    /// Whether the parser must see this flag (or its env var)
    ///
    /// Value-taking arguments are required unless they have a default or
    /// are marked optional. Switches and counters never are.
    pub fn is_required(&self) -> bool {
        self.is_mandatory() && self.required_unless.is_empty()
    }

    /// Required only while none of `required_unless` is present
    pub fn is_conditionally_required(&self) -> bool {
        self.is_mandatory() && !self.required_unless.is_empty()
    }

    fn is_mandatory(&self) -> bool {
        self.action.takes_value() && !self.optional && self.default.is_none()
    }

    pub(crate) fn set_default(&mut self, value: Value) {
        self.default = Some(value);
    }

    pub(crate) fn set_env_fallback(&mut self, var: String) {
        if self.env.is_none() {
            self.env = Some(var);
        }
    }

    /// Parse a raw default (from a settings file) for this argument
    pub(crate) fn parse_default(&self, raw: &[String]) -> Result<Value, String> {
        match self.action {
            Action::Store => match raw {
                [single] => self.value_type.parse(single),
                _ => Err(format!("expected a single value, got {}", raw.len())),
            },
            Action::List => raw
                .iter()
                .map(|item| self.value_type.parse(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            Action::Switch | Action::Count => {
                Err("switch and count arguments cannot take a default".to_string())
            }
        }
    }

    /// Check the descriptor is something the parser can register
    pub fn validate(&self) -> Result<(), SchemaError> {
        self.validate_name()?;

        if let Some(short) = self.short {
            if RESERVED_SHORTS.contains(&short) {
                return Err(SchemaError::ReservedName(format!("-{}", short)));
            }
            if !short.is_ascii_alphanumeric() {
                return Err(self.invalid_option(format!("'{}' cannot be a short flag", short)));
            }
        }

        if !self.action.takes_value() {
            if self.metavar.is_some() {
                return Err(self.invalid_option("a switch takes no value, so no metavar"));
            }
            if !self.choices.is_empty() {
                return Err(self.invalid_option("a switch takes no value, so no choices"));
            }
            if self.default.is_some() {
                return Err(self.invalid_option("a switch cannot have a default"));
            }
        }

        if self.missing_value.is_some() && self.action != Action::Store {
            return Err(self.invalid_option("only single-value arguments take a missing value"));
        }

        if self.delimiter.is_some() && self.action != Action::List {
            return Err(self.invalid_option("only list arguments take a delimiter"));
        }

        if !self.choices.is_empty() {
            if !matches!(self.value_type, ValueType::String | ValueType::Integer) {
                return Err(self.invalid_option(format!(
                    "choices are not supported for {} values",
                    self.value_type
                )));
            }
            for choice in &self.choices {
                self.value_type
                    .parse(choice)
                    .map_err(|message| self.invalid_option(message))?;
            }
        }

        if let Some(default) = &self.default {
            self.check_value(default)
                .map_err(|message| SchemaError::InvalidDefault {
                    name: self.name.clone(),
                    message,
                })?;
        }

        if let Some(missing) = &self.missing_value {
            self.check_scalar(missing)
                .map_err(|message| self.invalid_option(message))?;
        }

        Ok(())
    }

    fn validate_name(&self) -> Result<(), SchemaError> {
        if self.name.is_empty() {
            return Err(SchemaError::EmptyName);
        }
        let well_formed = !long_name(&self.name).starts_with('-')
            && self
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !well_formed {
            return Err(SchemaError::InvalidName(self.name.clone()));
        }
        if RESERVED_NAMES.contains(&long_name(&self.name).as_str()) {
            return Err(SchemaError::ReservedName(self.flag()));
        }
        Ok(())
    }

    /// Check a default or configured value against type and choices
    pub(crate) fn check_value(&self, value: &Value) -> Result<(), String> {
        match (self.action, value) {
            (Action::List, Value::List(items)) => {
                items.iter().try_for_each(|item| self.check_scalar(item))
            }
            (Action::List, other) => Err(format!("expected a list, got {}", other.kind())),
            (_, other) => self.check_scalar(other),
        }
    }

    fn check_scalar(&self, value: &Value) -> Result<(), String> {
        if !self.value_type.accepts(value) {
            return Err(format!(
                "expected {}, got {}",
                self.value_type,
                value.kind()
            ));
        }
        if !self.choices.is_empty() {
            let rendered = value.to_arg_string();
            if !self.choices.iter().any(|choice| *choice == rendered) {
                return Err(format!(
                    "'{}' is not one of: {}",
                    rendered,
                    self.choices.join(", ")
                ));
            }
        }
        Ok(())
    }

    fn invalid_option(&self, message: impl Into<String>) -> SchemaError {
        SchemaError::InvalidOption {
            name: self.name.clone(),
            message: message.into(),
        }
    }
}
