//! Argument schemas
//!
//! A [`Schema`] is the explicit, ordered registration list for one
//! argument type. Declaration order is kept for registration, help output
//! and value extraction.

use crate::argument::{long_name, Argument};
use crate::error::{ConfigError, SchemaError};

use std::collections::{BTreeMap, HashMap};

/// Ordered set of argument descriptors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    arguments: Vec<Argument>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an argument (builder style)
    pub fn argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Append an argument
    pub fn push(&mut self, argument: Argument) {
        self.arguments.push(argument);
    }

    /// Arguments in declaration order
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Look up an argument by name
    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.get_name() == name)
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Validate every descriptor and check for collisions
    ///
    /// Names collide when they map to the same long flag (`max_items` and
    /// `max-items`).
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut flags: HashMap<String, &str> = HashMap::new();
        let mut shorts: HashMap<char, &str> = HashMap::new();

        for arg in &self.arguments {
            arg.validate()?;

            for other in arg.get_required_unless() {
                if !self.arguments.iter().any(|a| a.get_name() == other) {
                    return Err(SchemaError::InvalidOption {
                        name: arg.get_name().to_string(),
                        message: format!("required_unless names undeclared argument '{}'", other),
                    });
                }
            }

            if flags.insert(long_name(arg.get_name()), arg.get_name()).is_some() {
                return Err(SchemaError::DuplicateArgument(arg.get_name().to_string()));
            }

            if let Some(short) = arg.get_short() {
                if let Some(first) = shorts.insert(short, arg.get_name()) {
                    return Err(SchemaError::DuplicateShort {
                        short,
                        first: first.to_string(),
                        second: arg.get_name().to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Reject names and short flags claimed by `--version`/`-V`
    pub(crate) fn check_version_flags(&self) -> Result<(), SchemaError> {
        for arg in &self.arguments {
            if long_name(arg.get_name()) == "version" {
                return Err(SchemaError::ReservedName(arg.flag()));
            }
            if arg.get_short() == Some('V') {
                return Err(SchemaError::ReservedName("-V".to_string()));
            }
        }
        Ok(())
    }

    /// Apply configured defaults, keyed by argument name
    ///
    /// Defaults for names the schema does not declare are skipped.
    pub(crate) fn apply_defaults(
        &mut self,
        defaults: &BTreeMap<String, Vec<String>>,
    ) -> Result<(), ConfigError> {
        for (name, raw) in defaults {
            let Some(arg) = self
                .arguments
                .iter_mut()
                .find(|arg| arg.get_name() == name)
            else {
                log::warn!("Ignoring default for undeclared argument '{}'", name);
                continue;
            };

            let value = arg
                .parse_default(raw)
                .and_then(|value| arg.check_value(&value).map(|_| value))
                .map_err(|message| ConfigError::InvalidDefault {
                    name: name.clone(),
                    message,
                })?;

            log::debug!("Default for {} set to '{}'", arg.flag(), value);
            arg.set_default(value);
        }
        Ok(())
    }

    /// Give every argument without its own env var a `PREFIX_NAME` fallback
    pub(crate) fn apply_env_prefix(&mut self, prefix: &str) {
        for arg in &mut self.arguments {
            let var = format!(
                "{}_{}",
                prefix,
                arg.get_name().replace('-', "_").to_ascii_uppercase()
            );
            arg.set_env_fallback(var);
        }
    }
}

impl FromIterator<Argument> for Schema {
    fn from_iter<I: IntoIterator<Item = Argument>>(iter: I) -> Self {
        Self {
            arguments: iter.into_iter().collect(),
        }
    }
}
