//! Parsed argument values
//!
//! [`ParsedValues`] hands the parser's result to a schema type's
//! constructor. Every declared argument gets one slot; the constructor takes
//! values out by name and [`ParsedValues::finish`] reports any it left
//! behind.

use crate::argument::{FromValue, Value};
use crate::error::SchemaError;

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    name: String,
    value: Option<Value>,
    consumed: bool,
}

/// Values for each declared argument, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedValues {
    slots: Vec<Slot>,
}

impl ParsedValues {
    /// Create an empty set of values
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the value (or absence) for a declared argument
    pub fn insert(&mut self, name: impl Into<String>, value: Option<Value>) {
        let name = name.into();
        match self.slots.iter_mut().find(|slot| slot.name == name) {
            Some(slot) => {
                slot.value = value;
                slot.consumed = false;
            }
            None => self.slots.push(Slot {
                name,
                value,
                consumed: false,
            }),
        }
    }

    /// Take a value that must be present
    ///
    /// # Errors
    /// `UnknownArgument` if `name` is not declared, `MissingValue` if the
    /// argument was absent, `TypeMismatch` if it holds another type.
    pub fn take<T: FromValue>(&mut self, name: &str) -> Result<T, SchemaError> {
        self.take_optional(name)?
            .ok_or_else(|| SchemaError::MissingValue(name.to_string()))
    }

    /// Take a value that may be absent
    pub fn take_optional<T: FromValue>(&mut self, name: &str) -> Result<Option<T>, SchemaError> {
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.name == name)
            .ok_or_else(|| SchemaError::UnknownArgument(name.to_string()))?;
        slot.consumed = true;

        match slot.value.clone() {
            None => Ok(None),
            Some(value) => T::from_value(value)
                .map(Some)
                .map_err(|found| SchemaError::TypeMismatch {
                    name: name.to_string(),
                    expected: T::expected(),
                    found,
                }),
        }
    }

    /// Take a value, falling back to `T::default()` when absent
    pub fn take_or_default<T: FromValue + Default>(&mut self, name: &str) -> Result<T, SchemaError> {
        Ok(self.take_optional(name)?.unwrap_or_default())
    }

    /// Peek at a value without consuming it
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.slots
            .iter()
            .find(|slot| slot.name == name)
            .and_then(|slot| slot.value.as_ref())
    }

    /// Whether `name` is a declared argument
    pub fn contains(&self, name: &str) -> bool {
        self.slots.iter().any(|slot| slot.name == name)
    }

    /// Declared arguments and their values, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.slots
            .iter()
            .map(|slot| (slot.name.as_str(), slot.value.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of arguments that actually received a value
    pub fn present(&self) -> usize {
        self.slots.iter().filter(|slot| slot.value.is_some()).count()
    }

    /// Confirm the constructor consumed every declared argument
    ///
    /// # Errors
    /// `UnconsumedArgument` naming the first argument left behind.
    pub fn finish(self) -> Result<(), SchemaError> {
        match self.slots.into_iter().find(|slot| !slot.consumed) {
            Some(slot) => Err(SchemaError::UnconsumedArgument(slot.name)),
            None => Ok(()),
        }
    }
}
