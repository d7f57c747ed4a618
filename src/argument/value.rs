//! Typed argument values
//!
//! Provides the value types a flag can carry and the conversions a schema
//! constructor uses to read them back.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Type a flag's value is coerced to by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Free-form text
    #[default]
    String,
    /// Signed 64-bit integer
    Integer,
    /// 64-bit float
    Float,
    /// `true` / `false`
    Bool,
    /// Filesystem path
    Path,
}

impl ValueType {
    /// Metavar shown in help when the argument does not set one
    pub const fn metavar(&self) -> &'static str {
        match self {
            ValueType::String => "STR",
            ValueType::Integer => "INT",
            ValueType::Float => "FLOAT",
            ValueType::Bool => "BOOL",
            ValueType::Path => "PATH",
        }
    }

    /// Human-readable type name used in error messages
    pub const fn name(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Bool => "bool",
            ValueType::Path => "path",
        }
    }

    /// Parse a raw string into a value of this type
    pub fn parse(&self, raw: &str) -> Result<Value, String> {
        match self {
            ValueType::String => Ok(Value::String(raw.to_string())),
            ValueType::Integer => raw
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|e| format!("'{}' is not an integer: {}", raw, e)),
            ValueType::Float => raw
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| format!("'{}' is not a float: {}", raw, e)),
            ValueType::Bool => raw
                .parse::<bool>()
                .map(Value::Bool)
                .map_err(|_| format!("'{}' is not true or false", raw)),
            ValueType::Path => Ok(Value::Path(PathBuf::from(raw))),
        }
    }

    /// Whether a scalar value has this type
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ValueType::String, Value::String(_))
                | (ValueType::Integer, Value::Integer(_))
                | (ValueType::Float, Value::Float(_))
                | (ValueType::Bool, Value::Bool(_))
                | (ValueType::Path, Value::Path(_))
        )
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed (or default) argument value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Path(PathBuf),
    List(Vec<Value>),
}

impl Value {
    /// Short description of the value's kind, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Path(_) => "path",
            Value::List(_) => "list",
        }
    }

    /// Render a scalar the way it would be typed on the command line
    ///
    /// Lists render as their items joined with `,`.
    pub fn to_arg_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Path(p) => p.to_string_lossy().into_owned(),
            Value::List(items) => items
                .iter()
                .map(Value::to_arg_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    fn describe(&self) -> String {
        match self {
            Value::String(s) => format!("string {:?}", s),
            Value::List(items) => format!("list of {} item(s)", items.len()),
            other => format!("{} {}", other.kind(), other.to_arg_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_arg_string())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<PathBuf> for Value {
    fn from(value: PathBuf) -> Self {
        Value::Path(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

/// Conversion from a parsed [`Value`] into a constructor field
///
/// On mismatch the implementation returns a description of what it found.
pub trait FromValue: Sized {
    /// Name of the expected type, used in error messages
    fn expected() -> &'static str;

    /// Convert, or describe why the value does not fit
    fn from_value(value: Value) -> Result<Self, String>;
}

macro_rules! impl_from_value {
    ($ty:ty, $expected:literal, $variant:ident) => {
        impl FromValue for $ty {
            fn expected() -> &'static str {
                $expected
            }

            fn from_value(value: Value) -> Result<Self, String> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(other.describe()),
                }
            }
        }
    };
}

impl_from_value!(String, "string", String);
impl_from_value!(i64, "integer", Integer);
impl_from_value!(f64, "float", Float);
impl_from_value!(bool, "bool", Bool);
impl_from_value!(PathBuf, "path", Path);

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn expected() -> &'static str {
                    stringify!($ty)
                }

                fn from_value(value: Value) -> Result<Self, String> {
                    match value {
                        Value::Integer(i) => <$ty>::try_from(i)
                            .map_err(|_| format!("integer {} (out of range)", i)),
                        other => Err(other.describe()),
                    }
                }
            }
        )*
    };
}

impl_from_integer!(i32, u8, u32, u64, usize);

impl<T: FromValue> FromValue for Vec<T> {
    fn expected() -> &'static str {
        "list"
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(other.describe()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_parse() {
        assert_eq!(ValueType::Integer.parse("42"), Ok(Value::Integer(42)));
        assert!(ValueType::Integer.parse(" 42").is_err());
        assert!(ValueType::Bool.parse("true ").is_err());
        assert_eq!(ValueType::Bool.parse("true"), Ok(Value::Bool(true)));
        assert!(ValueType::Integer.parse("forty").is_err());
        assert!(ValueType::Float.parse("1.5").is_ok());
    }

    #[test]
    fn test_value_type_accepts() {
        assert!(ValueType::String.accepts(&Value::from("a")));
        assert!(!ValueType::String.accepts(&Value::from(1_i64)));
        assert!(!ValueType::Integer.accepts(&Value::from(vec![1_i64])));
    }

    #[test]
    fn test_to_arg_string() {
        assert_eq!(Value::from(vec!["a", "b"]).to_arg_string(), "a,b");
        assert_eq!(Value::from(PathBuf::from("/tmp/x")).to_arg_string(), "/tmp/x");
    }

    #[test]
    fn test_from_value_mismatch() {
        let err = i64::from_value(Value::from("abc")).unwrap_err();
        assert_eq!(err, "string \"abc\"");
    }

    #[test]
    fn test_from_value_narrowing() {
        assert_eq!(u8::from_value(Value::Integer(3)), Ok(3));
        assert!(u8::from_value(Value::Integer(300)).is_err());
        assert!(u32::from_value(Value::Integer(-1)).is_err());
    }

    #[test]
    fn test_from_value_list() {
        let tags = Vec::<String>::from_value(Value::from(vec!["x", "y"])).unwrap();
        assert_eq!(tags, vec!["x".to_string(), "y".to_string()]);
        assert!(Vec::<i64>::from_value(Value::from(vec!["x"])).is_err());
    }
}
