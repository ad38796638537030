//! Core type system for validation
//!
//! This module defines the runtime values that get validated and the fixed
//! set of type tags a schema can require.

use std::fmt;
use std::str::FromStr;

use crate::errors::SchemaError;

// ============================================================================
// Value Enum - Runtime values to be validated
// ============================================================================

/// Runtime value that can be validated
///
/// `Undefined` models an absent value (a missing property, an unset slot) and
/// is distinct from an explicit `Null`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value
    #[default]
    Undefined,
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (i64)
    Int(i64),
    /// Float value (f64)
    Float(f64),
    /// Arbitrary-precision integer (stored as i128)
    BigInt(i128),
    /// String value
    String(String),
    /// Symbol with its description
    Symbol(String),
    /// Callable value, identified by its name
    Function(String),
    /// List/Array of values
    List(Vec<Value>),
    /// Object literal (key-value pairs in insertion order)
    Object(Vec<(String, Value)>),
    /// Instance of a named class with its own fields
    Instance {
        /// Class (constructor) name
        class: String,
        /// Instance fields in insertion order
        fields: Vec<(String, Value)>,
    },
}

impl Value {
    /// Build an object literal from key-value pairs
    pub fn object<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Object(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build an instance of `class` from key-value pairs
    pub fn instance<K, I>(class: impl Into<String>, pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Instance {
            class: class.into(),
            fields: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Get the runtime kind name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) | Self::Float(_) => "number",
            Self::BigInt(_) => "bigint",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::Function(_) => "function",
            Self::List(_) => "array",
            Self::Object(_) | Self::Instance { .. } => "object",
        }
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if value is undefined
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Numeric view of `Int` and `Float` values
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// True for finite numbers without a fractional part
    pub fn is_whole_number(&self) -> bool {
        match self {
            Self::Int(_) => true,
            Self::Float(f) => f.is_finite() && f.fract() == 0.0,
            _ => false,
        }
    }

    /// Length of a string (in characters, not bytes) or list
    pub fn length(&self) -> Option<usize> {
        match self {
            Self::String(s) => Some(s.chars().count()),
            Self::List(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Fields of a keyed structure (object literal or class instance)
    pub fn fields(&self) -> Option<&[(String, Value)]> {
        match self {
            Self::Object(fields) | Self::Instance { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Look up a field of a keyed structure
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields()?
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Class name of a structured value, if one can be obtained
    ///
    /// Primitives have no class name.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Self::Object(_) => Some("Object"),
            Self::List(_) => Some("Array"),
            Self::Function(_) => Some("Function"),
            Self::Instance { class, .. } => Some(class),
            _ => None,
        }
    }

    /// Strict equality used by `equals` and `contains`
    ///
    /// Numbers compare by value across `Int`/`Float` and NaN is never equal
    /// to anything. Lists and keyed structures compare element-wise.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (a, b) if a.as_number().is_some() && b.as_number().is_some() => {
                a.as_number() == b.as_number()
            }
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.strict_eq(y))
            }
            (Self::Object(a), Self::Object(b)) => fields_strict_eq(a, b),
            (
                Self::Instance { class: ca, fields: fa },
                Self::Instance { class: cb, fields: fb },
            ) => ca == cb && fields_strict_eq(fa, fb),
            (a, b) => a == b,
        }
    }
}

fn fields_strict_eq(a: &[(String, Value)], b: &[(String, Value)]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|((ka, va), (kb, vb))| ka == kb && va.strict_eq(vb))
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

// ============================================================================
// TypeTag - the fixed set of type requirements
// ============================================================================

/// Type tag a scalar/array schema can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeTag {
    /// Any defined, non-null value
    #[default]
    Any,
    /// List
    Array,
    /// Arbitrary-precision integer
    BigInt,
    /// Boolean
    Boolean,
    /// Callable
    Function,
    /// Whole number
    Integer,
    /// Any number
    Float,
    /// Any number
    Number,
    /// Object literal, class instance or list
    Object,
    /// String
    String,
    /// Symbol
    Symbol,
    /// Absent value
    Undefined,
    /// Null
    Null,
}

impl TypeTag {
    /// Canonical tag name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Array => "array",
            Self::BigInt => "bigint",
            Self::Boolean => "boolean",
            Self::Function => "function",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Number => "number",
            Self::Object => "object",
            Self::String => "string",
            Self::Symbol => "symbol",
            Self::Undefined => "undefined",
            Self::Null => "null",
        }
    }

    /// Check the runtime kind of `value` against this tag
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Any => !value.is_undefined() && !value.is_null(),
            Self::Array => matches!(value, Value::List(_)),
            Self::BigInt => matches!(value, Value::BigInt(_)),
            Self::Boolean => matches!(value, Value::Bool(_)),
            Self::Function => matches!(value, Value::Function(_)),
            Self::Integer => value.is_whole_number(),
            Self::Float | Self::Number => value.as_number().is_some(),
            Self::Object => matches!(
                value,
                Value::Object(_) | Value::Instance { .. } | Value::List(_)
            ),
            Self::String => matches!(value, Value::String(_)),
            Self::Symbol => matches!(value, Value::Symbol(_)),
            Self::Undefined => value.is_undefined(),
            Self::Null => value.is_null(),
        }
    }

    /// Tags whose `min`/`max` bound the numeric value itself
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Number)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = match s {
            "any" => Self::Any,
            "array" => Self::Array,
            "bigint" => Self::BigInt,
            "boolean" => Self::Boolean,
            "function" => Self::Function,
            "integer" => Self::Integer,
            "float" => Self::Float,
            "number" => Self::Number,
            "object" => Self::Object,
            "string" => Self::String,
            "symbol" => Self::Symbol,
            "undefined" => Self::Undefined,
            "null" => Self::Null,
            other => return Err(SchemaError::UnknownType(other.to_string())),
        };
        Ok(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_name() {
        assert_eq!(Value::Undefined.type_name(), "undefined");
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Bool(true).type_name(), "boolean");
        assert_eq!(Value::Int(42).type_name(), "number");
        assert_eq!(Value::Float(3.5).type_name(), "number");
        assert_eq!(Value::BigInt(7).type_name(), "bigint");
        assert_eq!(Value::from("test").type_name(), "string");
        assert_eq!(Value::List(vec![]).type_name(), "array");
        assert_eq!(Value::Object(vec![]).type_name(), "object");
    }

    #[test]
    fn test_whole_numbers() {
        assert!(Value::Int(3).is_whole_number());
        assert!(Value::Float(3.0).is_whole_number());
        assert!(!Value::Float(3.25).is_whole_number());
        assert!(!Value::Float(f64::INFINITY).is_whole_number());
        assert!(!Value::from("3").is_whole_number());
    }

    #[test]
    fn test_length_counts_characters() {
        assert_eq!(Value::from("héllo").length(), Some(5));
        assert_eq!(Value::List(vec![Value::Null, Value::Null]).length(), Some(2));
        assert_eq!(Value::Int(10).length(), None);
    }

    #[test]
    fn test_class_name() {
        assert_eq!(Value::Object(vec![]).class_name(), Some("Object"));
        assert_eq!(Value::List(vec![]).class_name(), Some("Array"));
        assert_eq!(
            Value::instance("Date", Vec::<(String, Value)>::new()).class_name(),
            Some("Date")
        );
        assert_eq!(Value::from("text").class_name(), None);
        assert_eq!(Value::Int(0).class_name(), None);
    }

    #[test]
    fn test_strict_eq_numbers() {
        assert!(Value::Int(1).strict_eq(&Value::Float(1.0)));
        assert!(!Value::Float(f64::NAN).strict_eq(&Value::Float(f64::NAN)));
        assert!(!Value::Int(1).strict_eq(&Value::from("1")));
        assert!(Value::List(vec![Value::Int(2)]).strict_eq(&Value::List(vec![Value::Float(2.0)])));
    }

    #[test]
    fn test_tag_matches() {
        assert!(TypeTag::Any.matches(&Value::Int(0)));
        assert!(!TypeTag::Any.matches(&Value::Undefined));
        assert!(!TypeTag::Any.matches(&Value::Null));
        assert!(TypeTag::Integer.matches(&Value::Float(4.0)));
        assert!(!TypeTag::Integer.matches(&Value::Float(4.5)));
        assert!(TypeTag::Number.matches(&Value::Int(4)));
        assert!(TypeTag::Object.matches(&Value::List(vec![])));
        assert!(!TypeTag::Object.matches(&Value::Null));
        assert!(TypeTag::Null.matches(&Value::Null));
        assert!(TypeTag::Undefined.matches(&Value::Undefined));
    }

    #[test]
    fn test_tag_round_trip_names() {
        assert_eq!("integer".parse::<TypeTag>().unwrap(), TypeTag::Integer);
        assert_eq!(TypeTag::BigInt.to_string(), "bigint");
        assert!("decimal".parse::<TypeTag>().is_err());
    }
}
