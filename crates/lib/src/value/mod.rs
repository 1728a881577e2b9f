//! Dynamic values carried between source and destination fields.
//!
//! The mapper never sees concrete Rust field types. Getters produce a [`Value`],
//! the coercion layer rewrites it towards the destination's [`FieldType`], and
//! setters turn it back into a Rust value through [`FromValue`].

pub mod errors;
mod field;

use std::fmt;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

pub use errors::ValueError;
pub use field::{Field, FromValue};

/// The declared type of a bean property.
///
/// Every property registered on a [`BeanType`](crate::bean::BeanType) carries one
/// of these. Coercion targets it, and `set<Name>` method lookup matches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldType {
    Bool,
    Int,
    Float,
    Text,
    Date,
    DateTime,
}

impl FieldType {
    /// Returns the type name as a string
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Bool => "bool",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Text => "text",
            FieldType::Date => "date",
            FieldType::DateTime => "datetime",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single field value.
///
/// `Null` stands for an absent value. The mapper skips it on write, so a null
/// source field never overwrites a destination default.
///
/// ```
/// # use fieldmap::{Value, FieldType};
/// let score = Value::Float(3.0);
/// assert_eq!(score.field_type(), Some(FieldType::Float));
/// assert_eq!(score.to_string(), "3.0");
/// assert!(Value::Null.is_null());
/// ```
///
/// Floats compare by value with every NaN equal to every other NaN, so an
/// unchanged NaN field is not reported as a difference.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl Value {
    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this is a text value
    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    /// The runtime type of this value, `None` for `Null`.
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(FieldType::Bool),
            Value::Int(_) => Some(FieldType::Int),
            Value::Float(_) => Some(FieldType::Float),
            Value::Text(_) => Some(FieldType::Text),
            Value::Date(_) => Some(FieldType::Date),
            Value::DateTime(_) => Some(FieldType::DateTime),
        }
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        self.field_type().map_or("null", |t| t.name())
    }

    /// Attempts to convert to a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to convert to an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => {
                a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
            }
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            _ => false,
        }
    }
}

/// Formats a float without exponent notation.
///
/// Integral values keep a single fraction digit so `3.0` stays `"3.0"` rather
/// than collapsing to `"3"`.
pub fn format_float(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 {
        format!("{n:.1}")
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => f.write_str(&format_float(*n)),
            Value::Text(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident as $cast:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v as $cast)
                }
            }
        )*
    };
}

value_from! {
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => Int as i64,
    u16 => Int as i64,
    u32 => Int as i64,
    f32 => Float as f64,
    f64 => Float as f64,
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = ValueError;

    fn try_from(v: serde_json::Value) -> Result<Self, Self::Error> {
        match v {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Int(i)),
                None => n.as_f64().map(Value::Float).ok_or_else(|| ValueError::Unsupported {
                    reason: format!("number {n} is not representable"),
                }),
            },
            serde_json::Value::String(s) => Ok(Value::Text(s)),
            serde_json::Value::Array(_) => Err(ValueError::Unsupported {
                reason: "arrays are not mappable field values".to_string(),
            }),
            serde_json::Value::Object(_) => Err(ValueError::Unsupported {
                reason: "nested objects are not mappable field values".to_string(),
            }),
        }
    }
}

impl TryFrom<&serde_json::Value> for Value {
    type Error = ValueError;

    fn try_from(v: &serde_json::Value) -> Result<Self, Self::Error> {
        Value::try_from(v.clone())
    }
}
