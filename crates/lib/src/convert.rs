//! Best-effort type coercion.
//!
//! [`ConverterRegistry::coerce`] rewrites a [`Value`] towards a destination
//! [`FieldType`]. It never fails. A value that cannot be converted is returned
//! unchanged and the eventual property write reports the mismatch.
//!
//! Order of attempts:
//! 1. the value already has the target type: returned as is;
//! 2. a converter registered for the target type accepts it;
//! 3. the value is text: parsed with [`parse_text`];
//! 4. otherwise it passes through.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::trace;

use crate::{
    FieldType, Value,
    constants::{DATE_FORMAT, DATETIME_FORMATS, FALSE_WORDS, TRUE_WORDS},
};

/// A conversion into one target type. Returns `None` when the converter does
/// not handle the given value, letting the next rule apply.
pub type Converter = Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// Converters keyed by target type, at most one per type.
#[derive(Clone, Default)]
pub struct ConverterRegistry {
    converters: HashMap<FieldType, Converter>,
}

impl ConverterRegistry {
    /// An empty registry. Only text parsing applies.
    pub fn new() -> Self {
        Self::default()
    }

    /// The converters installed by [`Mapper::new`](crate::Mapper::new):
    ///
    /// - anything to text, floats without exponent notation;
    /// - floats to ints (truncating, finite and in range), bools to `0`/`1`;
    /// - ints to floats;
    /// - ints to bools (non-zero is true);
    /// - dates to date-times at midnight UTC and back.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(FieldType::Text, |value| match value {
            Value::Null => None,
            other => Some(Value::Text(other.to_string())),
        });
        registry.register(FieldType::Int, |value| match *value {
            Value::Float(n) if n.is_finite() && n >= i64::MIN as f64 && n < i64::MAX as f64 => {
                Some(Value::Int(n.trunc() as i64))
            }
            Value::Bool(b) => Some(Value::Int(i64::from(b))),
            _ => None,
        });
        registry.register(FieldType::Float, |value| match *value {
            Value::Int(n) => Some(Value::Float(n as f64)),
            _ => None,
        });
        registry.register(FieldType::Bool, |value| match *value {
            Value::Int(n) => Some(Value::Bool(n != 0)),
            _ => None,
        });
        registry.register(FieldType::Date, |value| match value {
            Value::DateTime(dt) => Some(Value::Date(dt.date_naive())),
            _ => None,
        });
        registry.register(FieldType::DateTime, |value| match value {
            Value::Date(d) => d.and_hms_opt(0, 0, 0).map(|dt| Value::DateTime(dt.and_utc())),
            _ => None,
        });
        registry
    }

    /// Installs `converter` for `target`, replacing any previous one.
    pub fn register<F>(&mut self, target: FieldType, converter: F) -> &mut Self
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        self.converters.insert(target, Arc::new(converter));
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<F>(mut self, target: FieldType, converter: F) -> Self
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        self.register(target, converter);
        self
    }

    /// Removes the converter for `target`.
    pub fn unregister(&mut self, target: FieldType) -> Option<Converter> {
        self.converters.remove(&target)
    }

    pub fn get(&self, target: FieldType) -> Option<&Converter> {
        self.converters.get(&target)
    }

    pub fn contains(&self, target: FieldType) -> bool {
        self.converters.contains_key(&target)
    }

    /// Coerces `value` towards `target`. See the module docs for the order of
    /// attempts.
    pub fn coerce(&self, value: Value, target: FieldType) -> Value {
        let Some(actual) = value.field_type() else {
            return value;
        };
        if actual == target {
            return value;
        }

        if let Some(converted) = self.get(target).and_then(|convert| convert(&value)) {
            return converted;
        }

        if let Some(parsed) = value.as_text().and_then(|text| parse_text(text, target)) {
            return parsed;
        }

        trace!(from = %actual, to = %target, "Passing value through without coercion");
        value
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut targets: Vec<_> = self.converters.keys().collect();
        targets.sort();
        f.debug_struct("ConverterRegistry")
            .field("targets", &targets)
            .finish()
    }
}

/// Parses text into a value of `target` type.
///
/// Surrounding whitespace is ignored. Booleans accept the words in
/// [`TRUE_WORDS`] and [`FALSE_WORDS`] in any case. Date-times accept RFC 3339
/// and then the [`DATETIME_FORMATS`] (read as UTC), then a bare date at
/// midnight. Dates accept [`DATE_FORMAT`] or any accepted date-time.
///
/// Returns `None` when the text does not parse.
pub fn parse_text(text: &str, target: FieldType) -> Option<Value> {
    let text = text.trim();
    match target {
        FieldType::Text => Some(Value::Text(text.to_string())),
        FieldType::Bool => parse_bool(text).map(Value::Bool),
        FieldType::Int => text.parse::<i64>().ok().map(Value::Int),
        FieldType::Float => text.parse::<f64>().ok().map(Value::Float),
        FieldType::Date => NaiveDate::parse_from_str(text, DATE_FORMAT)
            .ok()
            .or_else(|| parse_datetime(text).map(|dt| dt.date_naive()))
            .map(Value::Date),
        FieldType::DateTime => parse_datetime(text)
            .or_else(|| {
                NaiveDate::parse_from_str(text, DATE_FORMAT)
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|dt| dt.and_utc())
            })
            .map(Value::DateTime),
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    let lower = text.to_ascii_lowercase();
    if TRUE_WORDS.contains(&lower.as_str()) {
        Some(true)
    } else if FALSE_WORDS.contains(&lower.as_str()) {
        Some(false)
    } else {
        None
    }
}

fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
}
