//! Glue between Rust field types and [`Value`].

use chrono::{DateTime, NaiveDate, Utc};

use super::{FieldType, Value, ValueError};

/// Strict conversion from a [`Value`] into a Rust field type.
///
/// No coercion happens here. A `Value::Text("3")` does not become an `i64`; the
/// coercion layer is expected to have rewritten the value first. A mismatch is
/// the "write fails" case and is reported as [`ValueError::TypeMismatch`].
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, ValueError>;
}

/// A Rust type usable as a bean property.
///
/// Ties the declared [`FieldType`] to both conversion directions so the bean
/// builder can infer the property type from its accessor closures.
pub trait Field: FromValue + Into<Value> {
    fn field_type() -> FieldType;
}

fn mismatch(expected: FieldType, value: &Value) -> ValueError {
    ValueError::TypeMismatch {
        expected: expected.to_string(),
        actual: value.type_name().to_string(),
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch(FieldType::Bool, &other)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(mismatch(FieldType::Text, &other)),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Float(n) => Ok(n),
            other => Err(mismatch(FieldType::Float, &other)),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Float(n) => Ok(n as f32),
            other => Err(mismatch(FieldType::Float, &other)),
        }
    }
}

impl FromValue for NaiveDate {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Date(d) => Ok(d),
            other => Err(mismatch(FieldType::Date, &other)),
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::DateTime(dt) => Ok(dt),
            other => Err(mismatch(FieldType::DateTime, &other)),
        }
    }
}

/// `Null` becomes `None`; anything else must convert to `T`.
impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

macro_rules! int_field {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self, ValueError> {
                    match value {
                        Value::Int(n) => <$ty>::try_from(n).map_err(|_| ValueError::OutOfRange {
                            value: n.to_string(),
                            target: stringify!($ty).to_string(),
                        }),
                        other => Err(mismatch(FieldType::Int, &other)),
                    }
                }
            }

            impl Field for $ty {
                fn field_type() -> FieldType {
                    FieldType::Int
                }
            }
        )*
    };
}

int_field!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! scalar_field {
    ($($ty:ty => $field_type:ident),*) => {
        $(
            impl Field for $ty {
                fn field_type() -> FieldType {
                    FieldType::$field_type
                }
            }
        )*
    };
}

scalar_field! {
    bool => Bool,
    f32 => Float,
    f64 => Float,
    String => Text,
    NaiveDate => Date,
    DateTime<Utc> => DateTime
}

impl<T: Field> Field for Option<T> {
    fn field_type() -> FieldType {
        T::field_type()
    }
}
