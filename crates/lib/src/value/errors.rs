//! Error types for value conversions.
//!
//! These errors surface when a dynamic [`Value`](super::Value) is written into a
//! Rust field whose type cannot hold it. The mapping engine never raises them on
//! its own: coercion is best-effort and passes unconvertible values through, so a
//! `ValueError` marks the point where the final write genuinely failed.

use thiserror::Error;

/// Structured error types for value conversion.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    /// The value's runtime type does not match the field's declared type
    #[error("Value type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// The value has the right type but does not fit the target width
    #[error("Value {value} out of range for {target}")]
    OutOfRange { value: String, target: String },

    /// The value cannot be represented at all (e.g. a nested JSON document)
    #[error("Unsupported value: {reason}")]
    Unsupported { reason: String },
}

impl ValueError {
    /// Check if this error is a type mismatch
    pub fn is_type_error(&self) -> bool {
        matches!(self, ValueError::TypeMismatch { .. })
    }

    /// Check if this error is a numeric range failure
    pub fn is_range_error(&self) -> bool {
        matches!(self, ValueError::OutOfRange { .. })
    }

    /// Check if this error is an unsupported value shape
    pub fn is_unsupported(&self) -> bool {
        matches!(self, ValueError::Unsupported { .. })
    }
}

// Conversion from ValueError to the main Error type
impl From<ValueError> for crate::Error {
    fn from(err: ValueError) -> Self {
        crate::Error::Value(err)
    }
}
