//! Error types for bean registration tables.
//!
//! This module defines the failures raised while constructing bean instances or
//! invoking their registered accessors.

use thiserror::Error;

/// Structured error types for bean operations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BeanError {
    /// The type registered no construction path
    #[error("No default constructor registered for '{type_name}'")]
    NoConstructor { type_name: String },

    /// The registered constructor failed
    #[error("Failed to instantiate '{type_name}': {reason}")]
    InstantiationFailed { type_name: String, reason: String },

    /// An accessor was invoked on an object of the wrong Rust type
    #[error("Accessor for '{type_name}' invoked on a different type")]
    AccessorTypeMismatch { type_name: String },

    /// No property of that name is registered on the type
    #[error("No property '{property}' on '{type_name}'")]
    PropertyNotFound { type_name: String, property: String },

    /// The property has neither a write accessor nor a `set<Name>` method
    #[error("Property '{property}' of '{type_name}' is not writable")]
    NotWritable { type_name: String, property: String },
}

impl BeanError {
    /// Check if this error means no instance could be produced
    pub fn is_instantiation_error(&self) -> bool {
        matches!(
            self,
            BeanError::NoConstructor { .. } | BeanError::InstantiationFailed { .. }
        )
    }

    /// Check if this error is an accessor/object type mismatch
    pub fn is_type_error(&self) -> bool {
        matches!(self, BeanError::AccessorTypeMismatch { .. })
    }

    /// Check if this error means the property could not be found for the
    /// requested access
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BeanError::PropertyNotFound { .. } | BeanError::NotWritable { .. }
        )
    }

    /// Check if this error is a write to a read-only property
    pub fn is_not_writable(&self) -> bool {
        matches!(self, BeanError::NotWritable { .. })
    }

    /// Get the bean type name associated with this error
    pub fn type_name(&self) -> &str {
        match self {
            BeanError::NoConstructor { type_name }
            | BeanError::InstantiationFailed { type_name, .. }
            | BeanError::AccessorTypeMismatch { type_name }
            | BeanError::PropertyNotFound { type_name, .. }
            | BeanError::NotWritable { type_name, .. } => type_name,
        }
    }
}

// Conversion from BeanError to the main Error type
impl From<BeanError> for crate::Error {
    fn from(err: BeanError) -> Self {
        crate::Error::Bean(err)
    }
}
