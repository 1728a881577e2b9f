//! Error types for mapping operations.
//!
//! Every variant is a configuration error: the caller asked for something the
//! mapper can never do, so retrying will not help.

use thiserror::Error;

/// Structured error types for the mapping engine.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    /// The destination is a generic string-keyed mapping type
    #[error("Cannot map into '{type_name}': string-keyed mapping types are not valid destinations")]
    UnsupportedDestination { type_name: String },

    /// An explicit field pair names a destination property that does not exist
    #[error("Explicit mapping '{source_field}' -> '{dest_field}' names no property of '{type_name}'")]
    UnknownProperty {
        type_name: String,
        source_field: String,
        dest_field: String,
    },

    /// A mapper configuration document could not be read
    #[error("Invalid mapper configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl MappingError {
    /// Check if this error is a configuration error
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            MappingError::UnsupportedDestination { .. }
                | MappingError::UnknownProperty { .. }
                | MappingError::InvalidConfig { .. }
        )
    }

    /// Check if this error is an unknown destination property
    pub fn is_unknown_property(&self) -> bool {
        matches!(self, MappingError::UnknownProperty { .. })
    }

    /// Get the destination type name associated with this error, if any
    pub fn type_name(&self) -> Option<&str> {
        match self {
            MappingError::UnsupportedDestination { type_name }
            | MappingError::UnknownProperty { type_name, .. } => Some(type_name),
            MappingError::InvalidConfig { .. } => None,
        }
    }
}

// Conversion from MappingError to the main Error type
impl From<MappingError> for crate::Error {
    fn from(err: MappingError) -> Self {
        crate::Error::Mapping(err)
    }
}
