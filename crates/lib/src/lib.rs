//!
//! fieldmap: runtime object-to-object field mapping.
//!
//! Given a source (a registered object or a string-keyed map) and a destination
//! type, fieldmap builds a new destination instance whose fields are populated
//! from the source, reconciling camelCase and underscore naming and coercing
//! between field types.
//!
//! ## Core Concepts
//!
//! * **Beans (`bean::Bean`, `bean::BeanType`)**: A mappable type publishes a registration table listing its properties, single-argument methods, parent type and construction path.
//! * **Values (`value::Value`)**: The dynamic representation of a field value while it travels between source and destination.
//! * **Property Resolver (`resolver::PropertyResolver`)**: Finds the readable/writable property for a field name and memoizes the result per (type, name).
//! * **Mapper (`mapper::Mapper`)**: Builds, caches and executes mapping plans: the (source field, destination field) pairs for one source shape and destination type.
//! * **Coercion (`convert::ConverterRegistry`)**: Best-effort conversion of values towards the destination property type.
//! * **Diff (`diff::diff`)**: Field-level comparison of two objects.

pub mod bean;
pub mod constants;
pub mod convert;
pub mod diff;
pub mod mapper;
pub mod naming;
pub mod resolver;
pub mod value;

pub use bean::{Bean, BeanType};
pub use convert::ConverterRegistry;
pub use diff::FieldDifference;
pub use mapper::{
    ExplicitMapping, Mapper, MapperBuilder, MapperConfig, MappingPlan, PlanCache, Record, Source,
    ValueMap,
};
pub use resolver::{PropertyDescriptor, PropertyResolver};
pub use value::{Field, FieldType, FromValue, Value};

/// Result type used throughout the fieldmap library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the fieldmap library.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Structured value conversion errors from the value module
    #[error(transparent)]
    Value(value::ValueError),

    /// Structured registration and accessor errors from the bean module
    #[error(transparent)]
    Bean(bean::BeanError),

    /// Structured mapping errors from the mapper module
    #[error(transparent)]
    Mapping(mapper::MappingError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Value(_) => "value",
            Error::Bean(_) => "bean",
            Error::Mapping(_) => "mapper",
        }
    }

    /// Check if this error indicates a property was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Bean(bean_err) => bean_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is a non-retryable configuration error.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Error::Mapping(mapping_err) => mapping_err.is_configuration_error(),
            _ => false,
        }
    }

    /// Check if this error means a destination could not be constructed.
    pub fn is_instantiation_error(&self) -> bool {
        match self {
            Error::Bean(bean_err) => bean_err.is_instantiation_error(),
            _ => false,
        }
    }

    /// Check if this error is type-related.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Value(value_err) => value_err.is_type_error() || value_err.is_range_error(),
            Error::Bean(bean_err) => bean_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error came from the value module.
    pub fn is_value_error(&self) -> bool {
        matches!(self, Error::Value(_))
    }

    /// Check if this error came from the mapper module.
    pub fn is_mapping_error(&self) -> bool {
        matches!(self, Error::Mapping(_))
    }
}
