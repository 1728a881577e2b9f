//! Mapper configuration.

use serde::{Deserialize, Serialize};

use super::MappingError;
use crate::Result;

/// Tunables for a [`Mapper`](crate::Mapper).
///
/// Missing keys take their defaults, so `{}` is a valid document.
///
/// ```
/// use fieldmap::MapperConfig;
///
/// let config = MapperConfig::from_json(r#"{ "cache_plans": false }"#).unwrap();
/// assert!(!config.cache_plans);
/// assert!(!config.capitalize_second_upper);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Capitalize field names whose second character is uppercase before
    /// matching them against property names (`xName` matches `XName`).
    ///
    /// Off by default: registered property names are matched verbatim.
    pub capitalize_second_upper: bool,

    /// Cache mapping plans per (source shape, destination, explicit mapping).
    ///
    /// Property descriptors are cached regardless.
    pub cache_plans: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            capitalize_second_upper: false,
            cache_plans: true,
        }
    }
}

impl MapperConfig {
    /// Reads a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            MappingError::InvalidConfig {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Serializes this configuration as JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            MappingError::InvalidConfig {
                reason: e.to_string(),
            }
            .into()
        })
    }
}
