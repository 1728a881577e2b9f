//! Mapping sources: typed objects or string-keyed maps.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::{
    Bean, Result, Value,
    bean::BeanType,
};

/// A string-keyed map of field values, as produced by [`Mapper::to_record`](crate::Mapper::to_record).
pub type Record = BTreeMap<String, Value>;

/// A string-keyed mapping usable as a mapping source.
///
/// A key that is present with a null value and a missing key behave the same:
/// both read as [`Value::Null`] and are skipped.
pub trait ValueMap {
    /// Keys present in the map, in any order.
    fn field_keys(&self) -> Vec<&str>;

    /// The value under `key`, `Null` when absent.
    fn field_value(&self, key: &str) -> Result<Value>;
}

impl ValueMap for HashMap<String, Value> {
    fn field_keys(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }

    fn field_value(&self, key: &str) -> Result<Value> {
        Ok(self.get(key).cloned().unwrap_or(Value::Null))
    }
}

impl ValueMap for BTreeMap<String, Value> {
    fn field_keys(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }

    fn field_value(&self, key: &str) -> Result<Value> {
        Ok(self.get(key).cloned().unwrap_or(Value::Null))
    }
}

/// JSON objects map scalars only; an array or nested object fails the read.
impl ValueMap for serde_json::Map<String, serde_json::Value> {
    fn field_keys(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }

    fn field_value(&self, key: &str) -> Result<Value> {
        match self.get(key) {
            Some(v) => Ok(Value::try_from(v)?),
            None => Ok(Value::Null),
        }
    }
}

/// The value being mapped from.
#[derive(Clone, Copy)]
pub enum Source<'a> {
    /// A registered type, read through its properties
    Object {
        ty: &'static BeanType,
        obj: &'a dyn Any,
    },
    /// A string-keyed map, read by key
    Map(&'a dyn ValueMap),
}

impl<'a> Source<'a> {
    pub fn object<T: Bean>(obj: &'a T) -> Self {
        Source::Object {
            ty: T::bean_type(),
            obj,
        }
    }

    pub fn map<M: ValueMap>(map: &'a M) -> Self {
        Source::Map(map)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Source::Map(_))
    }
}

impl fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Object { ty, .. } => f.debug_tuple("Object").field(&ty.name()).finish(),
            Source::Map(map) => {
                let mut keys = map.field_keys();
                keys.sort_unstable();
                f.debug_tuple("Map").field(&keys).finish()
            }
        }
    }
}

impl<'a, T: Bean> From<&'a T> for Source<'a> {
    fn from(obj: &'a T) -> Self {
        Source::object(obj)
    }
}
