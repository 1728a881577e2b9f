//! Property resolution with a per-(type, name) memo.
//!
//! [`PropertyResolver::resolve`] finds the property of a [`BeanType`] matching a
//! field name and returns a shared [`PropertyDescriptor`]. A property whose
//! metadata lacks a write accessor picks up a matching `set<Name>` method
//! instead, so fluent-setter types stay writable.
//!
//! Resolution never fails: an unknown name is `None`, which the mapper treats
//! as "skip this field". Only successful resolutions are cached.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::trace;

use crate::{
    FieldType, Result, Value,
    bean::{BeanError, BeanType, Getter, Setter},
    naming::{capitalize, has_upper_second, setter_name},
};

/// A resolved, readable and possibly writable property.
///
/// Immutable once created. Two descriptors compare equal when they describe the
/// same property through the same accessors.
#[derive(Clone)]
pub struct PropertyDescriptor {
    name: String,
    field_type: FieldType,
    owner: &'static str,
    read: Option<Getter>,
    write: Option<Setter>,
    write_from_method: bool,
}

impl PropertyDescriptor {
    /// The property name as registered on the type
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type of the property
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Name of the bean type this descriptor was resolved against
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    pub fn is_readable(&self) -> bool {
        self.read.is_some()
    }

    pub fn is_writable(&self) -> bool {
        self.write.is_some()
    }

    /// True when the write accessor came from a `set<Name>` method lookup
    pub fn is_write_from_method(&self) -> bool {
        self.write_from_method
    }

    /// Reads the property from `obj`. A property without a read accessor reads
    /// as `Null`.
    pub fn read(&self, obj: &dyn Any) -> Result<Value> {
        match &self.read {
            Some(get) => get(obj),
            None => Ok(Value::Null),
        }
    }

    /// Writes `value` into `obj` without coercion.
    pub fn write(&self, obj: &mut dyn Any, value: Value) -> Result<()> {
        let set = self.write.as_ref().ok_or_else(|| BeanError::NotWritable {
            type_name: self.owner.to_string(),
            property: self.name.clone(),
        })?;
        set(obj, value)
    }
}

fn same_accessor<F: ?Sized>(a: &Option<Arc<F>>, b: &Option<Arc<F>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

impl PartialEq for PropertyDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.field_type == other.field_type
            && self.owner == other.owner
            && same_accessor(&self.read, &other.read)
            && same_accessor(&self.write, &other.write)
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("owner", &self.owner)
            .field("readable", &self.is_readable())
            .field("writable", &self.is_writable())
            .field("write_from_method", &self.write_from_method)
            .finish()
    }
}

type DescriptorMap = HashMap<TypeId, HashMap<String, Arc<PropertyDescriptor>>>;

/// Resolves field names to property descriptors and memoizes the results.
///
/// Safe to share between threads. Concurrent misses on the same key may both
/// build a descriptor; the first one stored wins and is returned to both.
#[derive(Default)]
pub struct PropertyResolver {
    cache: RwLock<DescriptorMap>,
    capitalize_second_upper: bool,
}

impl PropertyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver that capitalizes names whose second character is uppercase
    /// before matching (`xName` looks up `XName`).
    pub fn with_capitalized_second_upper(enabled: bool) -> Self {
        Self {
            cache: RwLock::default(),
            capitalize_second_upper: enabled,
        }
    }

    /// Finds the property of `ty` named exactly `field_name`.
    pub fn resolve(
        &self,
        ty: &'static BeanType,
        field_name: &str,
    ) -> Option<Arc<PropertyDescriptor>> {
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(found) = cache.get(&ty.type_id()).and_then(|m| m.get(field_name)) {
                return Some(Arc::clone(found));
            }
        }

        let descriptor = Arc::new(self.introspect(ty, field_name)?);

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let stored = cache
            .entry(ty.type_id())
            .or_default()
            .entry(field_name.to_string())
            .or_insert(descriptor);
        Some(Arc::clone(stored))
    }

    fn introspect(&self, ty: &'static BeanType, field_name: &str) -> Option<PropertyDescriptor> {
        let candidate = if self.capitalize_second_upper && has_upper_second(field_name) {
            capitalize(field_name)
        } else {
            field_name.to_string()
        };

        let Some(property) = ty.properties().find(|p| p.name() == candidate) else {
            trace!(bean = ty.name(), field = field_name, "No property matches field name");
            return None;
        };

        let mut write_from_method = false;
        let write = property.setter.clone().or_else(|| {
            let method = ty.find_method(&setter_name(field_name), property.field_type())?;
            trace!(
                bean = ty.name(),
                field = field_name,
                method = method.name(),
                "Using setter method as write accessor"
            );
            write_from_method = true;
            Some(method.invoker.clone())
        });

        Some(PropertyDescriptor {
            name: property.name().to_string(),
            field_type: property.field_type(),
            owner: ty.name(),
            read: property.getter.clone(),
            write,
            write_from_method,
        })
    }

    /// Number of cached descriptors.
    pub fn cached_len(&self) -> usize {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        cache.values().map(HashMap::len).sum()
    }

    /// Drops every cached descriptor.
    pub fn clear(&self) {
        self.cache.write().unwrap_or_else(PoisonError::into_inner).clear();
    }

    pub fn capitalizes_second_upper(&self) -> bool {
        self.capitalize_second_upper
    }
}

impl fmt::Debug for PropertyResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyResolver")
            .field("cached", &self.cached_len())
            .field("capitalize_second_upper", &self.capitalize_second_upper)
            .finish()
    }
}
