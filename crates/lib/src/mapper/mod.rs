//! The mapping engine.
//!
//! A [`Mapper`] copies fields from a [`Source`] into a freshly constructed
//! destination bean. For each source field it looks for a destination property
//! under the name as given, then its camelCase form, then its underscore form;
//! fields with no counterpart are dropped. The resolved pairs form a
//! [`MappingPlan`] that is cached per (source shape, destination type,
//! explicit mapping).
//!
//! Values are coerced towards the destination property type through the
//! mapper's [`ConverterRegistry`] before being written. Null source values are
//! never written, so destination defaults survive.
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::OnceLock;
//! use fieldmap::{Bean, BeanType, Mapper, Source, Value};
//!
//! #[derive(Default)]
//! struct User {
//!     user_name: String,
//!     age: i32,
//! }
//!
//! impl Bean for User {
//!     fn bean_type() -> &'static BeanType {
//!         static TYPE: OnceLock<BeanType> = OnceLock::new();
//!         TYPE.get_or_init(|| {
//!             BeanType::builder::<User>("User")
//!                 .property("userName", |u: &User| u.user_name.clone(), |u: &mut User, v| u.user_name = v)
//!                 .property("age", |u: &User| u.age, |u: &mut User, v| u.age = v)
//!                 .default_constructor()
//!                 .build()
//!         })
//!     }
//! }
//!
//! # fn main() -> fieldmap::Result<()> {
//! let row = HashMap::from([
//!     ("user_name".to_string(), Value::from("Ann")),
//!     ("age".to_string(), Value::from(30)),
//! ]);
//! let user: User = Mapper::new().mapping(Source::map(&row))?;
//! assert_eq!(user.user_name, "Ann");
//! assert_eq!(user.age, 30);
//! # Ok(())
//! # }
//! ```

mod config;
pub mod errors;
mod plan;
mod source;

use std::any::Any;
use std::sync::{Arc, OnceLock};

use tracing::{debug, trace, warn};

pub use config::MapperConfig;
pub use errors::MappingError;
pub use plan::{ExplicitMapping, FieldPair, MappingPlan, PlanCache};
pub use source::{Record, Source, ValueMap};

use plan::{PlanKey, Shape};

use crate::{
    Bean, Result, Value,
    bean::{BeanError, BeanType, Instance},
    convert::ConverterRegistry,
    diff::{self, FieldDifference},
    naming::{to_camel_case, to_underscore_name},
    resolver::{PropertyDescriptor, PropertyResolver},
};

/// Object-to-object field mapper.
///
/// Cheap to share: all state sits behind the resolver and plan caches, which
/// are safe for concurrent use and may be shared between mappers.
#[derive(Debug)]
pub struct Mapper {
    config: MapperConfig,
    converters: ConverterRegistry,
    resolver: Arc<PropertyResolver>,
    plans: Arc<PlanCache>,
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}

impl Mapper {
    /// A mapper with the default configuration, the
    /// [standard converters](ConverterRegistry::standard) and fresh caches.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> MapperBuilder {
        MapperBuilder::new()
    }

    /// The process-wide default mapper, created on first use.
    pub fn global() -> &'static Mapper {
        static GLOBAL: OnceLock<Mapper> = OnceLock::new();
        GLOBAL.get_or_init(Mapper::new)
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    pub fn resolver(&self) -> &Arc<PropertyResolver> {
        &self.resolver
    }

    pub fn plan_cache(&self) -> &Arc<PlanCache> {
        &self.plans
    }

    /// Resolves `field_name` on `ty` exactly, without naming fallbacks.
    pub fn resolve_property(
        &self,
        ty: &'static BeanType,
        field_name: &str,
    ) -> Option<Arc<PropertyDescriptor>> {
        self.resolver.resolve(ty, field_name)
    }

    /// Resolves `field_name` on `ty`, trying the name as given, then its
    /// camelCase form, then its underscore form.
    pub fn resolve_field(
        &self,
        ty: &'static BeanType,
        field_name: &str,
    ) -> Option<Arc<PropertyDescriptor>> {
        if let Some(found) = self.resolver.resolve(ty, field_name) {
            return Some(found);
        }
        let camel = to_camel_case(field_name);
        if camel != field_name {
            if let Some(found) = self.resolver.resolve(ty, &camel) {
                return Some(found);
            }
        }
        let underscore = to_underscore_name(field_name);
        if underscore != field_name && underscore != camel {
            return self.resolver.resolve(ty, &underscore);
        }
        None
    }

    /// Maps `source` into a new `D`.
    ///
    /// Fails when `D` is a string-keyed mapping type, when `D` cannot be
    /// constructed, or when a coerced value still does not fit its destination
    /// property. On failure no destination is returned.
    pub fn mapping<'a, D: Bean>(&self, source: impl Into<Source<'a>>) -> Result<D> {
        let instance = self.map_into(source.into(), D::bean_type(), None)?;
        downcast_instance(instance)
    }

    /// Maps `source` into a new `D`, applying `explicit` field renames first.
    pub fn mapping_with<'a, D: Bean>(
        &self,
        source: impl Into<Source<'a>>,
        explicit: &ExplicitMapping,
    ) -> Result<D> {
        let instance = self.map_into(source.into(), D::bean_type(), Some(explicit))?;
        downcast_instance(instance)
    }

    /// Like [`mapping`](Self::mapping), but an absent source yields `Ok(None)`.
    pub fn mapping_opt<'a, D: Bean>(
        &self,
        source: Option<impl Into<Source<'a>>>,
    ) -> Result<Option<D>> {
        source.map(|s| self.mapping(s)).transpose()
    }

    /// Type-erased mapping. An absent source or destination yields `Ok(None)`.
    pub fn map_dynamic(
        &self,
        source: Option<Source<'_>>,
        dest: Option<&'static BeanType>,
        explicit: Option<&ExplicitMapping>,
    ) -> Result<Option<Instance>> {
        match (source, dest) {
            (Some(source), Some(dest)) => self.map_into(source, dest, explicit).map(Some),
            _ => Ok(None),
        }
    }

    /// Maps every source in order. The first failure aborts the whole batch.
    pub fn mapping_array<'a, D, I>(&self, sources: I) -> Result<Vec<D>>
    where
        D: Bean,
        I: IntoIterator,
        I::Item: Into<Source<'a>>,
    {
        sources.into_iter().map(|s| self.mapping(s)).collect()
    }

    fn map_into(
        &self,
        source: Source<'_>,
        dest: &'static BeanType,
        explicit: Option<&ExplicitMapping>,
    ) -> Result<Instance> {
        if dest.is_map() {
            warn!(dest = dest.name(), "Rejected string-keyed mapping destination");
            return Err(MappingError::UnsupportedDestination {
                type_name: dest.name().to_string(),
            }
            .into());
        }

        let plan = self.plan_for(&source, dest, explicit)?;
        let mut instance = dest.instantiate()?;

        for pair in plan.pairs() {
            let value = match (&source, &pair.source) {
                (Source::Object { obj, .. }, Some(read)) => read.read(*obj)?,
                (Source::Object { .. }, None) => Value::Null,
                (Source::Map(map), _) => map.field_value(pair.source_field())?,
            };
            if value.is_null() {
                continue;
            }
            let value = self.converters.coerce(value, pair.dest.field_type());
            pair.dest.write(&mut *instance, value)?;
        }

        Ok(instance)
    }

    /// The plan for mapping `source` into `dest`, from the cache when enabled.
    pub fn plan_for(
        &self,
        source: &Source<'_>,
        dest: &'static BeanType,
        explicit: Option<&ExplicitMapping>,
    ) -> Result<Arc<MappingPlan>> {
        let (shape, field_names) = match source {
            Source::Object { ty, .. } => {
                (Shape::Type(BeanType::type_id(ty)), ty.property_names())
            }
            Source::Map(map) => {
                let mut keys: Vec<String> =
                    map.field_keys().into_iter().map(String::from).collect();
                keys.sort_unstable();
                (Shape::Keys(keys.clone()), keys)
            }
        };
        let key = PlanKey {
            shape,
            dest: dest.type_id(),
            explicit: explicit.cloned().unwrap_or_default(),
            capitalize_second_upper: self.resolver.capitalizes_second_upper(),
        };

        if self.config.cache_plans {
            if let Some(plan) = self.plans.get(&key) {
                trace!(dest = dest.name(), "Mapping plan cache hit");
                return Ok(plan);
            }
        }

        debug!(source = ?source, dest = dest.name(), "Mapping plan cache miss");
        let plan = self.build_plan(source, dest, &field_names, &key.explicit)?;
        debug!(dest = dest.name(), pairs = plan.len(), "Built mapping plan");

        if self.config.cache_plans {
            Ok(self.plans.insert(key, plan))
        } else {
            Ok(Arc::new(plan))
        }
    }

    fn build_plan(
        &self,
        source: &Source<'_>,
        dest: &'static BeanType,
        field_names: &[String],
        explicit: &ExplicitMapping,
    ) -> Result<MappingPlan> {
        let source_ty = match source {
            Source::Object { ty, .. } => Some(*ty),
            Source::Map(_) => None,
        };
        let source_descriptor =
            |name: &str| source_ty.and_then(|ty| self.resolver.resolve(ty, name));

        let mut pairs = Vec::with_capacity(field_names.len() + explicit.len());
        for name in field_names.iter().filter(|n| !explicit.contains(n.as_str())) {
            match self.resolve_field(dest, name) {
                Some(found) if found.is_writable() => pairs.push(FieldPair {
                    source_field: name.clone(),
                    source: source_descriptor(name.as_str()),
                    dest: found,
                }),
                Some(_) => {
                    trace!(
                        field = %name,
                        dest = dest.name(),
                        "Dropped field without write accessor"
                    );
                }
                None => {
                    trace!(field = %name, dest = dest.name(), "Dropped field without counterpart");
                }
            }
        }

        for (source_field, dest_field) in explicit.iter() {
            let Some(found) = self.resolver.resolve(dest, dest_field) else {
                warn!(
                    source_field,
                    dest_field,
                    dest = dest.name(),
                    "Explicit mapping names an unknown property"
                );
                return Err(MappingError::UnknownProperty {
                    type_name: dest.name().to_string(),
                    source_field: source_field.to_string(),
                    dest_field: dest_field.to_string(),
                }
                .into());
            };
            pairs.push(FieldPair {
                source_field: source_field.to_string(),
                source: source_descriptor(source_field),
                dest: found,
            });
        }

        Ok(MappingPlan { pairs })
    }

    /// Copies every property of `obj` into a [`Record`], nulls included.
    pub fn to_record<T: Bean>(&self, obj: &T) -> Result<Record> {
        let ty = T::bean_type();
        let mut record = Record::new();
        for name in ty.property_names() {
            if let Some(found) = self.resolver.resolve(ty, &name) {
                let value = found.read(obj)?;
                record.insert(name, value);
            }
        }
        Ok(record)
    }

    /// Reads the property `name` of `obj`; `None` when there is no such property.
    pub fn get_property<T: Bean>(&self, obj: &T, name: &str) -> Result<Option<Value>> {
        self.resolver
            .resolve(T::bean_type(), name)
            .map(|found| found.read(obj))
            .transpose()
    }

    /// Reads the property `name` of `obj` as text; `None` when there is no such
    /// property or its value is null.
    pub fn property_as_string<T: Bean>(&self, obj: &T, name: &str) -> Result<Option<String>> {
        Ok(self
            .get_property(obj, name)?
            .filter(|v| !v.is_null())
            .map(|v| v.to_string()))
    }

    /// Coerces `value` to the type of property `name` and writes it into `obj`.
    ///
    /// Unlike mapping, a null value is written as given.
    pub fn set_property<T: Bean>(
        &self,
        obj: &mut T,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<()> {
        let ty = T::bean_type();
        let found = self
            .resolver
            .resolve(ty, name)
            .ok_or_else(|| BeanError::PropertyNotFound {
                type_name: ty.name().to_string(),
                property: name.to_string(),
            })?;
        let value = self.converters.coerce(value.into(), found.field_type());
        found.write(obj, value)
    }

    /// Names of all properties of `T`, inherited ones included.
    pub fn field_names<T: Bean>(&self) -> Vec<String> {
        T::bean_type().property_names()
    }

    /// Constructs a `T` through its registered construction path.
    pub fn instantiate<T: Bean>(&self) -> Result<T> {
        downcast_instance(T::bean_type().instantiate()?)
    }

    /// Fields declared on `N` whose non-null value in `new` differs from `old`.
    /// See [`diff::diff`].
    pub fn diff<O: Bean, N: Bean>(&self, old: &O, new: &N) -> Result<Vec<FieldDifference>> {
        diff::diff(&self.resolver, old, new)
    }
}

fn downcast_instance<T: Any>(instance: Instance) -> Result<T> {
    instance.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
        BeanError::AccessorTypeMismatch {
            type_name: std::any::type_name::<T>().to_string(),
        }
        .into()
    })
}

/// Builder for a [`Mapper`] with injected caches or converters.
///
/// ```
/// use std::sync::Arc;
/// use fieldmap::{ConverterRegistry, Mapper, MapperConfig, PlanCache};
///
/// let plans = Arc::new(PlanCache::new());
/// let mapper = Mapper::builder()
///     .config(MapperConfig { cache_plans: true, ..Default::default() })
///     .converters(ConverterRegistry::new())
///     .plan_cache(Arc::clone(&plans))
///     .build();
/// assert!(Arc::ptr_eq(mapper.plan_cache(), &plans));
/// ```
#[derive(Debug, Default)]
pub struct MapperBuilder {
    config: MapperConfig,
    converters: Option<ConverterRegistry>,
    resolver: Option<Arc<PropertyResolver>>,
    plans: Option<Arc<PlanCache>>,
}

impl MapperBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: MapperConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the [standard converters](ConverterRegistry::standard).
    pub fn converters(mut self, converters: ConverterRegistry) -> Self {
        self.converters = Some(converters);
        self
    }

    /// Shares an existing property cache. Its own naming options apply instead
    /// of [`MapperConfig::capitalize_second_upper`].
    pub fn property_resolver(mut self, resolver: Arc<PropertyResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Shares an existing plan cache.
    pub fn plan_cache(mut self, plans: Arc<PlanCache>) -> Self {
        self.plans = Some(plans);
        self
    }

    pub fn build(self) -> Mapper {
        let resolver = self.resolver.unwrap_or_else(|| {
            Arc::new(PropertyResolver::with_capitalized_second_upper(
                self.config.capitalize_second_upper,
            ))
        });
        Mapper {
            converters: self.converters.unwrap_or_else(ConverterRegistry::standard),
            resolver,
            plans: self.plans.unwrap_or_default(),
            config: self.config,
        }
    }
}
