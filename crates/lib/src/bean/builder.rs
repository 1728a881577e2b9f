//! Typed construction of [`BeanType`] registration tables.

use std::any::{Any, TypeId};
use std::convert::Infallible;
use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;

use super::{
    Bean, BeanError, BeanKind, BeanType, Constructor, Getter, Instance, MethodDef, PropertyDef,
    Setter,
};
use crate::{Field, Result, Value};

fn downcast_ref<T: Any>(obj: &dyn Any) -> Result<&T> {
    obj.downcast_ref::<T>().ok_or_else(|| {
        BeanError::AccessorTypeMismatch {
            type_name: std::any::type_name::<T>().to_string(),
        }
        .into()
    })
}

fn downcast_mut<T: Any>(obj: &mut dyn Any) -> Result<&mut T> {
    obj.downcast_mut::<T>().ok_or_else(|| {
        BeanError::AccessorTypeMismatch {
            type_name: std::any::type_name::<T>().to_string(),
        }
        .into()
    })
}

fn typed_getter<T, F, G>(get: G) -> Getter
where
    T: Any,
    F: Field,
    G: Fn(&T) -> F + Send + Sync + 'static,
{
    Arc::new(move |obj: &dyn Any| -> Result<Value> {
        Ok(get(downcast_ref::<T>(obj)?).into())
    })
}

fn typed_setter<T, F, S>(set: S) -> Setter
where
    T: Any,
    F: Field,
    S: Fn(&mut T, F) + Send + Sync + 'static,
{
    Arc::new(move |obj: &mut dyn Any, value: Value| -> Result<()> {
        let target = downcast_mut::<T>(obj)?;
        set(target, F::from_value(value)?);
        Ok(())
    })
}

/// Builder for a [`BeanType`] describing `T`.
///
/// Property types are inferred from the accessor closures through [`Field`].
pub struct BeanTypeBuilder<T> {
    name: &'static str,
    kind: BeanKind,
    parent: Option<&'static BeanType>,
    declared: Vec<PropertyDef>,
    inherited: Vec<PropertyDef>,
    declared_methods: Vec<MethodDef>,
    inherited_methods: Vec<MethodDef>,
    constructor: Option<Constructor>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> BeanTypeBuilder<T> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            kind: BeanKind::Struct,
            parent: None,
            declared: Vec::new(),
            inherited: Vec::new(),
            declared_methods: Vec::new(),
            inherited_methods: Vec::new(),
            constructor: None,
            _marker: PhantomData,
        }
    }

    /// Registers a readable and writable property.
    pub fn property<F, G, S>(mut self, name: impl Into<String>, get: G, set: S) -> Self
    where
        F: Field,
        G: Fn(&T) -> F + Send + Sync + 'static,
        S: Fn(&mut T, F) + Send + Sync + 'static,
    {
        self.declared.push(PropertyDef {
            name: name.into(),
            field_type: F::field_type(),
            getter: Some(typed_getter(get)),
            setter: Some(typed_setter(set)),
        });
        self
    }

    /// Registers a property whose metadata carries no write accessor.
    ///
    /// Pair it with a [`method`](Self::method) named `set<Name>` to model a
    /// fluent setter that the property metadata does not expose.
    pub fn read_only<F, G>(mut self, name: impl Into<String>, get: G) -> Self
    where
        F: Field,
        G: Fn(&T) -> F + Send + Sync + 'static,
    {
        self.declared.push(PropertyDef {
            name: name.into(),
            field_type: F::field_type(),
            getter: Some(typed_getter(get)),
            setter: None,
        });
        self
    }

    /// Registers a single-argument method.
    pub fn method<F, S>(mut self, name: impl Into<String>, invoke: S) -> Self
    where
        F: Field,
        S: Fn(&mut T, F) + Send + Sync + 'static,
    {
        self.declared_methods.push(MethodDef {
            name: name.into(),
            param: F::field_type(),
            invoker: typed_setter(invoke),
        });
        self
    }

    /// Inherits every property and method of `P`, which `T` embeds.
    ///
    /// `base` and `base_mut` project a `T` onto its embedded parent; inherited
    /// accessors go through them.
    pub fn extends<P: Bean>(mut self, base: fn(&T) -> &P, base_mut: fn(&mut T) -> &mut P) -> Self {
        let parent = P::bean_type();
        self.inherited = parent
            .properties()
            .map(|p| PropertyDef {
                name: p.name.clone(),
                field_type: p.field_type,
                getter: p.getter.clone().map(|get| -> Getter {
                    Arc::new(move |obj: &dyn Any| -> Result<Value> {
                        get(base(downcast_ref::<T>(obj)?) as &dyn Any)
                    })
                }),
                setter: p.setter.clone().map(|set| project_setter(set, base_mut)),
            })
            .collect();
        self.inherited_methods = parent
            .declared_methods
            .iter()
            .chain(parent.inherited_methods.iter())
            .map(|m| MethodDef {
                name: m.name.clone(),
                param: m.param,
                invoker: project_setter(m.invoker.clone(), base_mut),
            })
            .collect();
        self.parent = Some(parent);
        self
    }

    /// Registers a fallible construction path.
    pub fn constructor<E, C>(mut self, construct: C) -> Self
    where
        E: Display,
        C: Fn() -> std::result::Result<T, E> + Send + Sync + 'static,
    {
        let type_name = self.name;
        self.constructor = Some(Arc::new(move || -> Result<Instance> {
            match construct() {
                Ok(value) => Ok(Box::new(value) as Instance),
                Err(e) => Err(BeanError::InstantiationFailed {
                    type_name: type_name.to_string(),
                    reason: e.to_string(),
                }
                .into()),
            }
        }));
        self
    }

    /// Registers [`Default::default`] as the construction path.
    pub fn default_constructor(self) -> Self
    where
        T: Default,
    {
        self.constructor(|| Ok::<T, Infallible>(T::default()))
    }

    /// Declares `T` a generic string-keyed mapping type.
    pub fn string_keyed(mut self) -> Self {
        self.kind = BeanKind::Map;
        self
    }

    pub fn build(self) -> BeanType {
        BeanType {
            name: self.name,
            type_path: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            kind: self.kind,
            parent: self.parent,
            declared: self.declared,
            inherited: self.inherited,
            declared_methods: self.declared_methods,
            inherited_methods: self.inherited_methods,
            constructor: self.constructor,
        }
    }
}

fn project_setter<T: Any, P: Any>(set: Setter, base_mut: fn(&mut T) -> &mut P) -> Setter {
    Arc::new(move |obj: &mut dyn Any, value: Value| -> Result<()> {
        let target = downcast_mut::<T>(obj)?;
        set(base_mut(target) as &mut dyn Any, value)
    })
}
