//! Runtime type information for mappable types.
//!
//! Rust has no runtime reflection, so every mappable type publishes a
//! registration table: a [`BeanType`] listing its properties (name, declared
//! [`FieldType`], read and write accessors), its single-argument methods, an
//! optional parent type and an optional default constructor. The table is
//! built once with [`BeanType::builder`] and handed out as a `&'static`
//! reference from [`Bean::bean_type`].
//!
//! ```
//! use std::sync::OnceLock;
//! use fieldmap::{Bean, BeanType, FieldType};
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
//! let ty = User::bean_type();
//! assert_eq!(ty.property("age").map(|p| p.field_type()), Some(FieldType::Int));
//! ```

mod builder;
pub mod errors;

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

pub use builder::BeanTypeBuilder;
pub use errors::BeanError;

use crate::{FieldType, Result, Value};

/// A boxed, type-erased bean instance.
pub type Instance = Box<dyn Any + Send + Sync>;

/// Type-erased read accessor.
pub type Getter = Arc<dyn Fn(&dyn Any) -> Result<Value> + Send + Sync>;

/// Type-erased write accessor, also used for single-argument methods.
pub type Setter = Arc<dyn Fn(&mut dyn Any, Value) -> Result<()> + Send + Sync>;

/// Type-erased default construction path.
pub type Constructor = Arc<dyn Fn() -> Result<Instance> + Send + Sync>;

/// Types that publish a registration table.
pub trait Bean: Any + Send + Sync + Sized {
    /// Returns the registration table for this type.
    fn bean_type() -> &'static BeanType;
}

/// The shape of a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeanKind {
    /// An ordinary type with a fixed set of properties
    Struct,
    /// A generic string-keyed mapping; never a valid mapping destination
    Map,
}

/// A property as registered on a type.
#[derive(Clone)]
pub struct PropertyDef {
    pub(crate) name: String,
    pub(crate) field_type: FieldType,
    pub(crate) getter: Option<Getter>,
    pub(crate) setter: Option<Setter>,
}

impl PropertyDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }
}

impl fmt::Debug for PropertyDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDef")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("readable", &self.is_readable())
            .field("writable", &self.is_writable())
            .finish()
    }
}

/// A single-argument method, such as a fluent `setName(value)`.
#[derive(Clone)]
pub struct MethodDef {
    pub(crate) name: String,
    pub(crate) param: FieldType,
    pub(crate) invoker: Setter,
}

impl MethodDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param(&self) -> FieldType {
        self.param
    }
}

impl fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDef")
            .field("name", &self.name)
            .field("param", &self.param)
            .finish()
    }
}

/// Registration table of a mappable type.
///
/// Inherited members are stored already adapted to this type: their accessors
/// project from the child object onto the embedded parent before invoking the
/// parent's accessor.
pub struct BeanType {
    name: &'static str,
    type_path: &'static str,
    type_id: TypeId,
    kind: BeanKind,
    parent: Option<&'static BeanType>,
    declared: Vec<PropertyDef>,
    inherited: Vec<PropertyDef>,
    declared_methods: Vec<MethodDef>,
    inherited_methods: Vec<MethodDef>,
    constructor: Option<Constructor>,
}

impl BeanType {
    /// Starts a registration table for `T`.
    pub fn builder<T: Any + Send + Sync>(name: &'static str) -> BeanTypeBuilder<T> {
        BeanTypeBuilder::new(name)
    }

    /// Short display name, e.g. `User`
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Full Rust type path, e.g. `my_app::model::User`
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// `TypeId` of the described type, not of `BeanType` itself
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn kind(&self) -> BeanKind {
        self.kind
    }

    /// Returns true for generic string-keyed mapping types
    pub fn is_map(&self) -> bool {
        self.kind == BeanKind::Map
    }

    pub fn parent(&self) -> Option<&'static BeanType> {
        self.parent
    }

    /// All properties, inherited ones first. A declared property shadows an
    /// inherited one of the same name.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDef> {
        self.inherited
            .iter()
            .filter(|p| !self.declared.iter().any(|d| d.name == p.name))
            .chain(self.declared.iter())
    }

    /// Properties declared directly on this type.
    pub fn declared_properties(&self) -> &[PropertyDef] {
        &self.declared
    }

    /// Looks up a property by exact name, including inherited ones.
    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.declared
            .iter()
            .find(|p| p.name == name)
            .or_else(|| self.inherited.iter().find(|p| p.name == name))
    }

    /// Names of all properties, including inherited ones.
    pub fn property_names(&self) -> Vec<String> {
        self.properties().map(|p| p.name.clone()).collect()
    }

    /// Finds a single-argument method by name and parameter type, searching
    /// this type first and then its ancestors.
    pub fn find_method(&self, name: &str, param: FieldType) -> Option<&MethodDef> {
        let matches = |m: &&MethodDef| m.name == name && m.param == param;
        self.declared_methods
            .iter()
            .find(matches)
            .or_else(|| self.inherited_methods.iter().find(matches))
    }

    /// Runs the default construction path.
    ///
    /// Fails with [`BeanError::NoConstructor`] when none was registered and with
    /// [`BeanError::InstantiationFailed`] when the constructor itself fails.
    pub fn instantiate(&self) -> Result<Instance> {
        let constructor = self.constructor.as_ref().ok_or_else(|| BeanError::NoConstructor {
            type_name: self.name.to_string(),
        })?;
        constructor()
    }

    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }
}

impl PartialEq for BeanType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for BeanType {}

impl fmt::Debug for BeanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanType")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("parent", &self.parent.map(|p| p.name))
            .field("properties", &self.property_names())
            .field("has_constructor", &self.has_constructor())
            .finish()
    }
}

impl fmt::Display for BeanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
