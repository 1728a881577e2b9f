//! Registration table tests.

use fieldmap::{Bean, FieldType, bean::BeanKind};

use crate::helpers::{Account, Attributes, Customer, Entity, Faulty, Unbuildable};

#[test]
fn test_properties_include_inherited_first() {
    let ty = Customer::bean_type();
    assert_eq!(ty.property_names(), vec!["id", "note", "name", "age", "joined"]);

    let declared: Vec<_> = ty.declared_properties().iter().map(|p| p.name()).collect();
    assert_eq!(declared, vec!["name", "age", "joined"]);

    assert_eq!(ty.parent(), Some(Entity::bean_type()));
    assert_eq!(ty.property("joined").map(|p| p.field_type()), Some(FieldType::Date));
}

#[test]
fn test_method_lookup_walks_parents() {
    let ty = Customer::bean_type();
    let method = ty.find_method("setNote", FieldType::Text).unwrap();
    assert_eq!(method.name(), "setNote");
    assert_eq!(method.param(), FieldType::Text);
    assert!(ty.find_method("setNote", FieldType::Int).is_none());
    assert!(ty.find_method("setName", FieldType::Text).is_none());
}

#[test]
fn test_read_only_property_metadata() {
    let email = Account::bean_type().property("email").unwrap();
    assert!(email.is_readable());
    assert!(!email.is_writable());
}

#[test]
fn test_instantiate() {
    let instance = Customer::bean_type().instantiate().unwrap();
    assert!(instance.downcast_ref::<Customer>().is_some());

    let err = Unbuildable::bean_type().instantiate().unwrap_err();
    assert!(err.is_instantiation_error());
    assert!(!Unbuildable::bean_type().has_constructor());

    let err = Faulty::bean_type().instantiate().unwrap_err();
    assert!(err.is_instantiation_error());
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn test_string_keyed_kind() {
    let ty = Attributes::bean_type();
    assert_eq!(ty.kind(), BeanKind::Map);
    assert!(ty.is_map());
    assert!(!Customer::bean_type().is_map());
    assert_eq!(ty.to_string(), "Attributes");
}
