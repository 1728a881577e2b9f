//! Object diff tests.

use fieldmap::{FieldDifference, PropertyResolver, diff::diff};

use crate::helpers::{Customer, Entity, Player, Profile, User, new_mapper};

fn difference(field: &str, old: &str, new: &str) -> FieldDifference {
    FieldDifference {
        field_name: field.to_string(),
        old_value: old.to_string(),
        new_value: new.to_string(),
    }
}

#[test]
fn test_only_changed_fields_are_reported() {
    let mapper = new_mapper();
    let old = Customer {
        name: "A".to_string(),
        age: 5,
        ..Default::default()
    };
    let new = Customer {
        name: "B".to_string(),
        age: 5,
        ..Default::default()
    };

    let changes = mapper.diff(&old, &new).unwrap();
    assert_eq!(changes, vec![difference("name", "A", "B")]);
}

#[test]
fn test_inherited_fields_are_ignored() {
    let mapper = new_mapper();
    let old = Customer::default();
    let new = Customer {
        entity: Entity {
            id: 9,
            note: Some("changed".to_string()),
        },
        ..Default::default()
    };

    assert!(mapper.diff(&old, &new).unwrap().is_empty());
}

#[test]
fn test_null_new_values_are_skipped_and_null_old_values_are_empty() {
    let resolver = PropertyResolver::new();
    let old = Customer {
        joined: chrono::NaiveDate::from_ymd_opt(2022, 1, 1),
        ..Default::default()
    };
    let new = Customer::default();
    assert!(diff(&resolver, &old, &new).unwrap().is_empty());

    let changes = diff(&resolver, &new, &old).unwrap();
    assert_eq!(changes, vec![difference("joined", "", "2022-01-01")]);
}

#[test]
fn test_unchanged_nan_is_not_reported() {
    let mapper = new_mapper();
    let old = Player {
        name: Some("Ada".to_string()),
        score: f64::NAN,
        level: 1,
    };
    let new = Player {
        level: 2,
        ..old.clone()
    };

    let changes = mapper.diff(&old, &new).unwrap();
    assert_eq!(changes, vec![difference("level", "1", "2")]);

    let scored = Player {
        score: 1.5,
        ..old.clone()
    };
    let changes = mapper.diff(&scored, &old).unwrap();
    assert_eq!(changes, vec![difference("score", "1.5", "NaN")]);
}

#[test]
fn test_diff_across_types_by_property_name() {
    let mapper = new_mapper();
    let old = User {
        user_name: "Nia".to_string(),
        age: 30,
    };
    let new = Profile {
        name: "Nia".to_string(),
        score: "3.5".to_string(),
        level: 2.0,
    };

    // Profile's properties do not exist on User, so every one reads as null there
    let changes = mapper.diff(&old, &new).unwrap();
    assert_eq!(
        changes,
        vec![
            difference("name", "", "Nia"),
            difference("score", "", "3.5"),
            difference("level", "", "2.0"),
        ]
    );
}

#[test]
fn test_difference_serializes() {
    let json = serde_json::to_value(difference("name", "A", "B")).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "field_name": "name", "old_value": "A", "new_value": "B" })
    );
}
