//! Coercion tests through the public registry API.

use chrono::{NaiveDate, TimeZone, Utc};
use fieldmap::{ConverterRegistry, FieldType, Value, convert::parse_text};

#[test]
fn test_standard_registry_targets() {
    let registry = ConverterRegistry::standard();
    for target in [
        FieldType::Bool,
        FieldType::Int,
        FieldType::Float,
        FieldType::Text,
        FieldType::Date,
        FieldType::DateTime,
    ] {
        assert!(registry.contains(target), "missing converter for {target}");
    }
    assert!(!ConverterRegistry::new().contains(FieldType::Text));
}

#[test]
fn test_text_input_falls_back_to_parsing() {
    // The standard Int converter does not handle text, so parsing applies
    let registry = ConverterRegistry::standard();
    assert_eq!(registry.coerce(Value::from("30"), FieldType::Int), Value::Int(30));
    assert_eq!(registry.coerce(Value::from("off"), FieldType::Bool), Value::Bool(false));
    assert_eq!(
        registry.coerce(Value::from("2024-01-31"), FieldType::Date),
        Value::Date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
    );
}

#[test]
fn test_unparseable_text_passes_through() {
    let registry = ConverterRegistry::standard();
    assert_eq!(
        registry.coerce(Value::from("soon"), FieldType::DateTime),
        Value::from("soon")
    );
    assert_eq!(registry.coerce(Value::from("1.5x"), FieldType::Float), Value::from("1.5x"));
}

#[test]
fn test_custom_converter_replaces_standard() {
    let mut registry = ConverterRegistry::standard();
    registry.register(FieldType::Text, |value| match value {
        Value::Bool(b) => Some(Value::from(if *b { "Y" } else { "N" })),
        _ => None,
    });
    assert_eq!(registry.coerce(Value::Bool(true), FieldType::Text), Value::from("Y"));
    // Not handled by the replacement and not text: passes through
    assert_eq!(registry.coerce(Value::Int(5), FieldType::Text), Value::Int(5));

    assert!(registry.unregister(FieldType::Text).is_some());
    assert!(!registry.contains(FieldType::Text));
}

#[test]
fn test_datetime_round_trip_through_text() {
    let registry = ConverterRegistry::standard();
    let at = Utc.with_ymd_and_hms(2023, 11, 5, 8, 15, 30).unwrap();
    let text = registry.coerce(Value::DateTime(at), FieldType::Text);
    assert_eq!(text, Value::from("2023-11-05T08:15:30Z"));
    assert_eq!(registry.coerce(text, FieldType::DateTime), Value::DateTime(at));
    assert_eq!(
        parse_text("2023-11-05 08:15", FieldType::DateTime),
        Some(Value::DateTime(Utc.with_ymd_and_hms(2023, 11, 5, 8, 15, 0).unwrap()))
    );
}
