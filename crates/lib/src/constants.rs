//! Constants used throughout the fieldmap library.
//!
//! This module provides central definitions for naming conventions and the
//! textual formats accepted when parsing text into typed values.

/// Prefix of conventional write methods (`setName`).
pub const SETTER_PREFIX: &str = "set";

/// Date format accepted when parsing text into [`FieldType::Date`](crate::FieldType::Date).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Naive date-time formats tried, in order, after RFC 3339 when parsing text into
/// [`FieldType::DateTime`](crate::FieldType::DateTime). Parsed values are taken as UTC.
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Text values accepted as `true` when parsing booleans (case-insensitive).
pub const TRUE_WORDS: &[&str] = &["true", "yes", "y", "on", "1"];

/// Text values accepted as `false` when parsing booleans (case-insensitive).
pub const FALSE_WORDS: &[&str] = &["false", "no", "n", "off", "0"];
