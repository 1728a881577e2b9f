//! Naming convention reconciliation.
//!
//! Field names arrive either as camelCase (`userName`) or underscore-separated
//! (`user_name`). The mapper tries a name verbatim first and only falls back to
//! these conversions when exact resolution fails.
//!
//! The two conversions are inverse to each other on their valid domains:
//! - lowercase underscore names whose segments each start with a letter
//!   (`user_name`, `address_line2`), with no leading, trailing or doubled underscore;
//! - camelCase names starting with a lowercase letter (`userName`, `userID`).
//!
//! ```
//! use fieldmap::naming::{to_camel_case, to_underscore_name};
//!
//! assert_eq!(to_camel_case("user_name"), "userName");
//! assert_eq!(to_underscore_name("userName"), "user_name");
//! assert_eq!(to_underscore_name(&to_camel_case("created_at")), "created_at");
//! ```

use crate::constants::SETTER_PREFIX;

/// Converts `word_word` into `wordWord`.
///
/// Names without an underscore are returned unchanged, so an already camelCase
/// name survives. Otherwise the name is lowercased and every letter following
/// an underscore is uppercased. Leading underscores are dropped.
pub fn to_camel_case(name: &str) -> String {
    if !name.contains('_') {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Converts `wordWord` into `word_word`.
///
/// Every uppercase letter after the first character becomes `_` followed by its
/// lowercase form. Consecutive capitals are split individually (`userID` becomes
/// `user_i_d`) so the conversion stays reversible.
pub fn to_underscore_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Uppercases the first character.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// True when the second character is uppercase (`xName`, `aB`).
pub fn has_upper_second(name: &str) -> bool {
    name.chars().nth(1).is_some_and(char::is_uppercase)
}

/// The conventional write-method name for a field: `set` + capitalized name.
pub fn setter_name(field: &str) -> String {
    format!("{SETTER_PREFIX}{}", capitalize(field))
}
