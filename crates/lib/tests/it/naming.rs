//! Property tests for naming convention conversion.

use fieldmap::naming::{to_camel_case, to_underscore_name};
use proptest::prelude::*;

/// Lowercase underscore names: segments start with a letter, single separators.
fn arb_underscore_name() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[a-z][a-z0-9]{0,6}(_[a-z][a-z0-9]{0,6}){0,3}").unwrap()
}

/// camelCase names starting with a lowercase letter.
fn arb_camel_name() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[a-z][a-zA-Z0-9]{0,12}").unwrap()
}

proptest! {
    /// underscore -> camel -> underscore is the identity.
    #[test]
    fn underscore_round_trip(name in arb_underscore_name()) {
        prop_assert_eq!(to_underscore_name(&to_camel_case(&name)), name);
    }

    /// camel -> underscore -> camel is the identity.
    #[test]
    fn camel_round_trip(name in arb_camel_name()) {
        prop_assert_eq!(to_camel_case(&to_underscore_name(&name)), name);
    }

    /// camelCase output never contains a separator.
    #[test]
    fn camel_case_has_no_underscores(name in arb_underscore_name()) {
        prop_assert!(!to_camel_case(&name).contains('_'));
    }
}

#[test]
fn test_known_pairs() {
    for (underscore, camel) in [
        ("user_name", "userName"),
        ("created_at", "createdAt"),
        ("address_line2", "addressLine2"),
        ("id", "id"),
    ] {
        assert_eq!(to_camel_case(underscore), camel);
        assert_eq!(to_underscore_name(camel), underscore);
    }
}
