//! Field-level comparison of two objects.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{Bean, Result, Value, resolver::PropertyResolver};

/// One changed field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDifference {
    pub field_name: String,
    /// Previous value as text, empty when it was null
    pub old_value: String,
    pub new_value: String,
}

/// Compares the fields declared directly on `N` (inherited ones are ignored).
///
/// A field is reported when its value on `new` is non-null and differs from the
/// value of the same-named property on `old`. Null fields on `new` are never
/// reported, and a property missing from `O` reads as null. Entries follow the
/// declaration order of `N`.
pub fn diff<O: Bean, N: Bean>(
    resolver: &PropertyResolver,
    old: &O,
    new: &N,
) -> Result<Vec<FieldDifference>> {
    let old_ty = O::bean_type();
    let new_ty = N::bean_type();
    let mut differences = Vec::new();

    for property in new_ty.declared_properties() {
        let Some(new_prop) = resolver.resolve(new_ty, property.name()) else {
            continue;
        };
        let new_value = new_prop.read(new)?;
        if new_value.is_null() {
            continue;
        }

        let old_value = match resolver.resolve(old_ty, property.name()) {
            Some(old_prop) => old_prop.read(old)?,
            None => Value::Null,
        };
        if old_value == new_value {
            continue;
        }

        trace!(field = property.name(), "Field changed");
        differences.push(FieldDifference {
            field_name: property.name().to_string(),
            old_value: if old_value.is_null() {
                String::new()
            } else {
                old_value.to_string()
            },
            new_value: new_value.to_string(),
        });
    }

    Ok(differences)
}
