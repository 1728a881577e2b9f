//! Mapping plans and their cache.

use std::any::TypeId;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use crate::resolver::PropertyDescriptor;

/// Caller-supplied field renames, `source field -> destination field`.
///
/// Explicit pairs take precedence over automatic name resolution and are part
/// of the plan cache key, so two calls with different overrides never share a
/// plan.
///
/// ```
/// # use fieldmap::ExplicitMapping;
/// let explicit = ExplicitMapping::new()
///     .field("login", "userName")
///     .field("years", "age");
/// assert_eq!(explicit.dest_for("login"), Some("userName"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ExplicitMapping {
    fields: BTreeMap<String, String>,
}

impl ExplicitMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `source` onto `dest`, replacing an earlier pair for `source`.
    pub fn field(mut self, source: impl Into<String>, dest: impl Into<String>) -> Self {
        self.fields.insert(source.into(), dest.into());
        self
    }

    pub fn dest_for(&self, source: &str) -> Option<&str> {
        self.fields.get(source).map(String::as_str)
    }

    pub fn contains(&self, source: &str) -> bool {
        self.fields.contains_key(source)
    }

    /// Pairs sorted by source field name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(s, d)| (s.as_str(), d.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<S: Into<String>, D: Into<String>> FromIterator<(S, D)> for ExplicitMapping {
    fn from_iter<I: IntoIterator<Item = (S, D)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(s, d)| (s.into(), d.into())).collect(),
        }
    }
}

/// One planned assignment.
#[derive(Debug, Clone)]
pub struct FieldPair {
    pub(crate) source_field: String,
    pub(crate) source: Option<Arc<PropertyDescriptor>>,
    pub(crate) dest: Arc<PropertyDescriptor>,
}

impl FieldPair {
    /// Name of the field read from the source
    pub fn source_field(&self) -> &str {
        &self.source_field
    }

    /// Name of the destination property written
    pub fn dest_field(&self) -> &str {
        self.dest.name()
    }

    pub fn dest(&self) -> &PropertyDescriptor {
        &self.dest
    }
}

/// The resolved field pairs for one (source shape, destination type,
/// explicit mapping, naming option) combination. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct MappingPlan {
    pub(crate) pairs: Vec<FieldPair>,
}

impl MappingPlan {
    pub fn pairs(&self) -> &[FieldPair] {
        &self.pairs
    }

    /// The planned `(source field, destination field)` names, sorted.
    pub fn field_names(&self) -> Vec<(&str, &str)> {
        let mut names: Vec<_> = self
            .pairs
            .iter()
            .map(|p| (p.source_field(), p.dest_field()))
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// What a source looks like to the planner.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Shape {
    Type(TypeId),
    /// Sorted key set of a map source
    Keys(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct PlanKey {
    pub(crate) shape: Shape,
    pub(crate) dest: TypeId,
    pub(crate) explicit: ExplicitMapping,
    /// Naming option of the resolver that built the plan
    pub(crate) capitalize_second_upper: bool,
}

/// Process-lifetime store of mapping plans.
///
/// Plans are never evicted. Concurrent misses on one key may build the plan
/// twice; the first stored plan is kept and returned to both callers.
#[derive(Debug, Default)]
pub struct PlanCache {
    plans: RwLock<HashMap<PlanKey, Arc<MappingPlan>>>,
}

impl PlanCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get(&self, key: &PlanKey) -> Option<Arc<MappingPlan>> {
        let plans = self.plans.read().unwrap_or_else(PoisonError::into_inner);
        plans.get(key).cloned()
    }

    pub(crate) fn insert(&self, key: PlanKey, plan: MappingPlan) -> Arc<MappingPlan> {
        let mut plans = self.plans.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(plans.entry(key).or_insert_with(|| Arc::new(plan)))
    }

    /// Number of cached plans.
    pub fn len(&self) -> usize {
        self.plans.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached plan.
    pub fn clear(&self) {
        self.plans.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
