//! List merge with conflict detection
//!
//! Used for permission rules: every layer contributes `(pattern, action)`
//! entries, keyed by exact pattern text.

use super::{Declaration, Settled, Verdict, collect, settle};
use crate::layer::{ConfigLayer, OrderedLayers};

/// Outcome of [`list_with_conflict`]
#[derive(Debug, Clone, PartialEq)]
pub struct ListMerge<V> {
    /// One entry per key: the highest-precedence declaration of the settled value,
    /// in canonical order
    pub effective: Vec<Declaration<V>>,
    /// Keys declared with more than one distinct value
    pub conflicts: Vec<Settled<V>>,
}

impl<V: Verdict> ListMerge<V> {
    /// Effective entries carrying `value`.
    pub fn with_value(&self, value: V) -> Vec<Declaration<V>> {
        self.effective
            .iter()
            .filter(|decl| decl.value == value)
            .cloned()
            .collect()
    }
}

/// Flatten all layers' entries and resolve each key.
///
/// A key declared with a single value contributes normally. A contested key
/// contributes only its settled value; the losing declarations stay visible in
/// the conflict for display.
pub fn list_with_conflict<V, F>(layers: &OrderedLayers<'_>, accessor: F) -> ListMerge<V>
where
    V: Verdict,
    F: Fn(&ConfigLayer) -> Vec<(String, V)>,
{
    let mut effective = Vec::new();
    let mut conflicts = Vec::new();

    for settled in settle(collect(layers, accessor)) {
        effective.push(settled.winner().clone());
        if settled.contested {
            conflicts.push(settled);
        }
    }

    ListMerge {
        effective,
        conflicts,
    }
}
