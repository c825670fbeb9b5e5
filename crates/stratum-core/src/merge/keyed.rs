//! Keyed map merge with conflict detection
//!
//! Used for enable/disable maps (MCP servers, plugins). Same conflict rule as
//! the list strategy, but every key ends up in the output map.

use std::collections::BTreeMap;

use super::{Settled, Verdict, collect, settle};
use crate::layer::{ConfigLayer, OrderedLayers};

/// Outcome of [`keyed_map_with_conflict`]
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedMerge<V> {
    pub entries: BTreeMap<String, Settled<V>>,
}

impl<V: Verdict> KeyedMerge<V> {
    /// Settled entries with more than one distinct value, in key order.
    pub fn conflicts(&self) -> impl Iterator<Item = &Settled<V>> {
        self.entries.values().filter(|settled| settled.contested)
    }
}

pub fn keyed_map_with_conflict<V, F>(layers: &OrderedLayers<'_>, accessor: F) -> KeyedMerge<V>
where
    V: Verdict,
    F: Fn(&ConfigLayer) -> Vec<(String, V)>,
{
    let entries = settle(collect(layers, accessor))
        .into_iter()
        .map(|settled| (settled.key.clone(), settled))
        .collect();
    KeyedMerge { entries }
}
