//! Layer merge strategies
//!
//! Three reusable algorithms, each a pure function of an [`OrderedLayers`]
//! view and a field accessor:
//!
//! - [`override_first_wins`] for scalar settings
//! - [`list_with_conflict`] for rule lists keyed by pattern
//! - [`keyed_map_with_conflict`] for enable/disable maps
//!
//! The list and map strategies share one conflict rule. Among declarations of
//! the same key, the value from the highest-precedence scope wins. When that
//! scope itself declares several values, the [`Verdict::intra_scope_rank`]
//! order breaks the tie.

mod first_wins;
mod keyed;
mod list;

pub use first_wins::override_first_wins;
pub use keyed::{KeyedMerge, keyed_map_with_conflict};
pub use list::{ListMerge, list_with_conflict};

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::layer::{ConfigLayer, OrderedLayers};
use crate::precedence::Precedence;
use crate::scope::{Scope, Scoped};

/// Origin reported for values no layer supplied.
pub const DEFAULT_ORIGIN: &str = "default";

/// A resolved value and the file it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OriginTracked<T> {
    pub value: T,
    pub origin: String,
}

impl<T> OriginTracked<T> {
    pub fn new(value: T, origin: impl Into<String>) -> Self {
        Self {
            value,
            origin: origin.into(),
        }
    }

    pub fn default_value(value: T) -> Self {
        Self::new(value, DEFAULT_ORIGIN)
    }

    /// Whether no layer supplied the value.
    pub fn is_default(&self) -> bool {
        self.origin == DEFAULT_ORIGIN
    }
}

/// A value that layers can disagree about
pub trait Verdict: Copy + Eq + fmt::Display {
    /// Tie-break when one scope declares several values for a key; lower wins.
    fn intra_scope_rank(self) -> u8;

    /// Word used for the value in explanations.
    fn label(self) -> &'static str;
}

impl Verdict for bool {
    /// Disabled beats enabled.
    fn intra_scope_rank(self) -> u8 {
        u8::from(self)
    }

    fn label(self) -> &'static str {
        if self { "enabled" } else { "disabled" }
    }
}

/// One layer's declaration of a key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration<V> {
    pub key: String,
    pub value: V,
    pub origin: String,
    pub scope: Scope,
}

impl<V> Scoped for Declaration<V> {
    fn scope(&self) -> Scope {
        self.scope
    }
}

/// All declarations of one key, in canonical order, with the settled value
#[derive(Debug, Clone, PartialEq)]
pub struct Settled<V> {
    pub key: String,
    pub declarations: Vec<Declaration<V>>,
    pub resolution: V,
    /// Index into `declarations` of the entry that supplies the resolution
    pub winner: usize,
    /// More than one distinct value was declared
    pub contested: bool,
    /// The top scope disagreed with itself
    pub intra_scope: bool,
}

impl<V: Verdict> Settled<V> {
    pub fn winner(&self) -> &Declaration<V> {
        &self.declarations[self.winner]
    }

    /// Distinct origins declaring the key at the winning scope, in canonical order.
    ///
    /// More than one origin means several files of that scope disagree rather
    /// than one file contradicting itself.
    pub fn top_scope_origins(&self) -> Vec<&str> {
        let top = self.winner().scope;
        let mut origins: Vec<&str> = Vec::new();
        for decl in self.declarations.iter().filter(|decl| decl.scope == top) {
            if !origins.contains(&decl.origin.as_str()) {
                origins.push(&decl.origin);
            }
        }
        origins
    }

    /// Declarations whose value lost to the resolution.
    pub fn losers(&self) -> impl Iterator<Item = &Declaration<V>> {
        let resolution = self.resolution;
        self.declarations
            .iter()
            .filter(move |decl| decl.value != resolution)
    }
}

/// Flatten every layer's declarations in canonical order.
pub(crate) fn collect<V, F>(layers: &OrderedLayers<'_>, accessor: F) -> Vec<Declaration<V>>
where
    F: Fn(&ConfigLayer) -> Vec<(String, V)>,
{
    let mut declarations = Vec::new();
    for layer in layers.iter() {
        let entries = accessor(layer);
        tracing::trace!(
            scope = %layer.scope(),
            origin = %layer.origin(),
            count = entries.len(),
            "Collected declarations"
        );
        declarations.extend(entries.into_iter().map(|(key, value)| Declaration {
            key,
            value,
            origin: layer.origin().to_string(),
            scope: layer.scope(),
        }));
    }
    declarations
}

/// Group declarations by key in first-seen order and settle each group.
pub(crate) fn settle<V: Verdict>(declarations: Vec<Declaration<V>>) -> Vec<Settled<V>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<Vec<Declaration<V>>> = Vec::new();

    for decl in declarations {
        match index.get(&decl.key) {
            Some(&slot) => buckets[slot].push(decl),
            None => {
                index.insert(decl.key.clone(), buckets.len());
                buckets.push(vec![decl]);
            }
        }
    }

    buckets.into_iter().filter_map(settle_group).collect()
}

fn settle_group<V: Verdict>(declarations: Vec<Declaration<V>>) -> Option<Settled<V>> {
    let top = Precedence::pick_highest(&declarations)?;
    let key = top.key.clone();
    let top_scope = top.scope;
    let top_value = top.value;
    let top_rank = Precedence::rank(top_scope);

    let first_value = declarations[0].value;
    let contested = declarations.iter().any(|decl| decl.value != first_value);

    let top_values: Vec<V> = declarations
        .iter()
        .filter(|decl| Precedence::rank(decl.scope) == top_rank)
        .map(|decl| decl.value)
        .collect();
    let intra_scope = top_values.iter().any(|value| *value != top_values[0]);

    let resolution = if intra_scope {
        let chosen = top_values
            .iter()
            .copied()
            .min_by_key(|value| value.intra_scope_rank())
            .unwrap_or(top_value);
        tracing::warn!(
            key = %key,
            scope = %top_scope,
            resolution = %chosen,
            "Scope declares contradictory values for the same key"
        );
        chosen
    } else {
        top_value
    };

    let winner = declarations
        .iter()
        .position(|decl| Precedence::rank(decl.scope) == top_rank && decl.value == resolution)
        .unwrap_or(0);

    Some(Settled {
        key,
        declarations,
        resolution,
        winner,
        contested,
        intra_scope,
    })
}

/// "allow in a (project-shared), deny in b (project-local)"
pub(crate) fn describe<V: Verdict>(declarations: &[Declaration<V>]) -> String {
    declarations
        .iter()
        .map(|decl| format!("{} in {} ({})", decl.value.label(), decl.origin, decl.scope))
        .collect::<Vec<_>>()
        .join(", ")
}
