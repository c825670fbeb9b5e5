//! Environment pass: highest layer wins, lower definitions are kept as shadows

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::Serialize;

use crate::layer::OrderedLayers;
use crate::scope::Scope;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowedValue {
    pub value: String,
    pub origin: String,
    pub scope: Scope,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVariable {
    pub name: String,
    pub value: String,
    pub origin: String,
    pub scope: Scope,
    /// Lower-precedence definitions hidden by `value`, highest first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shadowed_values: Vec<ShadowedValue>,
}

impl EnvVariable {
    pub fn is_shadowing(&self) -> bool {
        !self.shadowed_values.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentResolution {
    pub effective: BTreeMap<String, EnvVariable>,
    /// Variables defined by two or more layers, by name
    pub shadows: Vec<EnvVariable>,
}

pub(crate) fn resolve_environment(layers: &OrderedLayers<'_>) -> EnvironmentResolution {
    let mut effective: BTreeMap<String, EnvVariable> = BTreeMap::new();

    for (layer, settings) in layers.settings() {
        for (name, value) in &settings.env {
            match effective.entry(name.clone()) {
                Entry::Occupied(mut existing) => {
                    existing.get_mut().shadowed_values.push(ShadowedValue {
                        value: value.clone(),
                        origin: layer.origin().to_string(),
                        scope: layer.scope(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(EnvVariable {
                        name: name.clone(),
                        value: value.clone(),
                        origin: layer.origin().to_string(),
                        scope: layer.scope(),
                        shadowed_values: Vec::new(),
                    });
                }
            }
        }
    }

    let shadows: Vec<EnvVariable> = effective
        .values()
        .filter(|var| var.is_shadowing())
        .cloned()
        .collect();

    tracing::debug!(
        variables = effective.len(),
        shadows = shadows.len(),
        "Resolved environment"
    );

    EnvironmentResolution { effective, shadows }
}
