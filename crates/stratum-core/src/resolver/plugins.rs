//! Plugin pass: keyed enable/disable merge over `enabledPlugins`

use std::collections::BTreeMap;

use serde::Serialize;

use super::toggle::{ToggleConflict, toggle_conflict};
use crate::layer::{ConfigLayer, OrderedLayers};
use crate::merge::keyed_map_with_conflict;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginInfo {
    pub id: String,
    pub enabled: bool,
    /// Origin of the winning declaration
    pub source: String,
    /// Losing declarations, e.g. "enabled in ~/.claude/settings.json (user)"
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginResolution {
    pub plugins: BTreeMap<String, PluginInfo>,
    pub conflicts: Vec<ToggleConflict>,
}

pub(crate) fn resolve_plugins(layers: &OrderedLayers<'_>) -> PluginResolution {
    let merged = keyed_map_with_conflict(layers, plugin_toggles);

    let plugins: BTreeMap<String, PluginInfo> = merged
        .entries
        .iter()
        .map(|(id, settled)| {
            let info = PluginInfo {
                id: id.clone(),
                enabled: settled.resolution,
                source: settled.winner().origin.clone(),
                conflicts: settled
                    .losers()
                    .map(|decl| {
                        let state = if decl.value { "enabled" } else { "disabled" };
                        format!("{state} in {} ({})", decl.origin, decl.scope)
                    })
                    .collect(),
            };
            (id.clone(), info)
        })
        .collect();

    let conflicts: Vec<ToggleConflict> = merged
        .conflicts()
        .map(|settled| toggle_conflict("Plugin", settled))
        .collect();

    tracing::debug!(
        plugins = plugins.len(),
        conflicts = conflicts.len(),
        "Resolved plugins"
    );

    PluginResolution { plugins, conflicts }
}

fn plugin_toggles(layer: &ConfigLayer) -> Vec<(String, bool)> {
    layer
        .as_settings()
        .map(|settings| {
            settings
                .plugins
                .enabled_plugins
                .iter()
                .map(|(id, enabled)| (id.clone(), *enabled))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{PluginSettings, Settings};
    use crate::scope::Scope;

    fn plugins(scope: Scope, origin: &str, entries: &[(&str, bool)]) -> ConfigLayer {
        ConfigLayer::settings(
            scope,
            origin,
            Settings {
                plugins: PluginSettings {
                    enabled_plugins: entries
                        .iter()
                        .map(|(id, enabled)| (id.to_string(), *enabled))
                        .collect(),
                },
                ..Default::default()
            },
        )
    }

    #[test]
    fn project_local_disable_overrides_user_enable() {
        let layers = vec![
            plugins(Scope::User, "~/.claude/settings.json", &[("commit-helper@market", true)]),
            plugins(
                Scope::ProjectLocal,
                ".claude/settings.local.json",
                &[("commit-helper@market", false)],
            ),
        ];
        let resolved = resolve_plugins(&OrderedLayers::new(&layers));

        let info = &resolved.plugins["commit-helper@market"];
        assert!(!info.enabled);
        assert_eq!(info.source, ".claude/settings.local.json");
        assert_eq!(
            info.conflicts,
            vec!["enabled in ~/.claude/settings.json (user)".to_string()]
        );
        assert_eq!(resolved.conflicts.len(), 1);
        assert!(resolved.conflicts[0].explanation.contains("project-local"));
    }

    #[test]
    fn agreeing_layers_produce_no_conflict() {
        let layers = vec![
            plugins(Scope::User, "u", &[("fmt@market", true)]),
            plugins(Scope::ProjectShared, "p", &[("fmt@market", true)]),
        ];
        let resolved = resolve_plugins(&OrderedLayers::new(&layers));
        assert!(resolved.conflicts.is_empty());
        assert!(resolved.plugins["fmt@market"].conflicts.is_empty());
        assert_eq!(resolved.plugins["fmt@market"].source, "p");
    }
}
