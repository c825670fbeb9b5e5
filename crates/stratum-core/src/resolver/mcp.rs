//! MCP server pass
//!
//! Servers are declared by dedicated MCP files and by the `mcpServers`,
//! `enabledMcpjsonServers` and `disabledMcpjsonServers` fields of settings
//! files. All of them feed one keyed enable/disable merge.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::toggle::{ToggleConflict, ToggleDeclaration, toggle_conflict};
use crate::layer::{ConfigLayer, LayerContent, OrderedLayers};
use crate::merge::keyed_map_with_conflict;
use crate::scope::Scope;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McpServerResolved {
    pub name: String,
    pub enabled: bool,
    pub origin: String,
    pub scope: Scope,
    /// Launch configuration, `null` when only toggled and never declared
    pub config: Value,
    /// Declarations that lost to the settled state
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<ToggleDeclaration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McpResolution {
    pub servers: BTreeMap<String, McpServerResolved>,
    pub conflicts: Vec<ToggleConflict>,
}

impl McpResolution {
    pub fn enabled_servers(&self) -> impl Iterator<Item = &McpServerResolved> {
        self.servers.values().filter(|server| server.enabled)
    }
}

pub(crate) fn resolve_mcp_servers(layers: &OrderedLayers<'_>) -> McpResolution {
    let merged = keyed_map_with_conflict(layers, server_toggles);
    let configs = server_configs(layers);

    let servers: BTreeMap<String, McpServerResolved> = merged
        .entries
        .iter()
        .map(|(name, settled)| {
            let winner = settled.winner();
            let config = configs
                .get(name)
                .and_then(|declared| {
                    declared
                        .iter()
                        .find(|(origin, _)| *origin == winner.origin)
                        .or_else(|| declared.first())
                })
                .map(|(_, config)| config.clone())
                .unwrap_or(Value::Null);

            let server = McpServerResolved {
                name: name.clone(),
                enabled: settled.resolution,
                origin: winner.origin.clone(),
                scope: winner.scope,
                config,
                conflicts: settled.losers().map(ToggleDeclaration::from).collect(),
            };
            (name.clone(), server)
        })
        .collect();

    let conflicts: Vec<ToggleConflict> = merged
        .conflicts()
        .map(|settled| toggle_conflict("MCP server", settled))
        .collect();

    tracing::debug!(
        servers = servers.len(),
        conflicts = conflicts.len(),
        "Resolved MCP servers"
    );

    McpResolution { servers, conflicts }
}

fn server_toggles(layer: &ConfigLayer) -> Vec<(String, bool)> {
    match layer.content() {
        LayerContent::Mcp(file) => file
            .servers
            .iter()
            .map(|server| (server.name.clone(), server.enabled()))
            .collect(),
        LayerContent::Settings(settings) => {
            let inline = settings
                .mcp_servers
                .iter()
                .map(|(name, config)| (name.clone(), !is_disabled(config)));
            let enabled = settings
                .enabled_mcpjson_servers
                .iter()
                .map(|name| (name.clone(), true));
            let disabled = settings
                .disabled_mcpjson_servers
                .iter()
                .map(|name| (name.clone(), false));
            inline.chain(enabled).chain(disabled).collect()
        }
    }
}

fn is_disabled(config: &Value) -> bool {
    config
        .get("disabled")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Declared launch configurations per server, in canonical order.
fn server_configs(layers: &OrderedLayers<'_>) -> BTreeMap<String, Vec<(String, Value)>> {
    let mut configs: BTreeMap<String, Vec<(String, Value)>> = BTreeMap::new();
    for layer in layers.iter() {
        let declared: Vec<(String, Value)> = match layer.content() {
            LayerContent::Mcp(file) => file
                .servers
                .iter()
                .map(|server| (server.name.clone(), server.config()))
                .collect(),
            LayerContent::Settings(settings) => settings
                .mcp_servers
                .iter()
                .map(|(name, config)| (name.clone(), config.clone()))
                .collect(),
        };
        for (name, config) in declared {
            configs
                .entry(name)
                .or_default()
                .push((layer.origin().to_string(), config));
        }
    }
    configs
}
