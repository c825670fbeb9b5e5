//! Sandbox pass: four independent scalar overrides

use serde::Serialize;
use serde_json::Value;

use crate::layer::OrderedLayers;
use crate::merge::{OriginTracked, override_first_wins};
use crate::options::SandboxDefaults;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SandboxResolution {
    pub enabled: OriginTracked<bool>,
    pub auto_allow_bash_if_sandboxed: OriginTracked<bool>,
    pub excluded_commands: OriginTracked<Vec<String>>,
    /// The first layer's network object, verbatim
    pub network_config: OriginTracked<Option<Value>>,
}

pub(crate) fn resolve_sandbox(
    layers: &OrderedLayers<'_>,
    defaults: &SandboxDefaults,
) -> SandboxResolution {
    let resolution = SandboxResolution {
        enabled: override_first_wins(layers, defaults.enabled, |layer| {
            layer.as_settings()?.sandbox.enabled
        }),
        auto_allow_bash_if_sandboxed: override_first_wins(
            layers,
            defaults.auto_allow_bash_if_sandboxed,
            |layer| layer.as_settings()?.sandbox.auto_allow_bash_if_sandboxed,
        ),
        excluded_commands: override_first_wins(
            layers,
            defaults.excluded_commands.clone(),
            |layer| layer.as_settings()?.sandbox.excluded_commands.clone(),
        ),
        network_config: override_first_wins(layers, None, |layer| {
            layer.as_settings()?.sandbox.network.clone().map(Some)
        }),
    };
    tracing::debug!(
        enabled = resolution.enabled.value,
        origin = %resolution.enabled.origin,
        "Resolved sandbox"
    );
    resolution
}
