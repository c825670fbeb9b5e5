//! Model pass: five independent scalar overrides

use serde::Serialize;

use crate::layer::{ConfigLayer, OrderedLayers};
use crate::merge::{OriginTracked, override_first_wins};
use crate::options::ModelDefaults;

const MODEL_ENV: &str = "ANTHROPIC_MODEL";
const SONNET_ENV: &str = "ANTHROPIC_DEFAULT_SONNET_MODEL";
const HAIKU_ENV: &str = "ANTHROPIC_DEFAULT_HAIKU_MODEL";
const OPUS_ENV: &str = "ANTHROPIC_DEFAULT_OPUS_MODEL";
const SUBAGENT_ENV: &str = "CLAUDE_CODE_SUBAGENT_MODEL";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelResolution {
    pub effective_model: OriginTracked<String>,
    pub sonnet: OriginTracked<String>,
    pub haiku: OriginTracked<String>,
    pub opus: OriginTracked<String>,
    pub subagent: OriginTracked<String>,
}

pub(crate) fn resolve_model(
    layers: &OrderedLayers<'_>,
    defaults: &ModelDefaults,
) -> ModelResolution {
    let resolution = ModelResolution {
        effective_model: override_first_wins(layers, defaults.default.clone(), selected_model),
        sonnet: env_override(layers, SONNET_ENV, &defaults.sonnet),
        haiku: env_override(layers, HAIKU_ENV, &defaults.haiku),
        opus: env_override(layers, OPUS_ENV, &defaults.opus),
        subagent: env_override(layers, SUBAGENT_ENV, &defaults.subagent),
    };
    tracing::debug!(
        model = %resolution.effective_model.value,
        origin = %resolution.effective_model.origin,
        "Resolved model"
    );
    resolution
}

/// `model` wins over `ANTHROPIC_MODEL` within the same layer.
fn selected_model(layer: &ConfigLayer) -> Option<String> {
    let settings = layer.as_settings()?;
    settings
        .model
        .as_deref()
        .filter(|model| !model.trim().is_empty())
        .or_else(|| non_empty(settings.env.get(MODEL_ENV)))
        .map(str::to_string)
}

fn env_override(layers: &OrderedLayers<'_>, key: &str, default: &str) -> OriginTracked<String> {
    override_first_wins(layers, default.to_string(), |layer| {
        let settings = layer.as_settings()?;
        non_empty(settings.env.get(key)).map(str::to_string)
    })
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}
