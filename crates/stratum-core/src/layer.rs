//! Configuration layers
//!
//! A [`ConfigLayer`] is one parsed source file pinned to a [`Scope`] and tagged
//! with its origin path. Layers are produced by discovery and parsing code
//! outside this crate and are never mutated here.
//!
//! A missing file is simply not passed in. A file that exists but declares
//! nothing is an empty layer. The merge strategies treat both the same.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{Error, Result};
use crate::precedence::Precedence;
use crate::scope::{Scope, Scoped};

/// Permission rule lists of a settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionSettings {
    pub allow: Vec<String>,
    pub deny: Vec<String>,
    pub ask: Vec<String>,
}

/// Sandbox section of a settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SandboxSettings {
    pub enabled: Option<bool>,
    pub auto_allow_bash_if_sandboxed: Option<bool>,
    pub excluded_commands: Option<Vec<String>>,
    /// Kept verbatim; never deep-merged across layers.
    pub network: Option<Value>,
}

/// Plugin section of a settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginSettings {
    pub enabled_plugins: BTreeMap<String, bool>,
}

/// A parsed settings file
///
/// Unknown keys are ignored. Every field defaults to empty so a settings file
/// with no content behaves exactly like an absent one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub permissions: PermissionSettings,
    pub env: BTreeMap<String, String>,
    pub sandbox: SandboxSettings,
    pub plugins: PluginSettings,
    pub model: Option<String>,

    /// Inline server declarations; each is enabled unless it sets `"disabled": true`
    pub mcp_servers: BTreeMap<String, Value>,

    /// Servers declared in an MCP file that this layer switches on
    pub enabled_mcpjson_servers: Vec<String>,

    /// Servers declared in an MCP file that this layer switches off
    pub disabled_mcpjson_servers: Vec<String>,
}

/// One server entry of an MCP file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McpServerDecl {
    pub name: String,
    pub command: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub disabled: Option<bool>,
}

impl McpServerDecl {
    pub fn enabled(&self) -> bool {
        !self.disabled.unwrap_or(false)
    }

    /// Launch configuration as reported in the resolved output.
    pub fn config(&self) -> Value {
        json!({
            "command": self.command,
            "args": self.args,
            "env": self.env,
        })
    }
}

/// A parsed MCP server file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McpFile {
    pub servers: Vec<McpServerDecl>,
}

/// What a layer was parsed from
#[derive(Debug, Clone, PartialEq)]
pub enum LayerContent {
    Settings(Settings),
    Mcp(McpFile),
}

/// An immutable, parsed configuration snapshot at one scope
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigLayer {
    scope: Scope,
    origin: String,
    content: LayerContent,
}

impl ConfigLayer {
    pub fn new(scope: Scope, origin: impl Into<String>, content: LayerContent) -> Self {
        Self {
            scope,
            origin: origin.into(),
            content,
        }
    }

    pub fn settings(scope: Scope, origin: impl Into<String>, settings: Settings) -> Self {
        Self::new(scope, origin, LayerContent::Settings(settings))
    }

    pub fn mcp(scope: Scope, origin: impl Into<String>, file: McpFile) -> Self {
        Self::new(scope, origin, LayerContent::Mcp(file))
    }

    /// Build a layer from a scope name, failing on names outside the precedence table.
    pub fn from_scope_name(
        scope: &str,
        origin: impl Into<String>,
        content: LayerContent,
    ) -> Result<Self> {
        let scope: Scope = scope.parse().inspect_err(|e| {
            tracing::error!("{}", e);
        })?;
        Ok(Self::new(scope, origin, content))
    }

    /// Parse a settings document.
    ///
    /// # Example
    ///
    /// ```
    /// use stratum_core::{ConfigLayer, Scope};
    ///
    /// let layer = ConfigLayer::settings_from_json(
    ///     Scope::User,
    ///     "~/.claude/settings.json",
    ///     r#"{ "permissions": { "allow": ["Bash(git *)"] } }"#,
    /// ).unwrap();
    ///
    /// assert_eq!(layer.as_settings().unwrap().permissions.allow, vec!["Bash(git *)"]);
    /// ```
    pub fn settings_from_json(scope: Scope, origin: impl Into<String>, json: &str) -> Result<Self> {
        let origin = origin.into();
        let settings = parse_document(&origin, json)?;
        Ok(Self::settings(scope, origin, settings))
    }

    /// Parse an MCP server document.
    pub fn mcp_from_json(scope: Scope, origin: impl Into<String>, json: &str) -> Result<Self> {
        let origin = origin.into();
        let file = parse_document(&origin, json)?;
        Ok(Self::mcp(scope, origin, file))
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn content(&self) -> &LayerContent {
        &self.content
    }

    pub fn as_settings(&self) -> Option<&Settings> {
        match &self.content {
            LayerContent::Settings(settings) => Some(settings),
            LayerContent::Mcp(_) => None,
        }
    }

    pub fn as_mcp(&self) -> Option<&McpFile> {
        match &self.content {
            LayerContent::Mcp(file) => Some(file),
            LayerContent::Settings(_) => None,
        }
    }
}

impl Scoped for ConfigLayer {
    fn scope(&self) -> Scope {
        self.scope
    }
}

fn parse_document<T: serde::de::DeserializeOwned>(origin: &str, json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| Error::InvalidLayer {
        origin: origin.to_string(),
        message: e.to_string(),
    })
}

/// Layers in canonical traversal order
///
/// Sorted by precedence rank; layers sharing a scope keep the order they were
/// supplied in. Every resolver pass walks this one view, which is what makes
/// conflict and redundancy reports deterministic.
#[derive(Debug, Clone)]
pub struct OrderedLayers<'a> {
    layers: Vec<&'a ConfigLayer>,
}

impl<'a> OrderedLayers<'a> {
    pub fn new(layers: impl IntoIterator<Item = &'a ConfigLayer>) -> Self {
        let mut layers: Vec<&ConfigLayer> = layers.into_iter().collect();
        layers.sort_by_key(|layer| Precedence::rank(layer.scope()));
        Self { layers }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ConfigLayer> + '_ {
        self.layers.iter().copied()
    }

    /// Settings layers paired with their parsed content.
    pub fn settings(&self) -> impl Iterator<Item = (&'a ConfigLayer, &'a Settings)> + '_ {
        self.iter()
            .filter_map(|layer| layer.as_settings().map(|settings| (layer, settings)))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
