//! Multi-layer configuration resolution
//!
//! [`Resolver::resolve`] orders the supplied layers once and runs six
//! independent passes over that view. Each pass is a pure function of the
//! layers and the resolver options, so resolving the same input twice yields
//! identical output.

mod environment;
mod mcp;
mod model;
mod permissions;
mod plugins;
mod sandbox;
mod toggle;

pub use environment::{EnvVariable, EnvironmentResolution, ShadowedValue};
pub use mcp::{McpResolution, McpServerResolved};
pub use model::ModelResolution;
pub use permissions::{
    Action, PermissionConflict, PermissionRedundancy, PermissionResolution, PermissionRule,
};
pub use plugins::{PluginInfo, PluginResolution};
pub use sandbox::SandboxResolution;
pub use toggle::{ToggleConflict, ToggleDeclaration};

use serde::Serialize;

use crate::error::Result;
use crate::layer::{ConfigLayer, OrderedLayers};
use crate::options::ResolverOptions;

/// The effective configuration and every finding recorded while merging
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub permissions: PermissionResolution,
    pub environment: EnvironmentResolution,
    pub mcp_servers: McpResolution,
    pub model: ModelResolution,
    pub sandbox: SandboxResolution,
    pub plugins: PluginResolution,
}

impl ResolvedConfig {
    /// Whether any pass recorded a conflict, redundancy, or shadowed variable.
    pub fn has_findings(&self) -> bool {
        !self.permissions.conflicts.is_empty()
            || !self.permissions.redundancies.is_empty()
            || !self.environment.shadows.is_empty()
            || !self.mcp_servers.conflicts.is_empty()
            || !self.plugins.conflicts.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Merges configuration layers into a [`ResolvedConfig`]
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    options: ResolverOptions,
}

impl Resolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve `layers`, supplied in any order.
    ///
    /// An empty slice is valid and produces the built-in defaults.
    pub fn resolve(&self, layers: &[ConfigLayer]) -> ResolvedConfig {
        let ordered = OrderedLayers::new(layers);
        tracing::debug!(layers = ordered.len(), "Resolving configuration");

        let resolved = ResolvedConfig {
            permissions: permissions::resolve_permissions(&ordered),
            environment: environment::resolve_environment(&ordered),
            mcp_servers: mcp::resolve_mcp_servers(&ordered),
            model: model::resolve_model(&ordered, &self.options.models),
            sandbox: sandbox::resolve_sandbox(&ordered, &self.options.sandbox),
            plugins: plugins::resolve_plugins(&ordered),
        };

        if resolved.has_findings() {
            tracing::info!(
                conflicts = resolved.permissions.conflicts.len()
                    + resolved.mcp_servers.conflicts.len()
                    + resolved.plugins.conflicts.len(),
                redundancies = resolved.permissions.redundancies.len(),
                shadows = resolved.environment.shadows.len(),
                "Resolution recorded findings"
            );
        }
        resolved
    }
}

/// Resolve `layers` with default options.
pub fn resolve(layers: &[ConfigLayer]) -> ResolvedConfig {
    Resolver::default().resolve(layers)
}
