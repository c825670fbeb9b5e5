//! Layer builders.

use serde_json::{Value, json};
use stratum_core::{ConfigLayer, McpFile, McpServerDecl, Scope, Settings};

/// Builds a settings layer one declaration at a time.
///
/// # Example
///
/// ```rust
/// use stratum_core::Scope;
/// use stratum_test_utils::LayerBuilder;
///
/// let layer = LayerBuilder::new(Scope::User)
///     .allow("Bash(git *)")
///     .env("EDITOR", "vim")
///     .build();
/// assert_eq!(layer.origin(), "~/.claude/settings.json");
/// ```
#[derive(Debug, Clone)]
pub struct LayerBuilder {
    scope: Scope,
    origin: String,
    settings: Settings,
}

impl LayerBuilder {
    /// Start an empty layer at the conventional settings path for `scope`.
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            origin: settings_path(scope).to_string(),
            settings: Settings::default(),
        }
    }

    pub fn origin(mut self, origin: &str) -> Self {
        self.origin = origin.to_string();
        self
    }

    pub fn allow(mut self, pattern: &str) -> Self {
        self.settings.permissions.allow.push(pattern.to_string());
        self
    }

    pub fn deny(mut self, pattern: &str) -> Self {
        self.settings.permissions.deny.push(pattern.to_string());
        self
    }

    pub fn ask(mut self, pattern: &str) -> Self {
        self.settings.permissions.ask.push(pattern.to_string());
        self
    }

    pub fn env(mut self, name: &str, value: &str) -> Self {
        self.settings.env.insert(name.to_string(), value.to_string());
        self
    }

    pub fn model(mut self, model: &str) -> Self {
        self.settings.model = Some(model.to_string());
        self
    }

    pub fn sandbox_enabled(mut self, enabled: bool) -> Self {
        self.settings.sandbox.enabled = Some(enabled);
        self
    }

    pub fn auto_allow_bash(mut self, allowed: bool) -> Self {
        self.settings.sandbox.auto_allow_bash_if_sandboxed = Some(allowed);
        self
    }

    pub fn excluded_commands(mut self, commands: &[&str]) -> Self {
        self.settings.sandbox.excluded_commands =
            Some(commands.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn network(mut self, network: Value) -> Self {
        self.settings.sandbox.network = Some(network);
        self
    }

    pub fn plugin(mut self, id: &str, enabled: bool) -> Self {
        self.settings
            .plugins
            .enabled_plugins
            .insert(id.to_string(), enabled);
        self
    }

    /// Declare an inline server in the settings file's `mcpServers` table.
    pub fn mcp_server(mut self, name: &str, command: &str) -> Self {
        self.settings
            .mcp_servers
            .insert(name.to_string(), json!({ "command": command }));
        self
    }

    /// Switch on a server declared in an MCP file.
    pub fn enable_mcp(mut self, name: &str) -> Self {
        self.settings.enabled_mcpjson_servers.push(name.to_string());
        self
    }

    /// Switch off a server declared in an MCP file.
    pub fn disable_mcp(mut self, name: &str) -> Self {
        self.settings.disabled_mcpjson_servers.push(name.to_string());
        self
    }

    pub fn build(self) -> ConfigLayer {
        ConfigLayer::settings(self.scope, self.origin, self.settings)
    }
}

/// Builds an MCP server file layer.
#[derive(Debug, Clone)]
pub struct McpLayerBuilder {
    scope: Scope,
    origin: String,
    servers: Vec<McpServerDecl>,
}

impl McpLayerBuilder {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            origin: mcp_path(scope).to_string(),
            servers: Vec::new(),
        }
    }

    pub fn origin(mut self, origin: &str) -> Self {
        self.origin = origin.to_string();
        self
    }

    pub fn server(mut self, name: &str, command: &str, args: &[&str]) -> Self {
        self.servers.push(McpServerDecl {
            name: name.to_string(),
            command: command.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        });
        self
    }

    pub fn disabled_server(mut self, name: &str, command: &str) -> Self {
        self.servers.push(McpServerDecl {
            name: name.to_string(),
            command: command.to_string(),
            disabled: Some(true),
            ..Default::default()
        });
        self
    }

    pub fn build(self) -> ConfigLayer {
        ConfigLayer::mcp(
            self.scope,
            self.origin,
            McpFile {
                servers: self.servers,
            },
        )
    }
}

/// Conventional settings file location for a scope.
pub fn settings_path(scope: Scope) -> &'static str {
    match scope {
        Scope::Enterprise => "/etc/claude-code/managed-settings.json",
        Scope::ProjectLocal => ".claude/settings.local.json",
        Scope::ProjectShared => ".claude/settings.json",
        Scope::User => "~/.claude/settings.json",
    }
}

/// Conventional MCP file location for a scope.
pub fn mcp_path(scope: Scope) -> &'static str {
    match scope {
        Scope::Enterprise => "/etc/claude-code/managed-mcp.json",
        Scope::ProjectLocal => ".mcp.local.json",
        Scope::ProjectShared => ".mcp.json",
        Scope::User => "~/.claude/mcp.json",
    }
}
