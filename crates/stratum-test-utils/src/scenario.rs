//! Canned layer stacks.
//!
//! Each function returns layers in a deliberately scrambled order so callers
//! also exercise canonical ordering.

use serde_json::json;
use stratum_core::{ConfigLayer, Scope};

use crate::layer::{LayerBuilder, McpLayerBuilder};

/// One layer per scope, each touching every section.
pub fn full_stack() -> Vec<ConfigLayer> {
    vec![
        LayerBuilder::new(Scope::User)
            .allow("Bash")
            .allow("Bash(npm run *)")
            .env("NODE_ENV", "development")
            .env("EDITOR", "vim")
            .model("claude-opus-4-1")
            .plugin("formatter@tools", true)
            .build(),
        McpLayerBuilder::new(Scope::ProjectShared)
            .server("postgres", "pg-mcp", &["--read-only"])
            .server("github", "github-mcp", &[])
            .build(),
        LayerBuilder::new(Scope::Enterprise)
            .deny("Bash(curl *)")
            .disable_mcp("postgres")
            .network(json!({ "allowLocalBinding": false }))
            .build(),
        LayerBuilder::new(Scope::ProjectShared)
            .allow("Read(./src/**)")
            .deny("Bash(npm run *)")
            .env("NODE_ENV", "production")
            .enable_mcp("postgres")
            .enable_mcp("github")
            .sandbox_enabled(true)
            .build(),
        LayerBuilder::new(Scope::ProjectLocal)
            .env("NODE_ENV", "test")
            .plugin("formatter@tools", false)
            .build(),
    ]
}
