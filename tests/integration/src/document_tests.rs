//! Resolution starting from raw JSON documents

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;
use stratum_core::{ConfigLayer, Error, LayerContent, Scope, Settings, resolve};

fn settings(scope: Scope, origin: &str, json: &str) -> ConfigLayer {
    ConfigLayer::settings_from_json(scope, origin, json).unwrap()
}

#[test]
fn test_settings_and_mcp_documents_resolve_together() {
    let layers = vec![
        settings(
            Scope::Enterprise,
            "/etc/claude-code/managed-settings.json",
            r#"{
                "permissions": { "deny": ["WebFetch"] },
                "disabledMcpjsonServers": ["filesystem"]
            }"#,
        ),
        ConfigLayer::mcp_from_json(
            Scope::ProjectShared,
            ".mcp.json",
            r#"{ "servers": [
                { "name": "filesystem", "command": "fs-mcp", "args": ["."] },
                { "name": "github", "command": "gh-mcp" }
            ] }"#,
        )
        .unwrap(),
        settings(
            Scope::User,
            "~/.claude/settings.json",
            r#"{
                "permissions": { "allow": ["WebFetch", "mcp__github"] },
                "env": { "ANTHROPIC_DEFAULT_HAIKU_MODEL": "claude-3-5-haiku" },
                "sandbox": {
                    "enabled": true,
                    "network": { "allowLocalBinding": true }
                },
                "plugins": { "enabledPlugins": { "reviewer@market": true } }
            }"#,
        ),
    ];
    let resolved = resolve(&layers);

    assert_eq!(resolved.permissions.conflicts.len(), 1);
    assert_eq!(resolved.permissions.conflicts[0].pattern, "WebFetch");
    let enabled: Vec<&str> = resolved
        .mcp_servers
        .enabled_servers()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(enabled, vec!["github"]);
    assert_eq!(resolved.model.haiku.value, "claude-3-5-haiku");
    assert_eq!(resolved.model.haiku.origin, "~/.claude/settings.json");
    assert_eq!(
        resolved.sandbox.network_config.value,
        Some(serde_json::json!({ "allowLocalBinding": true }))
    );
    assert!(resolved.plugins.plugins["reviewer@market"].enabled);
}

#[test]
fn test_serialized_output_shape() {
    let layers = vec![
        settings(
            Scope::ProjectShared,
            "project-shared",
            r#"{ "env": { "NODE_ENV": "development" } }"#,
        ),
        settings(
            Scope::ProjectLocal,
            "project-local",
            r#"{ "env": { "NODE_ENV": "production" } }"#,
        ),
    ];
    let json: Value = serde_json::from_str(&resolve(&layers).to_json_pretty().unwrap()).unwrap();

    assert_eq!(json["environment"]["effective"]["NODE_ENV"]["value"], "production");
    assert_eq!(
        json["environment"]["shadows"][0]["shadowedValues"][0],
        serde_json::json!({
            "value": "development",
            "origin": "project-shared",
            "scope": "project-shared"
        })
    );
    assert_eq!(json["sandbox"]["enabled"]["origin"], "default");
    assert_eq!(json["model"]["effectiveModel"]["origin"], "default");
}

#[rstest]
#[case::truncated("{ \"permissions\": ")]
#[case::wrong_shape(r#"{ "permissions": { "allow": "Bash" } }"#)]
#[case::not_an_object("42")]
fn test_malformed_documents_are_rejected(#[case] document: &str) {
    let err = ConfigLayer::settings_from_json(Scope::User, "~/.claude/settings.json", document)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidLayer { .. }));
    assert!(err.to_string().contains("~/.claude/settings.json"));
}

#[rstest]
#[case("enterprise", true)]
#[case("project-local", true)]
#[case("project-shared", true)]
#[case("user", true)]
#[case("organization", false)]
#[case("", false)]
fn test_scope_names(#[case] name: &str, #[case] known: bool) {
    let content = LayerContent::Settings(Settings::default());
    assert_eq!(ConfigLayer::from_scope_name(name, "x", content).is_ok(), known);
}
