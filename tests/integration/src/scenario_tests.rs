//! End-to-end resolution scenarios
//!
//! Each test builds a small stack of layers and checks one observable
//! property of the resolved output.

use pretty_assertions::assert_eq;
use stratum_core::{Action, ModelDefaults, OriginTracked, Scope, resolve};
use stratum_pattern::{GlobCache, parse, subsumes};
use stratum_test_utils::{LayerBuilder, McpLayerBuilder, scenario};

#[test]
fn test_project_local_deny_overrides_project_shared_allow() {
    let layers = vec![
        LayerBuilder::new(Scope::ProjectShared)
            .allow("Bash(npm run *)")
            .build(),
        LayerBuilder::new(Scope::ProjectLocal)
            .deny("Bash(npm run *)")
            .build(),
    ];
    let resolved = resolve(&layers);

    assert_eq!(resolved.permissions.conflicts.len(), 1);
    let conflict = &resolved.permissions.conflicts[0];
    assert_eq!(conflict.pattern, "Bash(npm run *)");
    assert_eq!(conflict.resolution, Action::Deny);
}

#[test]
fn test_project_local_env_shadows_project_shared() {
    let layers = vec![
        LayerBuilder::new(Scope::ProjectShared)
            .origin("project-shared")
            .env("NODE_ENV", "development")
            .build(),
        LayerBuilder::new(Scope::ProjectLocal)
            .origin("project-local")
            .env("NODE_ENV", "production")
            .build(),
    ];
    let resolved = resolve(&layers);

    assert_eq!(
        resolved.environment.effective.get("NODE_ENV").map(|v| v.value.as_str()),
        Some("production")
    );
    assert_eq!(resolved.environment.shadows.len(), 1);
    let shadow = &resolved.environment.shadows[0];
    assert_eq!(shadow.name, "NODE_ENV");
    assert!(
        shadow
            .shadowed_values
            .iter()
            .any(|s| s.value == "development" && s.origin == "project-shared")
    );
}

#[test]
fn test_managed_mcp_disable_beats_project_enable() {
    let layers = vec![
        McpLayerBuilder::new(Scope::ProjectShared)
            .server("postgres", "pg-mcp", &[])
            .build(),
        McpLayerBuilder::new(Scope::Enterprise)
            .disabled_server("postgres", "pg-mcp")
            .build(),
    ];
    let resolved = resolve(&layers);

    assert_eq!(resolved.mcp_servers.conflicts.len(), 1);
    assert!(!resolved.mcp_servers.conflicts[0].enabled);
    assert_eq!(resolved.mcp_servers.enabled_servers().count(), 0);
}

#[test]
fn test_bare_rule_makes_scoped_rule_redundant() {
    let layers = vec![
        LayerBuilder::new(Scope::User)
            .allow("Bash")
            .allow("Bash(npm run *)")
            .build(),
    ];
    let resolved = resolve(&layers);

    assert_eq!(resolved.permissions.redundancies.len(), 1);
    let redundancy = &resolved.permissions.redundancies[0];
    assert_eq!(redundancy.narrow.pattern, "Bash(npm run *)");
    assert_eq!(redundancy.broad.pattern, "Bash");
}

#[test]
fn test_no_layers_resolve_to_defaults() {
    let resolved = resolve(&[]);

    assert_eq!(resolved.sandbox.enabled, OriginTracked::default_value(false));
    assert_eq!(
        resolved.model.effective_model,
        OriginTracked::default_value(ModelDefaults::default().default)
    );
    assert!(!resolved.has_findings());
}

#[test]
fn test_bare_pattern_subsumes_any_scoped_form() {
    let mut cache = GlobCache::new();
    for narrow in ["Bash(npm run *)", "Bash()", "Bash(**)", "Bash(:*)"] {
        assert!(subsumes(&mut cache, &parse("Bash"), &parse(narrow)), "{narrow}");
    }
}

#[test]
fn test_repeated_resolution_is_identical() {
    let layers = scenario::full_stack();
    let first = resolve(&layers);
    let second = resolve(&layers);
    assert_eq!(first, second);
    assert_eq!(
        first.to_json_pretty().unwrap(),
        second.to_json_pretty().unwrap()
    );
}

#[test]
fn test_promoting_a_rule_only_changes_its_own_key() {
    let base = vec![
        LayerBuilder::new(Scope::User)
            .allow("Bash(git *)")
            .allow("Read")
            .build(),
        LayerBuilder::new(Scope::ProjectShared)
            .deny("Bash(git *)")
            .ask("WebFetch")
            .build(),
    ];
    let promoted = vec![
        LayerBuilder::new(Scope::User).allow("Bash(git *)").build(),
        LayerBuilder::new(Scope::ProjectShared)
            .deny("Bash(git *)")
            .ask("WebFetch")
            .build(),
        LayerBuilder::new(Scope::Enterprise).allow("Read").build(),
    ];
    let before = resolve(&base);
    let after = resolve(&promoted);

    assert_eq!(before.permissions.decide("Bash(git push)"), Some(Action::Deny));
    assert_eq!(after.permissions.decide("Bash(git push)"), Some(Action::Deny));
    assert_eq!(before.permissions.decide("WebFetch"), Some(Action::Ask));
    assert_eq!(after.permissions.decide("WebFetch"), Some(Action::Ask));
    assert_eq!(after.permissions.effective_allow[0].scope, Scope::Enterprise);
}
