//! Table-driven tests for parsing and subsumption

use rstest::rstest;
use stratum_pattern::{GlobCache, McpTarget, PermissionPattern, matches, parse, subsumes};

mod parsing {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    #[case("Bash", "Bash", None)]
    #[case("WebFetch", "WebFetch", None)]
    #[case("Bash(npm run *)", "Bash", Some("npm run *"))]
    #[case("Read(./secrets/**)", "Read", Some("./secrets/**"))]
    #[case("WebFetch(domain:example.com)", "WebFetch", Some("domain:example.com"))]
    #[case("  Edit  ", "Edit", None)]
    fn test_tool_shapes(#[case] raw: &str, #[case] tool: &str, #[case] glob: Option<&str>) {
        let pattern = parse(raw);
        assert_eq!(pattern.tool(), Some(tool));
        assert_eq!(pattern.glob(), glob);
    }

    #[rstest]
    #[case("mcp__*", McpTarget::Any, None)]
    #[case("mcp__postgres", McpTarget::Named("postgres".into()), None)]
    #[case("mcp__postgres__*", McpTarget::Named("postgres".into()), Some(McpTarget::Any))]
    #[case(
        "mcp__postgres__query",
        McpTarget::Named("postgres".into()),
        Some(McpTarget::Named("query".into()))
    )]
    fn test_mcp_shapes(
        #[case] raw: &str,
        #[case] server: McpTarget,
        #[case] tool: Option<McpTarget>,
    ) {
        assert_eq!(parse(raw), PermissionPattern::Mcp { server, tool });
    }

    #[rstest]
    #[case("Bash(unterminated")]
    #[case("123Tool")]
    #[case("mcp__")]
    #[case("mcp__srv__")]
    #[case("two words")]
    fn test_opaque_keys(#[case] raw: &str) {
        assert_eq!(
            parse(raw),
            PermissionPattern::Bare {
                tool: raw.to_string()
            }
        );
    }
}

mod subsumption {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    #[case("Bash", "Bash(npm run *)", true)]
    #[case("Bash", "Bash", true)]
    #[case("Bash(npm run *)", "Bash(npm run build)", true)]
    #[case("Bash(npm run *)", "Bash(npm run *)", true)]
    #[case("Bash(git:*)", "Bash(git commit -m wip)", true)]
    #[case("Read(./src/**)", "Read(./src/lib.rs)", true)]
    #[case("Bash(npm run build)", "Bash(npm run *)", false)]
    #[case("Bash(npm run *)", "Bash", false)]
    #[case("Bash", "Read", false)]
    #[case("Read(./src/**)", "Edit(./src/lib.rs)", false)]
    #[case("mcp__*", "mcp__github__search", true)]
    #[case("mcp__github", "mcp__github__search", true)]
    #[case("mcp__github__search", "mcp__github__*", false)]
    #[case("mcp__github", "Bash", false)]
    #[case("Bash", "mcp__github", false)]
    fn test_subsumes(#[case] broad: &str, #[case] narrow: &str, #[case] expected: bool) {
        let mut cache = GlobCache::new();
        assert_eq!(
            subsumes(&mut cache, &parse(broad), &parse(narrow)),
            expected,
            "{broad} over {narrow}"
        );
    }

    #[test]
    fn test_tool_mismatch_skips_glob_compilation() {
        let mut cache = GlobCache::new();
        assert!(!subsumes(
            &mut cache,
            &parse("Bash(npm *)"),
            &parse("Read(npm install)")
        ));
        assert!(cache.is_empty());
    }
}

mod matching {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    #[case("Bash", "Bash(anything at all)", true)]
    #[case("Bash(npm run *)", "Bash(npm run lint)", true)]
    #[case("Bash(npm run *)", "Bash(rm -rf /)", false)]
    #[case("Bash(npm run *)", "Bash", false)]
    #[case("mcp__*", "mcp__db__drop_table", true)]
    #[case("mcp__db__*", "mcp__db__drop_table", true)]
    #[case("mcp__db__select", "mcp__db__drop_table", false)]
    fn test_matches(#[case] pattern: &str, #[case] candidate: &str, #[case] expected: bool) {
        let mut cache = GlobCache::new();
        assert_eq!(matches(&mut cache, &parse(pattern), candidate), expected);
    }
}
