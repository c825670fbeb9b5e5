//! Matching and subsumption over parsed patterns

use crate::glob::GlobCache;
use crate::pattern::{McpTarget, PermissionPattern, parse};

/// Whether `pattern` applies to the tool invocation `candidate`.
///
/// `candidate` is written in rule syntax, e.g. `Bash(npm test)` or
/// `mcp__github__create_issue`. A bare candidate is only matched by a bare
/// pattern; a scoped pattern needs an argument to test its glob against.
pub fn matches(cache: &mut GlobCache, pattern: &PermissionPattern, candidate: &str) -> bool {
    let candidate = parse(candidate);
    match (pattern, &candidate) {
        (
            PermissionPattern::Bare { tool },
            PermissionPattern::Bare { tool: other } | PermissionPattern::Scoped { tool: other, .. },
        ) => tool == other,
        (
            PermissionPattern::Scoped { tool, glob },
            PermissionPattern::Scoped {
                tool: other,
                glob: argument,
            },
        ) => tool == other && cache.is_match(glob, argument),
        (
            PermissionPattern::Mcp { server, tool },
            PermissionPattern::Mcp {
                server: other_server,
                tool: other_tool,
            },
        ) => mcp_covers(server, tool.as_ref(), other_server, other_tool.as_ref()),
        _ => false,
    }
}

/// Whether every invocation allowed by `narrow` is also covered by `broad`.
///
/// The glob case is a heuristic: `broad`'s compiled glob is tested against
/// `narrow`'s glob as literal text, which is not full language containment.
/// Tool names are compared before any glob is compiled.
pub fn subsumes(
    cache: &mut GlobCache,
    broad: &PermissionPattern,
    narrow: &PermissionPattern,
) -> bool {
    match (broad, narrow) {
        (
            PermissionPattern::Bare { tool },
            PermissionPattern::Bare { tool: other } | PermissionPattern::Scoped { tool: other, .. },
        ) => tool == other,
        (
            PermissionPattern::Scoped { tool, glob },
            PermissionPattern::Scoped {
                tool: other,
                glob: other_glob,
            },
        ) => tool == other && (glob == other_glob || cache.is_match(glob, other_glob)),
        (
            PermissionPattern::Mcp { server, tool },
            PermissionPattern::Mcp {
                server: other_server,
                tool: other_tool,
            },
        ) => mcp_covers(server, tool.as_ref(), other_server, other_tool.as_ref()),
        _ => false,
    }
}

/// `None` and `Some(Any)` both mean every tool of the server.
fn mcp_covers(
    server: &McpTarget,
    tool: Option<&McpTarget>,
    other_server: &McpTarget,
    other_tool: Option<&McpTarget>,
) -> bool {
    if !server.covers(other_server) {
        return false;
    }
    match (tool, other_tool) {
        (None | Some(McpTarget::Any), _) => true,
        (Some(_), None) => false,
        (Some(tool), Some(other)) => tool.covers(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(broad: &str, narrow: &str) -> bool {
        subsumes(&mut GlobCache::new(), &parse(broad), &parse(narrow))
    }

    #[test]
    fn bare_subsumes_scoped_of_same_tool() {
        assert!(check("Bash", "Bash(npm run *)"));
        assert!(!check("Bash", "Read(./src/**)"));
    }

    #[test]
    fn scoped_never_subsumes_bare() {
        assert!(!check("Bash(*)", "Bash"));
    }

    #[test]
    fn glob_accepts_narrower_glob_as_literal() {
        assert!(check("Bash(npm *)", "Bash(npm run build)"));
        assert!(check("Bash(npm run *)", "Bash(npm run *)"));
        assert!(!check("Bash(npm run build)", "Bash(npm *)"));
    }

    #[test]
    fn mcp_server_forms_are_equivalent() {
        assert!(check("mcp__db", "mcp__db__*"));
        assert!(check("mcp__db__*", "mcp__db"));
        assert!(check("mcp__db", "mcp__db__query"));
        assert!(!check("mcp__db__query", "mcp__db"));
        assert!(!check("mcp__db", "mcp__other__query"));
    }

    #[test]
    fn mcp_wildcard_covers_every_server() {
        assert!(check("mcp__*", "mcp__github__create_issue"));
        assert!(check("mcp__*", "mcp__db"));
        assert!(!check("mcp__*", "Bash"));
    }

    #[test]
    fn matches_invocations() {
        let mut cache = GlobCache::new();
        assert!(matches(&mut cache, &parse("Bash"), "Bash(rm -rf /)"));
        assert!(matches(&mut cache, &parse("Bash(git *)"), "Bash(git push)"));
        assert!(!matches(&mut cache, &parse("Bash(git *)"), "Bash"));
        assert!(matches(
            &mut cache,
            &parse("mcp__github"),
            "mcp__github__create_issue"
        ));
        assert!(!matches(&mut cache, &parse("mcp__github"), "mcp__gitlab__x"));
    }
}
