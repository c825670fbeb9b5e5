use proptest::prelude::*;
use stratum_pattern::{GlobCache, PermissionPattern, parse, subsumes};

proptest! {
    #[test]
    fn test_parse_is_total(s in "\\PC*") {
        // Every string parses to something; opaque keys keep the input verbatim.
        let pattern = parse(&s);
        if let PermissionPattern::Bare { tool } = &pattern {
            prop_assert!(tool == s.trim() || tool == &s);
        }
    }

    #[test]
    fn test_bare_subsumes_any_glob_of_same_tool(
        tool in "[A-Z][A-Za-z]{0,12}",
        glob in "[a-z0-9 *./:-]{0,24}",
    ) {
        let mut cache = GlobCache::new();
        let broad = parse(&tool);
        let narrow = PermissionPattern::Scoped { tool: tool.clone(), glob };
        prop_assert!(subsumes(&mut cache, &broad, &narrow));
        prop_assert!(subsumes(&mut cache, &broad, &broad));
    }

    #[test]
    fn test_identical_scoped_patterns_subsume_each_other(
        tool in "[A-Z][A-Za-z]{0,12}",
        glob in "[ -~]{0,24}",
    ) {
        let mut cache = GlobCache::new();
        let pattern = PermissionPattern::Scoped { tool, glob };
        prop_assert!(subsumes(&mut cache, &pattern, &pattern.clone()));
    }
}
