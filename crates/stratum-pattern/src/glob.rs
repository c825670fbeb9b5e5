//! Memoized glob compilation
//!
//! A [`GlobCache`] is created per resolution and dropped with it. Each unique
//! glob string is compiled at most once; globs that fail to compile are
//! remembered as such and fall back to literal comparison.

use std::borrow::Cow;
use std::collections::HashMap;

use globset::{GlobBuilder, GlobMatcher};

use crate::error::{Error, Result};

/// Legacy prefix form: `npm run test:*` matches anything starting with `npm run test`.
const PREFIX_SUFFIX: &str = ":*";

#[derive(Debug, Default)]
pub struct GlobCache {
    compiled: HashMap<String, Option<GlobMatcher>>,
}

impl GlobCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a glob without caching, reporting compilation failures.
    pub fn try_compile(glob: &str) -> Result<GlobMatcher> {
        let source = normalize(glob);
        GlobBuilder::new(&source)
            .literal_separator(false)
            .build()
            .map(|g| g.compile_matcher())
            .map_err(|e| Error::InvalidGlob {
                glob: glob.to_string(),
                message: e.to_string(),
            })
    }

    /// Test `candidate` against `glob`.
    ///
    /// Uncompilable globs match only their own literal text.
    pub fn is_match(&mut self, glob: &str, candidate: &str) -> bool {
        match self.matcher(glob) {
            Some(matcher) => matcher.is_match(candidate),
            None => glob == candidate,
        }
    }

    /// Number of distinct globs seen so far.
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    fn matcher(&mut self, glob: &str) -> Option<&GlobMatcher> {
        if !self.compiled.contains_key(glob) {
            let compiled = match Self::try_compile(glob) {
                Ok(matcher) => {
                    tracing::trace!(glob = %glob, "Compiled glob");
                    Some(matcher)
                }
                Err(e) => {
                    tracing::warn!("{}; falling back to literal comparison", e);
                    None
                }
            };
            self.compiled.insert(glob.to_string(), compiled);
        }
        self.compiled.get(glob).and_then(Option::as_ref)
    }
}

fn normalize(glob: &str) -> Cow<'_, str> {
    match glob.strip_suffix(PREFIX_SUFFIX) {
        Some(prefix) => Cow::Owned(format!("{prefix}*")),
        None => Cow::Borrowed(glob),
    }
}
