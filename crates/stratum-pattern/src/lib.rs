//! Permission pattern algebra for Stratum.
//!
//! Rule strings such as `Bash`, `Bash(npm run *)` or `mcp__github__*` are
//! parsed once into a closed [`PermissionPattern`] and compared from then on
//! without re-parsing:
//!
//! - [`parse`] is total. Strings of no known shape become an opaque
//!   [`PermissionPattern::Bare`] key instead of an error.
//! - [`matches`] tests a tool invocation against a pattern.
//! - [`subsumes`] decides whether one rule makes another pointless.
//!
//! Glob compilation is memoized in a [`GlobCache`] owned by the caller, so
//! the cache lives exactly as long as one resolution.
//!
//! # Example
//!
//! ```
//! use stratum_pattern::{GlobCache, parse, subsumes};
//!
//! let mut cache = GlobCache::new();
//! let broad = parse("Bash(npm *)");
//! let narrow = parse("Bash(npm run build)");
//! assert!(subsumes(&mut cache, &broad, &narrow));
//! ```

pub mod algebra;
pub mod error;
pub mod glob;
pub mod pattern;

pub use algebra::{matches, subsumes};
pub use error::{Error, Result};
pub use glob::GlobCache;
pub use pattern::{McpTarget, PermissionPattern, parse};
