//! Layered configuration resolver for Stratum
//!
//! Settings for an AI coding agent live in up to four scopes. This crate takes
//! the parsed files from those scopes and computes the one configuration that
//! actually takes effect, along with:
//!
//! - **Conflicts**: the same key declared differently by two layers
//! - **Redundancies**: a permission rule already covered by a broader one
//! - **Shadows**: environment variables overridden by a higher scope
//!
//! # Precedence
//!
//! ```text
//! enterprise  >  project-local  >  project-shared  >  user
//! ```
//!
//! # Example
//!
//! ```
//! use stratum_core::{Action, ConfigLayer, Scope, resolve};
//!
//! let user = ConfigLayer::settings_from_json(
//!     Scope::User,
//!     "~/.claude/settings.json",
//!     r#"{ "permissions": { "allow": ["Bash(git *)"] } }"#,
//! )?;
//! let project = ConfigLayer::settings_from_json(
//!     Scope::ProjectShared,
//!     ".claude/settings.json",
//!     r#"{ "permissions": { "deny": ["Bash(git *)"] } }"#,
//! )?;
//!
//! let resolved = resolve(&[user, project]);
//! assert_eq!(resolved.permissions.decide("Bash(git push)"), Some(Action::Deny));
//! assert_eq!(resolved.permissions.conflicts.len(), 1);
//! # Ok::<(), stratum_core::Error>(())
//! ```

pub mod error;
pub mod layer;
pub mod merge;
pub mod options;
pub mod precedence;
pub mod resolver;
pub mod scope;

pub use error::{Error, Result};
pub use layer::{
    ConfigLayer, LayerContent, McpFile, McpServerDecl, OrderedLayers, PermissionSettings,
    PluginSettings, SandboxSettings, Settings,
};
pub use merge::{DEFAULT_ORIGIN, OriginTracked};
pub use options::{ModelDefaults, ResolverOptions, SandboxDefaults};
pub use precedence::Precedence;
pub use resolver::{
    Action, EnvVariable, EnvironmentResolution, McpResolution, McpServerResolved,
    ModelResolution, PermissionConflict, PermissionRedundancy, PermissionResolution,
    PermissionRule, PluginInfo, PluginResolution, ResolvedConfig, Resolver, SandboxResolution,
    ShadowedValue, ToggleConflict, ToggleDeclaration, resolve,
};
pub use scope::{Scope, Scoped};
