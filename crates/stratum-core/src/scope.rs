//! Configuration scopes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The level a configuration layer is declared at.
///
/// Scopes carry no ordering of their own; ask [`crate::Precedence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    /// Managed policy installed by an administrator
    Enterprise,
    /// Per-project, not checked in
    ProjectLocal,
    /// Per-project, checked in and shared with the team
    ProjectShared,
    /// The user's home configuration
    User,
}

impl Scope {
    pub const ALL: [Scope; 4] = [
        Scope::Enterprise,
        Scope::ProjectLocal,
        Scope::ProjectShared,
        Scope::User,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enterprise => "enterprise",
            Self::ProjectLocal => "project-local",
            Self::ProjectShared => "project-shared",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| Error::UnknownScope {
                scope: s.to_string(),
            })
    }
}

/// Anything declared at a scope.
pub trait Scoped {
    fn scope(&self) -> Scope;
}

impl Scoped for Scope {
    fn scope(&self) -> Scope {
        *self
    }
}
