//! The precedence table
//!
//! Single source of truth for scope ordering. Every merge strategy asks this
//! table instead of encoding an order of its own:
//!
//! ```text
//! enterprise > project-local > project-shared > user
//! ```

use crate::error::Result;
use crate::scope::{Scope, Scoped};

pub struct Precedence;

impl Precedence {
    /// Scopes from highest to lowest priority.
    pub const ORDER: [Scope; 4] = [
        Scope::Enterprise,
        Scope::ProjectLocal,
        Scope::ProjectShared,
        Scope::User,
    ];

    /// Rank of a scope; lower is higher priority.
    pub fn rank(scope: Scope) -> usize {
        match scope {
            Scope::Enterprise => 0,
            Scope::ProjectLocal => 1,
            Scope::ProjectShared => 2,
            Scope::User => 3,
        }
    }

    /// Rank of a scope given by name.
    ///
    /// Fails on names outside the table rather than guessing a position.
    pub fn rank_of_name(name: &str) -> Result<usize> {
        let scope: Scope = name.parse().inspect_err(|e| {
            tracing::error!("{}", e);
        })?;
        Ok(Self::rank(scope))
    }

    /// Whether `a` takes priority over `b`.
    pub fn outranks(a: Scope, b: Scope) -> bool {
        Self::rank(a) < Self::rank(b)
    }

    /// The entry from the highest-priority scope. Ties keep the earliest entry.
    pub fn pick_highest<'a, T, I>(entries: I) -> Option<&'a T>
    where
        T: Scoped + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        entries
            .into_iter()
            .min_by_key(|entry| Self::rank(entry.scope()))
    }
}
