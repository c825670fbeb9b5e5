//! Permission pass: conflicts across layers, then redundancy within each action

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use stratum_pattern::{GlobCache, PermissionPattern, matches, parse, subsumes};

use crate::layer::{ConfigLayer, OrderedLayers};
use crate::merge::{Declaration, Settled, Verdict, describe, list_with_conflict};
use crate::scope::Scope;

/// What a permission rule does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Allow,
    Deny,
    Ask,
}

impl Action {
    /// Evaluation order: the first category that matches decides.
    pub const EVALUATION_ORDER: [Action; 3] = [Action::Deny, Action::Ask, Action::Allow];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
            Self::Ask => "ask",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Verdict for Action {
    /// deny > ask > allow
    fn intra_scope_rank(self) -> u8 {
        match self {
            Self::Deny => 0,
            Self::Ask => 1,
            Self::Allow => 2,
        }
    }

    fn label(self) -> &'static str {
        self.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRule {
    pub pattern: String,
    pub action: Action,
    pub origin: String,
    pub scope: Scope,
}

impl From<&Declaration<Action>> for PermissionRule {
    fn from(decl: &Declaration<Action>) -> Self {
        Self {
            pattern: decl.key.clone(),
            action: decl.value,
            origin: decl.origin.clone(),
            scope: decl.scope,
        }
    }
}

/// Layers declaring the same pattern with different actions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionConflict {
    pub pattern: String,
    /// Every declaration of the pattern, losers included
    pub rules: Vec<PermissionRule>,
    pub resolution: Action,
    pub explanation: String,
}

/// A rule made pointless by a broader rule of the same action
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRedundancy {
    pub narrow: PermissionRule,
    pub broad: PermissionRule,
    pub explanation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionResolution {
    pub effective_allow: Vec<PermissionRule>,
    pub effective_deny: Vec<PermissionRule>,
    pub effective_ask: Vec<PermissionRule>,
    pub conflicts: Vec<PermissionConflict>,
    pub redundancies: Vec<PermissionRedundancy>,
}

impl PermissionResolution {
    pub fn effective(&self, action: Action) -> &[PermissionRule] {
        match action {
            Action::Allow => &self.effective_allow,
            Action::Deny => &self.effective_deny,
            Action::Ask => &self.effective_ask,
        }
    }

    /// Evaluate a tool invocation such as `Bash(npm test)` against the effective rules.
    ///
    /// Deny rules are checked first, then ask, then allow. `None` means no rule
    /// applies and the tool's default behaviour stands.
    pub fn decide(&self, invocation: &str) -> Option<Action> {
        let mut cache = GlobCache::new();
        Action::EVALUATION_ORDER.into_iter().find(|action| {
            self.effective(*action)
                .iter()
                .any(|rule| matches(&mut cache, &parse(&rule.pattern), invocation))
        })
    }
}

pub(crate) fn resolve_permissions(layers: &OrderedLayers<'_>) -> PermissionResolution {
    let merged = list_with_conflict(layers, permission_entries);

    let rules_for = |action: Action| -> Vec<PermissionRule> {
        merged
            .with_value(action)
            .iter()
            .map(PermissionRule::from)
            .collect()
    };

    let mut resolution = PermissionResolution {
        effective_allow: rules_for(Action::Allow),
        effective_deny: rules_for(Action::Deny),
        effective_ask: rules_for(Action::Ask),
        conflicts: merged.conflicts.iter().map(conflict_from).collect(),
        redundancies: Vec::new(),
    };

    let mut cache = GlobCache::new();
    for action in [Action::Allow, Action::Deny, Action::Ask] {
        let found = find_redundancies(&mut cache, resolution.effective(action));
        resolution.redundancies.extend(found);
    }

    tracing::debug!(
        allow = resolution.effective_allow.len(),
        deny = resolution.effective_deny.len(),
        ask = resolution.effective_ask.len(),
        conflicts = resolution.conflicts.len(),
        redundancies = resolution.redundancies.len(),
        globs = cache.len(),
        "Resolved permissions"
    );

    resolution
}

fn permission_entries(layer: &ConfigLayer) -> Vec<(String, Action)> {
    let Some(settings) = layer.as_settings() else {
        return Vec::new();
    };
    let permissions = &settings.permissions;
    let tagged = |patterns: &[String], action: Action| {
        patterns
            .iter()
            .map(move |pattern| (pattern.clone(), action))
            .collect::<Vec<_>>()
    };

    let mut entries = tagged(&permissions.allow, Action::Allow);
    entries.extend(tagged(&permissions.deny, Action::Deny));
    entries.extend(tagged(&permissions.ask, Action::Ask));
    entries
}

fn conflict_from(settled: &Settled<Action>) -> PermissionConflict {
    let winner = settled.winner();
    let explanation = if settled.intra_scope {
        let origins = settled.top_scope_origins();
        let culprit = if origins.len() > 1 {
            format!("the {} layers {} disagree", winner.scope, origins.join(", "))
        } else {
            format!("{} ({}) declares conflicting actions itself", winner.origin, winner.scope)
        };
        format!(
            "`{}` is declared as {}; {culprit}, so {} wins (deny > ask > allow)",
            settled.key,
            describe(&settled.declarations),
            settled.resolution,
        )
    } else {
        format!(
            "`{}` is declared as {}; {} from {} ({}) takes precedence",
            settled.key,
            describe(&settled.declarations),
            settled.resolution,
            winner.origin,
            winner.scope,
        )
    };

    PermissionConflict {
        pattern: settled.key.clone(),
        rules: settled
            .declarations
            .iter()
            .map(PermissionRule::from)
            .collect(),
        resolution: settled.resolution,
        explanation,
    }
}

/// Pairwise scan of one action category.
///
/// For each rule, the first broader rule in canonical order is reported and
/// the scan moves on. A pair already reported in the opposite direction is
/// skipped so mutually-subsuming globs yield one finding.
fn find_redundancies(cache: &mut GlobCache, rules: &[PermissionRule]) -> Vec<PermissionRedundancy> {
    let parsed: Vec<PermissionPattern> = rules.iter().map(|rule| parse(&rule.pattern)).collect();
    let mut reported: HashSet<(usize, usize)> = HashSet::new();
    let mut found = Vec::new();

    for (n, narrow) in parsed.iter().enumerate() {
        for (b, broad) in parsed.iter().enumerate() {
            if n == b || rules[n].pattern == rules[b].pattern || reported.contains(&(b, n)) {
                continue;
            }
            if subsumes(cache, broad, narrow) {
                reported.insert((n, b));
                found.push(redundancy(&rules[n], &rules[b]));
                break;
            }
        }
    }

    found
}

fn redundancy(narrow: &PermissionRule, broad: &PermissionRule) -> PermissionRedundancy {
    PermissionRedundancy {
        explanation: format!(
            "`{}` ({}) is already covered by `{}` ({}) in the {} list",
            narrow.pattern, narrow.origin, broad.pattern, broad.origin, narrow.action,
        ),
        narrow: narrow.clone(),
        broad: broad.clone(),
    }
}
