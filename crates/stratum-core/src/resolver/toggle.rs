//! Enable/disable conflicts shared by the MCP server and plugin passes

use serde::Serialize;

use crate::merge::{Declaration, Settled, describe};
use crate::scope::Scope;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleDeclaration {
    pub enabled: bool,
    pub origin: String,
    pub scope: Scope,
}

impl From<&Declaration<bool>> for ToggleDeclaration {
    fn from(decl: &Declaration<bool>) -> Self {
        Self {
            enabled: decl.value,
            origin: decl.origin.clone(),
            scope: decl.scope,
        }
    }
}

/// Layers disagreeing about whether something is enabled
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleConflict {
    pub key: String,
    pub declarations: Vec<ToggleDeclaration>,
    /// The settled state
    pub enabled: bool,
    pub explanation: String,
}

pub(crate) fn toggle_conflict(kind: &str, settled: &Settled<bool>) -> ToggleConflict {
    let winner = settled.winner();
    let state = if settled.resolution { "enabled" } else { "disabled" };
    let explanation = if settled.intra_scope {
        let origins = settled.top_scope_origins();
        let culprit = if origins.len() > 1 {
            format!("the {} layers {} disagree", winner.scope, origins.join(", "))
        } else {
            format!("{} ({}) contradicts itself", winner.origin, winner.scope)
        };
        format!(
            "{kind} `{}` is declared as {}; {culprit}, so it stays {state}",
            settled.key,
            describe(&settled.declarations),
        )
    } else {
        format!(
            "{kind} `{}` is declared as {}; {state} by {} ({}) which takes precedence",
            settled.key,
            describe(&settled.declarations),
            winner.origin,
            winner.scope,
        )
    };

    ToggleConflict {
        key: settled.key.clone(),
        declarations: settled
            .declarations
            .iter()
            .map(ToggleDeclaration::from)
            .collect(),
        enabled: settled.resolution,
        explanation,
    }
}
