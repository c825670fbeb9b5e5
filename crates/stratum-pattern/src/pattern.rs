//! Parsing of permission rule strings
//!
//! Three shapes are recognised:
//!
//! - bare tool names: `Bash`, `WebFetch`
//! - scoped tools: `Bash(npm run *)`, `Read(./src/**)`
//! - MCP references: `mcp__*`, `mcp__server`, `mcp__server__*`, `mcp__server__tool`
//!
//! Anything else is kept verbatim as an opaque bare key. Syntax validation is
//! left to lint rules; the resolver must never fail on a malformed rule.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

const MCP_PREFIX: &str = "mcp__";
const MCP_SEPARATOR: &str = "__";
const WILDCARD: &str = "*";

static TOOL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").unwrap());

static SCOPED_TOOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^([A-Za-z_][A-Za-z0-9_-]*)\((.*)\)$").unwrap());

/// Server or tool component of an MCP reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum McpTarget {
    /// `*`
    Any,
    /// A concrete server or tool name
    Named(String),
}

impl McpTarget {
    fn from_component(component: &str) -> Self {
        if component == WILDCARD {
            Self::Any
        } else {
            Self::Named(component.to_string())
        }
    }

    /// Whether this target covers `other`.
    pub fn covers(&self, other: &McpTarget) -> bool {
        match (self, other) {
            (Self::Any, _) => true,
            (Self::Named(a), Self::Named(b)) => a == b,
            (Self::Named(_), Self::Any) => false,
        }
    }
}

impl fmt::Display for McpTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str(WILDCARD),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// A parsed permission or tool-reference string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PermissionPattern {
    /// A tool with no argument restriction, or an opaque unrecognised key
    Bare { tool: String },
    /// A tool restricted to arguments matching `glob`
    Scoped { tool: String, glob: String },
    /// An MCP server reference. `tool: None` means every tool of the server.
    Mcp {
        server: McpTarget,
        tool: Option<McpTarget>,
    },
}

impl PermissionPattern {
    /// Tool name for bare and scoped patterns.
    pub fn tool(&self) -> Option<&str> {
        match self {
            Self::Bare { tool } | Self::Scoped { tool, .. } => Some(tool),
            Self::Mcp { .. } => None,
        }
    }

    /// Argument glob for scoped patterns.
    pub fn glob(&self) -> Option<&str> {
        match self {
            Self::Scoped { glob, .. } => Some(glob),
            _ => None,
        }
    }

    /// Whether the pattern covers every tool of every MCP server (`mcp__*`).
    pub fn is_mcp_wildcard(&self) -> bool {
        matches!(
            self,
            Self::Mcp {
                server: McpTarget::Any,
                tool: None | Some(McpTarget::Any),
            }
        )
    }
}

impl fmt::Display for PermissionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bare { tool } => f.write_str(tool),
            Self::Scoped { tool, glob } => write!(f, "{tool}({glob})"),
            Self::Mcp { server, tool: None } => write!(f, "{MCP_PREFIX}{server}"),
            Self::Mcp {
                server,
                tool: Some(tool),
            } => write!(f, "{MCP_PREFIX}{server}{MCP_SEPARATOR}{tool}"),
        }
    }
}

/// Parse a rule string. Never fails.
pub fn parse(raw: &str) -> PermissionPattern {
    let trimmed = raw.trim();

    if let Some(rest) = trimmed.strip_prefix(MCP_PREFIX) {
        if let Some(pattern) = parse_mcp(rest) {
            return pattern;
        }
        return opaque(raw);
    }

    if let Some(caps) = SCOPED_TOOL.captures(trimmed) {
        return PermissionPattern::Scoped {
            tool: caps[1].to_string(),
            glob: caps[2].to_string(),
        };
    }

    if TOOL_NAME.is_match(trimmed) {
        return PermissionPattern::Bare {
            tool: trimmed.to_string(),
        };
    }

    opaque(raw)
}

fn parse_mcp(rest: &str) -> Option<PermissionPattern> {
    let (server, tool) = match rest.split_once(MCP_SEPARATOR) {
        Some((server, tool)) => (server, Some(tool)),
        None => (rest, None),
    };

    if server.is_empty() || tool.is_some_and(str::is_empty) {
        return None;
    }

    Some(PermissionPattern::Mcp {
        server: McpTarget::from_component(server),
        tool: tool.map(McpTarget::from_component),
    })
}

fn opaque(raw: &str) -> PermissionPattern {
    tracing::trace!(pattern = %raw, "Unrecognised rule shape, keeping as opaque key");
    PermissionPattern::Bare {
        tool: raw.to_string(),
    }
}
