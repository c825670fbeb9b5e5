//! Resolver options
//!
//! Built-in fallbacks used when no layer sets a value. Embedders can override
//! them from a TOML document:
//!
//! ```toml
//! [models]
//! default = "claude-sonnet-4-5"
//! haiku = "claude-haiku-4-5"
//!
//! [sandbox]
//! auto_allow_bash_if_sandboxed = false
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

fn default_model() -> String {
    "claude-sonnet-4-5".to_string()
}

fn default_sonnet() -> String {
    "claude-sonnet-4-5".to_string()
}

fn default_haiku() -> String {
    "claude-haiku-4-5".to_string()
}

fn default_opus() -> String {
    "claude-opus-4-1".to_string()
}

fn default_subagent() -> String {
    "claude-sonnet-4-5".to_string()
}

/// Model strings reported with origin `"default"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDefaults {
    #[serde(default = "default_model")]
    pub default: String,
    #[serde(default = "default_sonnet")]
    pub sonnet: String,
    #[serde(default = "default_haiku")]
    pub haiku: String,
    #[serde(default = "default_opus")]
    pub opus: String,
    #[serde(default = "default_subagent")]
    pub subagent: String,
}

impl Default for ModelDefaults {
    fn default() -> Self {
        Self {
            default: default_model(),
            sonnet: default_sonnet(),
            haiku: default_haiku(),
            opus: default_opus(),
            subagent: default_subagent(),
        }
    }
}

fn default_auto_allow() -> bool {
    true
}

/// Sandbox values reported with origin `"default"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxDefaults {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_auto_allow")]
    pub auto_allow_bash_if_sandboxed: bool,
    #[serde(default)]
    pub excluded_commands: Vec<String>,
}

impl Default for SandboxDefaults {
    fn default() -> Self {
        Self {
            enabled: false,
            auto_allow_bash_if_sandboxed: default_auto_allow(),
            excluded_commands: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverOptions {
    #[serde(default)]
    pub models: ModelDefaults,
    #[serde(default)]
    pub sandbox: SandboxDefaults,
}

impl ResolverOptions {
    /// Parse options from TOML. Missing tables and keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let options: ResolverOptions = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> Result<()> {
        let models = [
            ("default", &self.models.default),
            ("sonnet", &self.models.sonnet),
            ("haiku", &self.models.haiku),
            ("opus", &self.models.opus),
            ("subagent", &self.models.subagent),
        ];
        for (name, value) in models {
            if value.trim().is_empty() {
                return Err(Error::InvalidOptions {
                    message: format!("models.{name} must not be empty"),
                });
            }
        }
        Ok(())
    }
}
