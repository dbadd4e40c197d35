//! Tool box configuration.
//!
//! Deactivation rules are normally wired up in code when a session creates
//! its tools. They can also be read from TOML, naming tools by id:
//!
//! ```toml
//! enabled = true
//!
//! [[deactivation_rules]]
//! master = "rotate_objects"
//! slaves = ["move_objects"]
//!
//! [[deactivation_rules]]
//! master = "vertex"
//! slaves = ["move_objects"]
//! ```
//!
//! Apply a config with `ToolBox::apply_config` during session setup, after
//! all tools are registered.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or applying a tool box configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Tool '{0}' cannot deactivate itself")]
    SelfDeactivation(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Activating `master` deactivates every tool in `slaves`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeactivationRule {
    pub master: String,
    #[serde(default)]
    pub slaves: Vec<String>,
}

impl DeactivationRule {
    pub fn new(master: impl Into<String>, slaves: &[&str]) -> Self {
        Self {
            master: master.into(),
            slaves: slaves.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Tool box settings for one editing session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolBoxConfig {
    /// Whether dispatch starts enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub deactivation_rules: Vec<DeactivationRule>,
}

fn default_enabled() -> bool {
    true
}

impl Default for ToolBoxConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            deactivation_rules: Vec::new(),
        }
    }
}

impl ToolBoxConfig {
    /// Parse a config from TOML string
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load and parse a config from a file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rules() {
        let config = ToolBoxConfig::from_toml_str(
            r#"
            enabled = false

            [[deactivation_rules]]
            master = "rotate_objects"
            slaves = ["move_objects"]
            "#,
        )
        .unwrap();

        assert!(!config.enabled);
        assert_eq!(
            config.deactivation_rules,
            vec![DeactivationRule::new("rotate_objects", &["move_objects"])]
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ToolBoxConfig::from_toml_str("").unwrap();
        assert_eq!(config, ToolBoxConfig::default());
    }

    #[test]
    fn test_parse_error() {
        let err = ToolBoxConfig::from_toml_str("enabled = \"sometimes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ToolBoxConfig::load("/nonexistent/tool_box.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
