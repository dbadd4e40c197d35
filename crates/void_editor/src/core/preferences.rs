//! Editor preferences and settings.
//!
//! Persistent settings that survive editor restarts, stored as TOML:
//!
//! ```toml
//! handle_radius = 0.5
//! rotation_snap = 15.0
//!
//! [tool_box]
//! enabled = true
//!
//! [[tool_box.deactivation_rules]]
//! master = "rotate_objects"
//! slaves = ["move_objects"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use void_tools::{DeactivationRule, ToolBoxConfig};

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type PreferencesResult<T> = Result<T, PreferencesError>;

/// Editor preferences and settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    /// Pick radius around handles and objects, in map units
    pub handle_radius: f32,
    /// Rotation increment in degrees; zero disables snapping
    pub rotation_snap: f32,
    pub tool_box: ToolBoxConfig,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            handle_radius: 0.5,
            rotation_snap: 15.0,
            tool_box: ToolBoxConfig {
                enabled: true,
                deactivation_rules: vec![
                    DeactivationRule::new("rotate_objects", &["move_objects"]),
                    DeactivationRule::new("vertex", &["move_objects"]),
                ],
            },
        }
    }
}

impl EditorPreferences {
    pub fn from_toml_str(content: &str) -> PreferencesResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> PreferencesResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load preferences from a file.
    pub fn load(path: impl AsRef<Path>) -> PreferencesResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let preferences = Self::from_toml_str(&content)?;
        log::info!("Loaded preferences from {:?}", path);
        Ok(preferences)
    }

    /// Save preferences to a file, creating its directory if needed.
    pub fn save(&self, path: impl AsRef<Path>) -> PreferencesResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        log::info!("Saved preferences to {:?}", path);
        Ok(())
    }

    /// Get the default preferences path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("void_editor");
            p.push("preferences.toml");
            p
        })
    }

    /// Load from the default path, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(preferences) => preferences,
            Err(e) => {
                log::warn!("Ignoring preferences at {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
