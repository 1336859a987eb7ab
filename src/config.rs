//! Application configuration.
//!
//! The configuration is loaded from
//! `$XDG_CONFIG_HOME/vdpager/config.json`.  Every section is optional and
//! falls back to compiled-in defaults, so `{}` is a valid file.
//!
//! # Example
//!
//! ```json
//! {
//!   "drag": { "threshold": 12.0 },
//!   "preview": { "width": 200.0 }
//! }
//! ```

use crate::navigation::DEFAULT_DRAG_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Drag-and-drop settings.
    #[serde(default)]
    pub drag: DragConfig,

    /// Preview thumbnail settings.
    #[serde(default)]
    pub preview: PreviewConfig,
}

/// Drag-and-drop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Pointer travel in pixels before a press on a preview becomes a drag,
    /// used when a request carries no threshold of its own.
    pub threshold: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_DRAG_THRESHOLD,
        }
    }
}

/// Preview thumbnail settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Thumbnail width in pixels when a request does not specify one.
    pub width: f64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { width: 160.0 }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
