//! Editor configuration.

use crate::history::MAX_UNDO_HISTORY;
use crate::shapes::{ShapeStyle, StyleError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage key holding the persisted shape list.
pub const DEFAULT_STORAGE_KEY: &str = "shapes";

/// Distance from the first vertex within which a click closes a polygon.
pub const DEFAULT_CLOSE_RADIUS: f64 = 10.0;

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid default style: {0}")]
    Style(#[from] StyleError),
}

/// Tunables for an editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Key the shape list is stored under.
    pub storage_key: String,
    /// Maximum number of undone shapes kept for redo.
    pub history_limit: usize,
    /// Polygon closing radius in canvas pixels.
    pub close_radius: f64,
    /// Style applied to shapes until the user picks another one.
    pub default_style: ShapeStyle,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            history_limit: MAX_UNDO_HISTORY,
            close_radius: DEFAULT_CLOSE_RADIUS,
            default_style: ShapeStyle::default(),
        }
    }
}

impl SketchConfig {
    /// Parse a configuration; missing fields take their defaults.
    ///
    /// The default style must pass the same checks as the style controls.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StyleError> {
        self.default_style.validate()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
