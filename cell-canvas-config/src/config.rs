//! Renderer configuration management.
//!
//! Loading, saving, defaults, and validation for the settings the renderer
//! needs from its embedder: font selection and the line-height multiplier
//! that drives cell geometry.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_font_family() -> String {
    "JetBrains Mono".to_string()
}

fn default_font_size() -> f32 {
    13.0
}

fn default_line_height() -> f32 {
    1.0
}

fn default_window_padding() -> f32 {
    0.0
}

/// Configuration for the cell-canvas renderer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// Font family used to derive cell metrics.
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font size in logical points. Must be positive.
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Line-height multiplier applied on top of the character cell height.
    /// Values below 1.0 are clamped to 1.0 during validation.
    #[serde(default = "default_line_height")]
    pub line_height: f32,

    /// Padding around the cell grid, in logical pixels.
    #[serde(default = "default_window_padding")]
    pub window_padding: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_size: default_font_size(),
            line_height: default_line_height(),
            window_padding: default_window_padding(),
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_family(mut self, family: &str) -> Self {
        self.font_family = family.to_string();
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn with_window_padding(mut self, padding: f32) -> Self {
        self.window_padding = padding;
        self
    }

    /// Clamp out-of-range values into their valid domains, warning on each
    /// adjustment. Returns an error only for values that cannot be repaired
    /// (non-finite numbers).
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if !self.font_size.is_finite() || !self.line_height.is_finite() {
            return Err(ConfigError::Validation(
                "font_size and line_height must be finite numbers".to_string(),
            ));
        }
        if self.font_size < 1.0 {
            log::warn!("font_size {} below minimum, clamping to 1.0", self.font_size);
            self.font_size = 1.0;
        }
        if self.line_height < 1.0 {
            log::warn!(
                "line_height {} below minimum, clamping to 1.0",
                self.line_height
            );
            self.line_height = 1.0;
        }
        if self.window_padding < 0.0 {
            log::warn!(
                "window_padding {} is negative, clamping to 0.0",
                self.window_padding
            );
            self.window_padding = 0.0;
        }
        Ok(())
    }

    /// Parse a config from YAML and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Load a config file from disk, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::info!("config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Ok(Self::from_yaml(&contents)?)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path, yaml).map_err(ConfigError::Io)?;
        Ok(())
    }
}
