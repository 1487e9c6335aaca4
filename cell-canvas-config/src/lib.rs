//! Configuration and color types for the cell-canvas renderer.
//!
//! This crate provides:
//!
//! - [`RenderConfig`]: font, line-height, and padding settings with YAML
//!   load/save and validation
//! - [`Color`] / [`ColorSet`]: the 256-entry ANSI palette plus default
//!   foreground/background used to key and consume glyph atlases

pub mod colors;
pub mod config;
pub mod error;

pub use colors::{Color, ColorSet, default_ansi_palette};
pub use config::RenderConfig;
pub use error::ConfigError;
