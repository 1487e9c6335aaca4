//! Typed error types for cell-canvas.
//!
//! Glyph-level problems (an atlas that is missing, still building, or failed
//! to build) are never errors: the glyph router silently falls back to the
//! direct-draw path. Only surface-level failures reach this type, and those
//! are fatal to the affected render layer.

use thiserror::Error;

/// Top-level error type for the rendering core.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The backing pixel surface could not be created.
    #[error("surface creation failed: {0}")]
    SurfaceCreation(String),

    /// The backing pixel surface could not be sized to the requested
    /// dimensions (zero-sized or overflowing allocation).
    #[error("invalid surface size {width}x{height}")]
    InvalidSurfaceSize {
        /// Requested backing width in device pixels.
        width: u32,
        /// Requested backing height in device pixels.
        height: u32,
    },
}
