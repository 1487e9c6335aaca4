//! Cell-grid rendering core with glyph atlas caching.
//!
//! This crate renders a terminal character grid onto a pixel drawing
//! surface, translating logical cell coordinates into device pixels:
//!
//! - DPR-aware cell geometry ([`CellGeometry`])
//! - Cell-indexed drawing primitives over a raster target
//!   ([`DrawingSurface`], [`RasterTarget`])
//! - A keyed glyph atlas cache with non-blocking acquisition and
//!   last-write-wins completion ([`GlyphAtlasCache`])
//! - Per-draw routing between atlas blits and the direct-draw fallback
//! - Render layer lifecycle orchestration ([`BaseLayer`], [`RenderLayer`])
//!
//! Escape sequence parsing, font rasterization, and atlas construction are
//! collaborator responsibilities behind the [`AtlasSource`] and
//! [`GlyphRasterizer`] traits.

pub mod atlas;
pub mod cell;
pub mod error;
pub mod geometry;
pub mod glyph;
pub mod layer;
pub mod surface;

// Re-export main public types
pub use atlas::{
    Acquire, Atlas, AtlasBitmap, AtlasKey, AtlasRequest, AtlasResponse, AtlasSource, AtlasTicket,
    GlyphAtlasCache, TerminalId, ATLAS_CELL_SPACING,
};
pub use cell::CellContent;
pub use error::RenderError;
pub use geometry::CellGeometry;
pub use glyph::{
    color_slot, is_atlas_eligible, GlyphStyle, DEFAULT_COLOR, INVERTED_DEFAULT_COLOR,
};
pub use layer::{BaseLayer, FontMetrics, RenderLayer};
pub use surface::{
    DrawCommand, DrawingSurface, GlyphCommand, GlyphMask, GlyphRasterizer, PixelRect, RasterTarget,
    SoftwareCanvas,
};

// Re-export shared types from dependencies for convenience
pub use cell_canvas_config::{Color, ColorSet, RenderConfig};
