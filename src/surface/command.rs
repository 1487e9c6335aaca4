//! Immutable draw commands and the raster target boundary.
//!
//! Every draw is an explicit value: a rectangle, a color, and an optional
//! clip. There is no mutable context state (current fill style, clip stack,
//! font) on the surface, so each command can be inspected and tested in
//! isolation and targets never observe half-configured state.

use crate::atlas::AtlasBitmap;
use crate::error::RenderError;

/// Axis-aligned rectangle in backing (device) pixels.
///
/// Stored as floats so cell arithmetic under non-integer device pixel ratios
/// stays exact; targets quantize only when rasterizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Intersection with another rectangle, or `None` when disjoint.
    pub fn intersect(&self, other: &PixelRect) -> Option<PixelRect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.width).min(other.x + other.width);
        let y1 = (self.y + self.height).min(other.y + other.height);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(PixelRect::new(x0, y0, x1 - x0, y1 - y0))
    }
}

/// A solid rectangle fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub rect: PixelRect,
    /// RGBA, straight alpha.
    pub color: [u8; 4],
    /// Optional clip applied before rasterization.
    pub clip: Option<PixelRect>,
}

/// An on-demand glyph draw (the uncached path).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphCommand<'a> {
    /// The grapheme to render.
    pub grapheme: &'a str,
    /// Top-left origin of the glyph box in device pixels, already offset
    /// vertically to match the atlas path.
    pub origin: (f32, f32),
    /// Glyph box dimensions in device pixels (character cell size).
    pub size: (u32, u32),
    /// RGBA fill color for the glyph coverage.
    pub color: [u8; 4],
    /// Destination cell bounds; glyphs with wide visual extent must not
    /// paint outside this rectangle.
    pub clip: Option<PixelRect>,
}

/// A pixel-addressable 2D drawing surface.
///
/// Implemented by rendering backends (the in-tree [`SoftwareCanvas`] or an
/// embedder-provided target). All methods take explicit command values;
/// implementations hold no cross-call drawing state.
///
/// [`SoftwareCanvas`]: crate::surface::software::SoftwareCanvas
pub trait RasterTarget {
    /// Resize the backing store to the given device-pixel dimensions.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError>;

    /// Backing width in device pixels.
    fn width(&self) -> u32;

    /// Backing height in device pixels.
    fn height(&self) -> u32;

    /// Fill a rectangle with a solid color.
    fn fill(&mut self, cmd: &DrawCommand);

    /// Transparent-clear a region, or the whole surface for `None`.
    fn clear(&mut self, region: Option<PixelRect>);

    /// Copy a rectangle out of a pre-rendered atlas bitmap. Atlas cells are
    /// pre-isolated by a spacing margin, so no clipping is required.
    fn blit(&mut self, source: &AtlasBitmap, src: PixelRect, dst: (f32, f32));

    /// Rasterize and composite a glyph on demand.
    fn draw_glyph(&mut self, cmd: &GlyphCommand<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_clips_to_overlap() {
        let a = PixelRect::new(0.0, 0.0, 10.0, 10.0);
        let b = PixelRect::new(6.0, 4.0, 10.0, 10.0);
        let clipped = a.intersect(&b).unwrap();
        assert_eq!(clipped, PixelRect::new(6.0, 4.0, 4.0, 6.0));
    }

    #[test]
    fn intersect_disjoint_is_none() {
        let a = PixelRect::new(0.0, 0.0, 5.0, 5.0);
        let b = PixelRect::new(5.0, 0.0, 5.0, 5.0);
        assert!(a.intersect(&b).is_none());
    }
}
