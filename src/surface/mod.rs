//! Cell-indexed drawing primitives over a pixel surface.

pub mod command;
pub mod software;

pub use command::{DrawCommand, GlyphCommand, PixelRect, RasterTarget};
pub use software::{GlyphMask, GlyphRasterizer, SoftwareCanvas};

use crate::error::RenderError;
use crate::geometry::CellGeometry;

/// A drawing surface sized to the terminal grid, exposing cell-indexed
/// primitives built on [`CellGeometry`].
///
/// All coordinates taken by the primitives are cell-space (column, row,
/// width/height in cells). Translation to pixel rectangles happens in
/// floating point; only the backing surface dimensions are rounded, so the
/// primitives stay correct under non-integer device pixel ratios.
pub struct DrawingSurface<T: RasterTarget> {
    target: T,
    geometry: CellGeometry,
    device_pixel_ratio: f32,
}

impl<T: RasterTarget> DrawingSurface<T> {
    pub fn new(target: T, geometry: CellGeometry, device_pixel_ratio: f32) -> Self {
        Self {
            target,
            geometry,
            device_pixel_ratio,
        }
    }

    /// Resize the backing surface to `round(logical * ratio)` device pixels.
    ///
    /// Rounding (not ceiling) matches the rounded logical size used by the
    /// embedder, so the surface is never one pixel oversized and blurry.
    pub fn resize(
        &mut self,
        logical_width: f32,
        logical_height: f32,
        device_pixel_ratio: f32,
    ) -> Result<(), RenderError> {
        let width = (logical_width * device_pixel_ratio).round() as u32;
        let height = (logical_height * device_pixel_ratio).round() as u32;
        self.target.resize(width, height)?;
        self.device_pixel_ratio = device_pixel_ratio;
        log::debug!(
            "surface resized to {width}x{height} device px (logical {logical_width}x{logical_height} @ {device_pixel_ratio})"
        );
        Ok(())
    }

    pub fn set_geometry(&mut self, geometry: CellGeometry) {
        self.geometry = geometry;
    }

    pub fn geometry(&self) -> &CellGeometry {
        &self.geometry
    }

    pub fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Pixel rectangle covering a cell-space rectangle.
    pub fn cell_rect(&self, x: u32, y: u32, width: u32, height: u32) -> PixelRect {
        let cw = self.geometry.scaled_char_width as f32;
        let lh = self.geometry.scaled_line_height as f32;
        PixelRect::new(
            x as f32 * cw,
            y as f32 * lh,
            width as f32 * cw,
            height as f32 * lh,
        )
    }

    /// Fill a rectangle of cells with a solid color.
    pub fn fill_cells(&mut self, x: u32, y: u32, width: u32, height: u32, color: [u8; 4]) {
        self.target.fill(&DrawCommand {
            rect: self.cell_rect(x, y, width, height),
            color,
            clip: None,
        });
    }

    /// Fill a rectangle of cells, confined to an explicit clip rectangle.
    pub fn fill_cells_with(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        color: [u8; 4],
        clip: PixelRect,
    ) {
        self.target.fill(&DrawCommand {
            rect: self.cell_rect(x, y, width, height),
            color,
            clip: Some(clip),
        });
    }

    /// Fill a one-device-pixel hairline along the bottom edge of a cell row,
    /// inset by one pixel so it stays visually inside the cell.
    pub fn fill_bottom_line_at_cells(&mut self, x: u32, y: u32, width: u32, color: [u8; 4]) {
        let cw = self.geometry.scaled_char_width as f32;
        let lh = self.geometry.scaled_line_height as f32;
        let thickness = self.device_pixel_ratio;
        self.target.fill(&DrawCommand {
            rect: PixelRect::new(
                x as f32 * cw,
                (y + 1) as f32 * lh - thickness - 1.0,
                width as f32 * cw,
                thickness,
            ),
            color,
            clip: None,
        });
    }

    /// Fill a one-device-pixel vertical hairline at a cell's left edge.
    pub fn fill_left_line_at_cell(&mut self, x: u32, y: u32, color: [u8; 4]) {
        let cw = self.geometry.scaled_char_width as f32;
        let lh = self.geometry.scaled_line_height as f32;
        self.target.fill(&DrawCommand {
            rect: PixelRect::new(x as f32 * cw, y as f32 * lh, self.device_pixel_ratio, lh),
            color,
            clip: None,
        });
    }

    /// Stroke a rectangle of cells with a one-device-pixel line, inset by
    /// half the line width per side so the stroke renders fully inside the
    /// cell bounds at any device pixel ratio.
    ///
    /// Emitted as four edge fills so targets need no stroke state.
    pub fn stroke_rect_at_cell(&mut self, x: u32, y: u32, width: u32, height: u32, color: [u8; 4]) {
        let rect = self.cell_rect(x, y, width, height);
        let lw = self.device_pixel_ratio;
        let edges = [
            PixelRect::new(rect.x, rect.y, rect.width, lw),
            PixelRect::new(rect.x, rect.y + rect.height - lw, rect.width, lw),
            PixelRect::new(rect.x, rect.y + lw, lw, rect.height - 2.0 * lw),
            PixelRect::new(rect.x + rect.width - lw, rect.y + lw, lw, rect.height - 2.0 * lw),
        ];
        for edge in edges {
            self.target.fill(&DrawCommand {
                rect: edge,
                color,
                clip: None,
            });
        }
    }

    /// Transparent-clear a rectangle of cells.
    pub fn clear_cells(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.target.clear(Some(self.cell_rect(x, y, width, height)));
    }

    /// Transparent-clear the whole surface.
    pub fn clear_all(&mut self) {
        self.target.clear(None);
    }
}
