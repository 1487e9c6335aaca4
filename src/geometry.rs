//! Pixel geometry of one grid cell.

/// Pixel dimensions for one grid cell at a given device pixel ratio.
///
/// Recomputed whenever font metrics, the device pixel ratio, or the
/// line-height multiplier change; immutable between recomputations.
/// Invariant: `scaled_line_height >= scaled_char_height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGeometry {
    /// Character cell width in device pixels.
    pub scaled_char_width: u32,
    /// Character cell height in device pixels.
    pub scaled_char_height: u32,
    /// Full line height in device pixels, including any extra line spacing.
    pub scaled_line_height: u32,
    /// Vertical offset that centers the glyph inside a taller line box.
    pub scaled_line_draw_y: u32,
}

impl CellGeometry {
    /// Compute cell geometry from logical font metrics.
    ///
    /// Character dimensions use `ceil` so the backing bitmap cell never
    /// clips the glyph. When the line-height multiplier is exactly 1 the
    /// line height equals the character height with no float multiplication,
    /// avoiding drift; otherwise the multiplied height is floored and the
    /// glyph is centered by rounding half the leftover space.
    pub fn compute(
        font_width: f32,
        font_height: f32,
        device_pixel_ratio: f32,
        line_height: f32,
    ) -> Self {
        let line_height = line_height.max(1.0);
        let scaled_char_width = (font_width * device_pixel_ratio).ceil() as u32;
        let scaled_char_height = (font_height * device_pixel_ratio).ceil() as u32;

        let (scaled_line_height, scaled_line_draw_y) = if line_height == 1.0 {
            (scaled_char_height, 0)
        } else {
            let scaled = (scaled_char_height as f32 * line_height).floor() as u32;
            let draw_y = ((scaled - scaled_char_height) as f32 / 2.0).round() as u32;
            (scaled, draw_y)
        };

        Self {
            scaled_char_width,
            scaled_char_height,
            scaled_line_height,
            scaled_line_draw_y,
        }
    }
}
