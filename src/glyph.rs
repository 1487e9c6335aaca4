//! Per-draw routing between the atlas blit path and the direct-draw path.

use crate::atlas::Atlas;
use crate::cell::CellContent;
use crate::surface::command::{GlyphCommand, RasterTarget};
use crate::surface::DrawingSurface;
use cell_canvas_config::ColorSet;

/// Foreground index sentinel for the default foreground color.
pub const DEFAULT_COLOR: u16 = 256;

/// Foreground index sentinel for inverse video over the default colors
/// (glyph drawn in the background color).
pub const INVERTED_DEFAULT_COLOR: u16 = 257;

/// Atlas row offset of the ANSI colors: slots 0 and 1 are the default and
/// bold-default variants, ANSI index `n` lives at slot `n + 2`.
const ANSI_SLOT_OFFSET: u32 = 2;

/// Atlas color slot for a foreground index / bold combination.
///
/// Default-colored draws share slot 0 whether or not they are bold unless
/// bold selects the dedicated bold-default slot 1; ANSI indices map to
/// slots 2..258.
pub fn color_slot(foreground: u16, bold: bool) -> u32 {
    if foreground < 256 {
        foreground as u32 + ANSI_SLOT_OFFSET
    } else if bold {
        1
    } else {
        0
    }
}

/// Whether a code point / foreground combination is pre-rendered in the
/// atlas.
///
/// The atlas only pre-renders the 16-color and default-color combinations;
/// extended palette indices (16-255) and non-ASCII code points are drawn on
/// demand.
pub fn is_atlas_eligible(code_point: u32, foreground: u16) -> bool {
    code_point < 256 && (foreground < 16 || foreground >= 256)
}

/// Foreground attributes accompanying one draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphStyle {
    /// ANSI index 0-255, or one of the >= 256 sentinels.
    pub foreground: u16,
    pub bold: bool,
}

impl<T: RasterTarget> DrawingSurface<T> {
    /// Draw one cell's glyph at (col, row), choosing atlas-blit when the
    /// combination is pre-rendered and an atlas is available, and falling
    /// back to clipped direct-draw otherwise.
    pub fn draw_char(
        &mut self,
        atlas: Option<&Atlas>,
        cell: &CellContent,
        col: u32,
        row: u32,
        style: GlyphStyle,
        colors: &ColorSet,
    ) {
        // Wide characters occupy two columns; the continuation cell must
        // never retain stale pixels.
        if cell.width == 2 {
            self.clear_cells(col + 1, row, 1, 1);
        }
        if cell.is_spacer() {
            return;
        }

        let geometry = *self.geometry();
        let dst_x = (col * geometry.scaled_char_width) as f32;
        let dst_y = (row * geometry.scaled_line_height + geometry.scaled_line_draw_y) as f32;

        if let Some(atlas) = atlas
            && is_atlas_eligible(cell.code_point, style.foreground)
        {
            let slot = color_slot(style.foreground, style.bold);
            let src = atlas.slot_rect(cell.code_point, slot);
            self.target_mut().blit(&atlas.bitmap, src, (dst_x, dst_y));
            return;
        }

        // Absent atlas or uncached combination: direct-draw, clipped to the
        // destination cell so wide visual extents (e.g. underscores) cannot
        // bleed into neighboring cells.
        let color = if style.foreground == INVERTED_DEFAULT_COLOR {
            colors.background
        } else if style.foreground < 256 {
            colors.ansi[style.foreground as usize]
        } else {
            colors.foreground
        };
        let clip = self.cell_rect(col, row, cell.width as u32, 1);
        let cmd = GlyphCommand {
            grapheme: &cell.grapheme,
            origin: (dst_x, dst_y),
            size: (
                geometry.scaled_char_width * cell.width as u32,
                geometry.scaled_char_height,
            ),
            color: color.to_rgba(),
            clip: Some(clip),
        };
        self.target_mut().draw_glyph(&cmd);
    }
}
