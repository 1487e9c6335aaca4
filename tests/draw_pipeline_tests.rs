mod common;

use cell_canvas::{
    CellContent, CellGeometry, ColorSet, DrawingSurface, GlyphMask, GlyphRasterizer, GlyphStyle,
    SoftwareCanvas,
};
use common::make_atlas;

/// Rasterizer that covers the whole glyph box, so direct draws are easy to
/// assert on.
struct BlockRasterizer;

impl GlyphRasterizer for BlockRasterizer {
    fn rasterize(&mut self, grapheme: &str, width: u32, height: u32) -> Option<GlyphMask> {
        if grapheme.is_empty() {
            return None;
        }
        Some(GlyphMask {
            width,
            height,
            coverage: vec![255; (width * height) as usize],
        })
    }
}

fn surface() -> DrawingSurface<SoftwareCanvas> {
    let geometry = CellGeometry::compute(8.0, 16.0, 1.0, 1.0);
    let canvas = SoftwareCanvas::new(64, 48, Box::new(BlockRasterizer)).unwrap();
    DrawingSurface::new(canvas, geometry, 1.0)
}

#[test]
fn test_atlas_blit_lands_at_cell_origin() {
    let mut s = surface();
    let atlas = make_atlas(8, 16, 255); // every slot solid white
    let colors = ColorSet::default();

    s.draw_char(
        Some(&atlas),
        &CellContent::new("A", 1),
        2,
        1,
        GlyphStyle {
            foreground: 5,
            bold: false,
        },
        &colors,
    );

    // Inside the destination cell: atlas pixels.
    assert_eq!(s.target().pixel(16, 16), [255, 255, 255, 255]);
    assert_eq!(s.target().pixel(23, 31), [255, 255, 255, 255]);
    // Outside: untouched.
    assert_eq!(s.target().pixel(15, 16), [0, 0, 0, 0]);
    assert_eq!(s.target().pixel(24, 16), [0, 0, 0, 0]);
}

#[test]
fn test_direct_draw_fills_with_palette_color() {
    let mut s = surface();
    let colors = ColorSet::default();

    s.draw_char(
        None,
        &CellContent::new("A", 1),
        0,
        0,
        GlyphStyle {
            foreground: 200,
            bold: false,
        },
        &colors,
    );

    let expected = colors.ansi[200].to_rgba();
    assert_eq!(s.target().pixel(0, 0), expected);
    assert_eq!(s.target().pixel(7, 15), expected);
    // The clip confines the draw to one cell.
    assert_eq!(s.target().pixel(8, 0), [0, 0, 0, 0]);
}

#[test]
fn test_wide_direct_draw_clips_to_two_cells() {
    let mut s = surface();
    let colors = ColorSet::default();

    s.draw_char(
        None,
        &CellContent::new("世", 2),
        1,
        0,
        GlyphStyle {
            foreground: 300,
            bold: false,
        },
        &colors,
    );

    let expected = colors.foreground.to_rgba();
    // Covers both columns of the wide cell...
    assert_eq!(s.target().pixel(8, 0), expected);
    assert_eq!(s.target().pixel(23, 15), expected);
    // ...but not the neighbor past the clip.
    assert_eq!(s.target().pixel(24, 0), [0, 0, 0, 0]);
}

#[test]
fn test_fill_and_clear_round_trip() {
    let mut s = surface();
    s.fill_cells(0, 0, 2, 1, [10, 20, 30, 255]);
    assert_eq!(s.target().pixel(0, 0), [10, 20, 30, 255]);
    assert_eq!(s.target().pixel(15, 15), [10, 20, 30, 255]);

    s.clear_cells(0, 0, 1, 1);
    assert_eq!(s.target().pixel(0, 0), [0, 0, 0, 0]);
    assert_eq!(s.target().pixel(8, 0), [10, 20, 30, 255]);

    s.clear_all();
    assert_eq!(s.target().pixel(8, 0), [0, 0, 0, 0]);
}
