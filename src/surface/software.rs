//! CPU raster target over an RGBA-8 pixel buffer.

use crate::atlas::AtlasBitmap;
use crate::error::RenderError;
use crate::surface::command::{DrawCommand, GlyphCommand, PixelRect, RasterTarget};

/// Alpha coverage mask for one rasterized glyph.
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    /// Row-major coverage, one byte per pixel.
    pub coverage: Vec<u8>,
}

/// Collaborator that rasterizes a grapheme into a coverage mask.
///
/// Font loading, shaping, and fallback selection live behind this trait;
/// the canvas only composites the returned mask.
pub trait GlyphRasterizer {
    /// Rasterize `grapheme` into a mask no larger than `width` x `height`
    /// device pixels, or `None` when the grapheme cannot be rendered.
    fn rasterize(&mut self, grapheme: &str, width: u32, height: u32) -> Option<GlyphMask>;
}

/// Software [`RasterTarget`] backed by a row-major RGBA-8 buffer.
pub struct SoftwareCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    rasterizer: Box<dyn GlyphRasterizer>,
}

impl SoftwareCanvas {
    pub fn new(
        width: u32,
        height: u32,
        rasterizer: Box<dyn GlyphRasterizer>,
    ) -> Result<Self, RenderError> {
        let len = buffer_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
            rasterizer,
        })
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Quantize a float rect to integer pixel bounds clipped to the surface.
    /// Returns (x0, y0, x1, y1) half-open, or `None` when nothing remains.
    fn pixel_bounds(&self, rect: &PixelRect) -> Option<(u32, u32, u32, u32)> {
        let x0 = rect.x.round().max(0.0) as u32;
        let y0 = rect.y.round().max(0.0) as u32;
        let x1 = ((rect.x + rect.width).round() as i64).clamp(0, self.width as i64) as u32;
        let y1 = ((rect.y + rect.height).round() as i64).clamp(0, self.height as i64) as u32;
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0, y0, x1, y1))
    }

    fn clipped_bounds(
        &self,
        rect: &PixelRect,
        clip: Option<&PixelRect>,
    ) -> Option<(u32, u32, u32, u32)> {
        let rect = match clip {
            Some(clip) => rect.intersect(clip)?,
            None => *rect,
        };
        self.pixel_bounds(&rect)
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        let idx = ((y * self.width + x) * 4) as usize;
        self.pixels[idx..idx + 4].copy_from_slice(&color);
    }

    /// Source-over composite of one straight-alpha pixel.
    fn blend_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        let alpha = color[3] as u32;
        if alpha == 0 {
            return;
        }
        if alpha == 255 {
            self.set_pixel(x, y, color);
            return;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let inv = 255 - alpha;
        for channel in 0..4 {
            let src = color[channel] as u32;
            let dst = self.pixels[idx + channel] as u32;
            self.pixels[idx + channel] = ((src * alpha + dst * inv) / 255) as u8;
        }
    }
}

fn buffer_len(width: u32, height: u32) -> Result<usize, RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidSurfaceSize { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or(RenderError::InvalidSurfaceSize { width, height })
}

impl RasterTarget for SoftwareCanvas {
    fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        let len = buffer_len(width, height)?;
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(len, 0);
        Ok(())
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill(&mut self, cmd: &DrawCommand) {
        let Some((x0, y0, x1, y1)) = self.clipped_bounds(&cmd.rect, cmd.clip.as_ref()) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, cmd.color);
            }
        }
    }

    fn clear(&mut self, region: Option<PixelRect>) {
        match region {
            None => self.pixels.fill(0),
            Some(rect) => {
                let Some((x0, y0, x1, y1)) = self.pixel_bounds(&rect) else {
                    return;
                };
                for y in y0..y1 {
                    let start = ((y * self.width + x0) * 4) as usize;
                    let end = ((y * self.width + x1) * 4) as usize;
                    self.pixels[start..end].fill(0);
                }
            }
        }
    }

    fn blit(&mut self, source: &AtlasBitmap, src: PixelRect, dst: (f32, f32)) {
        let sx0 = src.x.round().max(0.0) as u32;
        let sy0 = src.y.round().max(0.0) as u32;
        let sw = (src.width.round() as u32).min(source.width.saturating_sub(sx0));
        let sh = (src.height.round() as u32).min(source.height.saturating_sub(sy0));
        let dx0 = dst.0.round() as i64;
        let dy0 = dst.1.round() as i64;

        for row in 0..sh {
            let dy = dy0 + row as i64;
            if dy < 0 || dy >= self.height as i64 {
                continue;
            }
            for col in 0..sw {
                let dx = dx0 + col as i64;
                if dx < 0 || dx >= self.width as i64 {
                    continue;
                }
                let sidx = (((sy0 + row) * source.width + sx0 + col) * 4) as usize;
                let px = [
                    source.pixels[sidx],
                    source.pixels[sidx + 1],
                    source.pixels[sidx + 2],
                    source.pixels[sidx + 3],
                ];
                self.blend_pixel(dx as u32, dy as u32, px);
            }
        }
    }

    fn draw_glyph(&mut self, cmd: &GlyphCommand<'_>) {
        let Some(mask) = self
            .rasterizer
            .rasterize(cmd.grapheme, cmd.size.0, cmd.size.1)
        else {
            return;
        };
        let ox = cmd.origin.0.round() as i64;
        let oy = cmd.origin.1.round() as i64;
        let clip_bounds = cmd.clip.as_ref().and_then(|c| self.pixel_bounds(c));

        for row in 0..mask.height {
            let y = oy + row as i64;
            if y < 0 || y >= self.height as i64 {
                continue;
            }
            for col in 0..mask.width {
                let x = ox + col as i64;
                if x < 0 || x >= self.width as i64 {
                    continue;
                }
                if let Some((cx0, cy0, cx1, cy1)) = clip_bounds {
                    let (ux, uy) = (x as u32, y as u32);
                    if ux < cx0 || ux >= cx1 || uy < cy0 || uy >= cy1 {
                        continue;
                    }
                }
                let coverage = mask.coverage[(row * mask.width + col) as usize] as u32;
                if coverage == 0 {
                    continue;
                }
                let alpha = (cmd.color[3] as u32 * coverage / 255) as u8;
                self.blend_pixel(
                    x as u32,
                    y as u32,
                    [cmd.color[0], cmd.color[1], cmd.color[2], alpha],
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rasterizer producing a fully-covered block of the requested size.
    pub(crate) struct BlockRasterizer;

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

    fn canvas(width: u32, height: u32) -> SoftwareCanvas {
        SoftwareCanvas::new(width, height, Box::new(BlockRasterizer)).unwrap()
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(SoftwareCanvas::new(0, 10, Box::new(BlockRasterizer)).is_err());
        assert!(canvas(4, 4).resize(4, 0).is_err());
    }

    #[test]
    fn fill_respects_clip() {
        let mut c = canvas(8, 8);
        c.fill(&DrawCommand {
            rect: PixelRect::new(0.0, 0.0, 8.0, 8.0),
            color: [255, 0, 0, 255],
            clip: Some(PixelRect::new(2.0, 2.0, 2.0, 2.0)),
        });
        assert_eq!(c.pixel(3, 3), [255, 0, 0, 255]);
        assert_eq!(c.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(c.pixel(5, 5), [0, 0, 0, 0]);
    }

    #[test]
    fn clear_region_zeroes_pixels() {
        let mut c = canvas(4, 4);
        c.fill(&DrawCommand {
            rect: PixelRect::new(0.0, 0.0, 4.0, 4.0),
            color: [1, 2, 3, 255],
            clip: None,
        });
        c.clear(Some(PixelRect::new(1.0, 1.0, 2.0, 2.0)));
        assert_eq!(c.pixel(1, 1), [0, 0, 0, 0]);
        assert_eq!(c.pixel(0, 0), [1, 2, 3, 255]);
    }

    #[test]
    fn blit_copies_atlas_rect() {
        let mut c = canvas(4, 4);
        let bitmap = AtlasBitmap {
            width: 2,
            height: 2,
            pixels: vec![
                9, 9, 9, 255, 7, 7, 7, 255, //
                5, 5, 5, 255, 3, 3, 3, 255,
            ],
        };
        c.blit(&bitmap, PixelRect::new(0.0, 0.0, 2.0, 2.0), (1.0, 1.0));
        assert_eq!(c.pixel(1, 1), [9, 9, 9, 255]);
        assert_eq!(c.pixel(2, 2), [3, 3, 3, 255]);
        assert_eq!(c.pixel(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn glyph_draw_stays_inside_clip() {
        let mut c = canvas(8, 8);
        c.draw_glyph(&GlyphCommand {
            grapheme: "_",
            origin: (0.0, 0.0),
            size: (8, 8),
            color: [0, 255, 0, 255],
            clip: Some(PixelRect::new(0.0, 0.0, 4.0, 8.0)),
        });
        assert_eq!(c.pixel(3, 3), [0, 255, 0, 255]);
        assert_eq!(c.pixel(4, 3), [0, 0, 0, 0]);
    }
}
