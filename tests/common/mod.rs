//! Shared test doubles: a recording raster target and scripted atlas
//! sources.
//!
//! Each integration test binary compiles this module separately and uses a
//! subset of it.
#![allow(dead_code)]

use cell_canvas::{
    Atlas, AtlasBitmap, AtlasRequest, AtlasResponse, AtlasSource, AtlasTicket, DrawCommand,
    GlyphCommand, PixelRect, RasterTarget, RenderError, ATLAS_CELL_SPACING,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One recorded drawing operation, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Fill {
        rect: PixelRect,
        color: [u8; 4],
        clip: Option<PixelRect>,
    },
    Clear(Option<PixelRect>),
    Blit {
        src: PixelRect,
        dst: (f32, f32),
    },
    Glyph {
        grapheme: String,
        origin: (f32, f32),
        color: [u8; 4],
        clip: Option<PixelRect>,
    },
}

/// Raster target that records every command it receives.
#[derive(Default)]
pub struct Recorder {
    pub ops: Vec<Op>,
    pub size: (u32, u32),
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RasterTarget for Recorder {
    fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSurfaceSize { width, height });
        }
        self.size = (width, height);
        Ok(())
    }

    fn width(&self) -> u32 {
        self.size.0
    }

    fn height(&self) -> u32 {
        self.size.1
    }

    fn fill(&mut self, cmd: &DrawCommand) {
        self.ops.push(Op::Fill {
            rect: cmd.rect,
            color: cmd.color,
            clip: cmd.clip,
        });
    }

    fn clear(&mut self, region: Option<PixelRect>) {
        self.ops.push(Op::Clear(region));
    }

    fn blit(&mut self, _source: &AtlasBitmap, src: PixelRect, dst: (f32, f32)) {
        self.ops.push(Op::Blit { src, dst });
    }

    fn draw_glyph(&mut self, cmd: &GlyphCommand<'_>) {
        self.ops.push(Op::Glyph {
            grapheme: cmd.grapheme.to_string(),
            origin: cmd.origin,
            color: cmd.color,
            clip: cmd.clip,
        });
    }
}

/// Atlas whose bitmap covers code points up to `max_code_point` and all 258
/// color slots, with every slot filled by a solid marker color.
pub fn make_atlas(cell_width: u32, cell_height: u32, max_code_point: u32) -> Atlas {
    let pitch_x = cell_width + ATLAS_CELL_SPACING;
    let pitch_y = cell_height + ATLAS_CELL_SPACING;
    let width = (max_code_point + 1) * pitch_x;
    let height = 258 * pitch_y;
    Atlas {
        bitmap: AtlasBitmap {
            width,
            height,
            pixels: vec![0xff; (width * height * 4) as usize],
        },
        cell_width,
        cell_height,
    }
}

/// Source that builds synchronously and counts its builds.
pub struct CountingSource {
    pub builds: AtomicUsize,
    cell: (u32, u32),
}

impl CountingSource {
    pub fn new(cell_width: u32, cell_height: u32) -> Self {
        Self {
            builds: AtomicUsize::new(0),
            cell: (cell_width, cell_height),
        }
    }

    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }
}

impl AtlasSource for CountingSource {
    fn build(&self, _request: AtlasRequest) -> AtlasResponse {
        self.builds.fetch_add(1, Ordering::Relaxed);
        AtlasResponse::Ready(make_atlas(self.cell.0, self.cell.1, 255))
    }
}

/// Source that never completes synchronously; tickets are collected for the
/// test to publish (or abandon) explicitly.
#[derive(Default)]
pub struct DeferredSource {
    pub tickets: Mutex<Vec<AtlasTicket>>,
}

impl DeferredSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticket(&self, index: usize) -> AtlasTicket {
        self.tickets.lock()[index]
    }

    pub fn request_count(&self) -> usize {
        self.tickets.lock().len()
    }
}

impl AtlasSource for DeferredSource {
    fn build(&self, request: AtlasRequest) -> AtlasResponse {
        self.tickets.lock().push(request.ticket);
        AtlasResponse::Pending
    }
}
