//! Render layer orchestration.
//!
//! A render layer owns a [`DrawingSurface`] and reacts to lifecycle events
//! from the embedding terminal: resizes recompute geometry and the surface,
//! theme and character-size changes refresh the glyph atlas, and the
//! remaining events are hooks that concrete layers override to redraw only
//! the affected regions. Nothing here requires a full-grid redraw.

use crate::atlas::{Acquire, Atlas, AtlasKey, AtlasSource, GlyphAtlasCache, TerminalId};
use crate::cell::CellContent;
use crate::error::RenderError;
use crate::geometry::CellGeometry;
use crate::glyph::GlyphStyle;
use crate::surface::{DrawingSurface, RasterTarget};
use anyhow::Context;
use cell_canvas_config::ColorSet;
use std::sync::Arc;

/// Logical cell metrics supplied by the terminal collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Advance width of one cell in logical pixels.
    pub width: f32,
    /// Cell height in logical pixels.
    pub height: f32,
}

/// Lifecycle hooks exposed to the terminal.
///
/// Default implementations do nothing; concrete layers override the events
/// they care about and redraw affected regions only.
pub trait RenderLayer {
    /// Fully redraw this layer from its source of truth.
    fn reset(&mut self);

    fn on_grid_changed(&mut self, _start_row: u32, _end_row: u32) {}
    fn on_cursor_move(&mut self) {}
    fn on_selection_changed(
        &mut self,
        _start: Option<(u32, u32)>,
        _end: Option<(u32, u32)>,
    ) {
    }
    fn on_focus(&mut self) {}
    fn on_blur(&mut self) {}
    fn on_options_changed(&mut self) {}
}

/// Shared machinery for concrete render layers: the drawing surface, cell
/// geometry, color set, and atlas plumbing.
pub struct BaseLayer<T: RasterTarget> {
    surface: DrawingSurface<T>,
    terminal: TerminalId,
    colors: ColorSet,
    font: FontMetrics,
    device_pixel_ratio: f32,
    line_height: f32,
    cache: Arc<GlyphAtlasCache>,
    source: Arc<dyn AtlasSource>,
    atlas_key: Option<AtlasKey>,
    /// Most recently observed atlas. Possibly stale once a refresh is
    /// triggered; refreshed from the cache before each draw batch.
    current_atlas: Option<Arc<Atlas>>,
}

impl<T: RasterTarget> BaseLayer<T> {
    /// Create a layer and size its surface.
    ///
    /// Surface sizing is the one fatal failure here: it propagates to the
    /// caller instead of being swallowed.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        target: T,
        terminal: TerminalId,
        colors: ColorSet,
        font: FontMetrics,
        device_pixel_ratio: f32,
        line_height: f32,
        logical_width: f32,
        logical_height: f32,
        cache: Arc<GlyphAtlasCache>,
        source: Arc<dyn AtlasSource>,
    ) -> anyhow::Result<Self> {
        let geometry =
            CellGeometry::compute(font.width, font.height, device_pixel_ratio, line_height);
        let mut surface = DrawingSurface::new(target, geometry, device_pixel_ratio);
        surface
            .resize(logical_width, logical_height, device_pixel_ratio)
            .context("failed to size layer drawing surface")?;

        let mut layer = Self {
            surface,
            terminal,
            colors,
            font,
            device_pixel_ratio,
            line_height,
            cache,
            source,
            atlas_key: None,
            current_atlas: None,
        };
        layer.refresh_atlas();
        Ok(layer)
    }

    pub fn surface(&self) -> &DrawingSurface<T> {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut DrawingSurface<T> {
        &mut self.surface
    }

    pub fn geometry(&self) -> &CellGeometry {
        self.surface.geometry()
    }

    pub fn colors(&self) -> &ColorSet {
        &self.colors
    }

    /// Update the metrics that drive cell geometry. Takes effect on the next
    /// `resize` call, which the terminal issues with `char_size_changed`
    /// set when any of these changed.
    pub fn set_metrics(&mut self, font: FontMetrics, device_pixel_ratio: f32, line_height: f32) {
        self.font = font;
        self.device_pixel_ratio = device_pixel_ratio;
        self.line_height = line_height;
    }

    /// Handle a resize: recompute geometry, resize the surface, and refresh
    /// the atlas when the character cell size changed.
    ///
    /// Idempotent: identical arguments with `char_size_changed == false`
    /// produce identical geometry and never re-trigger atlas acquisition.
    pub fn resize(
        &mut self,
        logical_width: f32,
        logical_height: f32,
        char_size_changed: bool,
    ) -> Result<(), RenderError> {
        let geometry = CellGeometry::compute(
            self.font.width,
            self.font.height,
            self.device_pixel_ratio,
            self.line_height,
        );
        self.surface.set_geometry(geometry);
        self.surface
            .resize(logical_width, logical_height, self.device_pixel_ratio)?;
        if char_size_changed {
            self.refresh_atlas();
        }
        Ok(())
    }

    /// Swap in a new color set and refresh the atlas for it.
    pub fn on_theme_changed(&mut self, colors: &ColorSet) {
        self.colors = colors.clone();
        self.refresh_atlas();
    }

    /// Drop this terminal's cached atlas and rebuild (font change).
    pub fn clear_atlas(&mut self) {
        self.cache.invalidate(self.terminal);
        self.current_atlas = None;
        self.refresh_atlas();
    }

    fn refresh_atlas(&mut self) {
        let geometry = self.surface.geometry();
        let key = AtlasKey {
            terminal: self.terminal,
            palette: self.colors.fingerprint(),
            cell_width: geometry.scaled_char_width,
            cell_height: geometry.scaled_char_height,
        };
        self.atlas_key = Some(key);
        match self.cache.acquire(key, &self.colors, self.source.as_ref()) {
            Acquire::Ready(atlas) => self.current_atlas = Some(atlas),
            Acquire::Pending => {
                // The previously active atlas (if any) stays in use until
                // the completion is published.
                log::debug!("atlas build pending for terminal {:?}", self.terminal);
            }
            Acquire::Unavailable => {
                log::warn!(
                    "atlas unavailable for terminal {:?}; using direct draw",
                    self.terminal
                );
                self.current_atlas = None;
            }
        }
    }

    /// Pick up any atlas completion published since the last call, keeping
    /// the previous atlas while a build is still outstanding.
    pub fn poll_atlas(&mut self) -> Option<Arc<Atlas>> {
        if let Some(key) = self.atlas_key
            && let Some(atlas) = self.cache.lookup(&key)
        {
            self.current_atlas = Some(atlas);
        }
        self.current_atlas.clone()
    }

    /// Draw one cell through the atlas-or-direct routing.
    pub fn draw_char(&mut self, cell: &CellContent, col: u32, row: u32, style: GlyphStyle) {
        let atlas = self.poll_atlas();
        self.surface
            .draw_char(atlas.as_deref(), cell, col, row, style, &self.colors);
    }
}
