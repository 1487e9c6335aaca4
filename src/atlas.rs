//! Glyph atlas acquisition, caching, and invalidation.
//!
//! The cache maps a (terminal identity, palette fingerprint, cell size) key
//! to a shared, immutable atlas bitmap. Construction itself is a
//! collaborator responsibility behind [`AtlasSource`]; the cache only decides
//! when a build is needed and which completion wins.
//!
//! Concurrency model: acquisition never blocks. A build that cannot complete
//! synchronously returns a pending handle and the previously published atlas
//! (if any) stays in use. Completions are idempotent pointer swaps guarded by
//! a per-request epoch, so when two refreshes race, only the later request's
//! result is retained regardless of completion order.

use crate::surface::command::PixelRect;
use arc_swap::ArcSwapOption;
use cell_canvas_config::ColorSet;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Spacing margin between atlas cells, in pixels, so blits never bleed into
/// a neighboring slot.
pub const ATLAS_CELL_SPACING: u32 = 2;

/// Identity of one terminal instance, allocated by the embedder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerminalId(pub u64);

/// Identifies one cached atlas instance. A new key invalidates the previous
/// atlas for the same terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtlasKey {
    pub terminal: TerminalId,
    /// `ColorSet::fingerprint` of the palette snapshot.
    pub palette: u64,
    /// Character cell width in device pixels.
    pub cell_width: u32,
    /// Character cell height in device pixels.
    pub cell_height: u32,
}

/// Row-major RGBA-8 pixel data.
pub struct AtlasBitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// A rasterized grid of pre-rendered glyph-color combinations.
///
/// Logically indexed by `[code_point][color_slot]`: columns are code points
/// 0-255, rows are color slots (0 = default, 1 = bold-default, 2..258 =
/// ANSI 0-255 offset by 2). Immutable once published; shared by any number
/// of render layers.
pub struct Atlas {
    pub bitmap: AtlasBitmap,
    /// Glyph cell width in pixels (the geometry's scaled char width).
    pub cell_width: u32,
    /// Glyph cell height in pixels (the geometry's scaled char height).
    pub cell_height: u32,
}

impl Atlas {
    /// Horizontal distance between slot origins.
    pub fn cell_pitch_x(&self) -> u32 {
        self.cell_width + ATLAS_CELL_SPACING
    }

    /// Vertical distance between slot origins.
    pub fn cell_pitch_y(&self) -> u32 {
        self.cell_height + ATLAS_CELL_SPACING
    }

    /// Source rectangle of the slot for a code point / color slot pair.
    pub fn slot_rect(&self, code_point: u32, color_slot: u32) -> PixelRect {
        PixelRect::new(
            (code_point * self.cell_pitch_x()) as f32,
            (color_slot * self.cell_pitch_y()) as f32,
            self.cell_width as f32,
            self.cell_height as f32,
        )
    }
}

/// Completion handle for one atlas build request.
///
/// Carried by the build request and redeemed through
/// [`GlyphAtlasCache::publish`]. Stale tickets (superseded by a newer request
/// or an invalidation) are discarded on arrival.
#[derive(Debug, Clone, Copy)]
pub struct AtlasTicket {
    terminal: TerminalId,
    epoch: u64,
}

/// Everything the construction collaborator needs to build an atlas.
pub struct AtlasRequest {
    pub key: AtlasKey,
    pub colors: ColorSet,
    /// Redeem via [`GlyphAtlasCache::publish`] when building asynchronously.
    pub ticket: AtlasTicket,
}

/// Outcome of one [`AtlasSource::build`] call.
pub enum AtlasResponse {
    /// The bitmap was available immediately.
    Ready(Atlas),
    /// The build resolves later; the source kept the request's ticket and
    /// will publish when done.
    Pending,
    /// Construction failed. Not retried until the next explicit refresh.
    Unavailable,
}

/// Atlas construction collaborator (out of scope for this crate beyond the
/// boundary): given font/color/cell-size inputs, produce the bitmap grid.
pub trait AtlasSource {
    fn build(&self, request: AtlasRequest) -> AtlasResponse;
}

/// Result of [`GlyphAtlasCache::acquire`].
pub enum Acquire {
    /// A usable atlas, either cached or built synchronously.
    Ready(Arc<Atlas>),
    /// A build is outstanding; keep drawing with the previous atlas (or the
    /// direct path) until a completion is published.
    Pending,
    /// Construction failed; all glyphs fall back to direct-draw until the
    /// next explicit refresh.
    Unavailable,
}

struct Entry {
    epoch: u64,
    key: AtlasKey,
    atlas: ArcSwapOption<Atlas>,
    failed: AtomicBool,
}

/// Keyed cache of glyph atlases with explicit invalidation.
///
/// Shared between render layers via `Arc`; all published atlases are
/// read-only and replaced only by atomic swap.
#[derive(Default)]
pub struct GlyphAtlasCache {
    entries: Mutex<HashMap<TerminalId, Arc<Entry>>>,
    next_epoch: AtomicU64,
}

impl GlyphAtlasCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached atlas for `key`, or trigger a build through
    /// `source`.
    ///
    /// A cache hit returns the existing shared atlas without reconstruction.
    /// A key mismatch (new palette or cell size) supersedes the previous
    /// entry: its epoch is retired and any in-flight completion for it will
    /// be discarded on arrival.
    pub fn acquire(&self, key: AtlasKey, colors: &ColorSet, source: &dyn AtlasSource) -> Acquire {
        {
            let entries = self.entries.lock();
            if let Some(entry) = entries.get(&key.terminal)
                && entry.key == key
            {
                if let Some(atlas) = entry.atlas.load_full() {
                    return Acquire::Ready(atlas);
                }
                if entry.failed.load(Ordering::Relaxed) {
                    return Acquire::Unavailable;
                }
                // Same request already outstanding; don't re-trigger.
                return Acquire::Pending;
            }
        }

        let epoch = self.next_epoch.fetch_add(1, Ordering::Relaxed);
        let entry = Arc::new(Entry {
            epoch,
            key,
            atlas: ArcSwapOption::empty(),
            failed: AtomicBool::new(false),
        });
        self.entries.lock().insert(key.terminal, Arc::clone(&entry));

        let ticket = AtlasTicket {
            terminal: key.terminal,
            epoch,
        };
        log::debug!(
            "requesting atlas build for terminal {:?} (cell {}x{}, epoch {epoch})",
            key.terminal,
            key.cell_width,
            key.cell_height
        );
        match source.build(AtlasRequest {
            key,
            colors: colors.clone(),
            ticket,
        }) {
            AtlasResponse::Ready(atlas) => {
                let atlas = Arc::new(atlas);
                entry.atlas.store(Some(Arc::clone(&atlas)));
                Acquire::Ready(atlas)
            }
            AtlasResponse::Pending => Acquire::Pending,
            AtlasResponse::Unavailable => {
                log::warn!("atlas construction failed for terminal {:?}", key.terminal);
                entry.failed.store(true, Ordering::Relaxed);
                Acquire::Unavailable
            }
        }
    }

    /// Publish the result of an asynchronous build.
    ///
    /// Returns `false` when the ticket was superseded by a newer request or
    /// an invalidation; the atlas is dropped in that case.
    pub fn publish(&self, ticket: AtlasTicket, atlas: Atlas) -> bool {
        let entries = self.entries.lock();
        match entries.get(&ticket.terminal) {
            Some(entry) if entry.epoch == ticket.epoch => {
                entry.atlas.store(Some(Arc::new(atlas)));
                entry.failed.store(false, Ordering::Relaxed);
                true
            }
            _ => {
                log::debug!(
                    "discarding stale atlas completion for terminal {:?} (epoch {})",
                    ticket.terminal,
                    ticket.epoch
                );
                false
            }
        }
    }

    /// Current atlas for `key`, if one has been published.
    pub fn lookup(&self, key: &AtlasKey) -> Option<Arc<Atlas>> {
        let entries = self.entries.lock();
        let entry = entries.get(&key.terminal)?;
        if entry.key != *key {
            return None;
        }
        entry.atlas.load_full()
    }

    /// Drop any atlas for the terminal; the next acquire rebuilds.
    pub fn invalidate(&self, terminal: TerminalId) {
        self.entries.lock().remove(&terminal);
    }

    /// Drop every cached atlas (font change across all terminals).
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
