//! Color and palette types consumed by the renderer.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A color in RGB format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn as_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Opaque RGBA form used by draw commands.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// The standard 16 ANSI colors (xterm values).
const BASE_16: [Color; 16] = [
    Color::new(0x00, 0x00, 0x00), // black
    Color::new(0xcd, 0x00, 0x00), // red
    Color::new(0x00, 0xcd, 0x00), // green
    Color::new(0xcd, 0xcd, 0x00), // yellow
    Color::new(0x00, 0x00, 0xee), // blue
    Color::new(0xcd, 0x00, 0xcd), // magenta
    Color::new(0x00, 0xcd, 0xcd), // cyan
    Color::new(0xe5, 0xe5, 0xe5), // white
    Color::new(0x7f, 0x7f, 0x7f), // bright black
    Color::new(0xff, 0x00, 0x00), // bright red
    Color::new(0x00, 0xff, 0x00), // bright green
    Color::new(0xff, 0xff, 0x00), // bright yellow
    Color::new(0x5c, 0x5c, 0xff), // bright blue
    Color::new(0xff, 0x00, 0xff), // bright magenta
    Color::new(0x00, 0xff, 0xff), // bright cyan
    Color::new(0xff, 0xff, 0xff), // bright white
];

/// Build the standard 256-entry ANSI palette: 16 base colors, a 6x6x6
/// color cube (indices 16-231), and a 24-step grayscale ramp (232-255).
pub fn default_ansi_palette() -> Vec<Color> {
    let mut palette = Vec::with_capacity(256);
    palette.extend_from_slice(&BASE_16);
    for r in 0..6u16 {
        for g in 0..6u16 {
            for b in 0..6u16 {
                palette.push(Color::new(cube_level(r), cube_level(g), cube_level(b)));
            }
        }
    }
    for step in 0..24u16 {
        let v = (8 + step * 10) as u8;
        palette.push(Color::new(v, v, v));
    }
    palette
}

fn cube_level(index: u16) -> u8 {
    if index == 0 { 0 } else { (55 + index * 40) as u8 }
}

/// Foreground, background, and the 256-entry ANSI palette.
///
/// Supplied by the embedding terminal and treated as read-only by the
/// renderer. [`ColorSet::fingerprint`] identifies a palette snapshot inside
/// an atlas cache key, so any color change produces a new key and therefore
/// a new atlas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColorSet {
    pub foreground: Color,
    pub background: Color,
    /// ANSI colors 0-255. Invariant: exactly 256 entries.
    pub ansi: Vec<Color>,
}

impl ColorSet {
    pub fn new(foreground: Color, background: Color, ansi: Vec<Color>) -> Self {
        assert_eq!(ansi.len(), 256, "ANSI palette must have exactly 256 entries");
        Self {
            foreground,
            background,
            ansi,
        }
    }

    /// Stable hash of every color in the set, used as the palette component
    /// of an atlas cache key.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.foreground.hash(&mut hasher);
        self.background.hash(&mut hasher);
        self.ansi.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for ColorSet {
    fn default() -> Self {
        Self {
            foreground: Color::new(0xe5, 0xe5, 0xe5),
            background: Color::new(0x00, 0x00, 0x00),
            ansi: default_ansi_palette(),
        }
    }
}
