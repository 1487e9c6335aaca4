//! Renderable cell content.

/// One terminal cell's renderable content.
///
/// This is the bridge between terminal emulation (buffer cells with VT
/// attributes) and rendering. Attribute fields (foreground index, bold flag)
/// accompany each draw call instead of living here, so the same content can
/// be redrawn under selection or cursor inversion without rebuilding it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellContent {
    /// The glyph(s) to render. Empty for the continuation cell of a wide
    /// character.
    pub grapheme: String,
    /// First code point of the grapheme; used as the atlas lookup key and
    /// only meaningful for atlas purposes below 256.
    pub code_point: u32,
    /// Display width in columns: 1 or 2.
    pub width: u8,
}

impl CellContent {
    pub fn new(grapheme: impl Into<String>, width: u8) -> Self {
        let grapheme = grapheme.into();
        let code_point = grapheme.chars().next().map(|c| c as u32).unwrap_or(0);
        Self {
            grapheme,
            code_point,
            width,
        }
    }

    /// The continuation cell occupying the second column of a wide character.
    pub fn spacer() -> Self {
        Self {
            grapheme: String::new(),
            code_point: 0,
            width: 1,
        }
    }

    pub fn is_spacer(&self) -> bool {
        self.grapheme.is_empty()
    }
}

impl Default for CellContent {
    fn default() -> Self {
        Self::new(" ", 1)
    }
}
