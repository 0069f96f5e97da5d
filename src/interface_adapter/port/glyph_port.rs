use crate::domain::primitive::{Color, GlyphSize, Texture};

/// Source of rendered glyphs.
pub trait GlyphProvider {
    /// Pixel size of a single-width glyph cell.
    fn glyph_size(&self) -> GlyphSize;

    /// Render `code` in `fg` over `bg`.
    ///
    /// Wide code points produce a texture spanning several cells. `None`
    /// means there is nothing to draw for this code point; it is not an error.
    fn lookup_glyph(&mut self, code: char, fg: Color, bg: Color) -> Option<Texture>;
}
