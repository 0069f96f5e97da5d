use font8x8::{
    BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, GREEK_FONTS, HIRAGANA_FONTS, LATIN_FONTS,
    UnicodeFonts,
};
use unicode_width::UnicodeWidthChar;

use crate::domain::primitive::{Color, GlyphSize, Texture};
use crate::interface_adapter::port::GlyphProvider;

/// Side length of the source bitmaps.
const BITMAP_SIZE: u32 = 8;

/// Glyph provider backed by the public-domain 8x8 `font8x8` bitmaps, scaled
/// to the configured cell size.
///
/// Code points with no bitmap render as `?`. Wide code points get a texture
/// as many cells wide as their display width.
#[derive(Debug, Clone)]
pub struct BitmapFont {
    size: GlyphSize,
}

impl BitmapFont {
    pub fn new(size: GlyphSize) -> Self {
        Self { size }
    }

    fn bitmap(code: char) -> [u8; 8] {
        BASIC_FONTS
            .get(code)
            .or_else(|| LATIN_FONTS.get(code))
            .or_else(|| BOX_FONTS.get(code))
            .or_else(|| BLOCK_FONTS.get(code))
            .or_else(|| GREEK_FONTS.get(code))
            .or_else(|| HIRAGANA_FONTS.get(code))
            .or_else(|| BASIC_FONTS.get('?'))
            .unwrap_or([0; 8])
    }
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self::new(GlyphSize::default())
    }
}

impl GlyphProvider for BitmapFont {
    fn glyph_size(&self) -> GlyphSize {
        self.size
    }

    fn lookup_glyph(&mut self, code: char, fg: Color, bg: Color) -> Option<Texture> {
        let cells = code.width().unwrap_or(1).max(1) as u32;
        let width = self.size.width * cells;
        let height = self.size.height;
        let mut texture = Texture::try_new(width, height, bg).ok()?;
        if code == ' ' {
            return Some(texture);
        }

        let bitmap = Self::bitmap(code);
        // Nearest-neighbour scale: bit 0 of each row byte is the leftmost pixel.
        for y in 0..height {
            let bits = bitmap[(y * BITMAP_SIZE / height) as usize];
            for x in 0..width {
                let bit = x * BITMAP_SIZE / width;
                if bits & (1 << bit) != 0 {
                    texture.set_pixel(x, y, fg);
                }
            }
        }
        Some(texture)
    }
}
