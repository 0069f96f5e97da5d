/// Pixel rectangle on a render surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }
}

/// Pixel size of one glyph cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSize {
    pub width: u32,
    pub height: u32,
}

impl GlyphSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel rectangle covered by the cell at `(col, row)`, `cols` cells wide.
    pub fn cell_rect(&self, col: usize, row: usize, cols: usize) -> Rect {
        Rect::new(
            col as u32 * self.width,
            row as u32 * self.height,
            cols as u32 * self.width,
            self.height,
        )
    }
}

impl Default for GlyphSize {
    fn default() -> Self {
        Self::new(8, 16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_with_zero_side_is_empty() {
        assert!(Rect::new(3, 4, 0, 10).is_empty());
        assert!(Rect::new(3, 4, 10, 0).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn rect_area_does_not_overflow_u32() {
        assert_eq!(Rect::new(0, 0, 70_000, 70_000).area(), 4_900_000_000);
    }

    #[test]
    fn glyph_size_defaults_to_eight_by_sixteen() {
        assert_eq!(GlyphSize::default(), GlyphSize::new(8, 16));
    }

    #[test]
    fn cell_rect_scales_by_glyph_size() {
        let glyph = GlyphSize::new(8, 16);
        assert_eq!(glyph.cell_rect(3, 2, 1), Rect::new(24, 32, 8, 16));
        assert_eq!(glyph.cell_rect(0, 0, 2), Rect::new(0, 0, 16, 16));
    }
}
