use super::Color;

/// One glyph position in the console grid.
///
/// Cells that sit under the right-hand part of a wide glyph hold a blank
/// placeholder so cursor math and erasing stay column-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub code_point: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    pub fn new(code_point: char, fg: Color, bg: Color) -> Self {
        Self { code_point, fg, bg }
    }

    /// A space painted in the given colors.
    pub fn blank(fg: Color, bg: Color) -> Self {
        Self::new(' ', fg, bg)
    }

    pub fn is_blank(&self) -> bool {
        self.code_point == ' '
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Color::WHITE, Color::BLACK)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorPos {
    pub col: usize,
    pub row: usize,
}

impl CursorPos {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

/// Current and saved cursor position, visibility and the drawing colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    pub pos: CursorPos,
    pub saved: CursorPos,
    pub visible: bool,
    pub fg: Color,
    pub bg: Color,
}

impl CursorState {
    pub fn new(fg: Color, bg: Color, visible: bool) -> Self {
        Self {
            pos: CursorPos::default(),
            saved: CursorPos::default(),
            visible,
            fg,
            bg,
        }
    }

    /// Blank cell in the current drawing colors.
    pub fn blank_cell(&self) -> Cell {
        Cell::blank(self.fg, self.bg)
    }
}
