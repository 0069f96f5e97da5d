use unicode_width::UnicodeWidthChar;

use crate::domain::model::CellGrid;
use crate::domain::primitive::{
    Cell, Color, CursorPos, CursorState, GlyphSize, Rect, TerminalColor,
};
use crate::domain::protocol::{Action, EscapeParser, Utf8Decoder};
use crate::interface_adapter::port::{ConsoleDevice, Framebuffer, GlyphProvider, RenderBackend};
use crate::shared::config::ConsoleConfig;
use crate::shared::error::ConsoleError;

/// Tab stops every eight columns.
const TAB_WIDTH: usize = 8;

/// Everything one console instance mutates while consuming its byte stream.
#[derive(Debug, Clone)]
pub struct ConsoleState {
    grid: CellGrid,
    cursor: CursorState,
    parser: EscapeParser,
    decoder: Utf8Decoder,
}

impl ConsoleState {
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn parser(&self) -> &EscapeParser {
        &self.parser
    }

    pub fn decoder(&self) -> &Utf8Decoder {
        &self.decoder
    }
}

/// Character terminal drawn onto a pixel framebuffer.
///
/// Owns the framebuffer's backend handle for as long as it is attached.
/// The cell grid is the source of truth; the surface is only ever updated
/// through glyph blits, rectangle fills and the snapshot scroll.
///
/// Cursor highlight: while the cursor is visible, the cell under it is drawn
/// with the current colors swapped. Every `goto_xy` first repaints the cell
/// it leaves with that cell's own colors, then highlights the new one.
pub struct FramebufferConsole<B, G> {
    framebuffer: Framebuffer<B>,
    glyphs: G,
    glyph: GlyphSize,
    state: ConsoleState,
}

impl<B: RenderBackend, G: GlyphProvider> FramebufferConsole<B, G> {
    /// Attach a console to `framebuffer`, sizing the grid from its pixel
    /// dimensions and the provider's glyph size.
    ///
    /// Fails without side effects if the grid would be empty or its cell
    /// buffer cannot be allocated.
    pub fn attach(
        framebuffer: Framebuffer<B>,
        glyphs: G,
        config: &ConsoleConfig,
    ) -> Result<Self, ConsoleError> {
        let glyph = glyphs.glyph_size();
        if glyph.width == 0 || glyph.height == 0 {
            return Err(ConsoleError::InvalidGlyphSize {
                width: glyph.width,
                height: glyph.height,
            });
        }

        let cols = (framebuffer.width() / glyph.width) as usize;
        let rows = (framebuffer.height() / glyph.height) as usize;
        if cols == 0 || rows == 0 {
            return Err(ConsoleError::GridTooSmall {
                width: framebuffer.width(),
                height: framebuffer.height(),
            });
        }

        let cursor = CursorState::new(
            config.foreground.into(),
            config.background.into(),
            config.cursor_visible,
        );
        let grid =
            CellGrid::try_new(cols, rows, cursor.blank_cell()).map_err(ConsoleError::Allocation)?;

        tracing::debug!(name = framebuffer.name(), cols, rows, "console attached");

        let mut console = Self {
            framebuffer,
            glyphs,
            glyph,
            state: ConsoleState {
                grid,
                cursor,
                parser: EscapeParser::new(),
                decoder: Utf8Decoder::new(),
            },
        };
        if config.clear_on_attach {
            console.clear_screen();
        }
        Ok(console)
    }

    /// Detach from the framebuffer and hand it back.
    pub fn detach(self) -> Framebuffer<B> {
        tracing::debug!(name = self.framebuffer.name(), "console detached");
        self.framebuffer
    }

    pub fn name(&self) -> &str {
        self.framebuffer.name()
    }

    pub fn framebuffer(&self) -> &Framebuffer<B> {
        &self.framebuffer
    }

    pub fn backend(&self) -> &B {
        self.framebuffer.backend()
    }

    /// Direct access to the surface. Drawing through it bypasses the grid.
    pub fn backend_mut(&mut self) -> &mut B {
        self.framebuffer.backend_mut()
    }

    pub fn glyphs(&self) -> &G {
        &self.glyphs
    }

    pub fn glyphs_mut(&mut self) -> &mut G {
        &mut self.glyphs
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    pub fn grid(&self) -> &CellGrid {
        &self.state.grid
    }

    pub fn glyph_size(&self) -> GlyphSize {
        self.glyph
    }

    /// Grid size as `(cols, rows)`.
    pub fn size(&self) -> (usize, usize) {
        (self.state.grid.width(), self.state.grid.height())
    }

    pub fn cursor(&self) -> CursorPos {
        self.state.cursor.pos
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.state.cursor.visible
    }

    /// Current `(fg, bg)` drawing colors.
    pub fn colors(&self) -> (Color, Color) {
        (self.state.cursor.fg, self.state.cursor.bg)
    }

    // =========================================================================
    // Drawing helpers
    // =========================================================================

    fn paint(&mut self, col: usize, row: usize, fg: Color, bg: Color) {
        let Some(code) = self.state.grid.get(col, row).map(|c| c.code_point) else {
            return;
        };
        let Some(texture) = self.glyphs.lookup_glyph(code, fg, bg) else {
            return;
        };
        let origin = self.glyph.cell_rect(col, row, 1);
        let dst = Rect::new(origin.x, origin.y, texture.width(), texture.height());
        let backend = self.framebuffer.backend_mut();
        backend.blit(&texture, dst, 0, 0);
        backend.release(texture);
    }

    /// Draw a cell in its own stored colors.
    fn paint_stored(&mut self, col: usize, row: usize) {
        if let Some(cell) = self.state.grid.get(col, row).copied() {
            self.paint(col, row, cell.fg, cell.bg);
        }
    }

    /// Draw a cell as the cursor: current colors, swapped.
    fn paint_highlight(&mut self, col: usize, row: usize) {
        let CursorState { fg, bg, .. } = self.state.cursor;
        self.paint(col, row, bg, fg);
    }

    /// Pixel size of the area the grid covers.
    fn area(&self) -> Rect {
        let (cols, rows) = self.size();
        Rect::new(
            0,
            0,
            cols as u32 * self.glyph.width,
            rows as u32 * self.glyph.height,
        )
    }

    // =========================================================================
    // Cursor & color state
    // =========================================================================

    /// Move the cursor, clamping to the grid. Repaints the old and new cells
    /// when the cursor is visible.
    pub fn goto_xy(&mut self, col: isize, row: isize) {
        let (cols, rows) = self.size();
        let col = col.clamp(0, cols as isize - 1) as usize;
        let row = row.clamp(0, rows as isize - 1) as usize;

        if self.state.cursor.visible {
            let old = self.state.cursor.pos;
            self.paint_stored(old.col, old.row);
            self.paint_highlight(col, row);
        }
        self.state.cursor.pos = CursorPos::new(col, row);
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        let pos = self.state.cursor.pos;
        self.goto_xy(
            (pos.col as isize).saturating_add(dx),
            (pos.row as isize).saturating_add(dy),
        );
    }

    pub fn save_cursor(&mut self) {
        self.state.cursor.saved = self.state.cursor.pos;
    }

    pub fn restore_cursor(&mut self) {
        let saved = self.state.cursor.saved;
        self.goto_xy(saved.col as isize, saved.row as isize);
    }

    pub fn show_cursor(&mut self, show: bool) {
        self.state.cursor.visible = show;
        let pos = self.state.cursor.pos;
        if show {
            self.paint_highlight(pos.col, pos.row);
        } else {
            self.paint_stored(pos.col, pos.row);
        }
    }

    /// Set the colors used for subsequent output. Existing cells keep theirs.
    pub fn set_color(&mut self, fg: Color, bg: Color) {
        self.state.cursor.fg = fg;
        self.state.cursor.bg = bg;
    }

    pub fn set_terminal_color(&mut self, fg: TerminalColor, bg: TerminalColor) {
        self.set_color(fg.into(), bg.into());
    }

    // =========================================================================
    // Screen operations
    // =========================================================================

    /// Blank every cell, fill the surface with the background and home the
    /// cursor.
    pub fn clear_screen(&mut self) {
        let blank = self.state.cursor.blank_cell();
        self.state.grid.fill(blank);
        let area = self.area();
        self.framebuffer.backend_mut().fill_rect(blank.bg, area);
        tracing::debug!(name = self.framebuffer.name(), "screen cleared");
        self.goto_xy(0, 0);
    }

    /// Shift the screen up one row.
    ///
    /// Pixels move by blitting a snapshot of the surface one glyph row
    /// higher; only the freed bottom row is filled. Without a snapshot the
    /// whole grid is redrawn instead.
    pub fn scroll_up(&mut self) {
        let blank = self.state.cursor.blank_cell();
        self.state.grid.scroll_up(blank);

        let area = self.area();
        let row_h = self.glyph.height;
        let backend = self.framebuffer.backend_mut();
        match backend.snapshot() {
            Some(snapshot) => {
                backend.blit(&snapshot, Rect::new(0, 0, area.w, area.h - row_h), 0, row_h);
                backend.release(snapshot);
                backend.fill_rect(blank.bg, Rect::new(0, area.h - row_h, area.w, row_h));
                tracing::trace!(name = self.framebuffer.name(), "scrolled up");
            }
            None => {
                tracing::warn!(
                    name = self.framebuffer.name(),
                    "no surface snapshot available, redrawing for scroll"
                );
                self.redraw();
            }
        }

        let pos = self.state.cursor.pos;
        self.goto_xy(pos.col as isize, pos.row as isize - 1);
    }

    /// Repaint the whole surface from the cell grid.
    pub fn redraw(&mut self) {
        let area = self.area();
        let bg = self.state.cursor.bg;
        self.framebuffer.backend_mut().fill_rect(bg, area);

        let (cols, rows) = self.size();
        for row in 0..rows {
            let mut col = 0;
            while col < cols {
                self.paint_stored(col, row);
                // Placeholders behind a wide glyph would paint over its right half.
                let width = self
                    .state
                    .grid
                    .get(col, row)
                    .and_then(|c| c.code_point.width())
                    .unwrap_or(1);
                col += width.max(1);
            }
        }

        let pos = self.state.cursor.pos;
        if self.state.cursor.visible {
            self.paint_highlight(pos.col, pos.row);
        }
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Move to column 0 of the next row, scrolling first on the last row.
    fn newline(&mut self) {
        let (_, rows) = self.size();
        if self.state.cursor.pos.row + 1 >= rows {
            self.scroll_up();
        }
        let row = self.state.cursor.pos.row;
        self.goto_xy(0, row as isize + 1);
    }

    fn tab(&mut self) {
        let (cols, _) = self.size();
        let CursorPos { col, row } = self.state.cursor.pos;
        let mut skip = TAB_WIDTH - col % TAB_WIDTH;
        if col + skip >= cols {
            skip = cols - col - 1;
        }

        let blank = self.state.cursor.blank_cell();
        for c in col..col + skip {
            self.state.grid.set(c, row, blank);
            self.paint_stored(c, row);
        }
        self.goto_xy((col + skip) as isize, row as isize);
    }

    fn print(&mut self, code: char) {
        let width = code.width().unwrap_or(0);
        if width == 0 {
            return;
        }

        let (cols, _) = self.size();
        if width > 1 && self.state.cursor.pos.col > 0 && self.state.cursor.pos.col + width > cols {
            self.newline();
        }

        let CursorState { pos, fg, bg, .. } = self.state.cursor;
        self.state.grid.set(pos.col, pos.row, Cell::new(code, fg, bg));
        for c in pos.col + 1..(pos.col + width).min(cols) {
            self.state.grid.set(c, pos.row, Cell::blank(fg, bg));
        }
        self.paint_stored(pos.col, pos.row);

        if pos.col + width < cols {
            self.goto_xy((pos.col + width) as isize, pos.row as isize);
        } else {
            self.newline();
        }
    }

    /// Output one decoded code point, interpreting `\b`, `\t`, `\n` and `\r`.
    pub fn put_code(&mut self, code: char) {
        match code {
            // Backspace is consumed without moving the cursor.
            '\u{8}' => {}
            '\t' => self.tab(),
            '\n' => self.newline(),
            '\r' => {
                let row = self.state.cursor.pos.row;
                self.goto_xy(0, row as isize);
            }
            _ => self.print(code),
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Byte(byte) => {
                if let Some(code) = self.state.decoder.feed(byte) {
                    self.put_code(code);
                }
            }
            Action::SaveCursor => self.save_cursor(),
            Action::RestoreCursor => self.restore_cursor(),
            Action::CursorUp(n) => self.move_cursor(0, -(n as isize)),
            Action::CursorDown(n) => self.move_cursor(0, n as isize),
            Action::CursorForward(n) => self.move_cursor(n as isize, 0),
            Action::CursorBack(n) => self.move_cursor(-(n as isize), 0),
            Action::ClearScreen => self.clear_screen(),
        }
    }

    /// Feed raw bytes through the escape parser and UTF-8 decoder.
    ///
    /// Always consumes the whole buffer. Malformed input is dropped silently.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        for &byte in bytes {
            if let Some(action) = self.state.parser.advance(byte) {
                self.apply(action);
            }
        }
        bytes.len()
    }

    /// Drop any half-received escape or UTF-8 sequence.
    pub fn reset_input(&mut self) {
        self.state.parser.reset();
        self.state.decoder.reset();
    }
}

impl<B, G> ConsoleDevice for FramebufferConsole<B, G>
where
    B: RenderBackend + Send,
    G: GlyphProvider + Send,
{
    fn name(&self) -> &str {
        self.framebuffer.name()
    }

    /// Output-only device: there is never anything to read.
    fn read(&mut self, _buf: &mut [u8]) -> usize {
        0
    }

    fn write(&mut self, buf: &[u8]) -> usize {
        self.write_bytes(buf)
    }

    // Display power is handled by the board driver.
    fn suspend(&mut self) {}

    fn resume(&mut self) {}
}

impl<B: RenderBackend, G: GlyphProvider> std::io::Write for FramebufferConsole<B, G> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(self.write_bytes(buf))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
