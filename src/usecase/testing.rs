use crate::domain::primitive::{Color, GlyphSize, Rect, Texture};
use crate::interface_adapter::port::{GlyphProvider, RenderBackend};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Fill(Color, Rect),
    Blit { dst: Rect, src_x: u32, src_y: u32 },
    Snapshot,
    Release,
}

/// Backend that records every call and keeps no pixels.
#[derive(Debug)]
pub struct RecordingBackend {
    width: u32,
    height: u32,
    calls: Vec<BackendCall>,
    snapshots: bool,
    outstanding: usize,
    releases: usize,
}

impl RecordingBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
            snapshots: true,
            outstanding: 0,
            releases: 0,
        }
    }

    /// Make `snapshot` fail when `false`.
    pub fn set_snapshots(&mut self, enabled: bool) {
        self.snapshots = enabled;
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn fills(&self) -> Vec<Rect> {
        self.fill_calls().into_iter().map(|(_, rect)| rect).collect()
    }

    pub fn fill_calls(&self) -> Vec<(Color, Rect)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::Fill(color, rect) => Some((*color, *rect)),
                _ => None,
            })
            .collect()
    }

    pub fn blits(&self) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::Blit { dst, .. } => Some(*dst),
                _ => None,
            })
            .collect()
    }

    /// Textures handed out (snapshots and glyphs) and not yet released.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    pub fn releases(&self) -> usize {
        self.releases
    }

    /// Glyph textures are created outside the backend; count them in on blit.
    fn track_glyph(&mut self, texture: &Texture) {
        if !texture.is_snapshot() {
            self.outstanding += 1;
        }
    }
}

impl RenderBackend for RecordingBackend {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, color: Color, rect: Rect) {
        self.calls.push(BackendCall::Fill(color, rect));
    }

    fn blit(&mut self, texture: &Texture, dst: Rect, src_x: u32, src_y: u32) {
        self.track_glyph(texture);
        self.calls.push(BackendCall::Blit { dst, src_x, src_y });
    }

    fn snapshot(&mut self) -> Option<Texture> {
        self.calls.push(BackendCall::Snapshot);
        if !self.snapshots {
            return None;
        }
        let texture = Texture::try_new(self.width, self.height, Color::BLACK)
            .ok()?
            .into_snapshot();
        self.outstanding += 1;
        Some(texture)
    }

    fn release(&mut self, _texture: Texture) {
        self.calls.push(BackendCall::Release);
        self.outstanding = self.outstanding.saturating_sub(1);
        self.releases += 1;
    }
}

/// Glyph provider that paints a single foreground pixel on a background
/// texture and remembers every lookup.
#[derive(Debug)]
pub struct StubGlyphs {
    size: GlyphSize,
    lookups: Vec<(char, Color, Color)>,
}

impl StubGlyphs {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: GlyphSize::new(width, height),
            lookups: Vec::new(),
        }
    }

    /// `(code point, fg, bg)` of every lookup so far.
    pub fn lookups(&self) -> &[(char, Color, Color)] {
        &self.lookups
    }

    pub fn clear_lookups(&mut self) {
        self.lookups.clear();
    }
}

impl GlyphProvider for StubGlyphs {
    fn glyph_size(&self) -> GlyphSize {
        self.size
    }

    fn lookup_glyph(&mut self, code: char, fg: Color, bg: Color) -> Option<Texture> {
        use unicode_width::UnicodeWidthChar;

        self.lookups.push((code, fg, bg));
        let cells = code.width().unwrap_or(1).max(1) as u32;
        let mut texture = Texture::try_new(self.size.width * cells, self.size.height, bg).ok()?;
        texture.set_pixel(0, 0, fg);
        Some(texture)
    }
}
