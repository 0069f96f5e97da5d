use crate::domain::primitive::{Color, Rect, Texture};
use crate::shared::error::ConsoleError;

/// Pixel surface operations the console needs from the rendering backend.
///
/// Every texture obtained from `snapshot` (or from a `GlyphProvider`) must be
/// handed back through `release` before the console call that took it
/// returns.
pub trait RenderBackend {
    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Fill `rect` with `color`. Parts outside the surface are clipped.
    fn fill_rect(&mut self, color: Color, rect: Rect);

    /// Copy `dst.w` x `dst.h` pixels of `texture`, starting at
    /// `(src_x, src_y)`, onto the surface at `(dst.x, dst.y)`.
    fn blit(&mut self, texture: &Texture, dst: Rect, src_x: u32, src_y: u32);

    /// Copy of the whole surface, or `None` if it cannot be allocated.
    fn snapshot(&mut self) -> Option<Texture>;

    /// Give back a texture obtained from `snapshot` or a glyph lookup.
    fn release(&mut self, texture: Texture);
}

/// A named pixel surface a console can be attached to.
///
/// Pixel size comes from the backend and does not change while attached.
#[derive(Debug)]
pub struct Framebuffer<B> {
    name: String,
    backend: B,
}

impl<B: RenderBackend> Framebuffer<B> {
    pub fn new(name: impl Into<String>, backend: B) -> Result<Self, ConsoleError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConsoleError::InvalidFramebuffer(
                "framebuffer name is empty".to_string(),
            ));
        }
        Ok(Self { name, backend })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.backend.width()
    }

    pub fn height(&self) -> u32 {
        self.backend.height()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_parts(self) -> (String, B) {
        (self.name, self.backend)
    }
}
