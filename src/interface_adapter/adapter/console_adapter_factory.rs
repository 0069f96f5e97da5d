use crate::domain::primitive::{Color, GlyphSize};
use crate::infrastructure::registry::ConsoleTable;
use crate::infrastructure::render::{BitmapFont, SharedSurface, SoftwareSurface};
use crate::interface_adapter::port::Framebuffer;
use crate::shared::config::FramebufferConfig;
use crate::shared::error::ConsoleError;

/// Creates an in-memory framebuffer plus a second handle for reading its
/// pixels back.
pub fn create_shared_framebuffer(
    config: &FramebufferConfig,
) -> Result<(Framebuffer<SharedSurface>, SharedSurface), ConsoleError> {
    let pixels = SoftwareSurface::new(config.width, config.height, Color::BLACK);
    let surface = SharedSurface::new(pixels);
    let framebuffer = Framebuffer::new(config.name.clone(), surface.clone())?;
    Ok((framebuffer, surface))
}

/// Creates the bitmap glyph provider.
pub fn create_bitmap_font(size: GlyphSize) -> BitmapFont {
    BitmapFont::new(size)
}

/// Creates an empty console registry.
pub fn create_console_table() -> ConsoleTable {
    ConsoleTable::new()
}
