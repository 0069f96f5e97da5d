use std::collections::TryReserveError;

use super::Color;

/// Owned block of pixels: a rendered glyph or a surface snapshot.
///
/// Textures are handed out by the glyph provider and the backend's
/// `snapshot`, and go back through `RenderBackend::release` once blitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    /// Set on copies made by `RenderBackend::snapshot`.
    snapshot: bool,
}

impl Texture {
    /// Allocate a `width` x `height` texture filled with `fill`.
    pub fn try_new(width: u32, height: u32, fill: Color) -> Result<Self, TryReserveError> {
        let len = width as usize * height as usize;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len)?;
        pixels.resize(len, fill);
        Ok(Self {
            width,
            height,
            pixels,
            snapshot: false,
        })
    }

    /// Wrap row-major pixels. Returns `None` when the length does not match.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            pixels,
            snapshot: false,
        })
    }

    /// Mark this texture as a surface snapshot.
    pub fn into_snapshot(mut self) -> Self {
        self.snapshot = true;
        self
    }

    pub fn is_snapshot(&self) -> bool {
        self.snapshot
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        if let Some(px) = self.pixels.get_mut(idx) {
            *px = color;
        }
    }

    /// One row of pixels.
    pub fn row(&self, y: u32) -> Option<&[Color]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        self.pixels.get(start..start + self.width as usize)
    }
}
