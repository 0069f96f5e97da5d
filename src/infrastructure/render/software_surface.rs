use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::primitive::{Color, Rect, Texture};
use crate::interface_adapter::port::RenderBackend;

/// In-memory RGBA framebuffer.
///
/// Stands in for the display controller's scan-out buffer: the console
/// draws into it and the simulator shows it on screen.
#[derive(Debug, Clone)]
pub struct SoftwareSurface {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    /// Textures handed out by `snapshot` and not yet released.
    outstanding: usize,
}

impl SoftwareSurface {
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
            outstanding: 0,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn outstanding_textures(&self) -> usize {
        self.outstanding
    }

    /// Intersect `rect` with the surface.
    fn clip(&self, rect: Rect) -> Rect {
        let x = rect.x.min(self.width);
        let y = rect.y.min(self.height);
        let w = rect.w.min(self.width - x);
        let h = rect.h.min(self.height - y);
        Rect::new(x, y, w, h)
    }
}

impl RenderBackend for SoftwareSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, color: Color, rect: Rect) {
        let rect = self.clip(rect);
        let stride = self.width as usize;
        for y in rect.y..rect.y + rect.h {
            let start = y as usize * stride + rect.x as usize;
            self.pixels[start..start + rect.w as usize].fill(color);
        }
    }

    fn blit(&mut self, texture: &Texture, dst: Rect, src_x: u32, src_y: u32) {
        let mut dst = self.clip(dst);
        dst.w = dst.w.min(texture.width().saturating_sub(src_x));
        dst.h = dst.h.min(texture.height().saturating_sub(src_y));
        if src_x >= texture.width() || src_y >= texture.height() || dst.w == 0 || dst.h == 0 {
            return;
        }
        let stride = self.width as usize;
        for row in 0..dst.h {
            let Some(src_row) = texture.row(src_y + row) else {
                break;
            };
            let src = &src_row[src_x as usize..(src_x + dst.w) as usize];
            let start = (dst.y + row) as usize * stride + dst.x as usize;
            self.pixels[start..start + dst.w as usize].copy_from_slice(src);
        }
    }

    fn snapshot(&mut self) -> Option<Texture> {
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(self.pixels.len()).ok()?;
        pixels.extend_from_slice(&self.pixels);
        let texture = Texture::from_pixels(self.width, self.height, pixels)?.into_snapshot();
        self.outstanding += 1;
        Some(texture)
    }

    fn release(&mut self, texture: Texture) {
        // Glyph textures are released here too; only snapshots are counted.
        if texture.is_snapshot() {
            self.outstanding = self.outstanding.saturating_sub(1);
        }
        drop(texture);
    }
}

/// Cloneable handle to one `SoftwareSurface`.
///
/// The console owns one handle as its backend while the viewer keeps another
/// to read pixels back out.
#[derive(Debug, Clone)]
pub struct SharedSurface {
    inner: Arc<Mutex<SoftwareSurface>>,
}

impl SharedSurface {
    pub fn new(surface: SoftwareSurface) -> Self {
        Self {
            inner: Arc::new(Mutex::new(surface)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, SoftwareSurface> {
        self.inner.lock().expect("surface lock poisoned")
    }
}

impl RenderBackend for SharedSurface {
    fn width(&self) -> u32 {
        self.lock().width()
    }

    fn height(&self) -> u32 {
        self.lock().height()
    }

    fn fill_rect(&mut self, color: Color, rect: Rect) {
        self.lock().fill_rect(color, rect);
    }

    fn blit(&mut self, texture: &Texture, dst: Rect, src_x: u32, src_y: u32) {
        self.lock().blit(texture, dst, src_x, src_y);
    }

    fn snapshot(&mut self) -> Option<Texture> {
        self.lock().snapshot()
    }

    fn release(&mut self, texture: Texture) {
        self.lock().release(texture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(0xff, 0, 0);

    fn surface() -> SoftwareSurface {
        SoftwareSurface::new(8, 6, Color::BLACK)
    }

    // =========================================================================
    // Tests: fill_rect
    // =========================================================================

    #[test]
    fn fill_rect_paints_only_inside_rect() {
        let mut s = surface();
        s.fill_rect(RED, Rect::new(2, 1, 3, 2));
        assert_eq!(s.pixel(2, 1), Some(RED));
        assert_eq!(s.pixel(4, 2), Some(RED));
        assert_eq!(s.pixel(5, 2), Some(Color::BLACK));
        assert_eq!(s.pixel(2, 3), Some(Color::BLACK));
        assert_eq!(s.pixel(1, 1), Some(Color::BLACK));
    }

    #[test]
    fn fill_rect_clips_at_surface_edge() {
        let mut s = surface();
        s.fill_rect(RED, Rect::new(6, 4, 100, 100));
        assert_eq!(s.pixel(7, 5), Some(RED));
        assert_eq!(s.pixels().iter().filter(|&&c| c == RED).count(), 4);
    }

    #[test]
    fn fill_rect_fully_outside_is_noop() {
        let mut s = surface();
        s.fill_rect(RED, Rect::new(20, 20, 5, 5));
        assert!(s.pixels().iter().all(|&c| c == Color::BLACK));
    }

    // =========================================================================
    // Tests: blit
    // =========================================================================

    #[test]
    fn blit_copies_source_window() {
        let mut s = surface();
        let mut tex = Texture::try_new(4, 4, Color::BLACK).unwrap();
        tex.set_pixel(1, 2, RED);
        s.blit(&tex, Rect::new(0, 0, 2, 2), 1, 1);
        // (1, 2) in the texture lands at (0, 1) on the surface.
        assert_eq!(s.pixel(0, 1), Some(RED));
        assert_eq!(s.pixels().iter().filter(|&&c| c == RED).count(), 1);
    }

    #[test]
    fn blit_clips_to_texture_and_surface() {
        let mut s = surface();
        let tex = Texture::try_new(3, 3, RED).unwrap();
        s.blit(&tex, Rect::new(6, 4, 10, 10), 0, 0);
        assert_eq!(s.pixels().iter().filter(|&&c| c == RED).count(), 4);

        let mut s = surface();
        s.blit(&tex, Rect::new(0, 0, 8, 8), 2, 2);
        assert_eq!(s.pixels().iter().filter(|&&c| c == RED).count(), 1);
    }

    #[test]
    fn blit_with_source_origin_past_texture_draws_nothing() {
        let mut s = surface();
        let tex = Texture::try_new(2, 2, RED).unwrap();
        s.blit(&tex, Rect::new(0, 0, 2, 2), 5, 0);
        assert!(s.pixels().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn blit_source_x_beyond_small_texture_on_large_surface_is_noop() {
        let mut s = SoftwareSurface::new(16, 16, Color::BLACK);
        let tex = Texture::try_new(8, 8, RED).unwrap();
        s.blit(&tex, Rect::new(0, 0, 4, 4), 12, 0);
        s.blit(&tex, Rect::new(0, 0, 4, 4), 0, 9);
        assert!(s.pixels().iter().all(|&c| c == Color::BLACK));
    }

    // =========================================================================
    // Tests: snapshot / release
    // =========================================================================

    #[test]
    fn snapshot_copies_whole_surface_and_tracks_release() {
        let mut s = surface();
        s.fill_rect(RED, Rect::new(0, 5, 8, 1));
        let snap = s.snapshot().unwrap();
        assert_eq!(s.outstanding_textures(), 1);
        assert_eq!(snap.width(), 8);
        assert_eq!(snap.height(), 6);
        assert_eq!(snap.pixel(3, 5), Some(RED));

        s.release(snap);
        assert_eq!(s.outstanding_textures(), 0);
    }

    #[test]
    fn snapshot_blit_scrolls_pixels_up() {
        let mut s = surface();
        s.fill_rect(RED, Rect::new(0, 3, 8, 1));
        let snap = s.snapshot().unwrap();
        s.blit(&snap, Rect::new(0, 0, 8, 4), 0, 2);
        s.release(snap);
        assert_eq!(s.pixel(0, 1), Some(RED));
        assert_eq!(s.pixel(0, 3), Some(Color::BLACK));
    }

    #[test]
    fn releasing_surface_sized_glyph_keeps_snapshot_outstanding() {
        // One-cell surface: glyph textures share the surface's size.
        let mut s = SoftwareSurface::new(8, 16, Color::BLACK);
        let snap = s.snapshot().unwrap();
        assert!(snap.is_snapshot());

        let glyph = Texture::try_new(8, 16, RED).unwrap();
        s.release(glyph);
        assert_eq!(s.outstanding_textures(), 1);

        s.release(snap);
        assert_eq!(s.outstanding_textures(), 0);
    }

    #[test]
    fn shared_surface_handles_see_the_same_pixels() {
        let mut a = SharedSurface::new(surface());
        let b = a.clone();
        a.fill_rect(RED, Rect::new(0, 0, 1, 1));
        assert_eq!(b.lock().pixel(0, 0), Some(RED));
        assert_eq!(b.width(), 8);
        assert_eq!(b.height(), 6);
    }
}
