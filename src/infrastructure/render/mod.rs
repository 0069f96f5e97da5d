pub mod bitmap_font;
pub mod software_surface;

pub use bitmap_font::BitmapFont;
pub use software_surface::{SharedSurface, SoftwareSurface};
