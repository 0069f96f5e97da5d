pub mod cell;
pub mod color;
pub mod geometry;
pub mod texture;

pub use cell::{Cell, CursorPos, CursorState};
pub use color::{Color, TerminalColor};
pub use geometry::{GlyphSize, Rect};
pub use texture::Texture;
