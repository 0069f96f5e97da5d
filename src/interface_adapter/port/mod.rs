pub mod console_port;
pub mod glyph_port;
pub mod pty_port;
pub mod render_port;

pub use console_port::{ConsoleDevice, ConsoleRegistry};
pub use glyph_port::GlyphProvider;
pub use pty_port::PtyPort;
pub use render_port::{Framebuffer, RenderBackend};
