pub mod pty;
pub mod registry;
pub mod render;
pub mod tui;
