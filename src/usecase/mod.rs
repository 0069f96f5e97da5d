pub mod console_registration;
pub mod framebuffer_console;

#[cfg(test)]
pub(crate) mod testing;

pub use console_registration::{register_framebuffer_console, unregister_framebuffer_console};
pub use framebuffer_console::{ConsoleState, FramebufferConsole};
