use crate::interface_adapter::port::{ConsoleRegistry, Framebuffer, GlyphProvider, RenderBackend};
use crate::shared::config::ConsoleConfig;
use crate::shared::error::ConsoleError;
use crate::usecase::FramebufferConsole;

/// Attach a console to `framebuffer` and register it under the framebuffer's
/// name.
///
/// Either step failing leaves nothing behind: a console that was built but
/// rejected by the registry is dropped along with its framebuffer handle.
pub fn register_framebuffer_console<R, B, G>(
    registry: &mut R,
    framebuffer: Framebuffer<B>,
    glyphs: G,
    config: &ConsoleConfig,
) -> Result<(), ConsoleError>
where
    R: ConsoleRegistry + ?Sized,
    B: RenderBackend + Send + 'static,
    G: GlyphProvider + Send + 'static,
{
    let name = framebuffer.name().to_string();
    let console = FramebufferConsole::attach(framebuffer, glyphs, config)?;
    registry.register(Box::new(console)).inspect_err(|e| {
        tracing::debug!(name = %name, error = %e, "console registration rejected");
    })?;
    tracing::debug!(name = %name, "console registered");
    Ok(())
}

/// Remove the console registered under `name` and release it.
pub fn unregister_framebuffer_console<R>(registry: &mut R, name: &str) -> Result<(), ConsoleError>
where
    R: ConsoleRegistry + ?Sized,
{
    let console = registry.unregister(name)?;
    drop(console);
    tracing::debug!(name, "console unregistered");
    Ok(())
}
