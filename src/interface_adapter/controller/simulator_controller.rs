use std::path::Path;

use crate::interface_adapter::port::{ConsoleRegistry, PtyPort};
use crate::shared::error::{ConsoleError, SimulatorError};
use crate::usecase::unregister_framebuffer_console;

/// Upper bound on pty reads per poll so one chatty child cannot starve the
/// draw loop.
const MAX_READS_PER_POLL: usize = 64;

/// Simulator actions (infrastructure-independent).
///
/// The TUI layer turns timer ticks and key events into `SimAction`s and
/// forwards them to `SimulatorController::dispatch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimAction {
    /// Move everything the child printed into the console.
    PollOutput,
    Quit,
}

/// Feeds one child process's output into one registered console.
///
/// Knows the console only by name and talks to it through the registry,
/// the same way any other byte producer would.
pub struct SimulatorController<P: PtyPort, R: ConsoleRegistry> {
    pty: P,
    registry: R,
    console: String,
    exit_code: Option<i32>,
    bytes_written: usize,
}

impl<P: PtyPort, R: ConsoleRegistry> SimulatorController<P, R> {
    pub fn new(pty: P, registry: R, console: impl Into<String>) -> Self {
        Self {
            pty,
            registry,
            console: console.into(),
            exit_code: None,
            bytes_written: 0,
        }
    }

    pub fn console_name(&self) -> &str {
        &self.console
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    /// Exit code of the child once it has finished.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Total bytes handed to the console so far.
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Start `command` on a pty the size of the console grid.
    pub fn start(
        &mut self,
        command: &[String],
        cwd: &Path,
        cols: u16,
        rows: u16,
    ) -> Result<(), SimulatorError> {
        self.exit_code = None;
        self.pty.spawn(command, cwd, cols, rows)
    }

    /// Dispatch an action.
    ///
    /// `SimAction::Quit` is a no-op here; the runner checks for it before
    /// dispatching and stops its loop.
    pub fn dispatch(&mut self, action: SimAction) -> Result<(), SimulatorError> {
        match action {
            SimAction::PollOutput => {
                self.poll_output()?;
            }
            SimAction::Quit => {}
        }
        Ok(())
    }

    /// Copy pending child output into the console and note whether the child
    /// has exited. Returns the number of bytes written.
    pub fn poll_output(&mut self) -> Result<usize, SimulatorError> {
        if self.exit_code.is_some() {
            return Ok(0);
        }

        let mut written = 0;
        for _ in 0..MAX_READS_PER_POLL {
            let bytes = self.pty.read()?;
            if bytes.is_empty() {
                break;
            }
            let console = self
                .registry
                .search(&self.console)
                .ok_or_else(|| ConsoleError::ConsoleNotFound(self.console.clone()))?;
            written += console.write(&bytes);
        }
        self.bytes_written += written;

        if let Some(code) = self.pty.try_wait()? {
            tracing::debug!(code, "child process exited");
            self.exit_code = Some(code);
        }
        Ok(written)
    }

    /// Stop the child if it is still running and unregister the console.
    pub fn shutdown(&mut self) -> Result<(), SimulatorError> {
        if self.exit_code.is_none() {
            match self.pty.kill() {
                Ok(()) | Err(SimulatorError::NoProcess) => {}
                Err(e) => return Err(e),
            }
        }
        unregister_framebuffer_console(&mut self.registry, &self.console)?;
        Ok(())
    }
}
