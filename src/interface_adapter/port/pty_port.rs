use std::path::Path;

use crate::shared::error::SimulatorError;

/// PTY (pseudo-terminal) operations port.
///
/// Runs the one child process whose output the simulator feeds into the
/// console. Concrete implementations (e.g., PortablePtyAdapter) live in
/// infrastructure.
pub trait PtyPort: Send {
    /// Spawn `command` on a pty of `cols` x `rows` cells.
    fn spawn(
        &mut self,
        command: &[String],
        cwd: &Path,
        cols: u16,
        rows: u16,
    ) -> Result<(), SimulatorError>;

    /// Non-blocking read of whatever the child has printed.
    fn read(&mut self) -> Result<Vec<u8>, SimulatorError>;

    /// Non-blocking check for process exit. Returns exit code if exited.
    fn try_wait(&mut self) -> Result<Option<i32>, SimulatorError>;

    /// Force-kill the process and release resources.
    fn kill(&mut self) -> Result<(), SimulatorError>;
}
