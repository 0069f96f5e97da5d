use std::io::{self, Read};
use std::path::Path;

use portable_pty::{CommandBuilder, PtySize, native_pty_system};

use crate::interface_adapter::port::PtyPort;
use crate::shared::error::SimulatorError;

/// Size of one non-blocking read from the pty master.
const READ_CHUNK: usize = 4096;

/// The spawned process and the master side of its pty.
struct PtyInstance {
    // Held so the pty stays open while the child runs.
    _master: Box<dyn portable_pty::MasterPty + Send>,
    child: Box<dyn portable_pty::Child + Send + Sync>,
    reader: Box<dyn Read + Send>,
}

/// Concrete implementation of `PtyPort` using the `portable-pty` crate.
///
/// Runs at most one child at a time; spawning again replaces (and kills) the
/// previous one.
pub struct PortablePtyAdapter {
    instance: Option<PtyInstance>,
}

impl PortablePtyAdapter {
    pub fn new() -> Self {
        Self { instance: None }
    }

    fn instance_mut(&mut self) -> Result<&mut PtyInstance, SimulatorError> {
        self.instance.as_mut().ok_or(SimulatorError::NoProcess)
    }
}

impl Default for PortablePtyAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PortablePtyAdapter {
    fn drop(&mut self) {
        if self.instance.is_some() {
            let _ = self.kill();
        }
    }
}

fn spawn_error(e: impl std::fmt::Display) -> SimulatorError {
    SimulatorError::PtySpawn(io::Error::other(e.to_string()))
}

/// Set the file descriptor to non-blocking mode using libc fcntl.
fn set_nonblocking(fd: std::os::fd::RawFd) -> io::Result<()> {
    // SAFETY: `fd` is a valid open file descriptor obtained from the pty master.
    // `fcntl` with `F_GETFL`/`F_SETFL` is safe for valid fds.
    unsafe {
        let flags = libc::fcntl(fd, libc::F_GETFL);
        if flags < 0 {
            return Err(io::Error::last_os_error());
        }
        if libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) < 0 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

impl PtyPort for PortablePtyAdapter {
    fn spawn(
        &mut self,
        command: &[String],
        cwd: &Path,
        cols: u16,
        rows: u16,
    ) -> Result<(), SimulatorError> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| spawn_error("empty command"))?;

        if self.instance.is_some() {
            self.kill()?;
        }

        let pair = native_pty_system()
            .openpty(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(spawn_error)?;

        let mut cmd = CommandBuilder::new(program);
        cmd.args(args);
        cmd.cwd(cwd);
        // The console only understands cursor moves and clear-screen.
        cmd.env("TERM", "dumb");

        let child = pair.slave.spawn_command(cmd).map_err(spawn_error)?;
        let reader = pair.master.try_clone_reader().map_err(spawn_error)?;

        // The reader shares the master's fd, so this makes reads non-blocking.
        if let Some(raw_fd) = pair.master.as_raw_fd() {
            set_nonblocking(raw_fd).map_err(SimulatorError::PtySpawn)?;
        }

        tracing::debug!(program = %program, cols, rows, "spawned pty process");
        self.instance = Some(PtyInstance {
            _master: pair.master,
            child,
            reader,
        });
        Ok(())
    }

    fn read(&mut self) -> Result<Vec<u8>, SimulatorError> {
        let instance = self.instance_mut()?;
        let mut buf = [0u8; READ_CHUNK];
        match instance.reader.read(&mut buf) {
            Ok(n) => Ok(buf[..n].to_vec()),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(Vec::new()),
            // Linux reports EIO once the child side has closed.
            Err(e) if e.raw_os_error() == Some(libc::EIO) => Ok(Vec::new()),
            Err(e) => Err(SimulatorError::PtyIo(e)),
        }
    }

    fn try_wait(&mut self) -> Result<Option<i32>, SimulatorError> {
        let instance = self.instance_mut()?;
        match instance.child.try_wait() {
            Ok(Some(status)) => Ok(Some(status.exit_code() as i32)),
            Ok(None) => Ok(None),
            Err(e) => Err(SimulatorError::PtyIo(e)),
        }
    }

    fn kill(&mut self) -> Result<(), SimulatorError> {
        let mut instance = self.instance.take().ok_or(SimulatorError::NoProcess)?;
        // Already-exited children make kill fail; that is fine.
        if instance.child.try_wait().map_err(SimulatorError::PtyIo)?.is_none() {
            instance.child.kill().map_err(SimulatorError::PtyIo)?;
        }
        // Reap the child process to avoid zombies
        let _ = instance.child.wait();
        tracing::debug!("pty process stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    fn read_until_exit(pty: &mut PortablePtyAdapter) -> Vec<u8> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut out = Vec::new();
        while Instant::now() < deadline {
            out.extend(pty.read().unwrap());
            if pty.try_wait().unwrap().is_some() {
                out.extend(pty.read().unwrap());
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        out
    }

    #[test]
    fn operations_without_process_fail() {
        let mut pty = PortablePtyAdapter::new();
        assert!(matches!(pty.read(), Err(SimulatorError::NoProcess)));
        assert!(matches!(pty.try_wait(), Err(SimulatorError::NoProcess)));
        assert!(matches!(pty.kill(), Err(SimulatorError::NoProcess)));
    }

    #[test]
    fn empty_command_is_a_spawn_error() {
        let mut pty = PortablePtyAdapter::new();
        let err = pty.spawn(&[], Path::new("/"), 80, 24).unwrap_err();
        assert!(matches!(err, SimulatorError::PtySpawn(_)));
    }

    #[test]
    fn spawned_command_output_is_readable() {
        let mut pty = PortablePtyAdapter::new();
        let command = vec!["/bin/sh".to_string(), "-c".to_string(), "echo fbcon".to_string()];
        pty.spawn(&command, Path::new("/"), 40, 12).unwrap();
        let out = read_until_exit(&mut pty);
        assert!(String::from_utf8_lossy(&out).contains("fbcon"));
    }

    #[test]
    fn kill_stops_long_running_command() {
        let mut pty = PortablePtyAdapter::new();
        let command = vec!["/bin/sh".to_string(), "-c".to_string(), "sleep 30".to_string()];
        pty.spawn(&command, Path::new("/"), 40, 12).unwrap();
        pty.kill().unwrap();
        assert!(matches!(pty.try_wait(), Err(SimulatorError::NoProcess)));
    }
}
