use crate::infrastructure::pty::PortablePtyAdapter;

/// Creates a concrete PtyPort implementation.
pub fn create_pty_adapter() -> PortablePtyAdapter {
    PortablePtyAdapter::new()
}
