pub mod console_adapter_factory;
pub mod pty_adapter_factory;
