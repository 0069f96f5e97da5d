use crate::shared::error::ConsoleError;

/// Byte-stream console device, the shape the console registry expects.
pub trait ConsoleDevice: Send {
    fn name(&self) -> &str;

    /// Fill `buf` with input; returns how many bytes were produced.
    fn read(&mut self, buf: &mut [u8]) -> usize;

    /// Consume `buf`; returns how many bytes were taken.
    fn write(&mut self, buf: &[u8]) -> usize;

    fn suspend(&mut self);

    fn resume(&mut self);
}

/// Name-keyed table of console devices.
pub trait ConsoleRegistry {
    /// Add a console under its own name. On failure the console is dropped.
    fn register(&mut self, console: Box<dyn ConsoleDevice>) -> Result<(), ConsoleError>;

    /// Remove and return the console registered under `name`.
    fn unregister(&mut self, name: &str) -> Result<Box<dyn ConsoleDevice>, ConsoleError>;

    fn search(&mut self, name: &str) -> Option<&mut dyn ConsoleDevice>;

    fn names(&self) -> Vec<String>;
}
