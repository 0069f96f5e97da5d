use std::collections::TryReserveError;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ConsoleError {
    #[error("Invalid framebuffer: {0}")]
    InvalidFramebuffer(String),

    #[error("Invalid glyph size {width}x{height}")]
    InvalidGlyphSize { width: u32, height: u32 },

    #[error("Framebuffer {width}x{height} px cannot hold a single glyph")]
    GridTooSmall { width: u32, height: u32 },

    #[error("Failed to allocate console buffer: {0}")]
    Allocation(#[source] TryReserveError),

    #[error("Console already registered: {0}")]
    DuplicateConsole(String),

    #[error("Console not found: {0}")]
    ConsoleNotFound(String),
}

#[derive(thiserror::Error, Debug)]
pub enum SimulatorError {
    #[error("Failed to spawn pty: {0}")]
    PtySpawn(#[source] std::io::Error),

    #[error("Pty I/O error: {0}")]
    PtyIo(#[source] std::io::Error),

    #[error("No process running")]
    NoProcess,

    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Console error: {0}")]
    Console(#[from] ConsoleError),

    #[error("TUI error: {0}")]
    Tui(#[source] std::io::Error),
}
