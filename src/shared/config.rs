use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::primitive::{GlyphSize, TerminalColor};
use crate::shared::error::SimulatorError;

/// Settings applied when a console is attached to a framebuffer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub foreground: TerminalColor,
    pub background: TerminalColor,
    pub cursor_visible: bool,
    /// Paint the whole surface with the background on attach.
    pub clear_on_attach: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            foreground: TerminalColor::White,
            background: TerminalColor::Black,
            cursor_visible: true,
            clear_on_attach: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FramebufferConfig {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl Default for FramebufferConfig {
    fn default() -> Self {
        Self {
            name: "fb0".to_string(),
            width: 320,
            height: 192,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GlyphConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        let size = GlyphSize::default();
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

impl From<GlyphConfig> for GlyphSize {
    fn from(value: GlyphConfig) -> Self {
        GlyphSize::new(value.width, value.height)
    }
}

/// Configuration of the `fbcon-sim` binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub framebuffer: FramebufferConfig,
    pub glyph: GlyphConfig,
    pub console: ConsoleConfig,
    /// Program and arguments whose output is shown on the console.
    pub command: Vec<String>,
    /// Framebuffer pixels per terminal column (and per half row).
    pub scale: u16,
    pub log_file: Option<PathBuf>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            framebuffer: FramebufferConfig::default(),
            glyph: GlyphConfig::default(),
            console: ConsoleConfig::default(),
            command: vec![
                "/bin/sh".to_string(),
                "-c".to_string(),
                "uname -a; echo; ls -1 /".to_string(),
            ],
            scale: 2,
            log_file: None,
        }
    }
}

impl SimulatorConfig {
    pub fn from_json(path: &Path, text: &str) -> Result<Self, SimulatorError> {
        serde_json::from_str(text).map_err(|source| SimulatorError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, SimulatorError> {
        let text = fs::read_to_string(path).map_err(|source| SimulatorError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &text)
    }
}
