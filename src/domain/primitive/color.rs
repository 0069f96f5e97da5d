use serde::{Deserialize, Serialize};

/// Opaque RGBA value as handed to the rendering backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xff)
    }
}

/// The sixteen classic terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalColor {
    Black = 0x00,
    Red = 0x01,
    Green = 0x02,
    Yellow = 0x03,
    Blue = 0x04,
    Magenta = 0x05,
    Cyan = 0x06,
    White = 0x07,
    BrightBlack = 0x08,
    BrightRed = 0x09,
    BrightGreen = 0x0a,
    BrightYellow = 0x0b,
    BrightBlue = 0x0c,
    BrightMagenta = 0x0d,
    BrightCyan = 0x0e,
    BrightWhite = 0x0f,
}

const PALETTE: [[u8; 3]; 16] = [
    [0x00, 0x00, 0x00],
    [0xcd, 0x00, 0x00],
    [0x00, 0xcd, 0x00],
    [0xcd, 0xcd, 0x00],
    [0x00, 0x00, 0xee],
    [0xcd, 0x00, 0xcd],
    [0x00, 0xcd, 0xcd],
    [0xe5, 0xe5, 0xe5],
    [0x7f, 0x7f, 0x7f],
    [0xff, 0x00, 0x00],
    [0x00, 0xff, 0x00],
    [0xff, 0xff, 0x00],
    [0x5c, 0x5c, 0xff],
    [0xff, 0x00, 0xff],
    [0x00, 0xff, 0xff],
    [0xff, 0xff, 0xff],
];

const ALL: [TerminalColor; 16] = [
    TerminalColor::Black,
    TerminalColor::Red,
    TerminalColor::Green,
    TerminalColor::Yellow,
    TerminalColor::Blue,
    TerminalColor::Magenta,
    TerminalColor::Cyan,
    TerminalColor::White,
    TerminalColor::BrightBlack,
    TerminalColor::BrightRed,
    TerminalColor::BrightGreen,
    TerminalColor::BrightYellow,
    TerminalColor::BrightBlue,
    TerminalColor::BrightMagenta,
    TerminalColor::BrightCyan,
    TerminalColor::BrightWhite,
];

impl TerminalColor {
    /// Look up a palette entry; only the low four bits are significant.
    pub fn from_index(index: u8) -> Self {
        ALL[(index & 0x0f) as usize]
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn is_bright(self) -> bool {
        self.index() >= 0x08
    }

    pub fn to_color(self) -> Color {
        let [r, g, b] = PALETTE[self.index() as usize];
        Color::rgb(r, g, b)
    }
}

impl From<TerminalColor> for Color {
    fn from(value: TerminalColor) -> Self {
        value.to_color()
    }
}
