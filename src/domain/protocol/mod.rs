pub mod escape;
pub mod utf8;

pub use escape::{Action, EscapeParser, ParserState};
pub use utf8::Utf8Decoder;
