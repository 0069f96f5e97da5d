const ESC: u8 = 0x1b;

/// Maximum number of parameter bytes buffered in one CSI sequence.
pub const MAX_PARAMS: usize = 8;

/// Parameter bytes collected after `ESC [`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsiParams {
    bytes: [u8; MAX_PARAMS],
    len: usize,
}

impl CsiParams {
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append a byte; `false` when the buffer is already full.
    pub fn push(&mut self, byte: u8) -> bool {
        match self.bytes.get_mut(self.len) {
            Some(slot) => {
                *slot = byte;
                self.len += 1;
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParserState {
    #[default]
    Normal,
    Esc,
    Csi(CsiParams),
}

/// What the console should do in response to one input byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Ordinary byte for the UTF-8 decoder.
    Byte(u8),
    SaveCursor,
    RestoreCursor,
    CursorUp(u32),
    CursorDown(u32),
    CursorForward(u32),
    CursorBack(u32),
    ClearScreen,
}

/// Interpret a count byte. ASCII digits count as their value, so `'3'`
/// moves 3 cells rather than 51; any other byte counts as its raw value.
fn count(byte: u8) -> u32 {
    if byte.is_ascii_digit() {
        (byte - b'0') as u32
    } else {
        byte as u32
    }
}

fn dispatch(params: CsiParams) -> (ParserState, Option<Action>) {
    let action = match *params.as_slice() {
        [b's'] => Action::SaveCursor,
        [b'u'] => Action::RestoreCursor,
        [b'A'] => Action::CursorUp(1),
        [b'B'] => Action::CursorDown(1),
        [b'C'] => Action::CursorForward(1),
        [b'D'] => Action::CursorBack(1),
        // A lone unknown byte may still be the count of a two-byte command.
        [_] => return (ParserState::Csi(params), None),
        [n, b'A'] => Action::CursorUp(count(n)),
        [n, b'B'] => Action::CursorDown(count(n)),
        [n, b'C'] => Action::CursorForward(count(n)),
        [n, b'D'] => Action::CursorBack(count(n)),
        [_, b'J'] => Action::ClearScreen,
        _ => {
            tracing::trace!(params = ?params.as_slice(), "abandoning csi sequence");
            return (ParserState::Normal, None);
        }
    };
    (ParserState::Normal, Some(action))
}

/// Pure transition function: next state plus an optional action.
///
/// Recognised sequences (`n` is a single count byte):
///
/// | bytes            | action                     |
/// |------------------|----------------------------|
/// | `ESC [ s`        | save cursor                |
/// | `ESC [ u`        | restore cursor             |
/// | `ESC [ A/B/C/D`  | move up/down/right/left 1  |
/// | `ESC [ n A/B/C/D`| move by `n`                |
/// | `ESC [ n J`      | clear the whole screen     |
///
/// Anything else abandons the sequence and returns to `Normal` without
/// replaying the swallowed bytes.
pub fn transition(state: ParserState, byte: u8) -> (ParserState, Option<Action>) {
    match state {
        ParserState::Normal if byte == ESC => (ParserState::Esc, None),
        ParserState::Normal => (ParserState::Normal, Some(Action::Byte(byte))),
        ParserState::Esc if byte == b'[' => (ParserState::Csi(CsiParams::default()), None),
        ParserState::Esc => (ParserState::Normal, None),
        ParserState::Csi(mut params) => {
            if !params.push(byte) {
                return (ParserState::Normal, None);
            }
            dispatch(params)
        }
    }
}

/// Stateful wrapper around [`transition`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapeParser {
    state: ParserState,
}

impl EscapeParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    pub fn advance(&mut self, byte: u8) -> Option<Action> {
        let (next, action) = transition(self.state, byte);
        self.state = next;
        action
    }

    pub fn reset(&mut self) {
        self.state = ParserState::Normal;
    }
}
