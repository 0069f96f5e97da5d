/// Longest valid UTF-8 encoding of a scalar value.
pub const MAX_SEQUENCE_LEN: usize = 4;

/// Incremental UTF-8 decoder fed one byte at a time.
///
/// Holds at most one partially received code point. Bytes that can never
/// become part of a valid sequence are dropped as soon as they are detected,
/// so the buffer cannot fill up and the decoder never wedges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf8Decoder {
    buf: [u8; MAX_SEQUENCE_LEN],
    len: usize,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes of the sequence currently being assembled.
    pub fn pending(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Append `byte`; returns the code point once a sequence completes.
    pub fn feed(&mut self, byte: u8) -> Option<char> {
        if self.len == MAX_SEQUENCE_LEN {
            // Cannot happen with the eager discard below; kept as a hard bound.
            self.discard(1);
        }
        self.buf[self.len] = byte;
        self.len += 1;

        loop {
            match std::str::from_utf8(&self.buf[..self.len]) {
                Ok(s) => {
                    let ch = s.chars().next()?;
                    self.discard(ch.len_utf8());
                    return Some(ch);
                }
                Err(err) if err.valid_up_to() > 0 => {
                    let ch = std::str::from_utf8(&self.buf[..err.valid_up_to()])
                        .ok()
                        .and_then(|s| s.chars().next())?;
                    self.discard(ch.len_utf8());
                    return Some(ch);
                }
                // Incomplete but still a legal prefix.
                Err(err) if err.error_len().is_none() => return None,
                Err(err) => {
                    let bad = err.error_len().unwrap_or(1);
                    tracing::trace!(bytes = ?&self.buf[..bad], "discarding invalid utf-8");
                    self.discard(bad);
                    if self.len == 0 {
                        return None;
                    }
                }
            }
        }
    }

    fn discard(&mut self, count: usize) {
        let count = count.min(self.len);
        self.buf.copy_within(count..self.len, 0);
        self.len -= count;
    }
}
