//! Forward-only cursor over a mangled symbol.
//!
//! EOF is signalled by [`SENTINEL`] (`0x00`). No code in the legacy grammar
//! is `0x00`, so a production that dispatches on [`Cursor::peek`] simply
//! fails to match at end of input. Productions whose meaning depends on the
//! peeked byte itself (rather than on matching a code) must still check
//! [`Cursor::is_eof`] first: an interior `0x00` in corrupted input peeks the
//! same as EOF.

/// Byte returned by peeking or consuming past the end of input.
pub const SENTINEL: u8 = 0x00;

/// Forward-only cursor over the bytes of one mangled symbol.
///
/// The cursor is [`Copy`]; a copy is a snapshot that can be compared against
/// later to see how much input a production consumed. It can never be
/// rewound: there is no `set_pos`.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// The complete input.
    src: &'a [u8],
    /// Offset of the first unconsumed byte.
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self::from_bytes(input.as_bytes())
    }

    /// Create a cursor over raw bytes.
    ///
    /// Symbols recovered from corrupted memory need not be valid UTF-8.
    pub fn from_bytes(src: &'a [u8]) -> Self {
        Self { src, pos: 0 }
    }

    /// Returns `true` once every byte has been consumed.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Number of unconsumed bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.src.len() - self.pos
    }

    /// Returns `true` if at least `len` bytes remain.
    #[inline]
    pub fn has_at_least(&self, len: usize) -> bool {
        len <= self.remaining()
    }

    /// Offset of the first unconsumed byte.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The unconsumed input, without consuming it.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.src[self.pos..]
    }

    /// Returns the next byte without consuming it, or [`SENTINEL`] at EOF.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    /// Returns the byte `offset` positions ahead, or [`SENTINEL`] past EOF.
    #[inline]
    pub fn peek_at(&self, offset: usize) -> u8 {
        self.pos
            .checked_add(offset)
            .and_then(|i| self.src.get(i))
            .copied()
            .unwrap_or(SENTINEL)
    }

    /// Returns `true` if the next byte is an ASCII digit.
    #[inline]
    pub fn at_digit(&self) -> bool {
        self.peek().is_ascii_digit()
    }

    /// Consume and return the next byte.
    ///
    /// At EOF nothing is consumed and [`SENTINEL`] is returned.
    #[inline]
    pub fn next_byte(&mut self) -> u8 {
        let b = self.peek();
        if !self.is_eof() {
            self.pos += 1;
        }
        b
    }

    /// Consume the next byte if it equals `byte`.
    #[inline]
    pub fn eat(&mut self, byte: u8) -> bool {
        if !self.is_eof() && self.peek() == byte {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume `literal` if the input continues with exactly those bytes.
    ///
    /// On a partial match nothing is consumed.
    #[inline]
    pub fn eat_str(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal.as_bytes()) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Consume exactly `len` bytes.
    ///
    /// Returns `None`, consuming nothing, if fewer than `len` bytes remain.
    pub fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        if !self.has_at_least(len) {
            return None;
        }
        let taken = &self.src[self.pos..self.pos + len];
        self.pos += len;
        Some(taken)
    }

    /// Consume and return everything that is left.
    pub fn take_rest(&mut self) -> &'a [u8] {
        let rest = self.rest();
        self.pos = self.src.len();
        rest
    }

    /// Consume bytes up to, but not including, `delim`.
    ///
    /// Returns the consumed bytes and whether `delim` was found. When it was
    /// not, the whole remainder is consumed. The delimiter itself is left
    /// for the caller to [`eat`](Self::eat).
    pub fn read_until(&mut self, delim: u8) -> (&'a [u8], bool) {
        let rest = self.rest();
        match memchr::memchr(delim, rest) {
            Some(offset) => {
                self.pos += offset;
                (&rest[..offset], true)
            }
            None => (self.take_rest(), false),
        }
    }
}

#[cfg(test)]
mod tests;
