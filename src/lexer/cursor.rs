//! The lexer's read position over the source bytes.
//!
//! minic source is scanned as a byte stream: every token the grammar
//! admits is pure ASCII, so the read position moves one byte at a time
//! and anything outside ASCII is rejected at its first byte. The line
//! and column counters ride along for diagnostics; a column counts
//! bytes, which coincides with characters everywhere a token can start.

use super::Lexer;

impl<'a> Lexer<'a> {
    /// The unconsumed remainder of the input.
    ///
    /// Only valid at a token boundary: the interiors of string literals
    /// and block comments are traversed bytewise, where the read
    /// position may sit inside a multi-byte character.
    pub(super) fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Returns the byte at the read position, `None` at end of input.
    pub(super) fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Returns `true` when the remaining input starts with `prefix`.
    ///
    /// Used for multi-byte punctuators and comment delimiters, where the
    /// decision needs more than the next byte. Compares bytes, so it is
    /// safe at any read position, token boundary or not.
    pub(super) fn lookahead(&self, prefix: &str) -> bool {
        self.input.as_bytes()[self.pos..].starts_with(prefix.as_bytes())
    }

    /// Returns `true` if the whole input has been consumed.
    pub(super) fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Consumes one byte, keeping the line and column counters current.
    pub(super) fn bump(&mut self) {
        match self.peek_byte() {
            Some(b'\n') => {
                self.pos += 1;
                self.line += 1;
                self.column = 1;
            }
            Some(_) => {
                self.pos += 1;
                self.column += 1;
            }
            None => {}
        }
    }

    /// Consumes bytes for as long as `pred` accepts them.
    pub(super) fn bump_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.peek_byte().is_some_and(&pred) {
            self.bump();
        }
    }
}
