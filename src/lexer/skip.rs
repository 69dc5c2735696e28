//! Whitespace and comment skipping for the lexer.

use super::Lexer;
use super::error::LexError;
use crate::token::Span;

impl<'a> Lexer<'a> {
    /// Skips whitespace and comments in a loop.
    ///
    /// This method handles the case where a comment might be followed by
    /// whitespace, which might be followed by another comment, etc.
    ///
    /// # Errors
    ///
    /// Returns an error if a block comment is left unterminated.
    pub(super) fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            self.bump_while(|b| b.is_ascii_whitespace());
            if !self.skip_comment()? {
                return Ok(());
            }
        }
    }

    /// Skips a comment if one starts at the read position.
    ///
    /// Line comments run from `//` to the end of the line. Block comments
    /// run from `/*` to the matching `*/` and may span lines.
    ///
    /// # Returns
    ///
    /// `true` if a comment was skipped, `false` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error pointing at the opening `/*` if a block comment
    /// is not closed before the end of input.
    fn skip_comment(&mut self) -> Result<bool, LexError> {
        if self.lookahead("//") {
            self.bump_while(|b| b != b'\n');
            self.bump(); // the newline, if any
            return Ok(true);
        }

        if self.lookahead("/*") {
            let open_span = Span::new(self.pos, self.pos + 2, self.line, self.column);
            self.bump();
            self.bump();
            while !self.is_eof() {
                if self.lookahead("*/") {
                    self.bump();
                    self.bump();
                    return Ok(true);
                }
                self.bump();
            }
            return Err(LexError::unterminated_block_comment(open_span));
        }

        Ok(false)
    }
}
