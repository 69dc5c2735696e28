//! Lexical analyzer for the minic source language.
//!
//! This module provides the [`Lexer`] struct which converts source code text
//! into a stream of [`Token`]s for parsing.
//!
//! # Overview
//!
//! The lexer performs the following tasks:
//! - Scans the input byte by byte (every token is pure ASCII; string
//!   literal and comment interiors may carry arbitrary bytes)
//! - Recognizes keywords, identifiers, literals, and punctuation
//! - Tracks source positions for error reporting
//! - Skips whitespace and comments
//!
//! # Supported Tokens
//!
//! - **Keywords**: `return`, `if`, `else`, `while`, `for`, `int`, `char`,
//!   `sizeof`, `struct`. A keyword is only recognized when followed by a
//!   non-identifier character (`intx` is an identifier).
//! - **Identifiers**: start with an ASCII alphabetic character or
//!   underscore, continue with ASCII alphanumerics and underscores.
//! - **Integer literals**: decimal digit sequences stored as `i64`. Values
//!   exceeding the `i64` range are a lexer error.
//! - **String literals**: enclosed in double quotes. The interior bytes are
//!   taken verbatim; there is no escape processing, and a literal may span
//!   multiple lines. An unterminated literal is an error at the opening
//!   quote.
//! - **Punctuation**: `== != <= >=` (longest match first) and the
//!   single-character set `+ - * / & = < > ( ) { } [ ] , ; .`
//! - **Comments**: line comments `//` and block comments `/* */`. An
//!   unterminated block comment is an error at its opening position.
//!
//! # Examples
//!
//! ```
//! use minic::lexer::Lexer;
//! use minic::token::TokenKind;
//!
//! let mut lexer = Lexer::new("return 42;");
//! let tokens = lexer.tokenize().unwrap();
//!
//! assert!(matches!(tokens[0].kind, TokenKind::Return));
//! assert!(matches!(tokens[1].kind, TokenKind::IntLiteral(42)));
//! assert!(matches!(tokens[2].kind, TokenKind::Semicolon));
//! assert!(matches!(tokens[3].kind, TokenKind::Eof));
//! ```
//!
//! # Module Structure
//!
//! - [`error`] - Error types for lexical analysis
//! - `cursor` - The byte-oriented read position
//! - `skip` - Whitespace and comment handling
//! - `tokens` - Token recognition and reading
//! - `tests` - Unit tests (test-only)
//!
//! # See Also
//!
//! * [`crate::token`] - Token type definitions
//! * [`crate::parser`] - Parser that consumes the token stream

mod cursor;
mod error;
mod skip;
mod tokens;

#[cfg(test)]
mod tests;

pub use error::LexError;

use crate::token::{Span, Token, TokenKind};

/// A lexical analyzer that tokenizes minic source code.
///
/// The `Lexer` maintains its position within the input and tracks
/// line/column numbers for error reporting. It is designed to be used once
/// per source file.
///
/// # Lifetime
///
/// The `'a` lifetime parameter ties the lexer to the input string slice,
/// ensuring the input remains valid while the lexer is in use.
pub struct Lexer<'a> {
    /// The input source code being tokenized.
    pub(super) input: &'a str,
    /// Current byte position in the input.
    pub(super) pos: usize,
    /// Current line number (1-indexed).
    pub(super) line: usize,
    /// Current column number (1-indexed, counted in bytes).
    pub(super) column: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new `Lexer` for the given input string.
    ///
    /// The lexer starts at the beginning of the input with line and column
    /// numbers initialized to 1.
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenizes the entire input and returns a vector of tokens.
    ///
    /// This method consumes the input from start to end, producing tokens
    /// until the end of input is reached. The returned vector always ends
    /// with a [`TokenKind::Eof`] token.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An unexpected character is encountered
    /// - A string literal or block comment is not terminated
    /// - An integer literal exceeds the `i64` range
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_eof() {
                let span = Span::new(self.pos, self.pos, self.line, self.column);
                tokens.push(Token::new(TokenKind::Eof, span));
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }
}
