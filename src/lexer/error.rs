//! Lexical analysis error types.
//!
//! This module defines [`LexError`], which represents errors that can occur
//! during tokenization.

use crate::token::Span;

/// An error that occurred during lexical analysis.
///
/// `LexError` contains a human-readable message and the source location
/// where the error occurred, enabling rich error reporting with tools
/// like [`ariadne`].
///
/// [`ariadne`]: https://docs.rs/ariadne
#[derive(Debug)]
pub struct LexError {
    /// A human-readable description of the error.
    pub message: String,
    /// The source location where the error occurred.
    pub span: Span,
}

impl LexError {
    fn new(message: impl Into<String>, span: Span) -> Self {
        LexError {
            message: message.into(),
            span,
        }
    }

    /// An unexpected character that cannot start any token.
    pub(super) fn invalid_token(c: char, span: Span) -> Self {
        Self::new(format!("invalid token '{}'", c), span)
    }

    /// A string literal with no closing quote. Points at the opening quote.
    pub(super) fn unterminated_string(span: Span) -> Self {
        Self::new("unterminated string literal", span)
    }

    /// A block comment with no closing `*/`. Points at the opening `/*`.
    pub(super) fn unterminated_block_comment(span: Span) -> Self {
        Self::new("unterminated block comment", span)
    }

    /// An integer literal that does not fit in an `i64`.
    pub(super) fn integer_overflow(literal: &str, span: Span) -> Self {
        Self::new(
            format!("integer literal '{}' is out of range", literal),
            span,
        )
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.span.line, self.span.column, self.message
        )
    }
}

impl std::error::Error for LexError {}
