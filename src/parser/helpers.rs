//! Parser helper methods for token navigation and basic operations.

use super::Parser;
use super::error::ParseError;
use crate::token::{Span, Token, TokenKind};

impl Parser {
    /// Returns a user-friendly display string for a token kind.
    pub(super) fn token_kind_display(kind: &TokenKind) -> String {
        match kind {
            TokenKind::Identifier(s) => format!("identifier '{}'", s),
            TokenKind::StringLiteral(s) => {
                if s.len() > 20 {
                    format!("string \"{}...\"", &s[..20])
                } else {
                    format!("string \"{}\"", s)
                }
            }
            TokenKind::IntLiteral(n) => format!("number '{}'", n),
            TokenKind::Return => "'return' keyword".to_string(),
            TokenKind::If => "'if' keyword".to_string(),
            TokenKind::Else => "'else' keyword".to_string(),
            TokenKind::While => "'while' keyword".to_string(),
            TokenKind::For => "'for' keyword".to_string(),
            TokenKind::Int => "'int' keyword".to_string(),
            TokenKind::Char => "'char' keyword".to_string(),
            TokenKind::Sizeof => "'sizeof' keyword".to_string(),
            TokenKind::Struct => "'struct' keyword".to_string(),
            TokenKind::Plus => "'+'".to_string(),
            TokenKind::Minus => "'-'".to_string(),
            TokenKind::Star => "'*'".to_string(),
            TokenKind::Slash => "'/'".to_string(),
            TokenKind::Ampersand => "'&'".to_string(),
            TokenKind::Equals => "'='".to_string(),
            TokenKind::EqualEqual => "'=='".to_string(),
            TokenKind::BangEqual => "'!='".to_string(),
            TokenKind::LessThan => "'<'".to_string(),
            TokenKind::LessEqual => "'<='".to_string(),
            TokenKind::GreaterThan => "'>'".to_string(),
            TokenKind::GreaterEqual => "'>='".to_string(),
            TokenKind::LeftParen => "'('".to_string(),
            TokenKind::RightParen => "')'".to_string(),
            TokenKind::LeftBrace => "'{'".to_string(),
            TokenKind::RightBrace => "'}'".to_string(),
            TokenKind::LeftBracket => "'['".to_string(),
            TokenKind::RightBracket => "']'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::Semicolon => "';'".to_string(),
            TokenKind::Dot => "'.'".to_string(),
            TokenKind::Eof => "end of file".to_string(),
        }
    }

    /// Returns a reference to the current token.
    ///
    /// This method is safe to call at any time - if the position is past
    /// the end, it returns the last token (which should be `Eof`).
    pub(super) fn current(&self) -> &Token {
        let idx = self.pos.min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    /// Returns the kind of the current token.
    pub(super) fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    /// Returns the span of the current token.
    pub(super) fn current_span(&self) -> Span {
        self.current().span
    }

    /// Returns `true` if the current token is `Eof`.
    pub(super) fn at_eof(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Advances to the next token.
    ///
    /// Does nothing if already at `Eof`.
    pub(super) fn advance(&mut self) {
        if !self.at_eof() {
            self.pos += 1;
        }
    }

    /// Returns `true` when the current token matches `kind`, without
    /// advancing.
    pub(super) fn peek_is(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consumes the current token if it matches `kind`.
    ///
    /// # Returns
    ///
    /// `true` if the token matched and was consumed, `false` otherwise.
    pub(super) fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.peek_is(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is an identifier, returning its
    /// name.
    pub(super) fn consume_identifier(&mut self) -> Option<String> {
        if let TokenKind::Identifier(name) = self.current_kind() {
            let name = name.clone();
            self.advance();
            Some(name)
        } else {
            None
        }
    }

    /// Expects the current token to match `expected` and advances.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the current token does not match.
    pub(super) fn expect(&mut self, expected: &TokenKind) -> Result<(), ParseError> {
        if self.consume(expected) {
            Ok(())
        } else {
            Err(ParseError::unexpected_token(
                &Self::token_kind_display(expected),
                &Self::token_kind_display(self.current_kind()),
                self.current_span(),
            ))
        }
    }

    /// Expects an identifier token and returns its name.
    pub(super) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        self.consume_identifier().ok_or_else(|| {
            ParseError::expected_identifier(
                &Self::token_kind_display(self.current_kind()),
                self.current_span(),
            )
        })
    }

    /// Expects an integer literal token and returns its value.
    pub(super) fn expect_number(&mut self) -> Result<i64, ParseError> {
        if let TokenKind::IntLiteral(value) = self.current_kind() {
            let value = *value;
            self.advance();
            Ok(value)
        } else {
            Err(ParseError::expected_number(
                &Self::token_kind_display(self.current_kind()),
                self.current_span(),
            ))
        }
    }
}
