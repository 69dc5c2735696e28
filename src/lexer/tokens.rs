//! Token recognition.
//!
//! Tried in order at each position: multi-byte punctuators (longest match
//! first), single-byte punctuators, string literals, integer literals,
//! then identifiers and keywords. A byte that none of these accept is an
//! invalid token.

use super::Lexer;
use super::error::LexError;
use crate::token::{Span, Token, TokenKind};

/// The two-byte punctuators, tried before any single-byte one so that
/// `<=` never lexes as `<` `=`.
const TWO_BYTE_PUNCTUATORS: [(&str, TokenKind); 4] = [
    ("==", TokenKind::EqualEqual),
    ("!=", TokenKind::BangEqual),
    ("<=", TokenKind::LessEqual),
    (">=", TokenKind::GreaterEqual),
];

/// Maps a byte to its single-byte punctuator, if it is one.
fn single_byte_punctuator(byte: u8) -> Option<TokenKind> {
    let kind = match byte {
        b'+' => TokenKind::Plus,
        b'-' => TokenKind::Minus,
        b'*' => TokenKind::Star,
        b'/' => TokenKind::Slash,
        b'&' => TokenKind::Ampersand,
        b'=' => TokenKind::Equals,
        b'<' => TokenKind::LessThan,
        b'>' => TokenKind::GreaterThan,
        b'(' => TokenKind::LeftParen,
        b')' => TokenKind::RightParen,
        b'{' => TokenKind::LeftBrace,
        b'}' => TokenKind::RightBrace,
        b'[' => TokenKind::LeftBracket,
        b']' => TokenKind::RightBracket,
        b',' => TokenKind::Comma,
        b';' => TokenKind::Semicolon,
        b'.' => TokenKind::Dot,
        _ => return None,
    };
    Some(kind)
}

/// Maps an identifier spelling to its keyword, if it is one.
fn keyword(spelling: &str) -> Option<TokenKind> {
    let kind = match spelling {
        "return" => TokenKind::Return,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "while" => TokenKind::While,
        "for" => TokenKind::For,
        "int" => TokenKind::Int,
        "char" => TokenKind::Char,
        "sizeof" => TokenKind::Sizeof,
        "struct" => TokenKind::Struct,
        _ => return None,
    };
    Some(kind)
}

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

impl<'a> Lexer<'a> {
    /// Wraps the bytes consumed since `start_pos` into a token.
    fn token_since(
        &self,
        kind: TokenKind,
        start_pos: usize,
        start_line: usize,
        start_column: usize,
    ) -> Token {
        let span = Span::new(start_pos, self.pos, start_line, start_column);
        Token::new(kind, span)
    }

    /// Reads and returns the next token from the input.
    ///
    /// Called repeatedly by [`tokenize`](super::Lexer::tokenize) once
    /// whitespace and comments have been skipped and the input is known
    /// not to be exhausted.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] if no token can start at the current
    /// position or if a string or numeric literal is malformed.
    pub(super) fn next_token(&mut self) -> Result<Token, LexError> {
        let start_pos = self.pos;
        let start_line = self.line;
        let start_column = self.column;

        for (spelling, kind) in TWO_BYTE_PUNCTUATORS {
            if self.lookahead(spelling) {
                self.bump();
                self.bump();
                return Ok(self.token_since(kind, start_pos, start_line, start_column));
            }
        }

        let byte = self.peek_byte().unwrap_or(0);

        if byte == b'!' {
            // `!` only exists as part of `!=`, which was tried above.
            self.bump();
            let span = Span::new(start_pos, self.pos, start_line, start_column);
            return Err(LexError::invalid_token('!', span));
        }

        if let Some(kind) = single_byte_punctuator(byte) {
            self.bump();
            return Ok(self.token_since(kind, start_pos, start_line, start_column));
        }

        if byte == b'"' {
            return self.read_string(start_pos, start_line, start_column);
        }

        if byte.is_ascii_digit() {
            return self.read_number(start_pos, start_line, start_column);
        }

        if byte.is_ascii_alphabetic() || byte == b'_' {
            return Ok(self.read_identifier(start_pos, start_line, start_column));
        }

        // Nothing can start here. Report the full character, not just its
        // first byte, so the diagnostic stays on a character boundary.
        let c = self.rest().chars().next().unwrap_or('\0');
        let span = Span::new(
            self.pos,
            self.pos + c.len_utf8(),
            self.line,
            self.column,
        );
        Err(LexError::invalid_token(c, span))
    }

    /// Reads a string literal. The opening quote is at the read position.
    ///
    /// The interior bytes are taken verbatim up to the next double quote;
    /// there is no escape processing, so a literal can span lines but can
    /// never contain a double quote.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] pointing at the opening quote if the input
    /// ends before a closing quote is found.
    fn read_string(
        &mut self,
        start_pos: usize,
        start_line: usize,
        start_column: usize,
    ) -> Result<Token, LexError> {
        self.bump(); // opening "
        let content_start = self.pos;

        loop {
            match self.peek_byte() {
                Some(b'"') => {
                    let value = self.input[content_start..self.pos].to_string();
                    self.bump(); // closing "
                    return Ok(self.token_since(
                        TokenKind::StringLiteral(value),
                        start_pos,
                        start_line,
                        start_column,
                    ));
                }
                Some(_) => self.bump(),
                None => {
                    return Err(LexError::unterminated_string(Span::new(
                        start_pos,
                        start_pos + 1,
                        start_line,
                        start_column,
                    )));
                }
            }
        }
    }

    /// Reads an identifier or keyword.
    ///
    /// The maximal run of identifier bytes is consumed first, then
    /// matched against the keyword table, so a keyword followed by an
    /// identifier byte (e.g. `intx`) lexes as a plain identifier.
    fn read_identifier(
        &mut self,
        start_pos: usize,
        start_line: usize,
        start_column: usize,
    ) -> Token {
        self.bump_while(is_ident_byte);
        let spelling = &self.input[start_pos..self.pos];

        let kind = keyword(spelling)
            .unwrap_or_else(|| TokenKind::Identifier(spelling.to_string()));
        self.token_since(kind, start_pos, start_line, start_column)
    }

    /// Reads an integer literal.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] if the digit sequence does not fit in an
    /// `i64`.
    fn read_number(
        &mut self,
        start_pos: usize,
        start_line: usize,
        start_column: usize,
    ) -> Result<Token, LexError> {
        self.bump_while(|b| b.is_ascii_digit());

        let spelling = &self.input[start_pos..self.pos];
        let span = Span::new(start_pos, self.pos, start_line, start_column);

        let value: i64 = spelling
            .parse()
            .map_err(|_: std::num::ParseIntError| LexError::integer_overflow(spelling, span))?;

        Ok(Token::new(TokenKind::IntLiteral(value), span))
    }
}
