//! Type syntax parsing.
//!
//! Handles the `basetype` production (including anonymous struct
//! declarations and pointer stars) and the `("[" num "]")*` array
//! suffixes that appear after declared names.

use super::Parser;
use super::error::ParseError;
use crate::ast::Type;
use crate::token::TokenKind;

impl Parser {
    /// Returns `true` when the current token can start a type.
    pub(super) fn is_typename(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Int | TokenKind::Char | TokenKind::Struct
        )
    }

    /// Parses a base type.
    ///
    /// # Grammar
    ///
    /// ```text
    /// basetype = ("char" | "int" | struct-decl) "*"*
    /// ```
    pub(super) fn base_type(&mut self) -> Result<Type, ParseError> {
        let mut ty = if self.consume(&TokenKind::Char) {
            Type::Char
        } else if self.consume(&TokenKind::Int) {
            Type::Int
        } else if self.peek_is(&TokenKind::Struct) {
            self.struct_decl()?
        } else {
            return Err(ParseError::expected_typename(
                &Self::token_kind_display(self.current_kind()),
                self.current_span(),
            ));
        };

        while self.consume(&TokenKind::Star) {
            ty = Type::pointer_to(ty);
        }

        Ok(ty)
    }

    /// Parses an anonymous struct declaration.
    ///
    /// Member offsets are assigned in declaration order without padding.
    ///
    /// # Grammar
    ///
    /// ```text
    /// struct-decl   = "struct" "{" struct-member* "}"
    /// struct-member = basetype ident ("[" num "]")* ";"
    /// ```
    fn struct_decl(&mut self) -> Result<Type, ParseError> {
        self.expect(&TokenKind::Struct)?;
        self.expect(&TokenKind::LeftBrace)?;

        let mut members = Vec::new();
        while !self.consume(&TokenKind::RightBrace) {
            members.push(self.struct_member()?);
        }

        Ok(Type::struct_of(members))
    }

    fn struct_member(&mut self) -> Result<(String, Type), ParseError> {
        let base = self.base_type()?;
        let name = self.expect_identifier()?;
        let ty = self.type_suffix(base)?;
        self.expect(&TokenKind::Semicolon)?;
        Ok((name, ty))
    }

    /// Parses the array suffixes after a declared name, if any.
    ///
    /// Suffixes nest to the right: `int x[2][3]` declares an array of two
    /// arrays of three ints.
    pub(super) fn type_suffix(&mut self, base: Type) -> Result<Type, ParseError> {
        if !self.consume(&TokenKind::LeftBracket) {
            return Ok(base);
        }
        let len = self.expect_number()?;
        self.expect(&TokenKind::RightBracket)?;
        let base = self.type_suffix(base)?;
        Ok(Type::array_of(base, len as usize))
    }
}
