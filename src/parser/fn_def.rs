//! Top-level item parsing: function definitions and global variables.

use super::Parser;
use super::error::ParseError;
use crate::ast::{Function, VarId, align_to, typing};
use crate::token::TokenKind;

impl Parser {
    /// Decides whether the upcoming item is a function definition.
    ///
    /// Speculatively reads a base type and an identifier, checks for a
    /// following `(`, then rewinds the cursor. Reading the base type can
    /// itself fail (e.g. the input does not start with a type name), in
    /// which case the error is reported from the rewound position's
    /// tokens.
    pub(super) fn looks_like_function(&mut self) -> Result<bool, ParseError> {
        let saved = self.pos;
        let result = self
            .base_type()
            .map(|_| self.consume_identifier().is_some() && self.peek_is(&TokenKind::LeftParen));
        self.pos = saved;
        result
    }

    /// Parses a global variable declaration.
    ///
    /// # Grammar
    ///
    /// ```text
    /// global-var = basetype ident ("[" num "]")* ";"
    /// ```
    pub(super) fn parse_global_var(&mut self) -> Result<(), ParseError> {
        let base = self.base_type()?;
        let name = self.expect_identifier()?;
        let ty = self.type_suffix(base)?;
        self.expect(&TokenKind::Semicolon)?;
        self.new_gvar(name, ty, None);
        Ok(())
    }

    /// Parses a function definition.
    ///
    /// After the body is parsed, every statement is run through the typing
    /// pass, then frame offsets are assigned: each local (parameters
    /// included) gets the running sum of sizes so far plus its own size,
    /// and the frame is aligned up to 8 bytes.
    ///
    /// # Grammar
    ///
    /// ```text
    /// function = basetype ident "(" params? ")" "{" stmt* "}"
    /// params   = param ("," param)*
    /// param    = basetype ident
    /// ```
    pub(super) fn parse_function(&mut self) -> Result<Function, ParseError> {
        self.locals.clear();

        // The declared return type is accepted but carries no meaning:
        // every function returns an 8-byte value in rax.
        let _return_type = self.base_type()?;
        let name = self.expect_identifier()?;

        let scope_depth = self.scope_depth();
        self.expect(&TokenKind::LeftParen)?;
        let params = self.parse_params()?;

        self.expect(&TokenKind::LeftBrace)?;
        let mut body = Vec::new();
        while !self.consume(&TokenKind::RightBrace) {
            body.push(self.parse_stmt()?);
        }
        self.restore_scope(scope_depth);

        for stmt in &mut body {
            typing::add_type_stmt(stmt, &self.vars)?;
        }

        let mut offset = 0;
        for &id in &self.locals {
            let var = &mut self.vars[id.index()];
            offset += var.ty.size();
            var.offset = offset;
        }
        let stack_size = align_to(offset, 8);

        Ok(Function {
            name,
            params,
            locals: std::mem::take(&mut self.locals),
            body,
            stack_size,
        })
    }

    fn parse_params(&mut self) -> Result<Vec<VarId>, ParseError> {
        let mut params = Vec::new();
        if self.consume(&TokenKind::RightParen) {
            return Ok(params);
        }

        loop {
            let ty = self.base_type()?;
            let name = self.expect_identifier()?;
            params.push(self.new_lvar(name, ty));
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }

        self.expect(&TokenKind::RightParen)?;
        Ok(params)
    }
}
