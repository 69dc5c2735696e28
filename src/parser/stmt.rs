//! Statement and declaration parsing.

use super::Parser;
use super::error::ParseError;
use crate::ast::{Expr, ExprKind, Stmt, StmtKind};
use crate::token::TokenKind;

impl Parser {
    /// Parses a single statement.
    ///
    /// # Grammar
    ///
    /// ```text
    /// stmt = "return" expr ";"
    ///      | "if" "(" expr ")" stmt ("else" stmt)?
    ///      | "while" "(" expr ")" stmt
    ///      | "for" "(" expr? ";" expr? ";" expr? ")" stmt
    ///      | "{" stmt* "}"
    ///      | declaration
    ///      | expr ";"
    /// ```
    pub(super) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.current_kind() {
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::LeftBrace => self.parse_block_stmt(),
            _ if self.is_typename() => self.parse_declaration(),
            _ => {
                let expr = self.parse_expr()?;
                let span = expr.span;
                self.expect(&TokenKind::Semicolon)?;
                Ok(Stmt::new(StmtKind::Expr(expr), span))
            }
        }
    }

    fn parse_return_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start_span = self.current_span();
        self.expect(&TokenKind::Return)?;
        let value = self.parse_expr()?;
        let span = start_span.to(value.span);
        self.expect(&TokenKind::Semicolon)?;
        Ok(Stmt::new(StmtKind::Return(value), span))
    }

    fn parse_if_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start_span = self.current_span();
        self.expect(&TokenKind::If)?;
        self.expect(&TokenKind::LeftParen)?;
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::RightParen)?;

        let then_branch = self.parse_stmt()?;
        let else_branch = if self.consume(&TokenKind::Else) {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };

        let end_span = else_branch
            .as_ref()
            .map(|stmt| stmt.span)
            .unwrap_or(then_branch.span);
        let span = start_span.to(end_span);

        Ok(Stmt::new(
            StmtKind::If {
                cond,
                then_branch: Box::new(then_branch),
                else_branch,
            },
            span,
        ))
    }

    fn parse_while_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start_span = self.current_span();
        self.expect(&TokenKind::While)?;
        self.expect(&TokenKind::LeftParen)?;
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::RightParen)?;

        let body = self.parse_stmt()?;
        let span = start_span.to(body.span);

        Ok(Stmt::new(
            StmtKind::While {
                cond,
                body: Box::new(body),
            },
            span,
        ))
    }

    fn parse_for_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start_span = self.current_span();
        self.expect(&TokenKind::For)?;
        self.expect(&TokenKind::LeftParen)?;

        let init = if self.consume(&TokenKind::Semicolon) {
            None
        } else {
            let expr = self.parse_expr()?;
            self.expect(&TokenKind::Semicolon)?;
            Some(expr)
        };

        let cond = if self.consume(&TokenKind::Semicolon) {
            None
        } else {
            let expr = self.parse_expr()?;
            self.expect(&TokenKind::Semicolon)?;
            Some(expr)
        };

        let inc = if self.consume(&TokenKind::RightParen) {
            None
        } else {
            let expr = self.parse_expr()?;
            self.expect(&TokenKind::RightParen)?;
            Some(expr)
        };

        let body = self.parse_stmt()?;
        let span = start_span.to(body.span);

        Ok(Stmt::new(
            StmtKind::For {
                init,
                cond,
                inc,
                body: Box::new(body),
            },
            span,
        ))
    }

    /// Parses a brace-delimited block.
    ///
    /// Names declared inside the block go out of scope when it closes.
    pub(super) fn parse_block_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start_span = self.current_span();
        self.expect(&TokenKind::LeftBrace)?;

        let scope_depth = self.scope_depth();
        let mut stmts = Vec::new();
        while !self.peek_is(&TokenKind::RightBrace) {
            stmts.push(self.parse_stmt()?);
        }
        let close_span = self.current_span();
        self.expect(&TokenKind::RightBrace)?;
        self.restore_scope(scope_depth);

        Ok(Stmt::new(StmtKind::Block(stmts), start_span.to(close_span)))
    }

    /// Parses a local variable declaration.
    ///
    /// A declaration with an initializer lowers to an assignment
    /// expression statement; one without becomes a no-op [`StmtKind::Null`]
    /// (the variable still reserves frame space).
    ///
    /// # Grammar
    ///
    /// ```text
    /// declaration = basetype ident ("[" num "]")* ("=" expr)? ";"
    /// ```
    fn parse_declaration(&mut self) -> Result<Stmt, ParseError> {
        let start_span = self.current_span();
        let base = self.base_type()?;
        let name_span = self.current_span();
        let name = self.expect_identifier()?;
        let ty = self.type_suffix(base)?;
        let id = self.new_lvar(name, ty);

        if self.consume(&TokenKind::Semicolon) {
            return Ok(Stmt::new(StmtKind::Null, start_span.to(name_span)));
        }

        self.expect(&TokenKind::Equals)?;
        let rhs = self.parse_assign()?;
        let span = start_span.to(rhs.span);
        self.expect(&TokenKind::Semicolon)?;

        let lhs = Expr::new(ExprKind::Var(id), name_span);
        let assign = Expr::new(
            ExprKind::Assign {
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            span,
        );
        Ok(Stmt::new(StmtKind::Expr(assign), span))
    }
}
