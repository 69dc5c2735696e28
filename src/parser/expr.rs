//! Expression parsing.
//!
//! Implements the precedence ladder of the grammar (assignment, equality,
//! relational, additive, multiplicative, unary, postfix, primary) and the
//! disambiguation of `+`/`-` into pointer arithmetic based on the operand
//! types.

use super::Parser;
use super::error::ParseError;
use crate::ast::{BinaryOp, Expr, ExprKind, StmtKind, Type, VarId, typing};
use crate::token::{Span, TokenKind};

impl Parser {
    /// Parses an expression.
    ///
    /// # Grammar
    ///
    /// ```text
    /// expr = assign
    /// ```
    pub(super) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_assign()
    }

    /// Parses an assignment. Right-associative: `a = b = c` assigns `c`
    /// to `b`, then the result to `a`.
    ///
    /// # Grammar
    ///
    /// ```text
    /// assign = equality ("=" assign)?
    /// ```
    pub(super) fn parse_assign(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_equality()?;

        if self.consume(&TokenKind::Equals) {
            let rhs = self.parse_assign()?;
            let span = lhs.span.to(rhs.span);
            return Ok(Expr::new(
                ExprKind::Assign {
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                span,
            ));
        }

        Ok(lhs)
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.parse_relational()?;

        loop {
            if self.consume(&TokenKind::EqualEqual) {
                let rhs = self.parse_relational()?;
                let span = node.span.to(rhs.span);
                node = Self::binary(BinaryOp::Eq, node, rhs, span);
            } else if self.consume(&TokenKind::BangEqual) {
                let rhs = self.parse_relational()?;
                let span = node.span.to(rhs.span);
                node = Self::binary(BinaryOp::Ne, node, rhs, span);
            } else {
                return Ok(node);
            }
        }
    }

    /// Parses a relational comparison. `>` and `>=` are normalized by
    /// swapping the operands into `<` and `<=` nodes.
    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.parse_add()?;

        loop {
            if self.consume(&TokenKind::LessThan) {
                let rhs = self.parse_add()?;
                let span = node.span.to(rhs.span);
                node = Self::binary(BinaryOp::Lt, node, rhs, span);
            } else if self.consume(&TokenKind::LessEqual) {
                let rhs = self.parse_add()?;
                let span = node.span.to(rhs.span);
                node = Self::binary(BinaryOp::Le, node, rhs, span);
            } else if self.consume(&TokenKind::GreaterThan) {
                let rhs = self.parse_add()?;
                let span = node.span.to(rhs.span);
                node = Self::binary(BinaryOp::Lt, rhs, node, span);
            } else if self.consume(&TokenKind::GreaterEqual) {
                let rhs = self.parse_add()?;
                let span = node.span.to(rhs.span);
                node = Self::binary(BinaryOp::Le, rhs, node, span);
            } else {
                return Ok(node);
            }
        }
    }

    fn parse_add(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.parse_mul()?;

        loop {
            let op_span = self.current_span();
            if self.consume(&TokenKind::Plus) {
                let rhs = self.parse_mul()?;
                node = self.new_add(node, rhs, op_span)?;
            } else if self.consume(&TokenKind::Minus) {
                let rhs = self.parse_mul()?;
                node = self.new_sub(node, rhs, op_span)?;
            } else {
                return Ok(node);
            }
        }
    }

    fn parse_mul(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.parse_unary()?;

        loop {
            if self.consume(&TokenKind::Star) {
                let rhs = self.parse_unary()?;
                let span = node.span.to(rhs.span);
                node = Self::binary(BinaryOp::Mul, node, rhs, span);
            } else if self.consume(&TokenKind::Slash) {
                let rhs = self.parse_unary()?;
                let span = node.span.to(rhs.span);
                node = Self::binary(BinaryOp::Div, node, rhs, span);
            } else {
                return Ok(node);
            }
        }
    }

    /// Parses a unary expression.
    ///
    /// `-x` lowers to `0 - x`; a unary `+` is dropped.
    ///
    /// # Grammar
    ///
    /// ```text
    /// unary = ("+" | "-" | "*" | "&")? unary | postfix
    /// ```
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let start_span = self.current_span();

        if self.consume(&TokenKind::Plus) {
            return self.parse_unary();
        }
        if self.consume(&TokenKind::Minus) {
            let operand = self.parse_unary()?;
            let zero = Expr::new(ExprKind::IntLiteral(0), start_span);
            return self.new_sub(zero, operand, start_span);
        }
        if self.consume(&TokenKind::Star) {
            let operand = self.parse_unary()?;
            let span = start_span.to(operand.span);
            return Ok(Expr::new(ExprKind::Deref(Box::new(operand)), span));
        }
        if self.consume(&TokenKind::Ampersand) {
            let operand = self.parse_unary()?;
            let span = start_span.to(operand.span);
            return Ok(Expr::new(ExprKind::Addr(Box::new(operand)), span));
        }

        self.parse_postfix()
    }

    /// Parses postfix operators: array indexing and member access.
    ///
    /// `a[b]` desugars to `*(a + b)`, with the `+` going through the usual
    /// pointer-arithmetic rewriting.
    ///
    /// # Grammar
    ///
    /// ```text
    /// postfix = primary ("[" expr "]" | "." ident)*
    /// ```
    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.parse_primary()?;

        loop {
            let op_span = self.current_span();
            if self.consume(&TokenKind::LeftBracket) {
                let index = self.parse_expr()?;
                let close_span = self.current_span();
                self.expect(&TokenKind::RightBracket)?;
                let span = node.span.to(close_span);
                let sum = self.new_add(node, index, op_span)?;
                node = Expr::new(ExprKind::Deref(Box::new(sum)), span);
            } else if self.consume(&TokenKind::Dot) {
                let member_span = self.current_span();
                let name = self.expect_identifier()?;
                let span = node.span.to(member_span);
                node = Expr::new(
                    ExprKind::Member {
                        base: Box::new(node),
                        name,
                        offset: 0,
                    },
                    span,
                );
            } else {
                return Ok(node);
            }
        }
    }

    /// Parses a primary expression.
    ///
    /// # Grammar
    ///
    /// ```text
    /// primary = "(" "{" stmt+ "}" ")"
    ///         | "(" expr ")"
    ///         | "sizeof" unary
    ///         | ident ("(" args? ")")?
    ///         | string
    ///         | num
    /// ```
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let start_span = self.current_span();

        if self.consume(&TokenKind::LeftParen) {
            if self.consume(&TokenKind::LeftBrace) {
                return self.parse_stmt_expr(start_span);
            }
            let mut inner = self.parse_expr()?;
            let close_span = self.current_span();
            self.expect(&TokenKind::RightParen)?;
            inner.span = start_span.to(close_span);
            return Ok(inner);
        }

        if self.consume(&TokenKind::Sizeof) {
            let mut operand = self.parse_unary()?;
            typing::add_type(&mut operand, &self.vars)?;
            let size = match operand.ty.as_ref() {
                Some(ty) => ty.size(),
                None => return Err(ParseError::internal("sizeof operand has no type", start_span)),
            };
            let span = start_span.to(operand.span);
            return Ok(Expr::new(ExprKind::IntLiteral(size as i64), span));
        }

        match self.current_kind() {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();

                if self.peek_is(&TokenKind::LeftParen) {
                    return self.parse_call(name, start_span);
                }

                let id = self
                    .find_var(&name)
                    .ok_or_else(|| ParseError::undefined_variable(&name, start_span))?;
                Ok(Expr::new(ExprKind::Var(id), start_span))
            }
            TokenKind::StringLiteral(value) => {
                let value = value.clone();
                self.advance();
                let id = self.intern_string(value);
                Ok(Expr::new(ExprKind::Var(id), start_span))
            }
            TokenKind::IntLiteral(value) => {
                let value = *value;
                self.advance();
                Ok(Expr::new(ExprKind::IntLiteral(value), start_span))
            }
            _ => Err(ParseError::unexpected_expression_start(
                &Self::token_kind_display(self.current_kind()),
                start_span,
            )),
        }
    }

    /// Parses a function call. The callee name has already been consumed.
    ///
    /// The name is not resolved against the symbol table: a call to an
    /// undeclared name compiles to a call to that external symbol.
    ///
    /// # Grammar
    ///
    /// ```text
    /// args = assign ("," assign)*
    /// ```
    fn parse_call(&mut self, callee: String, start_span: Span) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;

        let mut args = Vec::new();
        if !self.peek_is(&TokenKind::RightParen) {
            loop {
                args.push(self.parse_assign()?);
                if !self.consume(&TokenKind::Comma) {
                    break;
                }
            }
        }

        let end_span = self.current_span();
        self.expect(&TokenKind::RightParen)?;

        Ok(Expr::new(
            ExprKind::Call { callee, args },
            start_span.to(end_span),
        ))
    }

    /// Parses a statement expression `({ stmt+ })`. The opening `(` and
    /// `{` have already been consumed.
    ///
    /// The body must end in an expression statement; that trailing
    /// expression is split off as the value of the whole construct.
    fn parse_stmt_expr(&mut self, start_span: Span) -> Result<Expr, ParseError> {
        let scope_depth = self.scope_depth();
        let mut stmts = Vec::new();
        while !self.consume(&TokenKind::RightBrace) {
            stmts.push(self.parse_stmt()?);
        }
        let close_span = self.current_span();
        self.expect(&TokenKind::RightParen)?;
        self.restore_scope(scope_depth);

        let span = start_span.to(close_span);
        let Some(last_stmt) = stmts.pop() else {
            return Err(ParseError::stmt_expr_void(span));
        };
        let StmtKind::Expr(last) = last_stmt.kind else {
            return Err(ParseError::stmt_expr_void(span));
        };

        Ok(Expr::new(
            ExprKind::StmtExpr {
                stmts,
                last: Box::new(last),
            },
            span,
        ))
    }

    /// Interns a string literal as an anonymous global.
    ///
    /// Each occurrence gets a fresh `.L.data.N` label and a `char` array
    /// type sized for the payload plus the terminating NUL.
    fn intern_string(&mut self, value: String) -> VarId {
        let label = format!(".L.data.{}", self.string_count);
        self.string_count += 1;
        let ty = Type::array_of(Type::Char, value.len() + 1);
        self.new_gvar(label, ty, Some(value))
    }

    fn binary(op: BinaryOp, lhs: Expr, rhs: Expr, span: Span) -> Expr {
        Expr::new(
            ExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            span,
        )
    }

    /// Builds a `+` node, choosing between integer and pointer addition.
    ///
    /// Both operands are typed first. int + int is a plain `Add`; pointer
    /// (or array) + int becomes `PtrAdd`, swapping the operands if the
    /// pointer is on the right so the pointer operand is always the lhs
    /// and the node's type is the pointer type. Anything else is an error
    /// at the operator.
    fn new_add(&mut self, mut lhs: Expr, mut rhs: Expr, op_span: Span) -> Result<Expr, ParseError> {
        typing::add_type(&mut lhs, &self.vars)?;
        typing::add_type(&mut rhs, &self.vars)?;

        let (l_int, l_ptr) = Self::operand_shape(&lhs, op_span)?;
        let (r_int, r_ptr) = Self::operand_shape(&rhs, op_span)?;
        let span = lhs.span.to(rhs.span);

        if l_int && r_int {
            Ok(Self::binary(BinaryOp::Add, lhs, rhs, span))
        } else if l_ptr && r_int {
            Ok(Self::binary(BinaryOp::PtrAdd, lhs, rhs, span))
        } else if l_int && r_ptr {
            Ok(Self::binary(BinaryOp::PtrAdd, rhs, lhs, span))
        } else {
            Err(ParseError::invalid_operands(op_span))
        }
    }

    /// Builds a `-` node, choosing between integer subtraction, pointer
    /// displacement, and pointer difference. `int - pointer` is an error.
    fn new_sub(&mut self, mut lhs: Expr, mut rhs: Expr, op_span: Span) -> Result<Expr, ParseError> {
        typing::add_type(&mut lhs, &self.vars)?;
        typing::add_type(&mut rhs, &self.vars)?;

        let (l_int, l_ptr) = Self::operand_shape(&lhs, op_span)?;
        let (r_int, r_ptr) = Self::operand_shape(&rhs, op_span)?;
        let span = lhs.span.to(rhs.span);

        if l_int && r_int {
            Ok(Self::binary(BinaryOp::Sub, lhs, rhs, span))
        } else if l_ptr && r_int {
            Ok(Self::binary(BinaryOp::PtrSub, lhs, rhs, span))
        } else if l_ptr && r_ptr {
            Ok(Self::binary(BinaryOp::PtrDiff, lhs, rhs, span))
        } else {
            Err(ParseError::invalid_operands(op_span))
        }
    }

    /// Classifies a typed operand as integer-like and/or pointer-like.
    fn operand_shape(expr: &Expr, op_span: Span) -> Result<(bool, bool), ParseError> {
        match expr.ty.as_ref() {
            Some(ty) => Ok((ty.is_integer(), ty.base().is_some())),
            None => Err(ParseError::internal("operand was not typed", op_span)),
        }
    }
}
