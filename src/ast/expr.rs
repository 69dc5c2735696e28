//! Expression nodes for the minic AST.

use crate::token::Span;

use super::program::VarId;
use super::stmt::Stmt;
use super::types::Type;

/// A binary operator, after pointer-arithmetic disambiguation.
///
/// The parser rewrites source-level `+` and `-` into the pointer variants
/// based on the operand types: `PtrAdd`/`PtrSub` scale the integer operand
/// by the pointee size, and `PtrDiff` divides the raw byte difference by
/// it. For `PtrAdd` and `PtrSub` the pointer-typed operand is always the
/// left-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Integer addition.
    Add,
    /// Integer subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
    /// Pointer + integer, scaled by the pointee size.
    PtrAdd,
    /// Pointer - integer, scaled by the pointee size.
    PtrSub,
    /// Pointer - pointer, yielding an element count.
    PtrDiff,
    /// Equality comparison `==`.
    Eq,
    /// Inequality comparison `!=`.
    Ne,
    /// Less-than comparison `<`.
    Lt,
    /// Less-or-equal comparison `<=`.
    Le,
}

/// The kind of an expression.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// An integer literal.
    IntLiteral(i64),

    /// A reference to a local or global variable.
    ///
    /// String literals also produce this kind: each literal is interned as
    /// an anonymous global `char` array and referenced here by its id.
    Var(VarId),

    /// A binary operation.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// The left operand (the pointer operand for `PtrAdd`/`PtrSub`).
        lhs: Box<Expr>,
        /// The right operand.
        rhs: Box<Expr>,
    },

    /// An assignment `lhs = rhs`. Evaluates to the stored value.
    Assign {
        /// The target lvalue.
        lhs: Box<Expr>,
        /// The value to store.
        rhs: Box<Expr>,
    },

    /// Address-of `&operand`.
    Addr(Box<Expr>),

    /// Dereference `*operand`.
    Deref(Box<Expr>),

    /// Struct member access `base.name`.
    Member {
        /// The struct-typed expression being accessed.
        base: Box<Expr>,
        /// The member name.
        name: String,
        /// Byte offset of the member, filled in by the typing pass.
        offset: usize,
    },

    /// A function call.
    ///
    /// The callee is not resolved against the symbol table: calling an
    /// undeclared name emits a call to that external symbol.
    Call {
        /// The name of the function being called.
        callee: String,
        /// The arguments, evaluated left to right.
        args: Vec<Expr>,
    },

    /// A statement expression `({ stmt* last; })`.
    ///
    /// The trailing expression statement is held apart in `last`; its value
    /// becomes the value of the whole expression.
    StmtExpr {
        /// The leading statements, generated for effect only.
        stmts: Vec<Stmt>,
        /// The expression whose value the statement expression yields.
        last: Box<Expr>,
    },
}

/// An expression with its source location and inferred type.
///
/// `ty` starts out as `None` and is filled in by the typing pass
/// ([`crate::ast::typing::add_type`]); every expression reachable from a
/// successfully parsed function has `Some` type.
#[derive(Debug, Clone)]
pub struct Expr {
    /// The kind of expression.
    pub kind: ExprKind,
    /// The inferred result type, `None` until typing has run.
    pub ty: Option<Type>,
    /// The source location of this expression.
    pub span: Span,
}

impl Expr {
    /// Creates a new, untyped expression with the given kind and span.
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            ty: None,
            span,
        }
    }
}
