//! The bottom-up typing pass.
//!
//! [`add_type`] decorates an expression tree with result types after it has
//! been built. The rules:
//!
//! - integer literals, arithmetic, comparisons, pointer difference, and
//!   calls yield `int`
//! - variable references yield the referent's type
//! - `PtrAdd`/`PtrSub` and assignment yield the left operand's type
//! - address-of yields a pointer to the operand's type, except that taking
//!   the address of an array yields a pointer to the element type
//! - dereference yields the operand type's base and rejects operands
//!   without one
//! - member access yields the member's type and records its offset
//! - a statement expression yields the type of its trailing expression
//!
//! Already-typed nodes are left untouched, so the parser can type operands
//! eagerly (it must, to disambiguate `+` and `-`) and re-run the pass over
//! whole statements afterwards.

use crate::token::Span;

use super::expr::{BinaryOp, Expr, ExprKind};
use super::program::Var;
use super::stmt::{Stmt, StmtKind};
use super::types::Type;

/// An error detected while typing an expression.
///
/// Carries a human-readable message and the source location, like the
/// other phase errors; the parser converts it into a
/// [`ParseError`](crate::parser::ParseError).
#[derive(Debug)]
pub struct TypeError {
    /// A human-readable description of the error.
    pub message: String,
    /// The source location where the error occurred.
    pub span: Span,
}

impl TypeError {
    fn new(message: impl Into<String>, span: Span) -> Self {
        TypeError {
            message: message.into(),
            span,
        }
    }

    fn invalid_dereference(span: Span) -> Self {
        Self::new("invalid pointer dereference", span)
    }

    fn not_a_struct(span: Span) -> Self {
        Self::new("member access on a value that is not a struct", span)
    }

    fn unknown_member(name: &str, span: Span) -> Self {
        Self::new(format!("no member named '{}'", name), span)
    }

    fn unknown_variable_id(span: Span) -> Self {
        Self::new(
            "internal error: variable reference outside the arena",
            span,
        )
    }

    fn untyped(span: Span) -> Self {
        Self::new("internal error: expression was not typed", span)
    }
}

impl std::fmt::Display for TypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.span.line, self.span.column, self.message
        )
    }
}

impl std::error::Error for TypeError {}

/// Fills in `expr.ty` and the types of everything below it.
///
/// `vars` is the program's variable arena, used to resolve the types of
/// variable references.
///
/// # Errors
///
/// Returns a [`TypeError`] for dereferences of non-pointer values and for
/// member access on non-structs or with unknown member names.
pub fn add_type(expr: &mut Expr, vars: &[Var]) -> Result<(), TypeError> {
    if expr.ty.is_some() {
        return Ok(());
    }

    let span = expr.span;
    let ty = match &mut expr.kind {
        ExprKind::IntLiteral(_) => Type::Int,

        ExprKind::Var(id) => {
            let var = vars
                .get(id.index())
                .ok_or_else(|| TypeError::unknown_variable_id(span))?;
            var.ty.clone()
        }

        ExprKind::Binary { op, lhs, rhs } => {
            add_type(lhs, vars)?;
            add_type(rhs, vars)?;
            match op {
                BinaryOp::PtrAdd | BinaryOp::PtrSub => lhs
                    .ty
                    .clone()
                    .ok_or_else(|| TypeError::untyped(span))?,
                _ => Type::Int,
            }
        }

        ExprKind::Assign { lhs, rhs } => {
            add_type(lhs, vars)?;
            add_type(rhs, vars)?;
            lhs.ty
                .clone()
                .ok_or_else(|| TypeError::untyped(span))?
        }

        ExprKind::Addr(operand) => {
            add_type(operand, vars)?;
            match operand.ty.as_ref() {
                Some(Type::Array(base, _)) => Type::pointer_to((**base).clone()),
                Some(ty) => Type::pointer_to(ty.clone()),
                None => return Err(TypeError::untyped(span)),
            }
        }

        ExprKind::Deref(operand) => {
            add_type(operand, vars)?;
            let base = operand.ty.as_ref().and_then(|ty| ty.base());
            base.cloned()
                .ok_or_else(|| TypeError::invalid_dereference(span))?
        }

        ExprKind::Member { base, name, offset } => {
            add_type(base, vars)?;
            let base_ty = base
                .ty
                .as_ref()
                .ok_or_else(|| TypeError::untyped(span))?;
            if !matches!(base_ty, Type::Struct(_)) {
                return Err(TypeError::not_a_struct(base.span));
            }
            let member = base_ty
                .find_member(name)
                .ok_or_else(|| TypeError::unknown_member(name, span))?;
            *offset = member.offset;
            member.ty.clone()
        }

        ExprKind::Call { args, .. } => {
            for arg in args {
                add_type(arg, vars)?;
            }
            Type::Int
        }

        ExprKind::StmtExpr { stmts, last } => {
            for stmt in stmts {
                add_type_stmt(stmt, vars)?;
            }
            add_type(last, vars)?;
            last.ty
                .clone()
                .ok_or_else(|| TypeError::untyped(span))?
        }
    };

    expr.ty = Some(ty);
    Ok(())
}

/// Types every expression contained in `stmt`, recursively.
pub fn add_type_stmt(stmt: &mut Stmt, vars: &[Var]) -> Result<(), TypeError> {
    match &mut stmt.kind {
        StmtKind::Expr(expr) | StmtKind::Return(expr) => add_type(expr, vars),

        StmtKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            add_type(cond, vars)?;
            add_type_stmt(then_branch, vars)?;
            if let Some(els) = else_branch {
                add_type_stmt(els, vars)?;
            }
            Ok(())
        }

        StmtKind::While { cond, body } => {
            add_type(cond, vars)?;
            add_type_stmt(body, vars)
        }

        StmtKind::For {
            init,
            cond,
            inc,
            body,
        } => {
            for expr in [init, cond, inc].into_iter().flatten() {
                add_type(expr, vars)?;
            }
            add_type_stmt(body, vars)
        }

        StmtKind::Block(stmts) => {
            for stmt in stmts {
                add_type_stmt(stmt, vars)?;
            }
            Ok(())
        }

        StmtKind::Null => Ok(()),
    }
}
