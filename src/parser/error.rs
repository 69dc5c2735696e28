//! Parse error types.

use crate::ast::typing::TypeError;
use crate::token::Span;

/// An error that occurred during parsing.
///
/// `ParseError` contains a human-readable message and the source location
/// where the error occurred, enabling rich error reporting.
///
/// # See Also
///
/// * [`crate::lexer::LexError`] - Similar error type for lexical errors
#[derive(Debug)]
pub struct ParseError {
    /// A human-readable description of the error.
    pub message: String,
    /// The source location where the error occurred.
    pub span: Span,
}

impl ParseError {
    fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }

    /// A token other than the expected one was found.
    pub(super) fn unexpected_token(expected: &str, found: &str, span: Span) -> Self {
        Self::new(format!("expected {}, found {}", expected, found), span)
    }

    /// An identifier was required.
    pub(super) fn expected_identifier(found: &str, span: Span) -> Self {
        Self::new(format!("expected an identifier, found {}", found), span)
    }

    /// A numeric literal was required (e.g. as an array length).
    pub(super) fn expected_number(found: &str, span: Span) -> Self {
        Self::new(format!("expected a number, found {}", found), span)
    }

    /// A type name (`int`, `char`, or `struct`) was required.
    pub(super) fn expected_typename(found: &str, span: Span) -> Self {
        Self::new(format!("expected a type name, found {}", found), span)
    }

    /// A name was referenced outside a call position without being declared.
    pub(super) fn undefined_variable(name: &str, span: Span) -> Self {
        Self::new(format!("undefined variable '{}'", name), span)
    }

    /// The operand types do not fit any form of the operator
    /// (e.g. `int - pointer`, or arithmetic on two pointers with `+`).
    pub(super) fn invalid_operands(span: Span) -> Self {
        Self::new("invalid operands", span)
    }

    /// A statement expression whose body does not end in an expression
    /// statement has no value to yield.
    pub(super) fn stmt_expr_void(span: Span) -> Self {
        Self::new(
            "statement expression returning void is not supported",
            span,
        )
    }

    /// A token that cannot start an expression.
    pub(super) fn unexpected_expression_start(found: &str, span: Span) -> Self {
        Self::new(format!("expected an expression, found {}", found), span)
    }

    /// An internal invariant was violated. Indicates a compiler bug.
    pub(super) fn internal(message: &str, span: Span) -> Self {
        Self::new(
            format!("internal parser error: {}. This is a compiler bug.", message),
            span,
        )
    }
}

impl From<TypeError> for ParseError {
    fn from(error: TypeError) -> Self {
        ParseError {
            message: error.message,
            span: error.span,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.span.line, self.span.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}
