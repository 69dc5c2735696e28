//! Code generation error types.
//!
//! This module defines [`CodegenError`], which represents errors that can
//! occur while emitting assembly.

use crate::token::Span;

/// An error that occurred during code generation.
///
/// Contains a human-readable message and optionally the source location
/// where the error occurred, enabling rich error reporting. Output I/O
/// failures are carried through the same type so the generator can use
/// `?` on every write.
#[derive(Debug)]
pub struct CodegenError {
    /// A human-readable description of the error.
    pub message: String,
    /// The source location where the error occurred, if available.
    pub span: Option<Span>,
}

impl CodegenError {
    /// Creates a new error with a message and source location.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        CodegenError {
            message: message.into(),
            span: Some(span),
        }
    }

    /// Creates a new error with only a message (no source location).
    pub fn without_span(message: impl Into<String>) -> Self {
        CodegenError {
            message: message.into(),
            span: None,
        }
    }

    /// The expression's address cannot be taken.
    pub(super) fn not_an_lvalue(span: Span) -> Self {
        Self::new("not an lvalue", span)
    }

    /// A call passes more arguments than there are argument registers.
    pub(super) fn too_many_args(count: usize, span: Span) -> Self {
        Self::new(
            format!("cannot pass {} arguments; at most 6 are supported", count),
            span,
        )
    }

    /// A function declares more parameters than there are argument
    /// registers.
    pub(super) fn too_many_params(name: &str) -> Self {
        Self::without_span(format!(
            "function '{}' declares more than 6 parameters",
            name
        ))
    }

    /// An expression reached the generator without a type. Indicates a
    /// compiler bug, since parsing types every reachable expression.
    pub(super) fn untyped_expression(span: Span) -> Self {
        Self::new(
            "internal error: untyped expression reached the code generator",
            span,
        )
    }

    /// Pointer arithmetic on a node whose type has no base. Indicates a
    /// compiler bug.
    pub(super) fn missing_base_type(span: Span) -> Self {
        Self::new(
            "internal error: pointer arithmetic on a non-pointer value",
            span,
        )
    }
}

impl From<std::io::Error> for CodegenError {
    fn from(error: std::io::Error) -> Self {
        CodegenError::without_span(format!("failed to write assembly: {}", error))
    }
}

impl std::fmt::Display for CodegenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(span) = &self.span {
            write!(f, "{}:{}: {}", span.line, span.column, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for CodegenError {}
