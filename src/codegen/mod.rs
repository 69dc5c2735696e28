//! x86-64 assembly generation for the minic compiler.
//!
//! This module provides the [`Codegen`] struct which walks a parsed
//! [`Program`] and writes Intel-syntax assembly to an output sink.
//!
//! # Overview
//!
//! The generator is a stack machine: every expression emits code that
//! leaves exactly one 8-byte value pushed on the CPU stack, binary
//! operations pop two values and push one, and every statement leaves the
//! stack balanced. No register allocation is performed; `rax` and `rdi`
//! hold the top two slots during binary operations and the System V
//! argument registers carry call arguments.
//!
//! Emission order is deterministic: the `.data` section first (one label
//! per global, with `.byte` initializers for interned string literals),
//! then `.text` with each function in source order. Every function symbol
//! carries a leading underscore to match the host's C symbol convention.
//!
//! # Examples
//!
//! ```
//! use minic::codegen::Codegen;
//! use minic::lexer::Lexer;
//! use minic::parser::Parser;
//!
//! let mut lexer = Lexer::new("int main() { return 42; }\n");
//! let tokens = lexer.tokenize().unwrap();
//! let program = Parser::new(tokens).parse().unwrap();
//!
//! let mut buf = Vec::new();
//! Codegen::new(&program, &mut buf).emit().unwrap();
//!
//! let asm = String::from_utf8(buf).unwrap();
//! assert!(asm.contains("_main:"));
//! ```
//!
//! # Module Structure
//!
//! - [`error`] - Code generation error types
//! - `stmt` - Statement code generation
//! - `expr` - Expression code generation, lvalue addressing, load/store
//! - `tests` - Unit tests (test-only)
//!
//! # See Also
//!
//! * [`crate::parser`] - Produces the AST consumed here
//! * [`crate::ast`] - The AST and type definitions

mod error;
mod expr;
mod stmt;


pub use error::CodegenError;

use std::io::Write;

use crate::ast::{Expr, Function, Program, Type};
use crate::token::Span;

/// The 8-byte argument registers, in System V order.
const ARGREG8: [&str; 6] = ["rdi", "rsi", "rdx", "rcx", "r8", "r9"];

/// The 1-byte views of the argument registers, used to spill `char`
/// parameters.
const ARGREG1: [&str; 6] = ["dil", "sil", "dl", "cl", "r8b", "r9b"];

/// Returns the inferred type of an expression.
///
/// # Errors
///
/// Returns an internal error if the typing pass has not run over the
/// expression; the parser guarantees it has for every program it returns.
fn expr_ty(expr: &Expr) -> Result<&Type, CodegenError> {
    expr.ty
        .as_ref()
        .ok_or_else(|| CodegenError::untyped_expression(expr.span))
}

/// An assembly generator for a parsed program.
///
/// Writes to any [`io::Write`](std::io::Write) sink. Labels are made
/// unique by a monotonically increasing sequence number shared by all
/// control-flow constructs and call sites.
pub struct Codegen<'a, W: Write> {
    /// The program being compiled.
    prog: &'a Program,
    /// The assembly output sink.
    out: W,
    /// Monotonic counter appended to label prefixes.
    labelseq: usize,
    /// The name of the function currently being generated, for the
    /// `.L.return.<name>` label.
    funcname: String,
}

impl<'a, W: Write> Codegen<'a, W> {
    /// Creates a generator for `prog` writing to `out`.
    pub fn new(prog: &'a Program, out: W) -> Self {
        Codegen {
            prog,
            out,
            labelseq: 1,
            funcname: String::new(),
        }
    }

    /// Emits the complete assembly for the program.
    ///
    /// # Errors
    ///
    /// Returns a [`CodegenError`] for non-lvalue assignment targets, for
    /// calls or definitions exceeding six arguments, and for output I/O
    /// failures.
    pub fn emit(&mut self) -> Result<(), CodegenError> {
        writeln!(self.out, ".intel_syntax noprefix")?;
        self.emit_data()?;
        self.emit_text()?;
        Ok(())
    }

    /// Emits the `.data` section: one label per global.
    ///
    /// Globals interned from string literals are emitted byte by byte with
    /// a terminating NUL; declared globals reserve zeroed storage.
    fn emit_data(&mut self) -> Result<(), CodegenError> {
        let prog = self.prog;
        writeln!(self.out, ".data")?;

        for &id in &prog.globals {
            let var = prog.var(id);
            writeln!(self.out, "{}:", var.name)?;
            match &var.contents {
                Some(contents) => {
                    for byte in contents.bytes() {
                        writeln!(self.out, "  .byte {}", byte)?;
                    }
                    writeln!(self.out, "  .byte 0")?;
                }
                None => {
                    writeln!(self.out, "  .zero {}", var.ty.size())?;
                }
            }
        }

        Ok(())
    }

    fn emit_text(&mut self) -> Result<(), CodegenError> {
        let prog = self.prog;
        writeln!(self.out, ".text")?;
        for func in &prog.functions {
            self.emit_function(func)?;
        }
        Ok(())
    }

    /// Emits one function: label, prologue, parameter spills, body,
    /// return label, epilogue.
    fn emit_function(&mut self, func: &Function) -> Result<(), CodegenError> {
        self.funcname = func.name.clone();

        writeln!(self.out, ".global _{}", func.name)?;
        writeln!(self.out, "_{}:", func.name)?;

        // Prologue
        writeln!(self.out, "  push rbp")?;
        writeln!(self.out, "  mov rbp, rsp")?;
        writeln!(self.out, "  sub rsp, {}", func.stack_size)?;

        // Spill parameters from the argument registers into their slots.
        let prog = self.prog;
        for (i, &id) in func.params.iter().enumerate() {
            let var = prog.var(id);
            let table = if var.ty.size() == 1 { ARGREG1 } else { ARGREG8 };
            let reg = table
                .get(i)
                .ok_or_else(|| CodegenError::too_many_params(&func.name))?;
            writeln!(self.out, "  mov [rbp-{}], {}", var.offset, reg)?;
        }

        for stmt in &func.body {
            self.gen_stmt(stmt)?;
        }

        // Epilogue
        writeln!(self.out, ".L.return.{}:", func.name)?;
        writeln!(self.out, "  mov rsp, rbp")?;
        writeln!(self.out, "  pop rbp")?;
        writeln!(self.out, "  ret")?;
        Ok(())
    }

    /// Returns a fresh label sequence number.
    fn next_label(&mut self) -> usize {
        let seq = self.labelseq;
        self.labelseq += 1;
        seq
    }

    /// Returns the base size for pointer arithmetic on `expr`.
    fn base_size(expr: &Expr, span: Span) -> Result<usize, CodegenError> {
        expr_ty(expr)?
            .base()
            .map(Type::size)
            .ok_or_else(|| CodegenError::missing_base_type(span))
    }
}
