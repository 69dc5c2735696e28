//! Expression code generation.
//!
//! Every expression pushes exactly one 8-byte value. Lvalues are handled
//! by `gen_addr`, which pushes an effective address instead; whether a
//! load follows depends on the expression's type, because array-typed
//! values decay to the address itself.

use std::io::Write;

use super::error::CodegenError;
use super::{ARGREG8, Codegen, expr_ty};
use crate::ast::{BinaryOp, Expr, ExprKind, Type};
use crate::token::Span;

impl<'a, W: Write> Codegen<'a, W> {
    /// Generates an expression, pushing its value.
    pub(super) fn gen_expr(&mut self, expr: &Expr) -> Result<(), CodegenError> {
        match &expr.kind {
            ExprKind::IntLiteral(value) => {
                writeln!(self.out, "  push {}", value)?;
                Ok(())
            }

            ExprKind::Var(_) | ExprKind::Member { .. } => {
                self.gen_addr(expr)?;
                if !matches!(expr_ty(expr)?, Type::Array(..)) {
                    self.load(expr_ty(expr)?)?;
                }
                Ok(())
            }

            ExprKind::Assign { lhs, rhs } => {
                self.gen_lval(lhs)?;
                self.gen_expr(rhs)?;
                self.store(expr_ty(expr)?)?;
                Ok(())
            }

            ExprKind::Addr(operand) => self.gen_addr(operand),

            ExprKind::Deref(operand) => {
                self.gen_expr(operand)?;
                if !matches!(expr_ty(expr)?, Type::Array(..)) {
                    self.load(expr_ty(expr)?)?;
                }
                Ok(())
            }

            ExprKind::StmtExpr { stmts, last } => {
                for stmt in stmts {
                    self.gen_stmt(stmt)?;
                }
                self.gen_expr(last)
            }

            ExprKind::Call { callee, args } => self.gen_call(callee, args, expr.span),

            ExprKind::Binary { op, lhs, rhs } => self.gen_binary(*op, lhs, rhs, expr),
        }
    }

    /// Generates a binary operation: both operands are pushed, popped into
    /// `rax`/`rdi`, combined, and the result pushed.
    fn gen_binary(
        &mut self,
        op: BinaryOp,
        lhs: &Expr,
        rhs: &Expr,
        expr: &Expr,
    ) -> Result<(), CodegenError> {
        self.gen_expr(lhs)?;
        self.gen_expr(rhs)?;

        writeln!(self.out, "  pop rdi")?;
        writeln!(self.out, "  pop rax")?;

        match op {
            BinaryOp::Add => {
                writeln!(self.out, "  add rax, rdi")?;
            }
            BinaryOp::PtrAdd => {
                writeln!(self.out, "  imul rdi, {}", Self::base_size(expr, expr.span)?)?;
                writeln!(self.out, "  add rax, rdi")?;
            }
            BinaryOp::Sub => {
                writeln!(self.out, "  sub rax, rdi")?;
            }
            BinaryOp::PtrSub => {
                writeln!(self.out, "  imul rdi, {}", Self::base_size(expr, expr.span)?)?;
                writeln!(self.out, "  sub rax, rdi")?;
            }
            BinaryOp::PtrDiff => {
                writeln!(self.out, "  sub rax, rdi")?;
                writeln!(self.out, "  cqo")?;
                writeln!(self.out, "  mov rdi, {}", Self::base_size(lhs, expr.span)?)?;
                writeln!(self.out, "  idiv rdi")?;
            }
            BinaryOp::Mul => {
                writeln!(self.out, "  imul rax, rdi")?;
            }
            BinaryOp::Div => {
                writeln!(self.out, "  cqo")?;
                writeln!(self.out, "  idiv rdi")?;
            }
            BinaryOp::Eq => {
                writeln!(self.out, "  cmp rax, rdi")?;
                writeln!(self.out, "  sete al")?;
                writeln!(self.out, "  movzx rax, al")?;
            }
            BinaryOp::Ne => {
                writeln!(self.out, "  cmp rax, rdi")?;
                writeln!(self.out, "  setne al")?;
                writeln!(self.out, "  movzx rax, al")?;
            }
            BinaryOp::Lt => {
                writeln!(self.out, "  cmp rax, rdi")?;
                writeln!(self.out, "  setl al")?;
                writeln!(self.out, "  movzx rax, al")?;
            }
            BinaryOp::Le => {
                writeln!(self.out, "  cmp rax, rdi")?;
                writeln!(self.out, "  setle al")?;
                writeln!(self.out, "  movzx rax, al")?;
            }
        }

        writeln!(self.out, "  push rax")?;
        Ok(())
    }

    /// Generates a function call.
    ///
    /// Arguments are evaluated left to right, popped in reverse into the
    /// argument registers, and the stack pointer is realigned to 16 bytes
    /// at runtime if needed before the `call`.
    fn gen_call(&mut self, callee: &str, args: &[Expr], span: Span) -> Result<(), CodegenError> {
        if args.len() > ARGREG8.len() {
            return Err(CodegenError::too_many_args(args.len(), span));
        }

        for arg in args {
            self.gen_expr(arg)?;
        }
        for i in (0..args.len()).rev() {
            writeln!(self.out, "  pop {}", ARGREG8[i])?;
        }

        // The ABI requires rsp % 16 == 0 at the call instruction. The
        // depth of the evaluation stack is not tracked statically, so
        // check at runtime and take the adjusted path when misaligned.
        let seq = self.next_label();
        writeln!(self.out, "  mov rax, rsp")?;
        writeln!(self.out, "  and rax, 15")?;
        writeln!(self.out, "  jnz .L.call.{}", seq)?;
        writeln!(self.out, "  mov rax, 0")?;
        writeln!(self.out, "  call _{}", callee)?;
        writeln!(self.out, "  jmp .L.end.{}", seq)?;
        writeln!(self.out, ".L.call.{}:", seq)?;
        writeln!(self.out, "  sub rsp, 8")?;
        writeln!(self.out, "  mov rax, 0")?;
        writeln!(self.out, "  call _{}", callee)?;
        writeln!(self.out, "  add rsp, 8")?;
        writeln!(self.out, ".L.end.{}:", seq)?;
        writeln!(self.out, "  push rax")?;
        Ok(())
    }

    /// Pushes the effective address of an lvalue.
    ///
    /// # Errors
    ///
    /// Returns a "not an lvalue" error for expressions whose address is
    /// not well-defined.
    fn gen_addr(&mut self, expr: &Expr) -> Result<(), CodegenError> {
        match &expr.kind {
            ExprKind::Var(id) => {
                let prog = self.prog;
                let var = prog.var(*id);
                if var.is_local {
                    writeln!(self.out, "  lea rax, [rbp-{}]", var.offset)?;
                    writeln!(self.out, "  push rax")?;
                } else {
                    writeln!(self.out, "  push offset {}", var.name)?;
                }
                Ok(())
            }

            ExprKind::Deref(operand) => self.gen_expr(operand),

            ExprKind::Member { base, offset, .. } => {
                self.gen_addr(base)?;
                writeln!(self.out, "  pop rax")?;
                writeln!(self.out, "  add rax, {}", offset)?;
                writeln!(self.out, "  push rax")?;
                Ok(())
            }

            _ => Err(CodegenError::not_an_lvalue(expr.span)),
        }
    }

    /// Like `gen_addr`, but rejects array-typed targets: an array cannot
    /// be assigned to as a whole.
    fn gen_lval(&mut self, expr: &Expr) -> Result<(), CodegenError> {
        if matches!(expr_ty(expr)?, Type::Array(..)) {
            return Err(CodegenError::not_an_lvalue(expr.span));
        }
        self.gen_addr(expr)
    }

    /// Pops an address and pushes the value it points to, using a
    /// byte-width move for 1-byte types.
    fn load(&mut self, ty: &Type) -> Result<(), CodegenError> {
        writeln!(self.out, "  pop rax")?;
        if ty.size() == 1 {
            writeln!(self.out, "  movsx rax, byte ptr [rax]")?;
        } else {
            writeln!(self.out, "  mov rax, [rax]")?;
        }
        writeln!(self.out, "  push rax")?;
        Ok(())
    }

    /// Pops a value and an address, stores the value, and pushes it back
    /// (assignment is an expression yielding its right-hand side).
    fn store(&mut self, ty: &Type) -> Result<(), CodegenError> {
        writeln!(self.out, "  pop rdi")?;
        writeln!(self.out, "  pop rax")?;
        if ty.size() == 1 {
            writeln!(self.out, "  mov [rax], dil")?;
        } else {
            writeln!(self.out, "  mov [rax], rdi")?;
        }
        writeln!(self.out, "  push rdi")?;
        Ok(())
    }
}
