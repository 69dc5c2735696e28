//! Statement code generation.

use std::io::Write;

use super::Codegen;
use super::error::CodegenError;
use crate::ast::{Stmt, StmtKind};

impl<'a, W: Write> Codegen<'a, W> {
    /// Generates one statement, leaving the stack balanced.
    pub(super) fn gen_stmt(&mut self, stmt: &Stmt) -> Result<(), CodegenError> {
        match &stmt.kind {
            StmtKind::Null => Ok(()),

            StmtKind::Expr(expr) => {
                self.gen_expr(expr)?;
                writeln!(self.out, "  add rsp, 8")?;
                Ok(())
            }

            StmtKind::Return(value) => {
                self.gen_expr(value)?;
                writeln!(self.out, "  pop rax")?;
                writeln!(self.out, "  jmp .L.return.{}", self.funcname)?;
                Ok(())
            }

            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let seq = self.next_label();
                self.gen_expr(cond)?;
                writeln!(self.out, "  pop rax")?;
                writeln!(self.out, "  cmp rax, 0")?;
                if let Some(els) = else_branch {
                    writeln!(self.out, "  je .L.else.{}", seq)?;
                    self.gen_stmt(then_branch)?;
                    writeln!(self.out, "  jmp .L.end.{}", seq)?;
                    writeln!(self.out, ".L.else.{}:", seq)?;
                    self.gen_stmt(els)?;
                    writeln!(self.out, ".L.end.{}:", seq)?;
                } else {
                    writeln!(self.out, "  je .L.end.{}", seq)?;
                    self.gen_stmt(then_branch)?;
                    writeln!(self.out, ".L.end.{}:", seq)?;
                }
                Ok(())
            }

            StmtKind::While { cond, body } => {
                let seq = self.next_label();
                writeln!(self.out, ".L.begin.{}:", seq)?;
                self.gen_expr(cond)?;
                writeln!(self.out, "  pop rax")?;
                writeln!(self.out, "  cmp rax, 0")?;
                writeln!(self.out, "  je .L.end.{}", seq)?;
                self.gen_stmt(body)?;
                writeln!(self.out, "  jmp .L.begin.{}", seq)?;
                writeln!(self.out, ".L.end.{}:", seq)?;
                Ok(())
            }

            StmtKind::For {
                init,
                cond,
                inc,
                body,
            } => {
                let seq = self.next_label();
                if let Some(init) = init {
                    self.gen_expr(init)?;
                    writeln!(self.out, "  add rsp, 8")?;
                }
                writeln!(self.out, ".L.begin.{}:", seq)?;
                if let Some(cond) = cond {
                    self.gen_expr(cond)?;
                    writeln!(self.out, "  pop rax")?;
                    writeln!(self.out, "  cmp rax, 0")?;
                    writeln!(self.out, "  je .L.end.{}", seq)?;
                }
                self.gen_stmt(body)?;
                if let Some(inc) = inc {
                    self.gen_expr(inc)?;
                    writeln!(self.out, "  add rsp, 8")?;
                }
                writeln!(self.out, "  jmp .L.begin.{}", seq)?;
                writeln!(self.out, ".L.end.{}:", seq)?;
                Ok(())
            }

            StmtKind::Block(stmts) => {
                for stmt in stmts {
                    self.gen_stmt(stmt)?;
                }
                Ok(())
            }
        }
    }
}
