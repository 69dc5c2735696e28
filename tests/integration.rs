//! Integration tests for the minic compiler.
//!
//! These tests drive the full pipeline from source text to assembly text
//! and check the emitted program structurally. The assembly is not run
//! through an assembler here.

use minic::codegen::Codegen;
use minic::lexer::Lexer;
use minic::parser::Parser;

use std::fs;
use tempfile::tempdir;

/// Compiles a source string through the whole pipeline, returning the
/// assembly text.
fn compile(source: &str) -> Result<String, String> {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize().map_err(|e| e.to_string())?;

    let mut parser = Parser::new(tokens);
    let program = parser.parse().map_err(|e| e.to_string())?;

    let mut buf = Vec::new();
    let mut codegen = Codegen::new(&program, &mut buf);
    codegen.emit().map_err(|e| e.to_string())?;

    String::from_utf8(buf).map_err(|e| e.to_string())
}

fn compile_ok(source: &str) -> String {
    compile(source).unwrap_or_else(|e| panic!("Compilation failed for {:?}: {}", source, e))
}

/// Represents the stage at which compilation failed.
#[derive(Debug)]
enum CompileStage {
    Lex,
    Parse,
    Codegen,
}

/// Attempts to lex, parse, and compile a program.
/// Returns the stage and error message if any stage fails.
fn compile_error(source: &str) -> Option<(CompileStage, String)> {
    let mut lexer = Lexer::new(source);
    let tokens = match lexer.tokenize() {
        Ok(t) => t,
        Err(e) => return Some((CompileStage::Lex, e.to_string())),
    };

    let mut parser = Parser::new(tokens);
    let program = match parser.parse() {
        Ok(p) => p,
        Err(e) => return Some((CompileStage::Parse, e.to_string())),
    };

    let mut buf = Vec::new();
    match Codegen::new(&program, &mut buf).emit() {
        Ok(()) => None,
        Err(e) => Some((CompileStage::Codegen, e.to_string())),
    }
}

// ===================
// End-to-end programs
// ===================

#[test]
fn test_return_constant() {
    let asm = compile_ok("int main() { return 42; }\n");
    assert!(asm.contains("_main:"));
    assert!(asm.contains("  push 42\n"));
    assert!(asm.contains("  pop rax\n"));
    assert!(asm.contains("  ret\n"));
}

#[test]
fn test_two_locals() {
    let asm = compile_ok("int main() { int x; x = 3; int y; y = 5; return x + y; }\n");
    // Two 8-byte slots.
    assert!(asm.contains("  sub rsp, 16\n"));
    assert!(asm.contains("  add rax, rdi\n"));
}

#[test]
fn test_array_stores_through_scaled_pointers() {
    let asm = compile_ok(
        "int main() { int a[3]; *a = 1; *(a + 1) = 2; *(a + 2) = 3; return *(a + 2); }\n",
    );
    assert!(asm.contains("  sub rsp, 24\n"));
    assert!(asm.contains("  imul rdi, 8\n"));
}

#[test]
fn test_pointer_assignment_round_trip() {
    let asm = compile_ok("int main() { int x; int *y; y = &x; *y = 7; return x; }\n");
    // &x pushes the slot address; *y stores through it.
    assert!(asm.contains("  lea rax, [rbp-8]\n"));
    assert!(asm.contains("  push 7\n"));
}

#[test]
fn test_global_struct_members() {
    let asm = compile_ok(
        "struct { int a; int b; } s; int main() { s.a = 3; s.b = 4; return s.a + s.b; }\n",
    );
    // The struct occupies 16 zeroed bytes; member b sits 8 past a.
    assert!(asm.contains("s:\n  .zero 16\n"));
    assert!(asm.contains("  add rax, 8\n"));
}

#[test]
fn test_string_literal_global() {
    let asm = compile_ok("char *s; int main() { s = \"hi\"; return 0; }\n");
    assert!(asm.contains(".L.data.0:\n  .byte 104\n  .byte 105\n  .byte 0\n"));
    assert!(asm.contains("  push offset .L.data.0\n"));
}

#[test]
fn test_fibonacci_program() {
    let asm = compile_ok(
        "int fib(int n) { if (n <= 1) return n; return fib(n - 1) + fib(n - 2); }\n\
         int main() { return fib(10); }\n",
    );
    assert!(asm.contains(".global _fib\n"));
    assert!(asm.contains("  call _fib\n"));
}

#[test]
fn test_char_string_indexing() {
    let asm = compile_ok("int main() { char *s; s = \"abc\"; return s[1]; }\n");
    assert!(asm.contains("  imul rdi, 1\n"));
    assert!(asm.contains("  movsx rax, byte ptr [rax]\n"));
}

#[test]
fn test_statement_expression_value() {
    let asm = compile_ok("int main() { return ({ int t; t = 9; t; }); }\n");
    assert!(asm.contains("  push 9\n"));
}

#[test]
fn test_sizeof_is_a_compile_time_constant() {
    let asm = compile_ok("int main() { int a[3]; return sizeof(a); }\n");
    assert!(asm.contains("  push 24\n"));
    // sizeof never evaluates its operand, so the array is not read.
    assert!(!asm.contains("  mov rax, [rax]\n"));
}

// ===================
// Error stages
// ===================

#[test]
fn test_lex_error_stage() {
    let (stage, msg) = compile_error("int main() { return 1 @ 2; }\n").expect("should fail");
    assert!(matches!(stage, CompileStage::Lex), "got {:?}: {}", stage, msg);
    assert!(msg.contains("invalid token"));
}

#[test]
fn test_parse_error_stage() {
    let (stage, msg) = compile_error("int main() { return x; }\n").expect("should fail");
    assert!(
        matches!(stage, CompileStage::Parse),
        "got {:?}: {}",
        stage,
        msg
    );
    assert!(msg.contains("undefined variable"));
}

#[test]
fn test_codegen_error_stage() {
    let (stage, msg) = compile_error("int main() { 1 = 2; return 0; }\n").expect("should fail");
    assert!(
        matches!(stage, CompileStage::Codegen),
        "got {:?}: {}",
        stage,
        msg
    );
    assert!(msg.contains("not an lvalue"));
}

#[test]
fn test_error_messages_carry_positions() {
    let (_, msg) = compile_error("int main() {\n  return x;\n}\n").expect("should fail");
    // line:column prefix from the Display impl.
    assert!(msg.starts_with("2:10:"), "unexpected message: {}", msg);
}

#[test]
fn test_valid_programs_have_no_error() {
    assert!(compile_error("int main() { return 0; }\n").is_none());
}

// ===================
// File round trip
// ===================

#[test]
fn test_compile_from_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("prog.c");
    fs::write(&path, "int main() { return 5; }\n").expect("write source");

    let source = fs::read_to_string(&path).expect("read source");
    let asm = compile_ok(&source);
    assert!(asm.contains("  push 5\n"));
}

// ===================
// Determinism
// ===================

#[test]
fn test_emission_is_deterministic() {
    let source = "int main() { int i; for (i = 0; i < 4; i = i + 1) put(i); return i; }\n";
    assert_eq!(compile_ok(source), compile_ok(source));
}

#[test]
fn test_argument_evaluation_is_left_to_right() {
    let asm = compile_ok("int main() { return f(1, 2, 3); }\n");
    let first = asm.find("  push 1\n").expect("arg 1");
    let second = asm.find("  push 2\n").expect("arg 2");
    let third = asm.find("  push 3\n").expect("arg 3");
    assert!(first < second && second < third);
}
