//! The minic compiler library.
//!
//! minic translates a strict subset of C into x86-64 assembly in Intel
//! syntax. This library provides the core components of the compiler:
//! lexical analysis, parsing with type inference, and assembly generation.
//!
//! # Modules
//!
//! - [`token`] - Token types and source location tracking
//! - [`lexer`] - Lexical analysis (tokenization)
//! - [`parser`] - Recursive descent parser producing a typed AST
//! - [`ast`] - Abstract Syntax Tree and type definitions
//! - [`codegen`] - Stack-machine assembly generation
//!
//! # Example
//!
//! ```
//! use minic::codegen::Codegen;
//! use minic::lexer::Lexer;
//! use minic::parser::Parser;
//!
//! let source = "int main() { return 42; }\n";
//!
//! // Lexical analysis
//! let mut lexer = Lexer::new(source);
//! let tokens = lexer.tokenize().expect("lex error");
//!
//! // Parsing
//! let mut parser = Parser::new(tokens);
//! let program = parser.parse().expect("parse error");
//!
//! // Code generation
//! let mut asm = Vec::new();
//! let mut codegen = Codegen::new(&program, &mut asm);
//! codegen.emit().expect("codegen error");
//!
//! assert!(String::from_utf8(asm).unwrap().contains("_main:"));
//! ```

pub mod ast;
pub mod codegen;
pub mod lexer;
pub mod parser;
pub mod token;
