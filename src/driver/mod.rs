//! Compilation orchestration for the minic CLI.
//!
//! Reads a source file, runs the lexer, parser, and code generator, and
//! writes the resulting assembly to standard output or a file.

use std::fs;
use std::io::{self, Write};

use minic::codegen::{Codegen, CodegenError};
use minic::lexer::{LexError, Lexer};
use minic::parser::{ParseError, Parser};

/// A compilation error from any phase of the compiler.
///
/// This enum unifies errors from lexing, parsing, code generation, and
/// I/O to simplify error handling in the build pipeline.
#[derive(Debug)]
pub(crate) enum CompileError {
    /// An error during lexical analysis.
    Lex(LexError),
    /// An error during parsing or type inference.
    Parse(ParseError),
    /// An error during code generation.
    Codegen(CodegenError),
    /// Failed to read the source file.
    FileReadError { path: String, source: io::Error },
    /// Failed to write the generated assembly.
    OutputWriteError { path: String, source: io::Error },
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Lex(e) => write!(f, "{}", e),
            CompileError::Parse(e) => write!(f, "{}", e),
            CompileError::Codegen(e) => write!(f, "{}", e),
            CompileError::FileReadError { path, source } => {
                write!(f, "cannot open {}: {}", path, source)
            }
            CompileError::OutputWriteError { path, source } => {
                write!(f, "cannot write {}: {}", path, source)
            }
        }
    }
}

/// A compilation error together with the source it occurred in, so the
/// caller can render a span-based diagnostic.
pub(crate) struct CompileErrorWithContext {
    filename: String,
    source: String,
    error: CompileError,
}

impl CompileErrorWithContext {
    /// The path of the file being compiled.
    pub(crate) fn filename(&self) -> &str {
        &self.filename
    }

    /// The source text being compiled. Empty if the file could not be
    /// read.
    pub(crate) fn source(&self) -> &str {
        &self.source
    }

    /// The underlying error.
    pub(crate) fn error(&self) -> &CompileError {
        &self.error
    }
}

/// Compiles `file` and writes the assembly to `output` (standard output
/// when `None`).
///
/// The source is read whole; a missing trailing newline is synthesized
/// before the pipeline runs.
pub(crate) fn compile(
    file: &str,
    output: Option<&str>,
) -> Result<(), Box<CompileErrorWithContext>> {
    let mut source = fs::read_to_string(file).map_err(|e| {
        Box::new(CompileErrorWithContext {
            filename: file.to_string(),
            source: String::new(),
            error: CompileError::FileReadError {
                path: file.to_string(),
                source: e,
            },
        })
    })?;

    if !source.ends_with('\n') {
        source.push('\n');
    }

    let result = compile_source(&source).and_then(|asm| write_output(&asm, output));

    result.map_err(|error| {
        Box::new(CompileErrorWithContext {
            filename: file.to_string(),
            source,
            error,
        })
    })
}

/// Runs the lexer, parser, and code generator over `source`, returning
/// the assembly text.
fn compile_source(source: &str) -> Result<Vec<u8>, CompileError> {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize().map_err(CompileError::Lex)?;

    let mut parser = Parser::new(tokens);
    let program = parser.parse().map_err(CompileError::Parse)?;

    let mut asm = Vec::new();
    let mut codegen = Codegen::new(&program, &mut asm);
    codegen.emit().map_err(CompileError::Codegen)?;

    Ok(asm)
}

fn write_output(asm: &[u8], output: Option<&str>) -> Result<(), CompileError> {
    match output {
        Some(path) => fs::write(path, asm).map_err(|e| CompileError::OutputWriteError {
            path: path.to_string(),
            source: e,
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(asm)
                .and_then(|()| stdout.flush())
                .map_err(|e| CompileError::OutputWriteError {
                    path: "<stdout>".to_string(),
                    source: e,
                })
        }
    }
}
