//! The minic compiler CLI.
//!
//! This binary compiles one C-subset source file to x86-64 assembly in
//! Intel syntax, written to standard output (or a file via `-o`), and
//! delegates the pipeline to the driver module.

use clap::Parser;

mod diagnostics;
mod driver;

/// Command-line interface for the minic compiler.
#[derive(Parser)]
#[command(name = "minic")]
#[command(about = "A compiler from a C subset to x86-64 assembly", long_about = None)]
struct Cli {
    /// The source file to compile (e.g., `main.c`).
    file: String,

    /// Output path for the generated assembly (e.g., `-o main.s`).
    /// If not specified, the assembly is written to standard output.
    #[arg(short = 'o', long = "output")]
    output: Option<String>,
}

/// Entry point for the minic compiler.
///
/// Exits with status 1 on bad arguments or any compile error, 0 on
/// success.
fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            std::process::exit(1);
        }
    };

    if let Err(error) = driver::compile(&cli.file, cli.output.as_deref()) {
        report_and_exit(*error);
    }
}

fn report_and_exit(error: driver::CompileErrorWithContext) -> ! {
    diagnostics::report_error(error.filename(), error.source(), error.error());
    std::process::exit(1);
}
