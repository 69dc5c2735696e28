use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use minic::token::Span;

use crate::driver::CompileError;

fn print_range_report(
    filename: &str,
    source: &str,
    span_range: Range<usize>,
    message: &str,
) -> std::io::Result<()> {
    Report::build(ReportKind::Error, (filename, span_range.clone()))
        .with_config(Config::default().with_index_type(IndexType::Byte))
        .with_message(message)
        .with_label(
            Label::new((filename, span_range))
                .with_message(message)
                .with_color(Color::Red),
        )
        .finish()
        .eprint((filename, Source::from(source)))
}

/// Converts a span into a non-empty byte range inside `source`.
///
/// Zero-width spans (e.g. an error at end of file) are widened to cover
/// the last character so the report has something to point at.
fn diagnostic_range(span: Span, source: &str) -> Range<usize> {
    if span.start < span.end {
        return span.start..span.end;
    }
    if source.is_empty() {
        return 0..0;
    }
    let start = span.start.min(source.len() - 1);
    start..start + 1
}

pub(crate) fn report_error(filename: &str, source: &str, error: &CompileError) {
    let positioned = match error {
        CompileError::Lex(e) => Some((e.span, e.message.as_str())),
        CompileError::Parse(e) => Some((e.span, e.message.as_str())),
        CompileError::Codegen(e) => e.span.map(|span| (span, e.message.as_str())),
        CompileError::FileReadError { .. } | CompileError::OutputWriteError { .. } => None,
    };

    match positioned {
        Some((span, message)) => {
            let range = diagnostic_range(span, source);
            if let Err(report_err) = print_range_report(filename, source, range, message) {
                eprintln!("error: {} (at {}:{})", message, span.line, span.column);
                eprintln!("(Failed to display detailed error report: {})", report_err);
            }
        }
        None => {
            eprintln!("error: {}", error);
        }
    }
}
