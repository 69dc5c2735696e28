//! Unit tests for the lexer.

use super::*;
use crate::token::TokenKind;

/// Helper function to tokenize input and return only the kinds.
fn tokenize_kinds(input: &str) -> Vec<TokenKind> {
    let mut lexer = Lexer::new(input);
    lexer
        .tokenize()
        .unwrap_or_else(|e| panic!("Tokenization failed for input {:?}: {}", input, e))
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

/// Helper function to tokenize input and return the error.
fn tokenize_error(input: &str) -> LexError {
    let mut lexer = Lexer::new(input);
    match lexer.tokenize() {
        Ok(tokens) => panic!(
            "Expected tokenization to fail for input {:?}, but it succeeded with {} tokens",
            input,
            tokens.len()
        ),
        Err(e) => e,
    }
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Identifier(name.to_string())
}

// ===================
// Basic tokens
// ===================

#[test]
fn test_empty_input() {
    let kinds = tokenize_kinds("");
    assert_eq!(kinds, vec![TokenKind::Eof]);
}

#[test]
fn test_whitespace_only() {
    let kinds = tokenize_kinds("   \n\t");
    assert_eq!(kinds, vec![TokenKind::Eof]);
}

#[test]
fn test_single_char_punctuation() {
    let kinds = tokenize_kinds("( ) { } [ ] , ; .");
    assert_eq!(
        kinds,
        vec![
            TokenKind::LeftParen,
            TokenKind::RightParen,
            TokenKind::LeftBrace,
            TokenKind::RightBrace,
            TokenKind::LeftBracket,
            TokenKind::RightBracket,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Dot,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_arithmetic_operators() {
    let kinds = tokenize_kinds("+ - * / &");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Ampersand,
            TokenKind::Eof
        ]
    );
}

// ===================
// Multi-character operators
// ===================

#[test]
fn test_equal_equal() {
    let kinds = tokenize_kinds("==");
    assert_eq!(kinds, vec![TokenKind::EqualEqual, TokenKind::Eof]);
}

#[test]
fn test_equals_alone() {
    let kinds = tokenize_kinds("=");
    assert_eq!(kinds, vec![TokenKind::Equals, TokenKind::Eof]);
}

#[test]
fn test_bang_equal() {
    let kinds = tokenize_kinds("!=");
    assert_eq!(kinds, vec![TokenKind::BangEqual, TokenKind::Eof]);
}

#[test]
fn test_comparison_operators() {
    let kinds = tokenize_kinds("< <= > >=");
    assert_eq!(
        kinds,
        vec![
            TokenKind::LessThan,
            TokenKind::LessEqual,
            TokenKind::GreaterThan,
            TokenKind::GreaterEqual,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_longest_match_wins() {
    // `<==` must lex as `<=` then `=`, not `<` `==`
    let kinds = tokenize_kinds("<==");
    assert_eq!(
        kinds,
        vec![TokenKind::LessEqual, TokenKind::Equals, TokenKind::Eof]
    );
}

#[test]
fn test_triple_equals() {
    let kinds = tokenize_kinds("===");
    assert_eq!(
        kinds,
        vec![TokenKind::EqualEqual, TokenKind::Equals, TokenKind::Eof]
    );
}

#[test]
fn test_bare_bang_is_an_error() {
    let error = tokenize_error("!");
    assert!(error.message.contains("invalid token"));
}

// ===================
// Keywords and identifiers
// ===================

#[test]
fn test_all_keywords() {
    let kinds = tokenize_kinds("return if else while for int char sizeof struct");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Return,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::For,
            TokenKind::Int,
            TokenKind::Char,
            TokenKind::Sizeof,
            TokenKind::Struct,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_keyword_prefix_is_identifier() {
    // A keyword followed by an identifier character is one identifier.
    let kinds = tokenize_kinds("intx return1 iff");
    assert_eq!(
        kinds,
        vec![ident("intx"), ident("return1"), ident("iff"), TokenKind::Eof]
    );
}

#[test]
fn test_identifier_with_underscore() {
    let kinds = tokenize_kinds("_start my_var");
    assert_eq!(kinds, vec![ident("_start"), ident("my_var"), TokenKind::Eof]);
}

#[test]
fn test_identifier_cannot_start_with_digit() {
    // `8foo` lexes as the number 8 followed by the identifier foo.
    let kinds = tokenize_kinds("8foo");
    assert_eq!(
        kinds,
        vec![TokenKind::IntLiteral(8), ident("foo"), TokenKind::Eof]
    );
}

// ===================
// Integer literals
// ===================

#[test]
fn test_int_literal() {
    let kinds = tokenize_kinds("0 42 1000000");
    assert_eq!(
        kinds,
        vec![
            TokenKind::IntLiteral(0),
            TokenKind::IntLiteral(42),
            TokenKind::IntLiteral(1000000),
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_int_literal_i64_max() {
    let kinds = tokenize_kinds("9223372036854775807");
    assert_eq!(
        kinds,
        vec![TokenKind::IntLiteral(i64::MAX), TokenKind::Eof]
    );
}

#[test]
fn test_int_literal_overflow() {
    let error = tokenize_error("9223372036854775808");
    assert!(error.message.contains("out of range"));
}

// ===================
// String literals
// ===================

#[test]
fn test_string_literal() {
    let kinds = tokenize_kinds(r#""hi""#);
    assert_eq!(
        kinds,
        vec![
            TokenKind::StringLiteral("hi".to_string()),
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_empty_string_literal() {
    let kinds = tokenize_kinds(r#""""#);
    assert_eq!(
        kinds,
        vec![TokenKind::StringLiteral(String::new()), TokenKind::Eof]
    );
}

#[test]
fn test_string_literal_no_escape_processing() {
    // The interior bytes are taken verbatim, so `\n` stays two characters.
    let kinds = tokenize_kinds(r#""a\nb""#);
    assert_eq!(
        kinds,
        vec![
            TokenKind::StringLiteral("a\\nb".to_string()),
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_string_literal_spans_lines() {
    let kinds = tokenize_kinds("\"a\nb\"");
    assert_eq!(
        kinds,
        vec![TokenKind::StringLiteral("a\nb".to_string()), TokenKind::Eof]
    );
}

#[test]
fn test_unterminated_string() {
    let error = tokenize_error(r#""hi"#);
    assert!(error.message.contains("unterminated string"));
    // The error points at the opening quote.
    assert_eq!(error.span.start, 0);
}

// ===================
// Comments
// ===================

#[test]
fn test_line_comment() {
    let kinds = tokenize_kinds("1 // comment\n2");
    assert_eq!(
        kinds,
        vec![
            TokenKind::IntLiteral(1),
            TokenKind::IntLiteral(2),
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_block_comment() {
    let kinds = tokenize_kinds("1 /* a\nb */ 2");
    assert_eq!(
        kinds,
        vec![
            TokenKind::IntLiteral(1),
            TokenKind::IntLiteral(2),
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_comment_only_input() {
    let kinds = tokenize_kinds("// nothing here\n/* or here */");
    assert_eq!(kinds, vec![TokenKind::Eof]);
}

#[test]
fn test_unterminated_block_comment() {
    let error = tokenize_error("1 /* oops");
    assert!(error.message.contains("unterminated block comment"));
    assert_eq!(error.span.start, 2);
}

// ===================
// Errors and spans
// ===================

#[test]
fn test_invalid_character() {
    let error = tokenize_error("int @ x;");
    assert!(error.message.contains("invalid token"));
    assert_eq!(error.span.start, 4);
}

#[test]
fn test_spans_track_lines_and_columns() {
    let mut lexer = Lexer::new("int\n  x;");
    let tokens = lexer.tokenize().unwrap();

    assert_eq!(tokens[0].span.line, 1);
    assert_eq!(tokens[0].span.column, 1);

    // `x` sits on line 2, column 3.
    assert_eq!(tokens[1].span.line, 2);
    assert_eq!(tokens[1].span.column, 3);
    assert_eq!(tokens[1].span.start, 6);
    assert_eq!(tokens[1].span.end, 7);
}

#[test]
fn test_whole_function_token_stream() {
    let kinds = tokenize_kinds("int main() { return 0; }");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Int,
            ident("main"),
            TokenKind::LeftParen,
            TokenKind::RightParen,
            TokenKind::LeftBrace,
            TokenKind::Return,
            TokenKind::IntLiteral(0),
            TokenKind::Semicolon,
            TokenKind::RightBrace,
            TokenKind::Eof
        ]
    );
}
