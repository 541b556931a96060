//! Utility macros for the frontend.
//!
//! This module defines helper macros used by the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance at the lexer's current position
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed-text tokens
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance positioned at the lexer's current line and column.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Comma, String::from(","), lexer);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $lexer:expr) => {
        Token {
            kind: $kind,
            value: $value,
            line: $lexer.line,
            column: $lexer.column,
            source_line: $lexer.current_line(),
            literal: LiteralKind::None,
            is_float: false,
        }
    };
}

/// Creates a default lexer handler for simple fixed-text patterns.
///
/// Generates a handler function that pushes a token with the given kind
/// and advances the lexer position by the token's length.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: Regex| {
            lexer.push(MK_TOKEN!($kind, String::from($value), lexer));
            lexer.advance_n($value.len() as u32);
        }
    };
}
