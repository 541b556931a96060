#![allow(clippy::module_inception)]

use std::rc::Rc;

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod scanner;

use crate::lexer::tokens::Token;

/// A source region used by diagnostics: the line it starts on, the column
/// range on that line, and the full text of the line for snippet rendering.
#[derive(Debug, Clone)]
pub struct Span {
    pub line: u32,
    pub start: u32,
    pub end: u32,
    pub source_line: Rc<String>,
}

impl Span {
    pub fn null() -> Self {
        Span {
            line: 0,
            start: 0,
            end: 0,
            source_line: Rc::new(String::new()),
        }
    }

    pub fn from_token(token: &Token) -> Self {
        Span {
            line: token.line,
            start: token.column,
            end: token.end_column(),
            source_line: Rc::clone(&token.source_line),
        }
    }

    /// Spans a token range. A range that crosses lines is clipped to the
    /// first token's line since only one source line is shown per diagnostic.
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let (first, last) = match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Span::null(),
        };

        let end = if last.line == first.line {
            last.end_column()
        } else {
            first.source_line.chars().count() as u32
        };

        Span {
            line: first.line,
            start: first.column,
            end,
            source_line: Rc::clone(&first.source_line),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::lexer::tokenize;
    use crate::Span;

    #[test]
    fn test_span_from_tokens_covers_range() {
        let tokens = tokenize("a + foo").unwrap();
        let span = Span::from_tokens(&tokens[..3]);

        assert_eq!(span.line, 1);
        assert_eq!(span.start, 0);
        assert_eq!(span.end, 7);
        assert_eq!(*span.source_line, "a + foo");
    }

    #[test]
    fn test_span_from_tokens_clips_to_first_line() {
        let tokens = tokenize("abc\ndef").unwrap();
        let span = Span::from_tokens(&tokens);

        assert_eq!(span.line, 1);
        assert_eq!(span.end, 3);
        assert_eq!(*span.source_line, "abc");
    }

    #[test]
    fn test_span_from_empty_range() {
        let span = Span::from_tokens(&[]);
        assert_eq!(span.line, 0);
        assert_eq!(span.start, 0);
        assert_eq!(span.end, 0);
    }
}
