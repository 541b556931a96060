//! Unit tests for diagnostics.
//!
//! This module contains tests for diagnostic construction and the
//! caret-underlined snippet rendering.

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorKind, Severity};
use crate::Span;

fn span_on(line: u32, start: u32, end: u32, text: &str) -> Span {
    Span {
        line,
        start,
        end,
        source_line: Rc::new(text.to_string()),
    }
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorKind::Undefined {
            name: "a".to_string(),
        },
        span_on(3, 0, 1, "a + 1"),
    );

    assert_eq!(error.severity(), Severity::Error);
    assert!(error.is_fatal());
    assert_eq!(error.span().line, 3);
    assert_eq!(error.message(), "'a' is undefined");
}

#[test]
fn test_warning_creation() {
    let warning = Error::warning(
        ErrorKind::UnusedVariable {
            name: "tmp".to_string(),
        },
        span_on(5, 4, 7, "    tmp := 1"),
    );

    assert_eq!(warning.severity(), Severity::Warning);
    assert!(!warning.is_fatal());
}

#[test]
fn test_display_underlines_span() {
    let error = Error::new(
        ErrorKind::TypeMismatch {
            expected: "int".to_string(),
            found: "string".to_string(),
        },
        span_on(2, 5, 10, "a := \"hey\""),
    );

    let rendered = error.to_string();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "error: mismatched types, expected int, got string, line 2");
    assert_eq!(lines[1], " 2 | a := \"hey\"");
    assert_eq!(lines[2], "   |      ^^^^^");
}

#[test]
fn test_display_expands_tabs_under_caret() {
    let error = Error::new(
        ErrorKind::Undefined {
            name: "t".to_string(),
        },
        span_on(3, 1, 2, "\tt := 1"),
    );

    let rendered = error.to_string();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[1], " 3 |     t := 1");
    assert_eq!(lines[2], "   |     ^");
}

#[test]
fn test_display_minimum_caret_width() {
    let error = Error::new(ErrorKind::UnexpectedEndOfInput, span_on(1, 3, 3, "a :="));
    let rendered = error.to_string();

    assert!(rendered.lines().last().unwrap().ends_with("   ^"));
}

#[test]
fn test_warning_label() {
    let warning = Error::warning(
        ErrorKind::ShadowedVariable {
            name: "x".to_string(),
        },
        span_on(4, 4, 5, "    x := 2"),
    );

    assert!(warning.to_string().starts_with("warning: variable shadowing of 'x', line 4"));
}

#[test]
fn test_arity_message_shape() {
    let error = Error::new(
        ErrorKind::ArityMismatch {
            name: "f".to_string(),
            expected: 1,
            found: 2,
        },
        span_on(1, 0, 7, "f(1, 2)"),
    );

    assert_eq!(error.message(), "'f' takes 1 arguments, got 2");
}
