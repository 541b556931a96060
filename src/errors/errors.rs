use std::fmt::Display;

use thiserror::Error;

use crate::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A single diagnostic: what went wrong plus where. Errors from the parser
/// additionally carry a `fatal` flag; a fatal error aborts the statement
/// it occurred in while parsing resumes at the next top-level statement.
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    severity: Severity,
    span: Span,
    fatal: bool,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Error {
            kind,
            severity: Severity::Error,
            span,
            fatal: true,
        }
    }

    pub fn warning(kind: ErrorKind, span: Span) -> Self {
        Error {
            kind,
            severity: Severity::Warning,
            span,
            fatal: false,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Renders the diagnostic with its source snippet and a caret underline:
///
/// ```text
/// error: 'b' is undefined, line 2
///  2 | a := b + 1
///    |      ^
/// ```
impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        let line = self.span.line.to_string();
        let text = self.span.source_line.replace('\t', "    ");

        writeln!(f, "{}: {}, line {}", label, self.kind, line)?;
        writeln!(f, " {} | {}", line, text)?;

        let width = if self.span.end > self.span.start {
            (self.span.end - self.span.start) as usize
        } else {
            1
        };
        // The caret indent has to match the tab expansion above.
        let tabs = self
            .span
            .source_line
            .chars()
            .take(self.span.start as usize)
            .filter(|c| *c == '\t')
            .count();
        write!(
            f,
            " {} | {}{}",
            " ".repeat(line.len()),
            " ".repeat(self.span.start as usize + tabs * 3),
            "^".repeat(width)
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    // lexical
    #[error("unrecognised token: '{token}'")]
    UnrecognisedToken { token: String },

    // syntax
    #[error("unmatched '{bracket}'")]
    UnmatchedBracket { bracket: String },
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("expected '{expected}', found '{found}'")]
    ExpectedToken { expected: String, found: String },
    #[error("expected identifier, got '{found}'")]
    ExpectedIdentifier { found: String },
    #[error("expected a single identifier on the left side of ':='")]
    InvalidDeclarationTarget,
    #[error("expected expression on {side} side of '{operator}'")]
    ExpectedExpression { side: String, operator: String },
    #[error("expected literal in expression, got '{found}'")]
    ExpectedLiteral { found: String },
    #[error("expected expression in '()'")]
    EmptyGroup,
    #[error("missing expression as index")]
    MissingIndex,
    #[error("invalid token in type: '{token}'")]
    InvalidTypeToken { token: String },
    #[error("expected a type")]
    ExpectedType,
    #[error("expected block, found '{found}'")]
    ExpectedBlock { found: String },
    #[error("invalid expression")]
    InvalidExpression,

    // semantic
    #[error("'{name}' is undefined")]
    Undefined { name: String },
    #[error("'{name}' is already declared")]
    AlreadyDeclared { name: String },
    #[error("function '{name}' is already declared")]
    FunctionAlreadyDeclared { name: String },
    #[error("'{name}' is a reserved word")]
    ReservedName { name: String },
    #[error("cannot declare '{name}' with no type")]
    DeclaredNone { name: String },
    #[error("'{name}' must be declared before assignment")]
    AssignUndeclared { name: String },
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("mismatched types, expected {expected}, got {found}")]
    TypeMismatch { expected: String, found: String },
    #[error("mismatched types {left} and {right} in expression")]
    OperandMismatch { left: String, right: String },
    #[error("invalid operator '{operator}' for type {type_name}")]
    InvalidOperator { operator: String, type_name: String },
    #[error("type of index {index} did not match the first element in array literal, expected {expected}, got {found}")]
    ArrayElementMismatch {
        index: usize,
        expected: String,
        found: String,
    },
    #[error("new element does not match the array type, expected {expected}, got {found}")]
    ArrayAppendMismatch { expected: String, found: String },
    #[error("cannot index into type {type_name}")]
    NotAnArray { type_name: String },
    #[error("array index must be an unsigned integer, got {found}")]
    InvalidIndexType { found: String },
    #[error("'{name}' is not a function")]
    NotAFunction { name: String },
    #[error("only named functions can be called")]
    InvalidCallee,
    #[error("'{name}' takes {expected} arguments, got {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("argument {index} of '{name}' has mismatched type, expected {expected}, got {found}")]
    ArgumentTypeMismatch {
        index: usize,
        name: String,
        expected: String,
        found: String,
    },
    #[error("unexpected argument list")]
    UnexpectedArgs,
    #[error("missing return in function '{name}'")]
    MissingReturn { name: String },
    #[error("'return' outside of function")]
    ReturnOutsideFunction,
    #[error("functions can only be declared at top level")]
    NestedFunction,

    // warnings
    #[error("variable shadowing of '{name}'")]
    ShadowedVariable { name: String },
    #[error("unused variable '{name}'")]
    UnusedVariable { name: String },
}
