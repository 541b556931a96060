use crate::{lexer::tokens::Token, Span};

/// Expression tree nodes. `Args` only ever appears directly inside a
/// `Call` argument list or an `Array` literal; the scanner rejects it
/// anywhere else.
#[derive(Debug, Clone)]
pub enum ExprKind {
    Empty,
    Literal(Token),
    Variable(Token),
    Group(Box<Expr>),
    Unary {
        operator: Token,
        operand: Box<Expr>,
    },
    Binary {
        operator: Token,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Array(Box<Expr>),
    Args(Vec<Expr>),
    Call {
        callee: Box<Expr>,
        args: Box<Expr>,
    },
    Index {
        array: Box<Expr>,
        index: Box<Expr>,
    },
}

/// An expression plus the source region it was parsed from.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    pub fn empty() -> Self {
        Expr {
            kind: ExprKind::Empty,
            span: Span::null(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.kind, ExprKind::Empty)
    }
}
