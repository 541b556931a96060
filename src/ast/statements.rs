use crate::{ast::expressions::Expr, ast::types::Type, lexer::tokens::Token, Span};

#[derive(Debug, Clone)]
pub struct Param {
    pub name: Token,
    pub ty: Type,
}

#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: Token,
    pub params: Vec<Param>,
    pub return_type: Option<Type>,
    pub body: Vec<Stmt>,
}

/// Statement nodes. `Declaration.declared_type` starts out as the explicit
/// annotation (or `None` for `:=`) and is filled in with the inferred type
/// by the scanner, so the emitter always sees a concrete type.
#[derive(Debug, Clone)]
pub enum StmtKind {
    Expression(Expr),
    Declaration {
        name: Token,
        declared_type: Option<Type>,
        value: Expr,
    },
    Assignment {
        target: Expr,
        value: Expr,
    },
    Return(Expr),
    Block(Vec<Stmt>),
    Function(FunctionDecl),
}

#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}
