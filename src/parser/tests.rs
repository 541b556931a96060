//! Unit tests for the parser.
//!
//! This module contains tests for statement dispatch, operator
//! precedence, postfix forms (calls, indexing), and error recovery.

use crate::ast::expressions::{Expr, ExprKind};
use crate::ast::statements::{Stmt, StmtKind};
use crate::errors::errors::{Error, ErrorKind};
use crate::lexer::lexer::tokenize;
use crate::lexer::tokens::TokenKind;
use crate::parser::parser::parse;

fn parse_source(source: &str) -> Vec<Stmt> {
    let tokens = tokenize(source).unwrap();
    let (statements, errors) = parse(&tokens);
    assert!(errors.is_empty(), "unexpected parse errors: {:?}", errors);
    statements
}

fn parse_failures(source: &str) -> Vec<Error> {
    let tokens = tokenize(source).unwrap();
    let (_, errors) = parse(&tokens);
    errors
}

fn first_expr(source: &str) -> Expr {
    let mut statements = parse_source(source);
    assert_eq!(statements.len(), 1);
    match statements.remove(0).kind {
        StmtKind::Expression(expr) => expr,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

fn binary_parts(expr: &Expr) -> (TokenKind, &Expr, &Expr) {
    match &expr.kind {
        ExprKind::Binary {
            operator,
            left,
            right,
        } => (operator.kind, left, right),
        other => panic!("expected binary expression, got {:?}", other),
    }
}

fn variable_name(expr: &Expr) -> &str {
    match &expr.kind {
        ExprKind::Variable(token) => &token.value,
        other => panic!("expected variable, got {:?}", other),
    }
}

#[test]
fn test_declaration() {
    let statements = parse_source("a := 1");
    match &statements[0].kind {
        StmtKind::Declaration {
            name,
            declared_type,
            value,
        } => {
            assert_eq!(name.value, "a");
            assert!(declared_type.is_none());
            assert!(matches!(value.kind, ExprKind::Literal(_)));
        }
        other => panic!("expected declaration, got {:?}", other),
    }
}

#[test]
fn test_typed_declaration() {
    let statements = parse_source("nums: []int = []");
    match &statements[0].kind {
        StmtKind::Declaration {
            name,
            declared_type,
            ..
        } => {
            assert_eq!(name.value, "nums");
            assert_eq!(declared_type.as_ref().unwrap().to_string(), "[]int");
        }
        other => panic!("expected declaration, got {:?}", other),
    }
}

#[test]
fn test_assignment() {
    let statements = parse_source("a = 2");
    match &statements[0].kind {
        StmtKind::Assignment { target, .. } => {
            assert_eq!(variable_name(target), "a");
        }
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_multiplication_binds_tighter() {
    let expr = first_expr("1 + 2 * 3");
    let (op, left, right) = binary_parts(&expr);
    assert_eq!(op, TokenKind::Plus);
    assert!(matches!(left.kind, ExprKind::Literal(_)));
    let (inner, _, _) = binary_parts(right);
    assert_eq!(inner, TokenKind::Star);
}

#[test]
fn test_same_class_is_left_associative() {
    let expr = first_expr("1 - 2 - 3");
    let (op, left, right) = binary_parts(&expr);
    assert_eq!(op, TokenKind::Dash);
    assert!(matches!(right.kind, ExprKind::Literal(_)));
    let (inner, _, _) = binary_parts(left);
    assert_eq!(inner, TokenKind::Dash);
}

#[test]
fn test_logical_binds_loosest() {
    let expr = first_expr("a && b == c");
    let (op, _, right) = binary_parts(&expr);
    assert_eq!(op, TokenKind::And);
    let (inner, _, _) = binary_parts(right);
    assert_eq!(inner, TokenKind::Equals);
}

#[test]
fn test_unary_sign_is_not_a_split_point() {
    let expr = first_expr("a * -b");
    let (op, _, right) = binary_parts(&expr);
    assert_eq!(op, TokenKind::Star);
    match &right.kind {
        ExprKind::Unary { operator, operand } => {
            assert_eq!(operator.kind, TokenKind::Dash);
            assert_eq!(variable_name(operand), "b");
        }
        other => panic!("expected unary, got {:?}", other),
    }
}

#[test]
fn test_leading_unary() {
    let expr = first_expr("-a + b");
    let (op, left, _) = binary_parts(&expr);
    assert_eq!(op, TokenKind::Plus);
    assert!(matches!(left.kind, ExprKind::Unary { .. }));
}

#[test]
fn test_group_overrides_precedence() {
    let expr = first_expr("(1 + 2) * 3");
    let (op, left, _) = binary_parts(&expr);
    assert_eq!(op, TokenKind::Star);
    assert!(matches!(left.kind, ExprKind::Group(_)));
}

#[test]
fn test_array_literal() {
    let expr = first_expr("[1, 2, 3]");
    match &expr.kind {
        ExprKind::Array(body) => match &body.kind {
            ExprKind::Args(parts) => assert_eq!(parts.len(), 3),
            other => panic!("expected args, got {:?}", other),
        },
        other => panic!("expected array, got {:?}", other),
    }
}

#[test]
fn test_empty_array_literal() {
    let expr = first_expr("[]");
    match &expr.kind {
        ExprKind::Array(body) => assert!(body.is_empty()),
        other => panic!("expected array, got {:?}", other),
    }
}

#[test]
fn test_call() {
    let expr = first_expr("f(1, 2)");
    match &expr.kind {
        ExprKind::Call { callee, args } => {
            assert_eq!(variable_name(callee), "f");
            assert!(matches!(args.kind, ExprKind::Args(_)));
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_call_without_arguments() {
    let expr = first_expr("f()");
    match &expr.kind {
        ExprKind::Call { args, .. } => assert!(args.is_empty()),
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_index_on_call_result() {
    let expr = first_expr("f(x)[0]");
    match &expr.kind {
        ExprKind::Index { array, .. } => {
            assert!(matches!(array.kind, ExprKind::Call { .. }));
        }
        other => panic!("expected index, got {:?}", other),
    }
}

#[test]
fn test_in_operator() {
    let expr = first_expr("x in xs");
    let (op, _, _) = binary_parts(&expr);
    assert_eq!(op, TokenKind::In);
}

#[test]
fn test_newline_inside_call() {
    let expr = first_expr("f(1,\n2)");
    assert!(matches!(expr.kind, ExprKind::Call { .. }));
}

#[test]
fn test_function_declaration() {
    let statements = parse_source("func add(a: int, b: int): int {\n return a + b \n}");
    match &statements[0].kind {
        StmtKind::Function(decl) => {
            assert_eq!(decl.name.value, "add");
            assert_eq!(decl.params.len(), 2);
            assert_eq!(decl.params[0].name.value, "a");
            assert_eq!(decl.params[0].ty.to_string(), "int");
            assert_eq!(decl.return_type.as_ref().unwrap().to_string(), "int");
            assert_eq!(decl.body.len(), 1);
            assert!(matches!(decl.body[0].kind, StmtKind::Return(_)));
        }
        other => panic!("expected function, got {:?}", other),
    }
}

#[test]
fn test_function_without_return_type() {
    let statements = parse_source("func hello() {\n x := 1 \n}");
    match &statements[0].kind {
        StmtKind::Function(decl) => {
            assert!(decl.params.is_empty());
            assert!(decl.return_type.is_none());
        }
        other => panic!("expected function, got {:?}", other),
    }
}

#[test]
fn test_bare_return() {
    let statements = parse_source("return");
    match &statements[0].kind {
        StmtKind::Return(value) => assert!(value.is_empty()),
        other => panic!("expected return, got {:?}", other),
    }
}

#[test]
fn test_block_statement() {
    let statements = parse_source("{\n a := 1 \n b := 2 \n}");
    match &statements[0].kind {
        StmtKind::Block(body) => assert_eq!(body.len(), 2),
        other => panic!("expected block, got {:?}", other),
    }
}

#[test]
fn test_recovery_collects_all_errors() {
    let tokens = tokenize("a +\nb := 1\nc *\n").unwrap();
    let (statements, errors) = parse(&tokens);

    assert_eq!(errors.len(), 2);
    assert_eq!(statements.len(), 1);
    assert!(matches!(statements[0].kind, StmtKind::Declaration { .. }));
}

#[test]
fn test_unmatched_bracket() {
    let errors = parse_failures("a := (1 + 2\n");
    assert!(matches!(
        errors[0].kind(),
        ErrorKind::UnmatchedBracket { .. }
    ));
}

#[test]
fn test_missing_right_operand() {
    let errors = parse_failures("a := 1 +\n");
    assert!(matches!(
        errors[0].kind(),
        ErrorKind::ExpectedExpression { .. }
    ));
}

#[test]
fn test_invalid_declaration_target() {
    let errors = parse_failures("a + b := 1\n");
    assert!(matches!(
        errors[0].kind(),
        ErrorKind::InvalidDeclarationTarget
    ));
}

#[test]
fn test_empty_group() {
    let errors = parse_failures("a := ()\n");
    assert!(matches!(errors[0].kind(), ErrorKind::EmptyGroup));
}

#[test]
fn test_missing_index() {
    let errors = parse_failures("a := b[]\n");
    assert!(matches!(errors[0].kind(), ErrorKind::MissingIndex));
}

#[test]
fn test_error_inside_block_aborts_block() {
    let errors = parse_failures("{\n a := \n b := 2 \n}\n");
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0].kind(),
        ErrorKind::ExpectedExpression { .. }
    ));
}

#[test]
fn test_error_spans_point_at_source() {
    let errors = parse_failures("x := 1 +\n");
    let span = errors[0].span();
    assert_eq!(span.line, 1);
    assert_eq!(span.start, 7);
}
