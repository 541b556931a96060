//! End-to-end tests driving the full pipeline: source text through the
//! lexer, parser, and scanner.

use neon::ast::expressions::{Expr, ExprKind};
use neon::ast::statements::{Stmt, StmtKind};
use neon::errors::errors::{Error, ErrorKind};
use neon::lexer::lexer::tokenize;
use neon::parser::parser::parse;
use neon::scanner::scanner::scan;

fn check(source: &str) -> (Vec<Stmt>, Vec<Error>, Option<Error>) {
    let tokens = tokenize(source).expect("tokenize failed");
    let (mut statements, parse_errors) = parse(&tokens);
    assert!(parse_errors.is_empty(), "parse errors: {:?}", parse_errors);
    let (warnings, fatal) = scan(&mut statements);
    (statements, warnings, fatal)
}

/// The expression tree as a fully parenthesised string, groups elided.
fn shape(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Literal(token) | ExprKind::Variable(token) => token.value.clone(),
        ExprKind::Group(inner) => shape(inner),
        ExprKind::Unary { operator, operand } => format!("({}{})", operator.value, shape(operand)),
        ExprKind::Binary {
            operator,
            left,
            right,
        } => format!("({} {} {})", shape(left), operator.value, shape(right)),
        other => panic!("unexpected expression {:?}", other),
    }
}

fn expression_shape(source: &str) -> String {
    let tokens = tokenize(source).unwrap();
    let (statements, errors) = parse(&tokens);
    assert!(errors.is_empty(), "parse errors: {:?}", errors);
    match &statements[0].kind {
        StmtKind::Expression(expr) => shape(expr),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_whole_program() {
    let source = "\
func sum(values: []int): int {
    total := values[0] + values[1]
    return total
}

nums := [1, 2, 3]
answer := sum(nums)
check := answer in nums
";
    let (statements, warnings, fatal) = check(source);

    assert!(fatal.is_none(), "unexpected error: {:?}", fatal);
    assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
    assert_eq!(statements.len(), 4);

    match &statements[3].kind {
        StmtKind::Declaration { declared_type, .. } => {
            assert_eq!(declared_type.as_ref().unwrap().to_string(), "bool");
        }
        other => panic!("expected declaration, got {:?}", other),
    }
}

#[test]
fn test_declaration_infers_int() {
    let (statements, _, fatal) = check("a := 1");
    assert!(fatal.is_none());
    match &statements[0].kind {
        StmtKind::Declaration { declared_type, .. } => {
            assert_eq!(declared_type.as_ref().unwrap().to_string(), "int");
        }
        other => panic!("expected declaration, got {:?}", other),
    }
}

#[test]
fn test_undefined_variable_message() {
    let (_, _, fatal) = check("a + b");
    assert_eq!(fatal.unwrap().message(), "'a' is undefined");
}

#[test]
fn test_function_returning_works() {
    let (_, _, fatal) = check("func f(): int {\n return 1 \n}\nx := f()");
    assert!(fatal.is_none());
}

#[test]
fn test_function_missing_return_fails() {
    let (_, _, fatal) = check("func f(): int {\n x := 1 \n}");
    assert!(matches!(
        fatal.unwrap().kind(),
        ErrorKind::MissingReturn { .. }
    ));
}

#[test]
fn test_mixed_array_literal_fails() {
    let (_, _, fatal) = check("a := [1, 2.0]");
    match fatal.unwrap().kind() {
        ErrorKind::ArrayElementMismatch { index, .. } => assert_eq!(*index, 1),
        other => panic!("expected element mismatch, got {:?}", other),
    }
}

#[test]
fn test_wrong_arity_fails() {
    let (_, _, fatal) = check("func f(a: int): int {\n return a \n}\nx := f(1, 2)");
    assert!(matches!(
        fatal.unwrap().kind(),
        ErrorKind::ArityMismatch { .. }
    ));
}

#[test]
fn test_precedence_matches_explicit_grouping() {
    assert_eq!(
        expression_shape("1 + 2 * 3 - 4 / 2"),
        expression_shape("(1 + (2 * 3)) - (4 / 2)")
    );
    assert_eq!(
        expression_shape("a || b && c == d + e"),
        expression_shape("a || (b && (c == (d + e)))")
    );
    assert_eq!(expression_shape("1 - 2 - 3"), expression_shape("(1 - 2) - 3"));
}

#[test]
fn test_redeclaration_fails_but_shadowing_warns() {
    let (_, _, fatal) = check("a := 1\na := 2");
    assert!(matches!(
        fatal.unwrap().kind(),
        ErrorKind::AlreadyDeclared { .. }
    ));

    let (_, warnings, fatal) = check("a := 1\n{\n a := 2\n b := a \n}\nc := a");
    assert!(fatal.is_none());
    assert!(warnings
        .iter()
        .any(|warning| matches!(warning.kind(), ErrorKind::ShadowedVariable { .. })));
}

#[test]
fn test_diagnostic_rendering() {
    let (_, _, fatal) = check("nope = 1");
    let rendered = fatal.unwrap().to_string();

    assert!(rendered.contains("'nope' must be declared before assignment"));
    assert!(rendered.contains("nope = 1"));
    assert!(rendered.contains("^^^^"));
}

#[test]
fn test_parse_errors_reported_per_statement() {
    let tokens = tokenize("a := (1\nb := 2\nc :=\n").unwrap();
    let (statements, errors) = parse(&tokens);

    assert_eq!(errors.len(), 2);
    assert_eq!(statements.len(), 1);
}
