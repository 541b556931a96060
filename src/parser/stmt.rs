//! Statement parsing.
//!
//! Statements dispatch on their leading token: `func` declarations,
//! `return`, and `{` blocks are handled directly, everything else is a
//! one-line statement classified by its top-level `:=` or `=`.

use crate::{
    ast::expressions::Expr,
    ast::statements::{FunctionDecl, Param, Stmt, StmtKind},
    errors::errors::{Error, ErrorKind},
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::{
    expr::{find_top_level, parse_expression, split_top_level},
    parser::{parse_block_body, Frame},
    types::parse_type,
};

pub fn parse_stmt(frame: &mut Frame) -> Result<Stmt, Error> {
    match frame.current_kind() {
        Some(TokenKind::Func) => parse_func_stmt(frame),
        Some(TokenKind::Return) => parse_return_stmt(frame),
        Some(TokenKind::OpenCurly) => parse_block_stmt(frame),
        _ => parse_simple_stmt(frame),
    }
}

/// A one-line statement: a `:=` declaration, a typed `name: type = value`
/// declaration, an assignment, or a bare expression.
fn parse_simple_stmt(frame: &mut Frame) -> Result<Stmt, Error> {
    let tokens = frame.statement_extent()?;
    let stmt = simple_stmt_from(tokens)?;
    frame.consume_statement(tokens.len());
    Ok(stmt)
}

fn simple_stmt_from(tokens: &[Token]) -> Result<Stmt, Error> {
    let span = Span::from_tokens(tokens);

    if let Some(split) = find_top_level(tokens, TokenKind::ColonEqual) {
        let name = match &tokens[..split] {
            [name] if name.kind == TokenKind::Identifier => name.clone(),
            _ => {
                return Err(Error::new(
                    ErrorKind::InvalidDeclarationTarget,
                    Span::from_token(&tokens[split]),
                ))
            }
        };
        let value = required_expression(&tokens[split + 1..], "right", &tokens[split])?;
        return Ok(Stmt::new(
            StmtKind::Declaration {
                name,
                declared_type: None,
                value,
            },
            span,
        ));
    }

    if let Some(split) = find_top_level(tokens, TokenKind::Assignment) {
        let left = &tokens[..split];
        let value = required_expression(&tokens[split + 1..], "right", &tokens[split])?;

        if left.len() >= 2
            && left[0].kind == TokenKind::Identifier
            && left[1].kind == TokenKind::Colon
        {
            if left.len() == 2 {
                return Err(Error::new(ErrorKind::ExpectedType, Span::from_token(&left[1])));
            }
            let declared = parse_type(&left[2..])?;
            return Ok(Stmt::new(
                StmtKind::Declaration {
                    name: left[0].clone(),
                    declared_type: Some(declared),
                    value,
                },
                span,
            ));
        }

        let target = required_expression(left, "left", &tokens[split])?;
        return Ok(Stmt::new(StmtKind::Assignment { target, value }, span));
    }

    let expr = parse_expression(tokens)?;
    Ok(Stmt::new(StmtKind::Expression(expr), span))
}

fn parse_return_stmt(frame: &mut Frame) -> Result<Stmt, Error> {
    // The dispatcher guarantees the extent starts with `return`.
    let tokens = frame.statement_extent()?;
    let value = parse_expression(&tokens[1..])?;
    let span = Span::from_tokens(tokens);
    frame.consume_statement(tokens.len());
    Ok(Stmt::new(StmtKind::Return(value), span))
}

fn parse_block_stmt(frame: &mut Frame) -> Result<Stmt, Error> {
    let open = frame.expect(TokenKind::OpenCurly)?;
    let body_tokens = frame.seek(TokenKind::CloseCurly)?;
    let body = parse_block_body(body_tokens)?;
    Ok(Stmt::new(StmtKind::Block(body), Span::from_token(open)))
}

/// `func name(params): return_type { body }`, the return type clause
/// being optional.
fn parse_func_stmt(frame: &mut Frame) -> Result<Stmt, Error> {
    let start = frame.mark();
    frame.expect(TokenKind::Func)?;

    let name = match frame.advance() {
        Some(token) if token.kind == TokenKind::Identifier => token.clone(),
        Some(token) => {
            return Err(Error::new(
                ErrorKind::ExpectedIdentifier {
                    found: token.value.clone(),
                },
                Span::from_token(token),
            ))
        }
        None => return Err(Error::new(ErrorKind::UnexpectedEndOfInput, frame.end_span())),
    };

    frame.expect(TokenKind::OpenParen)?;
    let param_tokens = frame.seek(TokenKind::CloseParen)?;
    let params = parse_params(param_tokens)?;

    let mut return_type = None;
    if let Some(colon) = frame.current() {
        if colon.kind == TokenKind::Colon {
            frame.advance();
            let ty_tokens = frame.take_until(&[TokenKind::OpenCurly, TokenKind::Newline]);
            if ty_tokens.is_empty() {
                return Err(Error::new(ErrorKind::ExpectedType, Span::from_token(colon)));
            }
            return_type = Some(parse_type(ty_tokens)?);
        }
    }

    match frame.current() {
        Some(token) if token.kind == TokenKind::OpenCurly => {
            frame.advance();
        }
        Some(token) => {
            return Err(Error::new(
                ErrorKind::ExpectedBlock {
                    found: token.value.clone(),
                },
                Span::from_token(token),
            ))
        }
        None => return Err(Error::new(ErrorKind::UnexpectedEndOfInput, frame.end_span())),
    }

    let body_tokens = frame.seek(TokenKind::CloseCurly)?;
    let body = parse_block_body(body_tokens)?;

    let header = frame.slice_from(start);
    let span = Span::from_tokens(&header[..header.len().min(2)]);
    Ok(Stmt::new(
        StmtKind::Function(FunctionDecl {
            name,
            params,
            return_type,
            body,
        }),
        span,
    ))
}

/// Parses a `name: type` parameter list that has already been sliced out
/// of its parentheses.
fn parse_params(tokens: &[Token]) -> Result<Vec<Param>, Error> {
    let mut params = Vec::new();
    if tokens.is_empty() {
        return Ok(params);
    }

    for part in split_top_level(tokens, TokenKind::Comma) {
        let name = match part.first() {
            Some(token) if token.kind == TokenKind::Identifier => token.clone(),
            Some(token) => {
                return Err(Error::new(
                    ErrorKind::ExpectedIdentifier {
                        found: token.value.clone(),
                    },
                    Span::from_token(token),
                ))
            }
            None => {
                return Err(Error::new(
                    ErrorKind::ExpectedIdentifier {
                        found: String::from(","),
                    },
                    Span::from_tokens(tokens),
                ))
            }
        };
        match part.get(1) {
            Some(token) if token.kind == TokenKind::Colon => {}
            Some(token) => {
                return Err(Error::new(
                    ErrorKind::ExpectedToken {
                        expected: String::from(":"),
                        found: token.value.clone(),
                    },
                    Span::from_token(token),
                ))
            }
            None => {
                return Err(Error::new(
                    ErrorKind::ExpectedToken {
                        expected: String::from(":"),
                        found: name.value.clone(),
                    },
                    Span::from_token(&name),
                ))
            }
        }
        if part.len() == 2 {
            return Err(Error::new(ErrorKind::ExpectedType, Span::from_token(&part[1])));
        }
        params.push(Param {
            name,
            ty: parse_type(&part[2..])?,
        });
    }

    Ok(params)
}

fn required_expression(tokens: &[Token], side: &str, operator: &Token) -> Result<Expr, Error> {
    let expr = parse_expression(tokens)?;
    if expr.is_empty() {
        return Err(Error::new(
            ErrorKind::ExpectedExpression {
                side: side.to_string(),
                operator: operator.value.clone(),
            },
            Span::from_token(operator),
        ));
    }
    Ok(expr)
}
