//! Expression parsing by top-level operator splitting.
//!
//! An expression slice is split at the last top-level operator of the
//! loosest class it contains, and both halves are parsed recursively.
//! Splitting on the last occurrence makes operators within one class
//! left-associative; splitting loosest-first makes tighter classes bind
//! harder. A split candidate directly preceded by another operator is a
//! unary sign, not a binary operator, and is skipped.

use crate::{
    ast::expressions::{Expr, ExprKind},
    errors::errors::{Error, ErrorKind},
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::parser::{closing, opening};

/// Binary operator classes, loosest binding first.
const PRECEDENCE: [&[TokenKind]; 9] = [
    &[TokenKind::Or],
    &[TokenKind::And],
    &[
        TokenKind::In,
        TokenKind::Equals,
        TokenKind::NotEquals,
        TokenKind::GreaterEquals,
        TokenKind::LessEquals,
        TokenKind::Greater,
        TokenKind::Less,
    ],
    &[TokenKind::BitOr],
    &[TokenKind::BitXor],
    &[TokenKind::BitAnd],
    &[TokenKind::ShiftLeft, TokenKind::ShiftRight],
    &[TokenKind::Plus, TokenKind::Dash],
    &[TokenKind::Star, TokenKind::Slash, TokenKind::Percent],
];

/// Parses a bracket-balanced token slice into an expression tree. An
/// empty slice parses to [`ExprKind::Empty`]; callers that require an
/// expression check for it.
pub fn parse_expression(tokens: &[Token]) -> Result<Expr, Error> {
    // Newlines only reach an expression from inside brackets, where they
    // are formatting.
    if tokens.iter().any(|token| token.kind == TokenKind::Newline) {
        let filtered: Vec<Token> = tokens
            .iter()
            .filter(|token| token.kind != TokenKind::Newline)
            .cloned()
            .collect();
        return parse_expression(&filtered);
    }

    if tokens.is_empty() {
        return Ok(Expr::empty());
    }

    check_brackets(tokens)?;

    let span = Span::from_tokens(tokens);

    if let [token] = tokens {
        return single_token(token);
    }

    // Top-level commas make this an argument list or array body.
    if find_top_level(tokens, TokenKind::Comma).is_some() {
        let mut parts = Vec::new();
        for (i, part) in split_top_level(tokens, TokenKind::Comma).iter().enumerate() {
            let expr = parse_expression(part)?;
            if expr.is_empty() {
                let side = if i == 0 { "left" } else { "right" };
                return Err(Error::new(
                    ErrorKind::ExpectedExpression {
                        side: side.to_string(),
                        operator: String::from(","),
                    },
                    span.clone(),
                ));
            }
            parts.push(expr);
        }
        return Ok(Expr::new(ExprKind::Args(parts), span));
    }

    if tokens[0].kind == TokenKind::OpenParen && matching_close(tokens, 0) == Some(tokens.len() - 1)
    {
        let inner = &tokens[1..tokens.len() - 1];
        if inner.is_empty() {
            return Err(Error::new(ErrorKind::EmptyGroup, span));
        }
        let inner = parse_expression(inner)?;
        return Ok(Expr::new(ExprKind::Group(Box::new(inner)), span));
    }

    for class in PRECEDENCE {
        if let Some(split) = find_binary_split(tokens, class) {
            let operator = tokens[split].clone();
            let left = parse_expression(&tokens[..split])?;
            let right = parse_expression(&tokens[split + 1..])?;
            if right.is_empty() {
                return Err(Error::new(
                    ErrorKind::ExpectedExpression {
                        side: String::from("right"),
                        operator: operator.value.clone(),
                    },
                    Span::from_token(&operator),
                ));
            }
            return Ok(Expr::new(
                ExprKind::Binary {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            ));
        }
    }

    if matches!(
        tokens[0].kind,
        TokenKind::Dash | TokenKind::Not | TokenKind::Tilde
    ) {
        let operator = tokens[0].clone();
        let operand = parse_expression(&tokens[1..])?;
        return Ok(Expr::new(
            ExprKind::Unary {
                operator,
                operand: Box::new(operand),
            },
            span,
        ));
    }

    if tokens[0].kind == TokenKind::OpenBracket
        && matching_close(tokens, 0) == Some(tokens.len() - 1)
    {
        let body = parse_expression(&tokens[1..tokens.len() - 1])?;
        return Ok(Expr::new(ExprKind::Array(Box::new(body)), span));
    }

    // A trailing `(...)` that is not a group is a call on whatever
    // expression precedes it, likewise a trailing `[...]` is an index.
    if tokens[tokens.len() - 1].kind == TokenKind::CloseParen {
        if let Some(open) = matching_open(tokens, tokens.len() - 1) {
            let callee = parse_expression(&tokens[..open])?;
            let args = parse_expression(&tokens[open + 1..tokens.len() - 1])?;
            return Ok(Expr::new(
                ExprKind::Call {
                    callee: Box::new(callee),
                    args: Box::new(args),
                },
                span,
            ));
        }
    }

    if tokens[tokens.len() - 1].kind == TokenKind::CloseBracket {
        if let Some(open) = matching_open(tokens, tokens.len() - 1) {
            let array = parse_expression(&tokens[..open])?;
            let inner = &tokens[open + 1..tokens.len() - 1];
            if inner.is_empty() {
                return Err(Error::new(ErrorKind::MissingIndex, span));
            }
            let index = parse_expression(inner)?;
            return Ok(Expr::new(
                ExprKind::Index {
                    array: Box::new(array),
                    index: Box::new(index),
                },
                span,
            ));
        }
    }

    Err(Error::new(ErrorKind::InvalidExpression, span))
}

fn single_token(token: &Token) -> Result<Expr, Error> {
    let span = Span::from_token(token);
    match token.kind {
        TokenKind::Number
        | TokenKind::String
        | TokenKind::Char
        | TokenKind::True
        | TokenKind::False => Ok(Expr::new(ExprKind::Literal(token.clone()), span)),
        TokenKind::Identifier => Ok(Expr::new(ExprKind::Variable(token.clone()), span)),
        _ => Err(Error::new(
            ErrorKind::ExpectedLiteral {
                found: token.value.clone(),
            },
            span,
        )),
    }
}

fn check_brackets(tokens: &[Token]) -> Result<(), Error> {
    let mut openers: Vec<&Token> = Vec::new();
    for token in tokens {
        if closing(token.kind).is_some() {
            openers.push(token);
        } else if let Some(open) = opening(token.kind) {
            match openers.pop() {
                Some(opener) if opener.kind == open => {}
                _ => {
                    return Err(Error::new(
                        ErrorKind::UnmatchedBracket {
                            bracket: token.value.clone(),
                        },
                        Span::from_token(token),
                    ))
                }
            }
        }
    }
    if let Some(opener) = openers.last() {
        return Err(Error::new(
            ErrorKind::UnmatchedBracket {
                bracket: opener.value.clone(),
            },
            Span::from_token(opener),
        ));
    }
    Ok(())
}

/// The index of the first top-level token of the given kind.
pub(super) fn find_top_level(tokens: &[Token], kind: TokenKind) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate() {
        if closing(token.kind).is_some() {
            depth += 1;
        } else if opening(token.kind).is_some() {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && token.kind == kind {
            return Some(i);
        }
    }
    None
}

/// Splits a slice at every top-level token of the given kind. The
/// separators are dropped; empty parts are kept so callers can report
/// them.
pub(super) fn split_top_level(tokens: &[Token], kind: TokenKind) -> Vec<&[Token]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        if closing(token.kind).is_some() {
            depth += 1;
        } else if opening(token.kind).is_some() {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && token.kind == kind {
            parts.push(&tokens[start..i]);
            start = i + 1;
        }
    }
    parts.push(&tokens[start..]);
    parts
}

/// The last top-level operator of the class that is usable as a binary
/// split point. An operator in first position, or one directly after
/// another operator, is unary and never a split point.
fn find_binary_split(tokens: &[Token], class: &[TokenKind]) -> Option<usize> {
    let mut depth = 0usize;
    let mut split = None;
    for (i, token) in tokens.iter().enumerate() {
        if closing(token.kind).is_some() {
            depth += 1;
        } else if opening(token.kind).is_some() {
            depth = depth.saturating_sub(1);
        } else if depth == 0
            && i > 0
            && class.contains(&token.kind)
            && !tokens[i - 1].kind.is_operator()
        {
            split = Some(i);
        }
    }
    split
}

fn matching_close(tokens: &[Token], open: usize) -> Option<usize> {
    let close = closing(tokens[open].kind)?;
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open + 1) {
        if depth == 0 && token.kind == close {
            return Some(i);
        }
        if closing(token.kind).is_some() {
            depth += 1;
        } else if opening(token.kind).is_some() {
            depth = depth.saturating_sub(1);
        }
    }
    None
}

fn matching_open(tokens: &[Token], close: usize) -> Option<usize> {
    let open = opening(tokens[close].kind)?;
    let mut depth = 0usize;
    for i in (0..close).rev() {
        let kind = tokens[i].kind;
        if depth == 0 && kind == open {
            return Some(i);
        }
        if opening(kind).is_some() {
            depth += 1;
        } else if closing(kind).is_some() {
            depth = depth.saturating_sub(1);
        }
    }
    None
}
