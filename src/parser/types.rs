//! Type annotation parsing.

use crate::{
    ast::types::{BaseType, Type},
    errors::errors::{Error, ErrorKind},
    lexer::tokens::{Token, TokenKind, TYPEWORD_LOOKUP},
    Span,
};

/// Parses a type annotation of the form `("[" "]")* name`, e.g. `int`,
/// `[]string` or `[][]u8`. Names that are not built-in typewords become
/// user-defined types; the scanner decides whether they exist.
pub fn parse_type(tokens: &[Token]) -> Result<Type, Error> {
    let mut depth = 0usize;
    let mut rest = tokens;

    while let [open, close, tail @ ..] = rest {
        if open.kind != TokenKind::OpenBracket {
            break;
        }
        if close.kind != TokenKind::CloseBracket {
            return Err(Error::new(
                ErrorKind::InvalidTypeToken {
                    token: close.value.clone(),
                },
                Span::from_token(close),
            ));
        }
        depth += 1;
        rest = tail;
    }

    let base = match rest {
        [name] if name.kind == TokenKind::Identifier => {
            match TYPEWORD_LOOKUP.get(name.value.as_str()) {
                Some(base) => base.clone(),
                None => BaseType::UserDefined(name.value.clone()),
            }
        }
        [token, ..] => {
            return Err(Error::new(
                ErrorKind::InvalidTypeToken {
                    token: token.value.clone(),
                },
                Span::from_token(token),
            ))
        }
        [] => return Err(Error::new(ErrorKind::ExpectedType, Span::from_tokens(tokens))),
    };

    let mut ty = Type::new(base);
    for _ in 0..depth {
        ty = Type::array(ty);
    }
    Ok(ty)
}
