//! The parsing cursor and the top-level parse loop.
//!
//! A [`Frame`] is a borrowed view of the token stream with a cursor. The
//! statement parsers use it to slice the stream at statement boundaries
//! with [`Frame::seek`], which skips bracketed content, so a newline
//! inside an argument list never terminates a statement.

use crate::{
    ast::statements::Stmt,
    errors::errors::{Error, ErrorKind},
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::stmt::parse_stmt;

/// A cursor over a borrowed token slice. Statement parsers advance it,
/// expression parsers work on the slices it hands out.
pub struct Frame<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Frame<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Frame { tokens, pos: 0 }
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    pub fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|token| token.kind)
    }

    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consumes the current token if it has the expected kind.
    pub fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, Error> {
        match self.current() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(token)
            }
            Some(token) => Err(Error::new(
                ErrorKind::ExpectedToken {
                    expected: kind.to_string(),
                    found: token.value.clone(),
                },
                Span::from_token(token),
            )),
            None => Err(Error::new(ErrorKind::UnexpectedEndOfInput, self.end_span())),
        }
    }

    /// Cursor position, for slicing a finished statement back out with
    /// [`Frame::slice_from`].
    pub fn mark(&self) -> usize {
        self.pos
    }

    pub fn slice_from(&self, start: usize) -> &'a [Token] {
        &self.tokens[start..self.pos]
    }

    /// The tokens from the cursor to the next top-level newline, without
    /// advancing. Mismatched brackets are reported here, so statement
    /// parsers can assume balanced slices. The cursor only moves on via
    /// [`Frame::consume_statement`] once the statement parsed, which
    /// keeps error recovery from skipping past the following statement.
    pub fn statement_extent(&self) -> Result<&'a [Token], Error> {
        let mut pos = self.pos;
        let mut openers: Vec<&Token> = Vec::new();

        while let Some(token) = self.tokens.get(pos) {
            if openers.is_empty() && token.kind == TokenKind::Newline {
                return Ok(&self.tokens[self.pos..pos]);
            }
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
            pos += 1;
        }

        if let Some(opener) = openers.last() {
            return Err(Error::new(
                ErrorKind::UnmatchedBracket {
                    bracket: opener.value.clone(),
                },
                Span::from_token(opener),
            ));
        }
        Ok(&self.tokens[self.pos..])
    }

    /// Consumes a parsed statement of `count` tokens plus its newline
    /// terminator, if any.
    pub fn consume_statement(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.tokens.len());
        if self.current_kind() == Some(TokenKind::Newline) {
            self.pos += 1;
        }
    }

    /// Advances to the next `end` token outside any brackets and returns
    /// the tokens before it, consuming the `end` token itself. Mismatched
    /// brackets along the way are an error.
    pub fn seek(&mut self, end: TokenKind) -> Result<&'a [Token], Error> {
        let start = self.pos;
        let mut openers: Vec<&Token> = Vec::new();

        while let Some(token) = self.current() {
            if openers.is_empty() && token.kind == end {
                self.pos += 1;
                return Ok(&self.tokens[start..self.pos - 1]);
            }
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
            self.pos += 1;
        }

        if let Some(opener) = openers.last() {
            return Err(Error::new(
                ErrorKind::UnmatchedBracket {
                    bracket: opener.value.clone(),
                },
                Span::from_token(opener),
            ));
        }
        Err(Error::new(ErrorKind::UnexpectedEndOfInput, self.end_span()))
    }

    /// Advances to (but not past) the first of the stop kinds, returning
    /// the tokens skipped over.
    pub fn take_until(&mut self, stops: &[TokenKind]) -> &'a [Token] {
        let start = self.pos;
        while let Some(token) = self.current() {
            if stops.contains(&token.kind) {
                break;
            }
            self.pos += 1;
        }
        &self.tokens[start..self.pos]
    }

    /// Skips past the next newline so parsing can resume after an error.
    /// Deliberately not bracket-aware: an unmatched opener would swallow
    /// the rest of the stream otherwise.
    pub fn synchronize(&mut self) {
        while let Some(token) = self.advance() {
            if token.kind == TokenKind::Newline {
                return;
            }
        }
    }

    pub fn end_span(&self) -> Span {
        match self.tokens.last() {
            Some(token) => Span::from_token(token),
            None => Span::null(),
        }
    }
}

pub(super) fn closing(kind: TokenKind) -> Option<TokenKind> {
    match kind {
        TokenKind::OpenParen => Some(TokenKind::CloseParen),
        TokenKind::OpenBracket => Some(TokenKind::CloseBracket),
        TokenKind::OpenCurly => Some(TokenKind::CloseCurly),
        _ => None,
    }
}

pub(super) fn opening(kind: TokenKind) -> Option<TokenKind> {
    match kind {
        TokenKind::CloseParen => Some(TokenKind::OpenParen),
        TokenKind::CloseBracket => Some(TokenKind::OpenBracket),
        TokenKind::CloseCurly => Some(TokenKind::OpenCurly),
        _ => None,
    }
}

/// Parses a token stream into a list of statements. Every statement that
/// fails to parse contributes one error, and parsing resumes at the next
/// top-level newline, so all diagnostics are collected in a single pass.
pub fn parse(tokens: &[Token]) -> (Vec<Stmt>, Vec<Error>) {
    let mut frame = Frame::new(tokens);
    let mut statements = Vec::new();
    let mut errors = Vec::new();

    while !frame.at_end() {
        if frame.current_kind() == Some(TokenKind::Newline) {
            frame.advance();
            continue;
        }
        match parse_stmt(&mut frame) {
            Ok(stmt) => statements.push(stmt),
            Err(error) => {
                errors.push(error);
                frame.synchronize();
            }
        }
    }

    (statements, errors)
}

/// Parses the statements between a matched `{` `}` pair. Unlike the
/// top-level loop there is no recovery here: the first bad statement
/// aborts the whole block.
pub fn parse_block_body(tokens: &[Token]) -> Result<Vec<Stmt>, Error> {
    let mut frame = Frame::new(tokens);
    let mut body = Vec::new();

    while !frame.at_end() {
        if frame.current_kind() == Some(TokenKind::Newline) {
            frame.advance();
            continue;
        }
        body.push(parse_stmt(&mut frame)?);
    }

    Ok(body)
}
