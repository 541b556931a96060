use std::rc::Rc;

use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorKind},
    Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{LiteralKind, Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, Regex);

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

pub struct Lexer {
    patterns: Vec<RegexPattern>,
    tokens: Vec<Token>,
    source: String,
    lines: Vec<Rc<String>>,
    pos: usize,
    line: u32,
    column: u32,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            tokens: vec![],
            // Ordered: longer operators must come before their prefixes.
            patterns: vec![
                RegexPattern { regex: Regex::new("[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: word_handler },
                RegexPattern { regex: Regex::new("[0-9]+(\\.[0-9]+)?").unwrap(), handler: number_handler },
                RegexPattern { regex: Regex::new("\"[^\"\\n]*\"").unwrap(), handler: string_handler },
                RegexPattern { regex: Regex::new("'(\\\\.|[^'\\n])'").unwrap(), handler: char_handler },
                RegexPattern { regex: Regex::new("//[^\\n]*").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new("[ \\t\\r]+").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new("\\n").unwrap(), handler: newline_handler },
                RegexPattern { regex: Regex::new("\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
                RegexPattern { regex: Regex::new("\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
                RegexPattern { regex: Regex::new("\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
                RegexPattern { regex: Regex::new("\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
                RegexPattern { regex: Regex::new("\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
                RegexPattern { regex: Regex::new("\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
                RegexPattern { regex: Regex::new(":=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ColonEqual, ":=") },
                RegexPattern { regex: Regex::new(":").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
                RegexPattern { regex: Regex::new(",").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
                RegexPattern { regex: Regex::new("==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
                RegexPattern { regex: Regex::new("!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
                RegexPattern { regex: Regex::new("!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
                RegexPattern { regex: Regex::new("=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
                RegexPattern { regex: Regex::new("<<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft, "<<") },
                RegexPattern { regex: Regex::new("<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
                RegexPattern { regex: Regex::new("<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
                RegexPattern { regex: Regex::new(">>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftRight, ">>") },
                RegexPattern { regex: Regex::new(">=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
                RegexPattern { regex: Regex::new(">").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
                RegexPattern { regex: Regex::new("\\|\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
                RegexPattern { regex: Regex::new("&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
                RegexPattern { regex: Regex::new("\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BitOr, "|") },
                RegexPattern { regex: Regex::new("&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BitAnd, "&") },
                RegexPattern { regex: Regex::new("\\^").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BitXor, "^") },
                RegexPattern { regex: Regex::new("~").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~") },
                RegexPattern { regex: Regex::new("\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
                RegexPattern { regex: Regex::new("-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
                RegexPattern { regex: Regex::new("/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
                RegexPattern { regex: Regex::new("\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
                RegexPattern { regex: Regex::new("%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
            ],
            lines: source.split('\n').map(|line| Rc::new(line.to_string())).collect(),
            source: source.to_string(),
            pos: 0,
            line: 1,
            column: 0,
        }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn advance_n(&mut self, n: u32) {
        self.pos += n as usize;
        self.column += n;
    }

    pub fn current_line(&self) -> Rc<String> {
        match self.lines.get((self.line - 1) as usize) {
            Some(line) => Rc::clone(line),
            None => Rc::new(String::new()),
        }
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn error_span(&self) -> Span {
        Span {
            line: self.line,
            start: self.column,
            end: self.column + 1,
            source_line: self.current_line(),
        }
    }
}

fn word_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();

    let mut token = match RESERVED_LOOKUP.get(matched.as_str()) {
        Some(kind) => MK_TOKEN!(*kind, matched, lexer),
        None => MK_TOKEN!(TokenKind::Identifier, matched, lexer),
    };
    if token.kind == TokenKind::True || token.kind == TokenKind::False {
        token.literal = LiteralKind::Bool;
    }

    let length = token.value.len() as u32;
    lexer.push(token);
    lexer.advance_n(length);
}

fn number_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();

    let mut token = MK_TOKEN!(TokenKind::Number, matched, lexer);
    token.literal = LiteralKind::Number;
    token.is_float = token.value.contains('.');

    let length = token.value.len() as u32;
    lexer.push(token);
    lexer.advance_n(length);
}

fn string_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();

    // The lexeme keeps its quotes; nothing downstream evaluates the content.
    let mut token = MK_TOKEN!(TokenKind::String, matched, lexer);
    token.literal = LiteralKind::String;

    let length = token.value.len() as u32;
    lexer.push(token);
    lexer.advance_n(length);
}

fn char_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();

    let mut token = MK_TOKEN!(TokenKind::Char, matched, lexer);
    token.literal = LiteralKind::Char;

    let length = token.value.len() as u32;
    lexer.push(token);
    lexer.advance_n(length);
}

fn skip_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().end();
    lexer.advance_n(matched as u32);
}

fn newline_handler(lexer: &mut Lexer, _regex: Regex) {
    lexer.push(MK_TOKEN!(TokenKind::Newline, String::from("\n"), lexer));
    lexer.pos += 1;
    lexer.line += 1;
    lexer.column = 0;
}

/// Tokenizes source text into a flat token list. Statements are terminated
/// by `Newline` tokens; there is no explicit end-of-file marker.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source);
    let patterns = lex.patterns.clone();

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in patterns.iter() {
            let match_here = pattern.regex.find(lex.remainder());

            if let Some(found) = match_here {
                if found.start() == 0 {
                    (pattern.handler)(&mut lex, pattern.regex.clone());
                    matched = true;
                    break;
                }
            }
        }

        if !matched {
            let found = lex.remainder().chars().next().unwrap_or('\0');
            return Err(Error::new(
                ErrorKind::UnrecognisedToken {
                    token: found.to_string(),
                },
                lex.error_span(),
            ));
        }
    }

    Ok(lex.tokens)
}
