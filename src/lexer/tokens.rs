use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display, rc::Rc};

use crate::ast::types::BaseType;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("func", TokenKind::Func);
        map.insert("return", TokenKind::Return);
        map.insert("in", TokenKind::In);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map
    };
    pub static ref TYPEWORD_LOOKUP: HashMap<&'static str, BaseType> = {
        let mut map = HashMap::new();
        map.insert("int", BaseType::Int);
        map.insert("float", BaseType::Float);
        map.insert("bool", BaseType::Bool);
        map.insert("string", BaseType::String);
        map.insert("char", BaseType::Char);
        map.insert("i8", BaseType::I8);
        map.insert("i16", BaseType::I16);
        map.insert("i32", BaseType::I32);
        map.insert("i64", BaseType::I64);
        map.insert("u8", BaseType::U8);
        map.insert("u16", BaseType::U16);
        map.insert("u32", BaseType::U32);
        map.insert("u64", BaseType::U64);
        map.insert("f32", BaseType::F32);
        map.insert("f64", BaseType::F64);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Newline,

    Number,
    String,
    Char,
    Identifier,
    True,
    False,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Comma,
    Colon,
    ColonEqual, // :=
    Assignment, // =

    Equals,    // ==
    Not,       // !
    NotEquals, // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    BitOr,
    BitXor,
    BitAnd,
    ShiftLeft,
    ShiftRight,
    Tilde,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Func,
    Return,
    In,
}

impl TokenKind {
    /// True for every token that can act as a binary or unary operator.
    /// Used by the expression parser to reject split points that sit
    /// directly after another operator (a leading unary sign).
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Or
                | TokenKind::And
                | TokenKind::Equals
                | TokenKind::NotEquals
                | TokenKind::Less
                | TokenKind::LessEquals
                | TokenKind::Greater
                | TokenKind::GreaterEquals
                | TokenKind::In
                | TokenKind::BitOr
                | TokenKind::BitXor
                | TokenKind::BitAnd
                | TokenKind::ShiftLeft
                | TokenKind::ShiftRight
                | TokenKind::Tilde
                | TokenKind::Plus
                | TokenKind::Dash
                | TokenKind::Slash
                | TokenKind::Star
                | TokenKind::Percent
                | TokenKind::Not
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            TokenKind::Newline => "newline",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Char => "char",
            TokenKind::Identifier => "identifier",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::ColonEqual => ":=",
            TokenKind::Assignment => "=",
            TokenKind::Equals => "==",
            TokenKind::Not => "!",
            TokenKind::NotEquals => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::Or => "||",
            TokenKind::And => "&&",
            TokenKind::BitOr => "|",
            TokenKind::BitXor => "^",
            TokenKind::BitAnd => "&",
            TokenKind::ShiftLeft => "<<",
            TokenKind::ShiftRight => ">>",
            TokenKind::Tilde => "~",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Percent => "%",
            TokenKind::Func => "func",
            TokenKind::Return => "return",
            TokenKind::In => "in",
        };
        write!(f, "{}", text)
    }
}

/// Coarse literal class assigned by the lexer, refined into a full type
/// by the scanner.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LiteralKind {
    None,
    Number,
    String,
    Bool,
    Char,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: u32,
    pub column: u32,
    pub source_line: Rc<String>,
    pub literal: LiteralKind,
    pub is_float: bool,
}

impl Token {
    pub fn end_column(&self) -> u32 {
        self.column + self.value.chars().count() as u32
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:?})", self.kind, self.value)
    }
}
