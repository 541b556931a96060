//! Lexical analysis module for the frontend.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a flat list of tokens for parsing. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Newline tokens, which terminate statements in this language
//! - Line, column, and source-line tracking for diagnostics
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;
