//! AST (Abstract Syntax Tree) module
//! Contains all definitions related to the AST structure
//!
//! Submodules:
//! - expressions: the expression tree built by the parser
//! - statements: top-level and block statements
//! - types: the type model shared by the parser and the scanner

pub mod expressions;
pub mod statements;
pub mod types;
