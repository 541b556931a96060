//! Parser building the abstract syntax tree from a token stream.
//!
//! Statements are parsed line by line: a bracket-aware cursor slices the
//! token stream at statement boundaries, and expressions are parsed by
//! recursively splitting each slice at its loosest-binding top-level
//! operator. Errors are recovered at statement granularity, so a single
//! pass reports every malformed top-level statement.

pub mod expr;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
