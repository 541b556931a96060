//! Semantic analysis over the parsed syntax tree.
//!
//! The scanner walks the statement list twice: a first pass registers
//! every top-level function signature and checks the remaining top-level
//! statements in order, a second pass checks the function bodies. That
//! way functions can call each other and use globals regardless of
//! declaration order.
//!
//! Scanning stops at the first error; warnings (shadowing, unused
//! variables) accumulate and never block.

pub mod scanner;
