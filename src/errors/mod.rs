//! Error types and diagnostics for the frontend.
//!
//! This module defines the diagnostic types used throughout the
//! pipeline. It includes:
//!
//! - Diagnostic structures with full source span information
//! - Specific error variants for the lexical, syntax, and semantic phases
//! - Warning variants (shadowing, unused variables) that never block
//! - Caret-underlined snippet rendering via `Display`

pub mod errors;

#[cfg(test)]
mod tests;
