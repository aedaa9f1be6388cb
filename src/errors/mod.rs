//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the front end.
//! It includes:
//!
//! - Error structures with source span and node information
//! - Specific error variants for lexing, parsing and semantic analysis
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
