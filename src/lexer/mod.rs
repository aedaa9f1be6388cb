//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using an ordered table of regex patterns
//! - Recognition of keywords, identifiers, numbers, strings and operators
//! - Token spans (byte offsets) for error reporting
//! - `/* ... */` comments and whitespace

pub mod lexer;
pub mod tokens;
