//! Type checking and semantic analysis module.
//!
//! This module performs type checking and semantic analysis on the AST.
//! It annotates the tree in place while:
//!
//! - Verifying type correctness of expressions and statements
//! - Resolving variable and function references through nested scopes
//! - Checking call arity and argument types
//! - Inferring function return types from their `return` statements
//! - Validating `break` placement and the presence of `main`
//!
//! The checker keeps an explicit scope path to handle nested functions and
//! stops at the first error it finds.

pub mod scope;
pub mod type_checker;
