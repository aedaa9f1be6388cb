/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The node arena, typed node indices and `NodeRef`
/// - expressions: Expression kinds and operators
/// - statements: Statements, declarations and functions
/// - types: The checker's closed `Type` enum
/// - printer: Indented, type-annotated dump of a tree
pub mod ast;
pub mod expressions;
pub mod printer;
pub mod statements;
pub mod types;
