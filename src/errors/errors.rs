use std::fmt::Display;

use thiserror::Error;

use crate::{
    ast::{ast::NodeRef, types::Type},
    Position, Span,
};

/// The single error value produced by every phase of the front end.
///
/// Semantic errors additionally carry the offending node, so a diagnostics
/// collaborator can look it up in the tree.
#[derive(Error, Debug, Clone)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    span: Span,
    node: Option<NodeRef>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, span: Span) -> Self {
        Error {
            internal_error: error_impl,
            span,
            node: None,
        }
    }

    pub fn at_node(error_impl: ErrorImpl, span: Span, node: NodeRef) -> Self {
        Error {
            internal_error: error_impl,
            span,
            node: Some(node),
        }
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_position(&self) -> &Position {
        &self.span.start
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    pub fn get_node(&self) -> Option<NodeRef> {
        self.node
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UndefinedName { .. } => "UndefinedName",
            ErrorImpl::UndefinedFunction { .. } => "UndefinedFunction",
            ErrorImpl::DuplicateName { .. } => "DuplicateName",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::InvalidIndexType { .. } => "InvalidIndexType",
            ErrorImpl::InvalidOperandType { .. } => "InvalidOperandType",
            ErrorImpl::ArityMismatch { .. } => "ArityMismatch",
            ErrorImpl::ArgumentTypeMismatch { .. } => "ArgumentTypeMismatch",
            ErrorImpl::ImmutableTarget { .. } => "ImmutableTarget",
            ErrorImpl::MisplacedControlStatement { .. } => "MisplacedControlStatement",
            ErrorImpl::MissingEntryPoint => "MissingEntryPoint",
            ErrorImpl::NotAVariable { .. } => "NotAVariable",
            ErrorImpl::NotAnArray { .. } => "NotAnArray",
            ErrorImpl::MissingIndex { .. } => "MissingIndex",
            ErrorImpl::IndexOutOfBounds { .. } => "IndexOutOfBounds",
            ErrorImpl::InvalidArraySize { .. } => "InvalidArraySize",
            ErrorImpl::MisplacedStringLiteral => "MisplacedStringLiteral",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Comment is missing its closing `*/`"))
            }
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UndefinedName { name } => {
                ErrorTip::Suggestion(format!("`{}` is not declared in this scope", name))
            }
            ErrorImpl::UndefinedFunction { name } => ErrorTip::Suggestion(format!(
                "Function `{}` is not declared before this call",
                name
            )),
            ErrorImpl::DuplicateName { name } => {
                ErrorTip::Suggestion(format!("`{}` is already declared in this scope", name))
            }
            ErrorImpl::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::InvalidIndexType { received } => ErrorTip::Suggestion(format!(
                "Array indices and sizes must be `int`, received `{}`",
                received
            )),
            ErrorImpl::InvalidOperandType { operator, received } => ErrorTip::Suggestion(
                format!("Operand of `{}` has type `{}`", operator, received),
            ),
            ErrorImpl::ArityMismatch {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` expects {} arguments, received {}",
                function, expected, received
            )),
            ErrorImpl::ArgumentTypeMismatch {
                function,
                argument,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Argument {} of `{}` expects type `{}`, received `{}`",
                argument, function, expected, received
            )),
            ErrorImpl::ImmutableTarget { name } => {
                ErrorTip::Suggestion(format!("`{}` is a constant and cannot be assigned", name))
            }
            ErrorImpl::MisplacedControlStatement { statement } if statement == "skip" => {
                ErrorTip::Suggestion(String::from("`skip` may not be the whole body of `if` or `else`"))
            }
            ErrorImpl::MisplacedControlStatement { statement } => ErrorTip::Suggestion(format!(
                "`{}` may only appear inside a `while` loop",
                statement
            )),
            ErrorImpl::MissingEntryPoint => {
                ErrorTip::Suggestion(String::from("Declare a function named `main`"))
            }
            ErrorImpl::NotAVariable { name } => {
                ErrorTip::Suggestion(format!("`{}` is a function, not a variable", name))
            }
            ErrorImpl::NotAnArray { name } => {
                ErrorTip::Suggestion(format!("`{}` is not an array and cannot be indexed", name))
            }
            ErrorImpl::MissingIndex { name } => {
                ErrorTip::Suggestion(format!("`{}` is an array; assign to one of its elements", name))
            }
            ErrorImpl::IndexOutOfBounds { name, index, size } => ErrorTip::Suggestion(format!(
                "Index {} is outside `{}`, which has {} elements",
                index, name, size
            )),
            ErrorImpl::InvalidArraySize { name, size } => ErrorTip::Suggestion(format!(
                "Array `{}` must have a positive size, found {}",
                name, size
            )),
            ErrorImpl::MisplacedStringLiteral => ErrorTip::Suggestion(String::from(
                "String literals may only be printed with `print`",
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexing
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated comment")]
    UnterminatedComment,

    // Parsing
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },

    // Semantic analysis
    #[error("name {name:?} is not defined")]
    UndefinedName { name: String },
    #[error("function {name:?} is not defined")]
    UndefinedFunction { name: String },
    #[error("name {name:?} already declared in this scope")]
    DuplicateName { name: String },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMismatch { expected: Type, received: Type },
    #[error("invalid index type: expected int, received {received}")]
    InvalidIndexType { received: Type },
    #[error("invalid operand type for {operator}: {received}")]
    InvalidOperandType { operator: String, received: Type },
    #[error("function {function:?} expects {expected} arguments, received {received}")]
    ArityMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("argument {argument} of {function:?} does not match: expected {expected}, received {received}")]
    ArgumentTypeMismatch {
        function: String,
        argument: usize,
        expected: Type,
        received: Type,
    },
    #[error("cannot assign to constant {name:?}")]
    ImmutableTarget { name: String },
    #[error("misplaced {statement}")]
    MisplacedControlStatement { statement: String },
    #[error("no function named main")]
    MissingEntryPoint,
    #[error("{name:?} is a function, not a variable")]
    NotAVariable { name: String },
    #[error("{name:?} is not an array")]
    NotAnArray { name: String },
    #[error("array {name:?} must be indexed")]
    MissingIndex { name: String },
    #[error("index {index} out of bounds for {name:?} of size {size}")]
    IndexOutOfBounds { name: String, index: i64, size: i64 },
    #[error("invalid size {size} for array {name:?}")]
    InvalidArraySize { name: String, size: i64 },
    #[error("string literal used as a value")]
    MisplacedStringLiteral,
}
