//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::ast::{ast::{ExprId, NodeRef}, types::Type};
use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::{render_error, Position, Span};
use std::rc::Rc;

fn span_at(offset: u32) -> Span {
    Span {
        start: Position(offset, Rc::new("test.pl0".to_string())),
        end: Position(offset + 1, Rc::new("test.pl0".to_string())),
    }
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        span_at(10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert!(error.get_node().is_none());
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        span_at(42),
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_span().end.0, 43);
}

#[test]
fn test_error_carries_node() {
    let error = Error::at_node(
        ErrorImpl::UndefinedName {
            name: "a".to_string(),
        },
        span_at(0),
        NodeRef::Expr(ExprId(3)),
    );

    assert_eq!(error.get_node(), Some(NodeRef::Expr(ExprId(3))));
    assert_eq!(
        error.kind(),
        &ErrorImpl::UndefinedName {
            name: "a".to_string()
        }
    );
}

#[test]
fn test_type_mismatch_error() {
    let error = Error::new(
        ErrorImpl::TypeMismatch {
            expected: Type::Int,
            received: Type::Float,
        },
        span_at(0),
    );

    assert_eq!(error.get_error_name(), "TypeMismatch");
    assert_eq!(
        error.to_string(),
        "types do not match: expected int, received float"
    );
    assert_eq!(
        error.get_tip().to_string(),
        "Expected type `int`, received `float`"
    );
}

#[test]
fn test_semantic_error_names() {
    let cases = vec![
        (ErrorImpl::UndefinedFunction { name: "f".to_string() }, "UndefinedFunction"),
        (ErrorImpl::DuplicateName { name: "x".to_string() }, "DuplicateName"),
        (ErrorImpl::InvalidIndexType { received: Type::Float }, "InvalidIndexType"),
        (
            ErrorImpl::ArityMismatch {
                function: "f".to_string(),
                expected: 2,
                received: 1,
            },
            "ArityMismatch",
        ),
        (
            ErrorImpl::ArgumentTypeMismatch {
                function: "f".to_string(),
                argument: 1,
                expected: Type::Int,
                received: Type::Float,
            },
            "ArgumentTypeMismatch",
        ),
        (ErrorImpl::ImmutableTarget { name: "b".to_string() }, "ImmutableTarget"),
        (
            ErrorImpl::MisplacedControlStatement {
                statement: "break".to_string(),
            },
            "MisplacedControlStatement",
        ),
        (ErrorImpl::MissingEntryPoint, "MissingEntryPoint"),
        (ErrorImpl::MissingIndex { name: "v".to_string() }, "MissingIndex"),
    ];

    for (kind, name) in cases {
        assert_eq!(Error::new(kind, span_at(0)).get_error_name(), name);
    }
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        span_at(0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "end".to_string(),
        },
        span_at(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_render_error() {
    let source = "fun main()\n  a: int;\nbegin\n  a := 2.5\nend\n";
    // Offset of `2.5` on line 4.
    let offset = source.find("2.5").unwrap() as u32;
    let error = Error::new(
        ErrorImpl::TypeMismatch {
            expected: Type::Int,
            received: Type::Float,
        },
        span_at(offset),
    );

    let report = render_error(&error, source);
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(
        lines[0],
        "Error: TypeMismatch (Expected type `int`, received `float`)"
    );
    assert_eq!(lines[1], "-> test.pl0");
    assert_eq!(lines[2], "  |");
    assert_eq!(lines[3], "4 | a := 2.5");
    assert_eq!(lines[4], "  | -----^");
}
