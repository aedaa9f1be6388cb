use std::fmt::Display;

use crate::Span;

use super::{ast::ExprId, types::Type};

/// Arithmetic operators. Both operands must share a type; there is no
/// implicit promotion from `int` to `float`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Comparisons and logical connectives. Always produce `bool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationOp {
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Equals,
    NotEquals,
    And,
    Or,
}

impl RelationOp {
    /// `and` and `or`, which combine two `bool`s.
    pub fn is_logical(&self) -> bool {
        matches!(self, RelationOp::And | RelationOp::Or)
    }

    /// `<`, `<=`, `>` and `>=`, which only order numbers.
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            RelationOp::Less | RelationOp::LessEquals | RelationOp::Greater | RelationOp::GreaterEquals
        )
    }
}

/// Sign operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        };
        write!(f, "{}", symbol)
    }
}

impl Display for RelationOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            RelationOp::Less => "<",
            RelationOp::LessEquals => "<=",
            RelationOp::Greater => ">",
            RelationOp::GreaterEquals => ">=",
            RelationOp::Equals => "==",
            RelationOp::NotEquals => "!=",
            RelationOp::And => "and",
            RelationOp::Or => "or",
        };
        write!(f, "{}", symbol)
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOp::Plus => write!(f, "+"),
            UnaryOp::Minus => write!(f, "-"),
        }
    }
}

/// Expression kinds.
///
/// Children are arena indices, so the enum is cheap to clone and the checker
/// can match on a copy while it mutates the arena.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Integer(i64),
    Float(f64),
    /// Only legal as the argument of `print`.
    Str(String),
    Identifier(String),
    ArrayAccess {
        name: String,
        index: ExprId,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Relation {
        op: RelationOp,
        left: ExprId,
        right: ExprId,
    },
    Not(ExprId),
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    /// `int(e)` / `float(e)`: an unconditional reinterpretation.
    TypeCast {
        target: Type,
        operand: ExprId,
    },
    Call {
        callee: String,
        arguments: Vec<ExprId>,
    },
}

impl ExprKind {
    /// Whether the expression denotes a storage location (assignable / readable).
    pub fn is_location(&self) -> bool {
        matches!(self, ExprKind::Identifier(_) | ExprKind::ArrayAccess { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    /// Fixed for literals, written by the checker for everything else.
    pub ty: Type,
    pub span: Span,
}
