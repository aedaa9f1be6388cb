use crate::Span;

use super::{
    ast::{DeclId, ExprId, FunctionId, StmtId},
    types::Type,
};

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `target := value`, where `target` is an identifier or array access.
    Assign {
        target: ExprId,
        value: ExprId,
    },
    While {
        condition: ExprId,
        body: StmtId,
    },
    IfThen {
        condition: ExprId,
        body: StmtId,
    },
    IfThenElse {
        condition: ExprId,
        then_body: StmtId,
        else_body: StmtId,
    },
    /// Argument is either a string literal or an expression.
    Print(ExprId),
    Write(ExprId),
    /// Argument is a location.
    Read(ExprId),
    Return(ExprId),
    /// A call whose result is discarded.
    Call(ExprId),
    Break,
    Skip,
    /// `begin ... end`
    Block(Vec<StmtId>),
}

impl StmtKind {
    pub fn name(&self) -> &'static str {
        match self {
            StmtKind::Assign { .. } => "assignment",
            StmtKind::While { .. } => "while",
            StmtKind::IfThen { .. } | StmtKind::IfThenElse { .. } => "if",
            StmtKind::Print(_) => "print",
            StmtKind::Write(_) => "write",
            StmtKind::Read(_) => "read",
            StmtKind::Return(_) => "return",
            StmtKind::Call(_) => "call",
            StmtKind::Break => "break",
            StmtKind::Skip => "skip",
            StmtKind::Block(_) => "block",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

/// Shape of a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclKind {
    /// `name: int`
    Scalar,
    /// `name: float[size]`
    Array { size: ExprId },
    /// `const name = value`; may never be assigned to.
    Constant { value: ExprId },
}

/// A variable, array, constant or parameter declaration.
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub name: String,
    pub kind: DeclKind,
    /// Declared (element) type. For constants this starts as `Unknown` and is
    /// taken from the initializer during checking.
    pub ty: Type,
    pub span: Span,
}

impl VarDecl {
    pub fn is_array(&self) -> bool {
        matches!(self.kind, DeclKind::Array { .. })
    }

    pub fn is_mutable(&self) -> bool {
        !matches!(self.kind, DeclKind::Constant { .. })
    }
}

/// An entry of a function's declaration section, kept in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Local {
    Var(DeclId),
    Function(FunctionId),
}

#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub params: Vec<DeclId>,
    pub locals: Vec<Local>,
    pub body: Vec<StmtId>,
    /// Starts `Unknown`; set as `return` statements are checked.
    pub return_type: Type,
    pub span: Span,
}

impl Function {
    pub fn new(name: String, span: Span) -> Self {
        Function {
            name,
            params: vec![],
            locals: vec![],
            body: vec![],
            return_type: Type::Unknown,
            span,
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}
