use std::fmt::Display;

use crate::Span;

use super::{
    expressions::{Expr, ExprKind},
    statements::{Function, Stmt, StmtKind, VarDecl},
    types::Type,
};

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl $name {
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_id!(
    /// Index of an expression inside `Ast::exprs`.
    ExprId
);
arena_id!(
    /// Index of a statement inside `Ast::stmts`.
    StmtId
);
arena_id!(
    /// Index of a variable, array, constant or parameter declaration.
    DeclId
);
arena_id!(
    /// Index of a function (top level or nested).
    FunctionId
);

/// A reference to any node of the tree.
///
/// Errors carry one of these so that a diagnostics collaborator can point at
/// the offending node without the checker knowing anything about rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    Program,
    Function(FunctionId),
    Decl(DeclId),
    Stmt(StmtId),
    Expr(ExprId),
}

impl Display for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeRef::Program => write!(f, "program"),
            NodeRef::Function(id) => write!(f, "function #{}", id.0),
            NodeRef::Decl(id) => write!(f, "declaration #{}", id.0),
            NodeRef::Stmt(id) => write!(f, "statement #{}", id.0),
            NodeRef::Expr(id) => write!(f, "expression #{}", id.0),
        }
    }
}

/// The abstract syntax tree of one program.
///
/// Nodes live in flat arenas and refer to their children by index; nothing
/// points back at a parent. The program itself is the ordered list of
/// top-level functions in `program`.
#[derive(Debug, Clone, Default)]
pub struct Ast {
    pub exprs: Vec<Expr>,
    pub stmts: Vec<Stmt>,
    pub decls: Vec<VarDecl>,
    pub functions: Vec<Function>,
    pub program: Vec<FunctionId>,
}

impl Ast {
    pub fn new() -> Self {
        Ast::default()
    }

    pub fn push_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        let ty = match kind {
            ExprKind::Integer(_) => Type::Int,
            ExprKind::Float(_) => Type::Float,
            _ => Type::Unknown,
        };
        self.exprs.push(Expr { kind, ty, span });
        ExprId((self.exprs.len() - 1) as u32)
    }

    pub fn push_stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        self.stmts.push(Stmt { kind, span });
        StmtId((self.stmts.len() - 1) as u32)
    }

    pub fn push_decl(&mut self, decl: VarDecl) -> DeclId {
        self.decls.push(decl);
        DeclId((self.decls.len() - 1) as u32)
    }

    pub fn push_function(&mut self, function: Function) -> FunctionId {
        self.functions.push(function);
        FunctionId((self.functions.len() - 1) as u32)
    }

    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    pub fn expr_mut(&mut self, id: ExprId) -> &mut Expr {
        &mut self.exprs[id.index()]
    }

    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    pub fn decl(&self, id: DeclId) -> &VarDecl {
        &self.decls[id.index()]
    }

    pub fn decl_mut(&mut self, id: DeclId) -> &mut VarDecl {
        &mut self.decls[id.index()]
    }

    pub fn function(&self, id: FunctionId) -> &Function {
        &self.functions[id.index()]
    }

    pub fn function_mut(&mut self, id: FunctionId) -> &mut Function {
        &mut self.functions[id.index()]
    }

    /// Looks up a top-level function by name.
    pub fn find_function(&self, name: &str) -> Option<FunctionId> {
        self.program
            .iter()
            .copied()
            .find(|id| self.function(*id).name == name)
    }

    /// The span of any node, used when reporting errors.
    pub fn span_of(&self, node: NodeRef) -> Option<&Span> {
        match node {
            NodeRef::Program => None,
            NodeRef::Function(id) => Some(&self.function(id).span),
            NodeRef::Decl(id) => Some(&self.decl(id).span),
            NodeRef::Stmt(id) => Some(&self.stmt(id).span),
            NodeRef::Expr(id) => Some(&self.expr(id).span),
        }
    }
}
