//! Lexical scopes and the symbol table.
//!
//! Every function body gets its own scope; the program itself is the root
//! scope. Scopes are stored in a flat arena and the checker walks them with
//! an explicit path stack, so there is no shared mutable state between
//! separate runs.

use std::collections::HashMap;

use log::debug;

use crate::{
    ast::{
        ast::{Ast, DeclId, FunctionId, NodeRef},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    Span,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a name is bound to. Both variants point into the `Ast` arenas and
/// never own the declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Variable(DeclId),
    Function(FunctionId),
}

impl Symbol {
    pub fn node(&self) -> NodeRef {
        match self {
            Symbol::Variable(id) => NodeRef::Decl(*id),
            Symbol::Function(id) => NodeRef::Function(*id),
        }
    }
}

#[derive(Debug, Default)]
pub struct Scope {
    pub symbols: HashMap<String, Symbol>,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    /// The function whose body this scope belongs to. `None` for the root.
    pub function: Option<FunctionId>,
}

impl Scope {
    pub fn new(parent: Option<ScopeId>, function: Option<FunctionId>) -> Self {
        Scope {
            symbols: HashMap::new(),
            parent,
            children: vec![],
            function,
        }
    }

    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.symbols.get(name).copied()
    }
}

/// All scopes created during one checking run, plus the path from the root
/// to the scope currently being checked.
#[derive(Debug)]
pub struct SymbolTable {
    pub scopes: Vec<Scope>,
    pub path: Vec<ScopeId>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Creates a table holding only the root scope, which is also current.
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![Scope::new(None, None)],
            path: vec![ScopeId(0)],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn current(&self) -> ScopeId {
        self.path.last().copied().unwrap_or(ScopeId(0))
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    fn current_scope_mut(&mut self) -> &mut Scope {
        let current = self.current();
        &mut self.scopes[current.index()]
    }

    /// Opens a child of the current scope and makes it current.
    pub fn enter_scope(&mut self, function: Option<FunctionId>) -> ScopeId {
        let parent = self.current();
        let id = ScopeId(self.scopes.len() as u32);

        self.scopes.push(Scope::new(Some(parent), function));
        self.scopes[parent.index()].children.push(id);
        self.path.push(id);

        debug!("enter scope #{} (parent #{})", id.0, parent.0);
        id
    }

    /// Returns to the parent of the current scope. The root is never left.
    pub fn leave_scope(&mut self) {
        if self.path.len() > 1 {
            if let Some(id) = self.path.pop() {
                debug!("leave scope #{}", id.0);
            }
        }
    }

    /// Number of scopes on the path, the root included.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Binds `name` in the current scope.
    ///
    /// Fails with `DuplicateName` if the name is already bound in this very
    /// scope; names from enclosing scopes may be shadowed.
    pub fn declare(&mut self, name: &str, symbol: Symbol, span: &Span) -> Result<(), Error> {
        let scope = self.current_scope_mut();

        if scope.symbols.contains_key(name) {
            return Err(Error::at_node(
                ErrorImpl::DuplicateName {
                    name: String::from(name),
                },
                span.clone(),
                symbol.node(),
            ));
        }

        scope.symbols.insert(String::from(name), symbol);
        Ok(())
    }

    /// The nearest binding of `name`, searching the current scope first and
    /// then each parent up to the root.
    pub fn resolve(&self, name: &str) -> Option<Symbol> {
        let mut scope = Some(self.current());

        while let Some(id) = scope {
            let current = self.scope(id);
            if let Some(symbol) = current.get(name) {
                return Some(symbol);
            }
            scope = current.parent;
        }

        None
    }

    /// The function owning the innermost function scope on the path.
    pub fn current_function(&self) -> Option<FunctionId> {
        self.path
            .iter()
            .rev()
            .find_map(|id| self.scope(*id).function)
    }

    /// Records `ty` as the return type of the current function and hands back
    /// the type it replaced. Last write wins.
    pub fn set_return_type(&self, ast: &mut Ast, ty: Type) -> Option<Type> {
        let function = self.current_function()?;
        let previous = ast.function(function).return_type;
        ast.function_mut(function).return_type = ty;
        Some(previous)
    }
}
