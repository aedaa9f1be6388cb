use std::collections::HashMap;

use log::{debug, warn};

use crate::{
    ast::{
        ast::{Ast, DeclId, ExprId, FunctionId, NodeRef, StmtId},
        expressions::{ExprKind, UnaryOp},
        statements::{DeclKind, Function, Local, StmtKind},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::scope::{Symbol, SymbolTable};

/// Switches for the stricter variants of rules that are lenient by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Require `while`/`if` conditions to be `bool` instead of merely typed.
    pub strict_conditions: bool,
    /// Reject a function whose `return` statements disagree on their type.
    pub strict_returns: bool,
}

impl CheckOptions {
    pub fn strict() -> Self {
        CheckOptions {
            strict_conditions: true,
            strict_returns: true,
        }
    }
}

/// How control leaves a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Falls through to the next statement.
    Normal,
    Returns(Type),
    Breaks,
}

impl Flow {
    pub fn is_terminal(&self) -> bool {
        *self != Flow::Normal
    }
}

#[derive(Debug)]
pub struct TypeChecker {
    pub ast: Ast,
    pub symbols: SymbolTable,
    pub options: CheckOptions,
    /// Number of `while` loops enclosing the current statement, reset for
    /// every function.
    loop_depth: usize,
    /// Values of integer constants known at compile time.
    constants: HashMap<DeclId, i64>,
    /// Sizes of arrays declared with a compile-time constant size.
    array_sizes: HashMap<DeclId, i64>,
}

impl TypeChecker {
    pub fn new(ast: Ast, options: CheckOptions) -> Self {
        TypeChecker {
            ast,
            symbols: SymbolTable::new(),
            options,
            loop_depth: 0,
            constants: HashMap::new(),
            array_sizes: HashMap::new(),
        }
    }

    /// An error pointing at `node`.
    pub fn error(&self, error_impl: ErrorImpl, node: NodeRef) -> Error {
        let span = self.ast.span_of(node).cloned().unwrap_or_else(Span::null);
        Error::at_node(error_impl, span, node)
    }

    /// Resolves `name` to a variable declaration, as needed by identifiers,
    /// array accesses and assignment targets.
    pub fn resolve_variable(&self, name: &str, expr: ExprId) -> Result<DeclId, Error> {
        match self.symbols.resolve(name) {
            Some(Symbol::Variable(decl)) => Ok(decl),
            Some(Symbol::Function(_)) => Err(self.error(
                ErrorImpl::NotAVariable {
                    name: String::from(name),
                },
                NodeRef::Expr(expr),
            )),
            None => Err(self.error(
                ErrorImpl::UndefinedName {
                    name: String::from(name),
                },
                NodeRef::Expr(expr),
            )),
        }
    }

    /// Evaluates `expr` if it is an integer known at compile time: a literal,
    /// a negated or signed constant, or the name of an integer constant.
    pub fn const_int(&self, expr: ExprId) -> Option<i64> {
        match &self.ast.expr(expr).kind {
            ExprKind::Integer(value) => Some(*value),
            ExprKind::Unary { op, operand } => {
                let value = self.const_int(*operand)?;
                match op {
                    UnaryOp::Plus => Some(value),
                    UnaryOp::Minus => value.checked_neg(),
                }
            }
            ExprKind::Identifier(name) => match self.symbols.resolve(name) {
                Some(Symbol::Variable(decl)) => self.constants.get(&decl).copied(),
                _ => None,
            },
            _ => None,
        }
    }

    fn set_type(&mut self, expr: ExprId, ty: Type) -> Type {
        self.ast.expr_mut(expr).ty = ty;
        ty
    }
}

pub fn type_check_expr(type_checker: &mut TypeChecker, id: ExprId) -> Result<Type, Error> {
    let kind = type_checker.ast.expr(id).kind.clone();

    let ty = match kind {
        ExprKind::Integer(_) => Type::Int,
        ExprKind::Float(_) => Type::Float,
        ExprKind::Str(_) => {
            return Err(type_checker.error(ErrorImpl::MisplacedStringLiteral, NodeRef::Expr(id)))
        }
        ExprKind::Identifier(name) => {
            let decl = type_checker.resolve_variable(&name, id)?;
            type_checker.ast.decl(decl).ty
        }
        ExprKind::ArrayAccess { name, index } => {
            let decl = type_checker.resolve_variable(&name, id)?;
            if !type_checker.ast.decl(decl).is_array() {
                return Err(type_checker.error(ErrorImpl::NotAnArray { name }, NodeRef::Expr(id)));
            }

            let index_type = type_check_expr(type_checker, index)?;
            if index_type != Type::Int {
                return Err(type_checker.error(
                    ErrorImpl::InvalidIndexType {
                        received: index_type,
                    },
                    NodeRef::Expr(index),
                ));
            }

            check_static_bounds(type_checker, decl, &name, index)?;
            type_checker.ast.decl(decl).ty
        }
        ExprKind::Binary { op, left, right } => {
            let left_type = type_check_expr(type_checker, left)?;
            let right_type = type_check_expr(type_checker, right)?;
            let ty = check_same_types(type_checker, id, left_type, right_type)?;
            check_operator_accepts(type_checker, id, &op.to_string(), ty, Type::is_numeric)?
        }
        ExprKind::Relation { op, left, right } => {
            let left_type = type_check_expr(type_checker, left)?;
            let right_type = type_check_expr(type_checker, right)?;
            let ty = check_same_types(type_checker, id, left_type, right_type)?;

            if op.is_logical() {
                check_operator_accepts(type_checker, id, &op.to_string(), ty, is_bool)?;
            } else if op.is_ordering() {
                check_operator_accepts(type_checker, id, &op.to_string(), ty, Type::is_numeric)?;
            }
            Type::Bool
        }
        ExprKind::Not(inner) => {
            let ty = check_operand(type_checker, inner, "not")?;
            check_operator_accepts(type_checker, inner, "not", ty, is_bool)?;
            Type::Bool
        }
        ExprKind::Unary { op, operand } => {
            let ty = check_operand(type_checker, operand, &op.to_string())?;
            check_operator_accepts(type_checker, operand, &op.to_string(), ty, Type::is_numeric)?
        }
        ExprKind::TypeCast { target, operand } => {
            check_operand(type_checker, operand, &target.to_string())?;
            target
        }
        ExprKind::Call { callee, arguments } => {
            type_check_call(type_checker, id, &callee, &arguments)?
        }
    };

    Ok(type_checker.set_type(id, ty))
}

/// Operands of arithmetic and relations must agree exactly; `int` is never
/// promoted to `float`.
fn check_same_types(
    type_checker: &TypeChecker,
    id: ExprId,
    left: Type,
    right: Type,
) -> Result<Type, Error> {
    if left != right || !left.is_known() {
        return Err(type_checker.error(
            ErrorImpl::TypeMismatch {
                expected: left,
                received: right,
            },
            NodeRef::Expr(id),
        ));
    }

    Ok(left)
}

/// Types `operand`, which must come out as something other than `Unknown`.
fn check_operand(
    type_checker: &mut TypeChecker,
    operand: ExprId,
    operator: &str,
) -> Result<Type, Error> {
    let ty = type_check_expr(type_checker, operand)?;
    if !ty.is_known() {
        return Err(type_checker.error(
            ErrorImpl::InvalidOperandType {
                operator: String::from(operator),
                received: ty,
            },
            NodeRef::Expr(operand),
        ));
    }

    Ok(ty)
}

fn is_bool(ty: &Type) -> bool {
    *ty == Type::Bool
}

/// Fails with `InvalidOperandType` at `expr` unless `accepts(ty)` holds.
fn check_operator_accepts(
    type_checker: &TypeChecker,
    expr: ExprId,
    operator: &str,
    ty: Type,
    accepts: fn(&Type) -> bool,
) -> Result<Type, Error> {
    if !accepts(&ty) {
        return Err(type_checker.error(
            ErrorImpl::InvalidOperandType {
                operator: String::from(operator),
                received: ty,
            },
            NodeRef::Expr(expr),
        ));
    }

    Ok(ty)
}

fn check_static_bounds(
    type_checker: &TypeChecker,
    decl: DeclId,
    name: &str,
    index: ExprId,
) -> Result<(), Error> {
    let Some(size) = type_checker.array_sizes.get(&decl).copied() else {
        return Ok(());
    };
    let Some(value) = type_checker.const_int(index) else {
        return Ok(());
    };

    if value < 0 || value >= size {
        return Err(type_checker.error(
            ErrorImpl::IndexOutOfBounds {
                name: String::from(name),
                index: value,
                size,
            },
            NodeRef::Expr(index),
        ));
    }

    Ok(())
}

fn type_check_call(
    type_checker: &mut TypeChecker,
    id: ExprId,
    callee: &str,
    arguments: &[ExprId],
) -> Result<Type, Error> {
    let function = match type_checker.symbols.resolve(callee) {
        Some(Symbol::Function(function)) => function,
        _ => {
            return Err(type_checker.error(
                ErrorImpl::UndefinedFunction {
                    name: String::from(callee),
                },
                NodeRef::Expr(id),
            ))
        }
    };

    let params = type_checker.ast.function(function).params.clone();
    if params.len() != arguments.len() {
        return Err(type_checker.error(
            ErrorImpl::ArityMismatch {
                function: String::from(callee),
                expected: params.len(),
                received: arguments.len(),
            },
            NodeRef::Expr(id),
        ));
    }

    for (position, (argument, param)) in arguments.iter().zip(params.iter()).enumerate() {
        let received = type_check_expr(type_checker, *argument)?;
        let expected = type_checker.ast.decl(*param).ty;

        if received != expected {
            return Err(type_checker.error(
                ErrorImpl::ArgumentTypeMismatch {
                    function: String::from(callee),
                    argument: position + 1,
                    expected,
                    received,
                },
                NodeRef::Expr(*argument),
            ));
        }
    }

    // Whatever the callee holds right now; `Unknown` until one of its
    // `return` statements has been checked.
    Ok(type_checker.ast.function(function).return_type)
}

/// Fails with `ImmutableTarget` when `target` names a constant, and with
/// `MissingIndex` when it names a whole array.
fn check_assignable(type_checker: &TypeChecker, target: ExprId) -> Result<(), Error> {
    let (name, indexed) = match &type_checker.ast.expr(target).kind {
        ExprKind::Identifier(name) => (name.clone(), false),
        ExprKind::ArrayAccess { name, .. } => (name.clone(), true),
        _ => return Ok(()),
    };

    let decl = type_checker.resolve_variable(&name, target)?;
    if !type_checker.ast.decl(decl).is_mutable() {
        return Err(type_checker.error(ErrorImpl::ImmutableTarget { name }, NodeRef::Expr(target)));
    }
    if !indexed && type_checker.ast.decl(decl).is_array() {
        return Err(type_checker.error(ErrorImpl::MissingIndex { name }, NodeRef::Expr(target)));
    }

    Ok(())
}

/// The body of an `if` or `else`, which may not be a bare `skip`.
fn type_check_branch(type_checker: &mut TypeChecker, body: StmtId) -> Result<Flow, Error> {
    if type_checker.ast.stmt(body).kind == StmtKind::Skip {
        return Err(type_checker.error(
            ErrorImpl::MisplacedControlStatement {
                statement: String::from("skip"),
            },
            NodeRef::Stmt(body),
        ));
    }

    type_check_stmt(type_checker, body)
}

fn check_condition(
    type_checker: &mut TypeChecker,
    condition: ExprId,
    statement: &str,
) -> Result<(), Error> {
    let ty = check_operand(type_checker, condition, statement)?;

    if type_checker.options.strict_conditions && ty != Type::Bool {
        return Err(type_checker.error(
            ErrorImpl::TypeMismatch {
                expected: Type::Bool,
                received: ty,
            },
            NodeRef::Expr(condition),
        ));
    }

    Ok(())
}

fn type_check_return(
    type_checker: &mut TypeChecker,
    id: StmtId,
    value: ExprId,
) -> Result<Flow, Error> {
    let ty = type_check_expr(type_checker, value)?;

    // An `Unknown` result (a call to a function with no return type yet)
    // says nothing about this function, so it does not overwrite anything.
    if !ty.is_known() {
        return Ok(Flow::Returns(ty));
    }

    if let Some(function) = type_checker.symbols.current_function() {
        let current = type_checker.ast.function(function).return_type;

        if current.is_known() && current != ty {
            if type_checker.options.strict_returns {
                return Err(type_checker.error(
                    ErrorImpl::TypeMismatch {
                        expected: current,
                        received: ty,
                    },
                    NodeRef::Stmt(id),
                ));
            }

            warn!(
                "function `{}` returns both {} and {}, keeping {}",
                type_checker.ast.function(function).name,
                current,
                ty,
                ty
            );
        }
    }

    type_checker.symbols.set_return_type(&mut type_checker.ast, ty);
    Ok(Flow::Returns(ty))
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, id: StmtId) -> Result<Flow, Error> {
    let kind = type_checker.ast.stmt(id).kind.clone();

    match kind {
        StmtKind::Assign { target, value } => {
            let target_type = type_check_expr(type_checker, target)?;
            check_assignable(type_checker, target)?;
            let value_type = type_check_expr(type_checker, value)?;

            if target_type != value_type {
                return Err(type_checker.error(
                    ErrorImpl::TypeMismatch {
                        expected: target_type,
                        received: value_type,
                    },
                    NodeRef::Stmt(id),
                ));
            }

            Ok(Flow::Normal)
        }
        StmtKind::Print(argument) => {
            if let ExprKind::Str(_) = type_checker.ast.expr(argument).kind {
                type_checker.set_type(argument, Type::StringLit);
            } else {
                check_operand(type_checker, argument, "print")?;
            }

            Ok(Flow::Normal)
        }
        StmtKind::Write(argument) => {
            check_operand(type_checker, argument, "write")?;
            Ok(Flow::Normal)
        }
        StmtKind::Read(location) => {
            check_operand(type_checker, location, "read")?;
            check_assignable(type_checker, location)?;
            Ok(Flow::Normal)
        }
        StmtKind::While { condition, body } => {
            check_condition(type_checker, condition, "while")?;

            type_checker.loop_depth += 1;
            let result = type_check_stmt(type_checker, body);
            type_checker.loop_depth -= 1;
            result?;

            // The body may run zero times, and a `break` ends only the loop.
            Ok(Flow::Normal)
        }
        StmtKind::IfThen { condition, body } => {
            check_condition(type_checker, condition, "if")?;
            type_check_branch(type_checker, body)?;
            Ok(Flow::Normal)
        }
        StmtKind::IfThenElse {
            condition,
            then_body,
            else_body,
        } => {
            check_condition(type_checker, condition, "if")?;
            let then_flow = type_check_branch(type_checker, then_body)?;
            let else_flow = type_check_branch(type_checker, else_body)?;

            if then_flow.is_terminal() && else_flow.is_terminal() {
                Ok(then_flow)
            } else {
                Ok(Flow::Normal)
            }
        }
        StmtKind::Return(value) => type_check_return(type_checker, id, value),
        StmtKind::Call(call) => {
            // The result may be discarded, so a procedure is fine here.
            type_check_expr(type_checker, call)?;
            Ok(Flow::Normal)
        }
        StmtKind::Break => {
            if type_checker.loop_depth == 0 {
                return Err(type_checker.error(
                    ErrorImpl::MisplacedControlStatement {
                        statement: String::from("break"),
                    },
                    NodeRef::Stmt(id),
                ));
            }

            Ok(Flow::Breaks)
        }
        StmtKind::Skip => Ok(Flow::Normal),
        StmtKind::Block(statements) => type_check_block(type_checker, &statements),
    }
}

/// Checks `statements` in order. The resulting flow is the first one that
/// leaves the block; everything after it is still checked.
pub fn type_check_block(
    type_checker: &mut TypeChecker,
    statements: &[StmtId],
) -> Result<Flow, Error> {
    let mut flow = Flow::Normal;

    for stmt in statements {
        if flow.is_terminal() {
            warn!(
                "unreachable {} statement at {}",
                type_checker.ast.stmt(*stmt).kind.name(),
                type_checker.ast.stmt(*stmt).span.start.0
            );
        }

        let result = type_check_stmt(type_checker, *stmt)?;
        if !flow.is_terminal() {
            flow = result;
        }
    }

    Ok(flow)
}

/// Checks a parameter or local declaration, then binds its name.
pub fn type_check_decl(type_checker: &mut TypeChecker, id: DeclId) -> Result<(), Error> {
    let decl = type_checker.ast.decl(id).clone();

    match decl.kind {
        DeclKind::Scalar => {}
        DeclKind::Array { size } => {
            let size_type = type_check_expr(type_checker, size)?;
            if size_type != Type::Int {
                return Err(type_checker.error(
                    ErrorImpl::InvalidIndexType {
                        received: size_type,
                    },
                    NodeRef::Expr(size),
                ));
            }

            if let Some(length) = type_checker.const_int(size) {
                if length <= 0 {
                    return Err(type_checker.error(
                        ErrorImpl::InvalidArraySize {
                            name: decl.name,
                            size: length,
                        },
                        NodeRef::Decl(id),
                    ));
                }
                type_checker.array_sizes.insert(id, length);
            }
        }
        DeclKind::Constant { value } => {
            let ty = check_operand(type_checker, value, "const")?;
            type_checker.ast.decl_mut(id).ty = ty;

            if ty == Type::Int {
                if let Some(constant) = type_checker.const_int(value) {
                    type_checker.constants.insert(id, constant);
                }
            }
        }
    }

    type_checker
        .symbols
        .declare(&decl.name, Symbol::Variable(id), &decl.span)
}

/// Binds the function's name in the enclosing scope, then checks it inside a
/// fresh scope of its own.
pub fn type_check_function(type_checker: &mut TypeChecker, id: FunctionId) -> Result<(), Error> {
    let function = type_checker.ast.function(id).clone();
    debug!("type_check_function({})", function.name);

    type_checker
        .symbols
        .declare(&function.name, Symbol::Function(id), &function.span)?;

    type_checker.symbols.enter_scope(Some(id));
    let loop_depth = std::mem::take(&mut type_checker.loop_depth);

    let result = type_check_function_body(type_checker, &function);

    type_checker.loop_depth = loop_depth;
    type_checker.symbols.leave_scope();

    result?;
    debug!(
        "function {} returns {}",
        function.name,
        type_checker.ast.function(id).return_type
    );
    Ok(())
}

fn type_check_function_body(type_checker: &mut TypeChecker, function: &Function) -> Result<(), Error> {
    for param in &function.params {
        type_check_decl(type_checker, *param)?;
    }

    for local in &function.locals {
        match local {
            Local::Var(decl) => type_check_decl(type_checker, *decl)?,
            Local::Function(nested) => type_check_function(type_checker, *nested)?,
        }
    }

    type_check_block(type_checker, &function.body)?;
    Ok(())
}

/// Checks a whole program.
///
/// Functions are checked in source order, so a function can call itself and
/// anything declared before it, but not a function declared later. A
/// top-level `main` is required.
pub fn type_check(ast: Ast, options: CheckOptions) -> Result<Ast, Error> {
    let mut type_checker = TypeChecker::new(ast, options);

    let program = type_checker.ast.program.clone();
    for function in program {
        type_check_function(&mut type_checker, function)?;
    }

    let root = type_checker.symbols.root();
    if !matches!(
        type_checker.symbols.scope(root).get("main"),
        Some(Symbol::Function(_))
    ) {
        let span = match type_checker.ast.program.last() {
            Some(last) => {
                let end = type_checker.ast.function(*last).span.end.clone();
                Span {
                    start: end.clone(),
                    end,
                }
            }
            None => Span::null(),
        };
        return Err(Error::at_node(ErrorImpl::MissingEntryPoint, span, NodeRef::Program));
    }

    debug!(
        "checked {} functions in {} scopes",
        type_checker.ast.functions.len(),
        type_checker.symbols.scopes.len()
    );
    Ok(type_checker.ast)
}
