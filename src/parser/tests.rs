//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Function definitions, parameters and nested functions
//! - Declarations (scalars, arrays, constants)
//! - Expressions and operator precedence
//! - Control flow statements
//! - Syntax errors

use std::rc::Rc;

use super::parser::parse;
use crate::{
    ast::{
        ast::Ast,
        expressions::{BinaryOp, ExprKind, RelationOp, UnaryOp},
        statements::{DeclKind, Local, StmtKind},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
};

fn parse_source(source: &str) -> Result<Ast, Error> {
    let tokens = tokenize(source, Some("test.pl0".to_string()))?;
    parse(tokens, Rc::new("test.pl0".to_string()))
}

fn parse_ok(source: &str) -> Ast {
    parse_source(source).unwrap()
}

/// Wraps `body` in `fun main() begin ... end`.
fn parse_main_body(body: &str) -> Ast {
    parse_ok(&format!("fun main()\nx: int;\nbegin\n{}\nend", body))
}

fn first_stmt(ast: &Ast) -> &StmtKind {
    let main = ast.function(ast.program[0]);
    &ast.stmt(main.body[0]).kind
}

#[test]
fn test_parse_empty_function() {
    let ast = parse_ok("fun main() begin end");

    assert_eq!(ast.program.len(), 1);
    let main = ast.function(ast.program[0]);
    assert_eq!(main.name, "main");
    assert!(main.params.is_empty());
    assert!(main.body.is_empty());
    assert_eq!(main.return_type, Type::Unknown);
}

#[test]
fn test_parse_multiple_functions() {
    let ast = parse_ok("fun f() begin skip end\nfun main() begin skip end");

    assert_eq!(ast.program.len(), 2);
    assert_eq!(ast.find_function("f"), Some(ast.program[0]));
    assert_eq!(ast.find_function("main"), Some(ast.program[1]));
    assert_eq!(ast.find_function("g"), None);
}

#[test]
fn test_parse_parameters() {
    let ast = parse_ok("fun f(a: int, b: float, c: int[10]) begin skip end");
    let f = ast.function(ast.program[0]);

    assert_eq!(f.arity(), 3);
    let a = ast.decl(f.params[0]);
    assert_eq!(a.name, "a");
    assert_eq!(a.ty, Type::Int);
    assert_eq!(a.kind, DeclKind::Scalar);

    assert_eq!(ast.decl(f.params[1]).ty, Type::Float);

    let c = ast.decl(f.params[2]);
    assert!(c.is_array());
    assert_eq!(c.ty, Type::Int);
}

#[test]
fn test_parse_locals() {
    let source = "fun main()
        x: int;
        v: float[3];
        const n = 10;
    begin
        skip
    end";
    let ast = parse_ok(source);
    let main = ast.function(ast.program[0]);

    assert_eq!(main.locals.len(), 3);

    let names: Vec<&str> = main
        .locals
        .iter()
        .map(|local| match local {
            Local::Var(id) => ast.decl(*id).name.as_str(),
            Local::Function(id) => ast.function(*id).name.as_str(),
        })
        .collect();
    assert_eq!(names, vec!["x", "v", "n"]);

    match main.locals[2] {
        Local::Var(id) => {
            let n = ast.decl(id);
            assert!(!n.is_mutable());
            assert_eq!(n.ty, Type::Unknown);
            match n.kind {
                DeclKind::Constant { value } => {
                    assert_eq!(ast.expr(value).kind, ExprKind::Integer(10))
                }
                _ => panic!("expected a constant"),
            }
        }
        Local::Function(_) => panic!("expected a declaration"),
    }
}

#[test]
fn test_parse_nested_function() {
    let source = "fun main()
        x: int;
        fun helper(a: int)
        begin
            return a
        end;
        y: int;
    begin
        x := helper(1)
    end";
    let ast = parse_ok(source);
    let main = ast.function(ast.program[0]);

    assert_eq!(ast.program.len(), 1);
    assert_eq!(main.locals.len(), 3);
    match main.locals[1] {
        Local::Function(id) => assert_eq!(ast.function(id).name, "helper"),
        Local::Var(_) => panic!("expected a nested function"),
    }
    // Nested functions are not top level.
    assert_eq!(ast.find_function("helper"), None);
}

#[test]
fn test_parse_assignment() {
    let ast = parse_main_body("x := 1 + 2");

    match first_stmt(&ast) {
        StmtKind::Assign { target, value } => {
            assert_eq!(ast.expr(*target).kind, ExprKind::Identifier("x".to_string()));
            assert!(matches!(
                ast.expr(*value).kind,
                ExprKind::Binary {
                    op: BinaryOp::Add,
                    ..
                }
            ));
        }
        other => panic!("expected an assignment, got {:?}", other),
    }
}

#[test]
fn test_parse_array_assignment() {
    let ast = parse_main_body("x[2] := 5");

    match first_stmt(&ast) {
        StmtKind::Assign { target, .. } => match &ast.expr(*target).kind {
            ExprKind::ArrayAccess { name, index } => {
                assert_eq!(name, "x");
                assert_eq!(ast.expr(*index).kind, ExprKind::Integer(2));
            }
            other => panic!("expected an array access, got {:?}", other),
        },
        other => panic!("expected an assignment, got {:?}", other),
    }
}

#[test]
fn test_parse_precedence() {
    let ast = parse_main_body("x := 1 + 2 * 3");

    let StmtKind::Assign { value, .. } = first_stmt(&ast) else {
        panic!("expected an assignment");
    };
    match &ast.expr(*value).kind {
        ExprKind::Binary {
            op: BinaryOp::Add,
            left,
            right,
        } => {
            assert_eq!(ast.expr(*left).kind, ExprKind::Integer(1));
            assert!(matches!(
                ast.expr(*right).kind,
                ExprKind::Binary {
                    op: BinaryOp::Mul,
                    ..
                }
            ));
        }
        other => panic!("expected an addition, got {:?}", other),
    }
}

#[test]
fn test_parse_left_associativity() {
    let ast = parse_main_body("x := 10 - 4 - 3");

    let StmtKind::Assign { value, .. } = first_stmt(&ast) else {
        panic!("expected an assignment");
    };
    match &ast.expr(*value).kind {
        ExprKind::Binary {
            op: BinaryOp::Sub,
            left,
            right,
        } => {
            assert!(matches!(ast.expr(*left).kind, ExprKind::Binary { .. }));
            assert_eq!(ast.expr(*right).kind, ExprKind::Integer(3));
        }
        other => panic!("expected a subtraction, got {:?}", other),
    }
}

#[test]
fn test_parse_relations_bind_looser_than_arithmetic() {
    let ast = parse_main_body("while x + 1 < 10 and x > 0 do x := x + 1");

    let StmtKind::While { condition, .. } = first_stmt(&ast) else {
        panic!("expected a while loop");
    };
    match &ast.expr(*condition).kind {
        ExprKind::Relation {
            op: RelationOp::And,
            left,
            right,
        } => {
            assert!(matches!(
                ast.expr(*left).kind,
                ExprKind::Relation {
                    op: RelationOp::Less,
                    ..
                }
            ));
            assert!(matches!(
                ast.expr(*right).kind,
                ExprKind::Relation {
                    op: RelationOp::Greater,
                    ..
                }
            ));
        }
        other => panic!("expected `and`, got {:?}", other),
    }
}

#[test]
fn test_parse_unary_and_not() {
    let ast = parse_main_body("if not -x < 0 then skip");

    let StmtKind::IfThen { condition, .. } = first_stmt(&ast) else {
        panic!("expected an if statement");
    };
    let ExprKind::Not(inner) = ast.expr(*condition).kind.clone() else {
        panic!("expected `not`");
    };
    let ExprKind::Relation { left, .. } = ast.expr(inner).kind.clone() else {
        panic!("expected a relation under `not`");
    };
    assert!(matches!(
        ast.expr(left).kind,
        ExprKind::Unary {
            op: UnaryOp::Minus,
            ..
        }
    ));
}

#[test]
fn test_parse_type_casts() {
    let ast = parse_main_body("x := int(2.5) + int(float(x))");

    let StmtKind::Assign { value, .. } = first_stmt(&ast) else {
        panic!("expected an assignment");
    };
    let ExprKind::Binary { left, .. } = ast.expr(*value).kind.clone() else {
        panic!("expected a binary expression");
    };
    match ast.expr(left).kind {
        ExprKind::TypeCast { target, operand } => {
            assert_eq!(target, Type::Int);
            assert_eq!(ast.expr(operand).kind, ExprKind::Float(2.5));
        }
        ref other => panic!("expected a cast, got {:?}", other),
    }
}

#[test]
fn test_parse_literals_are_pretyped() {
    let ast = parse_main_body("x := 1; x := 2.0");
    let main = ast.function(ast.program[0]);

    let StmtKind::Assign { value: first, .. } = ast.stmt(main.body[0]).kind else {
        panic!("expected an assignment");
    };
    let StmtKind::Assign { value: second, .. } = ast.stmt(main.body[1]).kind else {
        panic!("expected an assignment");
    };
    assert_eq!(ast.expr(first).ty, Type::Int);
    assert_eq!(ast.expr(second).ty, Type::Float);
}

#[test]
fn test_parse_if_else() {
    let ast = parse_main_body("if x == 1 then x := 2 else x := 3");

    assert!(matches!(first_stmt(&ast), StmtKind::IfThenElse { .. }));
}

#[test]
fn test_parse_dangling_else_binds_to_nearest_if() {
    let ast = parse_main_body("if x == 1 then if x == 2 then skip else break");

    let StmtKind::IfThen { body, .. } = first_stmt(&ast) else {
        panic!("expected the outer if to have no else");
    };
    assert!(matches!(ast.stmt(*body).kind, StmtKind::IfThenElse { .. }));
}

#[test]
fn test_parse_block_and_trailing_semicolon() {
    let ast = parse_main_body("while x < 3 do begin x := x + 1; print(\"tick\"); end;");

    let StmtKind::While { body, .. } = first_stmt(&ast) else {
        panic!("expected a while loop");
    };
    match &ast.stmt(*body).kind {
        StmtKind::Block(statements) => assert_eq!(statements.len(), 2),
        other => panic!("expected a block, got {:?}", other),
    }
}

#[test]
fn test_parse_io_statements() {
    let ast = parse_main_body("read(x); write(x * 2); print(\"done\"); print(x)");
    let main = ast.function(ast.program[0]);

    let kinds: Vec<&str> = main
        .body
        .iter()
        .map(|id| ast.stmt(*id).kind.name())
        .collect();
    assert_eq!(kinds, vec!["read", "write", "print", "print"]);

    let StmtKind::Print(arg) = ast.stmt(main.body[2]).kind else {
        panic!("expected print");
    };
    assert_eq!(ast.expr(arg).kind, ExprKind::Str("done".to_string()));
}

#[test]
fn test_parse_call_statement_and_expression() {
    let ast = parse_main_body("f(1, x); x := g()");
    let main = ast.function(ast.program[0]);

    match ast.stmt(main.body[0]).kind {
        StmtKind::Call(call) => match &ast.expr(call).kind {
            ExprKind::Call { callee, arguments } => {
                assert_eq!(callee, "f");
                assert_eq!(arguments.len(), 2);
            }
            other => panic!("expected a call, got {:?}", other),
        },
        ref other => panic!("expected a call statement, got {:?}", other),
    }

    let StmtKind::Assign { value, .. } = ast.stmt(main.body[1]).kind else {
        panic!("expected an assignment");
    };
    assert_eq!(
        ast.expr(value).kind,
        ExprKind::Call {
            callee: "g".to_string(),
            arguments: vec![]
        }
    );
}

#[test]
fn test_parse_return_skip_break() {
    let ast = parse_main_body("while 1 do break; skip; return 0");
    let main = ast.function(ast.program[0]);

    let kinds: Vec<&str> = main
        .body
        .iter()
        .map(|id| ast.stmt(*id).kind.name())
        .collect();
    assert_eq!(kinds, vec!["while", "skip", "return"]);
}

#[test]
fn test_parse_spans() {
    let ast = parse_ok("fun main() begin end");
    let main = ast.function(ast.program[0]);

    assert_eq!(main.span.start.0, 0);
    assert_eq!(main.span.end.0, 20);
}

#[test]
fn test_parse_empty_input_fails() {
    let err = parse_source("   ").unwrap_err();

    assert!(matches!(
        err.kind(),
        ErrorImpl::UnexpectedTokenDetailed { .. }
    ));
}

#[test]
fn test_parse_missing_semicolon_fails() {
    let err = parse_source("fun main() x: int; begin x := 1 x := 2 end").unwrap_err();

    match err.kind() {
        ErrorImpl::UnexpectedTokenDetailed { token, .. } => assert_eq!(token, "x"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_parse_assign_to_non_location_fails() {
    let err = parse_source("fun main() begin 1 + 2 := 3 end").unwrap_err();

    assert_eq!(err.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_parse_expression_statement_fails() {
    let err = parse_source("fun main() x: int; begin x end").unwrap_err();

    assert_eq!(err.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_parse_read_requires_location() {
    let err = parse_source("fun main() begin read(1) end").unwrap_err();

    assert_eq!(err.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_parse_bad_type_fails() {
    let err = parse_source("fun main() x: bool; begin skip end").unwrap_err();

    match err.kind() {
        ErrorImpl::UnexpectedTokenDetailed { token, message } => {
            assert_eq!(token, "bool");
            assert_eq!(message, "expected `int` or `float`");
        }
        other => panic!("unexpected error {:?}", other),
    }
}
