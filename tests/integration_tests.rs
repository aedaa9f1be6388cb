//! Integration tests for the whole front end.
//!
//! These tests drive source text through tokenization, parsing and type
//! checking, and check the rendered diagnostics and tree dumps.

use pl0c::{
    ast::{printer::dump, types::Type},
    compile_source,
    errors::errors::ErrorImpl,
    render_error,
    type_checker::type_checker::CheckOptions,
};

const FACTORIAL: &str = include_str!("../demos/factorial.pl0");
const ARRAYS: &str = include_str!("../demos/arrays.pl0");
const MISMATCH: &str = include_str!("../demos/mismatch.pl0");

fn return_type_of(source: &str, file: &str, name: &str) -> Type {
    let ast = compile_source(source, file, CheckOptions::default()).unwrap();
    let id = ast
        .functions
        .iter()
        .position(|function| function.name == name)
        .unwrap();
    ast.functions[id].return_type
}

#[test]
fn test_factorial_demo_checks() {
    assert_eq!(return_type_of(FACTORIAL, "factorial.pl0", "fact"), Type::Int);
    assert_eq!(return_type_of(FACTORIAL, "factorial.pl0", "fact_loop"), Type::Int);
    assert_eq!(return_type_of(FACTORIAL, "factorial.pl0", "main"), Type::Unknown);
}

#[test]
fn test_arrays_demo_checks() {
    let ast = compile_source(ARRAYS, "arrays.pl0", CheckOptions::default()).unwrap();

    assert_eq!(ast.program.len(), 1);
    assert_eq!(return_type_of(ARRAYS, "arrays.pl0", "square"), Type::Float);
}

#[test]
fn test_demos_pass_strict_mode() {
    assert!(compile_source(FACTORIAL, "factorial.pl0", CheckOptions::strict()).is_ok());
    assert!(compile_source(ARRAYS, "arrays.pl0", CheckOptions::strict()).is_ok());
}

#[test]
fn test_mismatch_demo_renders_diagnostic() {
    let error = compile_source(MISMATCH, "mismatch.pl0", CheckOptions::default()).unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::TypeMismatch {
            expected: Type::Int,
            received: Type::Float
        }
    );

    let rendered = render_error(&error, MISMATCH);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Error: TypeMismatch (Expected type `int`, received `float`)",
            "-> mismatch.pl0",
            "  |",
            "8 | d := a + b",
            "  | -----^",
        ]
    );
}

#[test]
fn test_lexer_error_propagates() {
    let error = compile_source("fun main() begin x := 1 @ end", "bad.pl0", CheckOptions::default())
        .unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 24);
}

#[test]
fn test_parser_error_propagates() {
    let error = compile_source("fun main( begin skip end", "bad.pl0", CheckOptions::default())
        .unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_missing_main_renders_at_end_of_program() {
    let source = "fun f()\nbegin\n    skip\nend\n";
    let error = compile_source(source, "nomain.pl0", CheckOptions::default()).unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::MissingEntryPoint);

    let rendered = render_error(&error, source);
    assert!(rendered.starts_with("Error: MissingEntryPoint (Declare a function named `main`)\n"));
    assert!(rendered.contains("4 | end"));
}

#[test]
fn test_dump_shows_inferred_types() {
    let source = "fun twice(x: float)
        begin
            return x + x
        end

        fun main()
            y: float;
        begin
            y := twice(1.5)
        end";
    let ast = compile_source(source, "dump.pl0", CheckOptions::default()).unwrap();
    let dumped = dump(&ast);

    let expected = "\
Program
  Function twice -> float
    Param x: float
    Return
      Binary + : float
        Identifier x : float
        Identifier x : float
  Function main -> unknown
    Var y: float
    Assign
      target:
        Identifier y : float
      value:
        Call twice : float
          Float 1.5 : float
";
    assert_eq!(dumped, expected);
}

#[test]
fn test_checks_are_independent() {
    // Each run owns its own scopes: a name declared in one program is not
    // visible in the next.
    let first = "fun helper() begin return 1 end\nfun main() begin skip end";
    let second = "fun main() x: int; begin x := helper() end";

    assert!(compile_source(first, "first.pl0", CheckOptions::default()).is_ok());
    let error = compile_source(second, "second.pl0", CheckOptions::default()).unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorImpl::UndefinedFunction {
            name: "helper".to_string()
        }
    );
}
