//! End-to-end tests driving whole programs through the public entry points.

use std::cell::RefCell;
use std::rc::Rc;

use vesper::{
    error::{Error, RuntimeError},
    evaluate_with,
    interpreter::value::{Complex, Matrix, Value},
    position::Span,
    Runtime,
};

/// Runs a program with full capabilities and a discarded output sink,
/// panicking with the program text if it fails.
fn eval(source: &str) -> Value {
    let out = Rc::new(RefCell::new(Vec::new()));
    evaluate_with(source, false, out)
        .unwrap_or_else(|err| panic!("program failed with '{err}':\n{source}"))
}

/// Runs a program expected to fail and hands back the error.
fn eval_err(source: &str) -> Error {
    let out = Rc::new(RefCell::new(Vec::new()));
    match evaluate_with(source, false, out) {
        Ok(value) => panic!("program unexpectedly produced {value}:\n{source}"),
        Err(err) => err,
    }
}

/// Runs a program and returns everything it printed.
fn output(source: &str) -> String {
    let out = Rc::new(RefCell::new(Vec::new()));
    evaluate_with(source, false, Rc::<RefCell<Vec<u8>>>::clone(&out))
        .unwrap_or_else(|err| panic!("program failed with '{err}':\n{source}"));
    let bytes = out.borrow();
    String::from_utf8(bytes.clone()).unwrap()
}

fn number(n: f64) -> Value {
    Value::Number(n)
}

fn numbers(ns: &[f64]) -> Value {
    ns.iter().copied().map(Value::Number).collect::<Vec<_>>().into()
}

#[test]
fn arithmetic_follows_precedence() {
    assert_eq!(eval("1 + 2 * 3"), number(7.0));
    assert_eq!(eval("(1 + 2) * 3"), number(9.0));
    assert_eq!(eval("7 % 3"), number(1.0));
    assert_eq!(eval("1 / 0"), number(f64::INFINITY));
}

#[test]
fn power_is_right_associative_and_beats_prefix_minus() {
    assert_eq!(eval("2 ^ 3 ^ 2"), number(512.0));
    assert_eq!(eval("-2 ^ 2"), number(-4.0));
    assert_eq!(eval("(-2) ^ 2"), number(4.0));
}

#[test]
fn adjacent_number_and_identifier_multiply() {
    assert_eq!(eval("let x = 5\n2x"), number(10.0));
    assert_eq!(eval("let x = 3\n2x ^ 2"), number(18.0));
    assert_eq!(eval("let x = 3\n6 / 2x"), number(1.0));
}

#[test]
fn superscripts_are_exponents() {
    assert_eq!(eval("2³"), number(8.0));
    assert_eq!(eval("let x = 4\nx²"), number(16.0));
}

#[test]
fn roots_postfix_and_plus_minus() {
    assert_eq!(eval("√16"), number(4.0));
    assert_eq!(eval("√(-4)"), Complex::new(0.0, 2.0).into());
    assert_eq!(eval("∛27"), number(3.0));
    assert_eq!(eval("5!"), number(120.0));
    assert_eq!(eval("180°"), number(std::f64::consts::PI));
    assert_eq!(eval("±3"), numbers(&[3.0, -3.0]));
    assert_eq!(eval("10 ± 2"), numbers(&[12.0, 8.0]));
}

#[test]
fn strings_interpolate_repeat_and_compare() {
    assert_eq!(eval(r#""x = {1 + 2}!""#), Value::Str("x = 3!".into()));
    assert_eq!(eval(r#""ab" * 3"#), Value::Str("ababab".into()));
    assert_eq!(eval(r#""total: " + 4"#), Value::Str("total: 4".into()));
    assert_eq!(eval(r#""abc" > "ab""#), Value::Boolean(true));
    assert_eq!(eval(r#"+"4.5""#), number(4.5));
    assert_eq!(eval(r#""hello"[1]"#), Value::Str("e".into()));
}

#[test]
fn lists_concatenate_reduce_and_index() {
    assert_eq!(
        eval("[1, 2] + [3, 4]"),
        numbers(&[1.0, 2.0, 3.0, 4.0])
    );
    assert_eq!(eval("[1, 2] + 3"), numbers(&[1.0, 2.0, 3.0]));
    assert_eq!(eval("∑[1, 2, 3]"), number(6.0));
    assert_eq!(eval("∏[1, 2, 3, 4]"), number(24.0));
    assert_eq!(eval("3 in [1, 2, 3]"), Value::Boolean(true));
    assert_eq!(eval("4 in [1, 2, 3]"), Value::Boolean(false));
    assert_eq!(eval("[10, 20, 30][1]"), number(20.0));
    assert_eq!(eval("[2, 3] * [4, 5]"), numbers(&[8.0, 15.0]));
}

#[test]
fn list_index_is_checked() {
    let err = eval_err("[1, 2][5]");
    assert_eq!(
        err,
        Error::Runtime(RuntimeError::IndexOutOfBounds {
            index: 5,
            len: 2,
            span: Span::new(0, 9),
        })
    );
}

#[test]
fn vectors_do_dot_cross_and_componentwise_brackets() {
    assert_eq!(eval("⟨1, 2, 3⟩ ∙ ⟨4, 5, 6⟩"), number(32.0));
    assert_eq!(
        eval("⟨1, 0, 0⟩ × ⟨0, 1, 0⟩"),
        Value::Vector(vec![0.0, 0.0, 1.0])
    );
    assert_eq!(eval("|⟨-3, 4⟩|"), Value::Vector(vec![3.0, 4.0]));
    assert_eq!(eval("⌊⟨1.7, 2.2⟩⌋"), Value::Vector(vec![1.0, 2.0]));
    assert_eq!(eval("⟨1, 2⟩ + ⟨10, 20⟩"), Value::Vector(vec![11.0, 22.0]));
}

#[test]
fn matrix_product_checks_shapes() {
    let product = eval("[[1, 2, 3], [4, 5, 6]] * [[7, 8], [9, 10], [11, 12]]");
    let expected =
        Matrix::from_rows(vec![vec![58.0, 64.0], vec![139.0, 154.0]]).unwrap();
    assert_eq!(product, expected.into());

    let err = eval_err("[[1, 2, 3], [4, 5, 6]] * [[1, 2], [3, 4], [5, 6], [7, 8]]");
    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::ShapeMismatch { .. })
    ));
}

#[test]
fn illegal_operations_name_both_kinds_and_the_whole_span() {
    let source = "true + [[1, 2], [3, 4]]";
    assert_eq!(
        eval_err(source),
        Error::Runtime(RuntimeError::IllegalBinaryOperation {
            op: "+".to_string(),
            lhs: "boolean",
            rhs: "matrix",
            span: Span::new(0, source.len()),
        })
    );
}

#[test]
fn vector_literals_reject_non_numbers() {
    let err = eval_err("⟨1, true⟩");
    assert!(matches!(err, Error::Runtime(RuntimeError::TypeError { .. })));
    assert_eq!(
        err.to_string(),
        "vectors can only take numbers, found a boolean"
    );
}

#[test]
fn ranges_index_and_restep() {
    assert_eq!(eval("(1:4)[2]"), number(3.0));
    assert_eq!(eval("let s = 0\nfor i in 0:10:2 { s += i }\ns"), number(20.0));
    let err = eval_err("(1:4)[3]");
    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::IndexOutOfBounds { .. })
    ));
}

#[test]
fn conditionals_yield_the_taken_branch() {
    assert_eq!(eval("if 2 > 1: 10 else: 20"), number(10.0));
    assert_eq!(eval("if false: 10 else: 20"), number(20.0));
    assert_eq!(eval("if false: 10"), Value::None);
    assert_eq!(
        eval("let n = 7\nif n < 5: \"low\" else if n < 10: \"mid\" else: \"high\""),
        Value::Str("mid".into())
    );
}

#[test]
fn truthiness_drives_conditions_and_logic() {
    assert_eq!(eval(r#"if "": 1 else: 2"#), number(2.0));
    assert_eq!(eval("if []: 1 else: 2"), number(2.0));
    assert_eq!(eval("not 0"), Value::Boolean(true));
    assert_eq!(eval("1 and 2"), Value::Boolean(true));
    assert_eq!(eval("0 or \"x\""), Value::Boolean(true));
}

#[test]
fn for_bindings_stay_visible_after_the_loop() {
    assert_eq!(eval("for i in 1:4 { i }\ni"), number(3.0));
    assert_eq!(eval("let total = 0\nfor n in [2, 3, 4]: total += n\ntotal"), number(9.0));
    assert_eq!(eval("let c = 0\nfor i in 5: c += 1\nc"), number(5.0));
}

#[test]
fn while_and_loop_exit_through_conditions_and_return() {
    assert_eq!(
        eval("let n = 10\nwhile n > 3 { n -= 2 }\nn"),
        number(2.0)
    );
    assert_eq!(
        eval("let i = 0\nloop {\n    i += 1\n    if i == 3: return i\n}"),
        number(3.0)
    );
}

#[test]
fn a_colon_may_introduce_a_braced_body() {
    assert_eq!(
        eval("let x = 0\nloop: {\n    if x == 3: return x\n    x += 1\n}"),
        number(3.0)
    );
    assert_eq!(eval("if true: { let y = 4\nreturn y + 1 }"), number(5.0));
    assert_eq!(
        eval("let total = 0\nwhile total < 6: { total += 2 }\ntotal"),
        number(6.0)
    );
}

#[test]
fn functions_define_in_both_forms() {
    assert_eq!(eval("fn add(a, b) -> a + b\nadd(2, 3)"), number(5.0));
    assert_eq!(eval("f(x) = x * 2\nf(4)"), number(8.0));
    assert_eq!(
        eval("fn fib(n) {\n    if n < 2: return n\n    return fib(n - 1) + fib(n - 2)\n}\nfib(10)"),
        number(55.0)
    );
}

#[test]
fn block_bodies_need_an_explicit_return() {
    assert_eq!(eval("fn f() { 42 }\nf()"), Value::None);
    assert_eq!(eval("fn f() { return 42 }\nf()"), number(42.0));
}

#[test]
fn missing_arguments_default_to_none() {
    let source = "fn f(a, b) {\n    if not b: return a\n    return a + b\n}\nf(1)";
    assert_eq!(eval(source), number(1.0));
    let source = "fn f(a, b) {\n    if not b: return a\n    return a + b\n}\nf(1, 2)";
    assert_eq!(eval(source), number(3.0));
}

#[test]
fn closures_capture_their_defining_scope() {
    let source = "fn outer() {
    let n = 10
    fn inner() -> n + 1
    return inner
}
let f = outer()
f()";
    assert_eq!(eval(source), number(11.0));
}

#[test]
fn numbers_curry_over_functions() {
    assert_eq!(
        eval("fn double(x) -> 2x\nlet g = 1 + double\ng(5)"),
        number(11.0)
    );
}

#[test]
fn assignment_walks_the_scope_chain() {
    assert_eq!(eval("let x = 1\nfn bump() { x += 10 }\nbump()\nx"), number(11.0));
    assert_eq!(
        eval_err("y = 3"),
        Error::Runtime(RuntimeError::UndefinedIdentifier {
            name: "y".to_string(),
            span: Span::new(0, 5),
        })
    );
}

#[test]
fn compound_assignment_yields_the_new_value() {
    assert_eq!(eval("let x = 2\nlet y = (x += 3)\n[y, x]"), numbers(&[5.0, 5.0]));
    assert_eq!(eval("let x = 10\n(x /= 4)"), number(2.5));
}

#[test]
fn increment_yields_the_previous_value() {
    assert_eq!(eval("let x = 1\nlet y = x++\n[y, x]"), numbers(&[1.0, 2.0]));
    assert_eq!(eval("let x = 5\nlet y = x--\n[y, x]"), numbers(&[5.0, 4.0]));
}

#[test]
fn std_builtins_are_preloaded() {
    assert_eq!(eval("round(3.14159, 100)"), number(3.14));
    assert_eq!(eval("min([4, 2, 8])"), number(2.0));
    assert_eq!(eval("max(1, 9, 5)"), number(9.0));
    assert_eq!(eval("clamp(12, 0, 10)"), number(10.0));
    assert_eq!(eval("gcd(12, 18)"), number(6.0));
    assert_eq!(eval("σ(0)"), number(0.5));
    assert_eq!(eval("sin(0)"), number(0.0));
    assert_eq!(eval("len(\"héllo\")"), number(5.0));
    assert_eq!(eval("zeros(3)"), Value::Vector(vec![0.0, 0.0, 0.0]));
    assert_eq!(eval("int(\"42.9\")"), number(42.0));
    assert_eq!(eval("2 * π"), number(std::f64::consts::TAU));
}

#[test]
fn physics_constants_import_on_demand() {
    assert_eq!(eval("import physics\ng"), number(9.81));
    let err = eval_err("g");
    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::UndefinedIdentifier { .. })
    ));
}

#[test]
fn unknown_modules_are_reported() {
    assert_eq!(
        eval_err("import nosuch"),
        Error::Runtime(RuntimeError::ModuleNotFound {
            name: "nosuch".to_string(),
            span: Span::new(0, 13),
        })
    );
}

#[test]
fn safe_mode_denies_fs_and_leaves_no_bindings() {
    let out = Rc::new(RefCell::new(Vec::new()));
    let runtime = Runtime::new(true, out);
    assert_eq!(
        runtime.eval("import fs"),
        Err(Error::Runtime(RuntimeError::CapabilityDenied {
            name: "fs".to_string(),
            span: Span::new(0, 9),
        }))
    );
    assert!(matches!(
        runtime.eval("readfile"),
        Err(Error::Runtime(RuntimeError::UndefinedIdentifier { .. }))
    ));
}

#[test]
fn fs_futures_round_trip_through_a_directory() {
    let dir = std::env::temp_dir().join("vesper-language-test");
    let _ = std::fs::remove_dir_all(&dir);
    let dir = dir.display();

    let source = format!(
        r#"import fs
await mkdir("{dir}")
await writefile("{dir}/note.txt", "hello")
let text = await readfile("{dir}/note.txt")
await delete("{dir}/note.txt")
await delete("{dir}")
text"#
    );
    assert_eq!(eval(&source), Value::Str("hello".into()));
}

#[test]
fn await_requires_a_future() {
    assert_eq!(
        eval_err("await 5"),
        Error::Runtime(RuntimeError::NotAFuture {
            kind: "number",
            span: Span::new(0, 7),
        })
    );
}

#[test]
fn print_writes_to_the_sink() {
    assert_eq!(output("print(\"a\", 1 + 1)\nprint(\"b\")"), "a 2\nb\n");
    assert_eq!(output("print([1, 2], ⟨3, 4⟩)"), "[1, 2] ⟨3, 4⟩\n");
}

#[test]
fn print_cannot_be_shadowed() {
    assert_eq!(output("let print = 5\nprint(1)"), "1\n");
}

#[test]
fn sessions_keep_their_globals_between_programs() {
    let out = Rc::new(RefCell::new(Vec::new()));
    let runtime = Runtime::new(false, out);
    runtime.eval("let n = 2").unwrap();
    assert_eq!(runtime.eval("n * 3"), Ok(number(6.0)));

    runtime.eval("fn twice(x) -> 2x").unwrap();
    assert_eq!(runtime.eval("twice(21)"), Ok(number(42.0)));
    assert_eq!(runtime.eval("twice(21)"), Ok(number(42.0)));
}

#[test]
fn calling_a_non_function_is_reported_at_the_name() {
    assert_eq!(
        eval_err("let x = 3\nx(1)"),
        Error::Runtime(RuntimeError::NotAFunction {
            name: "x".to_string(),
            span: Span::new(10, 11),
        })
    );
}
