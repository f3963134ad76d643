use std::{fs, rc::Rc};

use toylang::{
    Error,
    config::Config,
    error::{InterpreterError, SemanticError},
    interpreter::{
        analyzer::core::SemanticAnalyzer,
        evaluator::{
            console::{Console, OutputBuffer},
            core::Interpreter,
        },
        value::{
            core::{HostObject, Value},
            function::Arity,
        },
    },
    parse, run_with,
};
use walkdir::WalkDir;

fn run_output(src: &str) -> Result<String, Error> {
    run_with_input(src, "")
}

fn run_with_input(src: &str, input: &'static str) -> Result<String, Error> {
    let output = OutputBuffer::default();
    let console = Console::new(output.clone(), input.as_bytes());
    run_with(src, Config::default(), console)?;
    Ok(output.contents())
}

fn assert_output(src: &str, expected: &str) {
    match run_output(src) {
        Ok(output) => assert_eq!(output, expected, "unexpected output for:\n{src}"),
        Err(e) => panic!("Script failed: {e}\n{src}"),
    }
}

fn assert_success(src: &str) {
    if let Err(e) = run_output(src) {
        panic!("Script failed: {e}\n{src}");
    }
}

fn assert_failure(src: &str) -> Error {
    match run_output(src) {
        Ok(_) => panic!("Script succeeded but was expected to fail:\n{src}"),
        Err(e) => e,
    }
}

/// Runs `src` without the semantic analyzer, so the interpreter's own checks
/// are exercised.
fn interpret_unchecked(src: &str) -> Result<String, InterpreterError> {
    let output = OutputBuffer::default();
    let console = Console::new(output.clone(), std::io::empty());
    let program = parse(src).unwrap_or_else(|e| panic!("parse failed: {e}"));
    Interpreter::with_console(Config::default(), console).interpret(&program)?;
    Ok(output.contents())
}

#[test]
fn demo_programs_match_expected_output() {
    let mut count = 0;

    for entry in WalkDir::new("demos").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "toy"))
    {
        let path = entry.path();
        let source = fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                              panic!("Failed to read {expected_path:?}: {e}")
                                                          });

        count += 1;
        match run_output(&source) {
            Ok(output) => assert_eq!(output, expected, "demo {path:?} printed unexpected output"),
            Err(e) => panic!("demo {path:?} failed: {e}"),
        }
    }

    assert!(count > 0, "No demo programs found in demos/");
}

#[test]
fn inner_declarations_shadow_without_leaking() {
    assert_output("{ var x = 1; { var x = 2; println x } println x }", "2\n1\n");
}

#[test]
fn continue_and_break_inside_numeric_for() {
    assert_output("for i is 0, 5 { if i == 2 { continue } if i == 4 { break } println i }",
                  "0\n1\n3\n");
}

#[test]
fn numeric_for_bounds_and_steps() {
    assert_output("for i is 3, 1, -1 { println i }", "3\n2\n1\n");
    assert_output("for x is 0, 1, 0.5: println x", "0.0\n0.5\n1.0\n");
    assert_output("for i is 1, 0 { println i } println \"done\"", "done\n");

    let err = assert_failure("for i is 1, 3, 0 { }");
    assert!(matches!(err, Error::Interpreter(InterpreterError::ValueError { .. })));
}

#[test]
fn numeric_for_evaluates_bounds_once() {
    assert_output("var n = 3 var count = 0 for i is 1, n { n = 10 count += 1 } println count",
                  "3\n");
}

#[test]
fn for_each_over_lists_maps_and_strings() {
    assert_output("for x in [1, 2] println x", "1\n2\n");
    assert_output("for i, x in [\"a\", \"b\"] { println i, x }", "0 a\n1 b\n");
    assert_output("var m = {\"b\": 2, \"a\": 1} for k in m { println k }", "b\na\n");
    assert_output("var m = {\"b\": 2, \"a\": 1} for k, v in m { println k, v }", "b 2\na 1\n");
    assert_output("for i, c in \"hé\" { println i, c }", "0 h\n1 é\n");

    let err = assert_failure("for x in 5 { }");
    assert!(matches!(err, Error::Interpreter(InterpreterError::TypeError { .. })));
}

#[test]
fn for_each_iterates_a_snapshot() {
    assert_output("var xs = [1, 2] for x in xs { xs[0] = 5 println x } println xs", "1\n2\n[5, 2]\n");
}

#[test]
fn while_and_repeat_loops() {
    assert_output("var n = 0 while n < 5 { n += 2 } println n", "6\n");
    assert_output("var i = 0 repeat { i += 1 } until i >= 3 println i", "3\n");
    assert_output("var i = 10 repeat i += 1 until true println i", "11\n");
    assert_output("var i = 0 while true { i += 1 if i == 3 { break } } println i", "3\n");
}

#[test]
fn repeat_condition_cannot_see_body_declarations() {
    let err = assert_failure("repeat: var done = true until done");
    assert!(matches!(err, Error::Semantic(SemanticError::NameNotDeclared { ref name, .. }) if name == "done"));

    assert_output("var n = 0 repeat: n += 1 until n == 3 println n", "3\n");
    assert_output("for i is 1, 2: var i = 0 println \"done\"", "done\n");
}

#[test]
fn containers_cannot_hold_themselves() {
    let err = assert_failure("var l = [1] l[0] = l");
    assert!(matches!(err, Error::Interpreter(InterpreterError::MemberAccess { .. })));

    let err = assert_failure("var m = {} m.inner = [m]");
    assert!(matches!(err, Error::Interpreter(InterpreterError::MemberAccess { .. })));

    let err = assert_failure("var a = [0] var b = [a] a[0] = b");
    assert!(matches!(err, Error::Interpreter(InterpreterError::MemberAccess { .. })));

    assert_output("var a = [0] var b = [1] a[0] = b b[0] = 2 println a", "[[2]]\n");
}

#[test]
fn loop_bodies_may_declare_variables() {
    assert_output("for i is 1, 3: var sq = i * i println \"ok\"", "ok\n");
    assert_output("var i = 0 while i < 2 { var j = i i += 1 println j }", "0\n1\n");
}

#[test]
fn integer_and_float_arithmetic() {
    assert_output("println 7 / 2, 7 / 2.0, -7 / 2, -7 % 2, 7 % -2", "3 3.5 -4 1 -1\n");
    assert_output("println 2 ** 10, 2 ** -1, -2 ** 2, 2 ** 3 ** 2", "1024 0.5 -4 512\n");
    assert_output("println 1 + 2 * 3, (1 + 2) * 3, 1.5 + 1", "7 9 2.5\n");
}

#[test]
fn float_operands_promote_large_ints() {
    assert_output("println 9007199254740993 + 0.5, 9007199254740993 < 1.5, 9007199254740993 == 9007199254740992.0",
                  "9007199254740992.0 false false\n");
}

#[test]
fn float_division_by_zero_follows_ieee() {
    assert_output("println 1.0 / 0, -1 / 0.0, 1 % 0.0", "inf -inf NaN\n");
}

#[test]
fn huge_exponents_on_unit_bases() {
    assert_output("println 1 ** 9999999999, (-1) ** 9999999999, (-1) ** 10000000000, 0 ** 9999999999",
                  "1 -1 1 0\n");

    let err = assert_failure("var x = 2 ** 9999999999");
    assert!(matches!(err, Error::Interpreter(InterpreterError::Overflow { .. })));
}

#[test]
fn arithmetic_errors() {
    let err = assert_failure("var x = 9223372036854775807 + 1");
    assert!(matches!(err, Error::Interpreter(InterpreterError::Overflow { .. })));

    let err = assert_failure("var x = 1 / 0");
    assert!(matches!(err, Error::Interpreter(InterpreterError::DivisionByZero { .. })));

    let err = assert_failure("var x = 1 % 0");
    assert!(matches!(err, Error::Interpreter(InterpreterError::DivisionByZero { .. })));

    let err = assert_failure("var x = null + 1");
    assert!(matches!(err, Error::Interpreter(InterpreterError::TypeError { .. })));
}

#[test]
fn string_concatenation() {
    assert_output("println \"x\" + 1, \"x\" + 1.5, \"a\" + \"b\"", "x1 x1.5 ab\n");

    let err = assert_failure("var s = 1 + \"x\"");
    assert!(matches!(err, Error::Interpreter(InterpreterError::TypeError { .. })));
}

#[test]
fn negated_comparisons_evaluate_operands_once() {
    let src = "var calls = 0
               func tick(v) { calls += 1 return v }
               var r = tick(3) >= tick(2)
               println r, calls
               println tick(1) > tick(1), tick(1) != tick(2), calls";
    assert_output(src, "true 2\nfalse true 6\n");
}

#[test]
fn equality_across_types() {
    assert_output("println 1 == 1.0, 1 == \"1\", null == null, [1, [2]] == [1, [2]], {\"a\": 1} == {\"a\": 1.0}",
                  "true false true true true\n");

    let err = assert_failure("var b = \"a\" < \"b\"");
    assert!(matches!(err, Error::Interpreter(InterpreterError::TypeError { .. })));
}

#[test]
fn logical_operators_short_circuit() {
    let src = "var called = false
               func side() { called = true return true }
               var r = false and side()
               println r, called
               println 0 or \"x\", not [], true and 1";
    assert_output(src, "false false\ntrue true true\n");
}

#[test]
fn membership_and_type_tests() {
    assert_output("println 2 in [1, 2], \"b\" in {\"a\": 1}, \"ell\" in \"hello\", [1] in {\"k\": 1}",
                  "true false true false\n");
    assert_output("println 1 is int, 1.0 is float, [] is list, {} is map, \"\" is string, typeof(1) == int",
                  "true true true true true true\n");
    assert_output("var a = [1] var b = a println a is b, a is [1], a == [1]", "true false true\n");
    assert_output("println typeof(println) == function, typeof(int) == type", "true true\n");
}

#[test]
fn ternary_select() {
    assert_output("println 1 < 2 ? \"yes\" : \"no\", null ? 1 : 2", "yes 2\n");
}

#[test]
fn conditions_reject_values_without_truth() {
    let err = assert_failure("if typeof(1) { println 1 }");
    assert!(matches!(err, Error::Interpreter(InterpreterError::TypeError { .. })));
}

#[test]
fn lists_are_shared_references() {
    assert_output("var a = [1] var b = a b[0] = 9 println a", "[9]\n");
    assert_output("var xs = [1, 2] xs[0] += 10 xs[-1] *= 3 println xs, #xs", "[11, 6] 2\n");
    assert_output("var xs = [\"a\", null, 1.0] println xs", "[\"a\", null, 1.0]\n");
}

#[test]
fn list_index_errors() {
    assert_output("var xs = [1, 2, 3] println xs[-1], xs[0]", "3 1\n");

    let err = assert_failure("var xs = [1] println xs[1]");
    assert!(matches!(err, Error::Interpreter(InterpreterError::MemberAccess { .. })));

    let err = assert_failure("var xs = [1] println xs[-2]");
    assert!(matches!(err, Error::Interpreter(InterpreterError::MemberAccess { .. })));

    let err = assert_failure("var xs = [1] xs.a = 2");
    assert!(matches!(err, Error::Interpreter(InterpreterError::TypeError { .. })));
}

#[test]
fn map_reads_writes_and_keys() {
    assert_output("var m = {\"a\": 1} m[\"b\"] = 2 m.c = 3 m.a = 0 println m, #m",
                  "{\"a\": 0, \"b\": 2, \"c\": 3} 3\n");
    assert_output("var m = {} m[1] = \"a\" println m[1.0], m[1]", "a a\n");
    assert_output("var s = {1, 2, 2} println #s, 2 in s, s", "2 true {1: true, 2: true}\n");

    let err = assert_failure("var m = {\"a\": 1} println m.z");
    assert!(matches!(err, Error::Interpreter(InterpreterError::MemberAccess { .. })));

    let err = assert_failure("var m = {} m[[1]] = 2");
    assert!(matches!(err, Error::Interpreter(InterpreterError::MemberAccess { .. })));
}

#[test]
fn string_indexing_and_length() {
    assert_output("println #\"héllo\", \"abc\"[1], \"abc\"[-1]", "5 b c\n");

    let err = assert_failure("var s = \"abc\" s[0] = \"x\"");
    assert!(matches!(err, Error::Interpreter(InterpreterError::MemberAccess { .. })));
}

#[test]
fn bitwise_operators() {
    assert_output("println 6 & 3, 6 | 3, 6 ^ 3, 1 << 4, -16 >> 2, ~0", "2 7 5 16 -4 -1\n");
    assert_output("var x = 1 x <<= 3 x |= 1 println x", "9\n");

    let err = assert_failure("var x = 1 << 64");
    assert!(matches!(err, Error::Interpreter(InterpreterError::ValueError { .. })));

    let err = assert_failure("var x = 1.5 & 1");
    assert!(matches!(err, Error::Interpreter(InterpreterError::TypeError { .. })));
}

#[test]
fn declarations_and_assignments() {
    assert_output("var a, b = 1, 2 a, b = b, a println a, b", "2 1\n");
    assert_output("var a, b = 1 println a, b", "1 null\n");
    assert_output("var a = 1, 2 println a", "1\n");
    assert_output("var a, b a, b = 5 println a, b", "5 null\n");
}

#[test]
fn switch_runs_first_matching_case() {
    assert_output("switch 2 case 1: println \"one\" case 2: println \"two\" default: println \"other\"",
                  "two\n");
    assert_output("switch 1.0 case 1: println \"int\" default: println \"none\"", "int\n");
    assert_output("switch \"z\" case \"a\" { println 1 } default { println 0 }", "0\n");
    assert_output("switch 3 case 1: println 1", "");
}

#[test]
fn if_elif_else_chain() {
    let src = "func sign(n) { if n < 0 { return -1 } elif n == 0 { return 0 } else { return 1 } }
               println sign(-5), sign(0), sign(9)";
    assert_output(src, "-1 0 1\n");
}

#[test]
fn functions_and_recursion() {
    assert_output("func fib(n) { if n < 2 { return n } return fib(n - 1) + fib(n - 2) } println fib(15)",
                  "610\n");
    assert_output("func f() {} println f()", "null\n");
    assert_output("func sum(...xs) { var t = 0 for x in xs { t += x } return t } println sum(1, 2, 3), sum()",
                  "6 0\n");
    assert_output("func first(a, ...rest) { return [a, rest] } println first(1), first(1, 2, 3)",
                  "[1, []] [1, [2, 3]]\n");
    assert_output("var twice = func(f, x) { return f(f(x)) } println twice(func(n) { return n * 3 }, 2)",
                  "18\n");
}

#[test]
fn calls_check_arguments_and_callee() {
    let err = assert_failure("func f(a) { return a } f(1, 2)");
    assert!(matches!(err, Error::Interpreter(InterpreterError::ArgumentCount { found: 2, .. })));

    let err = assert_failure("func f(a, ...r) { return a } f()");
    assert!(matches!(err, Error::Interpreter(InterpreterError::ArgumentCount { found: 0, .. })));

    let err = assert_failure("typeof(1, 2)");
    assert!(matches!(err, Error::Interpreter(InterpreterError::ArgumentCount { .. })));

    let err = assert_failure("var x = 1 x()");
    assert!(matches!(err, Error::Interpreter(InterpreterError::NotCallable { .. })));
}

#[test]
fn functions_see_their_defining_record() {
    assert_output("func outer() { var x = 10 var get = func() { return x } return get() } println outer()",
                  "10\n");
    assert_output("var g = 5 func mk() { return func() { return g } } println mk()()", "5\n");
}

#[test]
fn closures_outlive_the_call_that_made_them() {
    assert_output("var x = \"global\"
                   func make() { var x = \"local\" return func() { return x } }
                   println make()()",
                  "local\n");
    assert_output("func counter() { var n = 0 return func() { n += 1 return n } }
                   var c = counter()
                   var d = counter()
                   c() c()
                   println c(), d()",
                  "3 1\n");
    assert_output("func scale(step) { if true { var base = 10 return func(v) { return base + v * step } } }
                   println scale(2)(3)",
                  "16\n");
}

#[test]
fn deep_recursion_is_bounded_by_the_call_depth() {
    assert_output("func depth(n) { if n == 0 { return 0 } return depth(n - 1) + 1 } println depth(900)",
                  "900\n");

    let err = assert_failure("func f(n) { return f(n + 1) } f(0)");
    assert!(matches!(err, Error::Interpreter(InterpreterError::CallDepthExceeded { limit: 1000, .. })));

    let config = Config { max_call_depth: 10,
                          ..Config::default() };
    let src = "func f(n) { if n > 0 { f(n - 1) } }";
    let run = |call: &str| {
        let console = Console::new(OutputBuffer::default(), std::io::empty());
        run_with(&format!("{src} {call}"), config, console)
    };
    assert!(run("f(9)").is_ok());
    assert!(matches!(run("f(10)"),
                     Err(Error::Interpreter(InterpreterError::CallDepthExceeded { limit: 10, .. }))));
}

#[test]
fn return_leaves_nested_loops() {
    let src = "func find(xs, target) {
                   for i, x in xs { while true { if x == target { return i } break } }
                   return -1
               }
               println find([4, 5, 6], 6), find([1], 9)";
    assert_output(src, "2 -1\n");
}

#[test]
fn semantic_errors_stop_execution() {
    let err = assert_failure("println 1 break");
    assert!(matches!(err, Error::Semantic(SemanticError::BreakOutsideLoop { .. })));

    let err = assert_failure("const c = 1 c = 2");
    assert!(matches!(err, Error::Semantic(SemanticError::NotAssignable { .. })));

    let err = assert_failure("for i is 1, 3 { i = 5 }");
    assert!(matches!(err, Error::Semantic(SemanticError::NotAssignable { .. })));

    let err = assert_failure("return 1");
    assert!(matches!(err, Error::Semantic(SemanticError::ReturnOutsideFunction { .. })));
}

#[test]
fn interpreter_checks_without_analysis() {
    let err = interpret_unchecked("break").unwrap_err();
    assert!(matches!(err, InterpreterError::BreakOutsideLoop { .. }));

    let err = interpret_unchecked("continue").unwrap_err();
    assert!(matches!(err, InterpreterError::ContinueOutsideLoop { .. }));

    let err = interpret_unchecked("return 1").unwrap_err();
    assert!(matches!(err, InterpreterError::ReturnOutsideFunction { .. }));

    let err = interpret_unchecked("for i is 1, 2 { func f() { break } f() }").unwrap_err();
    assert!(matches!(err, InterpreterError::BreakOutsideLoop { .. }));

    let err = interpret_unchecked("const c = 1 c = 2").unwrap_err();
    assert!(matches!(err, InterpreterError::NotAssignable { .. }));

    let err = interpret_unchecked("for i is 1, 3 { i = 5 }").unwrap_err();
    assert!(matches!(err, InterpreterError::NotAssignable { .. }));

    let err = interpret_unchecked("println y").unwrap_err();
    assert!(matches!(err, InterpreterError::NameNotDeclared { .. }));

    let err = interpret_unchecked("var a = 1 var a = 2").unwrap_err();
    assert!(matches!(err, InterpreterError::DuplicateDeclared { .. }));
}

#[test]
fn errors_print_kind_and_position() {
    let err = assert_failure("println(y)");
    assert_eq!(err.to_string(), "SemanticError: 1:9: name `y` not declared");

    let err = assert_failure("assert(1 == 2, \"boom\")");
    assert_eq!(err.to_string(), "InterpreterError: 1:7: assertion failed: boom");

    let err = assert_failure("var s = \"abc");
    assert_eq!(err.to_string(), "LexerError: 1:9: literal string is not end");

    let err = assert_failure("var = 1");
    assert!(err.to_string().starts_with("ParserError: 1:5: "));
}

#[test]
fn print_input_and_assert() {
    assert_output("print 1 print 2, \"a\" println()", "12 a\n");

    match run_with_input("var n = input(\"n: \", int) println n * 2", "21\n") {
        Ok(output) => assert_eq!(output, "n: 42\n"),
        Err(e) => panic!("Script failed: {e}"),
    }
    match run_with_input("var s = input() println s + \"!\", input()", "hi\n") {
        Ok(output) => assert_eq!(output, "hi! null\n"),
        Err(e) => panic!("Script failed: {e}"),
    }

    let err = run_with_input("var n = input(\"\", int)", "abc\n").unwrap_err();
    assert!(matches!(err, Error::Interpreter(InterpreterError::ValueError { .. })));

    assert_success("assert(true) assert(1 == 1.0, \"equal\")");
    let err = assert_failure("assert([])");
    assert!(matches!(err, Error::Interpreter(InterpreterError::AssertionFailed { .. })));
}

#[test]
fn interpreter_survives_errors_between_programs() {
    let output = OutputBuffer::default();
    let console = Console::new(output.clone(), std::io::empty());
    let mut interpreter = Interpreter::with_console(Config::default(), console);

    interpreter.interpret(&parse("var a = 1 func boom() { for i is 1, 2 { var z = 1 / 0 } }").unwrap())
               .unwrap();
    assert!(interpreter.interpret(&parse("boom()").unwrap()).is_err());
    assert_eq!(interpreter.call_stack().depth(), 1);

    interpreter.interpret(&parse("a += 1 println a").unwrap()).unwrap();
    assert_eq!(interpreter.global("a"), Some(Value::Int(2)));
    assert_eq!(output.contents(), "2\n");
}

fn double(_console: &mut Console, args: &[Value], pos: toylang::ast::Position) -> Result<Value, InterpreterError> {
    Ok(Value::Int(args[0].as_int(pos)? * 2))
}

fn point(_console: &mut Console, _args: &[Value], _pos: toylang::ast::Position) -> Result<Value, InterpreterError> {
    Ok(Value::Object(Rc::new(HostObject::new("Point", (1_i64, 2_i64)))))
}

#[test]
fn registered_host_functions_are_callable() {
    let output = OutputBuffer::default();
    let console = Console::new(output.clone(), std::io::empty());
    let mut interpreter = Interpreter::with_console(Config::default(), console);
    let mut analyzer = SemanticAnalyzer::new(Config::default());

    interpreter.register_host("double", Arity::Exact(1), double);
    interpreter.register_host("point", Arity::Exact(0), point);
    analyzer.declare_builtin("double");
    analyzer.declare_builtin("point");

    let program = parse("var p = point() println double(21), p, typeof(p) == object, p is p").unwrap();
    analyzer.analyze(&program).unwrap();
    interpreter.interpret(&program).unwrap();

    assert_eq!(output.contents(), "42 <object Point> true true\n");

    let Some(Value::Object(object)) = interpreter.global("p") else {
        panic!("p is not an object");
    };
    assert_eq!(object.downcast::<(i64, i64)>(), Some(&(1, 2)));

    let err = analyzer.analyze(&parse("double = 1").unwrap()).unwrap_err();
    assert!(matches!(err, SemanticError::NotAssignable { .. }));
}
