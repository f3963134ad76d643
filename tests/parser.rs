use toylang::{
    Error,
    ast::{BinaryOperator, Expr, NumLiteral, Position, Stat, UnaryOperator},
    error::ParserError,
    parse,
};

fn parse_ok(src: &str) -> Vec<Stat> {
    match parse(src) {
        Ok(program) => program.stats,
        Err(e) => panic!("Parse failed: {e}\n{src}"),
    }
}

fn parse_err(src: &str) -> ParserError {
    match parse(src) {
        Ok(program) => panic!("Parse succeeded but was expected to fail:\n{src}\n{program:?}"),
        Err(Error::Parser(e)) => e,
        Err(e) => panic!("Expected a parser error, got: {e}"),
    }
}

/// Parses `var x = <src>` and returns the initializer.
fn parse_expr(src: &str) -> Expr {
    let mut stats = parse_ok(&format!("var x = {src}"));
    match stats.pop() {
        Some(Stat::VarDecl { mut exprs, .. }) if exprs.len() == 1 => exprs.remove(0),
        other => panic!("Expected a single declaration, got {other:?}"),
    }
}

fn int(expr: &Expr) -> i64 {
    match expr {
        Expr::Num { value: NumLiteral::Int(n), .. } => *n,
        other => panic!("Expected an int literal, got {other:?}"),
    }
}

fn binop(expr: &Expr) -> (BinaryOperator, &Expr, &Expr) {
    match expr {
        Expr::BinOp { op, left, right, .. } => (*op, &**left, &**right),
        other => panic!("Expected a binary operation, got {other:?}"),
    }
}

#[test]
fn power_is_right_associative() {
    let expr = parse_expr("2 ** 3 ** 2");
    let (op, left, right) = binop(&expr);
    assert_eq!(op, BinaryOperator::Pow);
    assert_eq!(int(left), 2);
    let (inner, base, exp) = binop(right);
    assert_eq!(inner, BinaryOperator::Pow);
    assert_eq!((int(base), int(exp)), (3, 2));
}

#[test]
fn prefix_minus_applies_to_the_whole_power() {
    let expr = parse_expr("-2 ** 2");
    let Expr::UniOp { op: UnaryOperator::Negate, expr: operand, .. } = &expr else {
        panic!("Expected a negation, got {expr:?}");
    };
    assert_eq!(binop(operand).0, BinaryOperator::Pow);

    let expr = parse_expr("2 ** -1");
    let (_, _, exponent) = binop(&expr);
    assert!(matches!(exponent, Expr::UniOp { op: UnaryOperator::Negate, .. }));
}

#[test]
fn precedence_levels() {
    let expr = parse_expr("1 + 2 * 3");
    let (op, left, right) = binop(&expr);
    assert_eq!(op, BinaryOperator::Add);
    assert_eq!(int(left), 1);
    assert_eq!(binop(right).0, BinaryOperator::Mul);

    let expr = parse_expr("1 | 2 & 3 << 1");
    let (op, _, right) = binop(&expr);
    assert_eq!(op, BinaryOperator::BitOr);
    let (op, _, right) = binop(right);
    assert_eq!(op, BinaryOperator::BitAnd);
    assert_eq!(binop(right).0, BinaryOperator::Shl);

    let expr = parse_expr("a or b and c == d");
    let (op, _, right) = binop(&expr);
    assert_eq!(op, BinaryOperator::Or);
    let (op, _, right) = binop(right);
    assert_eq!(op, BinaryOperator::And);
    assert_eq!(binop(right).0, BinaryOperator::Equal);

    let expr = parse_expr("not x == y");
    let (op, left, _) = binop(&expr);
    assert_eq!(op, BinaryOperator::Equal);
    assert!(matches!(left, Expr::UniOp { op: UnaryOperator::Not, .. }));
}

#[test]
fn comparisons_do_not_chain() {
    let err = parse_err("var b = 1 < 2 < 3");
    assert!(matches!(err, ParserError::InvalidStatement { .. }));

    let err = parse_err("var b = 1 < 2 == true");
    assert!(matches!(err, ParserError::InvalidStatement { .. }), "{err}");
}

#[test]
fn select_nests_to_the_right() {
    let expr = parse_expr("a ? 1 : b ? 2 : 3");
    let Expr::Select { otherwise, .. } = &expr else {
        panic!("Expected a select");
    };
    assert!(matches!(**otherwise, Expr::Select { .. }));
}

#[test]
fn named_functions_desugar_to_constants() {
    let stats = parse_ok("func f(a, ...rest) { return a }");
    let [Stat::VarDecl { names, exprs, constant: true, .. }] = stats.as_slice() else {
        panic!("Expected a constant declaration, got {stats:?}");
    };
    assert_eq!(names[0].identifier, "f");
    let Expr::FuncDef(def) = &exprs[0] else {
        panic!("Expected a function literal");
    };
    assert_eq!(def.params.len(), 1);
    assert_eq!(def.vararg.as_ref().map(|n| n.identifier.as_str()), Some("rest"));
    assert!(matches!(def.body.as_slice(), [Stat::Return { expr: Some(_), .. }]));
}

#[test]
fn vararg_must_be_last() {
    let err = parse_err("func f(...rest, a) {}");
    assert!(matches!(err, ParserError::UnexpectedToken { .. }));
}

#[test]
fn else_becomes_a_true_condition() {
    let stats = parse_ok("if a { } elif b { } else { }");
    let [Stat::If { conds, stats, .. }] = stats.as_slice() else {
        panic!("Expected an if statement");
    };
    assert_eq!(conds.len(), 3);
    assert_eq!(stats.len(), 3);
    assert!(matches!(conds[2], Expr::Bool { value: true, .. }));
}

#[test]
fn assignment_targets_must_be_lvalues() {
    let err = parse_err("f(1) = 2");
    assert!(matches!(err, ParserError::InvalidAssignTarget { .. }));

    let err = parse_err("a, f() = 1, 2");
    assert!(matches!(err, ParserError::InvalidAssignTarget { .. }));

    let err = parse_err("f() += 1");
    assert!(matches!(err, ParserError::InvalidAssignTarget { .. }));

    let stats = parse_ok("a, b[0], c.d = 1, 2, 3");
    let [Stat::Assign { targets, exprs, .. }] = stats.as_slice() else {
        panic!("Expected an assignment");
    };
    assert_eq!(targets.len(), 3);
    assert_eq!(exprs.len(), 3);
}

#[test]
fn bare_expressions_are_not_statements() {
    let err = parse_err("m.y");
    assert_eq!(err, ParserError::NotAStatement { pos: Position::new(1, 2) });

    let err = parse_err("(1)");
    assert!(matches!(err, ParserError::NotAStatement { .. }));

    let err = parse_err("1 + 2");
    assert!(matches!(err, ParserError::InvalidStatement { .. }));
}

#[test]
fn braces_start_blocks_in_statement_position() {
    let stats = parse_ok("{}");
    assert!(matches!(stats.as_slice(), [Stat::Block { stats, .. }] if stats.is_empty()));

    assert!(matches!(parse_expr("{}"), Expr::MapCtor { keys, .. } if keys.is_empty()));
    assert!(matches!(parse_expr("{1: 2, \"a\": 3}"), Expr::MapCtor { keys, .. } if keys.len() == 2));
    assert!(matches!(parse_expr("{1, 2}"), Expr::SetCtor { exprs, .. } if exprs.len() == 2));
}

#[test]
fn trailing_tokens_are_rejected() {
    let err = parse_err("println(1))");
    assert!(matches!(err, ParserError::InvalidStatement { .. }));

    let err = parse_err("}");
    assert!(matches!(err, ParserError::UnexpectedToken { .. }));
}

#[test]
fn return_expression_is_optional() {
    let stats = parse_ok("func f() { return }");
    let [Stat::VarDecl { exprs, .. }] = stats.as_slice() else {
        panic!("Expected a declaration");
    };
    let Expr::FuncDef(def) = &exprs[0] else {
        panic!("Expected a function literal");
    };
    assert!(matches!(def.body.as_slice(), [Stat::Return { expr: None, .. }]));
}

#[test]
fn command_calls_take_an_argument_list() {
    let stats = parse_ok("println 1, x");
    let [Stat::Call { call: Expr::FuncCall { callee, args, pos }, .. }] = stats.as_slice() else {
        panic!("Expected a call, got {stats:?}");
    };
    assert!(matches!(callee.as_ref(), Expr::Name(name) if name.identifier == "println"));
    assert_eq!(args.len(), 2);
    assert_eq!(*pos, Position::new(1, 1));
}

#[test]
fn calls_record_the_paren_position() {
    let stats = parse_ok("foo(1)");
    let [Stat::Call { call: Expr::FuncCall { pos, .. }, .. }] = stats.as_slice() else {
        panic!("Expected a call");
    };
    assert_eq!(*pos, Position::new(1, 4));
}

#[test]
fn dot_access_uses_a_string_key() {
    let stats = parse_ok("a.b.c = 1");
    let [Stat::Assign { targets, .. }] = stats.as_slice() else {
        panic!("Expected an assignment");
    };
    let Expr::Access { expr, key, dot: true, .. } = &targets[0] else {
        panic!("Expected a dot access");
    };
    assert!(matches!(key.as_ref(), Expr::Str { value, .. } if value == "c"));
    assert!(matches!(expr.as_ref(), Expr::Access { dot: true, .. }));
}

#[test]
fn loops_accept_optional_colons() {
    let stats = parse_ok("for i is 1, 10, 2: x = i  for k, v in m { }  while c: break  repeat { } until c");
    assert!(matches!(stats.as_slice(),
                     [Stat::ForLoop { step: Some(_), .. },
                      Stat::ForEach { value: Some(_), .. },
                      Stat::While { .. },
                      Stat::Repeat { .. }]));

    let err = parse_err("for x of y { }");
    assert!(matches!(err, ParserError::UnexpectedToken { .. }));
}

#[test]
fn switch_requires_a_case() {
    let stats = parse_ok("switch x case 1: a = 1 case 2 { } default: a = 0");
    assert!(matches!(stats.as_slice(), [Stat::Switch { cases, default: Some(_), .. }] if cases.len() == 2));

    let err = parse_err("switch x default: a = 0");
    assert!(matches!(err, ParserError::UnexpectedToken { .. }));
}

#[test]
fn semicolons_are_empty_statements() {
    assert_eq!(parse_ok(";;var a = 1;;").len(), 1);
}

#[test]
fn lexer_errors_surface_through_parse() {
    assert!(matches!(parse("var s = 'abc"), Err(Error::Lexer(_))));
}
