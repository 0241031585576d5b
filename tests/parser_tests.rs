//! Parser behaviour: statement forms, expression precedence, and the
//! grammar's ambiguity hot spots.

use esparse::ast::{ArrowBody, Binding, Expr, Stmt};
use esparse::{parse, TokenType};

fn reprint(src: &str) -> String {
    parse(src)
        .unwrap_or_else(|e| panic!("parse of {:?} failed: {}", src, e))
        .to_js_string()
}

#[test]
fn empty_input_is_an_empty_module() {
    let ast = parse("").unwrap();
    assert!(ast.body.is_empty());
}

#[test]
fn exponentiation_is_right_associative() {
    let ast = parse("x = a ** b ** c;").unwrap();
    let js = ast.to_js_string();
    assert_eq!(js, "x = a ** b ** c;");
    // The tree shape: a ** (b ** c).
    match &ast.body[0] {
        Stmt::Expr(Expr::Binary { right, .. }) => match right.as_ref() {
            Expr::Binary {
                op: TokenType::Exp,
                right,
                ..
            } => {
                assert!(matches!(right.as_ref(), Expr::Binary { op: TokenType::Exp, .. }));
            }
            other => panic!("expected ** at the top of the rhs, got {:?}", other),
        },
        other => panic!("expected an assignment, got {:?}", other),
    }
}

#[test]
fn assignment_chains_are_right_associative() {
    assert_eq!(reprint("a = b = c"), "a = b = c;");
    let ast = parse("a = b = c").unwrap();
    match &ast.body[0] {
        Stmt::Expr(Expr::Binary { op, right, .. }) => {
            assert_eq!(*op, TokenType::Eq);
            assert!(matches!(right.as_ref(), Expr::Binary { op: TokenType::Eq, .. }));
        }
        other => panic!("unexpected statement {:?}", other),
    }
}

#[test]
fn coalesce_mixed_with_logical_is_rejected() {
    assert!(parse("a ?? b || c").is_err());
    assert!(parse("a && b ?? c").is_err());
    assert!(parse("(a ?? b) || c").is_ok());
    assert!(parse("a ?? (b || c)").is_ok());
    assert!(parse("a ?? b ?? c").is_ok());
}

#[test]
fn in_operator_excluded_in_for_header() {
    let ast = parse("for (a in b) c();").unwrap();
    assert!(matches!(ast.body[0], Stmt::ForIn { .. }));
    // Outside a for header, `in` is an ordinary comparison.
    let ast = parse("x = a in b;").unwrap();
    match &ast.body[0] {
        Stmt::Expr(Expr::Binary { right, .. }) => {
            assert!(matches!(right.as_ref(), Expr::Binary { op: TokenType::In, .. }));
        }
        other => panic!("unexpected statement {:?}", other),
    }
}

#[test]
fn division_after_value_regexp_after_operator() {
    // After an identifier the slash divides.
    let ast = parse("x = a / b / c;").unwrap();
    match &ast.body[0] {
        Stmt::Expr(Expr::Binary { right, .. }) => {
            assert!(matches!(right.as_ref(), Expr::Binary { op: TokenType::Div, .. }));
        }
        other => panic!("unexpected statement {:?}", other),
    }
    // After `=` it is a regular expression.
    let ast = parse("x = /ab/g;").unwrap();
    match &ast.body[0] {
        Stmt::Expr(Expr::Binary { right, .. }) => match right.as_ref() {
            Expr::Literal { tt, text } => {
                assert_eq!(*tt, TokenType::Regexp);
                assert_eq!(*text, "/ab/g");
            }
            other => panic!("expected a regexp literal, got {:?}", other),
        },
        other => panic!("unexpected statement {:?}", other),
    }
}

#[test]
fn regexp_positions_from_the_statement_level() {
    for src in [
        "x = /a/;",
        "f(/a/, /b/);",
        "!/a/.test(s);",
        "typeof /a/;",
        "b ? /a/ : /b/;",
        "x = {k: /a/};",
        "x = [/a/];",
    ] {
        assert!(parse(src).is_ok(), "{:?} should parse", src);
    }
}

#[test]
fn yield_inside_generator_only() {
    // Inside a generator, `yield * 2` is a delegating yield of 2.
    let ast = parse("function*g(){ yield * 2 }").unwrap();
    match &ast.body[0] {
        Stmt::Func(func) => match &func.body.list[0] {
            Stmt::Expr(Expr::Yield { star, operand }) => {
                assert!(*star);
                assert!(operand.is_some());
            }
            other => panic!("expected a yield expression, got {:?}", other),
        },
        other => panic!("expected a function, got {:?}", other),
    }
    // Outside, `yield` is an identifier and `*` multiplies.
    let ast = parse("function f(){ return yield * 2 }").unwrap();
    match &ast.body[0] {
        Stmt::Func(func) => match &func.body.list[0] {
            Stmt::Return { value: Some(Expr::Binary { op, .. }) } => {
                assert_eq!(*op, TokenType::Mul);
            }
            other => panic!("expected a multiplication, got {:?}", other),
        },
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn arrow_with_destructured_parameter() {
    let ast = parse("([{a: [b, {c = 1}]}, ...rest]) => b + c + rest;").unwrap();
    match &ast.body[0] {
        Stmt::Expr(Expr::Arrow(arrow)) => {
            assert_eq!(arrow.params.list.len(), 1);
            assert!(matches!(
                arrow.params.list[0].binding,
                Binding::Array { .. }
            ));
            assert!(matches!(arrow.body, ArrowBody::Expr(_)));
        }
        other => panic!("expected an arrow function, got {:?}", other),
    }
}

#[test]
fn parenthesized_expression_is_not_an_arrow() {
    let ast = parse("x = (a, b);").unwrap();
    match &ast.body[0] {
        Stmt::Expr(Expr::Binary { right, .. }) => match right.as_ref() {
            Expr::Group(inner) => assert!(matches!(inner.as_ref(), Expr::Comma(_))),
            other => panic!("expected a parenthesized comma, got {:?}", other),
        },
        other => panic!("unexpected statement {:?}", other),
    }
}

#[test]
fn async_disambiguation() {
    // async arrow
    assert!(matches!(
        parse("async (a) => a;").unwrap().body[0],
        Stmt::Expr(Expr::Arrow(_))
    ));
    assert!(matches!(
        parse("async a => a;").unwrap().body[0],
        Stmt::Expr(Expr::Arrow(_))
    ));
    // a call of the identifier `async`
    assert!(matches!(
        parse("async(a);").unwrap().body[0],
        Stmt::Expr(Expr::Call { .. })
    ));
    // `async` alone is an identifier
    assert!(matches!(
        parse("x = async;").unwrap().body[0],
        Stmt::Expr(Expr::Binary { .. })
    ));
    // async function declaration
    assert!(matches!(
        parse("async function f() {}").unwrap().body[0],
        Stmt::Func(_)
    ));
}

#[test]
fn template_with_substitutions() {
    let ast = parse("x = `foo${y + z}bar`;").unwrap();
    match &ast.body[0] {
        Stmt::Expr(Expr::Binary { right, .. }) => match right.as_ref() {
            Expr::Template(lit) => {
                assert_eq!(lit.parts.len(), 1);
                assert_eq!(lit.parts[0].text, "`foo${");
                assert_eq!(lit.tail, "}bar`");
                assert!(lit.tag.is_none());
            }
            other => panic!("expected a template, got {:?}", other),
        },
        other => panic!("unexpected statement {:?}", other),
    }
}

#[test]
fn new_without_arguments_keeps_null_argument_list() {
    let ast = parse("x = new F;").unwrap();
    match &ast.body[0] {
        Stmt::Expr(Expr::Binary { right, .. }) => match right.as_ref() {
            Expr::New { args, .. } => assert!(args.is_none()),
            other => panic!("expected new, got {:?}", other),
        },
        other => panic!("unexpected statement {:?}", other),
    }
    let ast = parse("x = new F();").unwrap();
    match &ast.body[0] {
        Stmt::Expr(Expr::Binary { right, .. }) => match right.as_ref() {
            Expr::New { args, .. } => assert_eq!(args.as_ref().unwrap().len(), 0),
            other => panic!("expected new, got {:?}", other),
        },
        other => panic!("unexpected statement {:?}", other),
    }
}

#[test]
fn optional_chain_forms() {
    for src in ["a?.b;", "a?.[b];", "a?.(b);", "a?.b?.c;"] {
        assert!(parse(src).is_ok(), "{:?} should parse", src);
    }
}

#[test]
fn optional_chain_at_eof_is_an_error() {
    let err = parse("a?.b?.").unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("expected"), "{}", msg);
    assert!(msg.contains("identifier"), "{}", msg);
    assert!(msg.contains("template"), "{}", msg);
}

#[test]
fn duplicate_lexical_declaration_is_an_error() {
    let err = parse("let a; let a;").unwrap_err();
    assert!(err.to_string().contains("already been declared"), "{}", err);
    assert!(parse("var a; var a;").is_ok());
    assert!(parse("let a; var a;").is_err());
    assert!(parse("var a; let a;").is_err());
}

#[test]
fn unterminated_string_is_a_lexical_error() {
    let err = parse("'abc").unwrap_err();
    assert!(err.to_string().contains("string"), "{}", err);
}

#[test]
fn duplicate_export_is_rejected() {
    assert!(parse("export const a = 1; export {a};").is_err());
    assert!(parse("export {a as b, c as b} from 'm';").is_err());
    assert!(parse("export const a = 1; export {b};").is_ok());
}

#[test]
fn import_forms() {
    for src in [
        "import 'm';",
        "import d from 'm';",
        "import * as ns from 'm';",
        "import {a, b as c} from 'm';",
        "import d, {a} from 'm';",
        "import d, * as ns from 'm';",
        "x = import('m');",
        "x = import.meta.url;",
    ] {
        assert!(parse(src).is_ok(), "{:?} should parse", src);
    }
}

#[test]
fn top_level_await_is_an_expression() {
    let ast = parse("await f();").unwrap();
    match &ast.body[0] {
        Stmt::Expr(Expr::Unary { op, .. }) => assert_eq!(*op, TokenType::Await),
        other => panic!("expected await, got {:?}", other),
    }
    // Inside a plain function, `await` is an identifier.
    assert!(parse("function f(){ var await = 1; return await; }").is_ok());
}

#[test]
fn labelled_statements_and_branches() {
    let ast = parse("outer: for (;;) { break outer; continue outer; }").unwrap();
    assert!(matches!(ast.body[0], Stmt::Labelled { label: "outer", .. }));
}

#[test]
fn statement_forms_parse() {
    for src in [
        "with (o) { x = 1; }",
        "switch (x) { case 1: a(); break; default: b(); }",
        "try { f(); } catch { g(); } finally { h(); }",
        "try { f(); } catch (e) { g(e); }",
        "do f(); while (x);",
        "debugger;",
        "class A extends B { constructor() {} static get x() {} *gen() {} }",
        "for await (const x of xs) f(x);",
        "label: ;",
    ] {
        assert!(parse(src).is_ok(), "{:?} should parse", src);
    }
}
