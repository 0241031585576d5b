//! Automatic semicolon insertion.

use esparse::ast::{Expr, Stmt};
use esparse::{parse, TokenType};

#[test]
fn newline_separates_declarations() {
    let ast = parse("let x = 5\nconst y = 6").unwrap();
    assert_eq!(ast.body.len(), 2);
    assert!(matches!(&ast.body[0], Stmt::Var(d) if d.tt == TokenType::Let));
    assert!(matches!(&ast.body[1], Stmt::Var(d) if d.tt == TokenType::Const));
    assert_eq!(ast.to_js_string(), "let x = 5;\nconst y = 6;");
}

#[test]
fn missing_semicolon_without_newline_is_an_error() {
    assert!(parse("let x = 5 const y = 6").is_err());
}

#[test]
fn close_brace_and_eof_satisfy_the_rule() {
    assert!(parse("{ a = 1 }").is_ok());
    assert!(parse("a = 1").is_ok());
}

#[test]
fn return_with_newline_returns_nothing() {
    let ast = parse("function f() { return\na }").unwrap();
    match &ast.body[0] {
        Stmt::Func(func) => {
            assert_eq!(func.body.list.len(), 2);
            assert!(matches!(&func.body.list[0], Stmt::Return { value: None }));
            assert!(matches!(&func.body.list[1], Stmt::Expr(Expr::Var(_))));
        }
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn postfix_update_does_not_cross_a_newline() {
    let ast = parse("a\n++b").unwrap();
    assert_eq!(ast.body.len(), 2);
    assert!(matches!(&ast.body[0], Stmt::Expr(Expr::Var(_))));
    match &ast.body[1] {
        Stmt::Expr(Expr::Unary { op, .. }) => assert_eq!(*op, TokenType::PreIncr),
        other => panic!("expected a prefix increment, got {:?}", other),
    }
    // On one line it is a postfix update.
    let ast = parse("a++").unwrap();
    match &ast.body[0] {
        Stmt::Expr(Expr::Unary { op, .. }) => assert_eq!(*op, TokenType::PostIncr),
        other => panic!("expected a postfix increment, got {:?}", other),
    }
}

#[test]
fn break_label_must_share_the_line() {
    let ast = parse("x: while (a) { break\nx }").unwrap();
    match &ast.body[0] {
        Stmt::Labelled { body, .. } => match body.as_ref() {
            Stmt::While { body, .. } => match body.as_ref() {
                Stmt::Block(block) => {
                    assert_eq!(block.list.len(), 2);
                    assert!(
                        matches!(&block.list[0], Stmt::Branch { label: None, .. }),
                        "the newline detaches the label"
                    );
                }
                other => panic!("expected a block, got {:?}", other),
            },
            other => panic!("expected a while, got {:?}", other),
        },
        other => panic!("expected a label, got {:?}", other),
    }
}

#[test]
fn throw_with_newline_is_an_error() {
    assert!(parse("throw\nnew Error()").is_err());
    assert!(parse("throw new Error()").is_ok());
}

#[test]
fn multi_line_comment_counts_as_line_terminator() {
    let ast = parse("function f() { return /* a\nb */ c }").unwrap();
    match &ast.body[0] {
        Stmt::Func(func) => {
            assert!(matches!(&func.body.list[0], Stmt::Return { value: None }));
        }
        other => panic!("expected a function, got {:?}", other),
    }
    // Without the embedded newline, the comment changes nothing.
    let ast = parse("function f() { return /* a b */ c }").unwrap();
    match &ast.body[0] {
        Stmt::Func(func) => {
            assert!(matches!(&func.body.list[0], Stmt::Return { value: Some(_) }));
        }
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn async_function_requires_same_line() {
    // `async` followed by a newline is just an identifier statement.
    let ast = parse("async\nfunction f() {}").unwrap();
    assert_eq!(ast.body.len(), 2);
    assert!(matches!(&ast.body[0], Stmt::Expr(Expr::Var(_))));
    assert!(matches!(&ast.body[1], Stmt::Func(_)));
}

#[test]
fn insertion_never_rewrites_a_valid_program() {
    // `a + \n b` continues across the newline: no semicolon is inserted
    // where a continuation is possible.
    let ast = parse("a +\nb").unwrap();
    assert_eq!(ast.body.len(), 1);
    assert!(matches!(
        &ast.body[0],
        Stmt::Expr(Expr::Binary { op: TokenType::Add, .. })
    ));
}
