//! Scope resolution over whole programs: hoisting, forward references,
//! and the variable-table invariants.

use esparse::ast::{Ast, DeclKind};
use esparse::parse;

/// All canonical variables with the given name: (kind, use count).
fn vars_named(ast: &Ast<'_>, name: &str) -> Vec<(DeclKind, u32)> {
    ast.vars
        .iter()
        .filter(|v| v.name == name && v.link.is_none())
        .map(|v| (v.decl, v.uses))
        .collect()
}

#[test]
fn block_let_shadows_outer_var() {
    // var a; { let a = 1; var b = a; }
    let ast = parse("var a; { let a = 1; var b = a; }").unwrap();
    let a_vars = vars_named(&ast, "a");
    assert_eq!(a_vars.len(), 2, "two distinct 'a' variables: {:?}", a_vars);
    assert!(
        a_vars.contains(&(DeclKind::VariableDecl, 1)),
        "outer a: var with one use (its declaration): {:?}",
        a_vars
    );
    assert!(
        a_vars.contains(&(DeclKind::LexicalDecl, 2)),
        "inner a: let with two uses (declaration and read): {:?}",
        a_vars
    );
}

#[test]
fn undeclared_use_merges_with_later_var() {
    // { a = 5 } var a — both occurrences are the same variable.
    let ast = parse("{ a = 5 } var a").unwrap();
    let a_vars = vars_named(&ast, "a");
    assert_eq!(a_vars.len(), 1, "one canonical 'a': {:?}", a_vars);
    assert_eq!(a_vars[0].0, DeclKind::VariableDecl);
    assert_eq!(a_vars[0].1, 2, "use inside the block plus the declaration");
}

#[test]
fn function_hoisting_links_earlier_call() {
    let ast = parse("f(); function f() {}").unwrap();
    let f_vars = vars_named(&ast, "f");
    assert_eq!(f_vars.len(), 1, "{:?}", f_vars);
    assert_eq!(f_vars[0].0, DeclKind::FunctionDecl);
    assert_eq!(f_vars[0].1, 2);
}

#[test]
fn argument_initializer_use_stays_outer() {
    // function f(a = b) { var b } — the two `b`s are different variables.
    let ast = parse("function f(a = b) { var b }").unwrap();
    let b_vars = vars_named(&ast, "b");
    assert_eq!(b_vars.len(), 2, "{:?}", b_vars);
    let kinds: Vec<DeclKind> = b_vars.iter().map(|(k, _)| *k).collect();
    assert!(kinds.contains(&DeclKind::NoDecl), "{:?}", kinds);
    assert!(kinds.contains(&DeclKind::VariableDecl), "{:?}", kinds);
}

#[test]
fn arrow_parameters_are_arguments() {
    let ast = parse("([{a: [b, {c = 1}]}, ...rest]) => b + c + rest;").unwrap();
    for name in ["b", "c", "rest"] {
        let vars = vars_named(&ast, name);
        assert_eq!(vars.len(), 1, "{}: {:?}", name, vars);
        assert_eq!(vars[0].0, DeclKind::ArgumentDecl, "{}", name);
        assert_eq!(vars[0].1, 2, "{}: declaration plus body use", name);
    }
}

#[test]
fn arrow_default_resolves_in_enclosing_scope() {
    // The default for `b` reads `outer` from the surrounding scope.
    let ast = parse("let outer = 1; (b = outer) => b;").unwrap();
    let outer = vars_named(&ast, "outer");
    assert_eq!(outer.len(), 1, "{:?}", outer);
    assert_eq!(outer[0].0, DeclKind::LexicalDecl);
    assert_eq!(outer[0].1, 2);
}

#[test]
fn failed_arrow_cover_returns_uses_to_parent() {
    let ast = parse("let a = 1; x = (a + 2);").unwrap();
    let a_vars = vars_named(&ast, "a");
    assert_eq!(a_vars.len(), 1, "{:?}", a_vars);
    assert_eq!(a_vars[0].0, DeclKind::LexicalDecl);
    assert_eq!(a_vars[0].1, 2);
}

#[test]
fn template_substitution_uses_enclosing_scope() {
    let ast = parse("x = `foo${y + z}bar`;").unwrap();
    for name in ["y", "z"] {
        let vars = vars_named(&ast, name);
        assert_eq!(vars.len(), 1, "{}: {:?}", name, vars);
        assert_eq!(vars[0].0, DeclKind::NoDecl, "{}", name);
    }
}

#[test]
fn function_expression_name_is_local_to_its_body() {
    let ast = parse("x = function f() { return f; };").unwrap();
    let f_vars = vars_named(&ast, "f");
    assert_eq!(f_vars.len(), 1, "{:?}", f_vars);
    assert_eq!(f_vars[0].0, DeclKind::ExprDecl);
    // The name is not visible outside.
    let ast = parse("x = function f() {}; f;").unwrap();
    let f_vars = vars_named(&ast, "f");
    assert_eq!(f_vars.len(), 2, "inner name and outer free use: {:?}", f_vars);
}

#[test]
fn catch_binding_is_its_own_kind() {
    let ast = parse("try { f(); } catch (e) { g(e); }").unwrap();
    let e_vars = vars_named(&ast, "e");
    assert_eq!(e_vars.len(), 1, "{:?}", e_vars);
    assert_eq!(e_vars[0].0, DeclKind::CatchDecl);
}

#[test]
fn link_chains_terminate_at_canonical_entries() {
    let ast = parse(
        "var a; { let a = 1; var b = a; } f(); function f(x = y) { var y; return x + z; }",
    )
    .unwrap();
    for v in ast.vars.iter() {
        if let Some(link) = v.link {
            // `canonical` follows the chain; the entry it lands on is final.
            assert!(ast.vars.canonical(link).link.is_none());
        }
    }
}

#[test]
fn non_global_scopes_hold_no_unresolved_names() {
    let ast = parse(
        "function outer() { let a = 1; { b = a; console.log(b); } var b; } outer();",
    )
    .unwrap();
    let global = ast.global_scope();
    for scope in ast.scopes.iter() {
        if scope.is_global {
            continue;
        }
        for &u in &scope.undeclared {
            let canon = ast.vars.canonical(u);
            let resolved = ast.vars.resolve(u);
            let in_global = ast
                .scopes
                .get(global)
                .undeclared
                .iter()
                .any(|&g| ast.vars.resolve(g) == resolved);
            assert!(
                canon.decl != DeclKind::NoDecl || in_global,
                "unresolved '{}' stuck in a non-global scope",
                canon.name
            );
        }
    }
}

#[test]
fn declared_and_undeclared_are_disjoint_per_scope() {
    let ast = parse(
        "var a; function f(p) { let q = p + a; { var r = q; } return r; } f(1);",
    )
    .unwrap();
    for scope in ast.scopes.iter() {
        for &d in &scope.declared {
            let d_name = ast.vars.get(d).name;
            for &u in &scope.undeclared {
                assert_ne!(
                    d_name,
                    ast.vars.get(u).name,
                    "'{}' appears as both declared and undeclared in one scope",
                    d_name
                );
            }
        }
    }
}

#[test]
fn with_statement_marks_enclosing_scopes() {
    let ast = parse("function f(o) { with (o) { g(); } }").unwrap();
    assert!(ast.scopes.iter().any(|s| s.has_with));
}
