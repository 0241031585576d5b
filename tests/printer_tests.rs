//! The printed source must parse back to the same printed source.

use esparse::parse;

/// `print(parse(print(parse(src))))` is a fixed point.
fn assert_stable(src: &str) {
    let ast = parse(src).unwrap_or_else(|e| panic!("parse of {:?} failed: {}", src, e));
    let printed = ast.to_js_string();
    let reparsed = parse(&printed)
        .unwrap_or_else(|e| panic!("reparse of {:?} failed: {}", printed, e));
    assert_eq!(
        printed,
        reparsed.to_js_string(),
        "printing is not a fixed point for {:?}",
        src
    );
}

#[test]
fn statements_round_trip() {
    for src in [
        "var a = 1, b = [2, 3];",
        "if (a) b(); else { c(); }",
        "do f(); while (x)",
        "while (i < 10) i++;",
        "for (let i = 0; i < n; i++) { sum += i; }",
        "for (const [k, v] of pairs) use(k, v);",
        "for (p in obj) visit(p);",
        "switch (x) { case 1: a(); break; default: b(); }",
        "try { f(); } catch (e) { g(e); } finally { done(); }",
        "outer: for (;;) { continue outer; }",
        "with (o) x = 1;",
        "throw new Error('nope');",
        "debugger;",
        "'use strict';\nlet x = 1;",
    ] {
        assert_stable(src);
    }
}

#[test]
fn expressions_round_trip() {
    for src in [
        "x = a + b * c ** d;",
        "x = (a + b) * c;",
        "x = a ?? (b || c);",
        "x = cond ? t : f;",
        "x = {a: 1, 'b': 2, [c]: 3, d, ...rest};",
        "x = [1, , 3, ...more];",
        "x = f(a, ...args)?.prop?.[i];",
        "x = new Map([[1, 'one']]);",
        "x = `a${b}c${d}e`;",
        "x = tag`body`;",
        "x = function named() { return named; };",
        "x = class Named extends Base { m() {} };",
        "x = (a, b) => a + b;",
        "x = async (a) => await a;",
        "x = /[a-z/]+/g.test(s);",
        "x = typeof a === 'string';",
        "x = void 0;",
        "x = -(-a);",
        "delete obj.prop;",
        "a, b = 2, c();",
    ] {
        assert_stable(src);
    }
}

#[test]
fn functions_and_modules_round_trip() {
    for src in [
        "function f(a, b = 1, ...rest) { return rest.length + a + b; }",
        "async function g() { for await (const x of xs) use(x); }",
        "function* h() { yield; yield* inner(); }",
        "class C { constructor(x) { this.x = x; } get x2() { return this.x * 2; } static make() { return new C(0); } }",
        "import d, {a as b} from 'mod';\nexport {b as c};",
        "import * as ns from 'mod';\nexport * from 'other';",
        "export default function () {}",
        "export const answer = 42;",
        "import.meta.url;",
    ] {
        assert_stable(src);
    }
}

#[test]
fn dot_on_integer_literal_is_parenthesized() {
    let printed = parse("x = 5 .toString();").unwrap().to_js_string();
    assert!(
        printed.contains("(5)."),
        "integer member access must be parenthesized: {}",
        printed
    );
    assert_stable("x = 5 .toString();");
    // Decimals already contain a dot and stay bare.
    let printed = parse("x = 5.0.toString();").unwrap().to_js_string();
    assert!(printed.contains("5.0."), "{}", printed);
}

#[test]
fn nested_signs_keep_their_space() {
    let printed = parse("x = a + +b;").unwrap().to_js_string();
    assert!(printed.contains("+ +"), "{}", printed);
    assert_stable("x = a + +b;");
    let printed = parse("x = - -a;").unwrap().to_js_string();
    assert!(printed.contains("- -"), "{}", printed);
    assert_stable("x = - -a;");
    assert_stable("x = -(-a);");
}

#[test]
fn arrow_body_shape_is_preserved() {
    let printed = parse("f = (x) => x + 1;").unwrap().to_js_string();
    assert!(!printed.contains('{'), "expression body stays bare: {}", printed);
    let printed = parse("f = (x) => { return x + 1; };").unwrap().to_js_string();
    assert!(printed.contains('{'), "block body keeps its braces: {}", printed);
    assert_stable("f = (x) => { return x + 1; };");
}

#[test]
fn trailing_elision_survives() {
    assert_stable("x = [1, , ];");
    assert_stable("x = [, ];");
    assert_stable("var [a, , b] = xs;");
}

#[test]
fn whole_program_round_trip() {
    let src = r#"// demo program
'use strict';
import {readFile} from 'fs';

const cache = new Map();

async function load(name, fallback = null) {
    if (cache.has(name)) {
        return cache.get(name);
    }
    try {
        const text = await readFile(name, 'utf8');
        cache.set(name, text);
        return text;
    } catch (err) {
        console.warn(`missing ${name}`);
        return fallback;
    }
}

export class Loader {
    constructor(base) {
        this.base = base;
    }
    async load(name) {
        return load(`${this.base}/${name}`);
    }
}

export default load;
"#;
    assert_stable(src);
}
