//! ECMAScript 2020 lexer and parser.
//!
//! The crate parses the module goal of ES2020 into a typed AST annotated
//! with lexical-scope information: every identifier resolves to an entry
//! in a per-AST variable table, `var`/`function` declarations hoist to
//! their function scope, and forward references merge with the
//! declarations that satisfy them. The AST can be re-emitted as
//! JavaScript, and a restricted value subset as JSON.
//!
//! ```
//! let ast = esparse::parse("let x = 5\nconst y = 6").unwrap();
//! assert_eq!(ast.to_js_string(), "let x = 5;\nconst y = 6;");
//! ```
//!
//! The lexer can also be driven directly; it emits whitespace and comment
//! tokens too, so the token slices concatenate back to the input:
//!
//! ```
//! use esparse::{Lexer, TokenType};
//! let mut lexer = Lexer::new("a / b");
//! assert_eq!(lexer.next().0, TokenType::Identifier);
//! ```

pub mod ast;
pub mod error;
pub mod json;
pub mod keywords;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod scope;
pub mod source;
pub mod style;
pub mod token;
pub mod unicode;
pub mod visitor;

#[cfg(all(not(target_arch = "wasm32"), feature = "cli"))]
pub mod cli;

pub use ast::{Ast, DeclKind, Var, VarRef, VarTable};
pub use error::{ParseError, ParseErrorKind};
pub use json::JsonError;
pub use lexer::Lexer;
pub use parser::{parse, Parser};
pub use scope::{Scope, ScopeId, ScopeStack, ScopeTable};
pub use token::{Span, TokenType};
pub use visitor::{
    walk_binding, walk_binding_mut, walk_expr, walk_expr_mut, walk_stmt, walk_stmt_mut,
    Visitor, VisitorMut,
};

/// Runs the lexer over the whole input, regular expressions excluded
/// (`/` always lexes as division here). Whitespace and comments are
/// included, so the slices concatenate to the input.
pub fn tokenize(input: &str) -> Vec<(TokenType, &str)> {
    let mut lexer = Lexer::new(input);
    let mut out = Vec::new();
    loop {
        let (tt, data) = lexer.next();
        if tt == TokenType::Eof || tt == TokenType::Error {
            break;
        }
        out.push((tt, data));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_module() {
        let ast = parse("").unwrap();
        assert!(ast.body.is_empty());
        assert!(ast.comment.is_none());
    }

    #[test]
    fn tokenize_concatenates_to_input() {
        let input = "let x = 1; // done";
        let joined: String = tokenize(input).iter().map(|(_, s)| *s).collect();
        assert_eq!(joined, input);
    }

    #[test]
    fn leading_comment_is_kept() {
        let ast = parse("// license\nlet a = 1;").unwrap();
        assert_eq!(ast.comment, Some("// license"));
        assert!(ast.to_js_string().starts_with("// license\n"));
    }

    #[test]
    fn parse_error_carries_offset() {
        let err = parse("let x = ;").unwrap_err();
        assert!(err.offset() > 0);
        let msg = err.to_string();
        assert!(
            msg.starts_with("unexpected") || msg.starts_with("expected"),
            "{}",
            msg
        );
    }
}
