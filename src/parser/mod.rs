//! Recursive-descent parser for the ES2020 module goal.
//!
//! The parser pulls tokens from the lexer one at a time, keeping exactly
//! one token of lookahead plus a flag recording whether a line terminator
//! (or a multi-line comment) preceded it — that flag is all automatic
//! semicolon insertion needs. Statement and declaration parsing live in
//! [`StmtParsing`], the Pratt expression parser in [`ExprParsing`],
//! binding patterns in [`BindingParsing`], and functions, classes, and
//! methods in [`FuncParsing`]; all four traits are implemented on
//! [`Parser`].
//!
//! Scope bookkeeping happens while parsing: the parser owns a
//! [`ScopeStack`] and calls into it at every declaration and identifier
//! use. When parsing ends, the scope and variable tables move into the
//! finished [`Ast`].

mod binding;
mod expr;
mod func;
mod stmt;

pub use binding::BindingParsing;
pub use expr::ExprParsing;
pub use func::FuncParsing;
pub use stmt::StmtParsing;

use crate::ast::Ast;
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::Lexer;
use crate::scope::ScopeStack;
use crate::token::{Span, TokenType};

pub type ParseResult<T> = Result<T, ParseError>;

/// Binding strengths for the Pratt expression parser, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OpPrec {
    /// Comma sequences.
    Expr,
    Assign,
    Coalesce,
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Equals,
    Compare,
    Shift,
    Add,
    Mul,
    Exp,
    Unary,
    Update,
    /// Left-hand-side expressions (`extends`, for-in/of targets).
    Lhs,
    /// Calls, optional chains, tagged templates.
    Call,
    /// Property access and indexing; also `new` callees.
    Member,
}

pub struct Parser<'s> {
    pub(crate) lexer: Lexer<'s>,
    pub(crate) source: &'s str,
    /// Current token.
    pub(crate) tt: TokenType,
    pub(crate) data: &'s str,
    /// Byte offset where the current token starts.
    pub(crate) offset: usize,
    /// A line terminator (or multi-line comment) preceded the current
    /// token.
    pub(crate) prev_lt: bool,
    /// Leading file comment, captured before the first real token.
    pub(crate) comment: Option<&'s str>,
    /// Inside a `for` header: the `in` operator belongs to the statement.
    pub(crate) in_for_init: bool,
    /// `await` is an expression here. True at module top level.
    pub(crate) is_async: bool,
    /// `yield` is an expression here.
    pub(crate) is_generator: bool,
    pub(crate) scope: ScopeStack<'s>,
    /// Names already exported by this module.
    pub(crate) exported: Vec<&'s str>,
}

impl<'s> Parser<'s> {
    pub fn new(source: &'s str) -> Self {
        let mut p = Parser {
            lexer: Lexer::new(source),
            source,
            tt: TokenType::Eof,
            data: "",
            offset: 0,
            prev_lt: false,
            comment: None,
            in_for_init: false,
            is_async: true,
            is_generator: false,
            scope: ScopeStack::new(),
            exported: Vec::new(),
        };
        p.advance_first();
        p
    }

    /// Parses the whole module.
    pub fn parse_module(mut self) -> Result<Ast<'s>, ParseError> {
        let body = self.parse_stmt_list_until(TokenType::Eof)?;
        if let Some(err) = self.lexer.err() {
            return Err(err.clone());
        }
        Ok(Ast {
            source: self.source,
            comment: self.comment,
            body,
            scopes: self.scope.scopes,
            vars: self.scope.vars,
        })
    }

    /// Initial token load; also captures a leading file comment.
    fn advance_first(&mut self) {
        loop {
            let start = self.lexer.offset();
            let (tt, data) = self.lexer.next();
            match tt {
                TokenType::Whitespace | TokenType::LineTerminator => continue,
                TokenType::Comment | TokenType::CommentLineTerminator
                    if self.comment.is_none() =>
                {
                    self.comment = Some(data);
                    continue;
                }
                TokenType::Comment | TokenType::CommentLineTerminator => continue,
                _ => {
                    self.tt = tt;
                    self.data = data;
                    self.offset = start;
                    break;
                }
            }
        }
    }

    /// Advances to the next significant token, noting line terminators in
    /// between.
    pub(crate) fn next(&mut self) {
        self.prev_lt = false;
        loop {
            let start = self.lexer.offset();
            let (tt, data) = self.lexer.next();
            match tt {
                TokenType::Whitespace | TokenType::Comment => continue,
                TokenType::LineTerminator | TokenType::CommentLineTerminator => {
                    self.prev_lt = true;
                    continue;
                }
                _ => {
                    self.tt = tt;
                    self.data = data;
                    self.offset = start;
                    return;
                }
            }
        }
    }

    /// Re-lexes a `/` or `/=` token as a regular expression literal; called
    /// wherever an expression may begin.
    pub(crate) fn rescan_regexp(&mut self) {
        if self.tt == TokenType::Div || self.tt == TokenType::DivEq {
            let (tt, data) = self.lexer.rescan_as_regexp();
            self.tt = tt;
            self.data = data;
        }
    }

    pub(crate) fn span(&self) -> Span {
        Span::new(self.offset, self.offset + self.data.len().max(1))
    }

    /// Consumes the current token if it matches.
    pub(crate) fn eat(&mut self, tt: TokenType) -> bool {
        if self.tt == tt {
            self.next();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, tt: TokenType, context: &'static str) -> ParseResult<()> {
        if self.tt == tt {
            self.next();
            Ok(())
        } else {
            Err(self.fail_expected(context, &[tt.as_str()]))
        }
    }

    /// Human description of the current token for error messages.
    pub(crate) fn describe(&self) -> String {
        match self.tt {
            TokenType::Eof => "end of input".to_string(),
            TokenType::Error => "error".to_string(),
            TokenType::Identifier => format!("identifier '{}'", self.data),
            tt if tt.is_numeric() => format!("number '{}'", self.data),
            TokenType::String => format!("string {}", self.data),
            tt => format!("'{}'", tt.as_str()),
        }
    }

    /// A lexical error outranks the parser's own complaint.
    fn lexer_error(&self) -> Option<ParseError> {
        self.lexer.err().cloned()
    }

    pub(crate) fn fail_expected(
        &mut self,
        context: &'static str,
        expected: &[&'static str],
    ) -> ParseError {
        if let Some(err) = self.lexer_error() {
            return err;
        }
        ParseError::new(
            ParseErrorKind::Expected {
                expected: expected.to_vec(),
                found: self.describe(),
                context,
            },
            self.span(),
        )
    }

    pub(crate) fn fail_unexpected(&mut self, context: &'static str) -> ParseError {
        if let Some(err) = self.lexer_error() {
            return err;
        }
        ParseError::new(
            ParseErrorKind::Unexpected {
                found: self.describe(),
                context,
            },
            self.span(),
        )
    }

    pub(crate) fn fail_duplicate(&self, name: &str) -> ParseError {
        ParseError::new(
            ParseErrorKind::DuplicateDeclaration {
                name: name.to_string(),
            },
            self.span(),
        )
    }

    /// Automatic semicolon insertion: a `;` is consumed; `}` and end of
    /// input satisfy the rule without being consumed; otherwise a preceding
    /// line terminator stands in for the semicolon.
    pub(crate) fn accept_semicolon(&mut self, context: &'static str) -> ParseResult<()> {
        match self.tt {
            TokenType::Semicolon => {
                self.next();
                Ok(())
            }
            TokenType::CloseBrace | TokenType::Eof => Ok(()),
            _ if self.prev_lt => Ok(()),
            _ => Err(self.fail_expected(context, &[";"])),
        }
    }

    /// The current token can serve as a binding identifier: a plain
    /// identifier, a contextual keyword, or `yield`/`await` outside their
    /// expression contexts.
    pub(crate) fn is_binding_ident(&self) -> bool {
        match self.tt {
            TokenType::Identifier => true,
            TokenType::Yield => !self.is_generator,
            TokenType::Await => !self.is_async,
            tt => tt.is_contextual() || tt >= TokenType::Implements,
        }
    }

    /// Records an export name, rejecting duplicates.
    pub(crate) fn record_export(&mut self, name: &'s str) -> ParseResult<()> {
        if self.exported.contains(&name) {
            return Err(ParseError::new(
                ParseErrorKind::DuplicateExport {
                    name: name.to_string(),
                },
                self.span(),
            ));
        }
        self.exported.push(name);
        Ok(())
    }
}

/// Parses a module and returns its AST, or the first error encountered.
pub fn parse(source: &str) -> Result<Ast<'_>, ParseError> {
    Parser::new(source).parse_module()
}
