//! Statement and module-declaration parsing.
//!
//! Dispatch is on the first token of the statement. The annoying cases are
//! the words that only sometimes head a declaration: `let` begins a
//! declaration only before a binding, `async` begins a function only when
//! `function` follows on the same line, and `import` heads an expression
//! when `(` or `.` follows. Each of those falls back to the expression
//! parser with the already-consumed identifier as its left-hand side.

use crate::ast::binding::Binding;
use crate::ast::expr::Expr;
use crate::ast::stmt::{
    BlockStmt, CaseClause, CatchClause, ExportSpecifier, ExportStmt, ForInit, ForTarget,
    ImportSpecifier, ImportStmt, Stmt, VarDecl,
};
use crate::ast::vars::DeclKind;
use crate::ast::BindingElement;
use crate::error::{ParseError, ParseErrorKind};
use crate::token::TokenType;

use super::expr::is_assign_target;
use super::{BindingParsing, ExprParsing, FuncParsing, OpPrec, ParseResult, Parser};

enum ForHead<'s> {
    Empty,
    Decl(TokenType, Binding<'s>),
    Expr(Expr<'s>),
}

pub trait StmtParsing<'s> {
    fn parse_stmt_list_until(&mut self, end: TokenType) -> ParseResult<Vec<Stmt<'s>>>;
    fn parse_stmt(&mut self, allow_directive: bool) -> ParseResult<Stmt<'s>>;
    fn parse_block(&mut self, context: &'static str) -> ParseResult<BlockStmt<'s>>;
    fn parse_var_decl_after(&mut self, tt: TokenType) -> ParseResult<VarDecl<'s>>;
    fn parse_for(&mut self) -> ParseResult<Stmt<'s>>;
    fn parse_import(&mut self) -> ParseResult<Stmt<'s>>;
    fn parse_export(&mut self) -> ParseResult<Stmt<'s>>;
}

impl<'s> StmtParsing<'s> for Parser<'s> {
    fn parse_stmt_list_until(&mut self, end: TokenType) -> ParseResult<Vec<Stmt<'s>>> {
        let mut list = Vec::new();
        let mut directive_ok = true;
        while self.tt != end && self.tt != TokenType::Eof {
            if self.tt == TokenType::Error {
                return Err(self.fail_unexpected("statement"));
            }
            let stmt = self.parse_stmt(directive_ok)?;
            directive_ok = directive_ok && matches!(stmt, Stmt::Directive(_));
            list.push(stmt);
        }
        if self.tt != end {
            return Err(self.fail_expected("statement list", &[end.as_str()]));
        }
        Ok(list)
    }

    fn parse_stmt(&mut self, allow_directive: bool) -> ParseResult<Stmt<'s>> {
        use TokenType::*;
        match self.tt {
            OpenBrace => {
                self.next();
                self.scope.open(false);
                let scope = self.scope.current();
                let list = self.parse_stmt_list_until(CloseBrace)?;
                self.expect(CloseBrace, "block statement")?;
                self.scope.close();
                Ok(Stmt::Block(BlockStmt { scope, list }))
            }
            Semicolon => {
                self.next();
                Ok(Stmt::Empty)
            }
            Var | Const => {
                let tt = self.tt;
                self.next();
                let decl = self.parse_var_decl_after(tt)?;
                self.accept_semicolon("variable declaration")?;
                Ok(Stmt::Var(decl))
            }
            Let => {
                self.next();
                if self.is_binding_ident() || self.tt == OpenBracket || self.tt == OpenBrace
                {
                    let decl = self.parse_var_decl_after(Let)?;
                    self.accept_semicolon("variable declaration")?;
                    Ok(Stmt::Var(decl))
                } else if self.tt == Colon {
                    self.next();
                    let body = self.parse_stmt(false)?;
                    Ok(Stmt::Labelled {
                        label: "let",
                        body: Box::new(body),
                    })
                } else {
                    // `let` as a plain identifier.
                    let lhs = if self.tt == Arrow && !self.prev_lt {
                        self.ident_arrow("let", false)?
                    } else {
                        Expr::Var(self.scope.use_name("let"))
                    };
                    let expr = self.parse_infix(lhs, OpPrec::Expr)?;
                    self.accept_semicolon("expression statement")?;
                    Ok(Stmt::Expr(expr))
                }
            }
            If => {
                self.next();
                self.expect(OpenParen, "if statement")?;
                let cond = self.parse_expr(OpPrec::Expr)?;
                self.expect(CloseParen, "if statement")?;
                let then = Box::new(self.parse_stmt(false)?);
                let alt = if self.eat(Else) {
                    Some(Box::new(self.parse_stmt(false)?))
                } else {
                    None
                };
                Ok(Stmt::If { cond, then, alt })
            }
            Do => {
                self.next();
                let body = Box::new(self.parse_stmt(false)?);
                self.expect(While, "do-while statement")?;
                self.expect(OpenParen, "do-while statement")?;
                let cond = self.parse_expr(OpPrec::Expr)?;
                self.expect(CloseParen, "do-while statement")?;
                // The closing `)` satisfies the semicolon rule on its own.
                self.eat(Semicolon);
                Ok(Stmt::DoWhile { body, cond })
            }
            While => {
                self.next();
                self.expect(OpenParen, "while statement")?;
                let cond = self.parse_expr(OpPrec::Expr)?;
                self.expect(CloseParen, "while statement")?;
                let body = Box::new(self.parse_stmt(false)?);
                Ok(Stmt::While { cond, body })
            }
            For => self.parse_for(),
            Switch => {
                self.next();
                self.expect(OpenParen, "switch statement")?;
                let discriminant = self.parse_expr(OpPrec::Expr)?;
                self.expect(CloseParen, "switch statement")?;
                self.expect(OpenBrace, "switch statement")?;
                let scope = self.scope.open(false);
                let mut cases = Vec::new();
                while self.tt != CloseBrace {
                    let test = if self.eat(Case) {
                        let test = self.parse_expr(OpPrec::Expr)?;
                        self.expect(Colon, "switch case")?;
                        Some(test)
                    } else if self.eat(Default) {
                        self.expect(Colon, "switch case")?;
                        None
                    } else {
                        return Err(self.fail_expected("switch statement", &["case", "default"]));
                    };
                    let mut body = Vec::new();
                    while !matches!(self.tt, Case | Default | CloseBrace | Eof) {
                        body.push(self.parse_stmt(false)?);
                    }
                    cases.push(CaseClause { test, body });
                }
                self.expect(CloseBrace, "switch statement")?;
                self.scope.close();
                Ok(Stmt::Switch {
                    scope,
                    discriminant,
                    cases,
                })
            }
            Continue | Break => {
                let tt = self.tt;
                self.next();
                let label = if !self.prev_lt && self.is_binding_ident() {
                    let label = self.data;
                    self.next();
                    Some(label)
                } else {
                    None
                };
                self.accept_semicolon("branch statement")?;
                Ok(Stmt::Branch { tt, label })
            }
            Return => {
                self.next();
                let value = if self.prev_lt
                    || matches!(self.tt, Semicolon | CloseBrace | Eof)
                {
                    None
                } else {
                    Some(self.parse_expr(OpPrec::Expr)?)
                };
                self.accept_semicolon("return statement")?;
                Ok(Stmt::Return { value })
            }
            With => {
                self.next();
                self.expect(OpenParen, "with statement")?;
                let object = self.parse_expr(OpPrec::Expr)?;
                self.expect(CloseParen, "with statement")?;
                self.scope.set_has_with();
                let body = Box::new(self.parse_stmt(false)?);
                Ok(Stmt::With { object, body })
            }
            Throw => {
                self.next();
                if self.prev_lt {
                    return Err(self.fail_expected("throw statement", &["expression"]));
                }
                let value = self.parse_expr(OpPrec::Expr)?;
                self.accept_semicolon("throw statement")?;
                Ok(Stmt::Throw { value })
            }
            Try => {
                self.next();
                let body = self.parse_block("try statement")?;
                let catch = if self.eat(Catch) {
                    self.scope.open(false);
                    let scope = self.scope.current();
                    let binding = if self.eat(OpenParen) {
                        let b = self.parse_binding(DeclKind::CatchDecl)?;
                        self.expect(CloseParen, "catch clause")?;
                        Some(b)
                    } else {
                        None
                    };
                    self.expect(OpenBrace, "catch clause")?;
                    let list = self.parse_stmt_list_until(CloseBrace)?;
                    self.expect(CloseBrace, "catch clause")?;
                    self.scope.close();
                    Some(CatchClause {
                        binding,
                        body: BlockStmt { scope, list },
                    })
                } else {
                    None
                };
                let finally = if self.eat(Finally) {
                    Some(self.parse_block("finally clause")?)
                } else {
                    None
                };
                if catch.is_none() && finally.is_none() {
                    return Err(self.fail_expected("try statement", &["catch", "finally"]));
                }
                Ok(Stmt::Try {
                    body,
                    catch,
                    finally,
                })
            }
            Debugger => {
                self.next();
                self.accept_semicolon("debugger statement")?;
                Ok(Stmt::Debugger)
            }
            Import => self.parse_import(),
            Export => self.parse_export(),
            Function => {
                self.next();
                let func = self.parse_func_named(true, false, true)?;
                Ok(Stmt::Func(func))
            }
            Class => {
                self.next();
                let class = self.parse_class_named(true, true)?;
                Ok(Stmt::Class(class))
            }
            Async => {
                self.next();
                if self.tt == Function && !self.prev_lt {
                    self.next();
                    let func = self.parse_func_named(true, true, true)?;
                    Ok(Stmt::Func(func))
                } else if self.tt == Colon {
                    self.next();
                    let body = self.parse_stmt(false)?;
                    Ok(Stmt::Labelled {
                        label: "async",
                        body: Box::new(body),
                    })
                } else {
                    let lhs = self.parse_async_tail(OpPrec::Expr)?;
                    let expr = self.parse_infix(lhs, OpPrec::Expr)?;
                    self.accept_semicolon("expression statement")?;
                    Ok(Stmt::Expr(expr))
                }
            }
            String if allow_directive => {
                let raw = self.data;
                self.next();
                if matches!(self.tt, Semicolon | CloseBrace | Eof) || self.prev_lt {
                    self.eat(Semicolon);
                    Ok(Stmt::Directive(raw))
                } else {
                    let lhs = Expr::Literal {
                        tt: String,
                        text: raw,
                    };
                    let expr = self.parse_infix(lhs, OpPrec::Expr)?;
                    self.accept_semicolon("expression statement")?;
                    Ok(Stmt::Expr(expr))
                }
            }
            _ if self.is_binding_ident() => {
                let name = self.data;
                self.next();
                if self.tt == Colon {
                    self.next();
                    let body = self.parse_stmt(false)?;
                    Ok(Stmt::Labelled {
                        label: name,
                        body: Box::new(body),
                    })
                } else {
                    let lhs = if self.tt == Arrow && !self.prev_lt {
                        self.ident_arrow(name, false)?
                    } else {
                        Expr::Var(self.scope.use_name(name))
                    };
                    let expr = self.parse_infix(lhs, OpPrec::Expr)?;
                    self.accept_semicolon("expression statement")?;
                    Ok(Stmt::Expr(expr))
                }
            }
            _ => {
                let expr = self.parse_expr(OpPrec::Expr)?;
                self.accept_semicolon("expression statement")?;
                Ok(Stmt::Expr(expr))
            }
        }
    }

    fn parse_block(&mut self, context: &'static str) -> ParseResult<BlockStmt<'s>> {
        self.expect(TokenType::OpenBrace, context)?;
        self.scope.open(false);
        let scope = self.scope.current();
        let list = self.parse_stmt_list_until(TokenType::CloseBrace)?;
        self.expect(TokenType::CloseBrace, context)?;
        self.scope.close();
        Ok(BlockStmt { scope, list })
    }

    /// Declarator list after the `var`/`let`/`const` keyword.
    fn parse_var_decl_after(&mut self, tt: TokenType) -> ParseResult<VarDecl<'s>> {
        let kind = if tt == TokenType::Var {
            DeclKind::VariableDecl
        } else {
            DeclKind::LexicalDecl
        };
        let mut list = vec![self.parse_binding_element(kind)?];
        while self.eat(TokenType::Comma) {
            list.push(self.parse_binding_element(kind)?);
        }
        Ok(VarDecl { tt, list })
    }

    fn parse_for(&mut self) -> ParseResult<Stmt<'s>> {
        use TokenType::*;
        self.next(); // for
        let is_await = if self.tt == Await {
            if !self.is_async {
                return Err(self.fail_unexpected("for statement"));
            }
            self.next();
            true
        } else {
            false
        };
        self.expect(OpenParen, "for statement")?;
        self.scope.open(false);
        self.in_for_init = true;

        let head = if self.tt == Semicolon {
            ForHead::Empty
        } else if matches!(self.tt, Var | Const | Let) {
            let kw = self.tt;
            self.next();
            if kw != Let
                || self.is_binding_ident()
                || self.tt == OpenBracket
                || self.tt == OpenBrace
            {
                let kind = if kw == Var {
                    DeclKind::VariableDecl
                } else {
                    DeclKind::LexicalDecl
                };
                let binding = self.parse_binding(kind)?;
                ForHead::Decl(kw, binding)
            } else {
                let lhs = Expr::Var(self.scope.use_name("let"));
                ForHead::Expr(self.parse_infix(lhs, OpPrec::Expr)?)
            }
        } else {
            ForHead::Expr(self.parse_expr(OpPrec::Expr)?)
        };

        match (head, self.tt) {
            (ForHead::Decl(tt, binding), In) => {
                self.next();
                self.in_for_init = false;
                let object = self.parse_expr(OpPrec::Expr)?;
                self.expect(CloseParen, "for-in statement")?;
                if is_await {
                    return Err(self.fail_unexpected("for-in statement"));
                }
                self.scope.mark_for_stmt();
                let body = self.parse_for_body()?;
                self.scope.close();
                Ok(Stmt::ForIn {
                    target: ForTarget::Decl { tt, binding },
                    object,
                    body,
                })
            }
            (ForHead::Decl(tt, binding), Of) => {
                self.next();
                self.in_for_init = false;
                let iterable = self.parse_expr(OpPrec::Assign)?;
                self.expect(CloseParen, "for-of statement")?;
                self.scope.mark_for_stmt();
                let body = self.parse_for_body()?;
                self.scope.close();
                Ok(Stmt::ForOf {
                    is_await,
                    target: ForTarget::Decl { tt, binding },
                    iterable,
                    body,
                })
            }
            (ForHead::Decl(tt, binding), _) => {
                // Classic for with a declaration: finish the first
                // declarator and the rest of the list.
                let kind = if tt == Var {
                    DeclKind::VariableDecl
                } else {
                    DeclKind::LexicalDecl
                };
                let default = if self.eat(Eq) {
                    Some(self.parse_expr(OpPrec::Assign)?)
                } else {
                    None
                };
                let mut list = vec![BindingElement { binding, default }];
                while self.eat(Comma) {
                    list.push(self.parse_binding_element(kind)?);
                }
                self.finish_classic_for(is_await, Some(ForInit::Decl(VarDecl { tt, list })))
            }
            (ForHead::Expr(e), In) => {
                if !is_assign_target(&e, true) {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidAssignTarget,
                        self.span(),
                    ));
                }
                self.next();
                self.in_for_init = false;
                let object = self.parse_expr(OpPrec::Expr)?;
                self.expect(CloseParen, "for-in statement")?;
                if is_await {
                    return Err(self.fail_unexpected("for-in statement"));
                }
                self.scope.mark_for_stmt();
                let body = self.parse_for_body()?;
                self.scope.close();
                Ok(Stmt::ForIn {
                    target: ForTarget::Expr(e),
                    object,
                    body,
                })
            }
            (ForHead::Expr(e), Of) => {
                if !is_assign_target(&e, true) {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidAssignTarget,
                        self.span(),
                    ));
                }
                self.next();
                self.in_for_init = false;
                let iterable = self.parse_expr(OpPrec::Assign)?;
                self.expect(CloseParen, "for-of statement")?;
                self.scope.mark_for_stmt();
                let body = self.parse_for_body()?;
                self.scope.close();
                Ok(Stmt::ForOf {
                    is_await,
                    target: ForTarget::Expr(e),
                    iterable,
                    body,
                })
            }
            (ForHead::Expr(e), _) => self.finish_classic_for(is_await, Some(ForInit::Expr(e))),
            (ForHead::Empty, _) => self.finish_classic_for(is_await, None),
        }
    }

    fn parse_import(&mut self) -> ParseResult<Stmt<'s>> {
        use TokenType::*;
        self.next(); // import
        match self.tt {
            OpenParen => {
                let args = self.parse_args()?;
                let lhs = Expr::Call {
                    callee: Box::new(Expr::Literal {
                        tt: Import,
                        text: "import",
                    }),
                    args,
                    optional: false,
                };
                let expr = self.parse_infix(lhs, OpPrec::Expr)?;
                self.accept_semicolon("expression statement")?;
                Ok(Stmt::Expr(expr))
            }
            Dot => {
                self.next();
                if self.tt != Meta {
                    return Err(self.fail_expected("import expression", &["meta"]));
                }
                self.next();
                let expr = self.parse_infix(Expr::ImportMeta, OpPrec::Expr)?;
                self.accept_semicolon("expression statement")?;
                Ok(Stmt::Expr(expr))
            }
            String => {
                let module = self.data;
                self.next();
                self.accept_semicolon("import declaration")?;
                Ok(Stmt::Import(ImportStmt {
                    default: None,
                    star: None,
                    named: None,
                    module,
                }))
            }
            _ => {
                let mut default = None;
                let mut star = None;
                let mut named = None;

                if self.is_binding_ident() {
                    let name = self.data;
                    default = Some(
                        self.scope
                            .declare(DeclKind::LexicalDecl, name)
                            .ok_or_else(|| self.fail_duplicate(name))?,
                    );
                    self.next();
                    if self.eat(Comma) {
                        // a namespace or named list follows
                    } else {
                        self.expect(From, "import declaration")?;
                        return self.finish_import(default, star, named);
                    }
                }
                if self.tt == Mul {
                    self.next();
                    self.expect(As, "import declaration")?;
                    if !self.is_binding_ident() {
                        return Err(self.fail_expected("import declaration", &["identifier"]));
                    }
                    let name = self.data;
                    star = Some(
                        self.scope
                            .declare(DeclKind::LexicalDecl, name)
                            .ok_or_else(|| self.fail_duplicate(name))?,
                    );
                    self.next();
                } else if self.tt == OpenBrace {
                    named = Some(self.parse_import_specifiers()?);
                } else {
                    return Err(self.fail_expected("import declaration", &["*", "{"]));
                }
                self.expect(From, "import declaration")?;
                self.finish_import(default, star, named)
            }
        }
    }

    fn parse_export(&mut self) -> ParseResult<Stmt<'s>> {
        use TokenType::*;
        self.next(); // export
        match self.tt {
            Mul => {
                self.next();
                let name = if self.eat(As) {
                    if !self.tt.is_identifier() {
                        return Err(self.fail_expected("export declaration", &["identifier"]));
                    }
                    let name = self.data;
                    self.record_export(name)?;
                    self.next();
                    Some(name)
                } else {
                    None
                };
                self.expect(From, "export declaration")?;
                if self.tt != String {
                    return Err(self.fail_expected("export declaration", &["string"]));
                }
                let from = self.data;
                self.next();
                self.accept_semicolon("export declaration")?;
                Ok(Stmt::Export(ExportStmt::Star { name, from }))
            }
            OpenBrace => {
                self.next();
                let mut list = Vec::new();
                while self.tt != CloseBrace {
                    if !self.tt.is_identifier() {
                        return Err(self.fail_expected("export declaration", &["identifier"]));
                    }
                    let name = self.data;
                    self.next();
                    let alias = if self.eat(As) {
                        if !self.tt.is_identifier() {
                            return Err(
                                self.fail_expected("export declaration", &["identifier"])
                            );
                        }
                        let alias = self.data;
                        self.next();
                        Some(alias)
                    } else {
                        None
                    };
                    self.record_export(alias.unwrap_or(name))?;
                    list.push(ExportSpecifier { name, alias });
                    if !self.eat(Comma) {
                        break;
                    }
                }
                self.expect(CloseBrace, "export declaration")?;
                let from = if self.eat(From) {
                    if self.tt != String {
                        return Err(self.fail_expected("export declaration", &["string"]));
                    }
                    let from = self.data;
                    self.next();
                    Some(from)
                } else {
                    // Without `from`, the listed names refer to local
                    // bindings.
                    for spec in &list {
                        self.scope.use_name(spec.name);
                    }
                    None
                };
                self.accept_semicolon("export declaration")?;
                Ok(Stmt::Export(ExportStmt::Named { list, from }))
            }
            Default => {
                self.next();
                self.record_export("default")?;
                if self.tt == Function {
                    self.next();
                    let func = self.parse_func_named(true, false, false)?;
                    return Ok(Stmt::Export(ExportStmt::DefaultDecl(Box::new(Stmt::Func(
                        func,
                    )))));
                }
                if self.tt == Class {
                    self.next();
                    let class = self.parse_class_named(true, false)?;
                    return Ok(Stmt::Export(ExportStmt::DefaultDecl(Box::new(
                        Stmt::Class(class),
                    ))));
                }
                if self.tt == Async {
                    self.next();
                    if self.tt == Function && !self.prev_lt {
                        self.next();
                        let func = self.parse_func_named(true, true, false)?;
                        return Ok(Stmt::Export(ExportStmt::DefaultDecl(Box::new(
                            Stmt::Func(func),
                        ))));
                    }
                    let lhs = self.parse_async_tail(OpPrec::Assign)?;
                    let expr = self.parse_infix(lhs, OpPrec::Assign)?;
                    self.accept_semicolon("export declaration")?;
                    return Ok(Stmt::Export(ExportStmt::DefaultExpr(expr)));
                }
                let expr = self.parse_expr(OpPrec::Assign)?;
                self.accept_semicolon("export declaration")?;
                Ok(Stmt::Export(ExportStmt::DefaultExpr(expr)))
            }
            Var | Let | Const | Function | Class | Async => {
                let stmt = self.parse_stmt(false)?;
                let mut names = Vec::new();
                self.exported_decl_names(&stmt, &mut names);
                for name in names {
                    self.record_export(name)?;
                }
                Ok(Stmt::Export(ExportStmt::Decl(Box::new(stmt))))
            }
            _ => Err(self.fail_expected(
                "export declaration",
                &["*", "{", "default", "var", "let", "const", "function", "class"],
            )),
        }
    }
}

impl<'s> Parser<'s> {
    fn finish_classic_for(
        &mut self,
        is_await: bool,
        init: Option<ForInit<'s>>,
    ) -> ParseResult<Stmt<'s>> {
        use TokenType::*;
        if is_await {
            return Err(self.fail_unexpected("for statement"));
        }
        self.in_for_init = false;
        self.expect(Semicolon, "for statement")?;
        let cond = if self.tt == Semicolon {
            None
        } else {
            Some(self.parse_expr(OpPrec::Expr)?)
        };
        self.expect(Semicolon, "for statement")?;
        let post = if self.tt == CloseParen {
            None
        } else {
            Some(self.parse_expr(OpPrec::Expr)?)
        };
        self.expect(CloseParen, "for statement")?;
        self.scope.mark_for_stmt();
        let body = self.parse_for_body()?;
        self.scope.close();
        Ok(Stmt::For {
            init,
            cond,
            post,
            body,
        })
    }

    /// The loop body shares the header's scope; a single statement is
    /// wrapped in a block.
    fn parse_for_body(&mut self) -> ParseResult<BlockStmt<'s>> {
        let scope = self.scope.current();
        if self.eat(TokenType::OpenBrace) {
            let list = self.parse_stmt_list_until(TokenType::CloseBrace)?;
            self.expect(TokenType::CloseBrace, "loop body")?;
            Ok(BlockStmt { scope, list })
        } else {
            let stmt = self.parse_stmt(false)?;
            Ok(BlockStmt {
                scope,
                list: vec![stmt],
            })
        }
    }

    fn parse_import_specifiers(&mut self) -> ParseResult<Vec<ImportSpecifier<'s>>> {
        self.next(); // {
        let mut list = Vec::new();
        while self.tt != TokenType::CloseBrace {
            if !self.tt.is_identifier() {
                return Err(self.fail_expected("import declaration", &["identifier"]));
            }
            let name = self.data;
            self.next();
            let binding = if self.eat(TokenType::As) {
                if !self.is_binding_ident() {
                    return Err(self.fail_expected("import declaration", &["identifier"]));
                }
                let local = self.data;
                let v = self
                    .scope
                    .declare(DeclKind::LexicalDecl, local)
                    .ok_or_else(|| self.fail_duplicate(local))?;
                self.next();
                v
            } else {
                let v = self
                    .scope
                    .declare(DeclKind::LexicalDecl, name)
                    .ok_or_else(|| self.fail_duplicate(name))?;
                v
            };
            list.push(ImportSpecifier { name, binding });
            if !self.eat(TokenType::Comma) {
                break;
            }
        }
        self.expect(TokenType::CloseBrace, "import declaration")?;
        Ok(list)
    }

    fn finish_import(
        &mut self,
        default: Option<crate::ast::vars::VarRef>,
        star: Option<crate::ast::vars::VarRef>,
        named: Option<Vec<ImportSpecifier<'s>>>,
    ) -> ParseResult<Stmt<'s>> {
        if self.tt != TokenType::String {
            return Err(self.fail_expected("import declaration", &["string"]));
        }
        let module = self.data;
        self.next();
        self.accept_semicolon("import declaration")?;
        Ok(Stmt::Import(ImportStmt {
            default,
            star,
            named,
            module,
        }))
    }

    /// Collects the names an `export <decl>` statement makes public.
    fn exported_decl_names(&self, stmt: &Stmt<'s>, out: &mut Vec<&'s str>) {
        match stmt {
            Stmt::Var(decl) => {
                for element in &decl.list {
                    self.binding_names(&element.binding, out);
                }
            }
            Stmt::Func(func) => {
                if let Some(v) = func.name {
                    out.push(self.scope.vars.canonical(v).name);
                }
            }
            Stmt::Class(class) => {
                if let Some(v) = class.name {
                    out.push(self.scope.vars.canonical(v).name);
                }
            }
            _ => {}
        }
    }

    fn binding_names(&self, binding: &Binding<'s>, out: &mut Vec<&'s str>) {
        match binding {
            Binding::Name(v) => out.push(self.scope.vars.canonical(*v).name),
            Binding::Array { elements, rest } => {
                for element in elements.iter().flatten() {
                    self.binding_names(&element.binding, out);
                }
                if let Some(rest) = rest {
                    self.binding_names(rest, out);
                }
            }
            Binding::Object { items, rest } => {
                for item in items {
                    self.binding_names(&item.value.binding, out);
                }
                if let Some(rest) = rest {
                    out.push(self.scope.vars.canonical(*rest).name);
                }
            }
        }
    }
}
