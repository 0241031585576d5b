//! Functions, classes, methods, and object-literal properties.
//!
//! Every body opens a fresh function scope. A statement-form name is
//! declared in the surrounding scope before the function scope opens; an
//! expression-form name is declared inside it, so it is visible only to
//! the body.

use crate::ast::expr::{Property, PropertyKey};
use crate::ast::stmt::{BlockStmt, ClassDecl, FuncDecl, MethodDef, MethodKind, Params};
use crate::ast::vars::DeclKind;
use crate::keywords::keyword_token;
use crate::token::TokenType;

use super::{BindingParsing, ExprParsing, OpPrec, ParseResult, Parser, StmtParsing};

pub trait FuncParsing<'s> {
    /// Parses from just after the `function` keyword.
    fn parse_func_named(
        &mut self,
        is_stmt: bool,
        is_async: bool,
        name_required: bool,
    ) -> ParseResult<FuncDecl<'s>>;
    /// Parses from just after the `class` keyword.
    fn parse_class_named(
        &mut self,
        is_stmt: bool,
        name_required: bool,
    ) -> ParseResult<ClassDecl<'s>>;
    /// One property of an object literal, method forms included.
    fn parse_property(&mut self) -> ParseResult<Property<'s>>;
}

impl<'s> FuncParsing<'s> for Parser<'s> {
    fn parse_func_named(
        &mut self,
        is_stmt: bool,
        is_async: bool,
        name_required: bool,
    ) -> ParseResult<FuncDecl<'s>> {
        let generator = self.eat(TokenType::Mul);
        let mut stmt_name = None;
        let mut expr_name = None;
        if self.is_binding_ident() {
            let n = self.data;
            if is_stmt {
                stmt_name = Some(
                    self.scope
                        .declare(DeclKind::FunctionDecl, n)
                        .ok_or_else(|| self.fail_duplicate(n))?,
                );
            } else {
                expr_name = Some(n);
            }
            self.next();
        } else if name_required {
            return Err(self.fail_expected("function declaration", &["identifier"]));
        }

        let scope = self.scope.open(true);
        let name = match expr_name {
            Some(n) => Some(
                self.scope
                    .declare(DeclKind::ExprDecl, n)
                    .ok_or_else(|| self.fail_duplicate(n))?,
            ),
            None => stmt_name,
        };

        let old_async = self.is_async;
        let old_generator = self.is_generator;
        self.is_async = is_async;
        self.is_generator = generator;

        self.expect(TokenType::OpenParen, "function parameters")?;
        let params = self.parse_params()?;
        self.scope.mark_func_args();
        self.expect(TokenType::OpenBrace, "function body")?;
        let list = self.parse_stmt_list_until(TokenType::CloseBrace)?;
        self.expect(TokenType::CloseBrace, "function body")?;

        self.is_async = old_async;
        self.is_generator = old_generator;
        self.scope.close();

        Ok(FuncDecl {
            is_async,
            generator,
            name,
            params,
            body: BlockStmt { scope, list },
        })
    }

    fn parse_class_named(
        &mut self,
        is_stmt: bool,
        name_required: bool,
    ) -> ParseResult<ClassDecl<'s>> {
        let mut name = None;
        let mut wrapper = false;
        if self.is_binding_ident() {
            let n = self.data;
            if is_stmt {
                name = Some(
                    self.scope
                        .declare(DeclKind::LexicalDecl, n)
                        .ok_or_else(|| self.fail_duplicate(n))?,
                );
            } else {
                // The class expression's own name lives in a scope of its
                // own so only the body sees it.
                self.scope.open(false);
                wrapper = true;
                name = Some(
                    self.scope
                        .declare(DeclKind::ExprDecl, n)
                        .ok_or_else(|| self.fail_duplicate(n))?,
                );
            }
            self.next();
        } else if name_required {
            return Err(self.fail_expected("class declaration", &["identifier"]));
        }

        let extends = if self.eat(TokenType::Extends) {
            Some(self.parse_expr(OpPrec::Lhs)?)
        } else {
            None
        };
        self.expect(TokenType::OpenBrace, "class body")?;
        let mut methods = Vec::new();
        while self.tt != TokenType::CloseBrace {
            if self.eat(TokenType::Semicolon) {
                continue;
            }
            methods.push(self.parse_class_method()?);
        }
        self.expect(TokenType::CloseBrace, "class body")?;
        if wrapper {
            self.scope.close();
        }
        Ok(ClassDecl {
            name,
            extends,
            methods,
        })
    }

    fn parse_property(&mut self) -> ParseResult<Property<'s>> {
        use TokenType::*;
        if self.tt == Async {
            self.next();
            match self.tt {
                Colon | Comma | CloseBrace | Eq | OpenParen => {
                    return self.finish_property(PropertyKey::Ident("async"));
                }
                _ => {
                    if self.prev_lt {
                        return Err(self.fail_expected("object literal", &["(", ":", ","]));
                    }
                    let generator = self.eat(Mul);
                    let key = self.parse_property_key()?;
                    let m = self.finish_method_def(false, true, generator, MethodKind::Normal, key)?;
                    return Ok(Property::Method(m));
                }
            }
        }
        if self.tt == Mul {
            self.next();
            let key = self.parse_property_key()?;
            let m = self.finish_method_def(false, false, true, MethodKind::Normal, key)?;
            return Ok(Property::Method(m));
        }
        if self.tt == Get || self.tt == Set {
            let accessor = self.tt;
            self.next();
            match self.tt {
                Colon | Comma | CloseBrace | Eq | OpenParen => {
                    let name = if accessor == Get { "get" } else { "set" };
                    return self.finish_property(PropertyKey::Ident(name));
                }
                _ => {
                    let kind = if accessor == Get {
                        MethodKind::Getter
                    } else {
                        MethodKind::Setter
                    };
                    let key = self.parse_property_key()?;
                    let m = self.finish_method_def(false, false, false, kind, key)?;
                    return Ok(Property::Method(m));
                }
            }
        }
        let key = self.parse_property_key()?;
        self.finish_property(key)
    }
}

impl<'s> Parser<'s> {
    pub(crate) fn parse_params(&mut self) -> ParseResult<Params<'s>> {
        let mut params = Params::default();
        while self.tt != TokenType::CloseParen {
            if self.eat(TokenType::Ellipsis) {
                params.rest = Some(Box::new(self.parse_binding(DeclKind::ArgumentDecl)?));
                break;
            }
            params
                .list
                .push(self.parse_binding_element(DeclKind::ArgumentDecl)?);
            if !self.eat(TokenType::Comma) {
                break;
            }
        }
        self.expect(TokenType::CloseParen, "function parameters")?;
        Ok(params)
    }

    fn parse_class_method(&mut self) -> ParseResult<MethodDef<'s>> {
        use TokenType::*;
        let mut is_static = false;
        if self.tt == Static {
            self.next();
            if self.tt == OpenParen {
                return self.finish_method_def(
                    false,
                    false,
                    false,
                    MethodKind::Normal,
                    PropertyKey::Ident("static"),
                );
            }
            is_static = true;
        }
        if self.tt == Async {
            self.next();
            if self.tt == OpenParen {
                return self.finish_method_def(
                    is_static,
                    false,
                    false,
                    MethodKind::Normal,
                    PropertyKey::Ident("async"),
                );
            }
            if self.prev_lt {
                return Err(self.fail_expected("class body", &["("]));
            }
            let generator = self.eat(Mul);
            let key = self.parse_property_key()?;
            return self.finish_method_def(is_static, true, generator, MethodKind::Normal, key);
        }
        if self.tt == Mul {
            self.next();
            let key = self.parse_property_key()?;
            return self.finish_method_def(is_static, false, true, MethodKind::Normal, key);
        }
        if self.tt == Get || self.tt == Set {
            let accessor = self.tt;
            self.next();
            if self.tt == OpenParen {
                let name = if accessor == Get { "get" } else { "set" };
                return self.finish_method_def(
                    is_static,
                    false,
                    false,
                    MethodKind::Normal,
                    PropertyKey::Ident(name),
                );
            }
            let kind = if accessor == Get {
                MethodKind::Getter
            } else {
                MethodKind::Setter
            };
            let key = self.parse_property_key()?;
            return self.finish_method_def(is_static, false, false, kind, key);
        }
        let key = self.parse_property_key()?;
        self.finish_method_def(is_static, false, false, MethodKind::Normal, key)
    }

    fn finish_method_def(
        &mut self,
        is_static: bool,
        is_async: bool,
        generator: bool,
        kind: MethodKind,
        key: PropertyKey<'s>,
    ) -> ParseResult<MethodDef<'s>> {
        let scope = self.scope.open(true);
        let old_async = self.is_async;
        let old_generator = self.is_generator;
        self.is_async = is_async;
        self.is_generator = generator;

        self.expect(TokenType::OpenParen, "method parameters")?;
        let params = self.parse_params()?;
        self.scope.mark_func_args();
        self.expect(TokenType::OpenBrace, "method body")?;
        let list = self.parse_stmt_list_until(TokenType::CloseBrace)?;
        self.expect(TokenType::CloseBrace, "method body")?;

        self.is_async = old_async;
        self.is_generator = old_generator;
        self.scope.close();

        Ok(MethodDef {
            is_static,
            is_async,
            generator,
            kind,
            key,
            params,
            body: BlockStmt { scope, list },
        })
    }

    /// Finishes an object-literal property once its key is known.
    fn finish_property(&mut self, key: PropertyKey<'s>) -> ParseResult<Property<'s>> {
        use TokenType::*;
        match self.tt {
            OpenParen => {
                let m = self.finish_method_def(false, false, false, MethodKind::Normal, key)?;
                Ok(Property::Method(m))
            }
            Colon => {
                self.next();
                let value = self.parse_expr(OpPrec::Assign)?;
                Ok(Property::KeyValue { key, value })
            }
            Eq => {
                // Shorthand with initializer; only meaningful as an arrow
                // parameter cover.
                let name = self.shorthand_name(key)?;
                let v = self.scope.use_name(name);
                self.next();
                let init = self.parse_expr(OpPrec::Assign)?;
                Ok(Property::Shorthand {
                    name: v,
                    init: Some(init),
                })
            }
            _ => {
                let name = self.shorthand_name(key)?;
                let v = self.scope.use_name(name);
                Ok(Property::Shorthand {
                    name: v,
                    init: None,
                })
            }
        }
    }

    fn shorthand_name(&mut self, key: PropertyKey<'s>) -> ParseResult<&'s str> {
        match key {
            PropertyKey::Ident(name) if !keyword_token(name).is_reserved() => Ok(name),
            _ => Err(self.fail_expected("object literal", &[":", "("])),
        }
    }
}
