//! Binding patterns: simple names, array patterns, and object patterns.
//!
//! Every leaf identifier is declared in the scope chosen by the enclosing
//! statement — the declaration kind arrives as a parameter and decides
//! hoisting inside the resolver.

use crate::ast::binding::{Binding, BindingElement, BindingObjectItem};
use crate::ast::expr::PropertyKey;
use crate::ast::vars::DeclKind;
use crate::token::TokenType;

use super::{ExprParsing, OpPrec, ParseResult, Parser};

pub trait BindingParsing<'s> {
    fn parse_binding(&mut self, kind: DeclKind) -> ParseResult<Binding<'s>>;
    fn parse_binding_element(&mut self, kind: DeclKind) -> ParseResult<BindingElement<'s>>;
    fn parse_property_key(&mut self) -> ParseResult<PropertyKey<'s>>;
}

impl<'s> BindingParsing<'s> for Parser<'s> {
    fn parse_binding(&mut self, kind: DeclKind) -> ParseResult<Binding<'s>> {
        use TokenType::*;
        if self.is_binding_ident() {
            let name = self.data;
            let v = self
                .scope
                .declare(kind, name)
                .ok_or_else(|| self.fail_duplicate(name))?;
            self.next();
            return Ok(Binding::Name(v));
        }
        match self.tt {
            OpenBracket => {
                self.next();
                let mut elements = Vec::new();
                let mut rest = None;
                loop {
                    match self.tt {
                        CloseBracket => break,
                        Comma => {
                            elements.push(None);
                            self.next();
                        }
                        Ellipsis => {
                            self.next();
                            rest = Some(Box::new(self.parse_binding(kind)?));
                            break;
                        }
                        _ => {
                            elements.push(Some(self.parse_binding_element(kind)?));
                            if !self.eat(Comma) {
                                break;
                            }
                        }
                    }
                }
                self.expect(CloseBracket, "array binding pattern")?;
                Ok(Binding::Array { elements, rest })
            }
            OpenBrace => {
                self.next();
                let mut items = Vec::new();
                let mut rest = None;
                loop {
                    match self.tt {
                        CloseBrace => break,
                        Ellipsis => {
                            // The rest target must be a simple name.
                            self.next();
                            if !self.is_binding_ident() {
                                return Err(self.fail_expected(
                                    "object binding pattern",
                                    &["identifier"],
                                ));
                            }
                            let name = self.data;
                            let v = self
                                .scope
                                .declare(kind, name)
                                .ok_or_else(|| self.fail_duplicate(name))?;
                            self.next();
                            rest = Some(v);
                            break;
                        }
                        _ => {
                            items.push(self.parse_object_binding_item(kind)?);
                            if !self.eat(Comma) {
                                break;
                            }
                        }
                    }
                }
                self.expect(CloseBrace, "object binding pattern")?;
                Ok(Binding::Object { items, rest })
            }
            _ => Err(self.fail_expected("binding", &["identifier", "[", "{"])),
        }
    }

    fn parse_binding_element(&mut self, kind: DeclKind) -> ParseResult<BindingElement<'s>> {
        let binding = self.parse_binding(kind)?;
        let default = if self.eat(TokenType::Eq) {
            Some(self.parse_expr(OpPrec::Assign)?)
        } else {
            None
        };
        Ok(BindingElement { binding, default })
    }

    fn parse_property_key(&mut self) -> ParseResult<PropertyKey<'s>> {
        use TokenType::*;
        match self.tt {
            String => {
                let key = PropertyKey::String(self.data);
                self.next();
                Ok(key)
            }
            Decimal | Integer | Hexadecimal | Binary | Octal => {
                let key = PropertyKey::Number {
                    tt: self.tt,
                    text: self.data,
                };
                self.next();
                Ok(key)
            }
            OpenBracket => {
                self.next();
                let expr = self.parse_expr(OpPrec::Assign)?;
                self.expect(CloseBracket, "computed property name")?;
                Ok(PropertyKey::Computed(expr))
            }
            tt if tt.is_identifier() => {
                let key = PropertyKey::Ident(self.data);
                self.next();
                Ok(key)
            }
            _ => Err(self.fail_expected(
                "property name",
                &["identifier", "string", "number", "["],
            )),
        }
    }
}

impl<'s> Parser<'s> {
    /// One `key: element` pair or shorthand of an object pattern.
    fn parse_object_binding_item(
        &mut self,
        kind: DeclKind,
    ) -> ParseResult<BindingObjectItem<'s>> {
        // A shorthand needs the identifier text before the key is parsed.
        let shorthand_name = if self.is_binding_ident() {
            Some(self.data)
        } else {
            None
        };
        let key = self.parse_property_key()?;
        if self.eat(TokenType::Colon) {
            let value = self.parse_binding_element(kind)?;
            return Ok(BindingObjectItem {
                key: Some(key),
                value,
            });
        }
        let name = match shorthand_name {
            Some(name) => name,
            None => return Err(self.fail_expected("object binding pattern", &[":"])),
        };
        let v = self
            .scope
            .declare(kind, name)
            .ok_or_else(|| self.fail_duplicate(name))?;
        let default = if self.eat(TokenType::Eq) {
            Some(self.parse_expr(OpPrec::Assign)?)
        } else {
            None
        };
        Ok(BindingObjectItem {
            key: None,
            value: BindingElement {
                binding: Binding::Name(v),
                default,
            },
        })
    }
}
