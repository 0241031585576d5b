//! Expression parsing.
//!
//! A Pratt loop over [`OpPrec`]: `parse_expr` scans a prefix expression and
//! then folds infix and suffix operators onto it while they bind tighter
//! than the requested level. Left-associative operators re-enter the loop
//! at their own level; right-associative ones (`**`, assignments, `? :`)
//! parse their right side one level lower or at their own level.
//!
//! Whenever an expression may begin and the current token is `/` or `/=`,
//! the token is re-scanned as a regular expression literal before anything
//! else happens.

use crate::ast::binding::{Binding, BindingElement, BindingObjectItem};
use crate::ast::expr::{
    Arg, ArrayElement, ArrowBody, ArrowFunc, Expr, Property, TemplateLit,
    TemplatePart,
};
use crate::ast::stmt::Params;
use crate::ast::vars::DeclKind;
use crate::error::{ParseError, ParseErrorKind};
use crate::token::TokenType;

use super::{FuncParsing, OpPrec, ParseResult, Parser, StmtParsing};

/// A valid target of an assignment or update: a name, member access, a
/// parenthesized target, or (for plain `=`) a destructuring literal.
pub(crate) fn is_assign_target(expr: &Expr<'_>, allow_pattern: bool) -> bool {
    match expr {
        Expr::Var(_) | Expr::Dot { .. } | Expr::Index { .. } => true,
        Expr::Group(inner) => is_assign_target(inner, false),
        Expr::Array(_) | Expr::Object(_) => allow_pattern,
        _ => false,
    }
}

pub trait ExprParsing<'s> {
    fn parse_expr(&mut self, prec: OpPrec) -> ParseResult<Expr<'s>>;
    fn parse_prefix(&mut self, prec: OpPrec) -> ParseResult<Expr<'s>>;
    fn parse_infix(&mut self, lhs: Expr<'s>, prec: OpPrec) -> ParseResult<Expr<'s>>;
    fn parse_args(&mut self) -> ParseResult<Vec<Arg<'s>>>;
    fn parse_array_literal(&mut self) -> ParseResult<Expr<'s>>;
    fn parse_object_literal(&mut self) -> ParseResult<Expr<'s>>;
    fn parse_template(&mut self, tag: Option<Expr<'s>>, optional: bool)
        -> ParseResult<Expr<'s>>;
    fn parse_new_expr(&mut self) -> ParseResult<Expr<'s>>;
    fn parse_paren_or_arrow(&mut self, is_async: bool) -> ParseResult<Expr<'s>>;
    fn ident_arrow(&mut self, name: &'s str, is_async: bool) -> ParseResult<Expr<'s>>;
    fn parse_arrow_body(&mut self, is_async: bool) -> ParseResult<ArrowBody<'s>>;
    fn parse_async_tail(&mut self, prec: OpPrec) -> ParseResult<Expr<'s>>;
    fn expr_to_binding_element(&mut self, expr: Expr<'s>) -> ParseResult<BindingElement<'s>>;
    fn expr_to_binding(&mut self, expr: Expr<'s>) -> ParseResult<Binding<'s>>;
    fn expr_can_start(&self) -> bool;
}

impl<'s> ExprParsing<'s> for Parser<'s> {
    fn parse_expr(&mut self, prec: OpPrec) -> ParseResult<Expr<'s>> {
        self.rescan_regexp();
        let lhs = self.parse_prefix(prec)?;
        self.parse_infix(lhs, prec)
    }

    fn parse_prefix(&mut self, prec: OpPrec) -> ParseResult<Expr<'s>> {
        use TokenType::*;
        match self.tt {
            This | Null | True | False | Super => {
                let lit = Expr::Literal {
                    tt: self.tt,
                    text: self.data,
                };
                self.next();
                Ok(lit)
            }
            String | Regexp | Decimal | Integer | Hexadecimal | Binary | Octal => {
                let lit = Expr::Literal {
                    tt: self.tt,
                    text: self.data,
                };
                self.next();
                Ok(lit)
            }
            Template | TemplateStart => self.parse_template(None, false),
            OpenBracket => self.parse_array_literal(),
            OpenBrace => self.parse_object_literal(),
            OpenParen => self.parse_paren_or_arrow(false),
            Not | BitNot | Typeof | Void | Delete => {
                let op = self.tt;
                self.next();
                let operand = self.parse_expr(OpPrec::Unary)?;
                Ok(Expr::Unary {
                    op,
                    operand: Box::new(operand),
                })
            }
            Add | Sub => {
                let op = self.tt;
                self.next();
                let operand = self.parse_expr(OpPrec::Unary)?;
                Ok(Expr::Unary {
                    op,
                    operand: Box::new(operand),
                })
            }
            Incr | Decr => {
                let op = if self.tt == Incr { PreIncr } else { PreDecr };
                self.next();
                let operand = self.parse_expr(OpPrec::Unary)?;
                if !is_assign_target(&operand, false) {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidAssignTarget,
                        self.span(),
                    ));
                }
                Ok(Expr::Unary {
                    op,
                    operand: Box::new(operand),
                })
            }
            Await if self.is_async => {
                self.next();
                let operand = self.parse_expr(OpPrec::Unary)?;
                Ok(Expr::Unary {
                    op: Await,
                    operand: Box::new(operand),
                })
            }
            Yield if self.is_generator => {
                if prec > OpPrec::Assign {
                    return Err(self.fail_unexpected("expression"));
                }
                self.next();
                if self.prev_lt {
                    return Ok(Expr::Yield {
                        star: false,
                        operand: None,
                    });
                }
                let star = self.eat(Mul);
                let operand = if star || self.expr_can_start() {
                    Some(Box::new(self.parse_expr(OpPrec::Assign)?))
                } else {
                    None
                };
                Ok(Expr::Yield { star, operand })
            }
            New => self.parse_new_expr(),
            Import => {
                self.next();
                if self.eat(Dot) {
                    if self.tt != Meta {
                        return Err(self.fail_expected("import expression", &["meta"]));
                    }
                    self.next();
                    Ok(Expr::ImportMeta)
                } else if self.tt == OpenParen {
                    let args = self.parse_args()?;
                    Ok(Expr::Call {
                        callee: Box::new(Expr::Literal {
                            tt: Import,
                            text: "import",
                        }),
                        args,
                        optional: false,
                    })
                } else {
                    Err(self.fail_expected("import expression", &[".", "("]))
                }
            }
            Function => {
                self.next();
                let func = self.parse_func_named(false, false, false)?;
                Ok(Expr::Func(Box::new(func)))
            }
            Class => {
                self.next();
                let class = self.parse_class_named(false, false)?;
                Ok(Expr::Class(Box::new(class)))
            }
            Async => self.parse_async_tail(prec),
            _ if self.is_binding_ident() => {
                let name = self.data;
                self.next();
                if self.tt == Arrow && !self.prev_lt && prec <= OpPrec::Assign {
                    self.ident_arrow(name, false)
                } else {
                    Ok(Expr::Var(self.scope.use_name(name)))
                }
            }
            _ => Err(self.fail_unexpected("expression")),
        }
    }

    /// Continues an expression after the `async` keyword was consumed:
    /// an async function expression, an async arrow, or the plain
    /// identifier `async`.
    fn parse_async_tail(&mut self, prec: OpPrec) -> ParseResult<Expr<'s>> {
        use TokenType::*;
        if self.tt == Async {
            self.next();
        }
        if self.tt == Function && !self.prev_lt {
            self.next();
            let func = self.parse_func_named(false, true, false)?;
            return Ok(Expr::Func(Box::new(func)));
        }
        if self.tt == Arrow && !self.prev_lt && prec <= OpPrec::Assign {
            // `async => ...` — an arrow whose parameter is named `async`.
            return self.ident_arrow("async", false);
        }
        if self.tt == OpenParen && !self.prev_lt {
            return self.parse_paren_or_arrow(true);
        }
        if self.is_binding_ident() && !self.prev_lt && prec <= OpPrec::Assign {
            let name = self.data;
            self.next();
            if self.tt != Arrow || self.prev_lt {
                return Err(self.fail_expected("async arrow function", &["=>"]));
            }
            return self.ident_arrow(name, true);
        }
        Ok(Expr::Var(self.scope.use_name("async")))
    }

    fn parse_infix(&mut self, mut lhs: Expr<'s>, prec: OpPrec) -> ParseResult<Expr<'s>> {
        use TokenType::*;
        loop {
            // A yield expression can only be continued by a comma.
            if matches!(lhs, Expr::Yield { .. }) && self.tt != Comma {
                return Ok(lhs);
            }
            match self.tt {
                Eq | AddEq | SubEq | MulEq | DivEq | ModEq | ExpEq | LtLtEq | GtGtEq
                | GtGtGtEq | BitAndEq | BitOrEq | BitXorEq
                    if prec <= OpPrec::Assign =>
                {
                    let op = self.tt;
                    if !is_assign_target(&lhs, op == Eq) {
                        return Err(ParseError::new(
                            ParseErrorKind::InvalidAssignTarget,
                            self.span(),
                        ));
                    }
                    self.next();
                    let rhs = self.parse_expr(OpPrec::Assign)?;
                    lhs = Expr::Binary {
                        op,
                        left: Box::new(lhs),
                        right: Box::new(rhs),
                    };
                }
                Question if prec <= OpPrec::Assign => {
                    self.next();
                    let then = self.parse_expr(OpPrec::Assign)?;
                    self.expect(Colon, "conditional expression")?;
                    let alt = self.parse_expr(OpPrec::Assign)?;
                    lhs = Expr::Cond {
                        cond: Box::new(lhs),
                        then: Box::new(then),
                        alt: Box::new(alt),
                    };
                }
                Comma if prec == OpPrec::Expr => {
                    self.next();
                    let rhs = self.parse_expr(OpPrec::Assign)?;
                    lhs = match lhs {
                        Expr::Comma(mut list) => {
                            list.push(rhs);
                            Expr::Comma(list)
                        }
                        first => Expr::Comma(vec![first, rhs]),
                    };
                }
                Nullish if prec < OpPrec::Coalesce => {
                    // `??` refuses to associate with `&&`/`||` directly.
                    if matches!(&lhs, Expr::Binary { op: And, .. } | Expr::Binary { op: Or, .. })
                    {
                        return Err(self.fail_unexpected("coalescing expression"));
                    }
                    self.next();
                    let rhs = self.parse_expr(OpPrec::BitOr)?;
                    lhs = Expr::Binary {
                        op: Nullish,
                        left: Box::new(lhs),
                        right: Box::new(rhs),
                    };
                }
                Or if prec < OpPrec::Or => {
                    if matches!(&lhs, Expr::Binary { op: Nullish, .. }) {
                        return Err(self.fail_unexpected("logical expression"));
                    }
                    lhs = self.binary_rhs(lhs, OpPrec::Or)?;
                }
                And if prec < OpPrec::And => {
                    if matches!(&lhs, Expr::Binary { op: Nullish, .. }) {
                        return Err(self.fail_unexpected("logical expression"));
                    }
                    lhs = self.binary_rhs(lhs, OpPrec::And)?;
                }
                BitOr if prec < OpPrec::BitOr => lhs = self.binary_rhs(lhs, OpPrec::BitOr)?,
                BitXor if prec < OpPrec::BitXor => {
                    lhs = self.binary_rhs(lhs, OpPrec::BitXor)?
                }
                BitAnd if prec < OpPrec::BitAnd => {
                    lhs = self.binary_rhs(lhs, OpPrec::BitAnd)?
                }
                EqEq | NotEq | EqEqEq | NotEqEq if prec < OpPrec::Equals => {
                    lhs = self.binary_rhs(lhs, OpPrec::Equals)?
                }
                In if prec < OpPrec::Compare => {
                    if self.in_for_init {
                        // The `in` belongs to the enclosing for statement.
                        return Ok(lhs);
                    }
                    lhs = self.binary_rhs(lhs, OpPrec::Compare)?;
                }
                Lt | LtEq | Gt | GtEq | Instanceof if prec < OpPrec::Compare => {
                    lhs = self.binary_rhs(lhs, OpPrec::Compare)?
                }
                LtLt | GtGt | GtGtGt if prec < OpPrec::Shift => {
                    lhs = self.binary_rhs(lhs, OpPrec::Shift)?
                }
                Add | Sub if prec < OpPrec::Add => lhs = self.binary_rhs(lhs, OpPrec::Add)?,
                Mul | Div | Mod if prec < OpPrec::Mul => {
                    lhs = self.binary_rhs(lhs, OpPrec::Mul)?
                }
                Exp if prec < OpPrec::Exp => {
                    // Right-associative: the right side re-admits `**`.
                    let op = self.tt;
                    self.next();
                    let rhs = self.parse_expr(OpPrec::Mul)?;
                    lhs = Expr::Binary {
                        op,
                        left: Box::new(lhs),
                        right: Box::new(rhs),
                    };
                }
                Incr | Decr if !self.prev_lt && prec < OpPrec::Update => {
                    if !is_assign_target(&lhs, false) {
                        return Err(ParseError::new(
                            ParseErrorKind::InvalidAssignTarget,
                            self.span(),
                        ));
                    }
                    let op = if self.tt == Incr { PostIncr } else { PostDecr };
                    self.next();
                    lhs = Expr::Unary {
                        op,
                        operand: Box::new(lhs),
                    };
                }
                Dot if prec < OpPrec::Member => {
                    self.next();
                    if !self.tt.is_identifier() {
                        return Err(self.fail_expected("member expression", &["identifier"]));
                    }
                    let field = self.data;
                    self.next();
                    lhs = Expr::Dot {
                        obj: Box::new(lhs),
                        field,
                        optional: false,
                    };
                }
                OpenBracket if prec < OpPrec::Member => {
                    self.next();
                    let old = self.in_for_init;
                    self.in_for_init = false;
                    let index = self.parse_expr(OpPrec::Expr)?;
                    self.in_for_init = old;
                    self.expect(CloseBracket, "index expression")?;
                    lhs = Expr::Index {
                        obj: Box::new(lhs),
                        index: Box::new(index),
                        optional: false,
                    };
                }
                OpenParen if prec < OpPrec::Call => {
                    let args = self.parse_args()?;
                    lhs = Expr::Call {
                        callee: Box::new(lhs),
                        args,
                        optional: false,
                    };
                }
                OptChain if prec < OpPrec::Call => {
                    self.next();
                    match self.tt {
                        OpenParen => {
                            let args = self.parse_args()?;
                            lhs = Expr::Call {
                                callee: Box::new(lhs),
                                args,
                                optional: true,
                            };
                        }
                        OpenBracket => {
                            self.next();
                            let index = self.parse_expr(OpPrec::Expr)?;
                            self.expect(CloseBracket, "optional chain")?;
                            lhs = Expr::Index {
                                obj: Box::new(lhs),
                                index: Box::new(index),
                                optional: true,
                            };
                        }
                        Template | TemplateStart => {
                            lhs = self.parse_template(Some(lhs), true)?;
                        }
                        tt if tt.is_identifier() => {
                            let field = self.data;
                            self.next();
                            lhs = Expr::Dot {
                                obj: Box::new(lhs),
                                field,
                                optional: true,
                            };
                        }
                        _ => {
                            return Err(self.fail_expected(
                                "optional chain",
                                &["identifier", "(", "[", "template"],
                            ))
                        }
                    }
                }
                Template | TemplateStart if prec < OpPrec::Call => {
                    lhs = self.parse_template(Some(lhs), false)?;
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn parse_args(&mut self) -> ParseResult<Vec<Arg<'s>>> {
        self.expect(TokenType::OpenParen, "arguments")?;
        let old = self.in_for_init;
        self.in_for_init = false;
        let mut args = Vec::new();
        while self.tt != TokenType::CloseParen {
            let spread = self.eat(TokenType::Ellipsis);
            let value = self.parse_expr(OpPrec::Assign)?;
            args.push(Arg { spread, value });
            if !self.eat(TokenType::Comma) {
                break;
            }
        }
        self.in_for_init = old;
        self.expect(TokenType::CloseParen, "arguments")?;
        Ok(args)
    }

    fn parse_array_literal(&mut self) -> ParseResult<Expr<'s>> {
        self.next(); // [
        let old = self.in_for_init;
        self.in_for_init = false;
        let mut elements = Vec::new();
        loop {
            match self.tt {
                TokenType::CloseBracket => break,
                TokenType::Comma => {
                    // An elision.
                    elements.push(ArrayElement {
                        spread: false,
                        value: None,
                    });
                    self.next();
                }
                TokenType::Ellipsis => {
                    self.next();
                    let value = self.parse_expr(OpPrec::Assign)?;
                    elements.push(ArrayElement {
                        spread: true,
                        value: Some(value),
                    });
                    if !self.eat(TokenType::Comma) {
                        break;
                    }
                }
                _ => {
                    let value = self.parse_expr(OpPrec::Assign)?;
                    elements.push(ArrayElement {
                        spread: false,
                        value: Some(value),
                    });
                    if !self.eat(TokenType::Comma) {
                        break;
                    }
                }
            }
        }
        self.in_for_init = old;
        self.expect(TokenType::CloseBracket, "array literal")?;
        Ok(Expr::Array(elements))
    }

    fn parse_object_literal(&mut self) -> ParseResult<Expr<'s>> {
        self.next(); // {
        let old = self.in_for_init;
        self.in_for_init = false;
        let mut props = Vec::new();
        while self.tt != TokenType::CloseBrace {
            if self.tt == TokenType::Ellipsis {
                self.next();
                let value = self.parse_expr(OpPrec::Assign)?;
                props.push(Property::Spread(value));
            } else {
                props.push(self.parse_property()?);
            }
            if !self.eat(TokenType::Comma) {
                break;
            }
        }
        self.in_for_init = old;
        self.expect(TokenType::CloseBrace, "object literal")?;
        Ok(Expr::Object(props))
    }

    fn parse_template(
        &mut self,
        tag: Option<Expr<'s>>,
        optional: bool,
    ) -> ParseResult<Expr<'s>> {
        if self.tt == TokenType::Template {
            let lit = TemplateLit {
                tag,
                optional,
                parts: Vec::new(),
                tail: self.data,
            };
            self.next();
            return Ok(Expr::Template(Box::new(lit)));
        }
        // TemplateStart
        let mut parts = Vec::new();
        loop {
            let text = self.data;
            self.next();
            let old = self.in_for_init;
            self.in_for_init = false;
            let expr = self.parse_expr(OpPrec::Expr)?;
            self.in_for_init = old;
            parts.push(TemplatePart { text, expr });
            match self.tt {
                TokenType::TemplateMiddle => continue,
                TokenType::TemplateEnd => {
                    let tail = self.data;
                    self.next();
                    return Ok(Expr::Template(Box::new(TemplateLit {
                        tag,
                        optional,
                        parts,
                        tail,
                    })));
                }
                _ => return Err(self.fail_expected("template literal", &["}"])),
            }
        }
    }

    fn parse_new_expr(&mut self) -> ParseResult<Expr<'s>> {
        self.next(); // new
        if self.eat(TokenType::Dot) {
            if self.tt != TokenType::Target {
                return Err(self.fail_expected("new expression", &["target"]));
            }
            let in_function = {
                let cur = self.scope.current();
                let func = self.scope.scopes.get(cur).func;
                !self.scope.scopes.get(func).is_global
            };
            if !in_function {
                return Err(self.fail_unexpected("new.target expression"));
            }
            self.next();
            return Ok(Expr::NewTarget);
        }
        // The callee binds member accesses but not calls.
        let callee = self.parse_expr(OpPrec::Call)?;
        let args = if self.tt == TokenType::OpenParen {
            Some(self.parse_args()?)
        } else {
            None
        };
        Ok(Expr::New {
            callee: Box::new(callee),
            args,
        })
    }

    fn parse_paren_or_arrow(&mut self, is_async: bool) -> ParseResult<Expr<'s>> {
        let scope = self.scope.open(true);
        self.next(); // (
        let old = self.in_for_init;
        self.in_for_init = false;
        let mut items: Vec<(bool, Expr<'s>)> = Vec::new();
        while self.tt != TokenType::CloseParen {
            let spread = self.eat(TokenType::Ellipsis);
            let value = self.parse_expr(OpPrec::Assign)?;
            items.push((spread, value));
            if !self.eat(TokenType::Comma) {
                break;
            }
        }
        self.in_for_init = old;
        self.expect(TokenType::CloseParen, "parenthesized expression")?;

        if self.tt == TokenType::Arrow && !self.prev_lt {
            self.next();
            let mut params = Params::default();
            for (spread, value) in items {
                if params.rest.is_some() {
                    return Err(self.fail_unexpected("arrow function parameters"));
                }
                if spread {
                    params.rest = Some(Box::new(self.expr_to_binding(value)?));
                } else {
                    params.list.push(self.expr_to_binding_element(value)?);
                }
            }
            self.scope.mark_func_args();
            let body = self.parse_arrow_body(is_async)?;
            self.scope.close();
            return Ok(Expr::Arrow(Box::new(ArrowFunc {
                is_async,
                scope,
                params,
                body,
            })));
        }

        // Not an arrow after all: flatten the speculative scope.
        self.scope.undeclare();
        if is_async {
            // This was a call to an identifier named `async`.
            let callee = Expr::Var(self.scope.use_name("async"));
            let args = items
                .into_iter()
                .map(|(spread, value)| Arg { spread, value })
                .collect();
            return Ok(Expr::Call {
                callee: Box::new(callee),
                args,
                optional: false,
            });
        }
        if items.iter().any(|(spread, _)| *spread) {
            return Err(self.fail_expected("arrow function", &["=>"]));
        }
        let mut exprs: Vec<Expr<'s>> = items.into_iter().map(|(_, e)| e).collect();
        match exprs.len() {
            0 => Err(self.fail_expected("arrow function", &["=>"])),
            1 => Ok(Expr::Group(Box::new(exprs.remove(0)))),
            _ => Ok(Expr::Group(Box::new(Expr::Comma(exprs)))),
        }
    }

    fn ident_arrow(&mut self, name: &'s str, is_async: bool) -> ParseResult<Expr<'s>> {
        self.next(); // =>
        let scope = self.scope.open(true);
        let v = match self.scope.declare(DeclKind::ArgumentDecl, name) {
            Some(v) => v,
            None => return Err(self.fail_duplicate(name)),
        };
        self.scope.mark_func_args();
        let body = self.parse_arrow_body(is_async)?;
        self.scope.close();
        Ok(Expr::Arrow(Box::new(ArrowFunc {
            is_async,
            scope,
            params: Params {
                list: vec![BindingElement {
                    binding: Binding::Name(v),
                    default: None,
                }],
                rest: None,
            },
            body,
        })))
    }

    fn parse_arrow_body(&mut self, is_async: bool) -> ParseResult<ArrowBody<'s>> {
        let old_async = self.is_async;
        let old_generator = self.is_generator;
        self.is_async = is_async;
        self.is_generator = false;
        let body = if self.tt == TokenType::OpenBrace {
            self.next();
            let list = self.parse_stmt_list_until(TokenType::CloseBrace)?;
            self.expect(TokenType::CloseBrace, "arrow function body")?;
            ArrowBody::Block(list)
        } else {
            ArrowBody::Expr(Box::new(self.parse_expr(OpPrec::Assign)?))
        };
        self.is_async = old_async;
        self.is_generator = old_generator;
        Ok(body)
    }

    fn expr_to_binding_element(&mut self, expr: Expr<'s>) -> ParseResult<BindingElement<'s>> {
        match expr {
            Expr::Binary {
                op: TokenType::Eq,
                left,
                right,
            } => Ok(BindingElement {
                binding: self.expr_to_binding(*left)?,
                default: Some(*right),
            }),
            e => Ok(BindingElement {
                binding: self.expr_to_binding(e)?,
                default: None,
            }),
        }
    }

    fn expr_to_binding(&mut self, expr: Expr<'s>) -> ParseResult<Binding<'s>> {
        match expr {
            Expr::Var(v) => {
                if self.scope.convert_use_to_argument(v).is_err() {
                    let name = self.scope.vars.canonical(v).name.to_string();
                    return Err(ParseError::new(
                        ParseErrorKind::DuplicateDeclaration { name },
                        self.span(),
                    ));
                }
                Ok(Binding::Name(v))
            }
            Expr::Array(elements) => {
                let count = elements.len();
                let mut out = Vec::new();
                let mut rest = None;
                for (i, el) in elements.into_iter().enumerate() {
                    match el.value {
                        None => out.push(None),
                        Some(value) if el.spread => {
                            if i + 1 != count {
                                return Err(ParseError::new(
                                    ParseErrorKind::InvalidAssignTarget,
                                    self.span(),
                                ));
                            }
                            rest = Some(Box::new(self.expr_to_binding(value)?));
                        }
                        Some(value) => out.push(Some(self.expr_to_binding_element(value)?)),
                    }
                }
                Ok(Binding::Array {
                    elements: out,
                    rest,
                })
            }
            Expr::Object(props) => {
                let count = props.len();
                let mut items = Vec::new();
                let mut rest = None;
                for (i, prop) in props.into_iter().enumerate() {
                    match prop {
                        Property::Spread(Expr::Var(v)) => {
                            if i + 1 != count {
                                return Err(ParseError::new(
                                    ParseErrorKind::InvalidAssignTarget,
                                    self.span(),
                                ));
                            }
                            if self.scope.convert_use_to_argument(v).is_err() {
                                let name = self.scope.vars.canonical(v).name.to_string();
                                return Err(ParseError::new(
                                    ParseErrorKind::DuplicateDeclaration { name },
                                    self.span(),
                                ));
                            }
                            rest = Some(v);
                        }
                        Property::KeyValue { key, value } => items.push(BindingObjectItem {
                            key: Some(key),
                            value: self.expr_to_binding_element(value)?,
                        }),
                        Property::Shorthand { name, init } => {
                            if self.scope.convert_use_to_argument(name).is_err() {
                                let n = self.scope.vars.canonical(name).name.to_string();
                                return Err(ParseError::new(
                                    ParseErrorKind::DuplicateDeclaration { name: n },
                                    self.span(),
                                ));
                            }
                            items.push(BindingObjectItem {
                                key: None,
                                value: BindingElement {
                                    binding: Binding::Name(name),
                                    default: init,
                                },
                            });
                        }
                        _ => {
                            return Err(ParseError::new(
                                ParseErrorKind::InvalidAssignTarget,
                                self.span(),
                            ))
                        }
                    }
                }
                Ok(Binding::Object { items, rest })
            }
            _ => Err(ParseError::new(
                ParseErrorKind::InvalidAssignTarget,
                self.span(),
            )),
        }
    }

    /// The current token can begin an expression.
    fn expr_can_start(&self) -> bool {
        use TokenType::*;
        match self.tt {
            This | Null | True | False | Super | String | Decimal | Integer | Hexadecimal
            | Binary | Octal | Template | TemplateStart | OpenParen | OpenBracket
            | OpenBrace | Function | Class | New | Import | Not | BitNot | Typeof | Void
            | Delete | Incr | Decr | Add | Sub | Div | DivEq => true,
            _ => self.is_binding_ident() || self.tt == Async,
        }
    }
}

impl<'s> Parser<'s> {
    /// Left-associative binary operator: consume, parse the right side at
    /// the operator's own level, and fold.
    fn binary_rhs(&mut self, lhs: Expr<'s>, level: OpPrec) -> ParseResult<Expr<'s>> {
        let op = self.tt;
        self.next();
        let rhs = self.parse_expr(level)?;
        Ok(Expr::Binary {
            op,
            left: Box::new(lhs),
            right: Box::new(rhs),
        })
    }
}
