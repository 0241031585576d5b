//! Re-emits the AST as JavaScript.
//!
//! Output is whitespace-normalised: one space around binary operators,
//! statements on their own lines inside blocks, no indentation. The shape
//! of the printed source mirrors the AST exactly, so re-parsing the output
//! and printing again yields the same text.
//!
//! A few forms need explicit disambiguation: a member access on an integer
//! literal parenthesises the number (`(5).x`, since `5.x` would lex the
//! dot into the number), and nested sign operators keep a separating space
//! (`+ +a`, `- --a`).

use std::fmt::{self, Write};

use crate::ast::binding::{Binding, BindingElement, BindingObjectItem};
use crate::ast::expr::{ArrayElement, ArrowBody, Expr, Property, PropertyKey, TemplateLit};
use crate::ast::stmt::{
    BlockStmt, CatchClause, ClassDecl, ExportStmt, ForInit, ForTarget, FuncDecl, ImportStmt,
    MethodDef, MethodKind, Params, Stmt, VarDecl,
};
use crate::ast::vars::VarTable;
use crate::ast::Ast;
use crate::token::TokenType;

impl<'s> Ast<'s> {
    /// Writes the module back as JavaScript.
    pub fn to_js<W: Write>(&self, w: &mut W) -> fmt::Result {
        let mut p = JsPrinter {
            w,
            vars: &self.vars,
        };
        if let Some(comment) = self.comment {
            p.w.write_str(comment)?;
            p.w.write_char('\n')?;
        }
        for (i, stmt) in self.body.iter().enumerate() {
            if i > 0 {
                p.w.write_char('\n')?;
            }
            p.stmt(stmt)?;
        }
        Ok(())
    }

    pub fn to_js_string(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.to_js(&mut out);
        out
    }
}

pub(crate) struct JsPrinter<'a, 's, W: Write> {
    pub w: &'a mut W,
    pub vars: &'a VarTable<'s>,
}

impl<'a, 's, W: Write> JsPrinter<'a, 's, W> {
    fn name(&self, v: crate::ast::vars::VarRef) -> &'s str {
        self.vars.canonical(v).name
    }

    pub fn stmt(&mut self, stmt: &Stmt<'s>) -> fmt::Result {
        match stmt {
            Stmt::Block(block) => self.block(block),
            Stmt::Empty => self.w.write_char(';'),
            Stmt::Expr(e) => {
                self.expr(e)?;
                self.w.write_char(';')
            }
            Stmt::If { cond, then, alt } => {
                self.w.write_str("if (")?;
                self.expr(cond)?;
                self.w.write_str(") ")?;
                self.stmt(then)?;
                if let Some(alt) = alt {
                    self.w.write_str(" else ")?;
                    self.stmt(alt)?;
                }
                Ok(())
            }
            Stmt::DoWhile { body, cond } => {
                self.w.write_str("do ")?;
                self.stmt(body)?;
                self.w.write_str(" while (")?;
                self.expr(cond)?;
                self.w.write_str(");")
            }
            Stmt::While { cond, body } => {
                self.w.write_str("while (")?;
                self.expr(cond)?;
                self.w.write_str(") ")?;
                self.stmt(body)
            }
            Stmt::For {
                init,
                cond,
                post,
                body,
            } => {
                self.w.write_str("for (")?;
                match init {
                    Some(ForInit::Decl(decl)) => self.var_decl(decl)?,
                    Some(ForInit::Expr(e)) => self.expr(e)?,
                    None => {}
                }
                self.w.write_char(';')?;
                if let Some(cond) = cond {
                    self.w.write_char(' ')?;
                    self.expr(cond)?;
                }
                self.w.write_char(';')?;
                if let Some(post) = post {
                    self.w.write_char(' ')?;
                    self.expr(post)?;
                }
                self.w.write_str(") ")?;
                self.block(body)
            }
            Stmt::ForIn {
                target,
                object,
                body,
            } => {
                self.w.write_str("for (")?;
                self.for_target(target)?;
                self.w.write_str(" in ")?;
                self.expr(object)?;
                self.w.write_str(") ")?;
                self.block(body)
            }
            Stmt::ForOf {
                is_await,
                target,
                iterable,
                body,
            } => {
                self.w.write_str("for ")?;
                if *is_await {
                    self.w.write_str("await ")?;
                }
                self.w.write_char('(')?;
                self.for_target(target)?;
                self.w.write_str(" of ")?;
                self.expr(iterable)?;
                self.w.write_str(") ")?;
                self.block(body)
            }
            Stmt::Switch {
                discriminant,
                cases,
                ..
            } => {
                self.w.write_str("switch (")?;
                self.expr(discriminant)?;
                self.w.write_str(") {")?;
                for case in cases {
                    match &case.test {
                        Some(test) => {
                            self.w.write_str("\ncase ")?;
                            self.expr(test)?;
                            self.w.write_char(':')?;
                        }
                        None => self.w.write_str("\ndefault:")?,
                    }
                    for stmt in &case.body {
                        self.w.write_char('\n')?;
                        self.stmt(stmt)?;
                    }
                }
                self.w.write_str("\n}")
            }
            Stmt::Branch { tt, label } => {
                self.w.write_str(tt.as_str())?;
                if let Some(label) = label {
                    self.w.write_char(' ')?;
                    self.w.write_str(label)?;
                }
                self.w.write_char(';')
            }
            Stmt::Return { value } => {
                self.w.write_str("return")?;
                if let Some(value) = value {
                    self.w.write_char(' ')?;
                    self.expr(value)?;
                }
                self.w.write_char(';')
            }
            Stmt::With { object, body } => {
                self.w.write_str("with (")?;
                self.expr(object)?;
                self.w.write_str(") ")?;
                self.stmt(body)
            }
            Stmt::Labelled { label, body } => {
                self.w.write_str(label)?;
                self.w.write_str(": ")?;
                self.stmt(body)
            }
            Stmt::Throw { value } => {
                self.w.write_str("throw ")?;
                self.expr(value)?;
                self.w.write_char(';')
            }
            Stmt::Try {
                body,
                catch,
                finally,
            } => {
                self.w.write_str("try ")?;
                self.block(body)?;
                if let Some(CatchClause { binding, body }) = catch {
                    self.w.write_str(" catch ")?;
                    if let Some(binding) = binding {
                        self.w.write_char('(')?;
                        self.binding(binding)?;
                        self.w.write_str(") ")?;
                    }
                    self.block(body)?;
                }
                if let Some(finally) = finally {
                    self.w.write_str(" finally ")?;
                    self.block(finally)?;
                }
                Ok(())
            }
            Stmt::Debugger => self.w.write_str("debugger;"),
            Stmt::Import(import) => self.import(import),
            Stmt::Export(export) => self.export(export),
            Stmt::Directive(text) => {
                self.w.write_str(text)?;
                self.w.write_char(';')
            }
            Stmt::Var(decl) => {
                self.var_decl(decl)?;
                self.w.write_char(';')
            }
            Stmt::Func(func) => self.func(func),
            Stmt::Class(class) => self.class(class),
        }
    }

    fn block(&mut self, block: &BlockStmt<'s>) -> fmt::Result {
        if block.list.is_empty() {
            return self.w.write_str("{}");
        }
        self.w.write_char('{')?;
        for stmt in &block.list {
            self.w.write_char('\n')?;
            self.stmt(stmt)?;
        }
        self.w.write_str("\n}")
    }

    fn var_decl(&mut self, decl: &VarDecl<'s>) -> fmt::Result {
        self.w.write_str(decl.tt.as_str())?;
        self.w.write_char(' ')?;
        for (i, element) in decl.list.iter().enumerate() {
            if i > 0 {
                self.w.write_str(", ")?;
            }
            self.binding_element(element)?;
        }
        Ok(())
    }

    fn for_target(&mut self, target: &ForTarget<'s>) -> fmt::Result {
        match target {
            ForTarget::Decl { tt, binding } => {
                self.w.write_str(tt.as_str())?;
                self.w.write_char(' ')?;
                self.binding(binding)
            }
            ForTarget::Expr(e) => self.expr(e),
        }
    }

    fn import(&mut self, import: &ImportStmt<'s>) -> fmt::Result {
        self.w.write_str("import ")?;
        let mut wrote = false;
        if let Some(v) = import.default {
            self.w.write_str(self.name(v))?;
            wrote = true;
        }
        if let Some(v) = import.star {
            if wrote {
                self.w.write_str(", ")?;
            }
            self.w.write_str("* as ")?;
            self.w.write_str(self.name(v))?;
            wrote = true;
        }
        if let Some(named) = &import.named {
            if wrote {
                self.w.write_str(", ")?;
            }
            self.w.write_char('{')?;
            for (i, spec) in named.iter().enumerate() {
                if i > 0 {
                    self.w.write_str(", ")?;
                }
                self.w.write_str(spec.name)?;
                let local = self.name(spec.binding);
                if local != spec.name {
                    self.w.write_str(" as ")?;
                    self.w.write_str(local)?;
                }
            }
            self.w.write_char('}')?;
            wrote = true;
        }
        if wrote {
            self.w.write_str(" from ")?;
        }
        self.w.write_str(import.module)?;
        self.w.write_char(';')
    }

    fn export(&mut self, export: &ExportStmt<'s>) -> fmt::Result {
        match export {
            ExportStmt::Star { name, from } => {
                self.w.write_str("export *")?;
                if let Some(name) = name {
                    self.w.write_str(" as ")?;
                    self.w.write_str(name)?;
                }
                self.w.write_str(" from ")?;
                self.w.write_str(from)?;
                self.w.write_char(';')
            }
            ExportStmt::Named { list, from } => {
                self.w.write_str("export {")?;
                for (i, spec) in list.iter().enumerate() {
                    if i > 0 {
                        self.w.write_str(", ")?;
                    }
                    self.w.write_str(spec.name)?;
                    if let Some(alias) = spec.alias {
                        self.w.write_str(" as ")?;
                        self.w.write_str(alias)?;
                    }
                }
                self.w.write_char('}')?;
                if let Some(from) = from {
                    self.w.write_str(" from ")?;
                    self.w.write_str(from)?;
                }
                self.w.write_char(';')
            }
            ExportStmt::Decl(stmt) => {
                self.w.write_str("export ")?;
                self.stmt(stmt)
            }
            ExportStmt::DefaultDecl(stmt) => {
                self.w.write_str("export default ")?;
                self.stmt(stmt)
            }
            ExportStmt::DefaultExpr(e) => {
                self.w.write_str("export default ")?;
                self.expr(e)?;
                self.w.write_char(';')
            }
        }
    }

    fn func(&mut self, func: &FuncDecl<'s>) -> fmt::Result {
        if func.is_async {
            self.w.write_str("async ")?;
        }
        self.w.write_str("function")?;
        if func.generator {
            self.w.write_char('*')?;
        }
        if let Some(v) = func.name {
            self.w.write_char(' ')?;
            self.w.write_str(self.name(v))?;
        }
        self.params(&func.params)?;
        self.w.write_char(' ')?;
        self.block(&func.body)
    }

    fn class(&mut self, class: &ClassDecl<'s>) -> fmt::Result {
        self.w.write_str("class")?;
        if let Some(v) = class.name {
            self.w.write_char(' ')?;
            self.w.write_str(self.name(v))?;
        }
        if let Some(extends) = &class.extends {
            self.w.write_str(" extends ")?;
            self.expr(extends)?;
        }
        if class.methods.is_empty() {
            return self.w.write_str(" {}");
        }
        self.w.write_str(" {")?;
        for method in &class.methods {
            self.w.write_char('\n')?;
            self.method(method)?;
        }
        self.w.write_str("\n}")
    }

    fn method(&mut self, method: &MethodDef<'s>) -> fmt::Result {
        if method.is_static {
            self.w.write_str("static ")?;
        }
        if method.is_async {
            self.w.write_str("async ")?;
        }
        if method.generator {
            self.w.write_char('*')?;
        }
        match method.kind {
            MethodKind::Getter => self.w.write_str("get ")?,
            MethodKind::Setter => self.w.write_str("set ")?,
            MethodKind::Normal => {}
        }
        self.property_key(&method.key)?;
        self.params(&method.params)?;
        self.w.write_char(' ')?;
        self.block(&method.body)
    }

    fn params(&mut self, params: &Params<'s>) -> fmt::Result {
        self.w.write_char('(')?;
        for (i, element) in params.list.iter().enumerate() {
            if i > 0 {
                self.w.write_str(", ")?;
            }
            self.binding_element(element)?;
        }
        if let Some(rest) = &params.rest {
            if !params.list.is_empty() {
                self.w.write_str(", ")?;
            }
            self.w.write_str("...")?;
            self.binding(rest)?;
        }
        self.w.write_char(')')
    }

    pub fn binding(&mut self, binding: &Binding<'s>) -> fmt::Result {
        match binding {
            Binding::Name(v) => self.w.write_str(self.name(*v)),
            Binding::Array { elements, rest } => {
                self.w.write_char('[')?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.w.write_str(", ")?;
                    }
                    if let Some(element) = element {
                        self.binding_element(element)?;
                    }
                }
                if elements.last().map_or(false, Option::is_none) {
                    self.w.write_char(',')?;
                }
                if let Some(rest) = rest {
                    if !elements.is_empty() {
                        self.w.write_str(", ")?;
                    }
                    self.w.write_str("...")?;
                    self.binding(rest)?;
                }
                self.w.write_char(']')
            }
            Binding::Object { items, rest } => {
                self.w.write_char('{')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.w.write_str(", ")?;
                    }
                    self.binding_object_item(item)?;
                }
                if let Some(rest) = rest {
                    if !items.is_empty() {
                        self.w.write_str(", ")?;
                    }
                    self.w.write_str("...")?;
                    self.w.write_str(self.name(*rest))?;
                }
                self.w.write_char('}')
            }
        }
    }

    fn binding_object_item(&mut self, item: &BindingObjectItem<'s>) -> fmt::Result {
        if let Some(key) = &item.key {
            self.property_key(key)?;
            self.w.write_str(": ")?;
        }
        self.binding_element(&item.value)
    }

    fn binding_element(&mut self, element: &BindingElement<'s>) -> fmt::Result {
        self.binding(&element.binding)?;
        if let Some(default) = &element.default {
            self.w.write_str(" = ")?;
            self.expr(default)?;
        }
        Ok(())
    }

    fn property_key(&mut self, key: &PropertyKey<'s>) -> fmt::Result {
        match key {
            PropertyKey::Ident(name) => self.w.write_str(name),
            PropertyKey::String(text) => self.w.write_str(text),
            PropertyKey::Number { text, .. } => self.w.write_str(text),
            PropertyKey::Computed(e) => {
                self.w.write_char('[')?;
                self.expr(e)?;
                self.w.write_char(']')
            }
        }
    }

    pub fn expr(&mut self, expr: &Expr<'s>) -> fmt::Result {
        match expr {
            Expr::Literal { text, .. } => self.w.write_str(text),
            Expr::Var(v) => self.w.write_str(self.name(*v)),
            Expr::Array(elements) => self.array_literal(elements),
            Expr::Object(props) => {
                self.w.write_char('{')?;
                for (i, prop) in props.iter().enumerate() {
                    if i > 0 {
                        self.w.write_str(", ")?;
                    }
                    self.property(prop)?;
                }
                self.w.write_char('}')
            }
            Expr::Template(lit) => self.template(lit),
            Expr::Group(inner) => {
                self.w.write_char('(')?;
                self.expr(inner)?;
                self.w.write_char(')')
            }
            Expr::Index {
                obj,
                index,
                optional,
            } => {
                self.member_obj(obj)?;
                self.w.write_str(if *optional { "?.[" } else { "[" })?;
                self.expr(index)?;
                self.w.write_char(']')
            }
            Expr::Dot {
                obj,
                field,
                optional,
            } => {
                self.member_obj(obj)?;
                self.w.write_str(if *optional { "?." } else { "." })?;
                self.w.write_str(field)
            }
            Expr::Call {
                callee,
                args,
                optional,
            } => {
                self.expr(callee)?;
                self.w.write_str(if *optional { "?.(" } else { "(" })?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.w.write_str(", ")?;
                    }
                    if arg.spread {
                        self.w.write_str("...")?;
                    }
                    self.expr(&arg.value)?;
                }
                self.w.write_char(')')
            }
            Expr::New { callee, args } => {
                self.w.write_str("new ")?;
                self.expr(callee)?;
                if let Some(args) = args {
                    self.w.write_char('(')?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            self.w.write_str(", ")?;
                        }
                        if arg.spread {
                            self.w.write_str("...")?;
                        }
                        self.expr(&arg.value)?;
                    }
                    self.w.write_char(')')?;
                }
                Ok(())
            }
            Expr::NewTarget => self.w.write_str("new.target"),
            Expr::ImportMeta => self.w.write_str("import.meta"),
            Expr::Unary { op, operand } => self.unary(*op, operand),
            Expr::Binary { op, left, right } => {
                self.expr(left)?;
                match op {
                    TokenType::Comma => self.w.write_str(", ")?,
                    _ => {
                        self.w.write_char(' ')?;
                        self.w.write_str(op.as_str())?;
                        self.w.write_char(' ')?;
                    }
                }
                self.expr(right)
            }
            Expr::Cond { cond, then, alt } => {
                self.expr(cond)?;
                self.w.write_str(" ? ")?;
                self.expr(then)?;
                self.w.write_str(" : ")?;
                self.expr(alt)
            }
            Expr::Yield { star, operand } => {
                self.w.write_str("yield")?;
                if *star {
                    self.w.write_char('*')?;
                }
                if let Some(operand) = operand {
                    self.w.write_char(' ')?;
                    self.expr(operand)?;
                }
                Ok(())
            }
            Expr::Arrow(arrow) => {
                if arrow.is_async {
                    self.w.write_str("async ")?;
                }
                self.params(&arrow.params)?;
                self.w.write_str(" => ")?;
                match &arrow.body {
                    ArrowBody::Expr(e) => self.expr(e),
                    ArrowBody::Block(list) => {
                        if list.is_empty() {
                            return self.w.write_str("{}");
                        }
                        self.w.write_char('{')?;
                        for stmt in list {
                            self.w.write_char('\n')?;
                            self.stmt(stmt)?;
                        }
                        self.w.write_str("\n}")
                    }
                }
            }
            Expr::Func(func) => self.func(func),
            Expr::Class(class) => self.class(class),
            Expr::Comma(list) => {
                for (i, e) in list.iter().enumerate() {
                    if i > 0 {
                        self.w.write_str(", ")?;
                    }
                    self.expr(e)?;
                }
                Ok(())
            }
        }
    }

    fn array_literal(&mut self, elements: &[ArrayElement<'s>]) -> fmt::Result {
        self.w.write_char('[')?;
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                self.w.write_str(", ")?;
            }
            if element.spread {
                self.w.write_str("...")?;
            }
            if let Some(value) = &element.value {
                self.expr(value)?;
            }
        }
        if elements.last().map_or(false, |e| e.value.is_none()) {
            self.w.write_char(',')?;
        }
        self.w.write_char(']')
    }

    fn property(&mut self, prop: &Property<'s>) -> fmt::Result {
        match prop {
            Property::Spread(e) => {
                self.w.write_str("...")?;
                self.expr(e)
            }
            Property::KeyValue { key, value } => {
                self.property_key(key)?;
                self.w.write_str(": ")?;
                self.expr(value)
            }
            Property::Shorthand { name, init } => {
                self.w.write_str(self.name(*name))?;
                if let Some(init) = init {
                    self.w.write_str(" = ")?;
                    self.expr(init)?;
                }
                Ok(())
            }
            Property::Method(method) => self.method(method),
        }
    }

    fn template(&mut self, lit: &TemplateLit<'s>) -> fmt::Result {
        if let Some(tag) = &lit.tag {
            self.expr(tag)?;
            if lit.optional {
                self.w.write_str("?.")?;
            }
        }
        for part in &lit.parts {
            self.w.write_str(part.text)?;
            self.expr(&part.expr)?;
        }
        self.w.write_str(lit.tail)
    }

    /// Member-access base; an integer literal needs parentheses so the dot
    /// is not lexed into the number.
    fn member_obj(&mut self, obj: &Expr<'s>) -> fmt::Result {
        if let Expr::Literal {
            tt: TokenType::Integer,
            text,
        } = obj
        {
            self.w.write_char('(')?;
            self.w.write_str(text)?;
            return self.w.write_char(')');
        }
        self.expr(obj)
    }

    fn unary(&mut self, op: TokenType, operand: &Expr<'s>) -> fmt::Result {
        use TokenType::*;
        match op {
            PostIncr | PostDecr => {
                self.expr(operand)?;
                return self.w.write_str(op.as_str());
            }
            Typeof | Void | Delete | Await => {
                self.w.write_str(op.as_str())?;
                self.w.write_char(' ')?;
                return self.expr(operand);
            }
            _ => {}
        }
        self.w.write_str(op.as_str())?;
        // `+ +a` and `- --a` need the space to keep the signs apart.
        let same_sign = matches!(
            (op, operand),
            (
                Add | PreIncr,
                Expr::Unary {
                    op: Add | PreIncr,
                    ..
                }
            ) | (
                Sub | PreDecr,
                Expr::Unary {
                    op: Sub | PreDecr,
                    ..
                }
            )
        );
        if same_sign {
            self.w.write_char(' ')?;
        }
        self.expr(operand)
    }
}
