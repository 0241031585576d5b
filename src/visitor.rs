//! AST traversal.
//!
//! [`Visitor`] walks the tree read-only; [`VisitorMut`] hands out mutable
//! references so a pass can rewrite nodes in place. Both follow the same
//! protocol: override the `visit_*` hooks you care about and call the
//! matching `walk_*` function to descend.

use crate::ast::binding::{Binding, BindingElement};
use crate::ast::expr::{ArrowBody, Expr, Property, PropertyKey};
use crate::ast::stmt::{ExportStmt, ForInit, ForTarget, MethodDef, Params, Stmt};
use crate::ast::Ast;

pub trait Visitor<'s>: Sized {
    fn visit_stmt(&mut self, stmt: &Stmt<'s>) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr<'s>) {
        walk_expr(self, expr);
    }

    fn visit_binding(&mut self, binding: &Binding<'s>) {
        walk_binding(self, binding);
    }
}

pub trait VisitorMut<'s>: Sized {
    fn visit_stmt_mut(&mut self, stmt: &mut Stmt<'s>) {
        walk_stmt_mut(self, stmt);
    }

    fn visit_expr_mut(&mut self, expr: &mut Expr<'s>) {
        walk_expr_mut(self, expr);
    }

    fn visit_binding_mut(&mut self, binding: &mut Binding<'s>) {
        walk_binding_mut(self, binding);
    }
}

impl<'s> Ast<'s> {
    /// Visits every statement of the module in source order.
    pub fn walk<V: Visitor<'s>>(&self, v: &mut V) {
        for stmt in &self.body {
            v.visit_stmt(stmt);
        }
    }

    /// Visits every statement, allowing in-place mutation.
    pub fn walk_mut<V: VisitorMut<'s>>(&mut self, v: &mut V) {
        for stmt in &mut self.body {
            v.visit_stmt_mut(stmt);
        }
    }
}

pub fn walk_stmt<'s, V: Visitor<'s>>(v: &mut V, stmt: &Stmt<'s>) {
    match stmt {
        Stmt::Block(block) => {
            for s in &block.list {
                v.visit_stmt(s);
            }
        }
        Stmt::Empty | Stmt::Debugger | Stmt::Directive(_) => {}
        Stmt::Expr(e) => v.visit_expr(e),
        Stmt::If { cond, then, alt } => {
            v.visit_expr(cond);
            v.visit_stmt(then);
            if let Some(alt) = alt {
                v.visit_stmt(alt);
            }
        }
        Stmt::DoWhile { body, cond } => {
            v.visit_stmt(body);
            v.visit_expr(cond);
        }
        Stmt::While { cond, body } => {
            v.visit_expr(cond);
            v.visit_stmt(body);
        }
        Stmt::For {
            init,
            cond,
            post,
            body,
        } => {
            match init {
                Some(ForInit::Decl(decl)) => {
                    for element in &decl.list {
                        walk_binding_element(v, element);
                    }
                }
                Some(ForInit::Expr(e)) => v.visit_expr(e),
                None => {}
            }
            if let Some(cond) = cond {
                v.visit_expr(cond);
            }
            if let Some(post) = post {
                v.visit_expr(post);
            }
            for s in &body.list {
                v.visit_stmt(s);
            }
        }
        Stmt::ForIn {
            target,
            object,
            body,
        } => {
            walk_for_target(v, target);
            v.visit_expr(object);
            for s in &body.list {
                v.visit_stmt(s);
            }
        }
        Stmt::ForOf {
            target, iterable, body, ..
        } => {
            walk_for_target(v, target);
            v.visit_expr(iterable);
            for s in &body.list {
                v.visit_stmt(s);
            }
        }
        Stmt::Switch {
            discriminant,
            cases,
            ..
        } => {
            v.visit_expr(discriminant);
            for case in cases {
                if let Some(test) = &case.test {
                    v.visit_expr(test);
                }
                for s in &case.body {
                    v.visit_stmt(s);
                }
            }
        }
        Stmt::Branch { .. } => {}
        Stmt::Return { value } => {
            if let Some(value) = value {
                v.visit_expr(value);
            }
        }
        Stmt::With { object, body } => {
            v.visit_expr(object);
            v.visit_stmt(body);
        }
        Stmt::Labelled { body, .. } => v.visit_stmt(body),
        Stmt::Throw { value } => v.visit_expr(value),
        Stmt::Try {
            body,
            catch,
            finally,
        } => {
            for s in &body.list {
                v.visit_stmt(s);
            }
            if let Some(catch) = catch {
                if let Some(binding) = &catch.binding {
                    v.visit_binding(binding);
                }
                for s in &catch.body.list {
                    v.visit_stmt(s);
                }
            }
            if let Some(finally) = finally {
                for s in &finally.list {
                    v.visit_stmt(s);
                }
            }
        }
        Stmt::Import(_) => {}
        Stmt::Export(export) => match export {
            ExportStmt::Decl(stmt) | ExportStmt::DefaultDecl(stmt) => v.visit_stmt(stmt),
            ExportStmt::DefaultExpr(e) => v.visit_expr(e),
            ExportStmt::Named { .. } | ExportStmt::Star { .. } => {}
        },
        Stmt::Var(decl) => {
            for element in &decl.list {
                walk_binding_element(v, element);
            }
        }
        Stmt::Func(func) => {
            walk_params(v, &func.params);
            for s in &func.body.list {
                v.visit_stmt(s);
            }
        }
        Stmt::Class(class) => {
            if let Some(extends) = &class.extends {
                v.visit_expr(extends);
            }
            for method in &class.methods {
                walk_method(v, method);
            }
        }
    }
}

fn walk_for_target<'s, V: Visitor<'s>>(v: &mut V, target: &ForTarget<'s>) {
    match target {
        ForTarget::Decl { binding, .. } => v.visit_binding(binding),
        ForTarget::Expr(e) => v.visit_expr(e),
    }
}

fn walk_params<'s, V: Visitor<'s>>(v: &mut V, params: &Params<'s>) {
    for element in &params.list {
        walk_binding_element(v, element);
    }
    if let Some(rest) = &params.rest {
        v.visit_binding(rest);
    }
}

fn walk_method<'s, V: Visitor<'s>>(v: &mut V, method: &MethodDef<'s>) {
    if let PropertyKey::Computed(e) = &method.key {
        v.visit_expr(e);
    }
    walk_params(v, &method.params);
    for s in &method.body.list {
        v.visit_stmt(s);
    }
}

fn walk_binding_element<'s, V: Visitor<'s>>(v: &mut V, element: &BindingElement<'s>) {
    v.visit_binding(&element.binding);
    if let Some(default) = &element.default {
        v.visit_expr(default);
    }
}

pub fn walk_binding<'s, V: Visitor<'s>>(v: &mut V, binding: &Binding<'s>) {
    match binding {
        Binding::Name(_) => {}
        Binding::Array { elements, rest } => {
            for element in elements.iter().flatten() {
                walk_binding_element(v, element);
            }
            if let Some(rest) = rest {
                v.visit_binding(rest);
            }
        }
        Binding::Object { items, .. } => {
            for item in items {
                if let Some(PropertyKey::Computed(e)) = &item.key {
                    v.visit_expr(e);
                }
                walk_binding_element(v, &item.value);
            }
        }
    }
}

pub fn walk_expr<'s, V: Visitor<'s>>(v: &mut V, expr: &Expr<'s>) {
    match expr {
        Expr::Literal { .. }
        | Expr::Var(_)
        | Expr::NewTarget
        | Expr::ImportMeta => {}
        Expr::Array(elements) => {
            for element in elements {
                if let Some(value) = &element.value {
                    v.visit_expr(value);
                }
            }
        }
        Expr::Object(props) => {
            for prop in props {
                match prop {
                    Property::Spread(e) => v.visit_expr(e),
                    Property::KeyValue { key, value } => {
                        if let PropertyKey::Computed(e) = key {
                            v.visit_expr(e);
                        }
                        v.visit_expr(value);
                    }
                    Property::Shorthand { init, .. } => {
                        if let Some(init) = init {
                            v.visit_expr(init);
                        }
                    }
                    Property::Method(method) => walk_method(v, method),
                }
            }
        }
        Expr::Template(lit) => {
            if let Some(tag) = &lit.tag {
                v.visit_expr(tag);
            }
            for part in &lit.parts {
                v.visit_expr(&part.expr);
            }
        }
        Expr::Group(inner) => v.visit_expr(inner),
        Expr::Index { obj, index, .. } => {
            v.visit_expr(obj);
            v.visit_expr(index);
        }
        Expr::Dot { obj, .. } => v.visit_expr(obj),
        Expr::Call { callee, args, .. } => {
            v.visit_expr(callee);
            for arg in args {
                v.visit_expr(&arg.value);
            }
        }
        Expr::New { callee, args } => {
            v.visit_expr(callee);
            if let Some(args) = args {
                for arg in args {
                    v.visit_expr(&arg.value);
                }
            }
        }
        Expr::Unary { operand, .. } => v.visit_expr(operand),
        Expr::Binary { left, right, .. } => {
            v.visit_expr(left);
            v.visit_expr(right);
        }
        Expr::Cond { cond, then, alt } => {
            v.visit_expr(cond);
            v.visit_expr(then);
            v.visit_expr(alt);
        }
        Expr::Yield { operand, .. } => {
            if let Some(operand) = operand {
                v.visit_expr(operand);
            }
        }
        Expr::Arrow(arrow) => {
            walk_params(v, &arrow.params);
            match &arrow.body {
                ArrowBody::Expr(e) => v.visit_expr(e),
                ArrowBody::Block(list) => {
                    for s in list {
                        v.visit_stmt(s);
                    }
                }
            }
        }
        Expr::Func(func) => {
            walk_params(v, &func.params);
            for s in &func.body.list {
                v.visit_stmt(s);
            }
        }
        Expr::Class(class) => {
            if let Some(extends) = &class.extends {
                v.visit_expr(extends);
            }
            for method in &class.methods {
                walk_method(v, method);
            }
        }
        Expr::Comma(list) => {
            for e in list {
                v.visit_expr(e);
            }
        }
    }
}

pub fn walk_stmt_mut<'s, V: VisitorMut<'s>>(v: &mut V, stmt: &mut Stmt<'s>) {
    match stmt {
        Stmt::Block(block) => {
            for s in &mut block.list {
                v.visit_stmt_mut(s);
            }
        }
        Stmt::Empty | Stmt::Debugger | Stmt::Directive(_) => {}
        Stmt::Expr(e) => v.visit_expr_mut(e),
        Stmt::If { cond, then, alt } => {
            v.visit_expr_mut(cond);
            v.visit_stmt_mut(then);
            if let Some(alt) = alt {
                v.visit_stmt_mut(alt);
            }
        }
        Stmt::DoWhile { body, cond } => {
            v.visit_stmt_mut(body);
            v.visit_expr_mut(cond);
        }
        Stmt::While { cond, body } => {
            v.visit_expr_mut(cond);
            v.visit_stmt_mut(body);
        }
        Stmt::For {
            init,
            cond,
            post,
            body,
        } => {
            match init {
                Some(ForInit::Decl(decl)) => {
                    for element in &mut decl.list {
                        walk_binding_element_mut(v, element);
                    }
                }
                Some(ForInit::Expr(e)) => v.visit_expr_mut(e),
                None => {}
            }
            if let Some(cond) = cond {
                v.visit_expr_mut(cond);
            }
            if let Some(post) = post {
                v.visit_expr_mut(post);
            }
            for s in &mut body.list {
                v.visit_stmt_mut(s);
            }
        }
        Stmt::ForIn {
            target,
            object,
            body,
        } => {
            walk_for_target_mut(v, target);
            v.visit_expr_mut(object);
            for s in &mut body.list {
                v.visit_stmt_mut(s);
            }
        }
        Stmt::ForOf {
            target, iterable, body, ..
        } => {
            walk_for_target_mut(v, target);
            v.visit_expr_mut(iterable);
            for s in &mut body.list {
                v.visit_stmt_mut(s);
            }
        }
        Stmt::Switch {
            discriminant,
            cases,
            ..
        } => {
            v.visit_expr_mut(discriminant);
            for case in cases {
                if let Some(test) = &mut case.test {
                    v.visit_expr_mut(test);
                }
                for s in &mut case.body {
                    v.visit_stmt_mut(s);
                }
            }
        }
        Stmt::Branch { .. } => {}
        Stmt::Return { value } => {
            if let Some(value) = value {
                v.visit_expr_mut(value);
            }
        }
        Stmt::With { object, body } => {
            v.visit_expr_mut(object);
            v.visit_stmt_mut(body);
        }
        Stmt::Labelled { body, .. } => v.visit_stmt_mut(body),
        Stmt::Throw { value } => v.visit_expr_mut(value),
        Stmt::Try {
            body,
            catch,
            finally,
        } => {
            for s in &mut body.list {
                v.visit_stmt_mut(s);
            }
            if let Some(catch) = catch {
                if let Some(binding) = &mut catch.binding {
                    v.visit_binding_mut(binding);
                }
                for s in &mut catch.body.list {
                    v.visit_stmt_mut(s);
                }
            }
            if let Some(finally) = finally {
                for s in &mut finally.list {
                    v.visit_stmt_mut(s);
                }
            }
        }
        Stmt::Import(_) => {}
        Stmt::Export(export) => match export {
            ExportStmt::Decl(stmt) | ExportStmt::DefaultDecl(stmt) => v.visit_stmt_mut(stmt),
            ExportStmt::DefaultExpr(e) => v.visit_expr_mut(e),
            ExportStmt::Named { .. } | ExportStmt::Star { .. } => {}
        },
        Stmt::Var(decl) => {
            for element in &mut decl.list {
                walk_binding_element_mut(v, element);
            }
        }
        Stmt::Func(func) => {
            walk_params_mut(v, &mut func.params);
            for s in &mut func.body.list {
                v.visit_stmt_mut(s);
            }
        }
        Stmt::Class(class) => {
            if let Some(extends) = &mut class.extends {
                v.visit_expr_mut(extends);
            }
            for method in &mut class.methods {
                walk_method_mut(v, method);
            }
        }
    }
}

fn walk_for_target_mut<'s, V: VisitorMut<'s>>(v: &mut V, target: &mut ForTarget<'s>) {
    match target {
        ForTarget::Decl { binding, .. } => v.visit_binding_mut(binding),
        ForTarget::Expr(e) => v.visit_expr_mut(e),
    }
}

fn walk_params_mut<'s, V: VisitorMut<'s>>(v: &mut V, params: &mut Params<'s>) {
    for element in &mut params.list {
        walk_binding_element_mut(v, element);
    }
    if let Some(rest) = &mut params.rest {
        v.visit_binding_mut(rest);
    }
}

fn walk_method_mut<'s, V: VisitorMut<'s>>(v: &mut V, method: &mut MethodDef<'s>) {
    if let PropertyKey::Computed(e) = &mut method.key {
        v.visit_expr_mut(e);
    }
    walk_params_mut(v, &mut method.params);
    for s in &mut method.body.list {
        v.visit_stmt_mut(s);
    }
}

fn walk_binding_element_mut<'s, V: VisitorMut<'s>>(v: &mut V, element: &mut BindingElement<'s>) {
    v.visit_binding_mut(&mut element.binding);
    if let Some(default) = &mut element.default {
        v.visit_expr_mut(default);
    }
}

pub fn walk_binding_mut<'s, V: VisitorMut<'s>>(v: &mut V, binding: &mut Binding<'s>) {
    match binding {
        Binding::Name(_) => {}
        Binding::Array { elements, rest } => {
            for element in elements.iter_mut().flatten() {
                walk_binding_element_mut(v, element);
            }
            if let Some(rest) = rest {
                v.visit_binding_mut(rest);
            }
        }
        Binding::Object { items, .. } => {
            for item in items {
                if let Some(PropertyKey::Computed(e)) = &mut item.key {
                    v.visit_expr_mut(e);
                }
                walk_binding_element_mut(v, &mut item.value);
            }
        }
    }
}

pub fn walk_expr_mut<'s, V: VisitorMut<'s>>(v: &mut V, expr: &mut Expr<'s>) {
    match expr {
        Expr::Literal { .. }
        | Expr::Var(_)
        | Expr::NewTarget
        | Expr::ImportMeta => {}
        Expr::Array(elements) => {
            for element in elements {
                if let Some(value) = &mut element.value {
                    v.visit_expr_mut(value);
                }
            }
        }
        Expr::Object(props) => {
            for prop in props {
                match prop {
                    Property::Spread(e) => v.visit_expr_mut(e),
                    Property::KeyValue { key, value } => {
                        if let PropertyKey::Computed(e) = key {
                            v.visit_expr_mut(e);
                        }
                        v.visit_expr_mut(value);
                    }
                    Property::Shorthand { init, .. } => {
                        if let Some(init) = init {
                            v.visit_expr_mut(init);
                        }
                    }
                    Property::Method(method) => walk_method_mut(v, method),
                }
            }
        }
        Expr::Template(lit) => {
            if let Some(tag) = &mut lit.tag {
                v.visit_expr_mut(tag);
            }
            for part in &mut lit.parts {
                v.visit_expr_mut(&mut part.expr);
            }
        }
        Expr::Group(inner) => v.visit_expr_mut(inner),
        Expr::Index { obj, index, .. } => {
            v.visit_expr_mut(obj);
            v.visit_expr_mut(index);
        }
        Expr::Dot { obj, .. } => v.visit_expr_mut(obj),
        Expr::Call { callee, args, .. } => {
            v.visit_expr_mut(callee);
            for arg in args {
                v.visit_expr_mut(&mut arg.value);
            }
        }
        Expr::New { callee, args } => {
            v.visit_expr_mut(callee);
            if let Some(args) = args {
                for arg in args {
                    v.visit_expr_mut(&mut arg.value);
                }
            }
        }
        Expr::Unary { operand, .. } => v.visit_expr_mut(operand),
        Expr::Binary { left, right, .. } => {
            v.visit_expr_mut(left);
            v.visit_expr_mut(right);
        }
        Expr::Cond { cond, then, alt } => {
            v.visit_expr_mut(cond);
            v.visit_expr_mut(then);
            v.visit_expr_mut(alt);
        }
        Expr::Yield { operand, .. } => {
            if let Some(operand) = operand {
                v.visit_expr_mut(operand);
            }
        }
        Expr::Arrow(arrow) => {
            walk_params_mut(v, &mut arrow.params);
            match &mut arrow.body {
                ArrowBody::Expr(e) => v.visit_expr_mut(e),
                ArrowBody::Block(list) => {
                    for s in list {
                        v.visit_stmt_mut(s);
                    }
                }
            }
        }
        Expr::Func(func) => {
            walk_params_mut(v, &mut func.params);
            for s in &mut func.body.list {
                v.visit_stmt_mut(s);
            }
        }
        Expr::Class(class) => {
            if let Some(extends) = &mut class.extends {
                v.visit_expr_mut(extends);
            }
            for method in &mut class.methods {
                walk_method_mut(v, method);
            }
        }
        Expr::Comma(list) => {
            for e in list {
                v.visit_expr_mut(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::token::TokenType;

    struct VarCounter {
        count: usize,
    }

    impl<'s> Visitor<'s> for VarCounter {
        fn visit_expr(&mut self, expr: &Expr<'s>) {
            if matches!(expr, Expr::Var(_)) {
                self.count += 1;
            }
            walk_expr(self, expr);
        }
    }

    struct NumberZeroer;

    impl<'s> VisitorMut<'s> for NumberZeroer {
        fn visit_expr_mut(&mut self, expr: &mut Expr<'s>) {
            if let Expr::Literal { tt: TokenType::Integer, text } = expr {
                *text = "0";
            }
            walk_expr_mut(self, expr);
        }
    }

    #[test]
    fn visitor_counts_variable_references() {
        let ast = parse("var a = b + c; f(a, d);").unwrap();
        let mut counter = VarCounter { count: 0 };
        ast.walk(&mut counter);
        // b, c, f, a, d — the declaration binding itself is not a
        // variable-reference expression.
        assert_eq!(counter.count, 5);
    }

    #[test]
    fn mut_visitor_rewrites_literals() {
        let mut ast = parse("x = 1 + 2;").unwrap();
        let mut zeroer = NumberZeroer;
        ast.walk_mut(&mut zeroer);
        assert_eq!(ast.to_js_string(), "x = 0 + 0;");
    }
}
