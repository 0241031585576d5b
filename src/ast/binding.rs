//! Binding targets: the left-hand side of declarations and the shapes of
//! formal parameters.

use crate::ast::expr::{Expr, PropertyKey};
use crate::ast::vars::VarRef;

#[derive(Debug)]
pub enum Binding<'s> {
    /// A simple name; the handle points at its declaration.
    Name(VarRef),
    /// `[a, , b = 1, ...rest]` — elisions are `None` slots.
    Array {
        elements: Vec<Option<BindingElement<'s>>>,
        rest: Option<Box<Binding<'s>>>,
    },
    /// `{a, b: c = 1, [k]: d, ...rest}` — the rest target must be a simple
    /// name.
    Object {
        items: Vec<BindingObjectItem<'s>>,
        rest: Option<VarRef>,
    },
}

/// A binding with an optional default expression.
#[derive(Debug)]
pub struct BindingElement<'s> {
    pub binding: Binding<'s>,
    pub default: Option<Expr<'s>>,
}

/// One `key: target` pair of an object pattern; a `None` key is the
/// shorthand form.
#[derive(Debug)]
pub struct BindingObjectItem<'s> {
    pub key: Option<PropertyKey<'s>>,
    pub value: BindingElement<'s>,
}
