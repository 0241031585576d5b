//! The abstract syntax tree.
//!
//! Nodes come in three families — statements, expressions, bindings — and
//! borrow their payloads from the source text. Identifier references carry
//! [`vars::VarRef`] handles into the AST's variable table, and every node
//! that opens a scope carries a [`crate::scope::ScopeId`] into the scope
//! table; both tables are fields of [`Ast`], so the tree is free of cyclic
//! references.

pub mod binding;
pub mod expr;
pub mod stmt;
pub mod vars;

pub use binding::{Binding, BindingElement, BindingObjectItem};
pub use expr::{
    Arg, ArrayElement, ArrowBody, ArrowFunc, Expr, Property, PropertyKey, TemplateLit,
    TemplatePart,
};
pub use stmt::{
    BlockStmt, CaseClause, CatchClause, ClassDecl, ExportStmt, ExportSpecifier, ForInit,
    ForTarget, FuncDecl, ImportSpecifier, ImportStmt, MethodDef, MethodKind, Params, Stmt,
    VarDecl,
};
pub use vars::{DeclKind, Var, VarRef, VarTable};

use crate::scope::{ScopeId, ScopeTable};

/// A parsed module, its scope tree, and its variable table.
///
/// The AST borrows the source text it was parsed from; identifier and
/// literal payloads are sub-slices of that text.
#[derive(Debug)]
pub struct Ast<'s> {
    pub source: &'s str,
    /// Leading file comment, kept so the printer can re-emit it.
    pub comment: Option<&'s str>,
    pub body: Vec<Stmt<'s>>,
    pub scopes: ScopeTable,
    pub vars: VarTable<'s>,
}

impl<'s> Ast<'s> {
    /// The module's top-level (global) scope.
    pub fn global_scope(&self) -> ScopeId {
        ScopeId::GLOBAL
    }
}
