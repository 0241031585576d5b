//! Statement and declaration nodes.

use crate::ast::binding::{Binding, BindingElement};
use crate::ast::expr::{Expr, PropertyKey};
use crate::ast::vars::VarRef;
use crate::scope::ScopeId;
use crate::token::TokenType;

#[derive(Debug)]
pub enum Stmt<'s> {
    Block(BlockStmt<'s>),
    Empty,
    Expr(Expr<'s>),
    If {
        cond: Expr<'s>,
        then: Box<Stmt<'s>>,
        alt: Option<Box<Stmt<'s>>>,
    },
    DoWhile {
        body: Box<Stmt<'s>>,
        cond: Expr<'s>,
    },
    While {
        cond: Expr<'s>,
        body: Box<Stmt<'s>>,
    },
    /// Classic three-part `for`. The body block's scope also holds the
    /// header declarations.
    For {
        init: Option<ForInit<'s>>,
        cond: Option<Expr<'s>>,
        post: Option<Expr<'s>>,
        body: BlockStmt<'s>,
    },
    ForIn {
        target: ForTarget<'s>,
        object: Expr<'s>,
        body: BlockStmt<'s>,
    },
    ForOf {
        is_await: bool,
        target: ForTarget<'s>,
        iterable: Expr<'s>,
        body: BlockStmt<'s>,
    },
    Switch {
        scope: ScopeId,
        discriminant: Expr<'s>,
        cases: Vec<CaseClause<'s>>,
    },
    /// `break` or `continue` with an optional label.
    Branch {
        tt: TokenType,
        label: Option<&'s str>,
    },
    Return {
        value: Option<Expr<'s>>,
    },
    With {
        object: Expr<'s>,
        body: Box<Stmt<'s>>,
    },
    Labelled {
        label: &'s str,
        body: Box<Stmt<'s>>,
    },
    Throw {
        value: Expr<'s>,
    },
    Try {
        body: BlockStmt<'s>,
        catch: Option<CatchClause<'s>>,
        finally: Option<BlockStmt<'s>>,
    },
    Debugger,
    Import(ImportStmt<'s>),
    Export(ExportStmt<'s>),
    /// A string-literal statement in a directive prologue, e.g.
    /// `"use strict"`; raw text including quotes.
    Directive(&'s str),
    Var(VarDecl<'s>),
    Func(FuncDecl<'s>),
    Class(ClassDecl<'s>),
}

/// A braced statement list and the scope it opened.
#[derive(Debug)]
pub struct BlockStmt<'s> {
    pub scope: ScopeId,
    pub list: Vec<Stmt<'s>>,
}

/// `var`/`let`/`const` declaration with one or more declarators.
#[derive(Debug)]
pub struct VarDecl<'s> {
    pub tt: TokenType,
    pub list: Vec<BindingElement<'s>>,
}

#[derive(Debug)]
pub enum ForInit<'s> {
    Decl(VarDecl<'s>),
    Expr(Expr<'s>),
}

/// The part before `in`/`of` in a for-in/for-of head.
#[derive(Debug)]
pub enum ForTarget<'s> {
    Decl {
        tt: TokenType,
        binding: Binding<'s>,
    },
    Expr(Expr<'s>),
}

/// One `case test:` or `default:` arm.
#[derive(Debug)]
pub struct CaseClause<'s> {
    pub test: Option<Expr<'s>>,
    pub body: Vec<Stmt<'s>>,
}

/// `catch (binding) { ... }`; the block's scope holds the binding.
#[derive(Debug)]
pub struct CatchClause<'s> {
    pub binding: Option<Binding<'s>>,
    pub body: BlockStmt<'s>,
}

/// Formal parameters: positional elements plus an optional rest binding.
#[derive(Debug, Default)]
pub struct Params<'s> {
    pub list: Vec<BindingElement<'s>>,
    pub rest: Option<Box<Binding<'s>>>,
}

/// A function declaration, function expression, or method body.
#[derive(Debug)]
pub struct FuncDecl<'s> {
    pub is_async: bool,
    pub generator: bool,
    pub name: Option<VarRef>,
    pub params: Params<'s>,
    /// The body block; its scope is the function scope.
    pub body: BlockStmt<'s>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Normal,
    Getter,
    Setter,
}

#[derive(Debug)]
pub struct MethodDef<'s> {
    pub is_static: bool,
    pub is_async: bool,
    pub generator: bool,
    pub kind: MethodKind,
    pub key: PropertyKey<'s>,
    pub params: Params<'s>,
    pub body: BlockStmt<'s>,
}

#[derive(Debug)]
pub struct ClassDecl<'s> {
    pub name: Option<VarRef>,
    pub extends: Option<Expr<'s>>,
    pub methods: Vec<MethodDef<'s>>,
}

/// `import` in all its forms; `module` is the raw string including quotes.
#[derive(Debug)]
pub struct ImportStmt<'s> {
    pub default: Option<VarRef>,
    /// `* as ns`
    pub star: Option<VarRef>,
    /// `{ a, b as c }`; `None` when no named list was written.
    pub named: Option<Vec<ImportSpecifier<'s>>>,
    pub module: &'s str,
}

/// `name` as exported by the module, bound locally as `binding`.
#[derive(Debug)]
pub struct ImportSpecifier<'s> {
    pub name: &'s str,
    pub binding: VarRef,
}

#[derive(Debug)]
pub enum ExportStmt<'s> {
    /// `export { a, b as c }` with an optional `from`.
    Named {
        list: Vec<ExportSpecifier<'s>>,
        from: Option<&'s str>,
    },
    /// `export * from 'm'` / `export * as ns from 'm'`.
    Star {
        name: Option<&'s str>,
        from: &'s str,
    },
    /// `export` before a declaration statement.
    Decl(Box<Stmt<'s>>),
    /// `export default` before a declaration.
    DefaultDecl(Box<Stmt<'s>>),
    /// `export default` before an expression.
    DefaultExpr(Expr<'s>),
}

/// Local `name`, exported as `alias` when present.
#[derive(Debug)]
pub struct ExportSpecifier<'s> {
    pub name: &'s str,
    pub alias: Option<&'s str>,
}
