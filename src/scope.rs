//! Lexical scope resolution.
//!
//! The parser drives a [`ScopeStack`] while it builds the AST: every block
//! and function body opens a scope, every declaration and identifier use
//! lands in the scope that is open at that point, and closing a scope
//! bubbles its unresolved names into the parent. `var` and `function`
//! declarations hoist to the nearest function scope; `let`, `const`, and
//! `class` stay in the block that declared them.
//!
//! Scopes are records in a flat table addressed by [`ScopeId`]; AST nodes
//! store the id of the scope they opened. The variable table lives here
//! during parsing and moves into the finished AST together with the scope
//! table.

use crate::ast::vars::{DeclKind, VarRef, VarTable};

/// Index into the AST's scope table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The module's top-level scope is always the first table entry.
    pub const GLOBAL: ScopeId = ScopeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    /// Nearest enclosing function scope; the global scope is its own.
    pub func: ScopeId,
    /// Variables bound by this scope.
    pub declared: Vec<VarRef>,
    /// Names used here but not (yet) bound here.
    pub undeclared: Vec<VarRef>,
    /// Prefix of `declared` introduced by a `for` header.
    pub num_for_decls: usize,
    /// Prefix of `declared` that are formal parameters.
    pub num_func_args: usize,
    /// Prefix of `undeclared` observed within argument initializers.
    pub num_arg_uses: usize,
    has_for_mark: bool,
    pub is_global: bool,
    pub is_function: bool,
    /// A `with` statement is lexically contained; name resolution inside is
    /// conservative.
    pub has_with: bool,
}

#[derive(Debug, Default)]
pub struct ScopeTable {
    scopes: Vec<Scope>,
}

impl ScopeTable {
    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn get_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }
}

/// The resolver the parser talks to. Owns the scope and variable tables
/// until parsing finishes.
pub struct ScopeStack<'s> {
    pub scopes: ScopeTable,
    pub vars: VarTable<'s>,
    current: ScopeId,
}

impl<'s> ScopeStack<'s> {
    /// Creates the stack with the global (module) scope open.
    pub fn new() -> Self {
        let global = Scope {
            parent: None,
            func: ScopeId(0),
            declared: Vec::new(),
            undeclared: Vec::new(),
            num_for_decls: 0,
            num_func_args: 0,
            num_arg_uses: 0,
            has_for_mark: false,
            is_global: true,
            is_function: true,
            has_with: false,
        };
        ScopeStack {
            scopes: ScopeTable {
                scopes: vec![global],
            },
            vars: VarTable::new(),
            current: ScopeId(0),
        }
    }

    pub fn current(&self) -> ScopeId {
        self.current
    }

    pub fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Opens a child of the current scope and makes it current.
    pub fn open(&mut self, is_function: bool) -> ScopeId {
        let id = ScopeId(self.scopes.scopes.len() as u32);
        let func = if is_function {
            id
        } else {
            self.scopes.get(self.current).func
        };
        self.scopes.scopes.push(Scope {
            parent: Some(self.current),
            func,
            declared: Vec::new(),
            undeclared: Vec::new(),
            num_for_decls: 0,
            num_func_args: 0,
            num_arg_uses: 0,
            has_for_mark: false,
            is_global: false,
            is_function,
            has_with: false,
        });
        self.current = id;
        id
    }

    /// Closes the current scope: unresolved names merge into the parent
    /// (or move there when the parent has never seen them), then the parent
    /// becomes current.
    pub fn close(&mut self) {
        let id = self.current;
        let parent = match self.scopes.get(id).parent {
            Some(p) => p,
            None => return,
        };
        self.hoist_undeclared(id, parent);
        self.current = parent;
    }

    fn find_declared(&self, scope: ScopeId, name: &str) -> Option<VarRef> {
        let s = self.scopes.get(scope);
        s.declared
            .iter()
            .rev()
            .copied()
            .find(|&v| self.vars.get(v).name == name)
    }

    fn find_undeclared(&self, scope: ScopeId, name: &str) -> Option<VarRef> {
        let s = self.scopes.get(scope);
        s.undeclared
            .iter()
            .rev()
            .copied()
            .find(|&v| self.vars.get(v).name == name)
    }

    /// Declares `name` with `kind` in the scope the declaration textually
    /// appears in; `var` and `function` hoist to the nearest function
    /// scope. Returns `None` on a redeclaration conflict.
    pub fn declare(&mut self, kind: DeclKind, name: &'s str) -> Option<VarRef> {
        let textual = self.current;
        let hoists = matches!(kind, DeclKind::VariableDecl | DeclKind::FunctionDecl);

        // Walk to the effective scope, rejecting a hoist through a
        // conflicting lexical binding (a catch-clause binding is permitted).
        let mut effective = textual;
        if hoists {
            loop {
                let s = self.scopes.get(effective);
                if s.is_function {
                    break;
                }
                if let Some(v) = self.find_declared(effective, name) {
                    let existing = self.vars.canonical(v).decl;
                    if existing == DeclKind::LexicalDecl {
                        return None;
                    }
                    if existing == DeclKind::CatchDecl {
                        // `catch (e) { var e }` re-uses the catch binding.
                        self.vars.get_mut(self.vars.resolve(v)).uses += 1;
                        return Some(v);
                    }
                }
                effective = s.parent?;
            }
        }

        if let Some(v) = self.find_declared_for_decl(effective, name, kind) {
            let canon = self.vars.resolve(v);
            let existing = self.vars.get(canon).decl;
            if existing == DeclKind::ExprDecl {
                // A var with the function expression's own name promotes the
                // name to a normal declaration.
                self.vars.get_mut(canon).decl = kind;
                self.vars.get_mut(canon).uses += 1;
            } else if existing == DeclKind::LexicalDecl || kind == DeclKind::LexicalDecl {
                return None;
            } else {
                self.vars.get_mut(canon).uses += 1;
            }
            if textual != effective {
                self.note_use_in(textual, v);
            }
            return Some(v);
        }

        // A forward reference recorded before the declaration: merge with
        // it so earlier handles keep resolving. Uses inside argument
        // initializers stay distinct.
        let s = self.scopes.get(effective);
        let from = s.num_arg_uses;
        let mut merged = None;
        for &v in s.undeclared[from..].iter().rev() {
            if self.vars.get(v).name != name {
                continue;
            }
            if self.vars.canonical(v).decl == DeclKind::NoDecl {
                merged = Some(v);
            } else if kind == DeclKind::LexicalDecl {
                // The name is already bound by a declaration hoisted
                // through this scope.
                return None;
            }
            break;
        }
        let v = match merged {
            Some(v) => {
                let pos = self
                    .scopes
                    .get(effective)
                    .undeclared
                    .iter()
                    .rposition(|&u| u == v)
                    .unwrap();
                self.scopes.get_mut(effective).undeclared.remove(pos);
                let canon = self.vars.resolve(v);
                self.vars.get_mut(canon).decl = kind;
                self.vars.get_mut(canon).uses += 1;
                v
            }
            None => self.vars.push(name, kind),
        };
        self.scopes.get_mut(effective).declared.push(v);
        if textual != effective {
            self.note_use_in(textual, v);
        }
        Some(v)
    }

    /// Like `find_declared`, but declarations behind a `for` header mark do
    /// not collide with lexical declarations made in the loop body.
    fn find_declared_for_decl(
        &self,
        scope: ScopeId,
        name: &str,
        kind: DeclKind,
    ) -> Option<VarRef> {
        let s = self.scopes.get(scope);
        for (idx, &v) in s.declared.iter().enumerate().rev() {
            if self.vars.get(v).name != name {
                continue;
            }
            if s.has_for_mark && idx < s.num_for_decls && kind == DeclKind::LexicalDecl {
                // A body-level `let` shadows the same name in the header.
                return None;
            }
            return Some(v);
        }
        None
    }

    /// Records `v` as visible-but-not-bound in `scope` so later uses there
    /// find it without walking the parent chain.
    fn note_use_in(&mut self, scope: ScopeId, v: VarRef) {
        let name = self.vars.get(v).name;
        if self.find_declared(scope, name).is_some()
            || self.find_undeclared(scope, name).is_some()
        {
            return;
        }
        self.scopes.get_mut(scope).undeclared.push(v);
    }

    /// Resolves a name use in the current scope, creating an undeclared
    /// entry when the name is unknown.
    pub fn use_name(&mut self, name: &'s str) -> VarRef {
        if let Some(v) = self.find_declared(self.current, name) {
            let canon = self.vars.resolve(v);
            self.vars.get_mut(canon).uses += 1;
            return v;
        }
        if let Some(v) = self.find_undeclared(self.current, name) {
            let canon = self.vars.resolve(v);
            self.vars.get_mut(canon).uses += 1;
            return v;
        }
        let v = self.vars.push(name, DeclKind::NoDecl);
        self.scopes.get_mut(self.current).undeclared.push(v);
        v
    }

    /// Snapshot after a `for` header: later declarations belong to the loop
    /// body and may shadow header bindings.
    pub fn mark_for_stmt(&mut self) {
        let s = self.scopes.get_mut(self.current);
        s.has_for_mark = true;
        s.num_for_decls = s.declared.len();
    }

    /// Snapshot after the full parameter list (bindings and initializers):
    /// body declarations of a name used only in an initializer get a fresh
    /// variable.
    pub fn mark_func_args(&mut self) {
        let s = self.scopes.get_mut(self.current);
        s.num_func_args = s.declared.len();
        s.num_arg_uses = s.undeclared.len();
    }

    /// Marks the current scope (and its function scope) as containing a
    /// `with` statement.
    pub fn set_has_with(&mut self) {
        let func = self.scopes.get(self.current).func;
        self.scopes.get_mut(self.current).has_with = true;
        self.scopes.get_mut(func).has_with = true;
    }

    /// Merges every unresolved name of `child` into `parent`: linked when
    /// the parent knows the name, moved into the parent's undeclared list
    /// otherwise.
    fn hoist_undeclared(&mut self, child: ScopeId, parent: ScopeId) {
        let entries = std::mem::take(&mut self.scopes.get_mut(child).undeclared);
        let mut kept = Vec::with_capacity(entries.len());
        for u in entries {
            let canon = self.vars.resolve(u);
            if self.vars.get(canon).decl != DeclKind::NoDecl {
                // Already resolved to a declaration (e.g. a hoisted var
                // noted in this scope).
                kept.push(u);
                continue;
            }
            let name = self.vars.get(canon).name;
            if let Some(d) = self.find_declared(parent, name) {
                self.vars.merge(canon, d);
                kept.push(u);
            } else if let Some(d) = self.find_undeclared(parent, name) {
                self.vars.merge(canon, d);
                kept.push(u);
            } else {
                self.scopes.get_mut(parent).undeclared.push(u);
            }
        }
        self.scopes.get_mut(child).undeclared = kept;
    }

    /// Turns a name that was used inside a speculative arrow parameter
    /// list into that parameter's declaration. Fails when the name is
    /// already a parameter (a duplicate in the list).
    pub fn convert_use_to_argument(&mut self, v: VarRef) -> Result<(), ()> {
        let canon = self.vars.resolve(v);
        if self.vars.get(canon).decl == DeclKind::ArgumentDecl {
            return Err(());
        }
        self.vars.get_mut(canon).decl = DeclKind::ArgumentDecl;
        let cur = self.current;
        let pos = {
            let s = self.scopes.get(cur);
            s.undeclared
                .iter()
                .rposition(|&u| self.vars.resolve(u) == canon)
        };
        if let Some(pos) = pos {
            self.scopes.get_mut(cur).undeclared.remove(pos);
        }
        self.scopes.get_mut(cur).declared.push(canon);
        Ok(())
    }

    /// Unwinds a speculative function scope that turned out not to be an
    /// arrow parameter list: everything it bound or used is handed back to
    /// the parent as undeclared, and the parent becomes current.
    pub fn undeclare(&mut self) {
        let id = self.current;
        let parent = match self.scopes.get(id).parent {
            Some(p) => p,
            None => return,
        };
        let declared = std::mem::take(&mut self.scopes.get_mut(id).declared);
        for v in declared {
            let canon = self.vars.resolve(v);
            self.vars.get_mut(canon).decl = DeclKind::NoDecl;
            self.scopes.get_mut(id).undeclared.push(v);
        }
        let s = self.scopes.get_mut(id);
        s.num_func_args = 0;
        s.num_arg_uses = 0;
        self.hoist_undeclared(id, parent);
        self.current = parent;
    }
}

impl<'s> Default for ScopeStack<'s> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_scope_is_its_own_function_scope() {
        let stack: ScopeStack = ScopeStack::new();
        let g = stack.scopes.get(stack.global());
        assert!(g.is_global);
        assert!(g.is_function);
        assert_eq!(g.func, stack.global());
    }

    #[test]
    fn var_hoists_through_blocks() {
        let mut stack = ScopeStack::new();
        stack.open(false); // block
        let v = stack.declare(DeclKind::VariableDecl, "a").unwrap();
        assert_eq!(stack.scopes.get(stack.global()).declared, vec![v]);
        // The block notes the name so later uses resolve locally.
        assert_eq!(stack.scopes.get(stack.current()).undeclared, vec![v]);
    }

    #[test]
    fn lexical_stays_in_block() {
        let mut stack = ScopeStack::new();
        let block = stack.open(false);
        let v = stack.declare(DeclKind::LexicalDecl, "a").unwrap();
        assert_eq!(stack.scopes.get(block).declared, vec![v]);
        assert!(stack.scopes.get(stack.global()).declared.is_empty());
    }

    #[test]
    fn duplicate_lexical_fails() {
        let mut stack = ScopeStack::new();
        stack.declare(DeclKind::LexicalDecl, "a").unwrap();
        assert!(stack.declare(DeclKind::LexicalDecl, "a").is_none());
        assert!(stack.declare(DeclKind::VariableDecl, "a").is_none());
    }

    #[test]
    fn lexical_after_hoisted_var_in_block_fails() {
        let mut stack = ScopeStack::new();
        stack.open(false);
        stack.declare(DeclKind::VariableDecl, "a").unwrap();
        assert!(stack.declare(DeclKind::LexicalDecl, "a").is_none());
    }

    #[test]
    fn var_hoist_through_lexical_conflict_fails() {
        let mut stack = ScopeStack::new();
        stack.open(false);
        stack.declare(DeclKind::LexicalDecl, "a").unwrap();
        assert!(stack.declare(DeclKind::VariableDecl, "a").is_none());
    }

    #[test]
    fn var_reuses_catch_binding() {
        let mut stack = ScopeStack::new();
        stack.open(true); // function
        stack.open(false); // catch block
        let e = stack.declare(DeclKind::CatchDecl, "e").unwrap();
        let again = stack.declare(DeclKind::VariableDecl, "e").unwrap();
        assert_eq!(stack.vars.resolve(again), stack.vars.resolve(e));
    }

    #[test]
    fn forward_reference_merges_with_later_var() {
        let mut stack = ScopeStack::new();
        stack.open(false);
        let use_ref = stack.use_name("a");
        stack.close();
        let decl_ref = stack.declare(DeclKind::VariableDecl, "a").unwrap();
        assert_eq!(stack.vars.resolve(use_ref), stack.vars.resolve(decl_ref));
        assert_eq!(stack.vars.canonical(use_ref).decl, DeclKind::VariableDecl);
        assert_eq!(stack.vars.canonical(use_ref).uses, 2);
    }

    #[test]
    fn undeclared_use_bubbles_to_global() {
        let mut stack = ScopeStack::new();
        stack.open(true);
        stack.open(false);
        let v = stack.use_name("console");
        stack.close();
        stack.close();
        let g = stack.scopes.get(stack.global());
        assert_eq!(g.undeclared, vec![v]);
        assert_eq!(stack.vars.canonical(v).decl, DeclKind::NoDecl);
    }

    #[test]
    fn uses_in_sibling_blocks_share_one_variable() {
        let mut stack = ScopeStack::new();
        stack.open(false);
        let first = stack.use_name("x");
        stack.close();
        stack.open(false);
        let second = stack.use_name("x");
        stack.close();
        assert_eq!(stack.vars.resolve(first), stack.vars.resolve(second));
        assert_eq!(stack.vars.canonical(first).uses, 2);
    }

    #[test]
    fn initializer_use_does_not_merge_with_body_var() {
        // function f(a = b) { var b }
        let mut stack = ScopeStack::new();
        stack.open(true);
        stack.declare(DeclKind::ArgumentDecl, "a").unwrap();
        let init_use = stack.use_name("b");
        stack.mark_func_args();
        let body_var = stack.declare(DeclKind::VariableDecl, "b").unwrap();
        assert_ne!(stack.vars.resolve(init_use), stack.vars.resolve(body_var));
        assert_eq!(stack.vars.canonical(init_use).decl, DeclKind::NoDecl);
        stack.close();
    }

    #[test]
    fn for_header_let_can_be_shadowed_in_body() {
        let mut stack = ScopeStack::new();
        stack.open(false);
        let header = stack.declare(DeclKind::LexicalDecl, "x").unwrap();
        stack.mark_for_stmt();
        let body = stack.declare(DeclKind::LexicalDecl, "x");
        let body = body.expect("body let should shadow the header binding");
        assert_ne!(stack.vars.resolve(header), stack.vars.resolve(body));
    }

    #[test]
    fn duplicate_let_in_for_header_still_fails() {
        let mut stack = ScopeStack::new();
        stack.open(false);
        stack.declare(DeclKind::LexicalDecl, "x").unwrap();
        assert!(stack.declare(DeclKind::LexicalDecl, "x").is_none());
    }

    #[test]
    fn undeclare_flattens_candidate_scope() {
        let mut stack = ScopeStack::new();
        stack.open(true);
        let used = stack.use_name("a");
        stack.undeclare();
        assert_eq!(stack.current(), stack.global());
        let g = stack.scopes.get(stack.global());
        assert_eq!(g.undeclared.len(), 1);
        assert_eq!(stack.vars.resolve(g.undeclared[0]), stack.vars.resolve(used));
    }

    #[test]
    fn expr_decl_upgrades_on_var() {
        let mut stack = ScopeStack::new();
        stack.open(true);
        let f = stack.declare(DeclKind::ExprDecl, "f").unwrap();
        let v = stack.declare(DeclKind::VariableDecl, "f").unwrap();
        assert_eq!(stack.vars.resolve(f), stack.vars.resolve(v));
        assert_eq!(stack.vars.canonical(f).decl, DeclKind::VariableDecl);
    }

    #[test]
    fn with_flag_propagates_to_function_scope() {
        let mut stack = ScopeStack::new();
        let func = stack.open(true);
        stack.open(false);
        stack.set_has_with();
        assert!(stack.scopes.get(func).has_with);
    }
}
