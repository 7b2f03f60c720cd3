//! Scope tracking while walking a setup routine.
//!
//! [`ScopeTracker`] records how deeply the walk is nested inside conditional
//! and loop constructs, and whether it is inside the component's builder
//! closure. [`walk_setup`] drives a [`SetupVisitor`] over a setup body and
//! keeps the tracker up to date, so individual rules only implement the hooks
//! they care about.

use gesso_relief::ast::*;
use gesso_relief::visit::{self, Visit};

use crate::component::Component;

/// Kind of construct pushed onto the scope stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeFrame {
    Conditional,
    Loop,
    BuilderClosure,
}

/// Stack of enclosing constructs.
#[derive(Debug, Default)]
pub struct ScopeTracker {
    frames: Vec<ScopeFrame>,
    conditional_depth: u32,
    in_builder: bool,
}

impl ScopeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn enter_conditional_or_loop(&mut self, frame: ScopeFrame) {
        debug_assert!(frame != ScopeFrame::BuilderClosure);
        self.frames.push(frame);
        self.conditional_depth += 1;
    }

    #[inline]
    pub fn exit_conditional_or_loop(&mut self) {
        if let Some(frame) = self.frames.pop() {
            debug_assert!(frame != ScopeFrame::BuilderClosure);
            self.conditional_depth = self.conditional_depth.saturating_sub(1);
        }
    }

    #[inline]
    pub fn enter_builder_closure(&mut self, _closure: &FunctionLiteral) {
        self.frames.push(ScopeFrame::BuilderClosure);
        self.in_builder = true;
    }

    #[inline]
    pub fn exit_builder_closure(&mut self) {
        if let Some(frame) = self.frames.pop() {
            debug_assert!(frame == ScopeFrame::BuilderClosure);
            self.in_builder = false;
        }
    }

    #[inline]
    pub fn is_inside_conditional_or_loop(&self) -> bool {
        self.conditional_depth > 0
    }

    #[inline]
    pub fn is_inside_builder_closure(&self) -> bool {
        self.in_builder
    }

    /// Current nesting depth of conditionals and loops
    #[inline]
    pub fn depth(&self) -> u32 {
        self.conditional_depth
    }
}

/// Hooks invoked by [`walk_setup`]. The tracker reflects the position of the
/// node being visited.
#[allow(unused_variables)]
pub trait SetupVisitor<'a> {
    fn call(&mut self, call: &'a CallExpr, scope: &ScopeTracker) {}

    fn property_access(&mut self, access: &'a PropertyAccess, scope: &ScopeTracker) {}

    fn identifier(&mut self, ident: &'a Identifier, scope: &ScopeTracker) {}

    fn local_declaration(&mut self, decl: &'a VariableDecl, scope: &ScopeTracker) {}
}

/// Walk the setup routine of `component`, if it has one
pub fn walk_setup<'a, V: SetupVisitor<'a>>(component: &Component<'a>, visitor: &mut V) {
    let Some(setup) = component.setup else {
        return;
    };
    let mut walker = SetupWalker {
        scope: ScopeTracker::new(),
        builder: component.builder,
        visitor,
    };
    walker.visit_function_body(&setup.body);
}

struct SetupWalker<'a, 'v, V> {
    scope: ScopeTracker,
    builder: Option<&'a FunctionLiteral>,
    visitor: &'v mut V,
}

impl<'a, V: SetupVisitor<'a>> SetupWalker<'a, '_, V> {
    fn in_frame(&mut self, frame: ScopeFrame, f: impl FnOnce(&mut Self)) {
        self.scope.enter_conditional_or_loop(frame);
        f(self);
        self.scope.exit_conditional_or_loop();
    }
}

impl<'a, V: SetupVisitor<'a>> Visit<'a> for SetupWalker<'a, '_, V> {
    fn visit_if_stmt(&mut self, stmt: &'a IfStmt) {
        self.in_frame(ScopeFrame::Conditional, |w| visit::walk_if_stmt(w, stmt));
    }

    fn visit_switch_stmt(&mut self, stmt: &'a SwitchStmt) {
        self.in_frame(ScopeFrame::Conditional, |w| visit::walk_switch_stmt(w, stmt));
    }

    fn visit_conditional(&mut self, cond: &'a ConditionalExpr) {
        self.in_frame(ScopeFrame::Conditional, |w| visit::walk_conditional(w, cond));
    }

    fn visit_switch_expr(&mut self, switch: &'a SwitchExpr) {
        self.in_frame(ScopeFrame::Conditional, |w| visit::walk_switch_expr(w, switch));
    }

    fn visit_for_stmt(&mut self, stmt: &'a ForStmt) {
        self.in_frame(ScopeFrame::Loop, |w| visit::walk_for_stmt(w, stmt));
    }

    fn visit_for_in_stmt(&mut self, stmt: &'a ForInStmt) {
        self.in_frame(ScopeFrame::Loop, |w| visit::walk_for_in_stmt(w, stmt));
    }

    fn visit_while_stmt(&mut self, stmt: &'a WhileStmt) {
        self.in_frame(ScopeFrame::Loop, |w| visit::walk_while_stmt(w, stmt));
    }

    fn visit_do_while_stmt(&mut self, stmt: &'a DoWhileStmt) {
        self.in_frame(ScopeFrame::Loop, |w| visit::walk_do_while_stmt(w, stmt));
    }

    fn visit_function_literal(&mut self, func: &'a FunctionLiteral) {
        let is_builder = self.builder.is_some_and(|builder| std::ptr::eq(builder, func));
        if is_builder {
            self.scope.enter_builder_closure(func);
            visit::walk_function_literal(self, func);
            self.scope.exit_builder_closure();
        } else {
            visit::walk_function_literal(self, func);
        }
    }

    fn visit_variable_decl(&mut self, decl: &'a VariableDecl) {
        self.visitor.local_declaration(decl, &self.scope);
        visit::walk_variable_decl(self, decl);
    }

    fn visit_call(&mut self, call: &'a CallExpr) {
        self.visitor.call(call, &self.scope);
        visit::walk_call(self, call);
    }

    fn visit_property_access(&mut self, access: &'a PropertyAccess) {
        self.visitor.property_access(access, &self.scope);
        visit::walk_property_access(self, access);
    }

    fn visit_identifier(&mut self, ident: &'a Identifier) {
        self.visitor.identifier(ident, &self.scope);
    }
}
