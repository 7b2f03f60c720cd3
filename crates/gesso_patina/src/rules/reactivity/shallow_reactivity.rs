//! shallow-reactivity
//!
//! Disallow in-place mutation of a reactive wrapper's held value.
//!
//! Reactive wrappers notify listeners when `.value` is reassigned. Mutating
//! the collection stored in `.value` (indexing into it, setting one of its
//! properties, or calling a mutating method such as `add`) changes the
//! object without any notification.
//!
//! ## Examples
//!
//! ### Invalid
//! ```dart
//! items.value[0] = 10;
//! items.value.add(4);
//! user.value.name = 'Ada';
//! items.value..add(1)..add(2);
//! ```
//!
//! ### Valid
//! ```dart
//! items.value = [...items.value, 4];
//! user.value = user.value.copyWith(name: 'Ada');
//! ```

use gesso_relief::ast::{AssignExpr, CallExpr, CascadeExpr, Expr, UnaryOp, UpdateExpr};
use gesso_relief::visit::{self, Visit};
use gesso_relief::{ResolvedUnit, Span};

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};

static META: RuleMeta = RuleMeta {
    code: "shallow-reactivity",
    description: "Disallow in-place mutation of reactive held values",
    problem: "In-place mutation of a held value does not trigger updates",
    correction: "Assign a new value instead, e.g. `items.value = [...items.value, item]`",
    category: RuleCategory::Reactivity,
    fixable: false,
    severity: Severity::Warning,
};

/// Disallow deep mutation of `.value`
pub struct ShallowReactivity;

impl Rule for ShallowReactivity {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_unit<'a>(&self, ctx: &mut LintContext<'a>, unit: &'a ResolvedUnit) {
        let mut finder = HeldValueMutations {
            ctx,
            cascades: Vec::new(),
        };
        finder.visit_unit(unit);
    }
}

struct HeldValueMutations<'c, 'a> {
    ctx: &'c mut LintContext<'a>,
    /// For each enclosing cascade, whether its target reaches a held value
    cascades: Vec<bool>,
}

impl HeldValueMutations<'_, '_> {
    /// Whether evaluating `expr` passes through a `.value` access
    fn reaches_held_value(&self, expr: &Expr) -> bool {
        let held_value = self.ctx.catalogs.vocabulary.held_value.as_str();
        let mut current = expr;
        loop {
            current = match current {
                Expr::PropertyAccess(access) => {
                    if access.property.name.as_str() == held_value {
                        return true;
                    }
                    access.target.as_ref()
                }
                Expr::Index(index) => index.target.as_ref(),
                Expr::Call(call) => match call.target.as_deref() {
                    Some(target) => target,
                    None => return false,
                },
                Expr::Paren(paren) => paren.expression.as_ref(),
                Expr::Unary(unary) if unary.operator == UnaryOp::NullAssert => {
                    unary.argument.as_ref()
                }
                Expr::CascadeReceiver(_) => {
                    return self.cascades.last().copied().unwrap_or(false);
                }
                _ => return false,
            };
        }
    }

    /// Whether writing to `target` mutates something inside a held value.
    /// `w.value = x` itself replaces the value and is fine.
    fn is_mutating_target(&self, target: &Expr) -> bool {
        match target.without_parens() {
            Expr::Index(index) => self.reaches_held_value(&index.target),
            Expr::PropertyAccess(access) => self.reaches_held_value(&access.target),
            _ => false,
        }
    }

    fn report_write(&mut self, span: Span) {
        let message = format!(
            "Writing inside `.{}` mutates it in place and does not trigger updates",
            self.ctx.catalogs.vocabulary.held_value
        );
        self.ctx.report_message(message, span);
    }
}

impl<'a> Visit<'a> for HeldValueMutations<'_, 'a> {
    fn visit_assign(&mut self, assign: &'a AssignExpr) {
        if self.is_mutating_target(&assign.target) {
            self.report_write(assign.span);
        }
        visit::walk_assign(self, assign);
    }

    fn visit_update(&mut self, update: &'a UpdateExpr) {
        if self.is_mutating_target(&update.argument) {
            self.report_write(update.span);
        }
        visit::walk_update(self, update);
    }

    fn visit_call(&mut self, call: &'a CallExpr) {
        let method = call.method.name.as_str();
        let mutates = self.ctx.catalogs.mutating_methods.contains(method)
            && call
                .target
                .as_deref()
                .is_some_and(|target| self.reaches_held_value(target));
        if mutates {
            let message = format!(
                "`{}()` mutates `.{}` in place and does not trigger updates",
                method, self.ctx.catalogs.vocabulary.held_value
            );
            self.ctx.report_message(message, call.span);
        }
        visit::walk_call(self, call);
    }

    fn visit_cascade(&mut self, cascade: &'a CascadeExpr) {
        self.visit_expr(&cascade.target);
        let reaches = self.reaches_held_value(&cascade.target);
        self.cascades.push(reaches);
        for section in &cascade.sections {
            self.visit_expr(section);
        }
        self.cascades.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MUTATING_METHODS;
    use crate::rules::test_utils::{component_unit, run_rule};
    use gesso_relief::{AssignOp, Declaration, GetSpan, NodeBuilder, UpdateOp};

    fn function_unit(b: &NodeBuilder, statements: Vec<gesso_relief::Stmt>) -> ResolvedUnit {
        ResolvedUnit::new(
            "lib/store.dart",
            vec![b.function("update", b.block_body(statements))],
        )
    }

    #[test]
    fn test_invalid_index_assignment() {
        let b = NodeBuilder::new();
        let assign = b.assign(b.index(b.value_of(b.ident("items")), b.int(0)), b.int(10));
        let span = assign.span();
        let unit = component_unit(&b, vec![b.expr_stmt(assign)], vec![]);

        let diagnostics = run_rule(&ShallowReactivity, &unit);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].span(), span);
        assert_eq!(
            diagnostics[0].message,
            "Writing inside `.value` mutates it in place and does not trigger updates"
        );
    }

    #[test]
    fn test_valid_reassignment() {
        let b = NodeBuilder::new();
        let unit = component_unit(
            &b,
            vec![
                b.expr_stmt(b.assign(
                    b.value_of(b.ident("items")),
                    b.list(vec![b.spread(b.value_of(b.ident("items"))), b.int(10)]),
                )),
                b.expr_stmt(b.assign_op(AssignOp::Add, b.value_of(b.ident("count")), b.int(1))),
                b.expr_stmt(b.update(UpdateOp::Increment, b.value_of(b.ident("count")))),
            ],
            vec![],
        );
        assert!(run_rule(&ShallowReactivity, &unit).is_empty());
    }

    #[test]
    fn test_every_mutating_method_is_flagged() {
        for method in MUTATING_METHODS {
            let b = NodeBuilder::new();
            let unit = function_unit(
                &b,
                vec![b.expr_stmt(b.method_call(b.value_of(b.ident("w")), method, vec![]))],
            );
            let diagnostics = run_rule(&ShallowReactivity, &unit);
            assert_eq!(diagnostics.len(), 1, "{method}");
            assert!(diagnostics[0].message.starts_with(&format!("`{method}()`")));
        }
    }

    #[test]
    fn test_deep_chains() {
        let b = NodeBuilder::new();
        let unit = function_unit(
            &b,
            vec![
                // user.value.address.city = 'Oslo'
                b.expr_stmt(b.assign(
                    b.prop(b.prop(b.value_of(b.ident("user")), "address"), "city"),
                    b.string("Oslo"),
                )),
                // grid.value[0][1] = 2
                b.expr_stmt(b.assign(
                    b.index(b.index(b.value_of(b.ident("grid")), b.int(0)), b.int(1)),
                    b.int(2),
                )),
                // state.value!.tags.add('x')
                b.expr_stmt(b.method_call(
                    b.prop(b.null_assert(b.value_of(b.ident("state"))), "tags"),
                    "add",
                    vec![b.string("x")],
                )),
                // counts.value[key]++
                b.expr_stmt(b.update(
                    UpdateOp::Increment,
                    b.index(b.value_of(b.ident("counts")), b.ident("key")),
                )),
            ],
        );
        assert_eq!(run_rule(&ShallowReactivity, &unit).len(), 4);
    }

    #[test]
    fn test_non_mutating_and_unrelated_calls() {
        let b = NodeBuilder::new();
        let unit = function_unit(
            &b,
            vec![
                b.expr_stmt(b.method_call(b.value_of(b.ident("items")), "where", vec![])),
                b.expr_stmt(b.method_call(b.ident("plain"), "add", vec![b.int(1)])),
                b.expr_stmt(b.assign(b.index(b.ident("plain"), b.int(0)), b.int(1))),
                b.expr_stmt(b.call("add", vec![b.value_of(b.ident("items"))])),
            ],
        );
        assert!(run_rule(&ShallowReactivity, &unit).is_empty());
    }

    #[test]
    fn test_cascade_sections() {
        let b = NodeBuilder::new();
        let unit = function_unit(
            &b,
            vec![
                // items.value..add(1)..[0] = 2
                b.expr_stmt(b.cascade(
                    b.value_of(b.ident("items")),
                    vec![
                        b.method_call(b.cascade_receiver(), "add", vec![b.int(1)]),
                        b.assign(b.index(b.cascade_receiver(), b.int(0)), b.int(2)),
                    ],
                )),
                // builder..value.add(1) reaches `.value` through the section itself
                b.expr_stmt(b.cascade(
                    b.ident("holder"),
                    vec![b.method_call(b.value_of(b.cascade_receiver()), "add", vec![b.int(1)])],
                )),
                // plain..add(1) stays clean
                b.expr_stmt(b.cascade(
                    b.ident("plain"),
                    vec![b.method_call(b.cascade_receiver(), "add", vec![b.int(1)])],
                )),
            ],
        );
        assert_eq!(run_rule(&ShallowReactivity, &unit).len(), 3);
    }

    #[test]
    fn test_applies_outside_components() {
        let b = NodeBuilder::new();
        let unit = ResolvedUnit::new(
            "lib/helpers.dart",
            vec![
                b.function(
                    "reset",
                    b.expr_body(b.method_call(b.value_of(b.ident("items")), "clear", vec![])),
                ),
                Declaration::Class(b.class(
                    "Store",
                    None,
                    vec![b.method(
                        "push",
                        b.block_body(vec![b.expr_stmt(b.method_call(
                            b.value_of(b.ident("items")),
                            "add",
                            vec![b.int(1)],
                        ))]),
                    )],
                )),
            ],
        );
        assert_eq!(run_rule(&ShallowReactivity, &unit).len(), 2);
    }
}
