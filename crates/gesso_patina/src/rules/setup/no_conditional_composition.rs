//! no-conditional-composition
//!
//! Disallow calling composition primitives inside conditionals and loops of
//! the setup routine.
//!
//! Composition primitives register state and hooks in call order, so every
//! setup run must make the same calls. Only their creation is restricted:
//! the values they hold may change in branches.
//!
//! ## Examples
//!
//! ### Invalid
//! ```dart
//! Widget Function(BuildContext) setup() {
//!   if (widget.persist) {
//!     final saved = state(0);
//!   }
//!   ...
//! }
//! ```
//!
//! ### Valid
//! ```dart
//! Widget Function(BuildContext) setup() {
//!   final saved = state(0);
//!   if (widget.persist) {
//!     saved.value = 1;
//!   }
//!   return (context) => Text('${saved.value}');
//! }
//! ```

use gesso_relief::ast::CallExpr;

use crate::component::Component;
use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::rules::is_top_level_call;
use crate::scope::{walk_setup, ScopeTracker, SetupVisitor};

static META: RuleMeta = RuleMeta {
    code: "no-conditional-composition",
    description: "Disallow composition primitives inside conditionals and loops of setup",
    problem: "Composition API called inside a conditional or loop",
    correction: "Call composition APIs unconditionally at the top level of setup and branch on the values they hold",
    category: RuleCategory::Setup,
    fixable: false,
    severity: Severity::Error,
};

/// Disallow conditional composition calls
pub struct NoConditionalComposition;

impl Rule for NoConditionalComposition {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_component<'a>(&self, ctx: &mut LintContext<'a>, component: &Component<'a>) {
        walk_setup(component, &mut ConditionalCalls { ctx });
    }
}

struct ConditionalCalls<'c, 'a> {
    ctx: &'c mut LintContext<'a>,
}

impl<'a> SetupVisitor<'a> for ConditionalCalls<'_, 'a> {
    fn call(&mut self, call: &'a CallExpr, scope: &ScopeTracker) {
        if scope.is_inside_builder_closure() || !scope.is_inside_conditional_or_loop() {
            return;
        }
        let name = call.callee_name();
        if !self.ctx.catalogs.composition_primitives.contains(name) || !is_top_level_call(call) {
            return;
        }
        self.ctx.report_message(
            format!("`{}` must not be called inside a conditional or loop", name),
            call.span,
        );
    }
}
