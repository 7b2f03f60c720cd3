//! no-logic-in-builder
//!
//! Keep the builder closure free of logic.
//!
//! The builder closure runs on every rebuild. Work placed there is repeated
//! each time and is not tracked by the reactive system. Derived values belong
//! in setup (`derived(...)`); the builder should only destructure and return
//! the widget tree.
//!
//! ## Examples
//!
//! ### Invalid
//! ```dart
//! return (context) {
//!   print(count.value);
//!   final label = 'Count: ${count.value}';
//!   return Text(label);
//! };
//! ```
//!
//! ### Valid
//! ```dart
//! final label = derived(() => 'Count: ${count.value}');
//! return (context) {
//!   final (title, subtitle) = labels.value;
//!   return Text(label.value);
//! };
//! ```

use gesso_relief::ast::Stmt;
use gesso_relief::GetSpan;

use crate::component::Component;
use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};

static META: RuleMeta = RuleMeta {
    code: "no-logic-in-builder",
    description: "Disallow statements other than destructuring and return in the builder closure",
    problem: "Logic in the builder closure runs on every rebuild",
    correction: "Move the computation into setup, for example with derived()",
    category: RuleCategory::Structure,
    fixable: false,
    severity: Severity::Warning,
};

/// Disallow logic in the builder closure
pub struct NoLogicInBuilder;

impl Rule for NoLogicInBuilder {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_component<'a>(&self, ctx: &mut LintContext<'a>, component: &Component<'a>) {
        let Some(block) = component.builder.and_then(|builder| builder.body.block()) else {
            return;
        };
        for stmt in &block.statements {
            if !is_allowed(stmt) {
                ctx.report_at(stmt.span());
            }
        }
    }
}

fn is_allowed(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Return(_) => true,
        Stmt::Pattern(decl) => decl.pattern.is_destructuring(),
        _ => false,
    }
}
