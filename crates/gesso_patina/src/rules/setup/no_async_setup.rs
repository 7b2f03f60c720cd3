//! no-async-setup
//!
//! Disallow asynchronous setup routines.
//!
//! The framework calls setup synchronously and expects the builder closure as
//! its immediate result. An `async` setup returns a future instead, and any
//! composition call after the first `await` runs outside the setup context.
//!
//! ## Examples
//!
//! ### Invalid
//! ```dart
//! Future<Widget Function(BuildContext)> setup() async {
//!   final user = await loadUser();
//!   ...
//! }
//! ```
//!
//! ### Valid
//! ```dart
//! Widget Function(BuildContext) setup() {
//!   final user = state<User?>(null);
//!   onMounted(() async => user.value = await loadUser());
//!   ...
//! }
//! ```

use crate::component::Component;
use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};

static META: RuleMeta = RuleMeta {
    code: "no-async-setup",
    description: "Disallow asynchronous setup routines",
    problem: "Setup must be synchronous",
    correction: "Keep setup synchronous and start asynchronous work from onMounted or a watcher",
    category: RuleCategory::Setup,
    fixable: false,
    severity: Severity::Error,
};

/// Disallow `async` setup
pub struct NoAsyncSetup;

impl Rule for NoAsyncSetup {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_component<'a>(&self, ctx: &mut LintContext<'a>, component: &Component<'a>) {
        let Some(setup) = component.setup else {
            return;
        };
        if !setup.body.is_async() {
            return;
        }
        let diagnostic = ctx
            .diagnostic(
                format!("`{}.{}` must not be async", component.name(), setup.name.name),
                setup.span,
            )
            .with_label("declared async here", setup.name.span);
        ctx.report(diagnostic);
    }
}
