//! provide-inject-type-match
//!
//! Disallow reactive wrappers of common types as dependency keys.
//!
//! `provide` and `inject` match dependencies by their type argument. Two
//! unrelated features providing `State<String>` silently overwrite each
//! other. Wrapping the payload in a dedicated type gives each dependency a
//! unique key.
//!
//! ## Examples
//!
//! ### Invalid
//! ```dart
//! provide<State<String>>(username);
//! final theme = inject<State<Map<String, Color>>>();
//! ```
//!
//! ### Valid
//! ```dart
//! class Username { ... }
//! provide<State<Username>>(username);
//! final username = inject<State<Username>>();
//! ```

use gesso_relief::ast::{CallExpr, TypeRef};
use gesso_relief::visit::{self, Visit};
use gesso_relief::ResolvedUnit;

use crate::catalog::Catalogs;
use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::rules::is_top_level_call;

static META: RuleMeta = RuleMeta {
    code: "provide-inject-type-match",
    description: "Disallow reactive wrappers of common types as provide/inject keys",
    problem: "Dependency key uses a common type and may collide",
    correction: "Wrap the value in a dedicated type, e.g. `State<Username>` instead of `State<String>`",
    category: RuleCategory::Reactivity,
    fixable: false,
    severity: Severity::Warning,
};

/// Require distinct provide/inject key types
pub struct ProvideInjectTypeMatch;

impl Rule for ProvideInjectTypeMatch {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_unit<'a>(&self, ctx: &mut LintContext<'a>, unit: &'a ResolvedUnit) {
        DependencyKeys { ctx }.visit_unit(unit);
    }
}

struct DependencyKeys<'c, 'a> {
    ctx: &'c mut LintContext<'a>,
}

/// First wrapper in `ty` (itself or nested) that directly wraps a common type
fn find_collision<'t>(ty: &'t TypeRef, catalogs: &Catalogs) -> Option<(&'t TypeRef, &'t TypeRef)> {
    if catalogs.wrapper_types.contains(ty.simple_name()) {
        if let Some(common) = ty
            .args
            .iter()
            .find(|arg| catalogs.primitive_types.contains(arg.simple_name()))
        {
            return Some((ty, common));
        }
    }
    ty.args.iter().find_map(|arg| find_collision(arg, catalogs))
}

impl<'a> Visit<'a> for DependencyKeys<'_, 'a> {
    fn visit_call(&mut self, call: &'a CallExpr) {
        let catalogs = self.ctx.catalogs;
        let vocabulary = &catalogs.vocabulary;
        let name = call.callee_name();
        let is_dependency_call = (name == vocabulary.provide.as_str()
            || name == vocabulary.inject.as_str())
            && is_top_level_call(call);

        if is_dependency_call {
            for type_arg in &call.type_args {
                let Some((wrapper, common)) = find_collision(type_arg, catalogs) else {
                    continue;
                };
                let message = format!(
                    "`{}` wraps `{}` and may collide with other `{}` dependencies in `{}<{}>`",
                    wrapper.simple_name(),
                    common.simple_name(),
                    wrapper,
                    name,
                    type_arg
                );
                self.ctx.report_message(message, type_arg.span);
            }
        }
        visit::walk_call(self, call);
    }
}
