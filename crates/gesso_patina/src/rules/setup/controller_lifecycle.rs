//! controller-lifecycle
//!
//! Require resources created in setup to be disposed.
//!
//! A resource is a local variable initialized by constructing a type whose
//! name starts with a disposable prefix (`ScrollController`, `FocusNode`,
//! `Timer`, ...). It counts as released when a cleanup callback registered
//! with `onCleanup(() { ... })` calls `dispose()` on a variable of the same
//! name, or when a variable of that name is created by a lifecycle-owning
//! helper such as `useScrollController()`.
//!
//! Matching is by variable name only. Aliases and resources passed to other
//! objects are not followed.
//!
//! ## Examples
//!
//! ### Invalid
//! ```dart
//! final controller = ScrollController();
//! ```
//!
//! ### Valid
//! ```dart
//! final controller = ScrollController();
//! onCleanup(() => controller.dispose());
//!
//! final scroll = useScrollController();
//! ```

use compact_str::CompactString;
use gesso_relief::ast::{CallExpr, Expr, SymbolKind, VariableDecl};
use gesso_relief::visit::{self, Visit};
use gesso_relief::Span;
use rustc_hash::FxHashSet;

use crate::catalog::Catalogs;
use crate::component::Component;
use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::rules::is_top_level_call;
use crate::scope::{walk_setup, ScopeTracker, SetupVisitor};

static META: RuleMeta = RuleMeta {
    code: "controller-lifecycle",
    description: "Require disposable resources created in setup to be disposed",
    problem: "Resource is never disposed",
    correction: "Dispose it in an onCleanup callback or create it with a lifecycle-owning use* helper",
    category: RuleCategory::Lifecycle,
    fixable: false,
    severity: Severity::Warning,
};

/// Require disposal of resources created in setup
pub struct ControllerLifecycle;

/// A resource constructed in setup, tracked until the end of the walk.
#[derive(Debug, Clone)]
pub struct TrackedResource {
    pub variable_name: CompactString,
    pub type_name: CompactString,
    pub declaration_site: Span,
    pub is_exempt_by_helper: bool,
    pub is_disposed: bool,
}

impl Rule for ControllerLifecycle {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_component<'a>(&self, ctx: &mut LintContext<'a>, component: &Component<'a>) {
        let mut collector = ResourceCollector {
            catalogs: ctx.catalogs,
            resources: Vec::new(),
            helper_names: FxHashSet::default(),
            disposed_names: FxHashSet::default(),
        };
        walk_setup(component, &mut collector);

        for resource in collector.into_resources() {
            if resource.is_exempt_by_helper || resource.is_disposed {
                continue;
            }
            let vocabulary = &ctx.catalogs.vocabulary;
            let help = format!(
                "Add `{}(() => {}.{}())` or create it with a `{}*` helper",
                vocabulary.cleanup_registration,
                resource.variable_name,
                vocabulary.disposal_method,
                vocabulary.helper_prefix,
            );
            let diagnostic = ctx
                .diagnostic(
                    format!(
                        "`{}` ({}) is never disposed",
                        resource.variable_name, resource.type_name
                    ),
                    resource.declaration_site,
                )
                .with_help(help);
            ctx.report(diagnostic);
        }
    }
}

struct ResourceCollector<'a> {
    catalogs: &'a Catalogs,
    resources: Vec<TrackedResource>,
    helper_names: FxHashSet<CompactString>,
    disposed_names: FxHashSet<CompactString>,
}

impl ResourceCollector<'_> {
    /// Name of the disposable type constructed by `init`, if any
    fn constructed_resource(&self, init: &Expr) -> Option<CompactString> {
        let type_name = match init.without_parens() {
            Expr::New(creation) => creation.ty.simple_name(),
            // Constructor calls the resolver could not tell apart from calls
            Expr::Call(call)
                if call.target.is_none()
                    && call.resolved.as_ref().is_some_and(|r| {
                        matches!(r.kind, SymbolKind::Constructor | SymbolKind::Class)
                    }) =>
            {
                call.callee_name()
            }
            _ => return None,
        };
        self.catalogs
            .disposable_prefixes
            .has_prefix_of(type_name)
            .then(|| CompactString::from(type_name))
    }

    fn is_helper_call(&self, init: &Expr) -> bool {
        match init.without_parens() {
            Expr::Call(call) => {
                is_top_level_call(call) && self.catalogs.is_resource_helper(call.callee_name())
            }
            _ => false,
        }
    }

    fn into_resources(self) -> Vec<TrackedResource> {
        let Self {
            mut resources,
            helper_names,
            disposed_names,
            ..
        } = self;
        for resource in &mut resources {
            resource.is_exempt_by_helper = helper_names.contains(&resource.variable_name);
            resource.is_disposed = disposed_names.contains(&resource.variable_name);
        }
        resources
    }
}

impl<'a> SetupVisitor<'a> for ResourceCollector<'_> {
    fn local_declaration(&mut self, decl: &'a VariableDecl, scope: &ScopeTracker) {
        if scope.is_inside_builder_closure() {
            return;
        }
        for declarator in &decl.variables {
            let Some(init) = &declarator.init else {
                continue;
            };
            if let Some(type_name) = self.constructed_resource(init) {
                self.resources.push(TrackedResource {
                    variable_name: declarator.name.name.clone(),
                    type_name,
                    declaration_site: declarator.span,
                    is_exempt_by_helper: false,
                    is_disposed: false,
                });
            } else if self.is_helper_call(init) {
                self.helper_names.insert(declarator.name.name.clone());
            }
        }
    }

    fn call(&mut self, call: &'a CallExpr, scope: &ScopeTracker) {
        if scope.is_inside_builder_closure()
            || call.callee_name() != self.catalogs.vocabulary.cleanup_registration.as_str()
            || !is_top_level_call(call)
        {
            return;
        }
        let Some(callback) = call.sole_argument().and_then(Expr::as_function) else {
            return;
        };
        let mut finder = DisposalFinder {
            disposal_method: &self.catalogs.vocabulary.disposal_method,
            disposed: &mut self.disposed_names,
        };
        finder.visit_function_literal(callback);
    }
}

/// Collects receivers of `name.dispose()` calls inside a cleanup callback
struct DisposalFinder<'c> {
    disposal_method: &'c str,
    disposed: &'c mut FxHashSet<CompactString>,
}

impl<'a> Visit<'a> for DisposalFinder<'_> {
    fn visit_call(&mut self, call: &'a CallExpr) {
        if call.callee_name() == self.disposal_method {
            if let Some(receiver) = call.receiver_identifier() {
                self.disposed.insert(receiver.name.clone());
            }
        }
        visit::walk_call(self, call);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_utils::{component_unit, run_rule};
    use gesso_relief::{GetSpan, NodeBuilder, Resolution, Stmt};

    fn declarator_span(stmt: &Stmt) -> Span {
        match stmt {
            Stmt::Variable(decl) => decl.variables[0].span(),
            _ => panic!("expected variable declaration"),
        }
    }

    #[test]
    fn test_invalid_undisposed_controller() {
        let b = NodeBuilder::new();
        let decl = b.var_local("c", b.new_instance("ResourceController", vec![]));
        let span = declarator_span(&decl);
        let unit = component_unit(&b, vec![decl], vec![]);

        let diagnostics = run_rule(&ControllerLifecycle, &unit);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].span(), span);
        assert_eq!(diagnostics[0].message, "`c` (ResourceController) is never disposed");
        assert_eq!(
            diagnostics[0].help.as_deref(),
            Some("Add `onCleanup(() => c.dispose())` or create it with a `use*` helper")
        );
    }

    #[test]
    fn test_valid_disposed_in_cleanup() {
        let b = NodeBuilder::new();
        let unit = component_unit(
            &b,
            vec![
                b.var_local("c", b.new_instance("ResourceController", vec![])),
                b.expr_stmt(b.call(
                    "onCleanup",
                    vec![b.arrow(&[], b.method_call(b.ident("c"), "dispose", vec![]))],
                )),
            ],
            vec![],
        );
        assert!(run_rule(&ControllerLifecycle, &unit).is_empty());
    }

    #[test]
    fn test_block_cleanup_disposes_several() {
        let b = NodeBuilder::new();
        let unit = component_unit(
            &b,
            vec![
                b.final_local("scroll", b.new_instance("ScrollController", vec![])),
                b.final_local("focus", b.new_instance("FocusNode", vec![])),
                b.final_local("ticker", b.new_instance("Timer", vec![])),
                b.expr_stmt(b.call(
                    "onCleanup",
                    vec![b.closure(
                        &[],
                        vec![
                            b.expr_stmt(b.method_call(b.ident("scroll"), "dispose", vec![])),
                            b.expr_stmt(b.method_call(b.ident("focus"), "dispose", vec![])),
                        ],
                    )],
                )),
            ],
            vec![],
        );
        let diagnostics = run_rule(&ControllerLifecycle, &unit);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.starts_with("`ticker`"));
    }

    #[test]
    fn test_valid_helper_created() {
        let b = NodeBuilder::new();
        let unit = component_unit(
            &b,
            vec![b.final_local("controller", b.call("useScrollController", vec![]))],
            vec![],
        );
        assert!(run_rule(&ControllerLifecycle, &unit).is_empty());
    }

    #[test]
    fn test_helper_exemption_is_by_name() {
        let b = NodeBuilder::new();
        // A shadowing helper-created variable with the same name exempts the resource
        let unit = component_unit(
            &b,
            vec![
                b.final_local("controller", b.new_instance("ScrollController", vec![])),
                b.expr_stmt(b.call(
                    "watchEffect",
                    vec![b.closure(
                        &[],
                        vec![b.final_local("controller", b.call("useScrollController", vec![]))],
                    )],
                )),
            ],
            vec![],
        );
        assert!(run_rule(&ControllerLifecycle, &unit).is_empty());
    }

    #[test]
    fn test_dispose_outside_cleanup_does_not_count() {
        let b = NodeBuilder::new();
        let unit = component_unit(
            &b,
            vec![
                b.final_local("c", b.new_instance("AnimationController", vec![])),
                b.expr_stmt(b.method_call(b.ident("c"), "dispose", vec![])),
            ],
            vec![],
        );
        assert_eq!(run_rule(&ControllerLifecycle, &unit).len(), 1);
    }

    #[test]
    fn test_unresolved_constructor_call() {
        let b = NodeBuilder::new();
        let ctor = b.call_full(
            None,
            "StreamController",
            vec![],
            vec![],
            Some(Resolution::new(SymbolKind::Constructor)),
        );
        let unit = component_unit(&b, vec![b.final_local("events", ctor)], vec![]);
        assert_eq!(run_rule(&ControllerLifecycle, &unit).len(), 1);
    }

    #[test]
    fn test_non_disposable_types_are_ignored() {
        let b = NodeBuilder::new();
        let unit = component_unit(
            &b,
            vec![
                b.final_local("style", b.new_instance("TextStyle", vec![])),
                b.final_local("count", b.call("state", vec![b.int(0)])),
            ],
            vec![],
        );
        assert!(run_rule(&ControllerLifecycle, &unit).is_empty());
    }

    #[test]
    fn test_declaration_order() {
        let b = NodeBuilder::new();
        let unit = component_unit(
            &b,
            vec![
                b.final_local("b", b.new_instance("TabController", vec![])),
                b.final_local("a", b.new_instance("PageController", vec![])),
            ],
            vec![],
        );
        let names: Vec<String> = run_rule(&ControllerLifecycle, &unit)
            .iter()
            .map(|d| d.message.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "`b` (TabController) is never disposed",
                "`a` (PageController) is never disposed",
            ]
        );
    }
}
