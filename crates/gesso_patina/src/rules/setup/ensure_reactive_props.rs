//! ensure-reactive-props
//!
//! Require props to be read through `widget` inside setup.
//!
//! Setup runs once per component instance. Reading a field directly captures
//! the value it had at that moment, so later prop changes never reach the
//! state derived from it. Reading through `widget.<prop>` inside a reactive
//! computation keeps it up to date.
//!
//! ## Examples
//!
//! ### Invalid
//! ```dart
//! Widget Function(BuildContext) setup() {
//!   final doubled = derived(() => count * 2);
//!   final label = this.title;
//!   ...
//! }
//! ```
//!
//! ### Valid
//! ```dart
//! Widget Function(BuildContext) setup() {
//!   final doubled = derived(() => widget.count * 2);
//!   return (context) => Text(title);
//! }
//! ```

use gesso_relief::ast::{Identifier, PropertyAccess, SymbolKind};
use gesso_relief::Resolution;

use crate::component::Component;
use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::scope::{walk_setup, ScopeTracker, SetupVisitor};

static META: RuleMeta = RuleMeta {
    code: "ensure-reactive-props",
    description: "Require component props to be read through `widget` in setup",
    problem: "Prop read directly in setup loses reactivity",
    correction: "Read the prop through `widget` inside a reactive computation",
    category: RuleCategory::Setup,
    fixable: false,
    severity: Severity::Error,
};

/// Require reactive prop access
pub struct EnsureReactiveProps;

impl Rule for EnsureReactiveProps {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_component<'a>(&self, ctx: &mut LintContext<'a>, component: &Component<'a>) {
        walk_setup(
            component,
            &mut DirectPropReads {
                ctx,
                class_name: component.name(),
            },
        );
    }
}

struct DirectPropReads<'c, 'a> {
    ctx: &'c mut LintContext<'a>,
    class_name: &'a str,
}

impl DirectPropReads<'_, '_> {
    fn report(&mut self, prop: &str, span: gesso_relief::Span) {
        let self_lookup = &self.ctx.catalogs.vocabulary.self_lookup;
        let message = format!(
            "`{}` is read directly in setup and will not update; use `{}.{}`",
            prop, self_lookup, prop
        );
        self.ctx.report_message(message, span);
    }

    /// Instance field or getter declared on the component class itself
    fn is_own_instance_member(&self, resolution: &Resolution) -> bool {
        resolution.is_instance_field_of(self.class_name)
            || (resolution.kind == SymbolKind::Getter
                && !resolution.is_static
                && resolution.owner.as_deref() == Some(self.class_name))
    }
}

impl<'a> SetupVisitor<'a> for DirectPropReads<'_, 'a> {
    fn property_access(&mut self, access: &'a PropertyAccess, scope: &ScopeTracker) {
        if scope.is_inside_builder_closure() || !access.target.is_this() {
            return;
        }
        let prop = access.property.name.as_str();
        if prop == self.ctx.catalogs.vocabulary.self_lookup.as_str() {
            return;
        }
        self.report(prop, access.span);
    }

    fn identifier(&mut self, ident: &'a Identifier, scope: &ScopeTracker) {
        if scope.is_inside_builder_closure()
            || ident.name.as_str() == self.ctx.catalogs.vocabulary.self_lookup.as_str()
        {
            return;
        }
        let Some(resolution) = &ident.resolved else {
            return;
        };
        if self.is_own_instance_member(resolution) {
            self.report(&ident.name, ident.span);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_utils::{component_unit, run_rule};
    use gesso_relief::{GetSpan, KeywordKind, NodeBuilder};

    #[test]
    fn test_invalid_this_access() {
        let b = NodeBuilder::new();
        let access = b.prop(b.this(), "title");
        let span = access.span();
        let unit = component_unit(&b, vec![b.final_local("label", access)], vec![]);

        let diagnostics = run_rule(&EnsureReactiveProps, &unit);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].span(), span);
        assert_eq!(
            diagnostics[0].message,
            "`title` is read directly in setup and will not update; use `widget.title`"
        );
    }

    #[test]
    fn test_invalid_bare_field_in_callback() {
        let b = NodeBuilder::new();
        let field = b.ident_resolved("count", Resolution::member_of(SymbolKind::Field, "Counter"));
        let unit = component_unit(
            &b,
            vec![b.final_local(
                "doubled",
                b.call("derived", vec![b.arrow(&[], b.binary("*", field, b.int(2)))]),
            )],
            vec![b.field(&[KeywordKind::Final], Some("int"), "count", None)],
        );
        assert_eq!(run_rule(&EnsureReactiveProps, &unit).len(), 1);
    }

    #[test]
    fn test_invalid_own_getter() {
        let b = NodeBuilder::new();
        let getter = b.ident_resolved("total", Resolution::member_of(SymbolKind::Getter, "Counter"));
        let unit = component_unit(&b, vec![b.final_local("t", getter)], vec![]);
        assert_eq!(run_rule(&EnsureReactiveProps, &unit).len(), 1);
    }

    #[test]
    fn test_valid_widget_lookup() {
        let b = NodeBuilder::new();
        let unit = component_unit(
            &b,
            vec![
                b.final_local("a", b.prop(b.ident("widget"), "count")),
                b.final_local("b", b.prop(b.prop(b.this(), "widget"), "count")),
            ],
            vec![],
        );
        assert!(run_rule(&EnsureReactiveProps, &unit).is_empty());
    }

    #[test]
    fn test_valid_static_foreign_and_unresolved() {
        let b = NodeBuilder::new();
        let mut static_field = Resolution::member_of(SymbolKind::Field, "Counter");
        static_field.is_static = true;
        let unit = component_unit(
            &b,
            vec![
                b.final_local("s", b.ident_resolved("limit", static_field)),
                b.final_local(
                    "o",
                    b.ident_resolved("other", Resolution::member_of(SymbolKind::Field, "Settings")),
                ),
                b.final_local("u", b.ident("count")),
                b.final_local(
                    "l",
                    b.ident_resolved("local", Resolution::new(SymbolKind::LocalVariable)),
                ),
            ],
            vec![],
        );
        assert!(run_rule(&EnsureReactiveProps, &unit).is_empty());
    }

    #[test]
    fn test_valid_inside_builder_closure() {
        let b = NodeBuilder::new();
        let builder = b.arrow(
            &["context"],
            b.new_instance("Text", vec![b.prop(b.this(), "title")]),
        );
        let unit = component_unit(&b, vec![b.ret(builder)], vec![]);
        assert!(run_rule(&EnsureReactiveProps, &unit).is_empty());
    }
}
