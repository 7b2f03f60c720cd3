//! no-mutable-fields
//!
//! Require instance fields of components to be `final`.
//!
//! Component fields are props. Mutating them never triggers a rebuild;
//! mutable state belongs in `state(...)` inside setup. Static fields are
//! shared configuration and are not checked.
//!
//! ## Examples
//!
//! ### Invalid
//! ```dart
//! class Counter extends CompositionWidget {
//!   int count = 0;
//! }
//! ```
//!
//! ### Valid
//! ```dart
//! class Counter extends CompositionWidget {
//!   final int count;
//!   static int instances = 0;
//! }
//! ```

use gesso_relief::ast::{FieldDecl, KeywordKind};

use crate::component::Component;
use crate::context::LintContext;
use crate::diagnostic::{Fix, Severity, TextEdit};
use crate::rule::{Rule, RuleCategory, RuleMeta};

static META: RuleMeta = RuleMeta {
    code: "no-mutable-fields",
    description: "Require component instance fields to be final",
    problem: "Component field is mutable",
    correction: "Make the field final and keep mutable values in state() inside setup",
    category: RuleCategory::Structure,
    fixable: true,
    severity: Severity::Warning,
};

/// Require `final` component fields
pub struct NoMutableFields;

impl Rule for NoMutableFields {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_component<'a>(&self, ctx: &mut LintContext<'a>, component: &Component<'a>) {
        for field in component.class.fields() {
            if field.is_static() || field.is_immutable() {
                continue;
            }
            let names = field
                .variables
                .iter()
                .map(|v| format!("`{}`", v.name.name))
                .collect::<Vec<_>>()
                .join(", ");
            let diagnostic = ctx
                .diagnostic(
                    format!("Field {} of `{}` is mutable", names, component.name()),
                    field.span,
                )
                .with_fix(Fix::new("Make the field final", make_final(field)));
            ctx.report(diagnostic);
        }
    }
}

/// `var` becomes `final`; otherwise `final ` goes before the type or name
fn make_final(field: &FieldDecl) -> TextEdit {
    if let Some(var) = field.keyword(KeywordKind::Var) {
        return TextEdit::replace(var.span, "final");
    }
    let offset = match (&field.ty, field.variables.first()) {
        (Some(ty), _) => ty.span.start,
        (None, Some(first)) => first.name.span.start,
        (None, None) => field.span.start,
    };
    TextEdit::insert(offset, "final ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_utils::{component_unit, run_rule};
    use gesso_relief::{ClassMember, NodeBuilder, Span};

    fn field_span(member: &ClassMember) -> Span {
        match member {
            ClassMember::Field(field) => field.span,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_invalid_typed_field() {
        let b = NodeBuilder::new();
        let field = b.field(&[], Some("int"), "count", Some(b.int(0)));
        let span = field_span(&field);
        let unit = component_unit(&b, vec![], vec![field]);

        let diagnostics = run_rule(&NoMutableFields, &unit);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].span(), span);
        assert_eq!(diagnostics[0].message, "Field `count` of `Counter` is mutable");
        assert!(diagnostics[0].has_fix());
    }

    #[test]
    fn test_valid_final_const_and_static() {
        let b = NodeBuilder::new();
        let unit = component_unit(
            &b,
            vec![],
            vec![
                b.field(&[KeywordKind::Final], Some("int"), "count", Some(b.int(0))),
                b.field(&[KeywordKind::Static, KeywordKind::Const], None, "max", Some(b.int(9))),
                b.field(&[KeywordKind::Static], Some("int"), "counter", Some(b.int(0))),
            ],
        );
        assert!(run_rule(&NoMutableFields, &unit).is_empty());
    }

    #[test]
    fn test_fix_replaces_var() {
        let source = "class C extends CompositionWidget { var count = 0; }";
        let b = NodeBuilder::new();
        let mut member = b.field(&[KeywordKind::Var], None, "count", Some(b.int(0)));
        if let ClassMember::Field(field) = &mut member {
            field.keywords[0].span = Span::new(36, 39);
        }
        let unit = component_unit(&b, vec![], vec![member]);

        let diagnostics = run_rule(&NoMutableFields, &unit);
        let fix = diagnostics[0].fix.as_ref().unwrap();
        assert_eq!(
            fix.apply(source),
            "class C extends CompositionWidget { final count = 0; }"
        );
    }

    #[test]
    fn test_fix_inserts_before_type() {
        let source = "class C extends CompositionWidget { late String title; }";
        let b = NodeBuilder::new();
        let mut member = b.field(&[KeywordKind::Late], Some("String"), "title", None);
        if let ClassMember::Field(field) = &mut member {
            field.ty.as_mut().unwrap().span = Span::new(41, 47);
        }
        let unit = component_unit(&b, vec![], vec![member]);

        let diagnostics = run_rule(&NoMutableFields, &unit);
        let fix = diagnostics[0].fix.as_ref().unwrap();
        assert_eq!(
            fix.apply(source),
            "class C extends CompositionWidget { late final String title; }"
        );
    }

    #[test]
    fn test_non_component_classes_are_ignored() {
        let b = NodeBuilder::new();
        let unit = gesso_relief::ResolvedUnit::new(
            "lib/model.dart",
            vec![gesso_relief::Declaration::Class(b.class(
                "Model",
                Some("ChangeNotifier"),
                vec![b.field(&[], Some("int"), "count", None)],
            ))],
        );
        assert!(run_rule(&NoMutableFields, &unit).is_empty());
    }
}
