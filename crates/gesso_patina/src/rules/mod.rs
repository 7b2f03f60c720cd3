//! Lint rules for composition-style components.
//!
//! - [`setup`] - rules about what may happen inside the setup routine
//! - [`component`] - rules about the shape of component classes
//! - [`reactivity`] - rules about handling reactive wrappers, file-wide

pub mod component;
pub mod reactivity;
pub mod setup;

use gesso_relief::ast::{CallExpr, SymbolKind};

/// Whether `call` invokes a top-level function: a bare name that does not
/// resolve to anything else, or any name resolved as a top-level function
/// (including prefixed imports such as `ui.state(0)`).
pub(crate) fn is_top_level_call(call: &CallExpr) -> bool {
    match &call.resolved {
        Some(resolution) => resolution.kind == SymbolKind::Function,
        None => call.target.is_none(),
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use gesso_relief::{ClassMember, Declaration, NodeBuilder, ResolvedUnit, Stmt};

    use crate::catalog::Catalogs;
    use crate::component::Component;
    use crate::context::LintContext;
    use crate::diagnostic::LintDiagnostic;
    use crate::rule::Rule;

    /// Unit with one component `Counter` whose setup has a block body
    pub fn component_unit(b: &NodeBuilder, setup: Vec<Stmt>, mut members: Vec<ClassMember>) -> ResolvedUnit {
        members.push(b.method("setup", b.block_body(setup)));
        ResolvedUnit::new(
            "lib/counter.dart",
            vec![Declaration::Class(b.class(
                "Counter",
                Some("CompositionWidget"),
                members,
            ))],
        )
    }

    /// Run a single rule the way the linter does
    pub fn run_rule(rule: &dyn Rule, unit: &ResolvedUnit) -> Vec<LintDiagnostic> {
        let catalogs = Catalogs::builtin();
        let components = Component::collect(unit, &catalogs.vocabulary);
        let mut ctx = LintContext::new(unit, &catalogs, rule.meta());
        for component in &components {
            rule.check_component(&mut ctx, component);
        }
        rule.check_unit(&mut ctx, unit);
        ctx.into_diagnostics()
    }
}
