//! Main linter entry point.

use std::sync::Arc;

use gesso_relief::ResolvedUnit;
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::catalog::Catalogs;
use crate::component::Component;
use crate::context::LintContext;
use crate::diagnostic::{LintDiagnostic, LintSummary, Severity};
use crate::rule::{Rule, RuleRegistry};
use crate::suppression::SuppressionMap;

/// Lint result for a single unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintResult {
    /// Path of the analyzed source file
    pub filename: String,
    pub diagnostics: Vec<LintDiagnostic>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl LintResult {
    pub fn new(filename: impl Into<String>, diagnostics: Vec<LintDiagnostic>) -> Self {
        let error_count = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        let warning_count = diagnostics.len() - error_count;
        Self {
            filename: filename.into(),
            diagnostics,
            error_count,
            warning_count,
        }
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    #[inline]
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Runs the enabled rules over resolved units.
///
/// A `Linter` holds no per-unit state and may be shared across threads.
pub struct Linter {
    registry: RuleRegistry,
    catalogs: Arc<Catalogs>,
    /// Optional set of enabled rule codes (if None, all registered rules run)
    enabled_rules: Option<FxHashSet<String>>,
}

impl Linter {
    /// Linter with every built-in rule and the built-in catalogs
    pub fn new() -> Self {
        Self::with_registry(RuleRegistry::with_recommended())
    }

    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self {
            registry,
            catalogs: Catalogs::shared(),
            enabled_rules: None,
        }
    }

    pub fn with_catalogs(mut self, catalogs: Arc<Catalogs>) -> Self {
        self.catalogs = catalogs;
        self
    }

    /// Restrict the run to the listed rule codes (if None, all rules run)
    pub fn with_enabled_rules(mut self, rules: Option<Vec<String>>) -> Self {
        self.enabled_rules = rules.map(|r| r.into_iter().collect());
        self
    }

    #[inline]
    pub fn is_rule_enabled(&self, code: &str) -> bool {
        match &self.enabled_rules {
            Some(set) => set.contains(code),
            None => true,
        }
    }

    #[inline]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    #[inline]
    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    fn enabled(&self) -> impl Iterator<Item = &dyn Rule> + '_ {
        self.registry
            .rules()
            .iter()
            .map(|rule| rule.as_ref())
            .filter(|rule| self.is_rule_enabled(rule.meta().code))
    }

    fn run_rule<'a>(
        &self,
        rule: &dyn Rule,
        unit: &'a ResolvedUnit,
        components: &[Component<'a>],
    ) -> Vec<LintDiagnostic> {
        let mut ctx = LintContext::new(unit, &self.catalogs, rule.meta());
        for component in components {
            rule.check_component(&mut ctx, component);
        }
        rule.check_unit(&mut ctx, unit);
        tracing::trace!(
            rule = rule.meta().code,
            errors = ctx.error_count(),
            warnings = ctx.warning_count(),
            "rule finished"
        );
        ctx.into_diagnostics()
    }

    fn finish(&self, unit: &ResolvedUnit, per_rule: Vec<Vec<LintDiagnostic>>) -> LintResult {
        let mut diagnostics: Vec<LintDiagnostic> = per_rule.into_iter().flatten().collect();
        if let Some(source) = unit.source.as_deref() {
            let before = diagnostics.len();
            SuppressionMap::parse(source).filter(&mut diagnostics);
            if diagnostics.len() != before {
                tracing::debug!(
                    file = %unit.path,
                    suppressed = before - diagnostics.len(),
                    "applied suppression comments"
                );
            }
        }
        LintResult::new(unit.path.clone(), diagnostics)
    }

    /// Lint one unit, running the rules one after another
    pub fn lint_unit(&self, unit: &ResolvedUnit) -> LintResult {
        let components = Component::collect(unit, &self.catalogs.vocabulary);
        tracing::debug!(file = %unit.path, components = components.len(), "linting unit");

        let per_rule = self
            .enabled()
            .map(|rule| self.run_rule(rule, unit, &components))
            .collect();
        self.finish(unit, per_rule)
    }

    /// Lint one unit, running the rules concurrently.
    ///
    /// Produces the same result as [`Linter::lint_unit`].
    pub fn lint_unit_parallel(&self, unit: &ResolvedUnit) -> LintResult {
        let components = Component::collect(unit, &self.catalogs.vocabulary);
        tracing::debug!(
            file = %unit.path,
            components = components.len(),
            "linting unit with parallel rules"
        );

        let rules: Vec<&dyn Rule> = self.enabled().collect();
        let per_rule = rules
            .par_iter()
            .map(|rule| self.run_rule(*rule, unit, &components))
            .collect();
        self.finish(unit, per_rule)
    }

    /// Lint many units concurrently and aggregate the results
    pub fn lint_units(&self, units: &[ResolvedUnit]) -> (Vec<LintResult>, LintSummary) {
        let results: Vec<LintResult> = units.par_iter().map(|unit| self.lint_unit(unit)).collect();

        let mut summary = LintSummary {
            file_count: units.len(),
            ..Default::default()
        };
        for result in &results {
            summary.error_count += result.error_count;
            summary.warning_count += result.warning_count;
        }
        (results, summary)
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}
