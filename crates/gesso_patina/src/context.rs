//! Lint context for rule execution.

use compact_str::CompactString;
use gesso_relief::{ResolvedUnit, Span};

use crate::catalog::Catalogs;
use crate::diagnostic::{LintDiagnostic, Severity};
use crate::rule::RuleMeta;

/// Per-rule collector handed to a rule while it inspects one unit.
pub struct LintContext<'a> {
    pub unit: &'a ResolvedUnit,
    pub catalogs: &'a Catalogs,
    /// Metadata of the rule being run
    pub current_rule: &'static RuleMeta,
    diagnostics: Vec<LintDiagnostic>,
    error_count: usize,
    warning_count: usize,
}

impl<'a> LintContext<'a> {
    const INITIAL_DIAGNOSTICS_CAPACITY: usize = 8;

    #[inline]
    pub fn new(unit: &'a ResolvedUnit, catalogs: &'a Catalogs, rule: &'static RuleMeta) -> Self {
        Self {
            unit,
            catalogs,
            current_rule: rule,
            diagnostics: Vec::with_capacity(Self::INITIAL_DIAGNOSTICS_CAPACITY),
            error_count: 0,
            warning_count: 0,
        }
    }

    #[inline]
    pub fn filename(&self) -> &'a str {
        &self.unit.path
    }

    /// Source text of the unit, when the resolver supplied it
    #[inline]
    pub fn source(&self) -> Option<&'a str> {
        self.unit.source.as_deref()
    }

    /// Report a fully built diagnostic
    #[inline]
    pub fn report(&mut self, diagnostic: LintDiagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        self.diagnostics.push(diagnostic);
    }

    /// Build a diagnostic for the current rule with `message` and the rule's
    /// correction hint
    #[inline]
    pub fn diagnostic(&self, message: impl Into<CompactString>, span: Span) -> LintDiagnostic {
        let meta = self.current_rule;
        LintDiagnostic::new(meta.code, meta.severity, message, span).with_help(meta.correction)
    }

    /// Report the rule's default problem at `span`
    #[inline]
    pub fn report_at(&mut self, span: Span) {
        let diagnostic = self.diagnostic(self.current_rule.problem, span);
        self.report(diagnostic);
    }

    /// Report `message` at `span` with the rule's correction hint
    #[inline]
    pub fn report_message(&mut self, message: impl Into<CompactString>, span: Span) {
        let diagnostic = self.diagnostic(message, span);
        self.report(diagnostic);
    }

    #[inline]
    pub fn diagnostics(&self) -> &[LintDiagnostic] {
        &self.diagnostics
    }

    #[inline]
    pub fn into_diagnostics(self) -> Vec<LintDiagnostic> {
        self.diagnostics
    }

    #[inline]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    #[inline]
    pub fn warning_count(&self) -> usize {
        self.warning_count
    }
}
