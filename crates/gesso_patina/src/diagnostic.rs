//! Diagnostic types for gesso_patina.
//!
//! Uses `CompactString` for efficient small string storage.

use compact_str::CompactString;
use gesso_relief::Span;
use oxc_diagnostics::OxcDiagnostic;
use serde::{Deserialize, Serialize};

/// Namespace prepended to rule codes in rendered output
pub const RULE_NAMESPACE: &str = "compositions";

/// Lint diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A single text replacement in the source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    /// Start byte offset
    pub start: u32,
    /// End byte offset
    pub end: u32,
    /// Replacement text
    pub new_text: String,
}

impl TextEdit {
    #[inline]
    pub fn new(start: u32, end: u32, new_text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            new_text: new_text.into(),
        }
    }

    #[inline]
    pub fn insert(offset: u32, text: impl Into<String>) -> Self {
        Self::new(offset, offset, text)
    }

    #[inline]
    pub fn replace(span: Span, text: impl Into<String>) -> Self {
        Self::new(span.start, span.end, text)
    }
}

/// A fix for a diagnostic, containing one or more text edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fix {
    /// Description of the fix
    pub message: String,
    pub edits: Vec<TextEdit>,
}

impl Fix {
    #[inline]
    pub fn new(message: impl Into<String>, edit: TextEdit) -> Self {
        Self {
            message: message.into(),
            edits: vec![edit],
        }
    }

    /// Apply the fix to a source string
    pub fn apply(&self, source: &str) -> String {
        let mut result = source.to_string();
        // Apply edits back to front so earlier offsets stay valid
        let mut edits = self.edits.clone();
        edits.sort_by(|a, b| b.start.cmp(&a.start));

        for edit in edits {
            let start = edit.start as usize;
            let end = edit.end as usize;
            if start <= end && end <= result.len() {
                result.replace_range(start..end, &edit.new_text);
            }
        }
        result
    }
}

/// Additional label for a diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    pub message: CompactString,
    pub start: u32,
    pub end: u32,
}

/// A lint diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintDiagnostic {
    /// Code of the rule that triggered this diagnostic (e.g. "no-async-setup")
    pub rule: &'static str,
    pub severity: Severity,
    pub message: CompactString,
    /// Start byte offset in source
    pub start: u32,
    /// End byte offset in source
    pub end: u32,
    /// Correction hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<CompactString>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

impl LintDiagnostic {
    #[inline]
    pub fn new(
        rule: &'static str,
        severity: Severity,
        message: impl Into<CompactString>,
        span: Span,
    ) -> Self {
        Self {
            rule,
            severity,
            message: message.into(),
            start: span.start,
            end: span.end,
            help: None,
            labels: Vec::new(),
            fix: None,
        }
    }

    #[inline]
    pub fn error(rule: &'static str, message: impl Into<CompactString>, span: Span) -> Self {
        Self::new(rule, Severity::Error, message, span)
    }

    #[inline]
    pub fn warn(rule: &'static str, message: impl Into<CompactString>, span: Span) -> Self {
        Self::new(rule, Severity::Warning, message, span)
    }

    #[inline]
    pub fn with_help(mut self, help: impl Into<CompactString>) -> Self {
        self.help = Some(help.into());
        self
    }

    #[inline]
    pub fn with_label(mut self, message: impl Into<CompactString>, span: Span) -> Self {
        self.labels.push(Label {
            message: message.into(),
            start: span.start,
            end: span.end,
        });
        self
    }

    #[inline]
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    #[inline]
    pub fn has_fix(&self) -> bool {
        self.fix.is_some()
    }

    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Namespaced rule code, e.g. `compositions/no-async-setup`
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", RULE_NAMESPACE, self.rule)
    }

    /// Convert to OxcDiagnostic for rich rendering
    pub fn into_oxc_diagnostic(self) -> OxcDiagnostic {
        let message = format!("{}: {}", self.qualified_name(), self.message);
        let mut diag = match self.severity {
            Severity::Error => OxcDiagnostic::error(message),
            Severity::Warning => OxcDiagnostic::warn(message),
        };

        diag = diag.with_label(oxc_span::Span::new(self.start, self.end));

        if let Some(help) = self.help {
            diag = diag.with_help(help.to_string());
        }

        for label in self.labels {
            diag = diag.and_label(
                oxc_span::Span::new(label.start, label.end).label(label.message.to_string()),
            );
        }

        diag
    }
}

/// Summary of lint results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LintSummary {
    pub error_count: usize,
    pub warning_count: usize,
    pub file_count: usize,
}

impl LintSummary {
    #[inline]
    pub fn add(&mut self, diagnostic: &LintDiagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}
