//! Telegraph - The message delivery system for lint results.
//!
//! Telegraph routes lint results to one or more emitters, each producing
//! output for a different receiver: a terminal, a JSON consumer, or an
//! editor speaking the Language Server Protocol.
//!
//! ## Name Origin
//!
//! A **telegraph** transmits messages over long distances. `Telegraph`
//! delivers diagnostics from the linter to whoever listens on the other end.
//!
//! ## Architecture
//!
//! ```text
//! LintResult --> Telegraph --> Emitter --> Destination
//!                              |
//!                              +-- TextEmitter --> stdout (rich terminal)
//!                              +-- JsonEmitter --> JSON format
//!                              +-- LspEmitter  --> LSP diagnostics
//! ```

use serde::Serialize;

use crate::diagnostic::{LintDiagnostic, Severity};
use crate::line_index::LineIndex;
use crate::linter::LintResult;
use crate::output::{format_results, format_summary, OutputFormat};

/// An emitter that can transmit lint diagnostics to a destination.
///
/// `source` is the text of the analyzed file, or `None` when the unit was
/// loaded without it.
pub trait Emitter: Send + Sync {
    /// Emit diagnostics for a single file result
    fn emit(&self, result: &LintResult, source: Option<&str>) -> String;

    /// Emit a summary of all lint results
    fn emit_summary(&self, results: &[LintResult]) -> String;

    /// Name of this emitter for identification
    fn name(&self) -> &'static str;
}

/// Telegraph coordinates the delivery of lint results to emitters.
pub struct Telegraph {
    emitters: Vec<Box<dyn Emitter>>,
}

impl Telegraph {
    /// Create a new Telegraph with no emitters
    pub fn new() -> Self {
        Self {
            emitters: Vec::new(),
        }
    }

    pub fn with_text() -> Self {
        let mut telegraph = Self::new();
        telegraph.add_emitter(Box::new(TextEmitter));
        telegraph
    }

    pub fn with_json() -> Self {
        let mut telegraph = Self::new();
        telegraph.add_emitter(Box::new(JsonEmitter));
        telegraph
    }

    pub fn with_lsp() -> Self {
        let mut telegraph = Self::new();
        telegraph.add_emitter(Box::new(LspEmitter));
        telegraph
    }

    pub fn add_emitter(&mut self, emitter: Box<dyn Emitter>) {
        self.emitters.push(emitter);
    }

    pub fn emitter_names(&self) -> Vec<&'static str> {
        self.emitters.iter().map(|e| e.name()).collect()
    }

    /// Transmit a single result through all emitters
    pub fn transmit(&self, result: &LintResult, source: Option<&str>) -> Vec<String> {
        self.emitters
            .iter()
            .map(|e| e.emit(result, source))
            .collect()
    }

    /// Transmit multiple results through all emitters, each followed by
    /// that emitter's summary
    pub fn transmit_all(&self, results: &[(LintResult, Option<String>)]) -> Vec<String> {
        let plain: Vec<LintResult> = results.iter().map(|(r, _)| r.clone()).collect();
        self.emitters
            .iter()
            .map(|e| {
                let mut output = String::new();
                for (result, source) in results {
                    output.push_str(&e.emit(result, source.as_deref()));
                }
                output.push_str(&e.emit_summary(&plain));
                output
            })
            .collect()
    }
}

impl Default for Telegraph {
    fn default() -> Self {
        Self::with_text()
    }
}

fn sources_for(result: &LintResult, source: Option<&str>) -> Vec<(String, String)> {
    source
        .map(|s| vec![(result.filename.clone(), s.to_string())])
        .unwrap_or_default()
}

/// Text emitter for rich terminal output
#[derive(Default)]
pub struct TextEmitter;

impl Emitter for TextEmitter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn emit(&self, result: &LintResult, source: Option<&str>) -> String {
        format_results(
            std::slice::from_ref(result),
            &sources_for(result, source),
            OutputFormat::Text,
        )
    }

    fn emit_summary(&self, results: &[LintResult]) -> String {
        let errors: usize = results.iter().map(|r| r.error_count).sum();
        let warnings: usize = results.iter().map(|r| r.warning_count).sum();
        format!("\n{}\n", format_summary(errors, warnings, results.len()))
    }
}

/// JSON emitter for machine-readable output
pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn emit(&self, result: &LintResult, source: Option<&str>) -> String {
        format_results(
            std::slice::from_ref(result),
            &sources_for(result, source),
            OutputFormat::Json,
        )
    }

    fn emit_summary(&self, _results: &[LintResult]) -> String {
        // Counts are part of every file result
        String::new()
    }
}

/// LSP emitter for Language Server Protocol diagnostics.
pub struct LspEmitter;

/// LSP-compatible diagnostic representation
#[derive(Debug, Clone, Serialize)]
pub struct LspDiagnostic {
    pub range: LspRange,
    /// 1 = Error, 2 = Warning
    pub severity: u8,
    pub message: String,
    /// Always "gesso-patina"
    pub source: String,
    /// Namespaced rule code
    pub code: String,
}

/// LSP-compatible range
#[derive(Debug, Clone, Serialize)]
pub struct LspRange {
    pub start: LspPosition,
    pub end: LspPosition,
}

/// LSP-compatible position (0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LspPosition {
    pub line: u32,
    pub character: u32,
}

impl LspEmitter {
    /// Convert a LintResult to LSP diagnostics.
    ///
    /// Without source text every position is reported on line 0 with the
    /// byte offset as character.
    pub fn to_lsp_diagnostics(result: &LintResult, source: Option<&str>) -> Vec<LspDiagnostic> {
        let index = source.map(|s| (s, LineIndex::new(s)));
        let position = |offset: u32| match &index {
            Some((source, index)) => {
                let (line, character) = index.line_col(source, offset);
                LspPosition { line, character }
            }
            None => LspPosition {
                line: 0,
                character: offset,
            },
        };

        result
            .diagnostics
            .iter()
            .map(|d| LspDiagnostic {
                range: LspRange {
                    start: position(d.start),
                    end: position(d.end),
                },
                severity: match d.severity {
                    Severity::Error => 1,
                    Severity::Warning => 2,
                },
                message: lsp_message(d),
                source: "gesso-patina".to_string(),
                code: d.qualified_name(),
            })
            .collect()
    }
}

fn lsp_message(d: &LintDiagnostic) -> String {
    match &d.help {
        Some(help) => format!("{}\n{}", d.message, help),
        None => d.message.to_string(),
    }
}

impl Emitter for LspEmitter {
    fn name(&self) -> &'static str {
        "lsp"
    }

    fn emit(&self, result: &LintResult, source: Option<&str>) -> String {
        let diagnostics = Self::to_lsp_diagnostics(result, source);
        serde_json::to_string_pretty(&diagnostics).unwrap_or_default()
    }

    fn emit_summary(&self, _results: &[LintResult]) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesso_relief::Span;

    fn result(start: u32, end: u32) -> LintResult {
        LintResult::new(
            "lib/counter.dart",
            vec![LintDiagnostic::error(
                "no-async-setup",
                "`Counter.setup` must not be async",
                Span::new(start, end),
            )
            .with_help("Keep setup synchronous")],
        )
    }

    #[test]
    fn test_telegraph_constructors() {
        assert_eq!(Telegraph::with_text().emitter_names(), vec!["text"]);
        assert_eq!(Telegraph::with_json().emitter_names(), vec!["json"]);
        assert_eq!(Telegraph::with_lsp().emitter_names(), vec!["lsp"]);
    }

    #[test]
    fn test_lsp_diagnostic_without_source() {
        let lsp = LspEmitter::to_lsp_diagnostics(&result(50, 70), None);
        assert_eq!(lsp.len(), 1);
        assert_eq!(lsp[0].severity, 1);
        assert_eq!(lsp[0].code, "compositions/no-async-setup");
        assert_eq!(lsp[0].source, "gesso-patina");
        assert_eq!(lsp[0].message, "`Counter.setup` must not be async\nKeep setup synchronous");
        assert_eq!(lsp[0].range.start, LspPosition { line: 0, character: 50 });
    }

    #[test]
    fn test_lsp_diagnostic_with_source() {
        let source = "class Counter {\n  Future<void> setup() async {}\n}";
        let start = source.find("Future").unwrap() as u32;
        let lsp = LspEmitter::to_lsp_diagnostics(&result(start, start + 26), Some(source));
        assert_eq!(lsp[0].range.start, LspPosition { line: 1, character: 2 });
        assert_eq!(lsp[0].range.end, LspPosition { line: 1, character: 28 });
    }

    #[test]
    fn test_transmit_all_appends_summary() {
        let outputs = Telegraph::with_text().transmit_all(&[(result(0, 5), None)]);
        assert_eq!(outputs.len(), 1);
        assert!(outputs[0].ends_with("1 error in 1 file\n"));
    }
}
