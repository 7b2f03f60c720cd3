//! Output formatters for lint results.

mod text;

pub use text::*;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::diagnostic::Severity;
use crate::line_index::LineIndex;
use crate::linter::LintResult;

/// Output format for lint results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Rich terminal output with code snippets
    #[default]
    Text,
    /// JSON output for tooling integration
    Json,
}

/// Format lint results according to the specified format.
///
/// `sources` pairs file names with their source text. Results without a
/// source are still reported, without snippets or line information.
pub fn format_results(
    results: &[LintResult],
    sources: &[(String, String)],
    format: OutputFormat,
) -> String {
    let sources: FxHashMap<&str, &str> = sources
        .iter()
        .map(|(file, source)| (file.as_str(), source.as_str()))
        .collect();
    match format {
        OutputFormat::Text => format_text(results, &sources),
        OutputFormat::Json => format_json(results, &sources),
    }
}

/// JSON output structure for a single file
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonFileResult {
    pub file: String,
    pub messages: Vec<JsonMessage>,
    pub error_count: usize,
    pub warning_count: usize,
}

/// JSON output structure for a single message.
///
/// Lines and columns are 1-based; they are 0 when the source is unknown.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonMessage {
    pub rule_id: String,
    pub severity: u8,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub start: u32,
    pub end: u32,
    pub fixable: bool,
}

pub(crate) fn severity_number(severity: Severity) -> u8 {
    match severity {
        Severity::Error => 2,
        Severity::Warning => 1,
    }
}

fn json_file_result(result: &LintResult, source: Option<&str>) -> JsonFileResult {
    let index = source.map(|source| (source, LineIndex::new(source)));
    let position = |offset: u32| match &index {
        Some((source, index)) => {
            let (line, column) = index.line_col(source, offset);
            (line + 1, column + 1)
        }
        None => (0, 0),
    };

    let messages = result
        .diagnostics
        .iter()
        .map(|d| {
            let (line, column) = position(d.start);
            let (end_line, end_column) = position(d.end);
            JsonMessage {
                rule_id: d.qualified_name(),
                severity: severity_number(d.severity),
                message: d.message.to_string(),
                help: d.help.as_ref().map(|h| h.to_string()),
                line,
                column,
                end_line,
                end_column,
                start: d.start,
                end: d.end,
                fixable: d.has_fix(),
            }
        })
        .collect();

    JsonFileResult {
        file: result.filename.clone(),
        messages,
        error_count: result.error_count,
        warning_count: result.warning_count,
    }
}

/// Format results as JSON
fn format_json(results: &[LintResult], sources: &FxHashMap<&str, &str>) -> String {
    let json_results: Vec<JsonFileResult> = results
        .iter()
        .map(|r| json_file_result(r, sources.get(r.filename.as_str()).copied()))
        .collect();

    serde_json::to_string_pretty(&json_results).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::LintDiagnostic;
    use gesso_relief::Span;

    fn sample() -> (LintResult, String) {
        let source = "class A {\n  int count = 0;\n}\n".to_string();
        let start = source.find("int").unwrap() as u32;
        let result = LintResult::new(
            "lib/a.dart",
            vec![LintDiagnostic::warn(
                "no-mutable-fields",
                "Field `count` of `A` is mutable",
                Span::new(start, start + 14),
            )],
        );
        (result, source)
    }

    #[test]
    fn test_json_positions_from_source() {
        let (result, source) = sample();
        let output = format_results(
            &[result],
            &[("lib/a.dart".to_string(), source)],
            OutputFormat::Json,
        );
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let message = &value[0]["messages"][0];
        assert_eq!(message["ruleId"], "compositions/no-mutable-fields");
        assert_eq!(message["severity"], 1);
        assert_eq!(message["line"], 2);
        assert_eq!(message["column"], 3);
        assert_eq!(message["endLine"], 2);
        assert_eq!(message["endColumn"], 17);
        assert_eq!(value[0]["warningCount"], 1);
    }

    #[test]
    fn test_json_without_source() {
        let (result, _) = sample();
        let output = format_results(&[result], &[], OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["messages"][0]["line"], 0);
        assert_eq!(value[0]["messages"][0]["start"], 12);
    }
}
