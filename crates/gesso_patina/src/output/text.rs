//! Rich terminal output using oxc_diagnostics.

use std::sync::Arc;

use oxc_diagnostics::{GraphicalReportHandler, GraphicalTheme, NamedSource};
use rustc_hash::FxHashMap;

use crate::linter::LintResult;

/// Format lint results as terminal output.
///
/// Files with known source are rendered with code snippets; the others get
/// one line per diagnostic.
pub fn format_text(results: &[LintResult], sources: &FxHashMap<&str, &str>) -> String {
    let mut output = String::new();
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode());

    for result in results {
        if result.diagnostics.is_empty() {
            continue;
        }

        let Some(source) = sources.get(result.filename.as_str()) else {
            output.push_str(&format_plain(result));
            continue;
        };
        let named_source = Arc::new(NamedSource::new(&result.filename, source.to_string()));

        for diagnostic in &result.diagnostics {
            let oxc_diag = diagnostic.clone().into_oxc_diagnostic();
            let report = oxc_diag.with_source_code(Arc::clone(&named_source));

            let mut buf = String::new();
            if handler.render_report(&mut buf, report.as_ref()).is_ok() {
                output.push_str(&buf);
                output.push('\n');
            }
        }
    }

    output
}

/// One `file:start..end: severity [rule] message` line per diagnostic
pub fn format_plain(result: &LintResult) -> String {
    let mut output = String::new();
    for d in &result.diagnostics {
        output.push_str(&format!(
            "{}:{}..{}: {} [{}] {}\n",
            result.filename,
            d.start,
            d.end,
            d.severity.as_str(),
            d.qualified_name(),
            d.message
        ));
        if let Some(help) = &d.help {
            output.push_str(&format!("  help: {}\n", help));
        }
    }
    output
}

/// Format a summary line
pub fn format_summary(error_count: usize, warning_count: usize, file_count: usize) -> String {
    let mut parts = Vec::new();

    if error_count > 0 {
        parts.push(format!(
            "{} error{}",
            error_count,
            if error_count == 1 { "" } else { "s" }
        ));
    }

    if warning_count > 0 {
        parts.push(format!(
            "{} warning{}",
            warning_count,
            if warning_count == 1 { "" } else { "s" }
        ));
    }

    if parts.is_empty() {
        format!(
            "No problems found in {} file{}",
            file_count,
            if file_count == 1 { "" } else { "s" }
        )
    } else {
        format!(
            "{} in {} file{}",
            parts.join(", "),
            file_count,
            if file_count == 1 { "" } else { "s" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::LintDiagnostic;
    use gesso_relief::Span;

    fn result() -> LintResult {
        LintResult::new(
            "lib/counter.dart",
            vec![
                LintDiagnostic::error(
                    "no-conditional-composition",
                    "`state` must not be called inside a conditional or loop",
                    Span::new(40, 48),
                )
                .with_help("Call composition APIs unconditionally"),
                LintDiagnostic::warn(
                    "no-mutable-fields",
                    "Field `count` of `Counter` is mutable",
                    Span::new(12, 26),
                ),
            ],
        )
    }

    #[test]
    fn test_plain_output() {
        insta::assert_snapshot!(format_plain(&result()), @r"
        lib/counter.dart:40..48: error [compositions/no-conditional-composition] `state` must not be called inside a conditional or loop
          help: Call composition APIs unconditionally
        lib/counter.dart:12..26: warning [compositions/no-mutable-fields] Field `count` of `Counter` is mutable
        ");
    }

    #[test]
    fn test_rich_output_with_source() {
        let source = "class Counter extends CompositionWidget {}";
        let result = LintResult::new(
            "lib/counter.dart",
            vec![LintDiagnostic::warn("no-mutable-fields", "Field is mutable", Span::new(6, 13))],
        );
        let mut sources = FxHashMap::default();
        sources.insert("lib/counter.dart", source);
        let output = format_text(&[result], &sources);
        assert!(output.contains("compositions/no-mutable-fields: Field is mutable"));
        assert!(output.contains("lib/counter.dart"));
    }

    #[test]
    fn test_summary() {
        assert_eq!(format_summary(0, 0, 1), "No problems found in 1 file");
        assert_eq!(format_summary(1, 0, 3), "1 error in 3 files");
        assert_eq!(format_summary(2, 1, 1), "2 errors, 1 warning in 1 file");
    }
}
