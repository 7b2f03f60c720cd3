//! End-to-end linting of resolved units.

use std::path::Path;

use gesso_patina::output::format_plain;
use gesso_patina::{format_results, Linter, OutputFormat, RuleRegistry, Severity};
use gesso_relief::{ClassMember, Declaration, KeywordKind, NodeBuilder, ResolvedUnit, Stmt};

fn fixture() -> ResolvedUnit {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/counter.unit.json");
    ResolvedUnit::from_path(&path).expect("fixture should decode")
}

fn component(b: &NodeBuilder, setup: Vec<Stmt>, members: Vec<ClassMember>) -> ResolvedUnit {
    let mut members = members;
    members.push(b.method("setup", b.block_body(setup)));
    ResolvedUnit::new(
        "lib/widget.dart",
        vec![Declaration::Class(b.class(
            "Panel",
            Some("CompositionWidget"),
            members,
        ))],
    )
}

fn codes(unit: &ResolvedUnit) -> Vec<&'static str> {
    Linter::new()
        .lint_unit(unit)
        .diagnostics
        .iter()
        .map(|d| d.rule)
        .collect()
}

// =============================================================================
// Fixture with source text
// =============================================================================

mod fixture_unit {
    use super::*;

    #[test]
    fn reports_in_registry_order() {
        let result = Linter::new().lint_unit(&fixture());
        insta::assert_snapshot!(format_plain(&result), @r"
        lib/counter.dart:292..302: error [compositions/no-conditional-composition] `watch` must not be called inside a conditional or loop
          help: Call composition APIs unconditionally at the top level of setup and branch on the values they hold
        lib/counter.dart:149..176: warning [compositions/controller-lifecycle] `scroll` (ScrollController) is never disposed
          help: Add `onCleanup(() => scroll.dispose())` or create it with a `use*` helper
        lib/counter.dart:80..95: warning [compositions/no-mutable-fields] Field `clicks` of `Counter` is mutable
          help: Make the field final and keep mutable values in state() inside setup
        ");
        assert_eq!((result.error_count, result.warning_count), (1, 2));
    }

    #[test]
    fn suppression_needs_source() {
        let mut unit = fixture();
        unit.source = None;
        let result = Linter::new().lint_unit(&unit);
        let conditional = result
            .diagnostics
            .iter()
            .filter(|d| d.rule == "no-conditional-composition")
            .count();
        assert_eq!(conditional, 2);
    }

    #[test]
    fn json_output_has_line_and_column() {
        let unit = fixture();
        let result = Linter::new().lint_unit(&unit);
        let source = unit.source.clone().unwrap();
        let output = format_results(
            &[result],
            &[(unit.path.clone(), source)],
            OutputFormat::Json,
        );
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let messages = value[0]["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);

        let positions: Vec<(u64, u64, u64, u64)> = messages
            .iter()
            .map(|m| {
                (
                    m["line"].as_u64().unwrap(),
                    m["column"].as_u64().unwrap(),
                    m["endLine"].as_u64().unwrap(),
                    m["endColumn"].as_u64().unwrap(),
                )
            })
            .collect();
        assert_eq!(
            positions,
            vec![(10, 23, 10, 33), (7, 11, 7, 38), (4, 3, 4, 18)]
        );
        assert_eq!(messages[0]["severity"], 2);
        assert_eq!(messages[2]["fixable"], true);
    }

    #[test]
    fn mutable_field_fix_applies_to_source() {
        let unit = fixture();
        let result = Linter::new().lint_unit(&unit);
        let fix = result
            .diagnostics
            .iter()
            .find_map(|d| d.fix.as_ref())
            .expect("no-mutable-fields is fixable");
        let fixed = fix.apply(unit.source.as_deref().unwrap());
        assert!(fixed.contains("  final int clicks = 0;\n"));
    }

    #[test]
    fn essential_preset_reports_errors_only() {
        let linter = Linter::with_registry(RuleRegistry::with_essential());
        let result = linter.lint_unit(&fixture());
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics.iter().all(|d| d.severity == Severity::Error));
    }
}

// =============================================================================
// Scenarios
// =============================================================================

mod scenarios {
    use super::*;
    use gesso_relief::GetSpan;

    #[test]
    fn conditional_state_call() {
        let b = NodeBuilder::new();
        let call = b.call("state", vec![b.int(0)]);
        let span = call.span();
        let unit = component(&b, vec![b.if_stmt(b.ident("cond"), vec![b.expr_stmt(call)])], vec![]);

        let result = Linter::new().lint_unit(&unit);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].rule, "no-conditional-composition");
        assert_eq!(result.diagnostics[0].span(), span);
    }

    #[test]
    fn undisposed_then_disposed_resource() {
        let b = NodeBuilder::new();
        let leaking = component(
            &b,
            vec![b.var_local("c", b.new_instance("ResourceController", vec![]))],
            vec![],
        );
        assert_eq!(codes(&leaking), vec!["controller-lifecycle"]);

        let b = NodeBuilder::new();
        let disposed = component(
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
        assert!(codes(&disposed).is_empty());
    }

    #[test]
    fn mutable_final_and_static_fields() {
        let b = NodeBuilder::new();
        let unit = component(
            &b,
            vec![],
            vec![b.field(&[], Some("int"), "count", Some(b.int(0)))],
        );
        assert_eq!(codes(&unit), vec!["no-mutable-fields"]);

        let b = NodeBuilder::new();
        let unit = component(
            &b,
            vec![],
            vec![
                b.field(&[KeywordKind::Final], Some("int"), "count", Some(b.int(0))),
                b.field(&[KeywordKind::Static], Some("int"), "counter", Some(b.int(0))),
            ],
        );
        assert!(codes(&unit).is_empty());
    }

    #[test]
    fn index_write_versus_reassignment() {
        let b = NodeBuilder::new();
        let unit = component(
            &b,
            vec![b.expr_stmt(b.assign(b.index(b.value_of(b.ident("items")), b.int(0)), b.int(10)))],
            vec![],
        );
        assert_eq!(codes(&unit), vec!["shallow-reactivity"]);

        let b = NodeBuilder::new();
        let unit = component(
            &b,
            vec![b.expr_stmt(b.assign(
                b.value_of(b.ident("items")),
                b.list(vec![b.spread(b.value_of(b.ident("items"))), b.int(10)]),
            ))],
            vec![],
        );
        assert!(codes(&unit).is_empty());
    }

    #[test]
    fn builder_logic() {
        let b = NodeBuilder::new();
        let print = b.expr_stmt(b.call("print", vec![b.ident("x")]));
        let span = print.span();
        let builder = b.closure(&["ctx"], vec![print, b.ret(b.new_instance("Widget", vec![]))]);
        let unit = component(&b, vec![b.ret(builder)], vec![]);
        let result = Linter::new().lint_unit(&unit);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].rule, "no-logic-in-builder");
        assert_eq!(result.diagnostics[0].span(), span);

        let b = NodeBuilder::new();
        let builder = b.arrow(&["ctx"], b.new_instance("Widget", vec![]));
        let unit = component(&b, vec![b.ret(builder)], vec![]);
        assert!(codes(&unit).is_empty());
    }
}

// =============================================================================
// Engine properties
// =============================================================================

mod engine {
    use super::*;

    #[test]
    fn deterministic() {
        let unit = fixture();
        let linter = Linter::new();
        assert_eq!(linter.lint_unit(&unit), linter.lint_unit(&unit));
    }

    #[test]
    fn parallel_rules_match_sequential() {
        let unit = fixture();
        let linter = Linter::new();
        assert_eq!(linter.lint_unit(&unit), linter.lint_unit_parallel(&unit));
    }

    #[test]
    fn many_units_keep_input_order() {
        let b = NodeBuilder::new();
        let mut units = vec![fixture()];
        for i in 0..8 {
            let mut unit = component(&b, vec![], vec![b.field(&[], None, "x", None)]);
            unit.path = format!("lib/panel_{i}.dart");
            units.push(unit);
        }
        let (results, summary) = Linter::new().lint_units(&units);
        let files: Vec<&str> = results.iter().map(|r| r.filename.as_str()).collect();
        let expected: Vec<&str> = units.iter().map(|u| u.path.as_str()).collect();
        assert_eq!(files, expected);
        assert_eq!(summary.file_count, 9);
        assert_eq!(summary.error_count, 1);
        assert_eq!(summary.warning_count, 2 + 8);
    }

    #[test]
    fn non_components_are_skipped() {
        let b = NodeBuilder::new();
        let unit = ResolvedUnit::new(
            "lib/plain.dart",
            vec![Declaration::Class(b.class(
                "Plain",
                Some("StatelessWidget"),
                vec![
                    b.field(&[], Some("int"), "count", None),
                    b.method(
                        "setup",
                        b.block_body(vec![b.if_stmt(
                            b.ident("c"),
                            vec![b.expr_stmt(b.call("state", vec![]))],
                        )]),
                    ),
                ],
            ))],
        );
        assert!(codes(&unit).is_empty());
    }
}
