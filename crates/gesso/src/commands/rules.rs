//! Rules command - List the built-in lint rules

use std::path::PathBuf;

use clap::Args;
use gesso_patina::{RuleMeta, RuleRegistry, RULE_NAMESPACE};
use serde::Serialize;

use crate::config::load_config;

#[derive(Args)]
pub struct RulesArgs {
    /// Config file path (defaults to ./gesso.config.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RuleEntry {
    code: String,
    severity: &'static str,
    category: &'static str,
    fixable: bool,
    enabled: bool,
    description: &'static str,
}

fn entry(meta: &RuleMeta, enabled: bool) -> RuleEntry {
    RuleEntry {
        code: format!("{}/{}", RULE_NAMESPACE, meta.code),
        severity: meta.severity.as_str(),
        category: meta.category.as_str(),
        fixable: meta.fixable,
        enabled,
        description: meta.description,
    }
}

fn format_text(entries: &[RuleEntry]) -> String {
    let width = entries.iter().map(|e| e.code.len()).max().unwrap_or(0);
    let mut output = String::new();
    for e in entries {
        let marker = if e.enabled { "*" } else { " " };
        let fixable = if e.fixable { " (fixable)" } else { "" };
        output.push_str(&format!(
            "{} {:<width$}  {:<7}  {}{}\n",
            marker, e.code, e.severity, e.description, fixable
        ));
    }
    output.push_str("\n* enabled by the current configuration\n");
    output
}

pub fn run(args: RulesArgs) {
    let config = load_config(args.config.as_deref());
    let enabled = config.lint.enabled_codes();

    let entries: Vec<RuleEntry> = RuleRegistry::with_recommended()
        .rules()
        .iter()
        .map(|rule| {
            let meta = rule.meta();
            entry(meta, enabled.contains(&meta.code))
        })
        .collect();

    match args.format.as_str() {
        "json" => match serde_json::to_string_pretty(&entries) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                tracing::error!("failed to serialize rules: {e}");
                std::process::exit(2);
            }
        },
        _ => print!("{}", format_text(&entries)),
    }
}
