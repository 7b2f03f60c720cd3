//! Lint command - Lint resolved units

use clap::{Args, ValueEnum};
use glob::glob;
use gesso_patina::{format_results, format_summary, LintResult, Linter, OutputFormat, Telegraph};
use gesso_relief::ResolvedUnit;
use ignore::Walk;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::load_config;

/// Suffix of serialized resolved units
const UNIT_SUFFIX: &str = ".unit.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Lsp,
}

#[derive(Args)]
pub struct LintArgs {
    /// Glob pattern(s) or directories of resolved units (*.unit.json)
    #[arg(default_value = "./**/*.unit.json")]
    pub patterns: Vec<String>,

    /// Config file path (defaults to ./gesso.config.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: Format,

    /// Maximum number of warnings before failing
    #[arg(long)]
    pub max_warnings: Option<usize>,

    /// Quiet mode - only show summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Run the rules of each unit concurrently
    #[arg(long)]
    pub parallel_rules: bool,
}

fn is_unit_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(UNIT_SUFFIX))
}

/// Resolve patterns to unit files, in pattern order
fn collect_files(patterns: &[String]) -> Vec<PathBuf> {
    patterns
        .iter()
        .flat_map(|pattern| {
            // Check if pattern contains glob characters
            if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
                glob(pattern)
                    .ok()
                    .into_iter()
                    .flatten()
                    .filter_map(|r| r.ok())
                    .filter(|p| is_unit_file(p))
                    .collect::<Vec<_>>()
            } else {
                // Use directory walking for paths (respects .gitignore)
                Walk::new(pattern)
                    .filter_map(|e| e.ok())
                    .filter(|e| is_unit_file(e.path()))
                    .map(|e| e.path().to_path_buf())
                    .collect::<Vec<_>>()
            }
        })
        .collect()
}

/// Whether the run fails, given the totals and the warning limit
fn exceeds_limits(errors: usize, warnings: usize, max_warnings: Option<usize>) -> bool {
    errors > 0 || max_warnings.is_some_and(|max| warnings > max)
}

pub fn run(args: LintArgs) {
    let start = Instant::now();

    let files = collect_files(&args.patterns);
    if files.is_empty() {
        eprintln!(
            "No resolved units found matching patterns: {:?}",
            args.patterns
        );
        return;
    }

    let config = load_config(args.config.as_deref());
    let linter = match config.lint.build_linter() {
        Ok(linter) => linter,
        Err(e) => {
            tracing::warn!("{e}; using the recommended rules");
            Linter::new()
        }
    };

    // Undecodable units are logged and skipped
    let units: Vec<ResolvedUnit> = files
        .par_iter()
        .filter_map(|path| match ResolvedUnit::from_path(path) {
            Ok(unit) => Some(unit),
            Err(e) => {
                tracing::error!("{e}");
                None
            }
        })
        .collect();
    tracing::info!(files = files.len(), units = units.len(), "loaded units");

    let results: Vec<LintResult> = if args.parallel_rules {
        units.iter().map(|u| linter.lint_unit_parallel(u)).collect()
    } else {
        units.par_iter().map(|u| linter.lint_unit(u)).collect()
    };

    let total_errors: usize = results.iter().map(|r| r.error_count).sum();
    let total_warnings: usize = results.iter().map(|r| r.warning_count).sum();

    if !args.quiet || total_errors > 0 || total_warnings > 0 {
        let output = match args.format {
            Format::Text | Format::Json => {
                let format = if args.format == Format::Json {
                    OutputFormat::Json
                } else {
                    OutputFormat::Text
                };
                let sources: Vec<(String, String)> = units
                    .iter()
                    .filter_map(|u| u.source.clone().map(|s| (u.path.clone(), s)))
                    .collect();
                format_results(&results, &sources, format)
            }
            Format::Lsp => {
                let with_sources: Vec<(LintResult, Option<String>)> = results
                    .iter()
                    .zip(&units)
                    .map(|(result, unit)| (result.clone(), unit.source.clone()))
                    .collect();
                Telegraph::with_lsp().transmit_all(&with_sources).concat()
            }
        };
        if !output.trim().is_empty() {
            print!("{}", output);
        }
    }

    let elapsed = start.elapsed();
    if args.format == Format::Text {
        println!(
            "\n{}",
            format_summary(total_errors, total_warnings, units.len())
        );
        println!("Linted {} units in {:.4?}", units.len(), elapsed);
    }

    if exceeds_limits(total_errors, total_warnings, args.max_warnings) {
        if total_errors == 0 {
            if let Some(max) = args.max_warnings {
                eprintln!("\nToo many warnings ({} > max {})", total_warnings, max);
            }
        }
        std::process::exit(1);
    }
}
