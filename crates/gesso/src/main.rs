//! # gesso
//!
//! Gesso - Setup-time linter for composition-style UI components.
//!
//! ## Name Origin
//!
//! **Gesso** (/ˈdʒɛsoʊ/) is the primer painted onto a panel before any
//! picture goes on it. Components are built on top of their setup routine;
//! `gesso` checks that layer before anything is rendered over it.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gesso")]
#[command(about = "Setup-time linter for composition-style UI components", long_about = None)]
#[command(version, disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long, action = clap::ArgAction::Version)]
    version: (),

    /// Log progress to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint resolved units
    #[command(visible_alias = "patina")]
    Lint(commands::lint::LintArgs),

    /// List the built-in rules
    Rules(commands::rules::RulesArgs),

    /// Print the JSON Schema of gesso.config.json
    Schema,
}

/// Logs go to stderr so that JSON and LSP output on stdout stays clean.
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Lint(args) => commands::lint::run(args),
        Commands::Rules(args) => commands::rules::run(args),
        Commands::Schema => commands::schema::run(),
    }
}
