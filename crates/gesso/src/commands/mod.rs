//! CLI subcommands

pub mod lint;
pub mod rules;
pub mod schema;
