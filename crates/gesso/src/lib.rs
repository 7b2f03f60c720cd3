//! # Gesso
//!
//! Setup-time linter for composition-style UI components, written in Rust.
//!
//! This crate re-exports the Gesso sub-crates for unified documentation.
//!
//! ## Crates
//!
//! - [`relief`] - Resolved syntax tree consumed by the linter
//! - [`patina`] - Lint rules, engine and output formatting

/// Resolved syntax tree consumed by the linter.
pub use gesso_relief as relief;

/// Lint rules, engine and output formatting.
pub use gesso_patina as patina;
