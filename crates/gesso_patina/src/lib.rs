//! # gesso_patina
//!
//! Patina - The quality checker for Gesso.
//! Linter for the setup routines of composition-style UI components.
//!
//! ## Name Origin
//!
//! **Patina** (/ˈpætɪnə/) is the layer that forms on a surface over time and
//! shows how it has been handled. `gesso_patina` inspects how components
//! handle their reactive state: what setup creates, in which order, and what
//! it leaves behind.
//!
//! ## Features
//!
//! - Works on resolved units ([`gesso_relief::ResolvedUnit`]) produced by an
//!   external parser and resolver
//! - Rich diagnostic output with code snippets (via `oxc_diagnostics`)
//! - JSON and LSP output through [`telegraph`]
//! - Inline suppression comments (`// gesso-disable-next-line`)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gesso_patina::{Linter, OutputFormat, format_results};
//! use gesso_relief::ResolvedUnit;
//!
//! let unit = ResolvedUnit::from_path("build/counter.unit.json")?;
//! let result = Linter::new().lint_unit(&unit);
//!
//! if result.has_diagnostics() {
//!     let sources: Vec<_> = unit.source.iter().map(|s| (unit.path.clone(), s.clone())).collect();
//!     println!("{}", format_results(&[result], &sources, OutputFormat::Text));
//! }
//! ```
//!
//! ## Rules
//!
//! All codes are reported as `compositions/<code>`.
//!
//! ### Essential Rules
//! - `no-conditional-composition` - Disallow composition primitives inside conditionals and loops
//! - `no-async-setup` - Disallow asynchronous setup routines
//! - `ensure-reactive-props` - Require props to be read through `widget` in setup
//!
//! ### Recommended Rules
//! - `controller-lifecycle` - Require disposable resources created in setup to be disposed
//! - `no-logic-in-builder` - Keep the builder closure free of logic
//! - `no-mutable-fields` - Require component instance fields to be final (fixable)
//! - `shallow-reactivity` - Disallow in-place mutation of reactive held values
//! - `provide-inject-type-match` - Disallow wrappers of common types as dependency keys

mod catalog;
mod component;
mod context;
mod diagnostic;
mod line_index;
mod linter;
pub mod output;
mod rule;
pub mod rules;
mod scope;
mod suppression;
pub mod telegraph;

pub use catalog::{
    Catalog, CatalogExtensions, Catalogs, Vocabulary, COMPOSITION_PRIMITIVES, DISPOSABLE_PREFIXES,
    MUTATING_METHODS, PRIMITIVE_TYPES, RESOURCE_KEYWORDS, WRAPPER_TYPES,
};
pub use component::{find_builder_closure, Component};
pub use context::LintContext;
pub use diagnostic::{Fix, Label, LintDiagnostic, LintSummary, Severity, TextEdit, RULE_NAMESPACE};
pub use line_index::LineIndex;
pub use linter::{LintResult, Linter};
pub use output::{format_results, format_summary, OutputFormat};
pub use rule::{Rule, RuleCategory, RuleMeta, RuleRegistry, RuleSelectionError};
pub use scope::{walk_setup, ScopeFrame, ScopeTracker, SetupVisitor};
pub use suppression::SuppressionMap;
pub use telegraph::{Emitter, JsonEmitter, LspDiagnostic, LspEmitter, Telegraph, TextEmitter};

use gesso_relief::ResolvedUnit;

/// Lint a resolved unit with the recommended rules.
///
/// This is a convenience function for simple use cases.
/// For more control, use `Linter::new()` directly.
pub fn lint(unit: &ResolvedUnit) -> LintResult {
    Linter::new().lint_unit(unit)
}
