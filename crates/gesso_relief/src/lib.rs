//! # gesso_relief
//!
//! Relief - The resolved syntax surface consumed by the Gesso linter.
//!
//! Parsing and name resolution happen outside of Gesso. A resolver front-end
//! hands over one [`ResolvedUnit`] per source file: declarations, statements
//! and expressions with byte spans, plus the resolution of identifiers and
//! call targets where it is known. This crate defines that tree, a
//! [`Visit`] trait to traverse it, and a [`NodeBuilder`] for constructing
//! trees programmatically.

pub mod ast;
pub mod builder;
pub mod span;
pub mod unit;
pub mod visit;

pub use ast::*;
pub use builder::NodeBuilder;
pub use span::{GetSpan, Span};
pub use unit::{ResolvedUnit, UnitLoadError};
pub use visit::Visit;
