//! Reactivity rules.
//!
//! These rules look at every declaration of a unit, not only component setup
//! routines, since reactive wrappers are passed around freely.

mod provide_inject_type_match;
mod shallow_reactivity;

pub use provide_inject_type_match::ProvideInjectTypeMatch;
pub use shallow_reactivity::ShallowReactivity;
