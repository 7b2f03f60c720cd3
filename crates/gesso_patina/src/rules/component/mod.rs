//! Component-shape rules.

mod no_mutable_fields;

pub use no_mutable_fields::NoMutableFields;
