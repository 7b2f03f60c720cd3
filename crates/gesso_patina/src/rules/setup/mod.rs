//! Setup-routine rules.
//!
//! These rules inspect the body of each component's setup routine. Code
//! inside the builder closure runs on every build and is excluded, except by
//! `no-logic-in-builder`, which only looks there.

mod controller_lifecycle;
mod ensure_reactive_props;
mod no_async_setup;
mod no_conditional_composition;
mod no_logic_in_builder;

pub use controller_lifecycle::ControllerLifecycle;
pub use ensure_reactive_props::EnsureReactiveProps;
pub use no_async_setup::NoAsyncSetup;
pub use no_conditional_composition::NoConditionalComposition;
pub use no_logic_in_builder::NoLogicInBuilder;
