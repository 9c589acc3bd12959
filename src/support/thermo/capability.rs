//! Capability traits: what a gas model can evaluate and which inputs it can build a state from.

mod base;
mod properties;
mod state_from;

pub use base::ThermoModel;
pub use properties::*;
pub use state_from::StateFrom;
