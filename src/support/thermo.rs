//! Thermodynamic and transport property modeling for gases.
//!
//! A [`State`] holds the independent variables (temperature, density, and a
//! fluid value that may carry composition). Models implement capability traits
//! from [`capability`] to derive everything else from a state: pressure,
//! internal energy, entropy, sound speed, and transport coefficients.

mod error;
mod state;

pub mod capability;
pub mod fluid;
pub mod model;

pub use error::PropertyError;
pub use state::State;
