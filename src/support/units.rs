//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical units (e.g., temperature, pressure, velocity).
//! Numerical kernels work on SI `f64` values internally and convert at the public boundary.
//! This module provides extensions that are useful for modeling but aren't included in [`uom`].
//!
//! [`TemperatureDifference::minus`] subtracts absolute temperatures:
//!
//! ```
//! use twine_gasdyn::support::units::TemperatureDifference;
//! use uom::si::{
//!     f64::ThermodynamicTemperature, temperature_interval, thermodynamic_temperature::kelvin,
//! };
//!
//! let cooled = ThermodynamicTemperature::new::<kelvin>(276.0)
//!     .minus(ThermodynamicTemperature::new::<kelvin>(320.0));
//! assert_eq!(cooled.get::<temperature_interval::kelvin>(), -44.0);
//! ```

mod quantities;
mod temperature_difference;

pub use quantities::{
    MOLAR_GAS_CONSTANT, SpecificEnthalpy, SpecificEntropy, SpecificGasConstant,
    SpecificInternalEnergy, specific_gas_constant,
};
pub use temperature_difference::TemperatureDifference;
