//! Thermodynamic property models.
//!
//! - [`PerfectGas`]: single-component, calorically perfect gas with
//!   compile-time fluid constants.
//! - [`ThermallyPerfectGas`]: multi-species mixture with temperature-dependent
//!   heat capacities, loaded at run time from a gas-model file.

pub mod perfect_gas;
pub mod thermally_perfect;
pub mod transport;

pub(crate) mod ideal_gas_eos;

pub use perfect_gas::PerfectGas;
pub use thermally_perfect::{Composition, ConfigError, Nasa7, Species, ThermallyPerfectGas};
