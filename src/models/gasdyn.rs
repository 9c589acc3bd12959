//! Unsteady one-dimensional gas dynamics.
//!
//! [`FiniteWave`] integrates the isentropic change of state across a finite
//! (non-linear) wave by stepping along a characteristic, either in pressure
//! or in velocity. It works with any thermo model that can evaluate entropy
//! and sound speed and rebuild a state from `(p, s)`, so the same code
//! handles a calorically perfect gas and a thermally perfect mixture.

mod finite_wave;
mod traits;

pub use finite_wave::{
    Characteristic, DEFAULT_DV_STEPS, DEFAULT_T_MIN, FiniteWave, FiniteWaveDp, FiniteWaveDpInput,
    FiniteWaveDv, FiniteWaveDvInput, FiniteWaveError, FiniteWaveResult,
};
pub use traits::GasDynThermoModel;
