//! # Twine Gasdyn
//!
//! Gas dynamics and thermochemistry models for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations,
//!   such as finite-wave flow relations and a fixed-volume reactor.
//! - [`support`]: Supporting utilities used by models, including gas models,
//!   reaction mechanisms, and ODE integrators.
//!
//! ## Stability
//!
//! Modules in [`support`] are public because the gas models, mechanisms, and
//! integrators are useful on their own, but their APIs are not yet stable.
//! Helpers used by a single model stay private to that model.

pub mod models;
pub mod support;
