//! Public Twine models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Organization
//!
//! Models are organized into domain-specific submodules:
//!
//! - [`gasdyn`]: Unsteady, one-dimensional gas dynamics (finite waves).
//! - [`kinetics`]: Zero-dimensional chemical reactors.
//!
//! # Model structure
//!
//! Each model keeps its computation in a plain Rust API (for example
//! [`gasdyn::FiniteWave`] or [`kinetics::ThermochemicalReactor`]) and exposes
//! thin [`twine_core::Model`] adapters that delegate to it.

pub mod gasdyn;
pub mod kinetics;
