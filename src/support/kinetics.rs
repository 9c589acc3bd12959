//! Finite-rate chemical kinetics.
//!
//! A [`Mechanism`] is a list of [`Reaction`]s bound to the species order of a
//! [`ThermallyPerfectGas`](crate::support::thermo::model::ThermallyPerfectGas).
//! Each reaction has a forward [`ArrheniusRate`] and a [`BackwardRate`],
//! which is usually derived from the equilibrium constant.
//!
//! All quantities are SI: concentrations in mol/m³, time in seconds, and
//! rate coefficients in the matching `(m³/mol)^(order−1)/s`.
//!
//! Species rates are split into a production vector `q` and a loss vector `L`
//! so that `dc/dt = q − L`. The split is what quasi-steady integrators need;
//! explicit integrators use only the difference.

mod equation;
mod error;
mod mechanism;
mod rate;
mod reaction;

pub use equation::{Equation, Participant, parse_equation};
pub use error::MechanismError;
pub use mechanism::{Mechanism, RateConstants};
pub use rate::ArrheniusRate;
pub use reaction::{BackwardRate, Reaction};
