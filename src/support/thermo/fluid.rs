//! Canonical fluid identifiers.
//!
//! A fluid type names a substance, and each model defines how that name is
//! interpreted. For [`PerfectGas`](crate::support::thermo::model::PerfectGas)
//! the marker supplies constant `R`, `cp`, and optional Sutherland transport.
//!
//! Mixtures do not use markers: their fluid value is a
//! [`Composition`](crate::support::thermo::model::Composition).

mod air;
mod nitrogen;

pub use air::Air;
pub use nitrogen::Nitrogen;
