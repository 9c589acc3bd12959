//! Finite-rate chemistry models.
//!
//! [`ThermochemicalReactor`] advances a thermally perfect mixture through a
//! time interval at fixed volume and fixed internal energy, integrating the
//! species concentrations with a [`Mechanism`](crate::support::kinetics::Mechanism).

mod reactor;

pub use reactor::{
    Method, ReactorConfig, ReactorError, ReactorInput, ReactorStep, ThermochemicalReactor,
};
