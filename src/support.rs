//! Supporting utilities shared by models.
//!
//! - [`constraint`]: Type-level numeric invariants.
//! - [`kinetics`]: Reaction mechanisms and rate evaluation.
//! - [`ode`]: Adaptive step integrators.
//! - [`report`]: Fixed-width text output.
//! - [`thermo`]: Thermodynamic states and gas models.
//! - [`units`]: Extensions to [`uom`].

pub mod constraint;
pub mod kinetics;
pub mod ode;
pub mod report;
pub mod thermo;
pub mod units;
