//! Species transport laws and mixture rules.
//!
//! Each species carries a pair of [`SutherlandLaw`]s (viscosity and thermal
//! conductivity). Mixture values follow Wilke's semi-empirical rule, with the
//! same weighting applied to conductivity as to viscosity.

use serde::Deserialize;

use crate::support::constraint::{Constraint, ConstraintError, StrictlyPositive};

/// Sutherland's law: `φ = φ_ref (T/T_ref)^{3/2} (T_ref + S)/(T + S)`.
///
/// Values are SI: `Pa·s` for viscosity, `W/(m·K)` for conductivity, and
/// kelvin for both temperatures.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SutherlandLaw {
    pub reference: f64,
    pub t_ref: f64,
    pub sutherland: f64,
}

impl SutherlandLaw {
    /// Creates a validated Sutherland law.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if any parameter is not strictly positive.
    pub fn new(reference: f64, t_ref: f64, sutherland: f64) -> Result<Self, ConstraintError> {
        let law = Self {
            reference,
            t_ref,
            sutherland,
        };
        law.validate()?;
        Ok(law)
    }

    pub(crate) fn validate(&self) -> Result<(), ConstraintError> {
        StrictlyPositive::check(&self.reference)?;
        StrictlyPositive::check(&self.t_ref)?;
        StrictlyPositive::check(&self.sutherland)
    }

    /// Evaluates the law at temperature `t` (K).
    #[must_use]
    pub fn eval(&self, t: f64) -> f64 {
        self.reference
            * (t / self.t_ref).powf(1.5)
            * (self.t_ref + self.sutherland)
            / (t + self.sutherland)
    }
}

/// Transport data for one species.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SutherlandTransport {
    pub viscosity: SutherlandLaw,
    pub conductivity: SutherlandLaw,
}

/// Mixes species viscosity and conductivity with Wilke's rule.
///
/// All slices are indexed by species. Returns `(mu, k)` of the mixture.
pub(crate) fn wilke(x: &[f64], molar_mass: &[f64], mu: &[f64], k: &[f64]) -> (f64, f64) {
    let n = x.len();
    let mut mu_mix = 0.0;
    let mut k_mix = 0.0;
    for i in 0..n {
        if x[i] <= 0.0 {
            continue;
        }
        let denominator: f64 = (0..n)
            .map(|j| {
                let ratio = 1.0 + (mu[i] / mu[j]).sqrt() * (molar_mass[j] / molar_mass[i]).powf(0.25);
                x[j] * ratio * ratio / (8.0 * (1.0 + molar_mass[i] / molar_mass[j])).sqrt()
            })
            .sum();
        mu_mix += x[i] * mu[i] / denominator;
        k_mix += x[i] * k[i] / denominator;
    }
    (mu_mix, k_mix)
}
