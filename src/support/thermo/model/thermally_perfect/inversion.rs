//! Temperature inversion of monotonic caloric properties.
//!
//! A thermally perfect mixture has no closed form for `T(u)`, `T(h)`, or
//! `T(s)` at fixed pressure. Each is recovered by bracketing the temperature
//! between the model bounds and bisecting on the property residual.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;
use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

use crate::support::thermo::PropertyError;

const MAX_ITERS: usize = 200;
const TEMPERATURE_TOL: f64 = 1e-10;

/// A property evaluated at one trial temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Sample {
    pub(super) temperature: f64,
    pub(super) value: f64,
}

/// Model adapter exposing `T ↦ property(T)` to the solver.
struct PropertyCurve<'a, F> {
    property: &'a F,
}

impl<F> Model for PropertyCurve<'_, F>
where
    F: Fn(f64) -> f64,
{
    type Input = ThermodynamicTemperature;
    type Output = Sample;
    type Error = PropertyError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let temperature = input.get::<kelvin>();
        let value = (self.property)(temperature);
        if !value.is_finite() {
            return Err(PropertyError::calculation(format!(
                "non-finite property at T = {temperature} K"
            )));
        }
        Ok(Sample { temperature, value })
    }
}

/// Residual `property(T) − target`.
struct MatchTarget {
    target: f64,
}

impl EquationProblem<1> for MatchTarget {
    type Input = ThermodynamicTemperature;
    type Output = Sample;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(ThermodynamicTemperature::new::<kelvin>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.value - self.target])
    }
}

/// Finds the temperature in `bounds` at which `property` equals `target`.
///
/// `property` must be monotonic over `bounds`.
///
/// # Errors
///
/// - [`PropertyError::OutOfDomain`] if `target` is not bracketed by the bounds.
/// - [`PropertyError::Calculation`] if the solver fails or does not converge.
pub(super) fn temperature_for<F>(
    property: F,
    target: f64,
    bounds: (f64, f64),
    what: &str,
) -> Result<f64, PropertyError>
where
    F: Fn(f64) -> f64,
{
    let (t_lo, t_hi) = bounds;
    let r_lo = property(t_lo) - target;
    let r_hi = property(t_hi) - target;
    if r_lo == 0.0 {
        return Ok(t_lo);
    }
    if r_hi == 0.0 {
        return Ok(t_hi);
    }
    if !(r_lo.is_finite() && r_hi.is_finite()) || r_lo.signum() == r_hi.signum() {
        return Err(PropertyError::out_of_domain(format!(
            "{what} = {target} is not reachable for T in [{t_lo}, {t_hi}] K"
        )));
    }

    let model = PropertyCurve {
        property: &property,
    };
    let problem = MatchTarget { target };
    let config = bisection::Config {
        max_iters: MAX_ITERS,
        x_abs_tol: TEMPERATURE_TOL,
        x_rel_tol: 0.0,
        residual_tol: 1e-12 * target.abs().max(1.0),
    };

    let solution = bisection::solve(
        &model,
        &problem,
        [t_lo, t_hi],
        &config,
        |event: &bisection::Event<'_, _, _>| {
            // A non-finite evaluation lies past the physical range; steer away from it.
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )
    .map_err(|err| PropertyError::calculation(format!("{what} inversion failed: {err}")))?;

    if solution.status != bisection::Status::Converged {
        return Err(PropertyError::calculation(format!(
            "{what} inversion hit iteration limit: residual={}, iters={}",
            solution.residual, solution.iters
        )));
    }

    Ok(solution.snapshot.output.temperature)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn inverts_linear_energy() {
        let cv = 717.75;
        let t = temperature_for(|t| cv * t, cv * 276.4, (20.0, 100_000.0), "u").unwrap();
        assert_relative_eq!(t, 276.4, epsilon = 1e-8);
    }

    #[test]
    fn inverts_logarithmic_entropy() {
        let t = temperature_for(|t: f64| 1004.85 * t.ln(), 1004.85 * 4000.0_f64.ln(), (20.0, 1.0e5), "s")
            .unwrap();
        assert_relative_eq!(t, 4000.0, max_relative = 1e-10);
    }

    #[test]
    fn unreachable_target_is_out_of_domain() {
        let result = temperature_for(|t| t, 5.0, (20.0, 100.0), "u");
        assert!(matches!(result, Err(PropertyError::OutOfDomain { .. })));
    }
}
