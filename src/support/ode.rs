//! Adaptive single-step ODE integrators.
//!
//! Two methods share one driver, [`integrate`]:
//!
//! - [`Rkf45`]: embedded Runge–Kutta–Fehlberg 4(5) for any [`OdeSystem`].
//! - [`AlphaQss`]: the α-QSS predictor–corrector of Mott, Oran and van Leer
//!   for stiff [`ProductionLossSystem`]s such as chemical kinetics.
//!
//! Each method takes one trial step and reports a [`StepOutcome`]. The
//! driver handles step-size bookkeeping, the final partial step, and the
//! limits in [`IntegrationLimits`].

mod alpha_qss;
mod rkf45;

use log::trace;
use thiserror::Error;

pub use alpha_qss::AlphaQss;
pub use rkf45::Rkf45;

/// A system `dy/dt = f(t, y)`.
pub trait OdeSystem {
    /// Number of state variables.
    fn dimension(&self) -> usize;

    /// Writes `f(t, y)` into `dydt`.
    fn derivative(&self, t: f64, y: &[f64], dydt: &mut [f64]);
}

/// A system whose right-hand side splits as `dy/dt = q(y) − L(y)`.
///
/// `q` is the production rate and `L` the loss rate, both non-negative, with
/// `L_i` proportional to `y_i` in the usual chemical sense.
pub trait ProductionLossSystem {
    fn dimension(&self) -> usize;

    /// Writes production into `q` and loss into `l`.
    fn production_loss(&self, t: f64, y: &[f64], q: &mut [f64], l: &mut [f64]);
}

impl<S: ProductionLossSystem + ?Sized> OdeSystem for S {
    fn dimension(&self) -> usize {
        ProductionLossSystem::dimension(self)
    }

    fn derivative(&self, t: f64, y: &[f64], dydt: &mut [f64]) {
        let mut l = vec![0.0; dydt.len()];
        self.production_loss(t, y, dydt, &mut l);
        dydt.iter_mut().zip(&l).for_each(|(d, l)| *d -= l);
    }
}

/// Result of one trial step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The step met the tolerance; `y` is the state at `t + h`.
    Accepted { y: Vec<f64>, h_next: f64 },
    /// The step failed the tolerance; retry from the same `t` with `h_next`.
    Rejected { h_next: f64 },
}

/// Error control shared by the step methods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepControl {
    pub rel_tol: f64,
    pub abs_tol: f64,
    /// Factor applied to the optimal step estimate.
    pub safety: f64,
    /// Largest allowed ratio `h_next / h` after an accepted step.
    pub max_growth: f64,
}

impl Default for StepControl {
    fn default() -> Self {
        Self {
            rel_tol: 1e-6,
            abs_tol: 1e-12,
            safety: 0.9,
            max_growth: 5.0,
        }
    }
}

/// Smallest ratio `h_next / h` after a rejected step.
pub(crate) const MIN_SHRINK: f64 = 0.2;

/// A one-step method that can advance system `S`.
pub trait Stepper<S: ?Sized> {
    /// Attempts one step of size `h` from `(t, y)`.
    fn step(&self, system: &S, t: f64, y: &[f64], h: f64) -> StepOutcome;
}

/// Limits on a single call to [`integrate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationLimits {
    /// Maximum number of trial steps, accepted or rejected.
    pub max_steps: usize,
    /// Steps smaller than this are treated as a failure.
    pub min_step: f64,
}

impl Default for IntegrationLimits {
    fn default() -> Self {
        Self {
            max_steps: 100_000,
            min_step: 1e-20,
        }
    }
}

/// Final state and statistics of an integration.
#[derive(Debug, Clone, PartialEq)]
pub struct Integration {
    pub y: Vec<f64>,
    /// The step size last proposed by the method.
    pub h_next: f64,
    pub accepted: usize,
    pub rejected: usize,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OdeError {
    #[error("step size {h:e} fell below the minimum at t = {t:e}")]
    StepSizeUnderflow { t: f64, h: f64 },

    #[error("exceeded {limit} steps")]
    TooManySteps { limit: usize },

    #[error("initial step size must be positive and finite, got {h}")]
    InvalidStep { h: f64 },
}

/// Integrates `system` from `t = 0` to `t_end`, starting with step `h0`.
///
/// # Errors
///
/// Returns [`OdeError`] if `h0` is invalid, if the step size collapses below
/// `limits.min_step`, or if `limits.max_steps` trial steps are used.
pub fn integrate<S, M>(
    method: &M,
    system: &S,
    y0: Vec<f64>,
    t_end: f64,
    h0: f64,
    limits: &IntegrationLimits,
) -> Result<Integration, OdeError>
where
    S: ?Sized,
    M: Stepper<S>,
{
    if !(h0 > 0.0 && h0.is_finite()) {
        return Err(OdeError::InvalidStep { h: h0 });
    }

    let mut t = 0.0;
    let mut y = y0;
    let mut h = h0;
    let mut h_next = h0;
    let mut accepted = 0;
    let mut rejected = 0;

    while t < t_end {
        if accepted + rejected >= limits.max_steps {
            return Err(OdeError::TooManySteps {
                limit: limits.max_steps,
            });
        }

        let remaining = t_end - t;
        let last = h >= remaining;
        let h_try = if last { remaining } else { h };
        if h_try < limits.min_step && !last {
            return Err(OdeError::StepSizeUnderflow { t, h: h_try });
        }

        match method.step(system, t, &y, h_try) {
            StepOutcome::Accepted { y: y_new, h_next: proposal } => {
                y = y_new;
                t = if last { t_end } else { t + h_try };
                // A step shortened to land on t_end says nothing about the next interval.
                h_next = if h_try < h { h } else { proposal };
                h = proposal;
                accepted += 1;
            }
            StepOutcome::Rejected { h_next: proposal } => {
                trace!("rejected step h={h_try:e} at t={t:e}, retrying with {proposal:e}");
                if proposal < limits.min_step {
                    return Err(OdeError::StepSizeUnderflow { t, h: proposal });
                }
                h = proposal;
                rejected += 1;
            }
        }
    }

    Ok(Integration {
        y,
        h_next,
        accepted,
        rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    /// `y' = −k·y`, written in production/loss form.
    struct Decay {
        k: f64,
    }

    impl ProductionLossSystem for Decay {
        fn dimension(&self) -> usize {
            1
        }

        fn production_loss(&self, _t: f64, y: &[f64], q: &mut [f64], l: &mut [f64]) {
            q[0] = 0.0;
            l[0] = self.k * y[0];
        }
    }

    /// Always rejects, halving the step.
    struct Stubborn;

    impl<S: ?Sized> Stepper<S> for Stubborn {
        fn step(&self, _system: &S, _t: f64, _y: &[f64], h: f64) -> StepOutcome {
            StepOutcome::Rejected { h_next: 0.5 * h }
        }
    }

    #[test]
    fn production_loss_systems_are_ode_systems() {
        let mut dydt = [0.0];
        Decay { k: 3.0 }.derivative(0.0, &[2.0], &mut dydt);
        assert_relative_eq!(dydt[0], -6.0);
    }

    #[test]
    fn rkf45_lands_exactly_on_end_time() {
        let method = Rkf45::new(StepControl::default());
        let result = integrate(
            &method,
            &Decay { k: 1.0 },
            vec![1.0],
            2.0,
            1e-3,
            &IntegrationLimits::default(),
        )
        .unwrap();

        assert_relative_eq!(result.y[0], (-2.0_f64).exp(), max_relative = 1e-5);
        assert!(result.accepted > 1);
        assert!(result.h_next > 1e-3);
    }

    #[test]
    fn reports_step_size_underflow() {
        let limits = IntegrationLimits {
            max_steps: 1_000,
            min_step: 1e-6,
        };
        let result = integrate(&Stubborn, &Decay { k: 1.0 }, vec![1.0], 1.0, 0.1, &limits);
        assert!(matches!(result, Err(OdeError::StepSizeUnderflow { .. })));
    }

    #[test]
    fn reports_too_many_steps() {
        let limits = IntegrationLimits {
            max_steps: 3,
            min_step: 0.0,
        };
        let result = integrate(&Stubborn, &Decay { k: 1.0 }, vec![1.0], 1.0, 0.1, &limits);
        assert_eq!(result, Err(OdeError::TooManySteps { limit: 3 }));
    }

    #[test]
    fn rejects_invalid_initial_step() {
        let method = Rkf45::new(StepControl::default());
        let result = integrate(
            &method,
            &Decay { k: 1.0 },
            vec![1.0],
            1.0,
            0.0,
            &IntegrationLimits::default(),
        );
        assert!(matches!(result, Err(OdeError::InvalidStep { .. })));
    }
}
