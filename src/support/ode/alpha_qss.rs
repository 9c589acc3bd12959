use super::{MIN_SHRINK, ProductionLossSystem, StepControl, StepOutcome, Stepper};

/// Added to `1/√σ` when proposing the next step.
const STEP_BIAS: f64 = 0.005;

/// α-QSS predictor–corrector (Mott, Oran and van Leer).
///
/// Each species is advanced with the quasi-steady update
/// `c = c₀ + h·(q − p·c₀)/(1 + α·h·p)`, where `p = L/c` is the loss frequency
/// and `α(p·h)` blends the explicit (`α = 1/2`) and asymptotic (`α → 1`)
/// limits. One predictor and one corrector are used per step; the
/// difference between them measures convergence:
///
/// `σ = max_i |c_c − c_p| / (rel_tol·max(c_c, abs_tol))`.
///
/// A step with `σ ≤ 1` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AlphaQss {
    control: StepControl,
}

impl AlphaQss {
    #[must_use]
    pub fn new(control: StepControl) -> Self {
        Self { control }
    }

    /// Step ratio after a rejected step, never above `safety`.
    fn shrink(&self, sigma: f64) -> f64 {
        (self.control.safety / sigma.sqrt())
            .max(MIN_SHRINK)
            .min(self.control.safety)
    }
}

/// `α` as a function of `p·h`, finite for all non-negative arguments.
fn alpha(ph: f64) -> f64 {
    let ph2 = ph * ph;
    let ph3 = ph2 * ph;
    (180.0 + 60.0 * ph + 11.0 * ph2 + ph3) / (360.0 + 60.0 * ph + 12.0 * ph2 + ph3)
}

fn loss_frequency(l: f64, c: f64) -> f64 {
    if c > 0.0 { l / c } else { 0.0 }
}

impl<S: ProductionLossSystem + ?Sized> Stepper<S> for AlphaQss {
    fn step(&self, system: &S, t: f64, y: &[f64], h: f64) -> StepOutcome {
        let n = y.len();
        let mut q0 = vec![0.0; n];
        let mut l0 = vec![0.0; n];
        system.production_loss(t, y, &mut q0, &mut l0);

        let p0: Vec<f64> = l0.iter().zip(y).map(|(l, c)| loss_frequency(*l, *c)).collect();
        let predicted: Vec<f64> = (0..n)
            .map(|i| {
                let hp = h * p0[i];
                y[i] + h * (q0[i] - p0[i] * y[i]) / (1.0 + alpha(hp) * hp)
            })
            .collect();

        let mut qp = vec![0.0; n];
        let mut lp = vec![0.0; n];
        system.production_loss(t + h, &predicted, &mut qp, &mut lp);

        let mut corrected = vec![0.0; n];
        let mut sigma: f64 = 0.0;
        for i in 0..n {
            let p_bar = 0.5 * (p0[i] + loss_frequency(lp[i], predicted[i]));
            let hp = h * p_bar;
            let a = alpha(hp);
            let q_tilde = a * qp[i] + (1.0 - a) * q0[i];
            corrected[i] = y[i] + h * (q_tilde - p_bar * y[i]) / (1.0 + a * hp);

            let scale = self.control.rel_tol * corrected[i].max(self.control.abs_tol);
            sigma = sigma.max((corrected[i] - predicted[i]).abs() / scale);
        }

        if !sigma.is_finite() {
            return StepOutcome::Rejected {
                h_next: MIN_SHRINK * h,
            };
        }
        if sigma <= 1.0 {
            let factor = if sigma == 0.0 {
                self.control.max_growth
            } else {
                (1.0 / sigma.sqrt() + STEP_BIAS).min(self.control.max_growth)
            };
            StepOutcome::Accepted {
                y: corrected,
                h_next: h * factor,
            }
        } else {
            StepOutcome::Rejected {
                h_next: h * self.shrink(sigma),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::ode::{IntegrationLimits, integrate};

    /// `A ⇌ B` with first-order rates `k_f` and `k_b`.
    struct Isomerization {
        kf: f64,
        kb: f64,
    }

    impl ProductionLossSystem for Isomerization {
        fn dimension(&self) -> usize {
            2
        }

        fn production_loss(&self, _t: f64, y: &[f64], q: &mut [f64], l: &mut [f64]) {
            let forward = self.kf * y[0];
            let backward = self.kb * y[1];
            q[0] = backward;
            l[0] = forward;
            q[1] = forward;
            l[1] = backward;
        }
    }

    #[test]
    fn alpha_spans_explicit_to_asymptotic_limits() {
        assert_relative_eq!(alpha(0.0), 0.5);
        assert!(alpha(1.0e6) > 0.999);
        assert!(alpha(1.0) > 0.5 && alpha(1.0) < 1.0);
    }

    #[test]
    fn stiff_isomerization_relaxes_to_equilibrium() {
        let system = Isomerization { kf: 1.0e6, kb: 2.0e6 };
        let method = AlphaQss::new(StepControl {
            rel_tol: 1e-4,
            ..StepControl::default()
        });

        let result = integrate(
            &method,
            &system,
            vec![1.0, 0.0],
            1.0e-3,
            1.0e-9,
            &IntegrationLimits::default(),
        )
        .unwrap();

        // Equilibrium: B/A = kf/kb. The method is not exactly conservative.
        assert_relative_eq!(result.y[1] / result.y[0], 0.5, max_relative = 1e-2);
        assert_relative_eq!(result.y[0] + result.y[1], 1.0, max_relative = 1e-2);
        assert!(result.y.iter().all(|c| *c >= 0.0));
    }

    #[test]
    fn stays_non_negative_for_pure_loss() {
        struct Burnout;
        impl ProductionLossSystem for Burnout {
            fn dimension(&self) -> usize {
                1
            }
            fn production_loss(&self, _t: f64, y: &[f64], q: &mut [f64], l: &mut [f64]) {
                q[0] = 0.0;
                l[0] = 1.0e8 * y[0];
            }
        }

        let method = AlphaQss::default();
        let StepOutcome::Accepted { y, .. } = method.step(&Burnout, 0.0, &[1.0], 1.0) else {
            panic!("stiff decay step should be accepted");
        };
        assert!(y[0] >= 0.0);
        assert!(y[0] < 1.0e-6);
    }

    #[test]
    fn small_safety_factor_bounds_rejection_shrink() {
        let method = AlphaQss::new(StepControl {
            safety: 0.1,
            ..StepControl::default()
        });
        assert_relative_eq!(method.shrink(4.0), 0.1);
        assert_relative_eq!(AlphaQss::default().shrink(4.0), 0.45);
        assert_relative_eq!(AlphaQss::default().shrink(1.0e6), MIN_SHRINK);
    }
}
