use super::{MIN_SHRINK, OdeSystem, StepControl, StepOutcome, Stepper};

// Fehlberg 4(5) tableau.
const C: [f64; 6] = [0.0, 1.0 / 4.0, 3.0 / 8.0, 12.0 / 13.0, 1.0, 1.0 / 2.0];
const A2: [f64; 1] = [1.0 / 4.0];
const A3: [f64; 2] = [3.0 / 32.0, 9.0 / 32.0];
const A4: [f64; 3] = [1932.0 / 2197.0, -7200.0 / 2197.0, 7296.0 / 2197.0];
const A5: [f64; 4] = [439.0 / 216.0, -8.0, 3680.0 / 513.0, -845.0 / 4104.0];
const A6: [f64; 5] = [
    -8.0 / 27.0,
    2.0,
    -3544.0 / 2565.0,
    1859.0 / 4104.0,
    -11.0 / 40.0,
];
/// Fifth-order weights; the step advances with these.
const B5: [f64; 6] = [
    16.0 / 135.0,
    0.0,
    6656.0 / 12825.0,
    28561.0 / 56430.0,
    -9.0 / 50.0,
    2.0 / 55.0,
];
/// Difference between fifth- and fourth-order weights.
const E: [f64; 6] = [
    1.0 / 360.0,
    0.0,
    -128.0 / 4275.0,
    -2197.0 / 75240.0,
    1.0 / 50.0,
    2.0 / 55.0,
];

/// Runge–Kutta–Fehlberg 4(5) with local extrapolation.
///
/// The error norm is `max_i |e_i| / (abs_tol + rel_tol·max(|y_i|, |y_new_i|))`
/// and a step is accepted when it is at most one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rkf45 {
    control: StepControl,
}

impl Rkf45 {
    #[must_use]
    pub fn new(control: StepControl) -> Self {
        Self { control }
    }

    fn proposal(&self, h: f64, err: f64) -> f64 {
        let factor = if err == 0.0 {
            self.control.max_growth
        } else {
            self.control.safety * err.powf(-0.2)
        };
        h * factor.max(MIN_SHRINK).min(self.control.max_growth)
    }
}

impl<S: OdeSystem + ?Sized> Stepper<S> for Rkf45 {
    fn step(&self, system: &S, t: f64, y: &[f64], h: f64) -> StepOutcome {
        let n = y.len();
        let mut k = [
            vec![0.0; n],
            vec![0.0; n],
            vec![0.0; n],
            vec![0.0; n],
            vec![0.0; n],
            vec![0.0; n],
        ];
        let mut stage = vec![0.0; n];

        system.derivative(t, y, &mut k[0]);
        let rows: [&[f64]; 5] = [&A2, &A3, &A4, &A5, &A6];
        for (s, row) in rows.iter().enumerate() {
            for i in 0..n {
                let increment: f64 = row.iter().enumerate().map(|(j, a)| a * k[j][i]).sum();
                stage[i] = y[i] + h * increment;
            }
            system.derivative(t + C[s + 1] * h, &stage, &mut k[s + 1]);
        }

        let mut y_new = vec![0.0; n];
        let mut err: f64 = 0.0;
        for i in 0..n {
            let dy: f64 = (0..6).map(|j| B5[j] * k[j][i]).sum();
            let e: f64 = (0..6).map(|j| E[j] * k[j][i]).sum();
            y_new[i] = y[i] + h * dy;
            let scale = self.control.abs_tol + self.control.rel_tol * y[i].abs().max(y_new[i].abs());
            err = err.max((h * e).abs() / scale);
        }

        if !err.is_finite() || y_new.iter().any(|v| !v.is_finite()) {
            return StepOutcome::Rejected {
                h_next: MIN_SHRINK * h,
            };
        }
        if err <= 1.0 {
            StepOutcome::Accepted {
                y: y_new,
                h_next: self.proposal(h, err),
            }
        } else {
            StepOutcome::Rejected {
                h_next: self.proposal(h, err).min(self.control.safety * h),
            }
        }
    }
}
