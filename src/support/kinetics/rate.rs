use serde::Deserialize;

use crate::support::constraint::{Constraint, NonNegative};

/// Modified Arrhenius rate coefficient `k = A·Tⁿ·exp(−C/T)`.
///
/// `C` is the activation temperature `Ea/Ru` in kelvin.
/// `A` carries the SI units of the reaction order.
///
/// # Example
///
/// ```
/// use twine_gasdyn::support::kinetics::ArrheniusRate;
///
/// let rate = ArrheniusRate::new(7.0e15, -1.6, 113_200.0).unwrap();
/// assert!(rate.eval(4000.0) > rate.eval(3000.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ArrheniusRate {
    #[serde(rename = "A")]
    pub a: f64,
    pub n: f64,
    #[serde(rename = "C")]
    pub c: f64,
}

impl ArrheniusRate {
    /// Creates a rate with a non-negative pre-exponential factor.
    ///
    /// Returns `None` if `A` is negative or any value is not finite.
    #[must_use]
    pub fn new(a: f64, n: f64, c: f64) -> Option<Self> {
        let rate = Self { a, n, c };
        rate.is_valid().then_some(rate)
    }

    pub(crate) fn is_valid(&self) -> bool {
        NonNegative::check(&self.a).is_ok() && self.n.is_finite() && self.c.is_finite()
    }

    /// Evaluates the rate coefficient at temperature `t` (K).
    #[must_use]
    pub fn eval(&self, t: f64) -> f64 {
        if self.a == 0.0 {
            return 0.0;
        }
        self.a * t.powf(self.n) * (-self.c / t).exp()
    }
}
