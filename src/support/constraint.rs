//! Sign checks for physical inputs.
//!
//! Gas and mechanism data are validated once, when a model is built, so the
//! numerical kernels can assume well-formed values. The checks work for any
//! `PartialOrd + Zero` type, including plain `f64` and `uom` quantities.
//!
//! ```
//! use twine_gasdyn::support::constraint::{Constraint, ConstraintError, NonNegative, StrictlyPositive};
//!
//! assert!(NonNegative::check(&0.0).is_ok());
//! assert_eq!(StrictlyPositive::check(&0.0), Err(ConstraintError::Zero));
//! assert_eq!(NonNegative::check(&f64::NAN), Err(ConstraintError::NotANumber));
//! ```

use std::cmp::Ordering;

use num_traits::Zero;
use thiserror::Error;

/// A numeric invariant checked against a value.
pub trait Constraint<T> {
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] naming how `value` violates the invariant.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
}

/// Zero or greater: mass fractions, concentrations, pre-exponential factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonNegative;

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Greater than zero: temperatures, molar masses, heat capacities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrictlyPositive;

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        f64::{MolarConcentration, Time},
        molar_concentration::mole_per_cubic_meter,
        time::microsecond,
    };

    #[test]
    fn concentrations_may_be_zero() {
        let zero = MolarConcentration::new::<mole_per_cubic_meter>(0.0);
        assert!(NonNegative::check(&zero).is_ok());
        assert_eq!(StrictlyPositive::check(&zero), Err(ConstraintError::Zero));

        let negative = MolarConcentration::new::<mole_per_cubic_meter>(-1e-9);
        assert_eq!(NonNegative::check(&negative), Err(ConstraintError::Negative));
    }

    #[test]
    fn time_steps_must_be_positive() {
        assert!(StrictlyPositive::check(&Time::new::<microsecond>(1.0)).is_ok());
        assert_eq!(
            StrictlyPositive::check(&Time::new::<microsecond>(-1.0)),
            Err(ConstraintError::Negative)
        );
        assert!(StrictlyPositive::check(&1_usize).is_ok());
        assert!(StrictlyPositive::check(&0_usize).is_err());
    }

    #[test]
    fn nan_is_rejected() {
        assert_eq!(StrictlyPositive::check(&f64::NAN), Err(ConstraintError::NotANumber));
        assert_eq!(NonNegative::check(&f64::NAN), Err(ConstraintError::NotANumber));
    }
}
