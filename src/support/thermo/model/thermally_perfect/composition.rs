use crate::support::{
    constraint::{Constraint, NonNegative},
    thermo::PropertyError,
};

/// Tolerance below which slightly negative mass fractions are clipped to zero.
const NEGATIVE_CLIP: f64 = -1e-12;

/// Mass fractions of a mixture, in the species order of the owning model.
///
/// A `Composition` is the fluid value of a [`ThermallyPerfectGas`](super::ThermallyPerfectGas)
/// state. Its fractions are non-negative and sum to one.
///
/// Build one through the model (`composition_from_*` methods) so that the
/// species count and names are checked. [`Composition::from_mass_fractions`]
/// is available when the species order is already known.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    mass_fractions: Vec<f64>,
}

impl Composition {
    /// Creates a composition from mass fractions, scaling them to sum to one.
    ///
    /// Values in `(-1e-12, 0)` are treated as round-off and clipped to zero.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidState`] if any fraction is negative or
    /// not finite, or if all fractions are zero.
    pub fn from_mass_fractions(mass_fractions: impl Into<Vec<f64>>) -> Result<Self, PropertyError> {
        let mut mass_fractions = mass_fractions.into();
        normalize(&mut mass_fractions, "mass fraction")?;
        Ok(Self { mass_fractions })
    }

    /// Returns the mass fraction of each species.
    #[must_use]
    pub fn mass_fractions(&self) -> &[f64] {
        &self.mass_fractions
    }

    /// Returns the mass fraction of species `index`, if it exists.
    #[must_use]
    pub fn mass_fraction(&self, index: usize) -> Option<f64> {
        self.mass_fractions.get(index).copied()
    }

    /// Number of species.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mass_fractions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mass_fractions.is_empty()
    }
}

/// Clips round-off negatives and scales `values` to sum to one.
pub(super) fn normalize(values: &mut [f64], what: &str) -> Result<(), PropertyError> {
    for (i, value) in values.iter_mut().enumerate() {
        if !value.is_finite() {
            return Err(PropertyError::invalid_state(format!(
                "{what} {i} is not finite"
            )));
        }
        if *value < 0.0 && *value > NEGATIVE_CLIP {
            *value = 0.0;
        }
        if NonNegative::check(&*value).is_err() {
            return Err(PropertyError::invalid_state(format!(
                "{what} {i} is negative: {value}"
            )));
        }
    }

    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return Err(PropertyError::invalid_state(format!(
            "{what}s must not all be zero"
        )));
    }
    values.iter_mut().for_each(|value| *value /= total);
    Ok(())
}
