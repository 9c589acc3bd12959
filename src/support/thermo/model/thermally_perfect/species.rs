use serde::Deserialize;
use uom::si::{f64::MolarMass, molar_mass::kilogram_per_mole};

use crate::support::constraint::{Constraint, StrictlyPositive};

use super::super::transport::SutherlandTransport;
use super::ConfigError;

/// NASA 7-coefficient thermodynamic polynomials over two temperature ranges.
///
/// With coefficients `a0..a6` for the range containing `T`:
///
/// - `cp/R  = a0 + a1·T + a2·T² + a3·T³ + a4·T⁴`
/// - `h/RT  = a0 + a1·T/2 + a2·T²/3 + a3·T³/4 + a4·T⁴/5 + a5/T`
/// - `s°/R  = a0·ln T + a1·T + a2·T²/2 + a3·T³/3 + a4·T⁴/4 + a6`
///
/// Outside `[t_min, t_max]` the heat capacity is held at its boundary value,
/// and enthalpy and entropy are continued with that constant `cp`.
/// This keeps `h(T)` and `u(T)` monotonic, which temperature inversion relies on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Nasa7 {
    pub t_min: f64,
    pub t_mid: f64,
    pub t_max: f64,
    pub low: [f64; 7],
    pub high: [f64; 7],
}

impl Nasa7 {
    pub(crate) fn validate(&self, species: &str) -> Result<(), ConfigError> {
        let ordered = self.t_min > 0.0 && self.t_min < self.t_mid && self.t_mid < self.t_max;
        if !ordered {
            return Err(ConfigError::invalid(format!(
                "species {species}: thermo ranges must satisfy 0 < t_min < t_mid < t_max"
            )));
        }
        if self.low.iter().chain(&self.high).any(|a| !a.is_finite()) {
            return Err(ConfigError::invalid(format!(
                "species {species}: thermo coefficients must be finite"
            )));
        }
        Ok(())
    }

    fn coefficients(&self, t: f64) -> &[f64; 7] {
        if t < self.t_mid { &self.low } else { &self.high }
    }

    fn cp_r_poly(&self, t: f64) -> f64 {
        let a = self.coefficients(t);
        a[0] + t * (a[1] + t * (a[2] + t * (a[3] + t * a[4])))
    }

    fn h_r_poly(&self, t: f64) -> f64 {
        let a = self.coefficients(t);
        t * (a[0] + t * (a[1] / 2.0 + t * (a[2] / 3.0 + t * (a[3] / 4.0 + t * a[4] / 5.0))))
            + a[5]
    }

    fn s_r_poly(&self, t: f64) -> f64 {
        let a = self.coefficients(t);
        a[0] * t.ln() + t * (a[1] + t * (a[2] / 2.0 + t * (a[3] / 3.0 + t * a[4] / 4.0))) + a[6]
    }

    fn clamp(&self, t: f64) -> f64 {
        t.clamp(self.t_min, self.t_max)
    }

    /// Dimensionless heat capacity `cp/R`.
    #[must_use]
    pub fn cp_r(&self, t: f64) -> f64 {
        self.cp_r_poly(self.clamp(t))
    }

    /// Dimensionless enthalpy `h/(R·T)`, including the heat of formation.
    #[must_use]
    pub fn h_rt(&self, t: f64) -> f64 {
        let tb = self.clamp(t);
        let h_r = self.h_r_poly(tb) + self.cp_r_poly(tb) * (t - tb);
        h_r / t
    }

    /// Dimensionless standard-state entropy `s°/R`.
    #[must_use]
    pub fn s_r(&self, t: f64) -> f64 {
        let tb = self.clamp(t);
        self.s_r_poly(tb) + self.cp_r_poly(tb) * (t / tb).ln()
    }

    /// Dimensionless standard-state Gibbs energy `g°/(R·T) = h/RT − s°/R`.
    #[must_use]
    pub fn g_rt(&self, t: f64) -> f64 {
        self.h_rt(t) - self.s_r(t)
    }
}

/// A thermally perfect species: molar mass, NASA-7 thermo, optional transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    name: String,
    molar_mass: f64,
    thermo: Nasa7,
    transport: Option<SutherlandTransport>,
}

impl Species {
    /// Creates a validated species.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the name is empty, the molar mass is
    /// not strictly positive, or the thermo/transport data are malformed.
    pub fn new(
        name: impl Into<String>,
        molar_mass: MolarMass,
        thermo: Nasa7,
        transport: Option<SutherlandTransport>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::invalid("species name must not be empty"));
        }

        let molar_mass = molar_mass.get::<kilogram_per_mole>();
        if StrictlyPositive::check(&molar_mass).is_err() {
            return Err(ConfigError::invalid(format!(
                "species {name}: molar mass must be positive, got {molar_mass}"
            )));
        }

        thermo.validate(&name)?;

        if let Some(transport) = &transport {
            if transport.viscosity.validate().is_err() || transport.conductivity.validate().is_err()
            {
                return Err(ConfigError::invalid(format!(
                    "species {name}: Sutherland parameters must be positive"
                )));
            }
        }

        Ok(Self {
            name,
            molar_mass,
            thermo,
            transport,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn molar_mass(&self) -> MolarMass {
        MolarMass::new::<kilogram_per_mole>(self.molar_mass)
    }

    #[must_use]
    pub fn thermo(&self) -> &Nasa7 {
        &self.thermo
    }

    #[must_use]
    pub fn transport(&self) -> Option<&SutherlandTransport> {
        self.transport.as_ref()
    }

    /// Molar mass in kg/mol.
    pub(crate) fn molar_mass_si(&self) -> f64 {
        self.molar_mass
    }
}

#[cfg(test)]
pub(crate) mod test_data {
    //! NASA-7 data for the species used across the crate's tests.

    use uom::si::{f64::MolarMass, molar_mass::kilogram_per_mole};

    use super::{Nasa7, Species};
    use crate::support::thermo::model::transport::{SutherlandLaw, SutherlandTransport};

    pub(crate) fn nitrogen() -> Species {
        Species::new(
            "N2",
            MolarMass::new::<kilogram_per_mole>(0.028_013_4),
            Nasa7 {
                t_min: 200.0,
                t_mid: 1000.0,
                t_max: 6000.0,
                low: [
                    3.298_677, 1.408_240_4e-3, -3.963_222e-6, 5.641_515e-9, -2.444_854e-12,
                    -1020.8999, 3.950_372,
                ],
                high: [
                    2.926_64, 1.487_976_8e-3, -5.684_760e-7, 1.009_703_8e-10, -6.753_351e-15,
                    -922.7977, 5.980_528,
                ],
            },
            Some(SutherlandTransport {
                viscosity: SutherlandLaw {
                    reference: 1.663e-5,
                    t_ref: 273.0,
                    sutherland: 107.0,
                },
                conductivity: SutherlandLaw {
                    reference: 0.0242,
                    t_ref: 273.0,
                    sutherland: 150.0,
                },
            }),
        )
        .expect("nitrogen data is valid")
    }

    pub(crate) fn atomic_nitrogen() -> Species {
        Species::new(
            "N",
            MolarMass::new::<kilogram_per_mole>(0.014_006_7),
            Nasa7 {
                t_min: 200.0,
                t_mid: 1000.0,
                t_max: 6000.0,
                low: [2.5, 0.0, 0.0, 0.0, 0.0, 56_104.637, 4.193_908_7],
                high: [
                    2.415_942_9, 1.748_906_5e-4, -1.190_236_9e-7, 3.022_624_5e-11,
                    -2.036_098_2e-15, 56_133.773, 4.649_609_6,
                ],
            },
            None,
        )
        .expect("atomic nitrogen data is valid")
    }

    pub(crate) fn oxygen() -> Species {
        Species::new(
            "O2",
            MolarMass::new::<kilogram_per_mole>(0.031_998_8),
            Nasa7 {
                t_min: 200.0,
                t_mid: 1000.0,
                t_max: 3500.0,
                low: [
                    3.782_456_36, -2.996_734_16e-3, 9.847_302_01e-6, -9.681_295_09e-9,
                    3.243_728_37e-12, -1063.943_56, 3.657_675_73,
                ],
                high: [
                    3.282_537_84, 1.483_087_54e-3, -7.579_666_69e-7, 2.094_705_55e-10,
                    -2.167_177_94e-14, -1088.457_72, 5.453_231_29,
                ],
            },
            Some(SutherlandTransport {
                viscosity: SutherlandLaw {
                    reference: 1.919e-5,
                    t_ref: 273.0,
                    sutherland: 139.0,
                },
                conductivity: SutherlandLaw {
                    reference: 0.0244,
                    t_ref: 273.0,
                    sutherland: 240.0,
                },
            }),
        )
        .expect("oxygen data is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use super::test_data::{atomic_nitrogen, nitrogen};

    #[test]
    fn nitrogen_heat_capacity_near_room_temperature() {
        // cp/R of N2 at 300 K is about 3.50 (cp ≈ 1040 J/kg·K).
        let n2 = nitrogen();
        assert_relative_eq!(n2.thermo().cp_r(300.0), 3.50, max_relative = 5e-3);
    }

    #[test]
    fn ranges_are_nearly_continuous_at_midpoint() {
        let n2 = nitrogen();
        let below = n2.thermo().h_rt(1000.0 - 1e-9);
        let above = n2.thermo().h_rt(1000.0);
        assert_relative_eq!(below, above, max_relative = 1e-3);
    }

    #[test]
    fn extrapolation_holds_cp_constant() {
        let n = atomic_nitrogen();
        let cp_edge = n.thermo().cp_r(6000.0);
        assert_relative_eq!(n.thermo().cp_r(20_000.0), cp_edge);

        // h is continued linearly: d(h/R)/dT = cp/R.
        let h_r = |t: f64| n.thermo().h_rt(t) * t;
        assert_relative_eq!(h_r(12_000.0) - h_r(11_000.0), 1000.0 * cp_edge, max_relative = 1e-10);
    }

    #[test]
    fn atomic_nitrogen_has_large_formation_enthalpy() {
        // Δh_f(N) ≈ 472.7 kJ/mol, so h/R at 298 K is about 56 850 K.
        let n = atomic_nitrogen();
        assert_relative_eq!(n.thermo().h_rt(298.15) * 298.15, 56_850.0, max_relative = 2e-3);
    }

    #[test]
    fn rejects_invalid_species() {
        let thermo = nitrogen().thermo().clone();
        let zero_mass = Species::new("X", MolarMass::new::<kilogram_per_mole>(0.0), thermo.clone(), None);
        assert!(matches!(zero_mass, Err(ConfigError::Invalid { .. })));

        let unnamed = Species::new(" ", MolarMass::new::<kilogram_per_mole>(0.028), thermo.clone(), None);
        assert!(unnamed.is_err());

        let mut bad_ranges = thermo;
        bad_ranges.t_mid = 7000.0;
        let result = Species::new("X", MolarMass::new::<kilogram_per_mole>(0.028), bad_ranges, None);
        assert!(result.is_err());
    }
}
