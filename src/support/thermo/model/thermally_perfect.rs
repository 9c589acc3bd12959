//! Thermally perfect gas mixture model.
//!
//! `ThermallyPerfectGas` treats each species as an ideal gas whose heat
//! capacity varies with temperature (NASA 7-coefficient polynomials). The
//! mixture is an ideal-gas mixture: mass-weighted caloric properties and
//! `p = ρ·R_mix·T` with `R_mix = Ru·Σ Y_i/M_i`.
//!
//! States carry a [`Composition`] as their fluid value, so a state built from
//! `(composition, T, p)` knows everything needed to evaluate any property.
//!
//! # Assumptions
//!
//! - Thermal equilibrium between species; no vibrational non-equilibrium
//! - Frozen composition for every property, including the sound speed
//! - Standard-state pressure of 101 325 Pa for entropy and equilibrium constants
//!
//! # Temperature Bounds
//!
//! States given by `(ρ, u)`, `(p, h)`, or `(p, s)` are inverted for
//! temperature inside the model's bounds, `[20, 100 000] K` unless configured
//! otherwise. Beyond a species' polynomial range its `cp` is held constant,
//! so the inversion stays well-posed far outside the fitted data.

mod composition;
mod config;
mod inversion;
mod species;

use uom::si::{
    available_energy::joule_per_kilogram,
    dynamic_viscosity::pascal_second,
    f64::{
        DynamicViscosity, MassDensity, MolarConcentration, MolarMass, Pressure,
        SpecificHeatCapacity, ThermalConductivity, ThermodynamicTemperature, Velocity,
    },
    mass_density::kilogram_per_cubic_meter,
    molar_concentration::mole_per_cubic_meter,
    molar_mass::kilogram_per_mole,
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::support::{
    constraint::{Constraint, StrictlyPositive},
    thermo::{
        PropertyError, State,
        capability::{
            HasCp, HasCv, HasEnthalpy, HasEntropy, HasInternalEnergy, HasPressure, HasSoundSpeed,
            HasThermalConductivity, HasViscosity, StateFrom, ThermoModel,
        },
    },
    units::{MOLAR_GAS_CONSTANT, SpecificEnthalpy, SpecificEntropy, SpecificInternalEnergy},
};

use super::transport;

pub use composition::Composition;
pub use config::ConfigError;
pub use species::{Nasa7, Species};

pub(crate) use config::read_to_string;
#[cfg(test)]
pub(crate) use species::test_data;

/// Standard-state pressure, Pa.
pub const STANDARD_PRESSURE: f64 = 101_325.0;

/// Default temperature bounds for state inversion, K.
pub const DEFAULT_TEMPERATURE_BOUNDS: (f64, f64) = (20.0, 100_000.0);

/// Multi-species thermally perfect gas.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermallyPerfectGas {
    species: Vec<Species>,
    bounds: (f64, f64),
}

impl ThermoModel for ThermallyPerfectGas {
    type Fluid = Composition;
}

impl ThermallyPerfectGas {
    /// Creates a mixture model from a list of species.
    ///
    /// Species order is preserved and defines the index used by
    /// [`Composition`] and by reaction mechanisms built on this model.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the list is empty or contains
    /// duplicate names.
    pub fn new(species: Vec<Species>) -> Result<Self, ConfigError> {
        if species.is_empty() {
            return Err(ConfigError::invalid("a gas model needs at least one species"));
        }
        for (i, sp) in species.iter().enumerate() {
            if species[..i].iter().any(|other| other.name() == sp.name()) {
                return Err(ConfigError::invalid(format!(
                    "species {} is listed more than once",
                    sp.name()
                )));
            }
        }
        Ok(Self {
            species,
            bounds: DEFAULT_TEMPERATURE_BOUNDS,
        })
    }

    /// Replaces the temperature bounds used for state inversion.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] unless `0 < t_lo < t_hi`.
    pub fn with_temperature_bounds(mut self, t_lo: f64, t_hi: f64) -> Result<Self, ConfigError> {
        if StrictlyPositive::check(&t_lo).is_err() || !(t_hi > t_lo) || !t_hi.is_finite() {
            return Err(ConfigError::invalid(format!(
                "temperature bounds must satisfy 0 < lo < hi, got [{t_lo}, {t_hi}]"
            )));
        }
        self.bounds = (t_lo, t_hi);
        Ok(self)
    }

    #[must_use]
    pub fn temperature_bounds(&self) -> (f64, f64) {
        self.bounds
    }

    #[must_use]
    pub fn n_species(&self) -> usize {
        self.species.len()
    }

    #[must_use]
    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn species_names(&self) -> impl Iterator<Item = &str> {
        self.species.iter().map(Species::name)
    }

    /// Returns the index of the species called `name`.
    #[must_use]
    pub fn species_index(&self, name: &str) -> Option<usize> {
        self.species.iter().position(|sp| sp.name() == name)
    }

    /// Builds a composition from mass fractions in species order.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidState`] if the length does not match
    /// the number of species or the fractions are invalid.
    pub fn composition_from_mass_fractions(
        &self,
        mass_fractions: &[f64],
    ) -> Result<Composition, PropertyError> {
        self.check_len(mass_fractions.len(), "mass fractions")?;
        Composition::from_mass_fractions(mass_fractions)
    }

    /// Builds a composition from mole fractions in species order.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidState`] if the length does not match
    /// the number of species or the fractions are invalid.
    pub fn composition_from_mole_fractions(
        &self,
        mole_fractions: &[f64],
    ) -> Result<Composition, PropertyError> {
        self.check_len(mole_fractions.len(), "mole fractions")?;
        let mut x = mole_fractions.to_vec();
        composition::normalize(&mut x, "mole fraction")?;
        let y: Vec<f64> = x
            .iter()
            .zip(&self.species)
            .map(|(x_i, sp)| x_i * sp.molar_mass_si())
            .collect();
        Composition::from_mass_fractions(y)
    }

    /// Builds a composition from `(name, mass fraction)` pairs.
    ///
    /// Species not named are absent.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidState`] if a name is unknown or the
    /// fractions are invalid.
    pub fn composition_from_named_mass_fractions(
        &self,
        pairs: &[(&str, f64)],
    ) -> Result<Composition, PropertyError> {
        let y = self.scatter(pairs)?;
        Composition::from_mass_fractions(y)
    }

    /// Builds a composition from `(name, mole fraction)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidState`] if a name is unknown or the
    /// fractions are invalid.
    pub fn composition_from_named_mole_fractions(
        &self,
        pairs: &[(&str, f64)],
    ) -> Result<Composition, PropertyError> {
        let x = self.scatter(pairs)?;
        self.composition_from_mole_fractions(&x)
    }

    /// Returns the mole fractions of a composition.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidState`] if the composition does not
    /// belong to this model.
    pub fn mole_fractions(&self, composition: &Composition) -> Result<Vec<f64>, PropertyError> {
        self.check(composition)?;
        Ok(self.mole_fractions_si(composition.mass_fractions()))
    }

    /// Returns the mixture molar mass `1 / Σ(Y_i/M_i)`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidState`] if the composition does not
    /// belong to this model.
    pub fn molar_mass(&self, composition: &Composition) -> Result<MolarMass, PropertyError> {
        self.check(composition)?;
        Ok(MolarMass::new::<kilogram_per_mole>(
            self.molar_mass_si(composition.mass_fractions()),
        ))
    }

    /// Returns the molar concentration `ρ·Y_i/M_i` of each species.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidState`] if the state's composition does
    /// not belong to this model.
    pub fn concentrations(
        &self,
        state: &State<Composition>,
    ) -> Result<Vec<MolarConcentration>, PropertyError> {
        self.check(&state.fluid)?;
        let rho = state.density.get::<kilogram_per_cubic_meter>();
        Ok(self
            .concentrations_si(rho, state.fluid.mass_fractions())
            .into_iter()
            .map(MolarConcentration::new::<mole_per_cubic_meter>)
            .collect())
    }

    /// Returns the ratio of specific heats `γ = cp/cv` at the state.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidState`] if the state's composition does
    /// not belong to this model.
    pub fn gamma(&self, state: &State<Composition>) -> Result<f64, PropertyError> {
        self.check(&state.fluid)?;
        let y = state.fluid.mass_fractions();
        let t = state.temperature.get::<kelvin>();
        Ok(self.cp_si(y, t) / self.cv_si(y, t))
    }

    fn check_len(&self, len: usize, what: &str) -> Result<(), PropertyError> {
        if len != self.species.len() {
            return Err(PropertyError::invalid_state(format!(
                "expected {} {what}, got {len}",
                self.species.len()
            )));
        }
        Ok(())
    }

    fn check(&self, composition: &Composition) -> Result<(), PropertyError> {
        self.check_len(composition.len(), "mass fractions")
    }

    fn check_positive(value: f64, what: &str) -> Result<f64, PropertyError> {
        if StrictlyPositive::check(&value).is_err() || !value.is_finite() {
            return Err(PropertyError::invalid_state(format!(
                "{what} must be positive and finite, got {value}"
            )));
        }
        Ok(value)
    }

    fn scatter(&self, pairs: &[(&str, f64)]) -> Result<Vec<f64>, PropertyError> {
        let mut values = vec![0.0; self.species.len()];
        for &(name, value) in pairs {
            let index = self.species_index(name).ok_or_else(|| {
                PropertyError::invalid_state(format!("species {name} is not in the gas model"))
            })?;
            values[index] += value;
        }
        Ok(values)
    }

    // SI kernels shared with the kinetics and reactor code.

    pub(crate) fn molar_mass_si(&self, y: &[f64]) -> f64 {
        let moles: f64 = y
            .iter()
            .zip(&self.species)
            .map(|(y_i, sp)| y_i / sp.molar_mass_si())
            .sum();
        1.0 / moles
    }

    pub(crate) fn gas_constant_si(&self, y: &[f64]) -> f64 {
        MOLAR_GAS_CONSTANT / self.molar_mass_si(y)
    }

    pub(crate) fn mole_fractions_si(&self, y: &[f64]) -> Vec<f64> {
        let m_mix = self.molar_mass_si(y);
        y.iter()
            .zip(&self.species)
            .map(|(y_i, sp)| y_i * m_mix / sp.molar_mass_si())
            .collect()
    }

    pub(crate) fn concentrations_si(&self, rho: f64, y: &[f64]) -> Vec<f64> {
        y.iter()
            .zip(&self.species)
            .map(|(y_i, sp)| rho * y_i / sp.molar_mass_si())
            .collect()
    }

    /// Converts concentrations back to `(ρ, Y)`, clipping negatives to zero.
    pub(crate) fn mass_fractions_from_concentrations(
        &self,
        concentrations: &[f64],
    ) -> Result<(f64, Composition), PropertyError> {
        self.check_len(concentrations.len(), "concentrations")?;
        let partial: Vec<f64> = concentrations
            .iter()
            .zip(&self.species)
            .map(|(c, sp)| c.max(0.0) * sp.molar_mass_si())
            .collect();
        let rho: f64 = partial.iter().sum();
        let composition = Composition::from_mass_fractions(partial)?;
        Ok((rho, composition))
    }

    pub(crate) fn cp_si(&self, y: &[f64], t: f64) -> f64 {
        self.mix(y, |sp| sp.thermo().cp_r(t))
    }

    pub(crate) fn cv_si(&self, y: &[f64], t: f64) -> f64 {
        self.cp_si(y, t) - self.gas_constant_si(y)
    }

    pub(crate) fn enthalpy_si(&self, y: &[f64], t: f64) -> f64 {
        self.mix(y, |sp| sp.thermo().h_rt(t) * t)
    }

    pub(crate) fn internal_energy_si(&self, y: &[f64], t: f64) -> f64 {
        self.enthalpy_si(y, t) - self.gas_constant_si(y) * t
    }

    /// Mixture entropy including the entropy of mixing.
    pub(crate) fn entropy_si(&self, y: &[f64], t: f64, p: f64) -> f64 {
        let x = self.mole_fractions_si(y);
        y.iter()
            .zip(&x)
            .zip(&self.species)
            .filter(|((y_i, _), _)| **y_i > 0.0)
            .map(|((y_i, x_i), sp)| {
                let r_i = MOLAR_GAS_CONSTANT / sp.molar_mass_si();
                y_i * r_i * (sp.thermo().s_r(t) - (x_i * p / STANDARD_PRESSURE).ln())
            })
            .sum()
    }

    /// Standard-state `g°/(R·T)` of species `index`.
    pub(crate) fn g_rt(&self, index: usize, t: f64) -> f64 {
        self.species[index].thermo().g_rt(t)
    }

    /// Mass-weighted sum of a per-species dimensionless quantity times `R_i`.
    fn mix(&self, y: &[f64], per_r: impl Fn(&Species) -> f64) -> f64 {
        y.iter()
            .zip(&self.species)
            .map(|(y_i, sp)| y_i * MOLAR_GAS_CONSTANT / sp.molar_mass_si() * per_r(sp))
            .sum()
    }

    /// Temperature at which the mixture reaches `u` (J/kg).
    pub(crate) fn temperature_from_internal_energy(
        &self,
        y: &[f64],
        u: f64,
    ) -> Result<f64, PropertyError> {
        inversion::temperature_for(
            |t| self.internal_energy_si(y, t),
            u,
            self.bounds,
            "internal energy",
        )
    }

    fn transport_si(&self, y: &[f64], t: f64) -> Result<(f64, f64), PropertyError> {
        let mut mu = Vec::with_capacity(self.species.len());
        let mut k = Vec::with_capacity(self.species.len());
        for sp in &self.species {
            let data = sp.transport().ok_or_else(|| {
                PropertyError::undefined(format!("species {} has no transport data", sp.name()))
            })?;
            mu.push(data.viscosity.eval(t));
            k.push(data.conductivity.eval(t));
        }
        let molar_mass: Vec<f64> = self.species.iter().map(Species::molar_mass_si).collect();
        let x = self.mole_fractions_si(y);
        Ok(transport::wilke(&x, &molar_mass, &mu, &k))
    }

    fn state(
        &self,
        fluid: Composition,
        temperature: f64,
        pressure: Pressure,
    ) -> State<Composition> {
        let r = self.gas_constant_si(fluid.mass_fractions());
        let rho = pressure.get::<pascal>() / (r * temperature);
        State {
            temperature: ThermodynamicTemperature::new::<kelvin>(temperature),
            density: MassDensity::new::<kilogram_per_cubic_meter>(rho),
            fluid,
        }
    }
}

impl HasPressure for ThermallyPerfectGas {
    /// Computes pressure with `p = ρ·R_mix·T`.
    fn pressure(&self, state: &State<Composition>) -> Result<Pressure, PropertyError> {
        self.check(&state.fluid)?;
        let r = self.gas_constant_si(state.fluid.mass_fractions());
        Ok(Pressure::new::<pascal>(
            state.density.get::<kilogram_per_cubic_meter>() * r * state.temperature.get::<kelvin>(),
        ))
    }
}

impl HasInternalEnergy for ThermallyPerfectGas {
    fn internal_energy(
        &self,
        state: &State<Composition>,
    ) -> Result<SpecificInternalEnergy, PropertyError> {
        self.check(&state.fluid)?;
        let u = self.internal_energy_si(state.fluid.mass_fractions(), state.temperature.get::<kelvin>());
        Ok(SpecificInternalEnergy::new::<joule_per_kilogram>(u))
    }
}

impl HasEnthalpy for ThermallyPerfectGas {
    /// Computes `h = Σ Y_i·h_i(T)`, including heats of formation.
    fn enthalpy(&self, state: &State<Composition>) -> Result<SpecificEnthalpy, PropertyError> {
        self.check(&state.fluid)?;
        let h = self.enthalpy_si(state.fluid.mass_fractions(), state.temperature.get::<kelvin>());
        Ok(SpecificEnthalpy::new::<joule_per_kilogram>(h))
    }
}

impl HasEntropy for ThermallyPerfectGas {
    /// Computes `s = Σ Y_i·R_i·(s°_i/R − ln(x_i·p/p°))`.
    fn entropy(&self, state: &State<Composition>) -> Result<SpecificEntropy, PropertyError> {
        let p = self.pressure(state)?.get::<pascal>();
        let s = self.entropy_si(state.fluid.mass_fractions(), state.temperature.get::<kelvin>(), p);
        Ok(SpecificEntropy::new::<joule_per_kilogram_kelvin>(s))
    }
}

impl HasCp for ThermallyPerfectGas {
    fn cp(&self, state: &State<Composition>) -> Result<SpecificHeatCapacity, PropertyError> {
        self.check(&state.fluid)?;
        let cp = self.cp_si(state.fluid.mass_fractions(), state.temperature.get::<kelvin>());
        Ok(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(cp))
    }
}

impl HasCv for ThermallyPerfectGas {
    fn cv(&self, state: &State<Composition>) -> Result<SpecificHeatCapacity, PropertyError> {
        self.check(&state.fluid)?;
        let cv = self.cv_si(state.fluid.mass_fractions(), state.temperature.get::<kelvin>());
        Ok(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(cv))
    }
}

impl HasSoundSpeed for ThermallyPerfectGas {
    /// Computes the frozen sound speed `a = √(γ·R_mix·T)`.
    fn sound_speed(&self, state: &State<Composition>) -> Result<Velocity, PropertyError> {
        let gamma = self.gamma(state)?;
        let r = self.gas_constant_si(state.fluid.mass_fractions());
        let a = (gamma * r * state.temperature.get::<kelvin>()).sqrt();
        Ok(Velocity::new::<meter_per_second>(a))
    }
}

impl HasViscosity for ThermallyPerfectGas {
    fn viscosity(&self, state: &State<Composition>) -> Result<DynamicViscosity, PropertyError> {
        self.check(&state.fluid)?;
        let (mu, _) = self.transport_si(state.fluid.mass_fractions(), state.temperature.get::<kelvin>())?;
        Ok(DynamicViscosity::new::<pascal_second>(mu))
    }
}

impl HasThermalConductivity for ThermallyPerfectGas {
    fn thermal_conductivity(
        &self,
        state: &State<Composition>,
    ) -> Result<ThermalConductivity, PropertyError> {
        self.check(&state.fluid)?;
        let (_, k) = self.transport_si(state.fluid.mass_fractions(), state.temperature.get::<kelvin>())?;
        Ok(ThermalConductivity::new::<watt_per_meter_kelvin>(k))
    }
}

impl StateFrom<(Composition, ThermodynamicTemperature, Pressure)> for ThermallyPerfectGas {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, temperature, pressure): (Composition, ThermodynamicTemperature, Pressure),
    ) -> Result<State<Composition>, Self::Error> {
        self.check(&fluid)?;
        let t = Self::check_positive(temperature.get::<kelvin>(), "temperature")?;
        Self::check_positive(pressure.get::<pascal>(), "pressure")?;
        Ok(self.state(fluid, t, pressure))
    }
}

impl StateFrom<(Composition, ThermodynamicTemperature, MassDensity)> for ThermallyPerfectGas {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, temperature, density): (Composition, ThermodynamicTemperature, MassDensity),
    ) -> Result<State<Composition>, Self::Error> {
        self.check(&fluid)?;
        Ok(State {
            temperature,
            density,
            fluid,
        })
    }
}

impl StateFrom<(Composition, Pressure, MassDensity)> for ThermallyPerfectGas {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, pressure, density): (Composition, Pressure, MassDensity),
    ) -> Result<State<Composition>, Self::Error> {
        self.check(&fluid)?;
        let r = self.gas_constant_si(fluid.mass_fractions());
        let t = pressure.get::<pascal>() / (density.get::<kilogram_per_cubic_meter>() * r);
        Ok(State {
            temperature: ThermodynamicTemperature::new::<kelvin>(t),
            density,
            fluid,
        })
    }
}

impl StateFrom<(Composition, MassDensity, SpecificInternalEnergy)> for ThermallyPerfectGas {
    type Error = PropertyError;

    /// Inverts `u(T)` at fixed density and composition.
    fn state_from(
        &self,
        (fluid, density, internal_energy): (Composition, MassDensity, SpecificInternalEnergy),
    ) -> Result<State<Composition>, Self::Error> {
        self.check(&fluid)?;
        let t = self.temperature_from_internal_energy(
            fluid.mass_fractions(),
            internal_energy.get::<joule_per_kilogram>(),
        )?;
        Ok(State {
            temperature: ThermodynamicTemperature::new::<kelvin>(t),
            density,
            fluid,
        })
    }
}

impl StateFrom<(Composition, Pressure, SpecificEnthalpy)> for ThermallyPerfectGas {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, pressure, enthalpy): (Composition, Pressure, SpecificEnthalpy),
    ) -> Result<State<Composition>, Self::Error> {
        self.check(&fluid)?;
        let y = fluid.mass_fractions();
        let t = inversion::temperature_for(
            |t| self.enthalpy_si(y, t),
            enthalpy.get::<joule_per_kilogram>(),
            self.bounds,
            "enthalpy",
        )?;
        Ok(self.state(fluid, t, pressure))
    }
}

impl StateFrom<(Composition, Pressure, SpecificEntropy)> for ThermallyPerfectGas {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, pressure, entropy): (Composition, Pressure, SpecificEntropy),
    ) -> Result<State<Composition>, Self::Error> {
        self.check(&fluid)?;
        let p = pressure.get::<pascal>();
        let y = fluid.mass_fractions();
        let t = inversion::temperature_for(
            |t| self.entropy_si(y, t, p),
            entropy.get::<joule_per_kilogram_kelvin>(),
            self.bounds,
            "entropy",
        )?;
        Ok(self.state(fluid, t, pressure))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::pressure::kilopascal;

    use super::test_data::{atomic_nitrogen, nitrogen, oxygen};

    fn nitrogen_pair() -> ThermallyPerfectGas {
        ThermallyPerfectGas::new(vec![nitrogen(), atomic_nitrogen()]).unwrap()
    }

    fn air() -> ThermallyPerfectGas {
        ThermallyPerfectGas::new(vec![nitrogen(), oxygen()]).unwrap()
    }

    fn reactor_initial_state(gas: &ThermallyPerfectGas) -> State<Composition> {
        let composition = gas
            .composition_from_named_mole_fractions(&[("N2", 2.0 / 3.0), ("N", 1.0 / 3.0)])
            .unwrap();
        gas.state_from((
            composition,
            ThermodynamicTemperature::new::<kelvin>(4000.0),
            Pressure::new::<pascal>(1.0e5),
        ))
        .unwrap()
    }

    #[test]
    fn mole_fraction_conversion_uses_molar_masses() {
        let gas = nitrogen_pair();
        let composition = gas.composition_from_mole_fractions(&[2.0 / 3.0, 1.0 / 3.0]).unwrap();

        // Mass of N2 is twice that of N, so Y_N2 = 2·(2/3) / (2·(2/3) + 1/3) = 0.8.
        let y = composition.mass_fractions();
        assert_relative_eq!(y[0], 0.8, max_relative = 1e-4);
        assert_relative_eq!(y[1], 0.2, max_relative = 1e-3);

        let x = gas.mole_fractions(&composition).unwrap();
        assert_relative_eq!(x[0], 2.0 / 3.0, max_relative = 1e-12);
    }

    #[test]
    fn pressure_and_concentrations_follow_ideal_gas() -> Result<(), PropertyError> {
        let gas = nitrogen_pair();
        let state = reactor_initial_state(&gas);

        assert_relative_eq!(gas.pressure(&state)?.get::<pascal>(), 1.0e5, max_relative = 1e-12);

        // Σc_i = p/(Ru·T) for an ideal-gas mixture.
        let total: f64 = gas
            .concentrations(&state)?
            .iter()
            .map(|c| c.get::<mole_per_cubic_meter>())
            .sum();
        assert_relative_eq!(total, 1.0e5 / (MOLAR_GAS_CONSTANT * 4000.0), max_relative = 1e-12);

        Ok(())
    }

    #[test]
    fn concentrations_round_trip_to_density_and_composition() -> Result<(), PropertyError> {
        let gas = nitrogen_pair();
        let state = reactor_initial_state(&gas);
        let rho = state.density.get::<kilogram_per_cubic_meter>();

        let c = gas.concentrations_si(rho, state.fluid.mass_fractions());
        let (rho_back, composition) = gas.mass_fractions_from_concentrations(&c)?;
        assert_relative_eq!(rho_back, rho, max_relative = 1e-12);
        assert_relative_eq!(
            composition.mass_fractions()[1],
            state.fluid.mass_fractions()[1],
            max_relative = 1e-12
        );

        Ok(())
    }

    #[test]
    fn density_internal_energy_inversion_recovers_temperature() -> Result<(), PropertyError> {
        let gas = nitrogen_pair();
        let state = reactor_initial_state(&gas);
        let u = gas.internal_energy(&state)?;

        let back = gas.state_from((state.fluid.clone(), state.density, u))?;
        assert_relative_eq!(back.temperature.get::<kelvin>(), 4000.0, max_relative = 1e-9);

        Ok(())
    }

    #[test]
    fn pressure_entropy_inversion_recovers_temperature() -> Result<(), PropertyError> {
        let gas = air();
        let composition = gas.composition_from_named_mass_fractions(&[("N2", 0.78), ("O2", 0.22)])?;
        let state = gas.state_from((
            composition,
            ThermodynamicTemperature::new::<kelvin>(320.0),
            Pressure::new::<kilopascal>(100.0),
        ))?;
        let s = gas.entropy(&state)?;
        let p = gas.pressure(&state)?;

        let back = gas.state_from((state.fluid.clone(), p, s))?;
        assert_relative_eq!(back.temperature.get::<kelvin>(), 320.0, max_relative = 1e-9);
        assert_relative_eq!(
            back.density.get::<kilogram_per_cubic_meter>(),
            state.density.get::<kilogram_per_cubic_meter>(),
            max_relative = 1e-9
        );

        let h = gas.enthalpy(&state)?;
        let from_h = gas.state_from((state.fluid.clone(), p, h))?;
        assert_relative_eq!(from_h.temperature.get::<kelvin>(), 320.0, max_relative = 1e-9);

        Ok(())
    }

    #[test]
    fn cold_air_behaves_like_gamma_one_point_four() -> Result<(), PropertyError> {
        let gas = air();
        let composition = gas.composition_from_named_mass_fractions(&[("N2", 0.78), ("O2", 0.22)])?;
        let state = gas.state_from((
            composition,
            ThermodynamicTemperature::new::<kelvin>(300.0),
            Pressure::new::<kilopascal>(100.0),
        ))?;

        assert_relative_eq!(gas.gamma(&state)?, 1.40, max_relative = 5e-3);
        assert_relative_eq!(
            gas.sound_speed(&state)?.get::<meter_per_second>(),
            347.0,
            max_relative = 5e-3
        );

        Ok(())
    }

    #[test]
    fn transport_is_undefined_without_data() {
        let gas = nitrogen_pair();
        let state = reactor_initial_state(&gas);
        assert!(matches!(
            gas.viscosity(&state),
            Err(PropertyError::Undefined { .. })
        ));
    }

    #[test]
    fn air_transport_is_plausible() -> Result<(), PropertyError> {
        let gas = air();
        let composition = gas.composition_from_named_mass_fractions(&[("N2", 0.78), ("O2", 0.22)])?;
        let state = gas.state_from((
            composition,
            ThermodynamicTemperature::new::<kelvin>(300.0),
            Pressure::new::<kilopascal>(100.0),
        ))?;

        let mu = gas.viscosity(&state)?.get::<pascal_second>();
        let k = gas.thermal_conductivity(&state)?.get::<watt_per_meter_kelvin>();
        assert!(mu > 1.7e-5 && mu < 2.0e-5, "mu = {mu}");
        assert!(k > 0.024 && k < 0.028, "k = {k}");

        Ok(())
    }

    #[test]
    fn rejects_foreign_compositions() {
        let gas = nitrogen_pair();
        let three = Composition::from_mass_fractions(vec![0.2, 0.3, 0.5]).unwrap();
        let result = gas.state_from((
            three,
            ThermodynamicTemperature::new::<kelvin>(300.0),
            Pressure::new::<pascal>(1.0e5),
        ));
        assert!(matches!(result, Err(PropertyError::InvalidState { .. })));

        assert!(gas.composition_from_named_mass_fractions(&[("Ar", 1.0)]).is_err());
    }

    #[test]
    fn rejects_non_positive_temperature_and_pressure() {
        let gas = nitrogen_pair();
        let composition = Composition::from_mass_fractions(vec![1.0, 0.0]).unwrap();
        for (t, p) in [(0.0, 1.0e5), (-10.0, 1.0e5), (300.0, 0.0), (300.0, -1.0)] {
            let result = gas.state_from((
                composition.clone(),
                ThermodynamicTemperature::new::<kelvin>(t),
                Pressure::new::<pascal>(p),
            ));
            assert!(
                matches!(result, Err(PropertyError::InvalidState { .. })),
                "T = {t}, p = {p}"
            );
        }
    }

    #[test]
    fn rejects_duplicate_species_and_bad_bounds() {
        assert!(ThermallyPerfectGas::new(vec![nitrogen(), nitrogen()]).is_err());
        assert!(ThermallyPerfectGas::new(Vec::new()).is_err());
        assert!(nitrogen_pair().with_temperature_bounds(500.0, 100.0).is_err());
    }
}
