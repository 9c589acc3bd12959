//! Calorically perfect gas model.
//!
//! `PerfectGas` is the classic gas-dynamics idealization: an ideal gas
//! equation of state with constant heat capacities, and therefore a constant
//! ratio of specific heats `γ`.
//!
//! # Assumptions
//!
//! - Ideal gas equation of state: `p = ρ·R·T`
//! - Calorically perfect: `cp`, `cv`, and `γ` do not vary with temperature
//! - Single component: the fluid is a marker type such as [`Air`](crate::support::thermo::fluid::Air)
//!
//! # When To Use
//!
//! Use this model for low-temperature compressible flow, where the
//! closed-form finite-wave relations (e.g. `J+ = v + 2a/(γ−1)`) apply.
//! For high temperatures or reacting mixtures, use
//! [`ThermallyPerfectGas`](super::ThermallyPerfectGas).
//!
//! # Reference State
//!
//! Enthalpy and entropy are reported relative to a configurable reference state
//! (`T_ref`, `p_ref`, `h_ref`, `s_ref`).

use std::{convert::Infallible, marker::PhantomData};

use thiserror::Error;
use uom::{
    ConstZero,
    si::{
        dynamic_viscosity::pascal_second,
        f64::{
            DynamicViscosity, MassDensity, Pressure, SpecificHeatCapacity, ThermalConductivity,
            ThermodynamicTemperature, Velocity,
        },
        pressure::{atmosphere, pascal},
        ratio::ratio,
        specific_heat_capacity::joule_per_kilogram_kelvin,
        thermal_conductivity::watt_per_meter_kelvin,
        thermodynamic_temperature::{degree_celsius, kelvin},
    },
};

use crate::support::units::{
    SpecificEnthalpy, SpecificEntropy, SpecificGasConstant, SpecificInternalEnergy,
    TemperatureDifference,
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
};

use super::{ideal_gas_eos, transport::SutherlandTransport};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PerfectGasParametersError {
    #[error("invalid gas constant R: {r:?}")]
    GasConstant { r: SpecificGasConstant },
    #[error("invalid cp: {cp:?}")]
    Cp { cp: SpecificHeatCapacity },
    #[error("invalid reference temperature: {t_ref:?}")]
    ReferenceTemperature { t_ref: ThermodynamicTemperature },
    #[error("invalid reference pressure: {p_ref:?}")]
    ReferencePressure { p_ref: Pressure },
    #[error("non-physical heat capacities: cv = cp - R must be > 0; cp={cp:?}, R={r:?}, cv={cv:?}")]
    NonPhysicalCv {
        r: SpecificGasConstant,
        cp: SpecificHeatCapacity,
        cv: SpecificHeatCapacity,
    },
    #[error("invalid Sutherland transport data")]
    Transport,
}

/// Reference values used to define enthalpy/entropy offsets for a [`PerfectGas`] model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfectGasReference {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub enthalpy: SpecificEnthalpy,
    pub entropy: SpecificEntropy,
}

impl PerfectGasReference {
    /// Returns a standard reference: 0°C, 1 atm, `h_ref = 0`, `s_ref = 0`.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            temperature: ThermodynamicTemperature::new::<degree_celsius>(0.0),
            pressure: Pressure::new::<atmosphere>(1.0),
            enthalpy: SpecificEnthalpy::ZERO,
            entropy: SpecificEntropy::ZERO,
        }
    }
}

/// Constant parameters for the [`PerfectGas`] model.
///
/// These values are typically provided by a fluid's [`PerfectGasFluid`] implementation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfectGasParameters {
    pub gas_constant: SpecificGasConstant,
    pub cp: SpecificHeatCapacity,
    pub reference: PerfectGasReference,
    pub transport: Option<SutherlandTransport>,
}

impl PerfectGasParameters {
    #[must_use]
    pub fn new(gas_constant: SpecificGasConstant, cp: SpecificHeatCapacity) -> Self {
        Self {
            gas_constant,
            cp,
            reference: PerfectGasReference::standard(),
            transport: None,
        }
    }

    /// Builds parameters from `R` and `γ`, with `cp = γ·R/(γ − 1)`.
    #[must_use]
    pub fn from_gamma(gas_constant: SpecificGasConstant, gamma: f64) -> Self {
        let r = gas_constant.get::<joule_per_kilogram_kelvin>();
        let cp = SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(gamma * r / (gamma - 1.0));
        Self::new(gas_constant, cp)
    }

    #[must_use]
    pub fn with_reference(mut self, reference: PerfectGasReference) -> Self {
        self.reference = reference;
        self
    }

    #[must_use]
    pub fn with_transport(mut self, transport: SutherlandTransport) -> Self {
        self.transport = Some(transport);
        self
    }
}

/// Fluid constants required by the [`PerfectGas`] model.
pub trait PerfectGasFluid {
    /// Returns the constant parameters for use with [`PerfectGas`].
    fn parameters() -> PerfectGasParameters;
}

/// Perfect gas model (constant `cp`/`cv`) using the ideal gas equation of state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfectGas<Fluid> {
    r: SpecificGasConstant,
    cp: SpecificHeatCapacity,
    cv: SpecificHeatCapacity,
    t_ref: ThermodynamicTemperature,
    p_ref: Pressure,
    h_ref: SpecificEnthalpy,
    s_ref: SpecificEntropy,
    transport: Option<SutherlandTransport>,
    _marker: PhantomData<Fluid>,
}

impl<Fluid> ThermoModel for PerfectGas<Fluid> {
    type Fluid = Fluid;
}

impl<Fluid: PerfectGasFluid> PerfectGas<Fluid> {
    /// Creates a perfect gas model using constants defined by `Fluid`.
    ///
    /// # Errors
    ///
    /// Returns [`PerfectGasParametersError`] if any required constant is
    /// invalid or if `cv = cp - R` is non-physical.
    pub fn new() -> Result<Self, PerfectGasParametersError> {
        Self::from_parameters(Fluid::parameters())
    }
}

impl<Fluid> PerfectGas<Fluid> {
    /// Creates a perfect gas model from explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PerfectGasParametersError`] if any required constant is
    /// invalid or if `cv = cp - R` is non-physical.
    pub fn from_parameters(
        parameters: PerfectGasParameters,
    ) -> Result<Self, PerfectGasParametersError> {
        let gas_constant = parameters.gas_constant;
        if StrictlyPositive::check(&gas_constant.get::<joule_per_kilogram_kelvin>()).is_err() {
            return Err(PerfectGasParametersError::GasConstant { r: gas_constant });
        }

        let cp = parameters.cp;
        if StrictlyPositive::check(&cp.get::<joule_per_kilogram_kelvin>()).is_err() {
            return Err(PerfectGasParametersError::Cp { cp });
        }

        let reference_temperature = parameters.reference.temperature;
        if StrictlyPositive::check(&reference_temperature.get::<kelvin>()).is_err() {
            return Err(PerfectGasParametersError::ReferenceTemperature {
                t_ref: reference_temperature,
            });
        }

        let reference_pressure = parameters.reference.pressure;
        if StrictlyPositive::check(&reference_pressure.get::<pascal>()).is_err() {
            return Err(PerfectGasParametersError::ReferencePressure {
                p_ref: reference_pressure,
            });
        }

        let cv = cp - gas_constant;
        if StrictlyPositive::check(&cv.get::<joule_per_kilogram_kelvin>()).is_err() {
            return Err(PerfectGasParametersError::NonPhysicalCv {
                r: gas_constant,
                cp,
                cv,
            });
        }

        if let Some(transport) = parameters.transport {
            if transport.viscosity.validate().is_err() || transport.conductivity.validate().is_err()
            {
                return Err(PerfectGasParametersError::Transport);
            }
        }

        Ok(Self {
            r: gas_constant,
            cp,
            cv,
            t_ref: reference_temperature,
            p_ref: reference_pressure,
            h_ref: parameters.reference.enthalpy,
            s_ref: parameters.reference.entropy,
            transport: parameters.transport,
            _marker: PhantomData,
        })
    }

    /// Creates a state at the reference temperature and pressure.
    #[must_use]
    pub fn reference_state(&self, fluid: Fluid) -> State<Fluid> {
        let temperature = self.t_ref;
        let pressure = self.p_ref;
        let density = ideal_gas_eos::density(temperature, pressure, self.r);

        State {
            temperature,
            density,
            fluid,
        }
    }

    /// Returns the specific gas constant `R`.
    #[must_use]
    pub fn gas_constant(&self) -> SpecificGasConstant {
        self.r
    }

    /// Returns the constant ratio of specific heats `γ = cp/cv`.
    #[must_use]
    pub fn gamma(&self) -> f64 {
        (self.cp / self.cv).get::<ratio>()
    }

    fn transport(&self) -> Result<&SutherlandTransport, PropertyError> {
        self.transport
            .as_ref()
            .ok_or_else(|| PropertyError::undefined("perfect gas has no transport data"))
    }
}

impl<Fluid> HasPressure for PerfectGas<Fluid> {
    /// Computes pressure with `P = ρ·R·T`.
    fn pressure(&self, state: &State<Fluid>) -> Result<Pressure, PropertyError> {
        Ok(ideal_gas_eos::pressure(state.temperature, state.density, self.r))
    }
}

impl<Fluid> HasInternalEnergy for PerfectGas<Fluid> {
    /// Computes internal energy with `u = h − R·T`.
    fn internal_energy(
        &self,
        state: &State<Fluid>,
    ) -> Result<SpecificInternalEnergy, PropertyError> {
        Ok(self.enthalpy(state)? - self.r * state.temperature)
    }
}

impl<Fluid> HasEnthalpy for PerfectGas<Fluid> {
    /// Computes enthalpy with `h = h₀ + cp·(T − T₀)`.
    fn enthalpy(&self, state: &State<Fluid>) -> Result<SpecificEnthalpy, PropertyError> {
        Ok(self.h_ref + self.cp * state.temperature.minus(self.t_ref))
    }
}

impl<Fluid> HasEntropy for PerfectGas<Fluid> {
    /// Computes entropy with `s = s₀ + cp·ln(T⁄T₀) − R·ln(p⁄p₀)`.
    fn entropy(&self, state: &State<Fluid>) -> Result<SpecificEntropy, PropertyError> {
        let p = self.pressure(state)?;

        Ok(self.s_ref + self.cp * (state.temperature / self.t_ref).ln()
            - self.r * (p / self.p_ref).ln())
    }
}

impl<Fluid> HasCp for PerfectGas<Fluid> {
    /// Returns the constant `cp` of the fluid.
    fn cp(&self, _state: &State<Fluid>) -> Result<SpecificHeatCapacity, PropertyError> {
        Ok(self.cp)
    }
}

impl<Fluid> HasCv for PerfectGas<Fluid> {
    /// Returns the constant `cv` of the fluid.
    fn cv(&self, _state: &State<Fluid>) -> Result<SpecificHeatCapacity, PropertyError> {
        Ok(self.cv)
    }
}

impl<Fluid> HasSoundSpeed for PerfectGas<Fluid> {
    /// Computes `a = √(γ·R·T)`.
    fn sound_speed(&self, state: &State<Fluid>) -> Result<Velocity, PropertyError> {
        Ok(ideal_gas_eos::sound_speed(
            self.gamma(),
            state.temperature,
            self.r,
        ))
    }
}

impl<Fluid> HasViscosity for PerfectGas<Fluid> {
    fn viscosity(&self, state: &State<Fluid>) -> Result<DynamicViscosity, PropertyError> {
        let mu = self.transport()?.viscosity.eval(state.temperature.get::<kelvin>());
        Ok(DynamicViscosity::new::<pascal_second>(mu))
    }
}

impl<Fluid> HasThermalConductivity for PerfectGas<Fluid> {
    fn thermal_conductivity(
        &self,
        state: &State<Fluid>,
    ) -> Result<ThermalConductivity, PropertyError> {
        let k = self
            .transport()?
            .conductivity
            .eval(state.temperature.get::<kelvin>());
        Ok(ThermalConductivity::new::<watt_per_meter_kelvin>(k))
    }
}

impl<Fluid> StateFrom<(Fluid, ThermodynamicTemperature, MassDensity)> for PerfectGas<Fluid> {
    type Error = Infallible;

    fn state_from(
        &self,
        (fluid, temperature, density): (Fluid, ThermodynamicTemperature, MassDensity),
    ) -> Result<State<Fluid>, Self::Error> {
        Ok(State {
            temperature,
            density,
            fluid,
        })
    }
}

impl<Fluid> StateFrom<(Fluid, ThermodynamicTemperature, Pressure)> for PerfectGas<Fluid> {
    type Error = Infallible;

    fn state_from(
        &self,
        (fluid, temperature, pressure): (Fluid, ThermodynamicTemperature, Pressure),
    ) -> Result<State<Fluid>, Self::Error> {
        let density = ideal_gas_eos::density(temperature, pressure, self.r);

        Ok(State {
            temperature,
            density,
            fluid,
        })
    }
}

impl<Fluid> StateFrom<(Fluid, Pressure, MassDensity)> for PerfectGas<Fluid> {
    type Error = Infallible;

    fn state_from(
        &self,
        (fluid, pressure, density): (Fluid, Pressure, MassDensity),
    ) -> Result<State<Fluid>, Self::Error> {
        let temperature = ideal_gas_eos::temperature(pressure, density, self.r);

        Ok(State {
            temperature,
            density,
            fluid,
        })
    }
}

impl<Fluid> StateFrom<(Fluid, MassDensity, SpecificInternalEnergy)> for PerfectGas<Fluid> {
    type Error = Infallible;

    /// Inverts `u = h₀ + cp·(T − T₀) − R·T` for temperature at fixed density.
    fn state_from(
        &self,
        (fluid, density, internal_energy): (Fluid, MassDensity, SpecificInternalEnergy),
    ) -> Result<State<Fluid>, Self::Error> {
        let cp = self.cp.get::<joule_per_kilogram_kelvin>();
        let cv = self.cv.get::<joule_per_kilogram_kelvin>();
        let u = internal_energy.value;
        let h_ref = self.h_ref.value;
        let t_ref = self.t_ref.get::<kelvin>();

        let temperature = ThermodynamicTemperature::new::<kelvin>((u - h_ref + cp * t_ref) / cv);

        Ok(State {
            temperature,
            density,
            fluid,
        })
    }
}

impl<Fluid> StateFrom<(Fluid, Pressure, SpecificEnthalpy)> for PerfectGas<Fluid> {
    type Error = Infallible;

    fn state_from(
        &self,
        (fluid, pressure, enthalpy): (Fluid, Pressure, SpecificEnthalpy),
    ) -> Result<State<Fluid>, Self::Error> {
        let temperature = self.t_ref + (enthalpy - self.h_ref) / self.cp;
        let density = ideal_gas_eos::density(temperature, pressure, self.r);

        Ok(State {
            temperature,
            density,
            fluid,
        })
    }
}

impl<Fluid> StateFrom<(Fluid, Pressure, SpecificEntropy)> for PerfectGas<Fluid> {
    type Error = Infallible;

    fn state_from(
        &self,
        (fluid, pressure, entropy): (Fluid, Pressure, SpecificEntropy),
    ) -> Result<State<Fluid>, Self::Error> {
        let exponent = ((entropy - self.s_ref) + self.r * (pressure / self.p_ref).ln()) / self.cp;
        let temperature = self.t_ref * exponent.get::<ratio>().exp();
        let density = ideal_gas_eos::density(temperature, pressure, self.r);

        Ok(State {
            temperature,
            density,
            fluid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        mass_density::kilogram_per_cubic_meter,
        pressure::{kilopascal, pascal},
        specific_heat_capacity::joule_per_kilogram_kelvin,
        thermodynamic_temperature::kelvin,
        velocity::meter_per_second,
    };

    use crate::support::thermo::fluid::{Air, Nitrogen};

    #[derive(Debug, Clone, Copy, Default)]
    struct MockGas;

    impl PerfectGasFluid for MockGas {
        fn parameters() -> PerfectGasParameters {
            PerfectGasParameters::new(
                SpecificGasConstant::new::<joule_per_kilogram_kelvin>(400.0),
                SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1000.0),
            )
        }
    }

    fn mock_gas_model() -> PerfectGas<MockGas> {
        PerfectGas::<MockGas>::new().expect("mock gas parameters must be physically valid")
    }

    #[test]
    fn air_has_gamma_of_one_point_four() {
        let thermo = PerfectGas::<Air>::new().unwrap();
        assert_relative_eq!(thermo.gamma(), 1.4, epsilon = 1e-12);
    }

    #[test]
    fn sound_speed_scales_with_root_temperature() -> Result<(), PropertyError> {
        let thermo = PerfectGas::<Air>::new().unwrap();

        let state_a: State<Air> = thermo
            .state_from((
                ThermodynamicTemperature::new::<kelvin>(320.0),
                Pressure::new::<kilopascal>(100.0),
            ))
            .unwrap();
        let state_b = state_a.with_temperature(ThermodynamicTemperature::new::<kelvin>(1280.0));

        let a_a = thermo.sound_speed(&state_a)?.get::<meter_per_second>();
        let a_b = thermo.sound_speed(&state_b)?.get::<meter_per_second>();
        assert_relative_eq!(a_b / a_a, 2.0, epsilon = 1e-12);
        assert_relative_eq!(a_a, (1.4 * 287.1 * 320.0_f64).sqrt(), max_relative = 1e-12);

        Ok(())
    }

    #[test]
    fn state_from_density_internal_energy_roundtrip() -> Result<(), PropertyError> {
        let thermo = mock_gas_model();

        let state_in = thermo.reference_state(MockGas).with_temperature(
            ThermodynamicTemperature::new::<kelvin>(750.0),
        );
        let u = thermo.internal_energy(&state_in)?;
        let state_out: State<MockGas> = thermo.state_from((state_in.density, u)).unwrap();

        assert_relative_eq!(state_out.temperature.get::<kelvin>(), 750.0, epsilon = 1e-9);
        assert_eq!(state_out.density, state_in.density);

        Ok(())
    }

    #[test]
    fn isentropic_expansion_follows_power_law() -> Result<(), PropertyError> {
        let thermo = PerfectGas::<Air>::new().unwrap();

        let state_1: State<Air> = thermo
            .state_from((
                ThermodynamicTemperature::new::<kelvin>(320.0),
                Pressure::new::<kilopascal>(100.0),
            ))
            .unwrap();
        let s_1 = thermo.entropy(&state_1)?;

        let p_2 = Pressure::new::<kilopascal>(60.0);
        let state_2: State<Air> = thermo.state_from((p_2, s_1)).unwrap();

        // T2/T1 = (p2/p1)^((γ-1)/γ)
        let expected = 320.0 * 0.6_f64.powf(0.4 / 1.4);
        assert_relative_eq!(state_2.temperature.get::<kelvin>(), expected, epsilon = 1e-9);
        assert_relative_eq!(
            thermo.pressure(&state_2)?.get::<pascal>(),
            60.0e3,
            max_relative = 1e-12
        );

        Ok(())
    }

    #[test]
    fn state_from_pressure_enthalpy_roundtrip() -> Result<(), PropertyError> {
        let thermo = mock_gas_model();

        let temp_in = ThermodynamicTemperature::new::<kelvin>(393.15);
        let pres_in = Pressure::new::<kilopascal>(250.0);
        let state_in: State<MockGas> = thermo.state_from((temp_in, pres_in)).unwrap();

        let h = thermo.enthalpy(&state_in)?;
        let state_out: State<MockGas> = thermo.state_from((pres_in, h)).unwrap();

        assert_relative_eq!(
            state_out.temperature.get::<kelvin>(),
            temp_in.get::<kelvin>(),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            state_out.density.get::<kilogram_per_cubic_meter>(),
            state_in.density.get::<kilogram_per_cubic_meter>(),
            epsilon = 1e-12
        );

        Ok(())
    }

    #[test]
    fn transport_requires_data() {
        let thermo = mock_gas_model();
        let state = thermo.reference_state(MockGas);
        assert!(matches!(
            thermo.viscosity(&state),
            Err(PropertyError::Undefined { .. })
        ));

        let air = PerfectGas::<Air>::new().unwrap();
        let state = air.reference_state(Air);
        let mu = air.viscosity(&state).unwrap().get::<pascal_second>();
        assert!(mu > 1.6e-5 && mu < 1.8e-5);
    }

    #[test]
    fn rejects_non_physical_parameters() {
        let parameters = PerfectGasParameters::new(
            SpecificGasConstant::new::<joule_per_kilogram_kelvin>(400.0),
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(300.0),
        );
        let result = PerfectGas::<MockGas>::from_parameters(parameters);
        assert!(matches!(
            result,
            Err(PerfectGasParametersError::NonPhysicalCv { .. })
        ));
    }

    #[test]
    fn nitrogen_parameters_smoke_test() {
        let thermo = PerfectGas::<Nitrogen>::new().unwrap();
        let state = thermo.reference_state(Nitrogen);
        assert_relative_eq!(thermo.pressure(&state).unwrap().get::<atmosphere>(), 1.0);
    }
}
