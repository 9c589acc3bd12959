//! [`twine_core::Model`] adapters for finite-wave processes.

use std::marker::PhantomData;

use twine_core::Model;
use uom::si::{
    f64::{Pressure, ThermodynamicTemperature, Velocity},
    thermodynamic_temperature::kelvin,
};

use crate::{models::gasdyn::traits::GasDynThermoModel, support::thermo::State};

use super::{
    Characteristic, DEFAULT_DV_STEPS, DEFAULT_T_MIN, FiniteWave, FiniteWaveError,
    FiniteWaveResult,
};

/// Input to [`FiniteWaveDp`].
#[derive(Debug, Clone, PartialEq)]
pub struct FiniteWaveDpInput<Fluid> {
    pub state: State<Fluid>,
    pub velocity: Velocity,
    pub characteristic: Characteristic,
    pub target_pressure: Pressure,
    pub steps: usize,
}

/// Input to [`FiniteWaveDv`].
#[derive(Debug, Clone, PartialEq)]
pub struct FiniteWaveDvInput<Fluid> {
    pub state: State<Fluid>,
    pub velocity: Velocity,
    pub characteristic: Characteristic,
    pub target_velocity: Velocity,
    pub steps: usize,
    pub t_min: ThermodynamicTemperature,
}

impl<Fluid> FiniteWaveDvInput<Fluid> {
    /// Creates an input with [`DEFAULT_DV_STEPS`] and [`DEFAULT_T_MIN`].
    #[must_use]
    pub fn new(
        state: State<Fluid>,
        velocity: Velocity,
        characteristic: Characteristic,
        target_velocity: Velocity,
    ) -> Self {
        Self {
            state,
            velocity,
            characteristic,
            target_velocity,
            steps: DEFAULT_DV_STEPS,
            t_min: ThermodynamicTemperature::new::<kelvin>(DEFAULT_T_MIN),
        }
    }

    #[must_use]
    pub fn with_steps(self, steps: usize) -> Self {
        Self { steps, ..self }
    }

    #[must_use]
    pub fn with_t_min(self, t_min: ThermodynamicTemperature) -> Self {
        Self { t_min, ..self }
    }
}

/// Pressure-stepped finite wave as a model.
pub struct FiniteWaveDp<'a, M, Fluid> {
    thermo: &'a M,
    _fluid: PhantomData<fn() -> Fluid>,
}

impl<'a, M, Fluid> FiniteWaveDp<'a, M, Fluid> {
    #[must_use]
    pub fn new(thermo: &'a M) -> Self {
        Self {
            thermo,
            _fluid: PhantomData,
        }
    }
}

impl<M, Fluid> Model for FiniteWaveDp<'_, M, Fluid>
where
    M: GasDynThermoModel<Fluid>,
    Fluid: Clone,
{
    type Input = FiniteWaveDpInput<Fluid>;
    type Output = FiniteWaveResult<Fluid>;
    type Error = FiniteWaveError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        FiniteWave::new(self.thermo).dp(
            &input.state,
            input.velocity,
            input.characteristic,
            input.target_pressure,
            input.steps,
        )
    }
}

/// Velocity-stepped finite wave as a model.
pub struct FiniteWaveDv<'a, M, Fluid> {
    thermo: &'a M,
    _fluid: PhantomData<fn() -> Fluid>,
}

impl<'a, M, Fluid> FiniteWaveDv<'a, M, Fluid> {
    #[must_use]
    pub fn new(thermo: &'a M) -> Self {
        Self {
            thermo,
            _fluid: PhantomData,
        }
    }
}

impl<M, Fluid> Model for FiniteWaveDv<'_, M, Fluid>
where
    M: GasDynThermoModel<Fluid>,
    Fluid: Clone,
{
    type Input = FiniteWaveDvInput<Fluid>;
    type Output = FiniteWaveResult<Fluid>;
    type Error = FiniteWaveError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        FiniteWave::new(self.thermo).dv(
            &input.state,
            input.velocity,
            input.characteristic,
            input.target_velocity,
            input.steps,
            input.t_min,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{pressure::kilopascal, velocity::meter_per_second};

    use crate::support::thermo::{
        capability::{HasPressure, StateFrom},
        fluid::Air,
        model::PerfectGas,
    };

    #[test]
    fn dp_then_dv_returns_to_start() {
        let air = PerfectGas::<Air>::new().unwrap();
        let state1: State<Air> = air
            .state_from((
                ThermodynamicTemperature::new::<kelvin>(320.0),
                Pressure::new::<kilopascal>(100.0),
            ))
            .unwrap();

        let expanded = FiniteWaveDp::new(&air)
            .call(&FiniteWaveDpInput {
                state: state1.clone(),
                velocity: Velocity::new::<meter_per_second>(0.0),
                characteristic: Characteristic::CPlus,
                target_pressure: Pressure::new::<kilopascal>(60.0),
                steps: 500,
            })
            .unwrap();

        // Decelerating back to rest along the same characteristic recompresses.
        let recompressed = FiniteWaveDv::new(&air)
            .call(
                &FiniteWaveDvInput::new(
                    expanded.state,
                    expanded.velocity,
                    Characteristic::CPlus,
                    Velocity::new::<meter_per_second>(0.0),
                )
                .with_steps(400),
            )
            .unwrap();

        assert_eq!(recompressed.steps, 400);
        assert_relative_eq!(
            air.pressure(&recompressed.state).unwrap().get::<kilopascal>(),
            100.0,
            max_relative = 1e-4
        );
        assert_relative_eq!(
            recompressed.state.temperature.get::<kelvin>(),
            320.0,
            max_relative = 1e-4
        );
    }

    #[test]
    fn dv_input_defaults() {
        let air = PerfectGas::<Air>::new().unwrap();
        let input = FiniteWaveDvInput::new(
            air.reference_state(Air),
            Velocity::new::<meter_per_second>(0.0),
            Characteristic::CMinus,
            Velocity::new::<meter_per_second>(-10.0),
        );
        assert_eq!(input.steps, DEFAULT_DV_STEPS);
        assert_relative_eq!(input.t_min.get::<kelvin>(), DEFAULT_T_MIN);

        let input = input.with_t_min(ThermodynamicTemperature::new::<kelvin>(50.0));
        assert_relative_eq!(input.t_min.get::<kelvin>(), 50.0);
    }
}
