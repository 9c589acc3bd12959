//! Finite-wave processes along a characteristic.
//!
//! Across a simple wave the flow is isentropic and one Riemann invariant is
//! constant. Along a `C+` characteristic that gives `dv = −dp/(ρ·a)`, along
//! `C−` the sign flips. For a calorically perfect gas this integrates to
//! `J± = v ± 2a/(γ−1)`; for other models the relation is integrated
//! numerically here.

mod error;
mod model;

use std::{fmt, str::FromStr};

use log::warn;
use uom::si::{
    f64::{Pressure, ThermodynamicTemperature, Velocity},
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::support::{
    constraint::{Constraint, StrictlyPositive},
    thermo::State,
    units::SpecificEntropy,
};

use super::traits::GasDynThermoModel;

pub use error::FiniteWaveError;
pub use model::{FiniteWaveDp, FiniteWaveDpInput, FiniteWaveDv, FiniteWaveDvInput};

/// Default number of velocity steps for [`FiniteWave::dv`].
pub const DEFAULT_DV_STEPS: usize = 100;

/// Default lower temperature limit for [`FiniteWave::dv`], in kelvin.
pub const DEFAULT_T_MIN: f64 = 200.0;

/// The characteristic family a wave travels along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Characteristic {
    /// `dx/dt = v + a`
    CPlus,
    /// `dx/dt = v − a`
    CMinus,
}

impl Characteristic {
    fn direction(self) -> f64 {
        match self {
            Self::CPlus => 1.0,
            Self::CMinus => -1.0,
        }
    }
}

impl FromStr for Characteristic {
    type Err = FiniteWaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cplus" => Ok(Self::CPlus),
            "cminus" => Ok(Self::CMinus),
            _ => Err(FiniteWaveError::InvalidCharacteristic {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CPlus => "cplus",
            Self::CMinus => "cminus",
        })
    }
}

/// End state of a finite-wave process.
#[derive(Debug, Clone, PartialEq)]
pub struct FiniteWaveResult<Fluid> {
    pub state: State<Fluid>,
    pub velocity: Velocity,
    /// Steps actually taken; fewer than requested if `dv` stopped early.
    pub steps: usize,
}

/// Isentropic finite-wave integrator over a thermo model.
///
/// # Example
///
/// ```
/// use twine_gasdyn::{
///     models::gasdyn::{Characteristic, FiniteWave},
///     support::thermo::{State, capability::StateFrom, fluid::Air, model::PerfectGas},
/// };
/// use uom::si::{
///     f64::{Pressure, ThermodynamicTemperature, Velocity},
///     pressure::kilopascal,
///     thermodynamic_temperature::kelvin,
///     velocity::meter_per_second,
/// };
///
/// let air = PerfectGas::<Air>::new().unwrap();
/// let state1: State<Air> = air
///     .state_from((
///         ThermodynamicTemperature::new::<kelvin>(320.0),
///         Pressure::new::<kilopascal>(100.0),
///     ))
///     .unwrap();
///
/// let wave = FiniteWave::new(&air);
/// let result = wave
///     .dp(
///         &state1,
///         Velocity::new::<meter_per_second>(0.0),
///         Characteristic::CPlus,
///         Pressure::new::<kilopascal>(60.0),
///         500,
///     )
///     .unwrap();
///
/// // Expansion along C+ accelerates the gas.
/// assert!(result.velocity.get::<meter_per_second>() > 120.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FiniteWave<'a, M> {
    thermo: &'a M,
}

impl<'a, M> FiniteWave<'a, M> {
    #[must_use]
    pub fn new(thermo: &'a M) -> Self {
        Self { thermo }
    }

    /// Steps in pressure from `state1` to `p2` along `characteristic`.
    ///
    /// The pressure interval is split into `steps` equal parts. Each velocity
    /// increment `dv = −dir·dp/(ρ·a)` is evaluated at the midpoint pressure
    /// on the initial isentrope. The final state is the isentropic state at
    /// `p2`.
    ///
    /// # Errors
    ///
    /// - [`FiniteWaveError::InvalidSteps`] if `steps` is zero.
    /// - [`FiniteWaveError::InvalidPressure`] if `p2` is not positive and finite.
    /// - [`FiniteWaveError::Thermo`] if a property evaluation fails.
    pub fn dp<Fluid>(
        &self,
        state1: &State<Fluid>,
        v1: Velocity,
        characteristic: Characteristic,
        p2: Pressure,
        steps: usize,
    ) -> Result<FiniteWaveResult<Fluid>, FiniteWaveError>
    where
        M: GasDynThermoModel<Fluid>,
        Fluid: Clone,
    {
        check_steps(steps)?;
        let p2 = p2.get::<pascal>();
        if StrictlyPositive::check(&p2).is_err() || !p2.is_finite() {
            return Err(FiniteWaveError::InvalidPressure { pressure: p2 });
        }
        let dir = characteristic.direction();
        let s1 = self.entropy(state1)?;
        let p1 = self.pressure(state1)?;

        let dp = (p2 - p1) / steps as f64;
        let mut v = v1.get::<meter_per_second>();
        for i in 0..steps {
            let p_mid = p1 + (i as f64 + 0.5) * dp;
            let mid = self.isentropic(&state1.fluid, p_mid, s1)?;
            v -= dir * dp / self.impedance(&mid)?;
        }

        let state = self.isentropic(&state1.fluid, p2, s1)?;
        Ok(FiniteWaveResult {
            state,
            velocity: Velocity::new::<meter_per_second>(v),
            steps,
        })
    }

    /// Steps in velocity from `v1` to `v2` along `characteristic`.
    ///
    /// Each step applies the midpoint rule to `dp = −dir·ρ·a·dv`. If the
    /// temperature drops below `t_min` the integration stops after that
    /// step and the state reached so far is returned. A step that would
    /// reach zero pressure is not taken and also ends the integration.
    ///
    /// # Errors
    ///
    /// Returns [`FiniteWaveError::InvalidSteps`] if `steps` is zero, or
    /// [`FiniteWaveError::Thermo`] if a property evaluation fails.
    pub fn dv<Fluid>(
        &self,
        state1: &State<Fluid>,
        v1: Velocity,
        characteristic: Characteristic,
        v2: Velocity,
        steps: usize,
        t_min: ThermodynamicTemperature,
    ) -> Result<FiniteWaveResult<Fluid>, FiniteWaveError>
    where
        M: GasDynThermoModel<Fluid>,
        Fluid: Clone,
    {
        check_steps(steps)?;
        let dir = characteristic.direction();
        let s1 = self.entropy(state1)?;
        let t_min = t_min.get::<kelvin>();

        let v_start = v1.get::<meter_per_second>();
        let dv = (v2.get::<meter_per_second>() - v_start) / steps as f64;
        let mut p = self.pressure(state1)?;
        let mut state = state1.clone();
        let mut taken = 0;

        while taken < steps {
            let dp_guess = -dir * self.impedance(&state)? * dv;
            let p_mid = p + 0.5 * dp_guess;
            if p_mid <= 0.0 {
                warn!("finite wave dv reached vacuum after {taken} of {steps} steps");
                break;
            }
            let mid = self.isentropic(&state1.fluid, p_mid, s1)?;
            let p_next = p - dir * self.impedance(&mid)? * dv;
            if p_next <= 0.0 {
                warn!("finite wave dv reached vacuum after {taken} of {steps} steps");
                break;
            }

            p = p_next;
            state = self.isentropic(&state1.fluid, p, s1)?;
            taken += 1;

            let t = state.temperature.get::<kelvin>();
            if t < t_min {
                warn!(
                    "finite wave dv stopped at T = {t:.2} K (below {t_min} K) after {taken} of {steps} steps"
                );
                break;
            }
        }

        Ok(FiniteWaveResult {
            state,
            velocity: Velocity::new::<meter_per_second>(v_start + taken as f64 * dv),
            steps: taken,
        })
    }

    fn entropy<Fluid>(&self, state: &State<Fluid>) -> Result<SpecificEntropy, FiniteWaveError>
    where
        M: GasDynThermoModel<Fluid>,
    {
        self.thermo
            .entropy(state)
            .map_err(|err| FiniteWaveError::thermo_failed("entropy of initial state", err))
    }

    fn pressure<Fluid>(&self, state: &State<Fluid>) -> Result<f64, FiniteWaveError>
    where
        M: GasDynThermoModel<Fluid>,
    {
        self.thermo
            .pressure(state)
            .map(|p| p.get::<pascal>())
            .map_err(|err| FiniteWaveError::thermo_failed("pressure of initial state", err))
    }

    /// Acoustic impedance `ρ·a` in SI.
    fn impedance<Fluid>(&self, state: &State<Fluid>) -> Result<f64, FiniteWaveError>
    where
        M: GasDynThermoModel<Fluid>,
    {
        let a = self
            .thermo
            .sound_speed(state)
            .map_err(|err| FiniteWaveError::thermo_failed("sound speed", err))?;
        Ok(state.density.get::<kilogram_per_cubic_meter>() * a.get::<meter_per_second>())
    }

    fn isentropic<Fluid>(
        &self,
        fluid: &Fluid,
        p: f64,
        s: SpecificEntropy,
    ) -> Result<State<Fluid>, FiniteWaveError>
    where
        M: GasDynThermoModel<Fluid>,
        Fluid: Clone,
    {
        self.thermo
            .state_from((fluid.clone(), Pressure::new::<pascal>(p), s))
            .map_err(|err| FiniteWaveError::thermo_failed(format!("isentropic state at p = {p} Pa"), err))
    }
}

fn check_steps(steps: usize) -> Result<(), FiniteWaveError> {
    if steps == 0 {
        return Err(FiniteWaveError::InvalidSteps { steps });
    }
    Ok(())
}
