//! Ideal gas equation of state helpers.
//!
//! These functions implement the ideal gas equation of state `p = ρ·R·T`
//! and the frozen sound speed `a = √(γ·R·T)`.
//!
//! They are shared by the perfect gas and the thermally perfect mixture;
//! for a mixture, `R` is the mixture gas constant.

use uom::si::{
    f64::{MassDensity, Pressure, ThermodynamicTemperature, Velocity},
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval, thermodynamic_temperature,
    velocity::meter_per_second,
};

use crate::support::units::SpecificGasConstant;

/// Computes pressure using the ideal gas equation of state.
#[must_use]
pub(crate) fn pressure(
    temperature: ThermodynamicTemperature,
    density: MassDensity,
    gas_constant: SpecificGasConstant,
) -> Pressure {
    density * gas_constant * temperature
}

/// Computes density using the ideal gas equation of state.
#[must_use]
pub(crate) fn density(
    temperature: ThermodynamicTemperature,
    pressure: Pressure,
    gas_constant: SpecificGasConstant,
) -> MassDensity {
    pressure / (gas_constant * temperature)
}

/// Computes temperature using the ideal gas equation of state.
///
/// Since [`SpecificGasConstant`] is associated with a `TemperatureInterval`,
/// the result must be manually converted to an absolute temperature.
#[must_use]
pub(crate) fn temperature(
    pressure: Pressure,
    density: MassDensity,
    gas_constant: SpecificGasConstant,
) -> ThermodynamicTemperature {
    let temperature = pressure / (density * gas_constant);
    ThermodynamicTemperature::new::<thermodynamic_temperature::kelvin>(
        temperature.get::<temperature_interval::kelvin>(),
    )
}

/// Computes the frozen sound speed `a = √(γ·R·T)`.
#[must_use]
pub(crate) fn sound_speed(
    gamma: f64,
    temperature: ThermodynamicTemperature,
    gas_constant: SpecificGasConstant,
) -> Velocity {
    let r = gas_constant.get::<joule_per_kilogram_kelvin>();
    let t = temperature.get::<thermodynamic_temperature::kelvin>();
    Velocity::new::<meter_per_second>((gamma * r * t).sqrt())
}
