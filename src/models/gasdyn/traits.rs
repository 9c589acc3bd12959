use uom::si::f64::Pressure;

use crate::support::{
    thermo::capability::{HasEntropy, HasPressure, HasSoundSpeed, StateFrom, ThermoModel},
    units::SpecificEntropy,
};

/// Required thermo model bounds for finite-wave integration.
///
/// Blanket-implemented for every model with the listed capabilities.
#[doc(hidden)]
pub trait GasDynThermoModel<Fluid>:
    ThermoModel<Fluid = Fluid>
    + HasPressure
    + HasEntropy
    + HasSoundSpeed
    + StateFrom<(Fluid, Pressure, SpecificEntropy)>
{
}

impl<Fluid, T> GasDynThermoModel<Fluid> for T where
    T: ThermoModel<Fluid = Fluid>
        + HasPressure
        + HasEntropy
        + HasSoundSpeed
        + StateFrom<(Fluid, Pressure, SpecificEntropy)>
{
}
