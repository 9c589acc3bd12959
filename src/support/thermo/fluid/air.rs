use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;

use crate::support::thermo::model::{
    perfect_gas::{PerfectGasFluid, PerfectGasParameters},
    transport::{SutherlandLaw, SutherlandTransport},
};
use crate::support::units::SpecificGasConstant;

/// Canonical identifier for ideal, non-reacting air (`γ = 1.4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Air;

impl PerfectGasFluid for Air {
    fn parameters() -> PerfectGasParameters {
        PerfectGasParameters::from_gamma(
            SpecificGasConstant::new::<joule_per_kilogram_kelvin>(287.1),
            1.4,
        )
        .with_transport(SutherlandTransport {
            viscosity: SutherlandLaw {
                reference: 1.716e-5,
                t_ref: 273.15,
                sutherland: 110.4,
            },
            conductivity: SutherlandLaw {
                reference: 0.0241,
                t_ref: 273.15,
                sutherland: 194.0,
            },
        })
    }
}
