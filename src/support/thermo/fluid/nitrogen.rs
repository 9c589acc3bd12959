use uom::si::{f64::MolarMass, molar_mass::gram_per_mole};

use crate::support::thermo::model::{
    perfect_gas::{PerfectGasFluid, PerfectGasParameters},
    transport::{SutherlandLaw, SutherlandTransport},
};
use crate::support::units::specific_gas_constant;

/// Canonical identifier for molecular nitrogen at conditions where it does not dissociate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Nitrogen;

impl PerfectGasFluid for Nitrogen {
    fn parameters() -> PerfectGasParameters {
        PerfectGasParameters::from_gamma(
            specific_gas_constant(MolarMass::new::<gram_per_mole>(28.0134)),
            1.4,
        )
        .with_transport(SutherlandTransport {
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
        })
    }
}
