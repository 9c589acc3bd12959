use uom::{
    si::{
        ISQ, Quantity, SI, f64::MolarMass, molar_mass::kilogram_per_mole,
        specific_heat_capacity::joule_per_kilogram_kelvin,
    },
    typenum::{N1, N2, P2, Z0},
};

/// Molar (universal) gas constant, J/mol·K.
pub const MOLAR_GAS_CONSTANT: f64 = 8.314_462_618;

/// Specific gas constant, J/kg·K in SI.
pub type SpecificGasConstant = Quantity<ISQ<P2, Z0, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Specific enthalpy, J/kg in SI.
pub type SpecificEnthalpy = Quantity<ISQ<P2, Z0, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Specific entropy, J/kg·K in SI.
pub type SpecificEntropy = Quantity<ISQ<P2, Z0, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Specific internal energy, J/kg in SI.
pub type SpecificInternalEnergy = Quantity<ISQ<P2, Z0, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Returns the specific gas constant `R = Ru / M` for a molar mass.
#[must_use]
pub fn specific_gas_constant(molar_mass: MolarMass) -> SpecificGasConstant {
    SpecificGasConstant::new::<joule_per_kilogram_kelvin>(
        MOLAR_GAS_CONSTANT / molar_mass.get::<kilogram_per_mole>(),
    )
}
