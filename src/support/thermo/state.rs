use uom::si::f64::{MassDensity, ThermodynamicTemperature};

/// The thermodynamic state of a gas.
///
/// A `State<Fluid>` holds the two independent thermodynamic variables
/// (temperature and density) plus a fluid value.
///
/// The `Fluid` type parameter can be a marker type, such as
/// [`Air`](crate::support::thermo::fluid::Air) for a single-component perfect gas,
/// or a [`Composition`](crate::support::thermo::model::Composition) carrying
/// the mass fractions of a reacting mixture.
///
/// Pressure, internal energy, sound speed, and the other derived quantities
/// are not stored. They are computed on demand by the model that owns the
/// state, so a `State` can never hold stale derived values.
///
/// # Example
///
/// ```
/// use twine_gasdyn::support::thermo::{State, fluid::Air};
/// use uom::si::{
///     f64::{ThermodynamicTemperature, MassDensity},
///     thermodynamic_temperature::kelvin,
///     mass_density::kilogram_per_cubic_meter,
/// };
///
/// let state = State {
///     temperature: ThermodynamicTemperature::new::<kelvin>(320.0),
///     density: MassDensity::new::<kilogram_per_cubic_meter>(1.089),
///     fluid: Air,
/// };
/// assert_eq!(state.with_temperature(state.temperature).fluid, Air);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State<Fluid> {
    pub temperature: ThermodynamicTemperature,
    pub density: MassDensity,
    pub fluid: Fluid,
}

impl<Fluid> State<Fluid> {
    /// Creates a new state with the given temperature, density, and fluid.
    #[must_use]
    pub fn new(temperature: ThermodynamicTemperature, density: MassDensity, fluid: Fluid) -> Self {
        Self {
            temperature,
            density,
            fluid,
        }
    }

    /// Returns a new state with the given temperature, keeping other fields unchanged.
    #[must_use]
    pub fn with_temperature(self, temperature: ThermodynamicTemperature) -> Self {
        Self {
            temperature,
            ..self
        }
    }

    /// Returns a new state with the given density, keeping other fields unchanged.
    #[must_use]
    pub fn with_density(self, density: MassDensity) -> Self {
        Self { density, ..self }
    }

    /// Returns a new state with the given fluid, keeping other fields unchanged.
    ///
    /// For a mixture this changes composition at fixed temperature and density.
    #[must_use]
    pub fn with_fluid(self, fluid: Fluid) -> Self {
        Self { fluid, ..self }
    }
}
