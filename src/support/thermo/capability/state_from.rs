use crate::support::thermo::State;

use super::ThermoModel;

/// Capability for constructing a [`State`] from a typed input.
///
/// A thermodynamic [`State`] includes a `Fluid` value. For a reacting mixture
/// the fluid is a [`Composition`](crate::support::thermo::model::Composition),
/// so the same model can hold states of any makeup.
///
/// `StateFrom<Input>` expresses, at compile time, which combinations of
/// inputs a model can use to construct a state.
/// If a model does not implement `StateFrom<Input>`, then that input is simply
/// not supported (no runtime "not implemented" errors).
///
/// ## Common input patterns
///
/// - `(Fluid, ThermodynamicTemperature, Pressure)`: the classic "update from p, T"
/// - `(Fluid, MassDensity, SpecificInternalEnergy)`: "update from rho, u", used
///   after a fixed-volume chemistry step
/// - `(Fluid, Pressure, SpecificEntropy)`: isentropic processes such as finite waves
/// - `(Fluid, Pressure, SpecificEnthalpy)`: steady-flow energy balances
///
/// ## Default fluid convenience
///
/// When `Fluid` is a simple marker type (e.g. [`Air`](crate::support::thermo::fluid::Air)),
/// call sites may omit it.
/// If a model implements `StateFrom<(Fluid, A, B)>` and `Fluid: Default`,
/// it also implements `StateFrom<(A, B)>`, so `thermo.state_from((t, p))` works.
pub trait StateFrom<Input>: ThermoModel {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a thermodynamic state from the provided input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the state cannot be created from `input`.
    fn state_from(&self, input: Input) -> Result<State<Self::Fluid>, Self::Error>;
}

/// Default-fluid convenience impl.
///
/// Intended for marker fluids. Mixtures carry their composition and should
/// pass it explicitly.
impl<M, A, B> StateFrom<(A, B)> for M
where
    M: ThermoModel + StateFrom<(<M as ThermoModel>::Fluid, A, B)>,
    <M as ThermoModel>::Fluid: Default,
{
    type Error = <M as StateFrom<(<M as ThermoModel>::Fluid, A, B)>>::Error;

    fn state_from(&self, (a, b): (A, B)) -> Result<State<Self::Fluid>, Self::Error> {
        self.state_from((<M as ThermoModel>::Fluid::default(), a, b))
    }
}
