/// Base trait for thermodynamic models.
///
/// A model declares the `Fluid` value carried by its [`State`]s.
/// Capability traits such as [`HasPressure`] build on this trait.
///
/// [`State`]: crate::support::thermo::State
/// [`HasPressure`]: super::HasPressure
pub trait ThermoModel {
    type Fluid;
}
