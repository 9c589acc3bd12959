mod config;
mod error;

use log::debug;
use twine_core::Model;
use uom::si::{
    f64::Time, mass_density::kilogram_per_cubic_meter, thermodynamic_temperature::kelvin,
    time::second,
};

use crate::support::{
    kinetics::{Mechanism, RateConstants},
    ode::{AlphaQss, ProductionLossSystem, Rkf45, integrate},
    thermo::{
        State,
        capability::{HasInternalEnergy, StateFrom},
        model::{Composition, ThermallyPerfectGas},
    },
};

pub use config::{Method, ReactorConfig};
pub use error::ReactorError;

/// State after one reactor interval.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactorStep {
    pub state: State<Composition>,
    /// Substep size to start the next interval with.
    pub dt_suggest: Time,
}

/// Input to the reactor as a [`Model`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReactorInput {
    pub state: State<Composition>,
    pub dt: Time,
    pub dt_suggest: Time,
}

/// Adiabatic, fixed-volume reactor for a thermally perfect mixture.
///
/// Density and specific internal energy are held at their input values over
/// each interval. The rate coefficients are evaluated once at the input
/// temperature and kept frozen while the concentrations are integrated;
/// the temperature is recovered from `(ρ, u)` only at the end.
#[derive(Debug, Clone)]
pub struct ThermochemicalReactor<'a> {
    gas: &'a ThermallyPerfectGas,
    mechanism: Mechanism,
    config: ReactorConfig,
}

impl<'a> ThermochemicalReactor<'a> {
    /// Creates a reactor for `gas` driven by `mechanism`.
    ///
    /// # Errors
    ///
    /// - [`ReactorError::InvalidConfig`] if a `config` setting is out of range.
    /// - [`ReactorError::SpeciesMismatch`] if the mechanism was built for a
    ///   gas model with a different number of species.
    pub fn new(
        gas: &'a ThermallyPerfectGas,
        mechanism: Mechanism,
        config: ReactorConfig,
    ) -> Result<Self, ReactorError> {
        config.validate()?;
        if mechanism.n_species() != gas.n_species() {
            return Err(ReactorError::SpeciesMismatch {
                mechanism: mechanism.n_species(),
                gas: gas.n_species(),
            });
        }
        Ok(Self {
            gas,
            mechanism,
            config,
        })
    }

    #[must_use]
    pub fn gas(&self) -> &ThermallyPerfectGas {
        self.gas
    }

    #[must_use]
    pub fn mechanism(&self) -> &Mechanism {
        &self.mechanism
    }

    #[must_use]
    pub fn config(&self) -> &ReactorConfig {
        &self.config
    }

    /// Advances `state` through an interval `dt`.
    ///
    /// The first substep is `dt_suggest` (limited to `dt`), or `dt` itself
    /// if `dt_suggest` is not positive. The returned `dt_suggest` is the
    /// substep the integrator would take next, for use on the following call.
    ///
    /// # Errors
    ///
    /// - [`ReactorError::InvalidInterval`] if `dt` is not positive and finite.
    /// - [`ReactorError::StepSizeUnderflow`] or [`ReactorError::TooManySubsteps`]
    ///   if the integration fails within the configured limits.
    /// - [`ReactorError::Thermo`] if the end state cannot be recovered.
    pub fn update_state(
        &self,
        state: &State<Composition>,
        dt: Time,
        dt_suggest: Time,
    ) -> Result<ReactorStep, ReactorError> {
        let dt = dt.get::<second>();
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(ReactorError::InvalidInterval { dt });
        }

        let u = self
            .gas
            .internal_energy(state)
            .map_err(|err| ReactorError::thermo_failed("internal energy of input state", err))?;
        let rho = state.density.get::<kilogram_per_cubic_meter>();
        let t = state.temperature.get::<kelvin>();

        let system = FrozenKinetics {
            mechanism: &self.mechanism,
            k: self.mechanism.rate_constants(self.gas, t),
        };
        let c0 = self.gas.concentrations_si(rho, state.fluid.mass_fractions());

        let suggested = dt_suggest.get::<second>();
        let h0 = if suggested > 0.0 { suggested.min(dt) } else { dt };

        let control = self.config.step_control();
        let limits = self.config.limits();
        let integration = match self.config.method {
            Method::Rkf45 => integrate(&Rkf45::new(control), &system, c0, dt, h0, &limits),
            Method::AlphaQss => integrate(&AlphaQss::new(control), &system, c0, dt, h0, &limits),
        }?;
        debug!(
            "reactor dt={dt:e} s at T={t:.2} K: {} accepted, {} rejected substeps, next {:e} s",
            integration.accepted, integration.rejected, integration.h_next
        );

        let (_, composition) = self
            .gas
            .mass_fractions_from_concentrations(&integration.y)
            .map_err(|err| ReactorError::thermo_failed("mass fractions after reaction", err))?;
        let state = self
            .gas
            .state_from((composition, state.density, u))
            .map_err(|err| ReactorError::thermo_failed("state from density and energy", err))?;

        Ok(ReactorStep {
            state,
            dt_suggest: Time::new::<second>(integration.h_next),
        })
    }
}

impl Model for ThermochemicalReactor<'_> {
    type Input = ReactorInput;
    type Output = ReactorStep;
    type Error = ReactorError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.update_state(&input.state, input.dt, input.dt_suggest)
    }
}

/// Concentration equations with rate coefficients held fixed.
struct FrozenKinetics<'a> {
    mechanism: &'a Mechanism,
    k: RateConstants,
}

impl ProductionLossSystem for FrozenKinetics<'_> {
    fn dimension(&self) -> usize {
        self.mechanism.n_species()
    }

    fn production_loss(&self, _t: f64, y: &[f64], q: &mut [f64], l: &mut [f64]) {
        self.mechanism.rates(&self.k, y, q, l);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Pressure, ThermodynamicTemperature},
        pressure::pascal,
        time::microsecond,
    };

    use crate::support::thermo::model::thermally_perfect::test_data::{atomic_nitrogen, nitrogen};

    const PARK_NITROGEN: &str = r#"{
        "reactions": [
            { "equation": "N2 + N2 <=> N + N + N2", "forward": { "A": 7.0e15, "n": -1.6, "C": 113200.0 } },
            { "equation": "N2 + N <=> N + N + N",   "forward": { "A": 3.0e16, "n": -1.6, "C": 113200.0 } }
        ]
    }"#;

    fn gas() -> ThermallyPerfectGas {
        ThermallyPerfectGas::new(vec![nitrogen(), atomic_nitrogen()]).unwrap()
    }

    fn reactor(gas: &ThermallyPerfectGas, config: ReactorConfig) -> ThermochemicalReactor<'_> {
        let mechanism = Mechanism::from_json_str(PARK_NITROGEN, gas).unwrap();
        ThermochemicalReactor::new(gas, mechanism, config).unwrap()
    }

    fn hot_partially_dissociated(gas: &ThermallyPerfectGas) -> State<Composition> {
        let composition = gas
            .composition_from_named_mole_fractions(&[("N2", 2.0 / 3.0), ("N", 1.0 / 3.0)])
            .unwrap();
        gas.state_from((
            composition,
            ThermodynamicTemperature::new::<kelvin>(4000.0),
            Pressure::new::<pascal>(1.0e5),
        ))
        .unwrap()
    }

    #[test]
    fn recombination_heats_at_fixed_density_and_energy() {
        let gas = gas();
        let reactor = reactor(&gas, ReactorConfig::default());
        let state = hot_partially_dissociated(&gas);

        let step = reactor
            .update_state(
                &state,
                Time::new::<microsecond>(1.0),
                Time::new::<second>(1e-11),
            )
            .unwrap();

        let y_before = state.fluid.mass_fractions();
        let y_after = step.state.fluid.mass_fractions();
        assert!(y_after[1] < y_before[1]);
        assert_relative_eq!(y_after.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert!(y_after.iter().all(|y| *y >= 0.0));

        assert!(step.state.temperature > state.temperature);
        assert_eq!(step.state.density, state.density);
        assert_relative_eq!(
            gas.internal_energy(&step.state).unwrap().value,
            gas.internal_energy(&state).unwrap().value,
            max_relative = 1e-9
        );
        assert!(step.dt_suggest.get::<second>() > 1e-11);
    }

    #[test]
    fn repeated_steps_approach_equilibrium() {
        let gas = gas();
        let reactor = reactor(&gas, ReactorConfig::default());
        let mut state = hot_partially_dissociated(&gas);
        let mut dt_suggest = Time::new::<second>(1e-11);

        let y_start = state.fluid.mass_fractions()[1];
        let t_start = state.temperature;
        for _ in 0..20 {
            let step = reactor
                .update_state(&state, Time::new::<microsecond>(10.0), dt_suggest)
                .unwrap();
            state = step.state;
            dt_suggest = step.dt_suggest;
        }

        let y_end = state.fluid.mass_fractions()[1];
        assert!(y_end > 0.0 && y_end < y_start);
        assert!(state.temperature > t_start);
    }

    #[test]
    fn alpha_qss_agrees_with_rkf45() {
        let gas = gas();
        let state = hot_partially_dissociated(&gas);
        let dt = Time::new::<microsecond>(10.0);
        let dt_suggest = Time::new::<second>(1e-9);

        let rkf = reactor(&gas, ReactorConfig::default())
            .update_state(&state, dt, dt_suggest)
            .unwrap();
        let qss = reactor(
            &gas,
            ReactorConfig {
                method: Method::AlphaQss,
                ..ReactorConfig::default()
            },
        )
        .update_state(&state, dt, dt_suggest)
        .unwrap();

        assert_relative_eq!(
            qss.state.fluid.mass_fractions()[1],
            rkf.state.fluid.mass_fractions()[1],
            max_relative = 1e-2
        );
        assert_relative_eq!(
            qss.state.temperature.get::<kelvin>(),
            rkf.state.temperature.get::<kelvin>(),
            max_relative = 1e-3
        );
    }

    #[test]
    fn model_call_matches_update_state() {
        let gas = gas();
        let reactor = reactor(&gas, ReactorConfig::default());
        let state = hot_partially_dissociated(&gas);
        let dt = Time::new::<microsecond>(1.0);
        let dt_suggest = Time::new::<second>(0.0);

        let direct = reactor.update_state(&state, dt, dt_suggest).unwrap();
        let called = reactor
            .call(&ReactorInput {
                state,
                dt,
                dt_suggest,
            })
            .unwrap();
        assert_eq!(direct, called);
    }

    #[test]
    fn rejects_bad_interval() {
        let gas = gas();
        let reactor = reactor(&gas, ReactorConfig::default());
        let state = hot_partially_dissociated(&gas);

        for dt in [0.0, -1e-6, f64::INFINITY] {
            let result =
                reactor.update_state(&state, Time::new::<second>(dt), Time::new::<second>(1e-9));
            assert!(matches!(result, Err(ReactorError::InvalidInterval { .. })));
        }
    }

    #[test]
    fn reports_exhausted_substeps() {
        let gas = gas();
        let reactor = reactor(
            &gas,
            ReactorConfig {
                max_substeps: 3,
                ..ReactorConfig::default()
            },
        );
        let state = hot_partially_dissociated(&gas);

        let result = reactor.update_state(
            &state,
            Time::new::<microsecond>(100.0),
            Time::new::<second>(1e-12),
        );
        assert!(matches!(
            result,
            Err(ReactorError::TooManySubsteps { limit: 3 })
        ));
    }

    #[test]
    fn bundled_nitrogen_data_matches_test_species() {
        let data = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
        let gas = ThermallyPerfectGas::from_file(format!("{data}/nitrogen-2sp.json")).unwrap();
        assert_eq!(gas, self::gas());

        let mechanism = Mechanism::from_file(format!("{data}/nitrogen-2sp-2r.json"), &gas).unwrap();
        assert_eq!(mechanism, Mechanism::from_json_str(PARK_NITROGEN, &gas).unwrap());
    }

    #[test]
    fn rejects_out_of_range_config() {
        let gas = gas();
        let cases = [
            (r#"{ "max_growth": 0.1 }"#, "max_growth"),
            (r#"{ "method": "alpha_qss", "safety": 0.0 }"#, "safety"),
            (r#"{ "safety": 1.5 }"#, "safety"),
            (r#"{ "rel_tol": 0.0 }"#, "rel_tol"),
            (r#"{ "abs_tol": -1e-12 }"#, "abs_tol"),
            (r#"{ "min_step": -1.0 }"#, "min_step"),
        ];
        for (json, expected) in cases {
            let config: ReactorConfig = serde_json::from_str(json).unwrap();
            let mechanism = Mechanism::from_json_str(PARK_NITROGEN, &gas).unwrap();
            let result = ThermochemicalReactor::new(&gas, mechanism, config);
            assert!(
                matches!(result, Err(ReactorError::InvalidConfig { field, .. }) if field == expected),
                "{json} should be rejected for {expected}"
            );
        }
    }

    #[test]
    fn small_alpha_qss_safety_still_integrates() {
        let gas = gas();
        let reactor = reactor(
            &gas,
            ReactorConfig {
                method: Method::AlphaQss,
                safety: 0.1,
                ..ReactorConfig::default()
            },
        );
        let state = hot_partially_dissociated(&gas);

        let step = reactor
            .update_state(
                &state,
                Time::new::<microsecond>(1.0),
                Time::new::<second>(1e-11),
            )
            .unwrap();
        assert!(step.state.temperature > state.temperature);
    }

    #[test]
    fn rejects_mechanism_for_other_gas() {
        let gas = gas();
        let result = ThermochemicalReactor::new(
            &gas,
            Mechanism::new(Vec::new(), 3).unwrap(),
            ReactorConfig::default(),
        );
        assert!(matches!(
            result,
            Err(ReactorError::SpeciesMismatch {
                mechanism: 3,
                gas: 2
            })
        ));
    }
}
