//! Adiabatic, fixed-volume relaxation of partially dissociated nitrogen.
//!
//! Writes the time history to `fvreactor.data` in the working directory.
//! Run with `cargo run --example fixed_volume_reactor`.

use std::error::Error;

use simplelog::{Config, LevelFilter, SimpleLogger};
use twine_gasdyn::{
    models::kinetics::{ReactorConfig, ThermochemicalReactor},
    support::{
        kinetics::Mechanism,
        report::ReactorHistory,
        thermo::{capability::StateFrom, model::ThermallyPerfectGas},
    },
};
use uom::si::{
    f64::{Pressure, ThermodynamicTemperature, Time},
    pressure::pascal,
    thermodynamic_temperature::kelvin,
    time::second,
};

const GAS_MODEL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/nitrogen-2sp.json");
const MECHANISM: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/nitrogen-2sp-2r.json");

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::init(LevelFilter::Info, Config::default())?;

    let gas = ThermallyPerfectGas::from_file(GAS_MODEL)?;
    let mechanism = Mechanism::from_file(MECHANISM, &gas)?;
    let reactor = ThermochemicalReactor::new(&gas, mechanism, ReactorConfig::default())?;

    let composition =
        gas.composition_from_named_mole_fractions(&[("N2", 2.0 / 3.0), ("N", 1.0 / 3.0)])?;
    let mut state = gas.state_from((
        composition,
        ThermodynamicTemperature::new::<kelvin>(4000.0),
        Pressure::new::<pascal>(1.0e5),
    ))?;

    let t_final = 200.0e-6;
    let dt = Time::new::<second>(1.0e-6);
    let mut dt_suggest = Time::new::<second>(1.0e-11);
    let mut t = 0.0;

    println!("# Start integration");
    let mut history = ReactorHistory::create("fvreactor.data", &gas, ["N2", "N"])?;
    history.record(Time::new::<second>(t), &gas, &state)?;
    while t <= t_final {
        let step = reactor.update_state(&state, dt, dt_suggest)?;
        state = step.state;
        dt_suggest = step.dt_suggest;
        t += dt.get::<second>();
        history.record(Time::new::<second>(t), &gas, &state)?;
    }
    history.finish()?;
    println!("# Done.");

    Ok(())
}
