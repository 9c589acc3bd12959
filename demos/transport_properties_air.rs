//! Viscosity and thermal conductivity of N2/O2 air from 200 K to 20 000 K.
//!
//! Writes `trans-props-air.dat` in the working directory.
//! Run with `cargo run --example transport_properties_air`.

use std::error::Error;

use simplelog::{Config, LevelFilter, SimpleLogger};
use twine_gasdyn::support::{
    report::TransportTable,
    thermo::{capability::StateFrom, model::ThermallyPerfectGas},
};
use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

const GAS_MODEL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/thermally-perfect-N2-O2.json");
const OUTPUT: &str = "trans-props-air.dat";

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::init(LevelFilter::Info, Config::default())?;

    let gas = ThermallyPerfectGas::from_file(GAS_MODEL)?;
    let composition = gas.composition_from_named_mass_fractions(&[("N2", 0.78), ("O2", 0.22)])?;
    let p = Pressure::new::<pascal>(1.0e5);

    let low_t = 200.0;
    let delta_t = 100.0;

    println!("Opening file for writing: {OUTPUT}");
    let mut table = TransportTable::create(OUTPUT)?;
    for i in 0..=198_u32 {
        let t = ThermodynamicTemperature::new::<kelvin>(low_t + delta_t * f64::from(i));
        let state = gas.state_from((composition.clone(), t, p))?;
        table.record(&gas, &state)?;
    }
    table.finish()?;
    println!("File closed. Done.");

    Ok(())
}
