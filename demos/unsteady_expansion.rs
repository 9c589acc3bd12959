//! Finite-wave expansion of ideal air along a `C+` characteristic.
//!
//! Run with `cargo run --example unsteady_expansion`.

use std::error::Error;

use simplelog::{Config, LevelFilter, SimpleLogger};
use twine_gasdyn::{
    models::gasdyn::{Characteristic, DEFAULT_DV_STEPS, DEFAULT_T_MIN, FiniteWave},
    support::thermo::{
        State,
        capability::{HasPressure, HasSoundSpeed, StateFrom},
        fluid::Air,
        model::PerfectGas,
    },
};
use uom::si::{
    f64::{Pressure, ThermodynamicTemperature, Velocity},
    mass_density::kilogram_per_cubic_meter,
    pressure::{kilopascal, pascal},
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

fn describe(air: &PerfectGas<Air>, state: &State<Air>) -> Result<String, Box<dyn Error>> {
    Ok(format!(
        "p={:.6} Pa, T={:.6} K, rho={:.6} kg/m^3, a={:.6} m/s",
        air.pressure(state)?.get::<pascal>(),
        state.temperature.get::<kelvin>(),
        state.density.get::<kilogram_per_cubic_meter>(),
        air.sound_speed(state)?.get::<meter_per_second>(),
    ))
}

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::init(LevelFilter::Info, Config::default())?;

    println!("Unsteady expansion.");
    let air = PerfectGas::<Air>::new()?;
    let gamma = air.gamma();
    let state1: State<Air> = air.state_from((
        ThermodynamicTemperature::new::<kelvin>(320.0),
        Pressure::new::<kilopascal>(100.0),
    ))?;
    println!("  state1: {}", describe(&air, &state1)?);

    let v1 = Velocity::new::<meter_per_second>(0.0);
    let a1 = air.sound_speed(&state1)?.get::<meter_per_second>();
    let j_plus = v1.get::<meter_per_second>() + 2.0 * a1 / (gamma - 1.0);
    println!("  v1={} jplus={j_plus}", v1.get::<meter_per_second>());

    let wave = FiniteWave::new(&air);

    println!("Finite wave process along a cplus characteristic, stepping in pressure.");
    let by_pressure = wave.dp(
        &state1,
        v1,
        Characteristic::CPlus,
        Pressure::new::<kilopascal>(60.0),
        500,
    )?;
    let a2 = air.sound_speed(&by_pressure.state)?.get::<meter_per_second>();
    println!("  v2={}", by_pressure.velocity.get::<meter_per_second>());
    println!("  state2: {}", describe(&air, &by_pressure.state)?);
    println!("  ideal v2={}", j_plus - 2.0 * a2 / (gamma - 1.0));

    println!("Finite wave process along a cplus characteristic, stepping in velocity.");
    let by_velocity = wave.dv(
        &state1,
        v1,
        Characteristic::CPlus,
        Velocity::new::<meter_per_second>(125.0),
        DEFAULT_DV_STEPS,
        ThermodynamicTemperature::new::<kelvin>(DEFAULT_T_MIN),
    )?;
    let a2 = air.sound_speed(&by_velocity.state)?.get::<meter_per_second>();
    println!("  v2={}", by_velocity.velocity.get::<meter_per_second>());
    println!("  state2: {}", describe(&air, &by_velocity.state)?);
    println!("  ideal v2={}", j_plus - 2.0 * a2 / (gamma - 1.0));

    Ok(())
}
