//! Plain-text result files.
//!
//! Columns are written with C `printf` conversions (`%W.Pe`, `%W.Pf`) so the
//! files line up with those produced by other gas-dynamics tools and can be
//! read by the usual plotting scripts.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use thiserror::Error;
use uom::si::{
    dynamic_viscosity::pascal_second,
    f64::Time,
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
    time::second,
};

use crate::support::thermo::{
    PropertyError, State,
    capability::{HasPressure, HasThermalConductivity, HasViscosity, ThermoModel},
    model::{Composition, ThermallyPerfectGas},
};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error("species {name} is not in the gas model")]
    UnknownSpecies { name: String },
}

/// Formats `x` like C's `%{width}.{precision}e`.
///
/// The exponent always has a sign and at least two digits.
///
/// ```
/// use twine_gasdyn::support::report::format_sci;
///
/// assert_eq!(format_sci(1.0e-6, 3, 10), " 1.000e-06");
/// assert_eq!(format_sci(-123.456, 2, 0), "-1.23e+02");
/// ```
#[must_use]
pub fn format_sci(x: f64, precision: usize, width: usize) -> String {
    if !x.is_finite() {
        let text = if x.is_nan() {
            "nan".to_string()
        } else if x > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
        return format!("{text:>width$}");
    }

    let raw = format!("{x:.precision$e}");
    let text = match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => raw,
    };
    format!("{text:>width$}")
}

/// Formats `x` like C's `%{width}.{precision}f`.
#[must_use]
pub fn format_fixed(x: f64, precision: usize, width: usize) -> String {
    format!("{x:>width$.precision$}")
}

/// Time history of a reactor run, one line per record.
///
/// The file has seven columns: time, temperature, pressure, then the mass
/// fraction and the molar concentration of two chosen species.
///
/// ```text
/// # 1:t(s)  2:T(K)  3:p(Pa)  4:massf_N2  5:massf_N  6:conc_N2  7:conc_N
///  0.000e+00   4000.000  1.000e+05   8.000000000000e-01 ...
/// ```
#[derive(Debug)]
pub struct ReactorHistory<W: Write> {
    writer: W,
    species: [usize; 2],
}

impl ReactorHistory<BufWriter<File>> {
    /// Creates a history file at `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the file cannot be created or a species
    /// name is unknown.
    pub fn create(
        path: impl AsRef<Path>,
        gas: &ThermallyPerfectGas,
        species: [&str; 2],
    ) -> Result<Self, ReportError> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), gas, species)
    }
}

impl<W: Write> ReactorHistory<W> {
    /// Wraps `writer` and writes the header line.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if writing fails or a species name is unknown.
    pub fn new(
        mut writer: W,
        gas: &ThermallyPerfectGas,
        species: [&str; 2],
    ) -> Result<Self, ReportError> {
        let index = |name: &str| {
            gas.species_index(name)
                .ok_or_else(|| ReportError::UnknownSpecies {
                    name: name.to_string(),
                })
        };
        let indices = [index(species[0])?, index(species[1])?];

        let [a, b] = species;
        writeln!(
            writer,
            "# 1:t(s)  2:T(K)  3:p(Pa)  4:massf_{a}  5:massf_{b}  6:conc_{a}  7:conc_{b}"
        )?;
        Ok(Self {
            writer,
            species: indices,
        })
    }

    /// Appends one line for `state` at time `t`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if a property cannot be evaluated or writing fails.
    pub fn record(
        &mut self,
        t: Time,
        gas: &ThermallyPerfectGas,
        state: &State<Composition>,
    ) -> Result<(), ReportError> {
        let p = gas.pressure(state)?.get::<pascal>();
        let y = state.fluid.mass_fractions();
        let conc = gas.concentrations_si(state.density.get::<kilogram_per_cubic_meter>(), y);
        let [a, b] = self.species;

        writeln!(
            self.writer,
            "{} {} {} {} {} {} {}",
            format_sci(t.get::<second>(), 3, 10),
            format_fixed(state.temperature.get::<kelvin>(), 3, 10),
            format_sci(p, 3, 10),
            format_sci(y[a], 12, 20),
            format_sci(y[b], 12, 20),
            format_sci(conc[a], 12, 20),
            format_sci(conc[b], 12, 20),
        )?;
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if flushing fails.
    pub fn finish(mut self) -> Result<W, ReportError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Table of temperature, viscosity, and thermal conductivity.
#[derive(Debug)]
pub struct TransportTable<W: Write> {
    writer: W,
}

impl TransportTable<BufWriter<File>> {
    /// Creates a table file at `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if the file cannot be created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        Self::new(BufWriter::new(File::create(path)?))
    }
}

impl<W: Write> TransportTable<W> {
    /// Wraps `writer` and writes the header line.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if writing fails.
    pub fn new(mut writer: W) -> Result<Self, ReportError> {
        writeln!(writer, "#  1:T[K]      2:mu[Pa.s]      3:k[W/(m.K)]")?;
        Ok(Self { writer })
    }

    /// Appends the transport coefficients of `state`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if a coefficient is undefined or writing fails.
    pub fn record<M>(&mut self, model: &M, state: &State<M::Fluid>) -> Result<(), ReportError>
    where
        M: ThermoModel + HasViscosity + HasThermalConductivity,
    {
        let mu = model.viscosity(state)?.get::<pascal_second>();
        let k = model.thermal_conductivity(state)?.get::<watt_per_meter_kelvin>();
        writeln!(
            self.writer,
            " {} {} {}",
            format_sci(state.temperature.get::<kelvin>(), 6, 12),
            format_sci(mu, 6, 12),
            format_sci(k, 6, 12),
        )?;
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if flushing fails.
    pub fn finish(mut self) -> Result<W, ReportError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
