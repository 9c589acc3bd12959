//! Gas-model files.
//!
//! A gas-model file is JSON listing the species of a mixture and, optionally,
//! the temperature bounds used for state inversion:
//!
//! ```json
//! {
//!   "species": [
//!     {
//!       "name": "N2",
//!       "molar_mass": 0.0280134,
//!       "thermo": {
//!         "t_min": 200.0, "t_mid": 1000.0, "t_max": 6000.0,
//!         "low":  [3.298677, 1.4082404e-3, -3.963222e-6, 5.641515e-9, -2.444854e-12, -1020.8999, 3.950372],
//!         "high": [2.92664, 1.4879768e-3, -5.68476e-7, 1.0097038e-10, -6.753351e-15, -922.7977, 5.980528]
//!       },
//!       "transport": {
//!         "viscosity":    { "reference": 1.663e-5, "t_ref": 273.0, "sutherland": 107.0 },
//!         "conductivity": { "reference": 0.0242,   "t_ref": 273.0, "sutherland": 150.0 }
//!       }
//!     }
//!   ],
//!   "temperature_bounds": [20.0, 100000.0]
//! }
//! ```
//!
//! Molar masses are in kg/mol; all other values are SI.

use std::{fs, path::Path};

use log::debug;
use serde::Deserialize;
use thiserror::Error;
use uom::si::{f64::MolarMass, molar_mass::kilogram_per_mole};

use super::{
    super::transport::SutherlandTransport,
    ThermallyPerfectGas,
    species::{Nasa7, Species},
};

/// Errors raised while loading a gas model or reaction mechanism.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the expected schema.
    #[error("failed to parse {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The file parsed but describes an invalid model.
    #[error("invalid model definition: {context}")]
    Invalid { context: String },
}

impl ConfigError {
    pub(crate) fn invalid(context: impl Into<String>) -> Self {
        Self::Invalid {
            context: context.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GasModelFile {
    species: Vec<SpeciesRecord>,
    #[serde(default)]
    temperature_bounds: Option<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SpeciesRecord {
    name: String,
    molar_mass: f64,
    thermo: Nasa7,
    #[serde(default)]
    transport: Option<SutherlandTransport>,
}

/// Reads a file to a string, tagging failures with the path.
pub(crate) fn read_to_string(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

impl ThermallyPerfectGas {
    /// Loads a gas model from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or if
    /// the species data are invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = read_to_string(path)?;
        let gas = Self::parse(&text, &path.display().to_string())?;
        debug!(
            "loaded gas model {} with species {:?}",
            path.display(),
            gas.species_names().collect::<Vec<_>>()
        );
        Ok(gas)
    }

    /// Builds a gas model from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text cannot be parsed or the species
    /// data are invalid.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text, "<string>")
    }

    fn parse(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let file: GasModelFile = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;

        let species = file
            .species
            .into_iter()
            .map(|record| {
                Species::new(
                    record.name,
                    MolarMass::new::<kilogram_per_mole>(record.molar_mass),
                    record.thermo,
                    record.transport,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let gas = Self::new(species)?;
        match file.temperature_bounds {
            Some([t_lo, t_hi]) => gas.with_temperature_bounds(t_lo, t_hi),
            None => Ok(gas),
        }
    }
}
