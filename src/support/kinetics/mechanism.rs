//! Reaction mechanisms and their JSON files.
//!
//! ```json
//! {
//!   "reactions": [
//!     {
//!       "equation": "N2 + N2 <=> N + N + N2",
//!       "forward": { "A": 7.0e15, "n": -1.6, "C": 113200.0 }
//!     },
//!     {
//!       "equation": "2 O + M <=> O2 + M",
//!       "forward": { "A": 1.2e5, "n": -1.0, "C": 0.0 },
//!       "backward": { "A": 3.6e12, "n": -1.0, "C": 59400.0 },
//!       "efficiencies": { "O2": 1.0, "O": 5.0 }
//!     }
//!   ]
//! }
//! ```
//!
//! Without `backward`, a reversible reaction takes its backward rate from the
//! equilibrium constant. Species missing from `efficiencies` count with
//! efficiency 1.

use std::{collections::BTreeMap, path::Path};

use log::debug;
use serde::Deserialize;

use crate::support::thermo::model::{
    ConfigError, ThermallyPerfectGas, thermally_perfect::read_to_string,
};

use super::{
    ArrheniusRate, BackwardRate, MechanismError, Reaction, equation::EquationParser,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MechanismFile {
    reactions: Vec<ReactionRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReactionRecord {
    equation: String,
    forward: ArrheniusRate,
    #[serde(default)]
    backward: Option<ArrheniusRate>,
    #[serde(default)]
    efficiencies: Option<BTreeMap<String, f64>>,
}

/// Forward and backward rate coefficients, one entry per reaction.
#[derive(Debug, Clone, PartialEq)]
pub struct RateConstants {
    pub forward: Vec<f64>,
    pub backward: Vec<f64>,
}

/// A set of reactions over the species of one gas model.
#[derive(Debug, Clone, PartialEq)]
pub struct Mechanism {
    reactions: Vec<Reaction>,
    n_species: usize,
}

impl Mechanism {
    /// Loads a mechanism from a JSON file, resolving species against `gas`.
    ///
    /// # Errors
    ///
    /// Returns [`MechanismError`] if the file cannot be read or parsed, or
    /// if any reaction is invalid for `gas`.
    pub fn from_file(path: impl AsRef<Path>, gas: &ThermallyPerfectGas) -> Result<Self, MechanismError> {
        let path = path.as_ref();
        let text = read_to_string(path)?;
        let mechanism = Self::parse(&text, &path.display().to_string(), gas)?;
        debug!(
            "loaded mechanism {} with {} reactions",
            path.display(),
            mechanism.n_reactions()
        );
        Ok(mechanism)
    }

    /// Builds a mechanism from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`MechanismError`] if the text cannot be parsed or any
    /// reaction is invalid for `gas`.
    pub fn from_json_str(text: &str, gas: &ThermallyPerfectGas) -> Result<Self, MechanismError> {
        Self::parse(text, "<string>", gas)
    }

    fn parse(text: &str, origin: &str, gas: &ThermallyPerfectGas) -> Result<Self, MechanismError> {
        let file: MechanismFile = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;

        let names: Vec<&str> = gas.species_names().collect();
        let parser = EquationParser::new()
            .map_err(|err| MechanismError::equation("", format!("parser setup: {err}")))?;

        let reactions = file
            .reactions
            .into_iter()
            .map(|record| build_reaction(&parser, record, &names))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            reactions,
            n_species: names.len(),
        })
    }

    /// Creates a mechanism from already-built reactions.
    ///
    /// # Errors
    ///
    /// Returns [`MechanismError::SpeciesOutOfRange`] if a reaction refers to
    /// a species index at or above `n_species`.
    pub fn new(reactions: Vec<Reaction>, n_species: usize) -> Result<Self, MechanismError> {
        if let Some(reaction) = reactions.iter().find(|r| !r.fits(n_species)) {
            return Err(MechanismError::SpeciesOutOfRange {
                equation: reaction.label().to_string(),
                n_species,
            });
        }
        Ok(Self {
            reactions,
            n_species,
        })
    }

    #[must_use]
    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    #[must_use]
    pub fn n_reactions(&self) -> usize {
        self.reactions.len()
    }

    /// Number of species the mechanism was resolved against.
    #[must_use]
    pub fn n_species(&self) -> usize {
        self.n_species
    }

    /// Evaluates every rate coefficient at temperature `t`.
    #[must_use]
    pub fn rate_constants(&self, gas: &ThermallyPerfectGas, t: f64) -> RateConstants {
        let (forward, backward) = self
            .reactions
            .iter()
            .map(|reaction| reaction.rate_constants(gas, t))
            .unzip();
        RateConstants { forward, backward }
    }

    /// Fills production `q` and loss `l` for concentrations `conc`.
    ///
    /// Both slices are overwritten.
    pub fn rates(&self, k: &RateConstants, conc: &[f64], q: &mut [f64], l: &mut [f64]) {
        q.fill(0.0);
        l.fill(0.0);
        for (i, reaction) in self.reactions.iter().enumerate() {
            reaction.accumulate(k.forward[i], k.backward[i], conc, q, l);
        }
    }

    /// Net molar production rate `q − L` of each species.
    #[must_use]
    pub fn net_production(&self, k: &RateConstants, conc: &[f64]) -> Vec<f64> {
        let mut q = vec![0.0; self.n_species];
        let mut l = vec![0.0; self.n_species];
        self.rates(k, conc, &mut q, &mut l);
        q.iter().zip(&l).map(|(q, l)| q - l).collect()
    }
}

fn build_reaction(
    parser: &EquationParser,
    record: ReactionRecord,
    names: &[&str],
) -> Result<Reaction, MechanismError> {
    let label = record.equation.trim().to_string();
    let equation = parser.parse(&label, names)?;

    if !record.forward.is_valid() {
        return Err(MechanismError::rate(&label, "forward rate must be finite with A ≥ 0"));
    }

    let backward = match (record.backward, equation.reversible) {
        (Some(_), false) => {
            return Err(MechanismError::rate(
                &label,
                "an irreversible reaction cannot have a backward rate",
            ));
        }
        (Some(rate), true) if !rate.is_valid() => {
            return Err(MechanismError::rate(&label, "backward rate must be finite with A ≥ 0"));
        }
        (Some(rate), true) => BackwardRate::Explicit(rate),
        (None, true) => BackwardRate::FromEquilibrium,
        (None, false) => BackwardRate::Irreversible,
    };

    let efficiencies = match record.efficiencies {
        None => None,
        Some(_) if !equation.third_body => {
            return Err(MechanismError::rate(
                &label,
                "efficiencies require a third body M in the equation",
            ));
        }
        Some(map) => {
            let mut eff = vec![1.0; names.len()];
            for (name, value) in map {
                let index = names.iter().position(|s| *s == name).ok_or_else(|| {
                    MechanismError::UnknownSpecies {
                        equation: label.clone(),
                        species: name.clone(),
                    }
                })?;
                if !(value.is_finite() && value >= 0.0) {
                    return Err(MechanismError::rate(
                        &label,
                        format!("efficiency of {name} must be non-negative"),
                    ));
                }
                eff[index] = value;
            }
            Some(eff)
        }
    };

    Ok(Reaction::new(label, equation, record.forward, backward, efficiencies))
}
