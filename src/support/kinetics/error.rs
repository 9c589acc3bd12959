use thiserror::Error;

use crate::support::thermo::model::ConfigError;

/// Errors raised while building a reaction mechanism.
#[derive(Debug, Error)]
pub enum MechanismError {
    /// The mechanism file could not be read or parsed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The reaction equation is malformed.
    #[error("malformed equation `{equation}`: {reason}")]
    Equation { equation: String, reason: String },

    /// The equation names a species the gas model does not have.
    #[error("equation `{equation}` refers to unknown species {species}")]
    UnknownSpecies { equation: String, species: String },

    /// A reaction refers to a species index outside the mechanism.
    #[error("reaction `{equation}` does not fit a mechanism of {n_species} species")]
    SpeciesOutOfRange { equation: String, n_species: usize },

    /// Rate or third-body data are invalid.
    #[error("invalid rate data for `{equation}`: {reason}")]
    Rate { equation: String, reason: String },
}

impl MechanismError {
    pub(crate) fn equation(equation: &str, reason: impl Into<String>) -> Self {
        Self::Equation {
            equation: equation.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn rate(equation: &str, reason: impl Into<String>) -> Self {
        Self::Rate {
            equation: equation.to_string(),
            reason: reason.into(),
        }
    }
}
