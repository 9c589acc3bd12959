use thiserror::Error;

use crate::support::ode::OdeError;

/// Errors that can occur while advancing a reactor.
#[derive(Debug, Error)]
pub enum ReactorError {
    /// The time interval must be positive and finite.
    #[error("reactor interval must be positive and finite, got {dt} s")]
    InvalidInterval { dt: f64 },

    /// A [`ReactorConfig`](super::ReactorConfig) setting is out of range.
    #[error("reactor config `{field}` = {value} must be {requirement}")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        requirement: &'static str,
    },

    /// The mechanism was built for a different gas model.
    #[error("mechanism has {mechanism} species but the gas model has {gas}")]
    SpeciesMismatch { mechanism: usize, gas: usize },

    /// The adaptive substep fell below the configured minimum.
    #[error("substep {dt:e} s fell below the minimum at t = {t:e} s")]
    StepSizeUnderflow { t: f64, dt: f64 },

    /// The substep budget ran out before the end of the interval.
    #[error("exceeded {limit} substeps")]
    TooManySubsteps { limit: usize },

    /// A thermodynamic model operation failed.
    #[error("thermodynamic model failed: {context}")]
    Thermo {
        context: String,

        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ReactorError {
    pub(super) fn thermo_failed(
        context: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Thermo {
            context: context.into(),
            source: Box::new(err),
        }
    }
}

impl From<OdeError> for ReactorError {
    fn from(err: OdeError) -> Self {
        match err {
            OdeError::StepSizeUnderflow { t, h } => Self::StepSizeUnderflow { t, dt: h },
            OdeError::TooManySteps { limit } => Self::TooManySubsteps { limit },
            OdeError::InvalidStep { h } => Self::InvalidInterval { dt: h },
        }
    }
}
