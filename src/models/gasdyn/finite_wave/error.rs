use thiserror::Error;

/// Errors that can occur while integrating across a finite wave.
#[derive(Debug, Error)]
pub enum FiniteWaveError {
    /// The number of integration steps must be at least one.
    #[error("finite-wave integration needs at least one step, got {steps}")]
    InvalidSteps { steps: usize },

    /// The target pressure must be positive and finite.
    #[error("finite-wave target pressure must be positive and finite, got {pressure} Pa")]
    InvalidPressure { pressure: f64 },

    /// The characteristic name is neither `cplus` nor `cminus`.
    #[error("unknown characteristic {name:?}, expected \"cplus\" or \"cminus\"")]
    InvalidCharacteristic { name: String },

    /// A thermodynamic model operation failed.
    #[error("thermodynamic model failed: {context}")]
    Thermo {
        context: String,

        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl FiniteWaveError {
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
