use serde::Deserialize;

use crate::support::{
    constraint::{Constraint, NonNegative, StrictlyPositive},
    ode::{IntegrationLimits, StepControl},
};

use super::ReactorError;

/// Substep integration method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    #[default]
    Rkf45,
    AlphaQss,
}

/// Integration settings for [`ThermochemicalReactor`](super::ThermochemicalReactor).
///
/// Every field has a default, so a JSON object only needs the ones it
/// overrides:
///
/// ```
/// use twine_gasdyn::models::kinetics::{Method, ReactorConfig};
///
/// let config: ReactorConfig = serde_json::from_str(r#"{ "method": "alpha_qss" }"#).unwrap();
/// assert_eq!(config.method, Method::AlphaQss);
/// assert_eq!(config.max_substeps, 100_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReactorConfig {
    pub method: Method,

    /// Maximum trial substeps per call, accepted or rejected.
    pub max_substeps: usize,

    pub rel_tol: f64,

    /// Absolute concentration tolerance, in mol/m³.
    pub abs_tol: f64,

    /// Smallest substep before giving up, in seconds.
    pub min_step: f64,

    pub max_growth: f64,
    pub safety: f64,
}

impl Default for ReactorConfig {
    fn default() -> Self {
        let control = StepControl::default();
        let limits = IntegrationLimits::default();
        Self {
            method: Method::default(),
            max_substeps: limits.max_steps,
            rel_tol: control.rel_tol,
            abs_tol: control.abs_tol,
            min_step: limits.min_step,
            max_growth: control.max_growth,
            safety: control.safety,
        }
    }
}

impl ReactorConfig {
    /// Checks that every setting is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ReactorError::InvalidConfig`] naming the first bad setting.
    pub fn validate(&self) -> Result<(), ReactorError> {
        let invalid =
            |field: &'static str, value: f64, requirement: &'static str| ReactorError::InvalidConfig {
                field,
                value,
                requirement,
            };

        for (field, value) in [("rel_tol", self.rel_tol), ("abs_tol", self.abs_tol)] {
            if StrictlyPositive::check(&value).is_err() || !value.is_finite() {
                return Err(invalid(field, value, "positive and finite"));
            }
        }
        if NonNegative::check(&self.min_step).is_err() || !self.min_step.is_finite() {
            return Err(invalid("min_step", self.min_step, "non-negative and finite"));
        }
        if !(self.max_growth >= 1.0 && self.max_growth.is_finite()) {
            return Err(invalid("max_growth", self.max_growth, "at least 1 and finite"));
        }
        if StrictlyPositive::check(&self.safety).is_err() || self.safety > 1.0 {
            return Err(invalid("safety", self.safety, "in (0, 1]"));
        }
        Ok(())
    }

    pub(super) fn step_control(&self) -> StepControl {
        StepControl {
            rel_tol: self.rel_tol,
            abs_tol: self.abs_tol,
            safety: self.safety,
            max_growth: self.max_growth,
        }
    }

    pub(super) fn limits(&self) -> IntegrationLimits {
        IntegrationLimits {
            max_steps: self.max_substeps,
            min_step: self.min_step,
        }
    }
}
