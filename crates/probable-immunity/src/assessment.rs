use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::illnesses::{EstimateError, IllnessRegistry, ImmunityEstimate, MessageKey};
use crate::intake::ValidatedForm;

/// Outcome for one illness. Failures stay local to the illness that raised them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IllnessOutcome {
    Estimated(ImmunityEstimate),
    Unknown { reason: String },
}

impl IllnessOutcome {
    pub fn probability(&self) -> Option<f64> {
        match self {
            IllnessOutcome::Estimated(estimate) => Some(estimate.probability),
            IllnessOutcome::Unknown { .. } => None,
        }
    }

    pub fn message(&self) -> Option<MessageKey> {
        match self {
            IllnessOutcome::Estimated(estimate) => Some(estimate.message),
            IllnessOutcome::Unknown { .. } => None,
        }
    }
}

impl From<Result<ImmunityEstimate, EstimateError>> for IllnessOutcome {
    fn from(value: Result<ImmunityEstimate, EstimateError>) -> Self {
        match value {
            Ok(estimate) => IllnessOutcome::Estimated(estimate),
            Err(err) => IllnessOutcome::Unknown {
                reason: err.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IllnessAssessment {
    pub illness: String,
    pub outcome: IllnessOutcome,
}

/// Per-illness results for a single submitted form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImmunityAssessment {
    pub birth_year: i32,
    pub illnesses: Vec<IllnessAssessment>,
}

impl ImmunityAssessment {
    pub fn get(&self, illness: &str) -> Option<&IllnessOutcome> {
        self.illnesses
            .iter()
            .find(|entry| entry.illness == illness)
            .map(|entry| &entry.outcome)
    }
}

/// Runs every registered illness against the form.
pub fn assess(registry: &IllnessRegistry, form: &ValidatedForm) -> ImmunityAssessment {
    let illnesses = registry
        .iter()
        .map(|illness| {
            let input = illness.extract_input(form);
            let result = illness.estimate(&input);
            match &result {
                Ok(estimate) => debug!(
                    illness = illness.name(),
                    probability = estimate.probability,
                    message = %estimate.message,
                    "immunity estimated"
                ),
                Err(err) => warn!(illness = illness.name(), error = %err, "immunity estimate failed"),
            }
            IllnessAssessment {
                illness: illness.name().to_string(),
                outcome: result.into(),
            }
        })
        .collect();

    ImmunityAssessment {
        birth_year: form.birth_year,
        illnesses,
    }
}
