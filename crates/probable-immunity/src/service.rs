use std::sync::Arc;

use tracing::info;

use crate::assessment::{assess, ImmunityAssessment};
use crate::config::IntakeConfig;
use crate::illnesses::IllnessRegistry;
use crate::intake::{FormErrors, ImmunityForm};

/// Validates submitted forms and runs them through the illness registry.
///
/// Holds no per-request state; everything a request needs travels in the form.
#[derive(Clone)]
pub struct ImmunityService {
    registry: Arc<IllnessRegistry>,
    intake: IntakeConfig,
}

impl ImmunityService {
    pub fn new(registry: Arc<IllnessRegistry>, intake: IntakeConfig) -> Self {
        Self { registry, intake }
    }

    pub fn illness_names(&self) -> Vec<&'static str> {
        self.registry.names()
    }

    pub fn evaluate(&self, form: &ImmunityForm) -> Result<ImmunityAssessment, FormErrors> {
        let validated = form.validate(self.intake.reference_year())?;
        let assessment = assess(&self.registry, &validated);
        info!(
            birth_year = assessment.birth_year,
            illnesses = assessment.illnesses.len(),
            "immunity assessment completed"
        );
        Ok(assessment)
    }
}
