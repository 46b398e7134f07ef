//! Probable immunity estimation for childhood illnesses.
//!
//! The [`illnesses`] module holds the pure estimators; [`intake`] and
//! [`assessment`] connect them to a submitted form.

pub mod assessment;
pub mod config;
pub mod error;
pub mod illnesses;
pub mod intake;
pub mod service;
pub mod telemetry;

pub use assessment::{assess, IllnessAssessment, IllnessOutcome, ImmunityAssessment};
pub use illnesses::{
    EstimateError, Illness, IllnessInput, IllnessRegistry, ImmunityEstimate, MessageKey,
};
pub use intake::{FormErrors, ImmunityForm, ValidatedForm};
pub use service::ImmunityService;
