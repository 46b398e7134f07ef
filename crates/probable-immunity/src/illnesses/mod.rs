//! Illness estimators and the registry the service iterates over.
//!
//! Each illness pulls its own typed input out of the shared intake form and
//! turns it into an [`ImmunityEstimate`]. Estimators are stateless, so the
//! registry can be shared across requests without locking.

pub mod measles;

use serde::{Deserialize, Serialize};

use crate::intake::ValidatedForm;
pub use measles::MeaslesInput;

/// Abstract explanation attached to an estimate. Rendering is left to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKey {
    #[serde(rename = "PRE_1957")]
    Pre1957,
    NoImmunizations,
    HasImmunizations,
    TooManyShots,
}

impl MessageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKey::Pre1957 => "PRE_1957",
            MessageKey::NoImmunizations => "NO_IMMUNIZATIONS",
            MessageKey::HasImmunizations => "HAS_IMMUNIZATIONS",
            MessageKey::TooManyShots => "TOO_MANY_SHOTS",
        }
    }
}

impl std::fmt::Display for MessageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probability of immunity plus the key explaining how it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImmunityEstimate {
    pub probability: f64,
    pub message: MessageKey,
}

impl ImmunityEstimate {
    pub(crate) fn new(probability: f64, message: MessageKey) -> Self {
        Self {
            probability,
            message,
        }
    }
}

/// Input rejected by an estimator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EstimateError {
    #[error("birth year {year} is outside {earliest}..={latest}")]
    InvalidBirthYear {
        year: i32,
        earliest: i32,
        latest: i32,
    },
    #[error("dose count {count} cannot be negative")]
    InvalidDoseCount { count: i32 },
}

/// Typed input for a single illness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "illness", rename_all = "snake_case")]
pub enum IllnessInput {
    Measles(MeaslesInput),
}

/// Uniform interface implemented once per illness.
pub trait Illness: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract_input(&self, form: &ValidatedForm) -> IllnessInput;
    fn estimate(&self, input: &IllnessInput) -> Result<ImmunityEstimate, EstimateError>;
}

/// Measles estimator backed by [`measles::estimate`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Measles;

impl Illness for Measles {
    fn name(&self) -> &'static str {
        "measles"
    }

    fn extract_input(&self, form: &ValidatedForm) -> IllnessInput {
        IllnessInput::Measles(MeaslesInput::new(
            form.birth_year,
            form.on_time_measles_vaccinations,
        ))
    }

    fn estimate(&self, input: &IllnessInput) -> Result<ImmunityEstimate, EstimateError> {
        match input {
            IllnessInput::Measles(input) => measles::estimate(*input),
        }
    }
}

/// Ordered collection of the illnesses offered to users.
pub struct IllnessRegistry {
    illnesses: Vec<Box<dyn Illness>>,
}

impl IllnessRegistry {
    pub fn new(illnesses: Vec<Box<dyn Illness>>) -> Self {
        Self { illnesses }
    }

    pub fn standard() -> Self {
        Self::new(vec![Box::new(Measles)])
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.illnesses.iter().map(|illness| illness.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Illness> {
        self.illnesses.iter().map(|illness| illness.as_ref())
    }

    pub fn len(&self) -> usize {
        self.illnesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.illnesses.is_empty()
    }
}
