//! Measles immunity heuristic.
//!
//! CDC guidance treats birth before 1957 as presumptive evidence of immunity,
//! since nearly everyone was infected naturally before a vaccine existed. For
//! later birth years the estimate comes from the number of doses received
//! before age six.

use serde::{Deserialize, Serialize};

use super::{EstimateError, ImmunityEstimate, MessageKey};

/// Births before this year are presumed immune.
pub const PRESUMPTIVE_IMMUNITY_CUTOFF: i32 = 1957;

/// Earliest birth year accepted as a plausible living person.
pub const EARLIEST_BIRTH_YEAR: i32 = 1850;

/// Latest birth year accepted. Bounds the input without consulting the clock.
pub const LATEST_BIRTH_YEAR: i32 = 2100;

/// Observed immunity after one on-time dose.
const ONE_DOSE_IMMUNITY: f64 = 0.93;

/// Observed immunity after two on-time doses. No figure exists beyond two.
const TWO_DOSE_IMMUNITY: f64 = 0.97;

/// Per-request input for the measles estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeaslesInput {
    pub birth_year: i32,
    #[serde(default)]
    pub on_time_doses: Option<i32>,
}

impl MeaslesInput {
    pub fn new(birth_year: i32, on_time_doses: Option<i32>) -> Self {
        Self {
            birth_year,
            on_time_doses,
        }
    }
}

/// Estimates the probability of measles immunity.
///
/// A missing dose count and a count of zero are treated the same way. Negative
/// counts and birth years outside [`EARLIEST_BIRTH_YEAR`]..=[`LATEST_BIRTH_YEAR`]
/// are rejected.
pub fn estimate(input: MeaslesInput) -> Result<ImmunityEstimate, EstimateError> {
    let MeaslesInput {
        birth_year,
        on_time_doses,
    } = input;

    if !(EARLIEST_BIRTH_YEAR..=LATEST_BIRTH_YEAR).contains(&birth_year) {
        return Err(EstimateError::InvalidBirthYear {
            year: birth_year,
            earliest: EARLIEST_BIRTH_YEAR,
            latest: LATEST_BIRTH_YEAR,
        });
    }
    let doses = match on_time_doses {
        Some(count) if count < 0 => return Err(EstimateError::InvalidDoseCount { count }),
        Some(count) => count as u32,
        None => 0,
    };

    if birth_year < PRESUMPTIVE_IMMUNITY_CUTOFF {
        return Ok(ImmunityEstimate::new(1.0, MessageKey::Pre1957));
    }

    let (probability, message) = match doses {
        0 => (0.0, MessageKey::NoImmunizations),
        1 => (ONE_DOSE_IMMUNITY, MessageKey::HasImmunizations),
        2 => (TWO_DOSE_IMMUNITY, MessageKey::HasImmunizations),
        _ => (TWO_DOSE_IMMUNITY, MessageKey::TooManyShots),
    };
    Ok(ImmunityEstimate::new(probability, message))
}
