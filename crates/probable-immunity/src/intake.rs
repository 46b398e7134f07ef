use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::illnesses::measles::EARLIEST_BIRTH_YEAR;

/// Raw intake form as submitted by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImmunityForm {
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub on_time_measles_vaccinations: Option<i32>,
}

/// Form contents that passed field validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedForm {
    pub birth_year: i32,
    pub on_time_measles_vaccinations: Option<i32>,
}

/// Field-level validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl FormErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (*field, messages.as_slice()))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in self.fields() {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

impl ImmunityForm {
    /// Checks every field against `reference_year` (normally the current year),
    /// collecting all problems rather than stopping at the first one.
    pub fn validate(&self, reference_year: i32) -> Result<ValidatedForm, FormErrors> {
        let mut errors = FormErrors::default();

        match self.birth_year {
            None => errors.push("birth_year", "This field is required."),
            Some(year) if year > reference_year => {
                errors.push("birth_year", format!("Birth year cannot be after {reference_year}."))
            }
            Some(year) if year < EARLIEST_BIRTH_YEAR => errors.push(
                "birth_year",
                format!("Birth year cannot be before {EARLIEST_BIRTH_YEAR}."),
            ),
            Some(_) => {}
        }

        if let Some(count) = self.on_time_measles_vaccinations {
            if count < 0 {
                errors.push(
                    "on_time_measles_vaccinations",
                    "Number of vaccinations cannot be negative.",
                );
            }
        }

        match self.birth_year {
            Some(birth_year) if errors.is_empty() => Ok(ValidatedForm {
                birth_year,
                on_time_measles_vaccinations: self.on_time_measles_vaccinations,
            }),
            _ => Err(errors),
        }
    }
}
