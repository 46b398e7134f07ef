//! User-facing text for assessment results.

use probable_immunity::{IllnessOutcome, ImmunityAssessment, MessageKey};
use serde::Serialize;

const MMR_CITATION_TITLE: &str =
    "CDC - Measles, Mumps, and Rubella (MMR) Vaccination: What Everyone Should Know";
const MMR_CITATION_URL: &str = "https://www.cdc.gov/vaccines/vpd/mmr/public/index.html";

const PRESUMPTIVE_EVIDENCE_QUOTE: &str = "\"Birth before 1957 provides only presumptive \
evidence for measles, mumps, and rubella. Before vaccines were available, nearly everyone was \
infected with measles, mumps, and rubella viruses during childhood. The majority of people born \
before 1957 are likely to have been infected naturally and therefore are presumed to be \
protected against measles, mumps, and rubella. Healthcare personnel born before 1957 without \
laboratory evidence of immunity or disease should consider getting two doses of MMR vaccine.\"";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct CitationView {
    pub(crate) title: &'static str,
    pub(crate) url: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub(crate) enum ProbabilityView {
    Known(f64),
    Unknown(&'static str),
}

impl std::fmt::Display for ProbabilityView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbabilityView::Known(value) => write!(f, "{value:.2}"),
            ProbabilityView::Unknown(label) => f.write_str(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct IllnessResultView {
    pub(crate) illness: String,
    pub(crate) probability: ProbabilityView,
    pub(crate) message_key: Option<MessageKey>,
    pub(crate) message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) citation: Option<CitationView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ImmunityResponse {
    pub(crate) birth_year: i32,
    pub(crate) results: Vec<IllnessResultView>,
}

pub(crate) fn render_message(illness: &str, key: MessageKey) -> (String, Option<CitationView>) {
    match key {
        MessageKey::Pre1957 => (
            format!(
                "According to the CDC, you are likely immune to {illness} due to childhood \
                 exposure. NB: {PRESUMPTIVE_EVIDENCE_QUOTE}"
            ),
            Some(CitationView {
                title: MMR_CITATION_TITLE,
                url: MMR_CITATION_URL,
            }),
        ),
        MessageKey::HasImmunizations => (
            format!(
                "This means you have a statistical probability of being immune to {illness} \
                 if you are exposed. The closer to 1.0, the more likely you are immune."
            ),
            None,
        ),
        MessageKey::TooManyShots => (
            "Data not available for more than 2 shots before age 6.".to_string(),
            None,
        ),
        MessageKey::NoImmunizations => (
            format!(
                "You are unlikely to have any immunity to {illness}, if you are exposed, you \
                 are very likely to be infected."
            ),
            None,
        ),
    }
}

pub(crate) fn render_assessment(assessment: &ImmunityAssessment) -> ImmunityResponse {
    let results = assessment
        .illnesses
        .iter()
        .map(|entry| match &entry.outcome {
            IllnessOutcome::Estimated(estimate) => {
                let (message, citation) = render_message(&entry.illness, estimate.message);
                IllnessResultView {
                    illness: entry.illness.clone(),
                    probability: ProbabilityView::Known(estimate.probability),
                    message_key: Some(estimate.message),
                    message,
                    citation,
                }
            }
            IllnessOutcome::Unknown { .. } => IllnessResultView {
                illness: entry.illness.clone(),
                probability: ProbabilityView::Unknown("Unknown"),
                message_key: None,
                message: format!(
                    "We were unable to estimate your immunity to {}.",
                    entry.illness
                ),
                citation: None,
            },
        })
        .collect();

    ImmunityResponse {
        birth_year: assessment.birth_year,
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use probable_immunity::{IllnessAssessment, ImmunityEstimate};

    fn assessment(outcome: IllnessOutcome) -> ImmunityAssessment {
        ImmunityAssessment {
            birth_year: 1950,
            illnesses: vec![IllnessAssessment {
                illness: "measles".to_string(),
                outcome,
            }],
        }
    }

    #[test]
    fn pre_1957_message_carries_citation() {
        let (message, citation) = render_message("measles", MessageKey::Pre1957);
        assert!(message.starts_with("According to the CDC, you are likely immune to measles"));
        assert!(!message.contains('<'));
        assert_eq!(citation.map(|c| c.url), Some(MMR_CITATION_URL));
    }

    #[test]
    fn unknown_outcome_renders_placeholder() {
        let response = render_assessment(&assessment(IllnessOutcome::Unknown {
            reason: "dose count -1 cannot be negative".to_string(),
        }));
        let view = &response.results[0];
        assert_eq!(view.probability, ProbabilityView::Unknown("Unknown"));
        assert_eq!(view.message_key, None);

        let json = serde_json::to_value(view).expect("serialize view");
        assert_eq!(json["probability"], serde_json::json!("Unknown"));
    }

    #[test]
    fn estimated_outcome_serializes_numeric_probability() {
        let estimate: ImmunityEstimate = serde_json::from_value(serde_json::json!({
            "probability": 1.0,
            "message": "PRE_1957",
        }))
        .expect("deserialize estimate");
        let response = render_assessment(&assessment(IllnessOutcome::Estimated(estimate)));

        let json = serde_json::to_value(&response).expect("serialize response");
        assert_eq!(json["results"][0]["probability"], serde_json::json!(1.0));
        assert_eq!(json["results"][0]["message_key"], serde_json::json!("PRE_1957"));
        assert!(json["results"][0]["citation"]["title"].is_string());
    }
}
