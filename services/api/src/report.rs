use crate::infra::immunity_service;
use crate::presentation::{render_assessment, ImmunityResponse};
use clap::Args;
use probable_immunity::config::AppConfig;
use probable_immunity::error::AppError;
use probable_immunity::ImmunityForm;

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Year of birth
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) birth_year: i32,
    /// Measles vaccinations received before age six
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) measles_doses: Option<i32>,
    /// Print the results as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let EstimateArgs {
        birth_year,
        measles_doses,
        json,
    } = args;

    let config = AppConfig::load()?;
    let service = immunity_service(config.intake);
    let form = ImmunityForm {
        birth_year: Some(birth_year),
        on_time_measles_vaccinations: measles_doses,
    };

    let assessment = service.evaluate(&form)?;
    let response = render_assessment(&assessment);

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", format_response(&response));
    }

    Ok(())
}

fn format_response(response: &ImmunityResponse) -> String {
    let mut output = format!("Probable immunity for birth year {}\n", response.birth_year);
    for result in &response.results {
        let key = result
            .message_key
            .map(|key| format!(" ({key})"))
            .unwrap_or_default();
        output.push_str(&format!(
            "- {}: {}{}\n  {}\n",
            result.illness, result.probability, key, result.message
        ));
        if let Some(citation) = &result.citation {
            output.push_str(&format!("  Source: {} <{}>\n", citation.title, citation.url));
        }
    }
    output
}
