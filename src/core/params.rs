use serde::Deserialize;

use super::display::{DisplaySettings, is_palette_color};
use super::error::ValidationError;
use super::types::ProjectionParams;

pub const MAX_YEARS: u32 = 100;
pub const MAX_RATE: f64 = 50.0;
pub const MAX_CONTRIBUTION_INCREASE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawParams {
    pub initial_investment: Option<FieldValue>,
    pub monthly_contribution: Option<FieldValue>,
    pub length_of_time_in_years: Option<FieldValue>,
    pub interest_rate: Option<FieldValue>,
    pub inflation_rate: Option<FieldValue>,
    pub increase_in_annual_contributions: Option<FieldValue>,
    pub end_of_contributions: Option<FieldValue>,
    pub goal: Option<FieldValue>,

    pub currency: Option<String>,
    pub prefix: Option<FieldValue>,
    pub contribution_color: Option<String>,
    pub value_color: Option<String>,
}

impl RawParams {
    pub fn parse(&self) -> Result<ProjectionParams, ValidationError> {
        let initial_investment = non_negative(
            "initialInvestment",
            number("initialInvestment", &self.initial_investment)?,
        )?
        .unwrap_or(0.0);
        let monthly_contribution = non_negative(
            "monthlyContribution",
            number("monthlyContribution", &self.monthly_contribution)?,
        )?
        .unwrap_or(0.0);
        let length_of_time_in_years = whole(
            "lengthOfTimeInYears",
            number("lengthOfTimeInYears", &self.length_of_time_in_years)?,
            f64::from(MAX_YEARS),
        )?
        .unwrap_or(0);
        let interest_rate = in_range(
            "interestRate",
            number("interestRate", &self.interest_rate)?,
            MAX_RATE,
        )?
        .unwrap_or(0.0);
        let inflation_rate = in_range(
            "inflationRate",
            number("inflationRate", &self.inflation_rate)?,
            MAX_RATE,
        )?
        .unwrap_or(0.0);
        let increase_in_annual_contributions = in_range(
            "increaseInAnnualContributions",
            number(
                "increaseInAnnualContributions",
                &self.increase_in_annual_contributions,
            )?,
            MAX_CONTRIBUTION_INCREASE,
        )?
        .unwrap_or(0.0);
        let end_of_contributions = whole(
            "endOfContributions",
            number("endOfContributions", &self.end_of_contributions)?,
            f64::from(u32::MAX),
        )?;
        let goal = non_negative("goal", number("goal", &self.goal)?)?.filter(|&g| g > 0.0);

        Ok(ProjectionParams {
            initial_investment,
            monthly_contribution,
            length_of_time_in_years,
            interest_rate,
            inflation_rate,
            increase_in_annual_contributions,
            end_of_contributions,
            goal,
        })
    }

    pub fn display_settings(&self) -> Result<DisplaySettings, ValidationError> {
        let defaults = DisplaySettings::default();
        let prefix = match &self.prefix {
            None => defaults.prefix,
            Some(FieldValue::Bool(b)) => *b,
            Some(FieldValue::Number(n)) => *n != 0.0,
            Some(FieldValue::Text(text)) => match text.trim() {
                "" => defaults.prefix,
                "true" | "1" | "on" => true,
                "false" | "0" | "off" => false,
                other => {
                    return Err(ValidationError::NotABool {
                        field: "prefix",
                        value: other.to_string(),
                    });
                }
            },
        };

        Ok(DisplaySettings {
            currency: self.currency.clone().unwrap_or(defaults.currency),
            prefix,
            contribution_color: color(
                "contributionColor",
                &self.contribution_color,
                defaults.contribution_color,
            )?,
            value_color: color("valueColor", &self.value_color, defaults.value_color)?,
        })
    }
}

impl ProjectionParams {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("initialInvestment", self.initial_investment.to_string()),
            ("monthlyContribution", self.monthly_contribution.to_string()),
            ("lengthOfTimeInYears", self.length_of_time_in_years.to_string()),
            ("interestRate", self.interest_rate.to_string()),
            ("inflationRate", self.inflation_rate.to_string()),
            (
                "increaseInAnnualContributions",
                self.increase_in_annual_contributions.to_string(),
            ),
        ];
        if let Some(end) = self.end_of_contributions {
            pairs.push(("endOfContributions", end.to_string()));
        }
        if let Some(goal) = self.goal {
            pairs.push(("goal", goal.to_string()));
        }
        pairs
    }
}

impl DisplaySettings {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.currency.is_empty() {
            pairs.push(("currency", self.currency.clone()));
            pairs.push(("prefix", self.prefix.to_string()));
        }
        pairs.push(("contributionColor", self.contribution_color.clone()));
        pairs.push(("valueColor", self.value_color.clone()));
        pairs
    }
}

pub fn query_string(params: &ProjectionParams, settings: &DisplaySettings) -> String {
    params
        .to_query_pairs()
        .into_iter()
        .chain(settings.to_query_pairs())
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(&value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn number(field: &'static str, value: &Option<FieldValue>) -> Result<Option<f64>, ValidationError> {
    let parsed = match value {
        None => return Ok(None),
        Some(FieldValue::Number(n)) => *n,
        Some(FieldValue::Bool(b)) => {
            return Err(ValidationError::NotANumber {
                field,
                value: b.to_string(),
            });
        }
        Some(FieldValue::Text(text)) => {
            let compact: String = text
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            if compact.is_empty() {
                return Ok(None);
            }
            compact
                .parse::<f64>()
                .map_err(|_| ValidationError::NotANumber {
                    field,
                    value: text.clone(),
                })?
        }
    };

    if !parsed.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    Ok(Some(parsed))
}

fn non_negative(field: &'static str, value: Option<f64>) -> Result<Option<f64>, ValidationError> {
    match value {
        Some(v) if v < 0.0 => Err(ValidationError::Negative { field, value: v }),
        other => Ok(other),
    }
}

fn in_range(
    field: &'static str,
    value: Option<f64>,
    max: f64,
) -> Result<Option<f64>, ValidationError> {
    match value {
        Some(v) if !(0.0..=max).contains(&v) => Err(ValidationError::OutOfRange {
            field,
            min: 0.0,
            max,
            value: v,
        }),
        other => Ok(other),
    }
}

fn whole(field: &'static str, value: Option<f64>, max: f64) -> Result<Option<u32>, ValidationError> {
    let Some(v) = in_range(field, value, max)? else {
        return Ok(None);
    };
    if v.fract() != 0.0 {
        return Err(ValidationError::NotAnInteger { field, value: v });
    }
    Ok(Some(v as u32))
}

fn color(
    field: &'static str,
    value: &Option<String>,
    default: String,
) -> Result<String, ValidationError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(c) if is_palette_color(c) => Ok(c.to_ascii_lowercase()),
        Some(c) => Err(ValidationError::UnknownColor {
            field,
            value: c.to_string(),
        }),
    }
}
