use std::ffi::OsString;

use clap::Parser;

use crate::core::{
    BreakdownRow, DisplaySettings, FieldValue, ProjectionParams, RawParams, ValidationError,
    breakdown_rows, estimate_goal, format_compact, project,
};

#[derive(Parser, Debug)]
#[command(
    name = "compound project",
    about = "Compound interest projection with inflation, contribution step-up and savings goal"
)]
pub struct Cli {
    #[arg(long, default_value_t = 0.0, help = "Starting principal")]
    initial_investment: f64,
    #[arg(long, default_value_t = 1000.0, help = "Amount deposited every month")]
    monthly_contribution: f64,
    #[arg(long, default_value_t = 40, help = "Projection horizon in years (0-100)")]
    years: u32,
    #[arg(
        long,
        default_value_t = 8.0,
        help = "Nominal annual interest rate in percent (0-50)"
    )]
    interest_rate: f64,
    #[arg(
        long,
        default_value_t = 3.0,
        help = "Annual inflation in percent, subtracted from the interest rate (0-50)"
    )]
    inflation_rate: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Yearly increase of the monthly contribution in percent (0-100)"
    )]
    contribution_increase: f64,
    #[arg(long, help = "Year after which no more contributions are made")]
    end_of_contributions: Option<u32>,
    #[arg(long, help = "Target account value to estimate the crossing date for")]
    goal: Option<f64>,
    #[arg(long, default_value = "", help = "Currency label, e.g. $ or kr")]
    currency: String,
    #[arg(long, help = "Print the currency label before amounts instead of after")]
    prefix: bool,
    #[arg(long, help = "Print the monthly breakdown instead of the yearly one")]
    monthly: bool,
}

impl Cli {
    fn raw_params(&self) -> RawParams {
        RawParams {
            initial_investment: Some(FieldValue::from(self.initial_investment)),
            monthly_contribution: Some(FieldValue::from(self.monthly_contribution)),
            length_of_time_in_years: Some(FieldValue::from(f64::from(self.years))),
            interest_rate: Some(FieldValue::from(self.interest_rate)),
            inflation_rate: Some(FieldValue::from(self.inflation_rate)),
            increase_in_annual_contributions: Some(FieldValue::from(self.contribution_increase)),
            end_of_contributions: self.end_of_contributions.map(|y| FieldValue::from(f64::from(y))),
            goal: self.goal.map(FieldValue::from),
            currency: Some(self.currency.clone()),
            prefix: Some(FieldValue::Bool(self.prefix)),
            contribution_color: None,
            value_color: None,
        }
    }
}

pub fn run<I, T>(args: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    let raw = cli.raw_params();
    let params = raw.parse()?;
    let settings = raw.display_settings()?;
    print!("{}", render_report(&params, &settings, cli.monthly));
    Ok(())
}

pub fn render_report(params: &ProjectionParams, settings: &DisplaySettings, monthly: bool) -> String {
    let projection = project(params);
    let summary = projection.summary();
    let formatted = settings.format_summary(&summary);
    let estimate = estimate_goal(&projection, params.goal);

    let mut lines = vec![
        format!("Total savings:       {}", formatted.total_savings),
        format!("Total contributions: {}", formatted.total_contributions),
        format!("Total interest:      {}", formatted.total_interest),
    ];

    if let Some(goal) = params.goal {
        let goal_text = settings.format_amount(goal);
        lines.push(match (estimate.year, estimate.month) {
            (Some(year), Some(month)) => {
                format!("Goal {goal_text} reached in year {year:.2} (month {month:.1})")
            }
            _ => format!(
                "Goal {goal_text} not reached within {} years",
                params.length_of_time_in_years
            ),
        });
    }
    lines.push(String::new());

    let (label, rows) = if monthly {
        (
            "Month",
            breakdown_rows(&projection.monthly, params.goal, estimate.month),
        )
    } else {
        (
            "Year",
            breakdown_rows(&projection.yearly, params.goal, estimate.year),
        )
    };
    lines.extend(table_lines(label, &rows, settings));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn table_lines(label: &str, rows: &[BreakdownRow], settings: &DisplaySettings) -> Vec<String> {
    let unit = if settings.currency.is_empty() {
        String::new()
    } else {
        format!(" ({})", settings.currency.trim())
    };

    let header = format!(
        "{label:>8}  {:>18}  {:>20}",
        format!("Contribution{unit}"),
        format!("Value{unit}")
    );
    std::iter::once(header)
        .chain(rows.iter().map(|row| {
            let label = if row.goal {
                format!("{:.2}", row.label)
            } else {
                format!("{:.0}", row.label)
            };
            let marker = if row.goal { "  <- goal" } else { "" };
            format!(
                "{label:>8}  {:>18}  {:>20}{marker}",
                format_compact(row.contribution),
                settings.format_amount(row.value)
            )
        }))
        .collect()
}
