use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionParams {
    pub initial_investment: f64,
    pub monthly_contribution: f64,
    pub length_of_time_in_years: u32,
    pub interest_rate: f64,
    pub inflation_rate: f64,
    pub increase_in_annual_contributions: f64,
    pub end_of_contributions: Option<u32>,
    pub goal: Option<f64>,
}

impl ProjectionParams {
    pub fn effective_monthly_rate(&self) -> f64 {
        (self.interest_rate / 100.0 - self.inflation_rate / 100.0) / 12.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySample {
    pub month: u32,
    pub contribution: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlySample {
    pub year: u32,
    pub contribution: f64,
    pub value: f64,
}

pub trait Sample {
    fn label(&self) -> u32;
    fn contribution(&self) -> f64;
    fn value(&self) -> f64;
}

impl Sample for MonthlySample {
    fn label(&self) -> u32 {
        self.month
    }

    fn contribution(&self) -> f64 {
        self.contribution
    }

    fn value(&self) -> f64 {
        self.value
    }
}

impl Sample for YearlySample {
    fn label(&self) -> u32 {
        self.year
    }

    fn contribution(&self) -> f64 {
        self.contribution
    }

    fn value(&self) -> f64 {
        self.value
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub monthly: Vec<MonthlySample>,
    pub yearly: Vec<YearlySample>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_savings: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalEstimate {
    pub year: Option<f64>,
    pub month: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRow {
    pub label: f64,
    pub contribution: f64,
    pub value: f64,
    pub goal: bool,
}
