use serde::Serialize;

use super::types::Summary;

pub const PALETTE: [&str; 8] = [
    "#099268", "#1971c2", "#c2255c", "#343a40", "#9c36b5", "#e03131", "#e8590c", "#3b5bdb",
];

pub const DEFAULT_CONTRIBUTION_COLOR: &str = "#1971c2";
pub const DEFAULT_VALUE_COLOR: &str = "#099268";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    pub currency: String,
    pub prefix: bool,
    pub contribution_color: String,
    pub value_color: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency: String::new(),
            prefix: false,
            contribution_color: DEFAULT_CONTRIBUTION_COLOR.to_string(),
            value_color: DEFAULT_VALUE_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedSummary {
    pub total_savings: String,
    pub total_contributions: String,
    pub total_interest: String,
}

impl DisplaySettings {
    pub fn format_amount(&self, value: f64) -> String {
        let number = format_whole(value);
        if self.currency.is_empty() {
            number
        } else if self.prefix {
            format!("{}{number}", self.currency)
        } else {
            format!("{number}{}", self.currency)
        }
    }

    pub fn format_summary(&self, summary: &Summary) -> FormattedSummary {
        FormattedSummary {
            total_savings: self.format_amount(summary.total_savings),
            total_contributions: self.format_amount(summary.total_contributions),
            total_interest: self.format_amount(summary.total_interest),
        }
    }
}

pub fn is_palette_color(color: &str) -> bool {
    PALETTE.iter().any(|c| c.eq_ignore_ascii_case(color))
}

pub fn format_whole(value: f64) -> String {
    let rounded = value.round();
    if !rounded.is_finite() {
        return rounded.to_string();
    }
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_compact(value: f64) -> String {
    const UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

    let magnitude = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    for (scale, suffix) in UNITS {
        if magnitude >= scale {
            let scaled = magnitude / scale;
            let text = if scaled < 100.0 {
                let tenths = (scaled * 10.0).round() / 10.0;
                trim_zero_fraction(format!("{tenths:.1}"))
            } else {
                format!("{:.0}", scaled.round())
            };
            return format!("{sign}{text}{suffix}");
        }
    }
    format!("{sign}{:.0}", magnitude.round())
}

fn trim_zero_fraction(text: String) -> String {
    match text.strip_suffix(".0") {
        Some(trimmed) => trimmed.to_string(),
        None => text,
    }
}
