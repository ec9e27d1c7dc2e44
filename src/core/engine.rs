use super::params::MAX_YEARS;
use super::types::{MonthlySample, Projection, ProjectionParams, Summary, YearlySample};

const MONTHS_PER_YEAR: u32 = 12;

#[derive(Debug)]
struct ContributionSchedule {
    amount: f64,
    step_up: f64,
    end_year: Option<u32>,
}

impl ContributionSchedule {
    fn new(params: &ProjectionParams) -> Self {
        Self {
            amount: params.monthly_contribution,
            step_up: params.increase_in_annual_contributions / 100.0,
            end_year: params.end_of_contributions,
        }
    }

    fn apply_cutoff(&mut self, completed_years: u32) {
        if self.end_year == Some(completed_years) {
            self.amount = 0.0;
        }
    }

    fn apply_step_up(&mut self) {
        self.amount += self.amount * self.step_up;
    }
}

/// Runs the monthly compounding recurrence over the whole horizon.
///
/// The returned series always start with the untouched initial investment at
/// label 0, followed by one sample per elapsed month (resp. year). Horizons
/// longer than `MAX_YEARS` are cut at `MAX_YEARS`.
pub fn project(params: &ProjectionParams) -> Projection {
    let years = params.length_of_time_in_years.min(MAX_YEARS);
    let total_months = years * MONTHS_PER_YEAR;
    let monthly_rate = params.effective_monthly_rate();
    let initial = params.initial_investment;

    let mut monthly = Vec::with_capacity(total_months as usize + 1);
    let mut yearly = Vec::with_capacity(years as usize + 1);
    monthly.push(MonthlySample {
        month: 0,
        contribution: initial,
        value: initial,
    });
    yearly.push(YearlySample {
        year: 0,
        contribution: initial,
        value: initial,
    });

    let mut schedule = ContributionSchedule::new(params);
    let mut completed_years = 0;
    let mut total_contribution = initial;
    let mut value = initial;

    // A cutoff at year 0 stops deposits before the first month.
    schedule.apply_cutoff(completed_years);

    for month in 1..=total_months {
        total_contribution += schedule.amount;
        value = if month == 1 {
            (initial + schedule.amount) * (1.0 + monthly_rate)
        } else {
            value * (1.0 + monthly_rate) + schedule.amount
        };

        monthly.push(MonthlySample {
            month,
            contribution: total_contribution,
            value,
        });

        let year_boundary = month % MONTHS_PER_YEAR == 0;
        if year_boundary {
            completed_years = month / MONTHS_PER_YEAR;
            yearly.push(YearlySample {
                year: completed_years,
                contribution: total_contribution,
                value,
            });
        }

        // Cutoff is evaluated before the step-up, so a contribution that is
        // stopped at a year boundary is never increased first.
        schedule.apply_cutoff(completed_years);
        if year_boundary {
            schedule.apply_step_up();
        }
    }

    log::debug!(
        "projected {total_months} months ({years} years) at monthly rate {monthly_rate:.6}"
    );

    Projection { monthly, yearly }
}

impl Projection {
    pub fn summary(&self) -> Summary {
        let (total_savings, total_contributions) = self
            .yearly
            .last()
            .map(|last| (last.value, last.contribution))
            .unwrap_or((0.0, 0.0));
        Summary {
            total_savings,
            total_contributions,
            total_interest: total_savings - total_contributions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_params() -> ProjectionParams {
        ProjectionParams {
            initial_investment: 5_000.0,
            monthly_contribution: 1_000.0,
            length_of_time_in_years: 10,
            interest_rate: 8.0,
            inflation_rate: 3.0,
            increase_in_annual_contributions: 0.0,
            end_of_contributions: None,
            goal: None,
        }
    }

    #[test]
    fn series_lengths_follow_horizon() {
        let projection = project(&sample_params());
        assert_eq!(projection.monthly.len(), 10 * 12 + 1);
        assert_eq!(projection.yearly.len(), 11);
    }

    #[test]
    fn first_sample_is_initial_investment() {
        let projection = project(&sample_params());
        assert_eq!(
            projection.monthly[0],
            MonthlySample {
                month: 0,
                contribution: 5_000.0,
                value: 5_000.0
            }
        );
        assert_eq!(
            projection.yearly[0],
            YearlySample {
                year: 0,
                contribution: 5_000.0,
                value: 5_000.0
            }
        );
    }

    #[test]
    fn zero_years_yields_only_initial_sample() {
        let mut params = sample_params();
        params.length_of_time_in_years = 0;

        let projection = project(&params);
        assert_eq!(projection.monthly.len(), 1);
        assert_eq!(projection.yearly.len(), 1);
        assert_approx(projection.summary().total_interest, 0.0);
    }

    #[test]
    fn one_year_at_one_percent_per_month() {
        let params = ProjectionParams {
            initial_investment: 0.0,
            monthly_contribution: 1_000.0,
            length_of_time_in_years: 1,
            interest_rate: 12.0,
            ..ProjectionParams::default()
        };

        let projection = project(&params);
        assert_approx(projection.monthly[1].value, 1_010.0);

        let mut expected = 1_010.0;
        for _ in 2..=12 {
            expected = expected * 1.01 + 1_000.0;
        }
        assert_approx(projection.monthly[12].value, expected);
        assert_approx(projection.yearly[1].value, expected);
        assert_approx(projection.yearly[1].contribution, 12_000.0);
    }

    #[test]
    fn first_month_compounds_initial_and_deposit_together() {
        let params = ProjectionParams {
            initial_investment: 10_000.0,
            monthly_contribution: 500.0,
            length_of_time_in_years: 1,
            interest_rate: 6.0,
            ..ProjectionParams::default()
        };

        let projection = project(&params);
        assert_approx(projection.monthly[1].value, 10_500.0 * 1.005);
        assert_approx(
            projection.monthly[2].value,
            10_500.0 * 1.005 * 1.005 + 500.0,
        );
    }

    #[test]
    fn equal_interest_and_inflation_accumulates_linearly() {
        let params = ProjectionParams {
            initial_investment: 2_000.0,
            monthly_contribution: 250.0,
            length_of_time_in_years: 3,
            interest_rate: 4.0,
            inflation_rate: 4.0,
            ..ProjectionParams::default()
        };

        let projection = project(&params);
        for pair in projection.monthly.windows(2).skip(1) {
            assert_approx(pair[1].value, pair[0].value + 250.0);
        }
        let last = projection.monthly.last().expect("non-empty series");
        assert_approx(last.value, last.contribution);
    }

    #[test]
    fn contributions_strictly_increase_until_cutoff() {
        let mut params = sample_params();
        params.increase_in_annual_contributions = 5.0;
        params.end_of_contributions = Some(4);

        let projection = project(&params);
        for pair in projection.monthly[..=48].windows(2) {
            assert!(pair[1].contribution > pair[0].contribution);
        }
        for pair in projection.monthly[48..].windows(2) {
            assert_approx(pair[1].contribution, pair[0].contribution);
        }
    }

    #[test]
    fn horizon_is_capped_at_max_years() {
        let mut params = sample_params();
        params.length_of_time_in_years = 400_000_000;

        let projection = project(&params);
        assert_eq!(projection.yearly.len(), MAX_YEARS as usize + 1);
        assert_eq!(projection.monthly.len(), MAX_YEARS as usize * 12 + 1);
    }

    #[test]
    fn cutoff_at_year_zero_freezes_contribution() {
        let mut params = sample_params();
        params.end_of_contributions = Some(0);

        let projection = project(&params);
        assert!(
            projection
                .monthly
                .iter()
                .all(|s| (s.contribution - 5_000.0).abs() <= EPS)
        );
        assert!(
            projection
                .yearly
                .iter()
                .all(|s| (s.contribution - 5_000.0).abs() <= EPS)
        );
    }

    #[test]
    fn cutoff_stops_deposits_after_end_year() {
        let mut params = sample_params();
        params.end_of_contributions = Some(2);

        let projection = project(&params);
        assert_approx(projection.yearly[2].contribution, 5_000.0 + 24_000.0);
        for sample in &projection.yearly[2..] {
            assert_approx(sample.contribution, 29_000.0);
        }
        assert!(projection.yearly[10].value > projection.yearly[2].value);
    }

    #[test]
    fn step_up_raises_contribution_each_year() {
        let mut params = sample_params();
        params.increase_in_annual_contributions = 10.0;

        let projection = project(&params);
        let year_one = projection.yearly[1].contribution - projection.yearly[0].contribution;
        let year_two = projection.yearly[2].contribution - projection.yearly[1].contribution;
        let year_three = projection.yearly[3].contribution - projection.yearly[2].contribution;
        assert_approx(year_one, 12_000.0);
        assert_approx(year_two, 13_200.0);
        assert_approx(year_three, 14_520.0);
    }

    #[test]
    fn cutoff_wins_over_step_up_on_same_boundary() {
        let mut params = sample_params();
        params.increase_in_annual_contributions = 50.0;
        params.end_of_contributions = Some(1);

        let projection = project(&params);
        assert_approx(projection.yearly[1].contribution, 17_000.0);
        assert_approx(projection.monthly[13].contribution, 17_000.0);
        assert_approx(projection.yearly[10].contribution, 17_000.0);
    }

    #[test]
    fn negative_effective_rate_declines_without_clamping() {
        let params = ProjectionParams {
            initial_investment: 1_000.0,
            length_of_time_in_years: 5,
            interest_rate: 0.0,
            inflation_rate: 50.0,
            ..ProjectionParams::default()
        };

        let projection = project(&params);
        for pair in projection.yearly.windows(2) {
            assert!(pair[1].value < pair[0].value);
            assert!(pair[1].value > 0.0);
        }
        assert!(projection.yearly[5].value < projection.yearly[5].contribution);
    }

    #[test]
    fn summary_reads_last_year() {
        let projection = project(&sample_params());
        let summary = projection.summary();
        let last = projection.yearly[10];
        assert_approx(summary.total_savings, last.value);
        assert_approx(summary.total_contributions, 125_000.0);
        assert_approx(summary.total_interest, last.value - 125_000.0);
    }

    #[test]
    fn projection_is_deterministic() {
        let params = sample_params();
        assert_eq!(project(&params), project(&params));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_series_shape_and_monotone_contributions(
            initial in 0u32..1_000_000,
            monthly in 0u32..20_000,
            years in 0u32..=100,
            interest_bp in 0u32..=5_000,
            inflation_bp in 0u32..=5_000,
            increase_bp in 0u32..=10_000,
            end in proptest::option::of(0u32..120)
        ) {
            let params = ProjectionParams {
                initial_investment: f64::from(initial),
                monthly_contribution: f64::from(monthly),
                length_of_time_in_years: years,
                interest_rate: f64::from(interest_bp) / 100.0,
                inflation_rate: f64::from(inflation_bp) / 100.0,
                increase_in_annual_contributions: f64::from(increase_bp) / 100.0,
                end_of_contributions: end,
                goal: None,
            };

            let projection = project(&params);
            prop_assert_eq!(projection.monthly.len(), years as usize * 12 + 1);
            prop_assert_eq!(projection.yearly.len(), years as usize + 1);

            let last_deposit_month = end.map_or(u32::MAX, |e| e.saturating_mul(12));
            for pair in projection.monthly.windows(2) {
                prop_assert!(pair[1].contribution >= pair[0].contribution);
                if monthly > 0 && pair[1].month <= last_deposit_month {
                    prop_assert!(pair[1].contribution > pair[0].contribution);
                }
            }
            for (k, sample) in projection.yearly.iter().enumerate() {
                let month = projection.monthly[k * 12];
                prop_assert_eq!(sample.year as usize, k);
                prop_assert_eq!(sample.contribution, month.contribution);
                prop_assert_eq!(sample.value, month.value);
            }
            if params.effective_monthly_rate() >= 0.0 {
                for sample in &projection.monthly {
                    prop_assert!(sample.value + 1e-6 * sample.contribution.max(1.0) >= sample.contribution);
                }
            }
        }
    }
}
