use super::types::{BreakdownRow, GoalEstimate, Projection, Sample};

/// Estimates the fractional label (year or month) at which `samples` first
/// reaches `goal`, interpolating linearly between the two samples that
/// bracket the crossing.
///
/// Returns `None` when the goal is never reached inside the series, or when
/// the growth across the crossing step is not strictly positive.
pub fn estimate_goal_crossing<S: Sample>(samples: &[S], goal: f64) -> Option<f64> {
    let index = crossing_index(samples, goal)?;
    if index == 0 {
        return Some(f64::from(samples[0].label()));
    }

    let previous = &samples[index - 1];
    let growth = samples[index].value() - previous.value();
    if growth <= 0.0 {
        return None;
    }

    Some(f64::from(previous.label()) + (goal - previous.value()) / growth)
}

fn crossing_index<S: Sample>(samples: &[S], goal: f64) -> Option<usize> {
    samples.iter().position(|s| s.value() >= goal)
}

pub fn estimate_goal(projection: &Projection, goal: Option<f64>) -> GoalEstimate {
    match goal {
        Some(goal) => GoalEstimate {
            year: estimate_goal_crossing(&projection.yearly, goal),
            month: estimate_goal_crossing(&projection.monthly, goal),
        },
        None => GoalEstimate {
            year: None,
            month: None,
        },
    }
}

pub fn breakdown_rows<S: Sample>(
    samples: &[S],
    goal: Option<f64>,
    estimate: Option<f64>,
) -> Vec<BreakdownRow> {
    let mut rows: Vec<BreakdownRow> = samples
        .iter()
        .map(|s| BreakdownRow {
            label: f64::from(s.label()),
            contribution: s.contribution(),
            value: s.value(),
            goal: false,
        })
        .collect();

    let (Some(goal), Some(estimate)) = (goal, estimate) else {
        return rows;
    };
    let Some(index) = crossing_index(samples, goal).filter(|&i| i > 0) else {
        return rows;
    };

    let goal_row = BreakdownRow {
        label: (estimate * 100.0).round() / 100.0,
        contribution: rows[index - 1].contribution,
        value: goal,
        goal: true,
    };
    rows.insert(index, goal_row);
    rows
}
