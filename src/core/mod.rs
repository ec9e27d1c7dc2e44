mod display;
mod engine;
mod error;
mod goal;
mod params;
mod types;

pub use display::{DisplaySettings, FormattedSummary, PALETTE, format_compact, format_whole};
pub use engine::project;
pub use error::ValidationError;
pub use goal::{breakdown_rows, estimate_goal, estimate_goal_crossing};
pub use params::{FieldValue, RawParams, query_string};
pub use types::{
    BreakdownRow, GoalEstimate, MonthlySample, Projection, ProjectionParams, Sample, Summary,
    YearlySample,
};
