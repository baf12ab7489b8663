mod maths_utils;
mod perf;
mod time_utils;

pub use perf::over_budget;
pub use time_utils::{AppInstant, SECS_IN_H, SECS_IN_MIN, format_seconds};

pub use maths_utils::{mean_and_stddev, round_to};
