//! Wall-time budgets for the hot paths, switched by `DF.log_performance`.

use std::time::Duration;

/// Warns when `step` ran past its budget. Returns whether it did.
pub fn over_budget(step: &str, elapsed: Duration, budget: Duration) -> bool {
    if elapsed <= budget {
        return false;
    }
    let build = if cfg!(debug_assertions) { "debug" } else { "release" };
    log::warn!(
        "{} took {:.3}ms, budget {:.3}ms ({} build)",
        step,
        elapsed.as_secs_f64() * 1000.0,
        budget.as_secs_f64() * 1000.0,
        build
    );
    true
}

/// Evaluates `$block`, timing it against `$budget_micros` when performance
/// logging is on.
#[macro_export]
macro_rules! trace_time {
    ($step:expr, $budget_micros:expr, $block:block) => {{
        if $crate::config::DF.log_performance {
            let start = $crate::utils::AppInstant::now();
            let result = $block;
            $crate::utils::over_budget(
                $step,
                start.elapsed(),
                ::std::time::Duration::from_micros($budget_micros),
            );
            result
        } else {
            $block
        }
    }};
}
