// src/solver/feasibility.rs

//! Pre-search sanity checks for the enumerator.
//!
//! These catch inputs that can never produce a schedule, with messages that
//! name the offending quantity, so the expensive search is not even started.
//! Cycle detection already happened at load time and is not repeated here.

use crate::graph::DepGraph;

/// Check that a schedule can exist at all for the given parameters.
///
/// Returns a list of problems; an empty list means the search may proceed
/// (it can still come up empty, e.g. when the dependency structure and the
/// day limit interact badly — that is a normal search outcome).
pub fn check(graph: &DepGraph, workers: usize, daily_prompts: u32, day_limit: u32) -> Vec<String> {
    let mut problems = Vec::new();

    // A task costing more than K can never be completed by any worker.
    for task in graph.tasks() {
        if task.prompts > daily_prompts {
            problems.push(format!(
                "task {} requires {} prompts, but the daily budget per worker is K={}",
                task.id, task.prompts, daily_prompts
            ));
        }
    }

    // Aggregate capacity bound: ceil(total / (N * K)) days are needed even
    // with perfect packing and no dependencies.
    let total = graph.total_prompts();
    let per_day = (workers as u32).saturating_mul(daily_prompts);
    if per_day == 0 {
        problems.push("daily capacity is zero (N and K must both be positive)".to_string());
    } else {
        let min_days = total.div_ceil(per_day);
        if min_days > day_limit {
            problems.push(format!(
                "{total} total prompts exceed {day_limit} day(s) of capacity \
                 ({workers} worker(s) x {daily_prompts} prompts = {per_day}/day, \
                 needing at least {min_days} day(s))"
            ));
        }
    }

    problems
}
