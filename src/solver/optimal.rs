// src/solver/optimal.rs

//! Minimum-days / minimum-budget search.
//!
//! The primitive is a feasibility decision ("can everything finish within D
//! days when each of N workers has K prompts per day?") that short-circuits
//! on the first complete path. Minimization wraps it in binary search over
//! the monotone parameter: if D days suffice then D+1 days suffice, and if
//! budget K suffices then any larger budget suffices.
//!
//! Two sharing models:
//!
//! - [`ShareMode::Strict`] — same branch structure as the enumerator; the
//!   global completed set updates between sub-steps, so any worker can pick
//!   up a task the same day its dependencies finished.
//! - [`ShareMode::CarryOver`] — globally, only tasks finished on previous
//!   days count (the `horizon`); on top of that a worker may build on tasks
//!   it personally finished earlier today.

use tracing::debug;

use crate::graph::{CompletionSet, DepGraph};
use crate::input::model::TaskId;
use crate::solver::fit::first_fit;

/// Dependency-sharing model for the feasibility decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareMode {
    /// Completions are globally visible as soon as they happen (mode 1).
    Strict,
    /// Day-boundary visibility plus per-worker same-day carry-over (mode 2).
    CarryOver,
}

/// Binary-search minimizer over the feasibility decision.
pub struct Optimizer<'a> {
    graph: &'a DepGraph,
    workers: usize,
    mode: ShareMode,
}

impl<'a> Optimizer<'a> {
    pub fn new(graph: &'a DepGraph, workers: usize, mode: ShareMode) -> Self {
        Self {
            graph,
            workers,
            mode,
        }
    }

    /// Can all tasks finish within `day_limit` days at `daily_prompts` per
    /// worker per day? Existence only; returns on the first complete path.
    pub fn feasible(&self, daily_prompts: u32, day_limit: u32) -> bool {
        match self.mode {
            ShareMode::Strict => self.strict_dfs(
                daily_prompts,
                day_limit,
                1,
                &CompletionSet::new(),
                &vec![daily_prompts; self.workers],
                false,
            ),
            ShareMode::CarryOver => self.carry_dfs(
                daily_prompts,
                day_limit,
                1,
                &CompletionSet::new(),
                &CompletionSet::new(),
                &vec![daily_prompts; self.workers],
                &vec![CompletionSet::new(); self.workers],
                false,
            ),
        }
    }

    /// Smallest day count for which a schedule exists at budget
    /// `daily_prompts`, or `None` when no day count can work.
    pub fn min_days(&self, daily_prompts: u32) -> Option<u32> {
        // A task costing more than K can never run; no day count helps.
        if self.graph.max_prompts() > daily_prompts {
            return None;
        }

        // One ready task always fits an empty day, so task count is enough.
        self.binary_search(1, self.graph.len() as u32, |mid| {
            self.feasible(daily_prompts, mid)
        })
    }

    /// Smallest per-worker daily budget for which a schedule exists within
    /// `day_limit` days, or `None` when no budget can work.
    pub fn min_prompts(&self, day_limit: u32) -> Option<u32> {
        // Below the largest task nothing fits; above the total sum a single
        // worker can do everything eligible in one day.
        self.binary_search(self.graph.max_prompts(), self.graph.total_prompts(), |mid| {
            self.feasible(mid, day_limit)
        })
    }

    /// Standard monotone binary search: smallest value in `[low, high]` for
    /// which `check` holds, or `None` when none does.
    fn binary_search(&self, mut low: u32, mut high: u32, check: impl Fn(u32) -> bool) -> Option<u32> {
        let mut result = None;
        while low <= high {
            let mid = low + (high - low) / 2;
            let ok = check(mid);
            debug!(mid, ok, "feasibility probe");
            if ok {
                result = Some(mid);
                if mid == 0 {
                    break;
                }
                high = mid - 1;
            } else {
                low = mid + 1;
            }
        }
        result
    }

    #[allow(clippy::too_many_arguments)]
    fn strict_dfs(
        &self,
        daily_prompts: u32,
        day_limit: u32,
        day: u32,
        completed: &CompletionSet,
        remaining: &[u32],
        worked_today: bool,
    ) -> bool {
        if completed.len() == self.graph.len() {
            return true;
        }
        if day > day_limit {
            return false;
        }

        for id in self.graph.ready_set(completed) {
            if let Some((_slot, next_remaining)) = first_fit(self.graph.prompts(id), remaining) {
                let mut next_completed = completed.clone();
                next_completed.insert(id);
                if self.strict_dfs(
                    daily_prompts,
                    day_limit,
                    day,
                    &next_completed,
                    &next_remaining,
                    true,
                ) {
                    return true;
                }
            }
        }

        worked_today
            && self.strict_dfs(
                daily_prompts,
                day_limit,
                day + 1,
                completed,
                &vec![daily_prompts; self.workers],
                false,
            )
    }

    /// Tasks attemptable right now under carry-over rules, with the workers
    /// allowed to attempt each: any worker when the dependencies cleared on
    /// a previous day, otherwise exactly the workers whose own completions
    /// today fill the gap.
    fn carry_ready(
        &self,
        completed: &CompletionSet,
        horizon: &CompletionSet,
        worker_done: &[CompletionSet],
    ) -> Vec<(TaskId, Vec<usize>)> {
        let mut ready = Vec::new();
        for task in self.graph.tasks() {
            if completed.contains(&task.id) {
                continue;
            }
            if task.deps.is_subset(horizon) {
                ready.push((task.id, (0..worker_done.len()).collect()));
            } else {
                let allowed: Vec<usize> = (0..worker_done.len())
                    .filter(|w| {
                        task.deps
                            .iter()
                            .all(|d| horizon.contains(d) || worker_done[*w].contains(d))
                    })
                    .collect();
                if !allowed.is_empty() {
                    ready.push((task.id, allowed));
                }
            }
        }
        ready
    }

    #[allow(clippy::too_many_arguments)]
    fn carry_dfs(
        &self,
        daily_prompts: u32,
        day_limit: u32,
        day: u32,
        completed: &CompletionSet,
        horizon: &CompletionSet,
        remaining: &[u32],
        worker_done: &[CompletionSet],
        worked_today: bool,
    ) -> bool {
        if completed.len() == self.graph.len() {
            return true;
        }
        if day > day_limit {
            return false;
        }

        for (id, allowed) in self.carry_ready(completed, horizon, worker_done) {
            let prompts = self.graph.prompts(id);
            for w in allowed {
                if remaining[w] < prompts {
                    continue;
                }
                let mut next_remaining = remaining.to_vec();
                next_remaining[w] -= prompts;
                let mut next_worker_done = worker_done.to_vec();
                next_worker_done[w].insert(id);
                let mut next_completed = completed.clone();
                next_completed.insert(id);
                if self.carry_dfs(
                    daily_prompts,
                    day_limit,
                    day,
                    &next_completed,
                    horizon,
                    &next_remaining,
                    &next_worker_done,
                    true,
                ) {
                    return true;
                }
            }
        }

        // Day boundary: today's completions become globally visible.
        worked_today
            && self.carry_dfs(
                daily_prompts,
                day_limit,
                day + 1,
                completed,
                completed,
                &vec![daily_prompts; self.workers],
                &vec![CompletionSet::new(); self.workers],
                false,
            )
    }
}
