// src/solver/enumerate.rs

//! Exhaustive enumeration of every distinct valid schedule.
//!
//! Recursive backtracking over the state (day, completed set, capacity
//! vector, today's picks, schedule so far). At every node two kinds of
//! branches are explored:
//!
//! 1. assign any ready task that first-fits a worker and stay on the same
//!    day — the completed set updates immediately, so a task may run the
//!    same day its dependencies finished;
//! 2. if any work happened today, close the day and start the next one with
//!    fresh capacities.
//!
//! Branch 2 is taken *in addition to* branch 1, which is what produces
//! "relaxed" schedules that end a day while more work still fit. Each branch
//! owns cloned state; nothing is restored in place.

use std::collections::HashSet;

use tracing::debug;

use crate::graph::{CompletionSet, DepGraph};
use crate::input::model::TaskId;
use crate::solver::fit::{first_fit, fits_any};
use crate::solver::schedule::{FoundSchedule, Schedule};

/// Exhaustive schedule enumerator for a single-resource problem.
pub struct Enumerator<'a> {
    graph: &'a DepGraph,
    workers: usize,
    daily_prompts: u32,
    day_limit: u32,
}

impl<'a> Enumerator<'a> {
    pub fn new(graph: &'a DepGraph, workers: usize, daily_prompts: u32, day_limit: u32) -> Self {
        Self {
            graph,
            workers,
            daily_prompts,
            day_limit,
        }
    }

    /// Run the search and return every distinct schedule, in discovery
    /// order. Distinctness is judged on the canonical bucket sequence; the
    /// packed label comes from the first path that produced the sequence.
    pub fn run(&self) -> Vec<FoundSchedule> {
        let mut state = EnumState {
            seen: HashSet::new(),
            found: Vec::new(),
        };

        self.dfs(
            1,
            CompletionSet::new(),
            vec![self.daily_prompts; self.workers],
            Vec::new(),
            Vec::new(),
            true,
            &mut state,
        );

        debug!(
            schedules = state.found.len(),
            day_limit = self.day_limit,
            "enumeration finished"
        );

        state.found
    }

    #[allow(clippy::too_many_arguments)]
    fn dfs(
        &self,
        day: u32,
        completed: CompletionSet,
        remaining: Vec<u32>,
        today: Vec<TaskId>,
        schedule: Vec<Vec<TaskId>>,
        packed: bool,
        state: &mut EnumState,
    ) {
        if completed.len() == self.graph.len() {
            let mut days = schedule;
            if !today.is_empty() {
                days.push(today);
            }
            state.record(Schedule::canonical(days), packed);
            return;
        }

        if day > self.day_limit {
            return;
        }

        let ready = self.graph.ready_set(&completed);

        // Branch 1: keep working today.
        for id in &ready {
            if let Some((_slot, next_remaining)) = first_fit(self.graph.prompts(*id), &remaining) {
                let mut next_completed = completed.clone();
                next_completed.insert(*id);
                let mut next_today = today.clone();
                next_today.push(*id);
                self.dfs(
                    day,
                    next_completed,
                    next_remaining,
                    next_today,
                    schedule.clone(),
                    packed,
                    state,
                );
            }
        }

        // Branch 2: close the day. Skipped while the bucket is empty, which
        // also rules out empty buckets and endless idling; a node with no
        // fitting task and nothing done today is a dead end.
        if !today.is_empty() {
            let could_do_more = ready
                .iter()
                .any(|id| fits_any(self.graph.prompts(*id), &remaining));

            let mut next_schedule = schedule;
            next_schedule.push(today);

            self.dfs(
                day + 1,
                completed,
                vec![self.daily_prompts; self.workers],
                Vec::new(),
                next_schedule,
                packed && !could_do_more,
                state,
            );
        }
    }
}

struct EnumState {
    seen: HashSet<Vec<Vec<TaskId>>>,
    found: Vec<FoundSchedule>,
}

impl EnumState {
    fn record(&mut self, schedule: Schedule, packed: bool) {
        if self.seen.insert(schedule.days.clone()) {
            self.found.push(FoundSchedule { schedule, packed });
        }
    }
}
