// src/solver/dual.rs

//! Two resource pools, three search strategies, and the allocation sweeps.
//!
//! Tasks split into two fixed classes by id parity; each class draws from
//! its own pooled daily capacity (`g` for the primary class, `h` for the
//! secondary). Two packing granularities:
//!
//! - [`PackingCase::Atomic`] — a day is chosen as a whole: a subset of the
//!   ready set, at most one task per worker, with per-class prompt sums
//!   within the pools. Readiness sees previous days' completions only.
//! - [`PackingCase::Incremental`] — tasks are added one at a time against
//!   the two pools, with the carry-over readiness rule of
//!   [`crate::solver::optimal::ShareMode::CarryOver`] generalized to two
//!   classes.
//!
//! Strategies: plain DFS (exhaustive minimum confirmation), DFS with
//! branch-and-bound pruning on an admissible lower bound, and A* over day
//! states with the same bound as heuristic. All three return the same
//! optimum; they differ only in how many nodes they expand.

use std::collections::{BinaryHeap, HashSet};

use tracing::debug;

use crate::graph::{CompletionSet, DepGraph};
use crate::input::model::TaskId;

/// Resource class of a task, fixed by id parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceClass {
    /// Even ids; drawn from the `g` pool, priced at `c1` per unit.
    Primary,
    /// Odd ids; drawn from the `h` pool, priced at `c2` per unit.
    Secondary,
}

/// Deterministic class rule shared by every dual-pool query.
pub fn class_of(id: TaskId) -> ResourceClass {
    if id % 2 == 0 {
        ResourceClass::Primary
    } else {
        ResourceClass::Secondary
    }
}

/// Day-packing granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackingCase {
    /// Whole-day subset packing, one task per worker (case A).
    Atomic,
    /// Single-task fitting with cross-worker carry-over (case B).
    Incremental,
}

/// Search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Dfs,
    Dfbb,
    AStar,
}

/// Result of one search run.
#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    /// Minimum day count, or `None` when the day limit cannot be met.
    pub days: Option<u32>,
    /// Nodes expanded: one per DFS call, one per A* dequeue.
    pub expanded: u64,
}

/// A dual-pool scheduling problem at one fixed capacity allocation.
pub struct DualProblem<'a> {
    graph: &'a DepGraph,
    workers: usize,
    cap_primary: u32,
    cap_secondary: u32,
    day_limit: u32,
}

impl<'a> DualProblem<'a> {
    pub fn new(
        graph: &'a DepGraph,
        workers: usize,
        cap_primary: u32,
        cap_secondary: u32,
        day_limit: u32,
    ) -> Self {
        Self {
            graph,
            workers,
            cap_primary,
            cap_secondary,
            day_limit,
        }
    }

    /// Admissible lower bound on the days still needed from `done`.
    ///
    /// Each class's remaining prompt total divided by its daily pool is a
    /// valid bound in both cases. The longest dependent chain among
    /// unfinished tasks is valid only for [`PackingCase::Atomic`], where a
    /// day's picks see previous days' completions exclusively; under
    /// carry-over a single worker can collapse a whole chain into one day,
    /// so the incremental bound keeps the capacity components alone. A zero
    /// pool with remaining work in its class makes the state a dead end,
    /// expressed as a saturated bound.
    pub fn heuristic(&self, case: PackingCase, done: &CompletionSet) -> u32 {
        let (rest_primary, rest_secondary) = self.remaining_class_prompts(done);

        let bound_primary = match (self.cap_primary, rest_primary) {
            (0, 0) => 0,
            (0, _) => return u32::MAX,
            (cap, rest) => rest.div_ceil(cap),
        };
        let bound_secondary = match (self.cap_secondary, rest_secondary) {
            (0, 0) => 0,
            (0, _) => return u32::MAX,
            (cap, rest) => rest.div_ceil(cap),
        };

        let depth = match case {
            PackingCase::Atomic => self.graph.remaining_depth(done),
            PackingCase::Incremental => 0,
        };

        depth.max(bound_primary).max(bound_secondary)
    }

    /// Remaining prompt totals per class, over tasks not in `done`.
    fn remaining_class_prompts(&self, done: &CompletionSet) -> (u32, u32) {
        let mut primary = 0;
        let mut secondary = 0;
        for task in self.graph.tasks() {
            if done.contains(&task.id) {
                continue;
            }
            match class_of(task.id) {
                ResourceClass::Primary => primary += task.prompts,
                ResourceClass::Secondary => secondary += task.prompts,
            }
        }
        (primary, secondary)
    }

    /// Per-class prompt sums of a candidate day subset.
    fn class_sums(&self, picks: &[TaskId]) -> (u32, u32) {
        let mut primary = 0;
        let mut secondary = 0;
        for id in picks {
            match class_of(*id) {
                ResourceClass::Primary => primary += self.graph.prompts(*id),
                ResourceClass::Secondary => secondary += self.graph.prompts(*id),
            }
        }
        (primary, secondary)
    }

    /// Run one strategy over one packing case.
    pub fn solve(&self, case: PackingCase, strategy: Strategy) -> SearchOutcome {
        let outcome = match (case, strategy) {
            (PackingCase::Atomic, Strategy::Dfs) => self.atomic_depth_first(false),
            (PackingCase::Atomic, Strategy::Dfbb) => self.atomic_depth_first(true),
            (PackingCase::Atomic, Strategy::AStar) => self.atomic_astar(),
            (PackingCase::Incremental, Strategy::Dfs) => self.incremental_depth_first(false),
            (PackingCase::Incremental, Strategy::Dfbb) => self.incremental_depth_first(true),
            (PackingCase::Incremental, Strategy::AStar) => self.incremental_astar(),
        };
        debug!(
            ?case,
            ?strategy,
            days = ?outcome.days,
            expanded = outcome.expanded,
            g = self.cap_primary,
            h = self.cap_secondary,
            "dual search finished"
        );
        outcome
    }

    // ---- Atomic (case A) ---------------------------------------------

    fn atomic_depth_first(&self, prune: bool) -> SearchOutcome {
        let mut best = None;
        let mut expanded = 0;
        self.atomic_dfs(1, &CompletionSet::new(), prune, &mut best, &mut expanded);
        SearchOutcome {
            days: best,
            expanded,
        }
    }

    fn atomic_dfs(
        &self,
        day: u32,
        done: &CompletionSet,
        prune: bool,
        best: &mut Option<u32>,
        expanded: &mut u64,
    ) {
        *expanded += 1;

        if done.len() == self.graph.len() {
            // `day` was already advanced past the last working day.
            let finished = day - 1;
            if best.is_none_or(|b| finished < b) {
                *best = Some(finished);
            }
            return;
        }
        if day > self.day_limit {
            return;
        }
        if prune
            && let Some(b) = *best
            && (day - 1).saturating_add(self.heuristic(PackingCase::Atomic, done)) >= b
        {
            return;
        }

        let ready = self.graph.ready_set(done);
        if ready.is_empty() {
            return;
        }

        // Larger subsets first: greedy-first-success ordering favors fewer
        // days without affecting completeness.
        let max_size = self.workers.min(ready.len());
        for size in (1..=max_size).rev() {
            for_each_combination(&ready, size, &mut |combo| {
                let (sum_primary, sum_secondary) = self.class_sums(combo);
                if sum_primary <= self.cap_primary && sum_secondary <= self.cap_secondary {
                    let mut next = done.clone();
                    next.extend(combo.iter().copied());
                    self.atomic_dfs(day + 1, &next, prune, best, expanded);
                }
            });
        }
    }

    fn atomic_astar(&self) -> SearchOutcome {
        let mut expanded = 0u64;
        let mut seq = 0u64;
        let mut open: BinaryHeap<Frontier> = BinaryHeap::new();
        let mut visited: HashSet<CompletionSet> = HashSet::new();

        open.push(Frontier {
            f: self.heuristic(PackingCase::Atomic, &CompletionSet::new()),
            seq,
            day: 0,
            done: CompletionSet::new(),
        });

        while let Some(node) = open.pop() {
            expanded += 1;

            if node.done.len() == self.graph.len() {
                return SearchOutcome {
                    days: Some(node.day),
                    expanded,
                };
            }
            if node.day >= self.day_limit {
                continue;
            }
            // Every expansion advances exactly one day, so the completion
            // set alone identifies the state.
            if !visited.insert(node.done.clone()) {
                continue;
            }

            let ready = self.graph.ready_set(&node.done);
            let max_size = self.workers.min(ready.len());
            for size in 1..=max_size {
                for_each_combination(&ready, size, &mut |combo| {
                    let (sum_primary, sum_secondary) = self.class_sums(combo);
                    if sum_primary <= self.cap_primary && sum_secondary <= self.cap_secondary {
                        let mut next = node.done.clone();
                        next.extend(combo.iter().copied());
                        seq += 1;
                        open.push(Frontier {
                            f: (node.day + 1).saturating_add(self.heuristic(PackingCase::Atomic, &next)),
                            seq,
                            day: node.day + 1,
                            done: next,
                        });
                    }
                });
            }
        }

        SearchOutcome {
            days: None,
            expanded,
        }
    }

    // ---- Incremental (case B) ----------------------------------------

    /// Tasks attemptable right now under two-class carry-over rules, with
    /// the workers allowed to attempt each.
    fn carry_ready(
        &self,
        done: &CompletionSet,
        horizon: &CompletionSet,
        worker_done: &[CompletionSet],
    ) -> Vec<(TaskId, Vec<usize>)> {
        let mut ready = Vec::new();
        for task in self.graph.tasks() {
            if done.contains(&task.id) {
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

    fn incremental_depth_first(&self, prune: bool) -> SearchOutcome {
        let mut best = None;
        let mut expanded = 0;
        self.incremental_dfs(
            1,
            &CompletionSet::new(),
            &CompletionSet::new(),
            self.cap_primary,
            self.cap_secondary,
            &vec![CompletionSet::new(); self.workers],
            false,
            prune,
            &mut best,
            &mut expanded,
        );
        SearchOutcome {
            days: best,
            expanded,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn incremental_dfs(
        &self,
        day: u32,
        done: &CompletionSet,
        horizon: &CompletionSet,
        rest_primary: u32,
        rest_secondary: u32,
        worker_done: &[CompletionSet],
        worked_today: bool,
        prune: bool,
        best: &mut Option<u32>,
        expanded: &mut u64,
    ) {
        *expanded += 1;

        if done.len() == self.graph.len() {
            // Work happened on `day` itself, so it counts.
            if best.is_none_or(|b| day < b) {
                *best = Some(day);
            }
            return;
        }
        if day > self.day_limit {
            return;
        }
        if prune
            && let Some(b) = *best
            && (day - 1).saturating_add(self.heuristic(PackingCase::Incremental, done)) >= b
        {
            return;
        }

        for (id, allowed) in self.carry_ready(done, horizon, worker_done) {
            let prompts = self.graph.prompts(id);
            let pool = match class_of(id) {
                ResourceClass::Primary => rest_primary,
                ResourceClass::Secondary => rest_secondary,
            };
            if pool < prompts {
                continue;
            }
            let (next_primary, next_secondary) = match class_of(id) {
                ResourceClass::Primary => (rest_primary - prompts, rest_secondary),
                ResourceClass::Secondary => (rest_primary, rest_secondary - prompts),
            };
            for w in &allowed {
                let mut next_worker_done = worker_done.to_vec();
                next_worker_done[*w].insert(id);
                let mut next_done = done.clone();
                next_done.insert(id);
                self.incremental_dfs(
                    day,
                    &next_done,
                    horizon,
                    next_primary,
                    next_secondary,
                    &next_worker_done,
                    true,
                    prune,
                    best,
                    expanded,
                );
            }
        }

        if worked_today {
            self.incremental_dfs(
                day + 1,
                done,
                done,
                self.cap_primary,
                self.cap_secondary,
                &vec![CompletionSet::new(); self.workers],
                false,
                prune,
                best,
                expanded,
            );
        }
    }

    /// All completion sets reachable by the end of one day, starting from
    /// `done` with full pools. Includes `done` itself (a day may be ended
    /// early), though the A* driver skips the no-progress successor.
    fn day_closure(
        &self,
        done: &CompletionSet,
        horizon: &CompletionSet,
        rest_primary: u32,
        rest_secondary: u32,
        worker_done: &[CompletionSet],
        out: &mut HashSet<CompletionSet>,
    ) {
        for (id, allowed) in self.carry_ready(done, horizon, worker_done) {
            let prompts = self.graph.prompts(id);
            let pool = match class_of(id) {
                ResourceClass::Primary => rest_primary,
                ResourceClass::Secondary => rest_secondary,
            };
            if pool < prompts {
                continue;
            }
            let (next_primary, next_secondary) = match class_of(id) {
                ResourceClass::Primary => (rest_primary - prompts, rest_secondary),
                ResourceClass::Secondary => (rest_primary, rest_secondary - prompts),
            };
            for w in &allowed {
                let mut next_worker_done = worker_done.to_vec();
                next_worker_done[*w].insert(id);
                let mut next_done = done.clone();
                next_done.insert(id);
                self.day_closure(
                    &next_done,
                    horizon,
                    next_primary,
                    next_secondary,
                    &next_worker_done,
                    out,
                );
            }
        }
        out.insert(done.clone());
    }

    fn incremental_astar(&self) -> SearchOutcome {
        let mut expanded = 0u64;
        let mut seq = 0u64;
        let mut open: BinaryHeap<Frontier> = BinaryHeap::new();
        let mut visited: HashSet<(u32, CompletionSet)> = HashSet::new();

        open.push(Frontier {
            f: self.heuristic(PackingCase::Incremental, &CompletionSet::new()),
            seq,
            day: 1,
            done: CompletionSet::new(),
        });

        while let Some(node) = open.pop() {
            expanded += 1;

            if node.done.len() == self.graph.len() {
                // `day` is the next day to start; the work finished the day
                // before.
                return SearchOutcome {
                    days: Some(node.day - 1),
                    expanded,
                };
            }
            if node.day > self.day_limit {
                continue;
            }
            // The same completion set on different days is a different
            // state here, so the day index is part of the key.
            if !visited.insert((node.day, node.done.clone())) {
                continue;
            }

            // At a day boundary everything completed so far is globally
            // visible, so the node's completion set is also the horizon.
            let mut closure = HashSet::new();
            self.day_closure(
                &node.done,
                &node.done,
                self.cap_primary,
                self.cap_secondary,
                &vec![CompletionSet::new(); self.workers],
                &mut closure,
            );

            for next in closure {
                if next == node.done {
                    continue;
                }
                seq += 1;
                open.push(Frontier {
                    f: node.day.saturating_add(self.heuristic(PackingCase::Incremental, &next)),
                    seq,
                    day: node.day + 1,
                    done: next,
                });
            }
        }

        SearchOutcome {
            days: None,
            expanded,
        }
    }
}

/// Frontier node for the A* searches.
///
/// Ordered by (f, seq) ascending through a reversed `Ord`, so the
/// `BinaryHeap` pops the lowest f first and breaks ties by insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Frontier {
    f: u32,
    seq: u64,
    day: u32,
    done: CompletionSet,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Visit every `size`-element combination of `items`, in item order.
fn for_each_combination(items: &[TaskId], size: usize, visit: &mut impl FnMut(&[TaskId])) {
    fn recurse(
        items: &[TaskId],
        size: usize,
        start: usize,
        scratch: &mut Vec<TaskId>,
        visit: &mut impl FnMut(&[TaskId]),
    ) {
        if scratch.len() == size {
            visit(scratch);
            return;
        }
        // Upper bound keeps enough items in reach to fill the combination.
        let needed = size - scratch.len();
        for i in start..=items.len().saturating_sub(needed) {
            scratch.push(items[i]);
            recurse(items, size, i + 1, scratch, visit);
            scratch.pop();
        }
    }

    if size == 0 || size > items.len() {
        return;
    }
    let mut scratch = Vec::with_capacity(size);
    recurse(items, size, 0, &mut scratch, visit);
}

/// Outcome of an allocation sweep: the minimized value (days or cost), the
/// summed expansion count, and the winning (g, h) allocation.
#[derive(Debug, Clone, Copy)]
pub struct AllocationOutcome {
    pub value: Option<u64>,
    pub expanded: u64,
    pub scheme: Option<(u32, u32)>,
}

/// Minimum day count over all capacity allocations affordable within
/// `budget`, where an allocation (g, h) costs `g * c1 + h * c2` per day.
///
/// For each affordable g, h takes the remaining budget (more capacity never
/// hurts). Allocations that cannot fit the largest task of either class are
/// discarded up front; once a best day count is known, later allocations
/// only search for strictly fewer days.
#[allow(clippy::too_many_arguments)]
pub fn find_min_days(
    graph: &DepGraph,
    workers: usize,
    case: PackingCase,
    strategy: Strategy,
    budget: u32,
    unit_cost_primary: u32,
    unit_cost_secondary: u32,
) -> AllocationOutcome {
    let (max_primary, max_secondary) = max_class_prompts(graph);
    let day_cap = graph.len() as u32;

    let mut schemes = Vec::new();
    for g in 0..=budget / unit_cost_primary {
        let h = (budget - g * unit_cost_primary) / unit_cost_secondary;
        if (g > 0 || h > 0) && g >= max_primary && h >= max_secondary {
            schemes.push((g, h));
        }
    }

    let mut best: Option<u32> = None;
    let mut expanded = 0u64;
    let mut scheme = None;

    for (g, h) in schemes {
        let day_limit = match best {
            Some(b) => day_cap.min(b - 1),
            None => day_cap,
        };
        let problem = DualProblem::new(graph, workers, g, h, day_limit);
        let outcome = problem.solve(case, strategy);
        expanded += outcome.expanded;
        if let Some(days) = outcome.days
            && best.is_none_or(|b| days < b)
        {
            best = Some(days);
            scheme = Some((g, h));
        }
    }

    AllocationOutcome {
        value: best.map(u64::from),
        expanded,
        scheme,
    }
}

/// Minimum per-day cost `g * c1 + h * c2` over all allocations that finish
/// within `day_limit` days.
///
/// g sweeps [largest primary task, total primary prompts] and h likewise
/// for the secondary class; pairs whose cost already matches or exceeds the
/// best are skipped without searching.
#[allow(clippy::too_many_arguments)]
pub fn find_min_cost(
    graph: &DepGraph,
    workers: usize,
    case: PackingCase,
    strategy: Strategy,
    day_limit: u32,
    unit_cost_primary: u32,
    unit_cost_secondary: u32,
) -> AllocationOutcome {
    let (max_primary, max_secondary) = max_class_prompts(graph);
    let (total_primary, total_secondary) = total_class_prompts(graph);

    let mut best: Option<u64> = None;
    let mut expanded = 0u64;
    let mut scheme = None;

    for g in max_primary..=total_primary.max(max_primary) {
        for h in max_secondary..=total_secondary.max(max_secondary) {
            let cost = u64::from(g) * u64::from(unit_cost_primary)
                + u64::from(h) * u64::from(unit_cost_secondary);
            if best.is_some_and(|b| cost >= b) {
                continue;
            }
            let problem = DualProblem::new(graph, workers, g, h, day_limit);
            let outcome = problem.solve(case, strategy);
            expanded += outcome.expanded;
            if outcome.days.is_some() {
                best = Some(cost);
                scheme = Some((g, h));
            }
        }
    }

    AllocationOutcome {
        value: best,
        expanded,
        scheme,
    }
}

fn max_class_prompts(graph: &DepGraph) -> (u32, u32) {
    let mut primary = 0;
    let mut secondary = 0;
    for task in graph.tasks() {
        match class_of(task.id) {
            ResourceClass::Primary => primary = primary.max(task.prompts),
            ResourceClass::Secondary => secondary = secondary.max(task.prompts),
        }
    }
    (primary, secondary)
}

fn total_class_prompts(graph: &DepGraph) -> (u32, u32) {
    let mut primary = 0;
    let mut secondary = 0;
    for task in graph.tasks() {
        match class_of(task.id) {
            ResourceClass::Primary => primary += task.prompts,
            ResourceClass::Secondary => secondary += task.prompts,
        }
    }
    (primary, secondary)
}
