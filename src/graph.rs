// src/graph.rs

//! Dependency graph queries shared by all three solver variants.
//!
//! The graph owns the validated task set and keeps a dependents adjacency
//! alongside the per-task dependency sets. All queries are pure; the
//! memoization used by the depth computations is scoped to a single call.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::input::model::{Task, TaskId, TaskMap};

/// Set of task ids completed so far along one search path.
///
/// Search branches clone this rather than share it; `BTreeSet` keeps
/// iteration deterministic and is usable as a visited-set key.
pub type CompletionSet = BTreeSet<TaskId>;

/// Immutable dependency DAG over a validated task set.
#[derive(Debug, Clone)]
pub struct DepGraph {
    tasks: TaskMap,
    /// Direct dependents: tasks that list the key in their `deps`.
    dependents: BTreeMap<TaskId, Vec<TaskId>>,
}

impl DepGraph {
    /// Build a graph from a task set that already passed
    /// [`crate::input::validate_tasks`].
    pub fn new(tasks: TaskMap) -> Self {
        let mut dependents: BTreeMap<TaskId, Vec<TaskId>> =
            tasks.keys().map(|id| (*id, Vec::new())).collect();

        for task in tasks.values() {
            for dep in &task.deps {
                if let Some(list) = dependents.get_mut(dep) {
                    list.push(task.id);
                }
            }
        }

        Self { tasks, dependents }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All task ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.tasks.keys().copied()
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Panics on an unknown id; all ids flowing through the solvers come
    /// from this graph.
    pub fn task(&self, id: TaskId) -> &Task {
        &self.tasks[&id]
    }

    /// Prompts required by a single task.
    pub fn prompts(&self, id: TaskId) -> u32 {
        self.tasks[&id].prompts
    }

    /// Direct dependents of a task (tasks that list it in their `deps`).
    pub fn dependents_of(&self, id: TaskId) -> &[TaskId] {
        self.dependents.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tasks not yet completed whose dependencies are all completed,
    /// in ascending id order.
    ///
    /// Recomputed on every call; callers at search nodes should expect this
    /// to dominate runtime on large inputs.
    pub fn ready_set(&self, completed: &CompletionSet) -> Vec<TaskId> {
        self.tasks
            .values()
            .filter(|t| !completed.contains(&t.id) && t.deps.is_subset(completed))
            .map(|t| t.id)
            .collect()
    }

    /// Longest dependency chain length (number of dependency levels).
    ///
    /// Informational only: distinct workers can complete several levels on
    /// the same day, so this is NOT a lower bound on the day count and is
    /// never used for pruning.
    pub fn critical_path_depth(&self) -> u32 {
        let mut memo: HashMap<TaskId, u32> = HashMap::new();
        self.ids()
            .map(|id| self.depth_via_deps(id, &mut memo))
            .max()
            .unwrap_or(0)
    }

    fn depth_via_deps(&self, id: TaskId, memo: &mut HashMap<TaskId, u32>) -> u32 {
        if let Some(d) = memo.get(&id) {
            return *d;
        }
        let d = 1 + self.tasks[&id]
            .deps
            .iter()
            .map(|dep| self.depth_via_deps(*dep, memo))
            .max()
            .unwrap_or(0);
        memo.insert(id, d);
        d
    }

    /// Longest dependent chain within the not-yet-completed subgraph.
    ///
    /// Unlike [`critical_path_depth`](Self::critical_path_depth) this IS a
    /// valid lower bound on remaining days for the dual-pool variant, where
    /// a day's picks are judged against the previous day's completions only.
    pub fn remaining_depth(&self, completed: &CompletionSet) -> u32 {
        let mut memo: HashMap<TaskId, u32> = HashMap::new();
        self.ids()
            .filter(|id| !completed.contains(id))
            .map(|id| self.depth_via_dependents(id, completed, &mut memo))
            .max()
            .unwrap_or(0)
    }

    fn depth_via_dependents(
        &self,
        id: TaskId,
        completed: &CompletionSet,
        memo: &mut HashMap<TaskId, u32>,
    ) -> u32 {
        if let Some(d) = memo.get(&id) {
            return *d;
        }
        let d = 1 + self
            .dependents_of(id)
            .iter()
            .filter(|c| !completed.contains(c))
            .map(|c| self.depth_via_dependents(*c, completed, memo))
            .max()
            .unwrap_or(0);
        memo.insert(id, d);
        d
    }

    /// Sum of prompt requirements over all tasks.
    pub fn total_prompts(&self) -> u32 {
        self.tasks.values().map(|t| t.prompts).sum()
    }

    /// Largest single-task prompt requirement.
    pub fn max_prompts(&self) -> u32 {
        self.tasks.values().map(|t| t.prompts).max().unwrap_or(0)
    }
}
