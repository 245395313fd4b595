// src/solver/schedule.rs

use serde::Serialize;

use crate::graph::DepGraph;
use crate::input::model::TaskId;

/// A complete schedule: one bucket of task ids per day, in day order.
///
/// Canonical form sorts the ids within each bucket, since workers are
/// interchangeable and a day has no sub-ordering in the output. Two
/// schedules are the same schedule iff their canonical bucket sequences are
/// equal; this is the deduplication key used by the enumerator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Schedule {
    pub days: Vec<Vec<TaskId>>,
}

impl Schedule {
    /// Canonicalize a raw bucket sequence (sort ids within each day).
    pub fn canonical(mut days: Vec<Vec<TaskId>>) -> Self {
        for day in &mut days {
            day.sort_unstable();
        }
        Self { days }
    }

    /// Number of days the schedule spans.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Check the dependency invariant: every task appears exactly once, and
    /// each of its dependencies sits in a bucket with index <= its own.
    ///
    /// Same-bucket dependencies are legal under the enumerator's
    /// immediate-visibility rule (a worker may pick up a task the same day
    /// its dependencies finished), so equality is allowed here.
    pub fn respects_dependencies(&self, graph: &DepGraph) -> bool {
        let mut bucket_of = std::collections::BTreeMap::new();
        for (idx, day) in self.days.iter().enumerate() {
            for id in day {
                if bucket_of.insert(*id, idx).is_some() {
                    return false;
                }
            }
        }
        if bucket_of.len() != graph.len() {
            return false;
        }
        graph.tasks().all(|task| {
            let Some(own) = bucket_of.get(&task.id) else {
                return false;
            };
            task.deps
                .iter()
                .all(|dep| bucket_of.get(dep).is_some_and(|b| b <= own))
        })
    }
}

/// A schedule found by the enumerator, labelled packed or relaxed.
///
/// A schedule is *packed* when no day was ended while more ready work still
/// fit some worker; *relaxed* when at least one day was cut short. The label
/// is informational and not part of the deduplication key.
#[derive(Debug, Clone, Serialize)]
pub struct FoundSchedule {
    pub schedule: Schedule,
    pub packed: bool,
}
