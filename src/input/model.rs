// src/input/model.rs

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::errors::{DaypackError, Result};

/// Task identifier as written in the input file.
///
/// `0` is reserved as the dependency-list terminator and is never a real id.
pub type TaskId = u32;

/// A single unit of work, parsed from an `A` line.
///
/// Immutable after parsing; owned collectively by the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Prompts consumed when a worker completes this task (>= 1).
    pub prompts: u32,
    /// Ids of tasks that must be completed before this one can start.
    pub deps: BTreeSet<TaskId>,
}

/// All tasks keyed by id, in ascending id order.
pub type TaskMap = BTreeMap<TaskId, Task>;

/// Raw parse result of an input file.
///
/// `N` and `K` are optional at this level: the enumeration program requires
/// both from the file, while the optimization programs take the worker count
/// from the command line and ignore these lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputFile {
    /// Worker count from the `N` line, if present.
    pub workers: Option<usize>,
    /// Daily per-worker prompt budget from the `K` line, if present.
    pub daily_prompts: Option<u32>,
    pub tasks: TaskMap,
}

impl InputFile {
    /// Worker count, or an input error when the file has no `N` line.
    pub fn require_workers(&self) -> Result<usize> {
        self.workers
            .ok_or_else(|| DaypackError::Input("input file missing 'N' (worker count)".into()))
    }

    /// Daily prompt budget, or an input error when the file has no `K` line.
    pub fn require_daily_prompts(&self) -> Result<u32> {
        self.daily_prompts.ok_or_else(|| {
            DaypackError::Input("input file missing 'K' (prompts per worker per day)".into())
        })
    }
}
