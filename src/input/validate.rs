// src/input/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::{DaypackError, Result};
use crate::input::model::{TaskId, TaskMap};

/// Run structural validation against a parsed task set.
///
/// This checks:
/// - there is at least one task
/// - every dependency refers to an existing task
/// - no task depends on itself
/// - the dependency graph has no cycles
///
/// All of these are fatal before any search runs; the searches themselves
/// assume a validated task set.
pub fn validate_tasks(tasks: &TaskMap) -> Result<()> {
    ensure_has_tasks(tasks)?;
    validate_dependency_refs(tasks)?;
    validate_acyclic(tasks)?;
    Ok(())
}

fn ensure_has_tasks(tasks: &TaskMap) -> Result<()> {
    if tasks.is_empty() {
        return Err(DaypackError::Input(
            "input contains no tasks (at least one 'A' line required)".to_string(),
        ));
    }
    Ok(())
}

fn validate_dependency_refs(tasks: &TaskMap) -> Result<()> {
    for task in tasks.values() {
        for dep in &task.deps {
            if !tasks.contains_key(dep) {
                return Err(DaypackError::Input(format!(
                    "task {} depends on non-existent task {}",
                    task.id, dep
                )));
            }
            if *dep == task.id {
                return Err(DaypackError::Input(format!(
                    "task {} cannot depend on itself",
                    task.id
                )));
            }
        }
    }
    Ok(())
}

fn validate_acyclic(tasks: &TaskMap) -> Result<()> {
    // Edge direction: dep -> dependent. For `A 2 4 1 0` (task 2 depends on
    // task 1) we add edge 1 -> 2.
    let mut graph: DiGraphMap<TaskId, ()> = DiGraphMap::new();

    for id in tasks.keys() {
        graph.add_node(*id);
    }

    for task in tasks.values() {
        for dep in &task.deps {
            graph.add_edge(*dep, task.id, ());
        }
    }

    // A topological sort fails iff there is a cycle.
    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(DaypackError::Cycle(cycle.node_id())),
    }
}
