// src/report.rs

//! Human-readable rendering of search results.
//!
//! Results go to stdout; diagnostics go to the tracing subscriber on
//! stderr. Rendering never does the searching — everything here formats
//! already-computed values.

use std::fmt::Write as _;

use crate::solver::dual::AllocationOutcome;
use crate::solver::schedule::{FoundSchedule, Schedule};

/// `Day 1: A1, A7` lines, one per bucket.
pub fn render_schedule(schedule: &Schedule) -> String {
    let mut out = String::new();
    for (idx, day) in schedule.days.iter().enumerate() {
        let tasks: Vec<String> = day.iter().map(|id| format!("A{id}")).collect();
        let _ = writeln!(out, "  Day {}: {}", idx + 1, tasks.join(", "));
    }
    out
}

/// Full enumeration report: counts, then each schedule with its label.
pub fn render_schedules(found: &[FoundSchedule]) -> String {
    if found.is_empty() {
        return "No valid schedules found.".to_string();
    }

    let packed = found.iter().filter(|f| f.packed).count();
    let relaxed = found.len() - packed;

    let mut out = String::new();
    let _ = writeln!(out, "Found {} valid schedule(s):", found.len());
    let _ = writeln!(out, "  - Packed: {packed} (days fully utilized)");
    let _ = writeln!(out, "  - Relaxed: {relaxed} (advanced day early)");

    for (idx, item) in found.iter().enumerate() {
        let label = if item.packed { "Packed" } else { "Relaxed" };
        let _ = writeln!(out, "\nSchedule {} ({label}):", idx + 1);
        out.push_str(&render_schedule(&item.schedule));
    }

    out
}

/// One `Minimum Days: 3` / `Impossible` line.
pub fn render_minimum(label: &str, value: Option<u32>) -> String {
    match value {
        Some(v) => format!("Minimum {label}: {v}"),
        None => "Impossible".to_string(),
    }
}

/// One per-strategy result line of the dual-pool report, e.g.
/// `[  DFS] Min Days: 3 | Scheme: g=5,h=4 | Nodes: 120`.
pub fn render_allocation(strategy_label: &str, kind: &str, outcome: &AllocationOutcome) -> String {
    let tag = format!("[{strategy_label:>5}]");
    match (outcome.value, outcome.scheme) {
        (Some(value), Some((g, h))) => {
            format!(
                "{tag} Min {kind}: {value} | Scheme: g={g},h={h} | Nodes: {}",
                outcome.expanded
            )
        }
        _ => format!("{tag} Impossible | Nodes: {}", outcome.expanded),
    }
}
