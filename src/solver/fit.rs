// src/solver/fit.rs

//! First-fit assignment of a task to a worker's remaining daily capacity.
//!
//! Workers are interchangeable for output purposes, so the policy scans the
//! capacity vector left to right and charges the first slot that can absorb
//! the task. The returned vector is a fresh copy; callers branch on it
//! without touching their own state.

/// Try to place a task costing `prompts` into the first worker slot with
/// sufficient remaining capacity.
///
/// Returns the chosen worker index and the updated capacity vector, or
/// `None` when no worker can absorb the task today.
pub fn first_fit(prompts: u32, remaining: &[u32]) -> Option<(usize, Vec<u32>)> {
    let slot = remaining.iter().position(|r| *r >= prompts)?;
    let mut updated = remaining.to_vec();
    updated[slot] -= prompts;
    Some((slot, updated))
}

/// Whether any worker could still absorb a task costing `prompts` today.
pub fn fits_any(prompts: u32, remaining: &[u32]) -> bool {
    remaining.iter().any(|r| *r >= prompts)
}
