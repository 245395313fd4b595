// src/solver/mod.rs

//! The three search engines and their shared pieces.
//!
//! - [`fit`] first-fit capacity packing for a single day.
//! - [`schedule`] canonical schedule representation and invariants.
//! - [`feasibility`] pre-search sanity checks for the enumerator.
//! - [`enumerate`] exhaustive enumeration of all valid schedules.
//! - [`optimal`] feasibility decision + binary-search minimization.
//! - [`dual`] two resource pools, three strategies, allocation sweeps.

pub mod dual;
pub mod enumerate;
pub mod feasibility;
pub mod fit;
pub mod optimal;
pub mod schedule;

pub use dual::{AllocationOutcome, DualProblem, PackingCase, SearchOutcome, Strategy};
pub use enumerate::Enumerator;
pub use optimal::{Optimizer, ShareMode};
pub use schedule::{FoundSchedule, Schedule};
