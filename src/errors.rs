// src/errors.rs

//! Crate-wide error types.
//!
//! Everything here is detected *before* a search starts. The searches
//! themselves never fail: an exhausted search is a normal outcome and is
//! reported as `None` / an empty result set by the solver APIs.

use thiserror::Error;

use crate::input::model::TaskId;

#[derive(Error, Debug)]
pub enum DaypackError {
    #[error("Input error: {0}")]
    Input(String),

    #[error("Input error at line {line}: {msg}")]
    InputLine { line: usize, msg: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cycle detected in dependency graph involving task {0}")]
    Cycle(TaskId),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DaypackError>;
