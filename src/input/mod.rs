// src/input/mod.rs

//! Problem input: the line-oriented text format, its data model, and
//! structural validation.
//!
//! - [`model`] holds the parsed task records.
//! - [`loader`] reads and parses input files.
//! - [`validate`] checks dependency references and acyclicity.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, parse_str};
pub use model::{InputFile, Task, TaskId, TaskMap};
pub use validate::validate_tasks;
