// src/input/loader.rs

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::errors::{DaypackError, Result};
use crate::input::model::{InputFile, Task, TaskId};
use crate::input::validate::validate_tasks;

/// Parse input text into an [`InputFile`].
///
/// Format, one directive per line:
///
/// ```text
/// % comment (ignored, as are blank lines)
/// N <workers>
/// K <prompts per worker per day>
/// A <id> <prompts> <dep_id>... 0
/// ```
///
/// Directive letters are case-insensitive. The dependency list of an `A`
/// line is terminated by the first `0`; `0` is never a real task id.
///
/// This only parses; it does **not** perform semantic validation (dependency
/// references, acyclicity). Use [`load_and_validate`] for that.
pub fn parse_str(text: &str) -> Result<InputFile> {
    let mut input = InputFile::default();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0].to_ascii_uppercase().as_str() {
            "N" => {
                input.workers = Some(parse_field(&parts, 1, line_no, "N requires a value")?);
            }
            "K" => {
                input.daily_prompts = Some(parse_field(&parts, 1, line_no, "K requires a value")?);
            }
            "A" => {
                let task = parse_task_line(&parts, line_no)?;
                input.tasks.insert(task.id, task);
            }
            other => {
                return Err(DaypackError::InputLine {
                    line: line_no,
                    msg: format!("unknown directive '{other}' (expected N, K or A)"),
                });
            }
        }
    }

    debug!(
        tasks = input.tasks.len(),
        workers = ?input.workers,
        daily_prompts = ?input.daily_prompts,
        "parsed input"
    );

    Ok(input)
}

/// `A <id> <prompts> <dep_id>... 0`
fn parse_task_line(parts: &[&str], line_no: usize) -> Result<Task> {
    if parts.len() < 4 {
        return Err(DaypackError::InputLine {
            line: line_no,
            msg: "task format is 'A <id> <prompts> <dep_id>... 0'".into(),
        });
    }

    let id: TaskId = parse_field(parts, 1, line_no, "task id must be an integer")?;
    if id == 0 {
        return Err(DaypackError::InputLine {
            line: line_no,
            msg: "task id 0 is reserved as the dependency terminator".into(),
        });
    }

    let prompts: u32 = parse_field(parts, 2, line_no, "prompt count must be an integer")?;
    if prompts == 0 {
        return Err(DaypackError::InputLine {
            line: line_no,
            msg: format!("task {id} must require at least one prompt"),
        });
    }

    let mut deps = BTreeSet::new();
    for idx in 3..parts.len() {
        let dep: TaskId = parse_field(parts, idx, line_no, "dependency id must be an integer")?;
        if dep == 0 {
            break;
        }
        deps.insert(dep);
    }

    Ok(Task { id, prompts, deps })
}

fn parse_field<T: std::str::FromStr>(
    parts: &[&str],
    idx: usize,
    line_no: usize,
    msg: &str,
) -> Result<T> {
    parts
        .get(idx)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| DaypackError::InputLine {
            line: line_no,
            msg: msg.to_string(),
        })
}

/// Read and parse an input file from disk, without semantic validation.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<InputFile> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading input file at {path:?}"))?;
    parse_str(&contents)
}

/// Read, parse and validate an input file.
///
/// This is the entry point the binaries use:
/// - reads the file,
/// - parses the line format,
/// - checks for unknown dependency references, self-dependencies and cycles.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<InputFile> {
    let input = load_from_path(path)?;
    validate_tasks(&input.tasks)?;
    Ok(input)
}
