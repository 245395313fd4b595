// src/cli.rs

//! CLI argument parsing using `clap` (derive).
//!
//! Three binaries share this module, one `Parser` struct each. The
//! mutually-exclusive query flags of the optimization binaries are modelled
//! with an `ArgGroup`, and the parameter each query needs is enforced with
//! `required_if_eq`.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};

/// `daypack-enumerate`: list every distinct valid schedule.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "daypack-enumerate",
    version,
    about = "Enumerate all valid task schedules within a day limit.",
    long_about = None
)]
pub struct EnumerateArgs {
    /// Path to the input file.
    pub input: PathBuf,

    /// Maximum number of days a schedule may span.
    #[arg(value_name = "DAYS", value_parser = clap::value_parser!(u32).range(1..))]
    pub day_limit: u32,

    /// Emit the schedule list as JSON instead of the text report.
    #[arg(long)]
    pub json: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DAYPACK_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// `daypack-optimize`: minimum days or minimum daily prompt budget.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "daypack-optimize",
    version,
    about = "Find the minimum days or minimum daily prompt budget for a valid schedule.",
    long_about = None,
    group(ArgGroup::new("query").required(true))
)]
pub struct OptimizeArgs {
    /// Path to the input file.
    pub input: PathBuf,

    /// Dependency sharing model: 1 = strict, 2 = cross-worker carry-over.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub mode: u8,

    /// Number of workers.
    #[arg(long = "N", value_name = "COUNT", value_parser = clap::value_parser!(usize))]
    pub workers: usize,

    /// Minimize the number of days (requires --K).
    #[arg(long = "find-days", group = "query")]
    pub find_days: bool,

    /// Minimize the daily prompt budget (requires --M).
    #[arg(long = "find-prompts", group = "query")]
    pub find_prompts: bool,

    /// Daily prompt budget per worker, for --find-days.
    #[arg(long = "K", value_name = "PROMPTS", required_if_eq("find_days", "true"))]
    pub daily_prompts: Option<u32>,

    /// Day limit, for --find-prompts.
    #[arg(
        long = "M",
        value_name = "DAYS",
        required_if_eq("find_prompts", "true"),
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub day_limit: Option<u32>,

    /// Logging level (error, warn, info, debug, trace).
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// `daypack-dual`: two resource pools, cost/day optimization, strategy pick.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "daypack-dual",
    version,
    about = "Dual-pool scheduling: minimize days under a budget, or cost under a day limit.",
    long_about = None,
    group(ArgGroup::new("query").required(true))
)]
pub struct DualArgs {
    /// Path to the input file.
    pub input: PathBuf,

    /// Packing granularity: A = whole-day subsets, B = incremental fitting.
    #[arg(long, value_enum)]
    pub case: CaseArg,

    /// Number of workers.
    #[arg(long = "N", value_name = "COUNT", value_parser = clap::value_parser!(usize))]
    pub workers: usize,

    /// Per-unit daily cost of primary-pool capacity.
    #[arg(long = "c1", value_name = "COST", value_parser = clap::value_parser!(u32).range(1..))]
    pub unit_cost_primary: u32,

    /// Per-unit daily cost of secondary-pool capacity.
    #[arg(long = "c2", value_name = "COST", value_parser = clap::value_parser!(u32).range(1..))]
    pub unit_cost_secondary: u32,

    /// Minimize days across allocations within --budget.
    #[arg(long = "find-days", group = "query")]
    pub find_days: bool,

    /// Minimize allocation cost within the --M day limit.
    #[arg(long = "find-cost", group = "query")]
    pub find_cost: bool,

    /// Total per-day capacity budget, for --find-days.
    #[arg(long, value_name = "BUDGET", required_if_eq("find_days", "true"))]
    pub budget: Option<u32>,

    /// Day limit, for --find-cost.
    #[arg(
        long = "M",
        value_name = "DAYS",
        required_if_eq("find_cost", "true"),
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub day_limit: Option<u32>,

    /// Search strategy to run.
    #[arg(long, value_enum, default_value_t = AlgoArg::All)]
    pub algo: AlgoArg,

    /// Logging level (error, warn, info, debug, trace).
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Packing case as exposed on the CLI (uppercase, as in `--case A`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum CaseArg {
    #[value(name = "A")]
    A,
    #[value(name = "B")]
    B,
}

/// Strategy selection as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum AlgoArg {
    Dfs,
    Dfbb,
    Astar,
    All,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}
