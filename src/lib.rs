// src/lib.rs

pub mod cli;
pub mod errors;
pub mod graph;
pub mod input;
pub mod logging;
pub mod report;
pub mod solver;

use anyhow::{Result, bail};
use tracing::{debug, info};

use crate::cli::{AlgoArg, CaseArg, DualArgs, EnumerateArgs, OptimizeArgs};
use crate::graph::DepGraph;
use crate::input::loader::load_and_validate;
use crate::solver::dual::{self, PackingCase, Strategy};
use crate::solver::enumerate::Enumerator;
use crate::solver::feasibility;
use crate::solver::optimal::{Optimizer, ShareMode};

/// High-level entry point for `daypack-enumerate`.
///
/// Wires together input loading, validation, the pre-search feasibility
/// checks and the exhaustive enumerator, then prints the report (or JSON)
/// to stdout.
pub fn run_enumerate(args: EnumerateArgs) -> Result<()> {
    let file = load_and_validate(&args.input)?;
    let workers = file.require_workers()?;
    let daily_prompts = file.require_daily_prompts()?;
    let graph = DepGraph::new(file.tasks);

    log_problem_summary(&graph, workers, daily_prompts, args.day_limit);

    let problems = feasibility::check(&graph, workers, daily_prompts, args.day_limit);
    if !problems.is_empty() {
        bail!("infeasible input: {}", problems.join("; "));
    }

    let found = Enumerator::new(&graph, workers, daily_prompts, args.day_limit).run();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&found)?);
    } else {
        println!("{}", report::render_schedules(&found));
    }

    Ok(())
}

/// High-level entry point for `daypack-optimize`.
pub fn run_optimize(args: OptimizeArgs) -> Result<()> {
    let file = load_and_validate(&args.input)?;
    let graph = DepGraph::new(file.tasks);

    let mode = match args.mode {
        1 => ShareMode::Strict,
        _ => ShareMode::CarryOver,
    };
    let optimizer = Optimizer::new(&graph, args.workers, mode);

    if args.find_days {
        let Some(daily_prompts) = args.daily_prompts else {
            bail!("--K is required with --find-days");
        };
        info!(
            workers = args.workers,
            daily_prompts,
            ?mode,
            "searching for minimum days"
        );
        let result = optimizer.min_days(daily_prompts);
        println!("{}", report::render_minimum("Days", result));
    } else {
        let Some(day_limit) = args.day_limit else {
            bail!("--M is required with --find-prompts");
        };
        info!(
            workers = args.workers,
            day_limit,
            ?mode,
            "searching for minimum daily prompt budget"
        );
        let result = optimizer.min_prompts(day_limit);
        println!("{}", report::render_minimum("Prompts", result));
    }

    Ok(())
}

/// High-level entry point for `daypack-dual`.
pub fn run_dual(args: DualArgs) -> Result<()> {
    let file = load_and_validate(&args.input)?;
    let graph = DepGraph::new(file.tasks);

    let case = match args.case {
        CaseArg::A => PackingCase::Atomic,
        CaseArg::B => PackingCase::Incremental,
    };
    let strategies: Vec<Strategy> = match args.algo {
        AlgoArg::Dfs => vec![Strategy::Dfs],
        AlgoArg::Dfbb => vec![Strategy::Dfbb],
        AlgoArg::Astar => vec![Strategy::AStar],
        AlgoArg::All => vec![Strategy::Dfs, Strategy::Dfbb, Strategy::AStar],
    };

    println!(
        "Case {:?} | N={} | c1={} c2={}",
        args.case, args.workers, args.unit_cost_primary, args.unit_cost_secondary
    );
    println!("{}", "-".repeat(50));

    for strategy in strategies {
        let (kind, outcome) = if args.find_days {
            let Some(budget) = args.budget else {
                bail!("--budget is required with --find-days");
            };
            let outcome = dual::find_min_days(
                &graph,
                args.workers,
                case,
                strategy,
                budget,
                args.unit_cost_primary,
                args.unit_cost_secondary,
            );
            ("Days", outcome)
        } else {
            let Some(day_limit) = args.day_limit else {
                bail!("--M is required with --find-cost");
            };
            let outcome = dual::find_min_cost(
                &graph,
                args.workers,
                case,
                strategy,
                day_limit,
                args.unit_cost_primary,
                args.unit_cost_secondary,
            );
            ("Cost", outcome)
        };
        println!(
            "{}",
            report::render_allocation(strategy_label(strategy), kind, &outcome)
        );
    }

    Ok(())
}

fn strategy_label(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Dfs => "DFS",
        Strategy::Dfbb => "DFBB",
        Strategy::AStar => "ASTAR",
    }
}

/// Parsed-problem summary as log events (stdout stays result-only).
fn log_problem_summary(graph: &DepGraph, workers: usize, daily_prompts: u32, day_limit: u32) {
    info!(
        tasks = graph.len(),
        workers,
        daily_prompts,
        day_limit,
        total_prompts = graph.total_prompts(),
        dependency_levels = graph.critical_path_depth(),
        "problem loaded"
    );
    for task in graph.tasks() {
        debug!(id = task.id, prompts = task.prompts, deps = ?task.deps, "task");
    }
}
