use std::collections::BTreeSet;

use proptest::prelude::*;
use proptest::strategy::Strategy as _;

use daypack::graph::DepGraph;
use daypack::input::{Task, TaskId, TaskMap, validate_tasks};
use daypack::solver::dual::{DualProblem, PackingCase, Strategy};
use daypack::solver::enumerate::Enumerator;
use daypack::solver::optimal::{Optimizer, ShareMode};

// Strategy to generate a valid task DAG.
// Acyclicity comes for free by only allowing task i to depend on tasks with
// smaller ids; raw dependency indices are sanitized modulo the prefix.
fn task_map_strategy(max_tasks: usize) -> impl proptest::strategy::Strategy<Value = TaskMap> {
    (1..=max_tasks).prop_flat_map(|n| {
        let entries = proptest::collection::vec(
            (1u32..=3u32, proptest::collection::vec(any::<usize>(), 0..n)),
            n,
        );
        entries.prop_map(move |specs| {
            let mut tasks = TaskMap::new();
            for (i, (prompts, raw_deps)) in specs.into_iter().enumerate() {
                let id = (i + 1) as TaskId;
                let mut deps = BTreeSet::new();
                for raw in raw_deps {
                    if i > 0 {
                        deps.insert((raw % i + 1) as TaskId);
                    }
                }
                tasks.insert(id, Task { id, prompts, deps });
            }
            tasks
        })
    })
}

proptest! {
    #[test]
    fn generated_task_maps_validate(map in task_map_strategy(5)) {
        prop_assert!(validate_tasks(&map).is_ok());
    }

    #[test]
    fn enumeration_finds_a_schedule_when_every_task_fits(map in task_map_strategy(5)) {
        let day_limit = map.len() as u32;
        let graph = DepGraph::new(map);
        let daily_prompts = graph.max_prompts();

        let found = Enumerator::new(&graph, 1, daily_prompts, day_limit).run();
        prop_assert!(!found.is_empty());

        for item in &found {
            prop_assert!(item.schedule.respects_dependencies(&graph));
            prop_assert!(item.schedule.day_count() as u32 <= day_limit);
        }
    }

    #[test]
    fn enumeration_is_order_independent(map in task_map_strategy(4)) {
        let day_limit = map.len() as u32;
        let graph = DepGraph::new(map);
        let daily_prompts = graph.max_prompts() + 1;

        let first: BTreeSet<Vec<Vec<TaskId>>> = Enumerator::new(&graph, 2, daily_prompts, day_limit)
            .run()
            .into_iter()
            .map(|f| f.schedule.days)
            .collect();
        let second: BTreeSet<Vec<Vec<TaskId>>> = Enumerator::new(&graph, 2, daily_prompts, day_limit)
            .run()
            .into_iter()
            .map(|f| f.schedule.days)
            .collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn feasibility_is_monotone_in_days_and_budget(
        map in task_map_strategy(5),
        workers in 1usize..=2,
    ) {
        let graph = DepGraph::new(map);
        let budget_floor = graph.max_prompts();
        let day_cap = graph.len() as u32;

        for mode in [ShareMode::Strict, ShareMode::CarryOver] {
            let opt = Optimizer::new(&graph, workers, mode);

            let mut feasible_before = false;
            for day_limit in 1..=day_cap {
                let ok = opt.feasible(budget_floor, day_limit);
                prop_assert!(!feasible_before || ok);
                feasible_before = feasible_before || ok;
            }

            feasible_before = false;
            for budget in budget_floor..=budget_floor + 3 {
                let ok = opt.feasible(budget, day_cap);
                prop_assert!(!feasible_before || ok);
                feasible_before = feasible_before || ok;
            }
        }
    }
}

proptest! {
    // The dual searches multiply quickly; fewer, smaller cases keep the
    // agreement check fast while still covering varied DAG shapes.
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn dual_strategies_agree_on_random_dags(map in task_map_strategy(4)) {
        let day_cap = map.len() as u32;
        let graph = DepGraph::new(map);

        // Pools sized to the largest task of each class, so every state has
        // a successor and both cases stay solvable.
        let cap_primary = graph
            .tasks()
            .filter(|t| t.id % 2 == 0)
            .map(|t| t.prompts)
            .max()
            .unwrap_or(0);
        let cap_secondary = graph
            .tasks()
            .filter(|t| t.id % 2 == 1)
            .map(|t| t.prompts)
            .max()
            .unwrap_or(0);

        for case in [PackingCase::Atomic, PackingCase::Incremental] {
            let problem = DualProblem::new(&graph, 2, cap_primary, cap_secondary, day_cap);
            let dfs = problem.solve(case, Strategy::Dfs);
            let dfbb = problem.solve(case, Strategy::Dfbb);
            let astar = problem.solve(case, Strategy::AStar);

            prop_assert_eq!(dfs.days, dfbb.days);
            prop_assert_eq!(dfs.days, astar.days);
            prop_assert!(dfs.days.is_some());
            prop_assert!(dfbb.expanded <= dfs.expanded);
            prop_assert!(astar.expanded <= dfs.expanded);
        }
    }
}
