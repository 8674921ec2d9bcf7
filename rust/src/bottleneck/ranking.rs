//! Bottleneck selection and ranking.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;
use std::cmp::Ordering;

use crate::config::FocusConfig;
use crate::critical_path::critical_path_from_graph;
use crate::downstream::downstream_nodes;
use crate::graph::{DependencyGraph, GraphError};
use crate::models::{BottleneckEvent, Dependency, Task};
use crate::{log_changes, log_checks};

use super::scoring::{impact_score, index_events, is_candidate, resolve_reason, RiskFlags};
use super::types::Bottleneck;

/// Compare f64 values for sorting, treating NaN as equal.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Compute bottlenecks ranked by impact score, highest first.
///
/// Candidates are blocked tasks and unfinished tasks past due. Each one is
/// weighed by its own hours plus the hours of every unfinished task
/// transitively waiting on it, then scaled by the risk multipliers.
///
/// # Arguments
/// * `tasks` - Full task collection; candidate order follows it
/// * `dependencies` - Dependency edges (`from` blocks `to`)
/// * `events` - Optional human context per task (may be empty)
/// * `now` - Reference time for overdue checks and task age
/// * `config` - Multipliers, validation policy and verbosity
///
/// # Returns
/// * Bottlenecks sorted by descending impact score; equal scores keep
///   candidate order
pub fn compute_bottlenecks(
    tasks: &[Task],
    dependencies: &[Dependency],
    events: &[BottleneckEvent],
    now: DateTime<Utc>,
    config: &FocusConfig,
) -> Result<Vec<Bottleneck>, GraphError> {
    let incomplete = DependencyGraph::build_incomplete(tasks, dependencies, config)?;
    let path = critical_path_from_graph(&incomplete, now.date_naive(), config)?;
    let critical_ids: FxHashSet<&str> = path.iter().map(|n| n.task.id.as_str()).collect();

    rank_bottlenecks(tasks, dependencies, events, &critical_ids, now, config)
}

/// Rank bottlenecks against a precomputed set of critical-path task ids.
pub(crate) fn rank_bottlenecks(
    tasks: &[Task],
    dependencies: &[Dependency],
    events: &[BottleneckEvent],
    critical_ids: &FxHashSet<&str>,
    now: DateTime<Utc>,
    config: &FocusConfig,
) -> Result<Vec<Bottleneck>, GraphError> {
    let verbosity = config.verbosity;
    let graph = DependencyGraph::build(tasks, dependencies, config)?;
    let today = now.date_naive();
    let events = index_events(events);

    let mut bottlenecks: Vec<Bottleneck> = Vec::new();

    for (id, task) in graph.nodes() {
        if !is_candidate(task, today) {
            continue;
        }

        let downstream: Vec<&Task> = downstream_nodes(&graph, id)
            .into_iter()
            .map(|node| graph.task(node))
            .filter(|t| !t.is_done())
            .collect();
        let downstream_hours: f64 = downstream.iter().map(|t| t.estimated_hours).sum();
        let time_impact = task.estimated_hours + downstream_hours;

        let flags = RiskFlags {
            on_critical_path: critical_ids.contains(task.id.as_str()),
            overdue: task.is_overdue(today),
            blocked: task.is_blocked(),
        };
        let score = impact_score(time_impact, flags, config);
        let (reason_type, notes) = resolve_reason(task, events.get(task.id.as_str()).copied());

        log_checks!(
            verbosity,
            "Candidate {}: impact={}h score={:.2} downstream={} flags={:?}",
            task.id,
            time_impact,
            score,
            downstream.len(),
            flags
        );

        bottlenecks.push(Bottleneck {
            task: task.clone(),
            time_impact,
            impact_score: score,
            downstream_count: downstream.len(),
            reason_type,
            notes,
            is_on_critical_path: flags.on_critical_path,
            dependent_tasks: downstream.into_iter().cloned().collect(),
            age_in_days: task.age_in_days(now),
        });
    }

    // Stable: equal scores keep candidate order
    bottlenecks.sort_by(|a, b| cmp_f64(b.impact_score, a.impact_score));

    log_changes!(verbosity, "Ranked {} bottlenecks", bottlenecks.len());

    Ok(bottlenecks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::*;
    use crate::models::{ReasonType, TaskStatus};
    use chrono::TimeZone;

    fn run(tasks: &[Task], deps: &[Dependency]) -> Vec<Bottleneck> {
        compute_bottlenecks(tasks, deps, &[], now(), &FocusConfig::default()).unwrap()
    }

    fn ids(bottlenecks: &[Bottleneck]) -> Vec<&str> {
        bottlenecks.iter().map(|b| b.task.id.as_str()).collect()
    }

    #[test]
    fn test_blocked_overdue_critical_scenario() {
        // x is blocked, due two days ago, and holds up y
        let tasks = vec![
            make_task("x", 3.0, TaskStatus::Blocked, d(2026, 1, 18)),
            todo("y", 5.0),
        ];
        let deps = vec![dep("x", "y")];

        let result = run(&tasks, &deps);
        assert_eq!(ids(&result), vec!["x"]);

        let x = &result[0];
        assert!((x.time_impact - 8.0).abs() < 1e-9);
        assert!((x.impact_score - 31.2).abs() < 1e-9);
        assert!(x.is_on_critical_path);
        assert_eq!(x.downstream_count, 1);
        assert_eq!(x.dependent_tasks[0].id, "y");
        assert_eq!(x.reason_type, ReasonType::Dependency);
    }

    #[test]
    fn test_done_downstream_traversed_but_not_counted() {
        // a (blocked) -> b (done) -> c
        let tasks = vec![
            make_task("a", 2.0, TaskStatus::Blocked, d(2026, 2, 1)),
            make_task("b", 10.0, TaskStatus::Done, d(2026, 1, 5)),
            todo("c", 4.0),
        ];
        let deps = vec![dep("a", "b"), dep("b", "c")];

        let result = run(&tasks, &deps);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].downstream_count, 1);
        assert_eq!(result[0].dependent_tasks[0].id, "c");
        assert!((result[0].time_impact - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_sorted_descending() {
        let tasks = vec![
            make_task("small", 1.0, TaskStatus::Blocked, d(2026, 2, 1)),
            make_task("late", 4.0, TaskStatus::InProgress, d(2026, 1, 10)),
            make_task("big", 6.0, TaskStatus::Blocked, d(2026, 2, 1)),
            todo("ok", 30.0),
        ];

        // Only "ok" (30h) is on the critical path and it is not a candidate.
        // big: 6 * 1.3 = 7.8, late: 4 * 1.5 = 6.0, small: 1 * 1.3 = 1.3
        let result = run(&tasks, &[]);
        assert_eq!(ids(&result), vec!["big", "late", "small"]);
        for pair in result.windows(2) {
            assert!(pair[0].impact_score >= pair[1].impact_score);
        }
    }

    #[test]
    fn test_ties_keep_input_order() {
        let tasks = vec![
            make_task("first", 5.0, TaskStatus::Blocked, d(2026, 2, 1)),
            make_task("second", 5.0, TaskStatus::Blocked, d(2026, 2, 1)),
            make_task("third", 5.0, TaskStatus::Blocked, d(2026, 2, 1)),
            todo("long", 40.0),
        ];

        let result = run(&tasks, &[]);
        assert_eq!(ids(&result), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_event_context_and_age() {
        let mut task = make_task("a", 2.0, TaskStatus::Blocked, d(2026, 2, 1));
        task.last_updated = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 1).unwrap();
        let tasks = vec![task];
        let events = vec![BottleneckEvent {
            task_id: "a".to_string(),
            reason_type: ReasonType::Approval,
            notes: "Waiting on controller".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 19, 8, 0, 0).unwrap(),
        }];

        let result =
            compute_bottlenecks(&tasks, &[], &events, now(), &FocusConfig::default()).unwrap();
        assert_eq!(result[0].reason_type, ReasonType::Approval);
        assert_eq!(result[0].notes, "Waiting on controller");
        // 9 days 23:59:59 floors to 9
        assert_eq!(result[0].age_in_days, 9);
    }

    #[test]
    fn test_custom_multipliers() {
        let tasks = vec![make_task("a", 10.0, TaskStatus::Blocked, d(2026, 2, 1))];
        let config = FocusConfig {
            critical_path_multiplier: 1.0,
            blocked_multiplier: 3.0,
            ..FocusConfig::default()
        };

        let result = compute_bottlenecks(&tasks, &[], &[], now(), &config).unwrap();
        assert!(result[0].is_on_critical_path);
        assert!((result[0].impact_score - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_candidates() {
        assert!(run(&[], &[]).is_empty());
        let tasks = vec![todo("a", 3.0), todo("b", 3.0)];
        assert!(run(&tasks, &[dep("a", "b")]).is_empty());
    }

    #[test]
    fn test_cycle_propagates_error() {
        let tasks = vec![
            make_task("a", 1.0, TaskStatus::Blocked, d(2026, 2, 1)),
            todo("b", 1.0),
        ];
        let deps = vec![dep("a", "b"), dep("b", "a")];

        let result = compute_bottlenecks(&tasks, &deps, &[], now(), &FocusConfig::default());
        assert!(matches!(result, Err(GraphError::CircularDependency(_))));
    }
}
