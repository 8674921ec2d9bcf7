//! Critical path calculation: longest path over the unfinished-task DAG.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::VecDeque;

use crate::config::FocusConfig;
use crate::graph::{DependencyGraph, GraphError, NodeId};
use crate::models::{Dependency, Task};
use crate::{log_changes, log_debug};

use super::types::CriticalPathNode;

/// Raw longest-path result over a graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LongestPath {
    /// Node ids from the start of the chain to its end.
    pub path: Vec<NodeId>,
    /// Maximum cumulative hours ending at each node, indexed by node id.
    pub distances: Vec<f64>,
}

impl LongestPath {
    /// Cumulative hours of the whole chain.
    pub fn length(&self) -> f64 {
        self.path
            .last()
            .map(|&end| self.distances[end as usize])
            .unwrap_or(0.0)
    }
}

/// Longest path by cumulative estimated hours using Kahn's algorithm.
///
/// Every node starts at its own duration. Edges are relaxed in topological
/// order and a parent pointer is recorded on every strict improvement. The
/// chain ends at the first node (in graph order) holding the maximum distance.
///
/// # Returns
/// * `Err(GraphError::CircularDependency)` listing the nodes Kahn's algorithm
///   could not process, when the graph has a cycle
pub fn longest_path(
    graph: &DependencyGraph<'_>,
    verbosity: u8,
) -> Result<LongestPath, GraphError> {
    let n = graph.len();
    let mut in_degree = graph.in_degrees();
    let mut distances: Vec<f64> = graph.nodes().map(|(_, t)| t.estimated_hours).collect();
    let mut parent: Vec<Option<NodeId>> = vec![None; n];

    let mut queue: VecDeque<NodeId> = (0..n as NodeId)
        .filter(|&id| in_degree[id as usize] == 0)
        .collect();
    let mut processed = 0;

    while let Some(current) = queue.pop_front() {
        processed += 1;
        let current_dist = distances[current as usize];

        for &next in graph.dependents(current) {
            let idx = next as usize;
            let candidate = current_dist + graph.task(next).estimated_hours;
            if candidate > distances[idx] {
                distances[idx] = candidate;
                parent[idx] = Some(current);
            }

            in_degree[idx] -= 1;
            if in_degree[idx] == 0 {
                queue.push_back(next);
            }
        }
    }

    if processed != n {
        let stuck: Vec<String> = graph
            .nodes()
            .filter(|(id, _)| in_degree[*id as usize] > 0)
            .map(|(_, task)| task.id.clone())
            .collect();
        return Err(GraphError::CircularDependency(stuck));
    }

    // Strict comparison keeps the first node seen on ties. A graph of only
    // zero-hour tasks still ends at its first node rather than yielding no path.
    let mut end: Option<NodeId> = None;
    for id in 0..n as NodeId {
        match end {
            Some(best) if distances[best as usize] >= distances[id as usize] => {}
            _ => end = Some(id),
        }
    }

    let Some(end) = end else {
        return Ok(LongestPath::default());
    };

    let mut path = vec![end];
    let mut current = end;
    while let Some(p) = parent[current as usize] {
        path.push(p);
        current = p;
    }
    path.reverse();

    log_debug!(
        verbosity,
        "Longest path ends at {} with {}h over {} nodes",
        graph.task(end).id,
        distances[end as usize],
        path.len()
    );

    Ok(LongestPath { path, distances })
}

/// Compute the critical path: the single longest chain of unfinished work.
///
/// Done tasks and every dependency touching them are removed first; a finished
/// prerequisite counts as satisfied.
///
/// # Arguments
/// * `tasks` - Full task collection
/// * `dependencies` - Dependency edges (`from` blocks `to`)
/// * `now` - Reference time; its calendar day drives overdue flags and slack
/// * `config` - Validation policy and verbosity
///
/// # Returns
/// * Path nodes in order, positions starting at 1; empty when no work remains
pub fn compute_critical_path(
    tasks: &[Task],
    dependencies: &[Dependency],
    now: DateTime<Utc>,
    config: &FocusConfig,
) -> Result<Vec<CriticalPathNode>, GraphError> {
    let graph = DependencyGraph::build_incomplete(tasks, dependencies, config)?;
    critical_path_from_graph(&graph, now.date_naive(), config)
}

/// Critical path over an already restricted graph, for a fixed `today`.
pub(crate) fn critical_path_from_graph(
    graph: &DependencyGraph<'_>,
    today: NaiveDate,
    config: &FocusConfig,
) -> Result<Vec<CriticalPathNode>, GraphError> {
    let longest = longest_path(graph, config.verbosity)?;

    let nodes: Vec<CriticalPathNode> = longest
        .path
        .iter()
        .enumerate()
        .map(|(i, &id)| {
            let task = graph.task(id);
            CriticalPathNode {
                task: task.clone(),
                position: i + 1,
                is_blocked: task.is_blocked(),
                is_overdue: task.is_overdue(today),
                slack_days: task.days_until_due(today),
                distance_hours: longest.distances[id as usize],
                dependencies: graph
                    .resolve(graph.dependencies(id))
                    .into_iter()
                    .cloned()
                    .collect(),
                dependents: graph
                    .resolve(graph.dependents(id))
                    .into_iter()
                    .cloned()
                    .collect(),
            }
        })
        .collect();

    if !nodes.is_empty() {
        let chain: Vec<&str> = nodes.iter().map(|n| n.task.id.as_str()).collect();
        log_changes!(
            config.verbosity,
            "Critical path: {} ({}h)",
            chain.join(" -> "),
            longest.length()
        );
    }

    Ok(nodes)
}
