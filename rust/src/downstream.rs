//! Downstream impact resolution.

use rustc_hash::FxHashSet;
use std::collections::VecDeque;

use crate::graph::{DependencyGraph, NodeId};

/// Every node transitively blocked by `start`, in breadth-first discovery order.
///
/// `start` itself is only included when a cycle leads back to it. The visited
/// set guarantees termination on cyclic input.
pub fn downstream_nodes(graph: &DependencyGraph<'_>, start: NodeId) -> Vec<NodeId> {
    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    let mut order: Vec<NodeId> = Vec::new();
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for &next in graph.dependents(current) {
            if visited.insert(next) {
                order.push(next);
                queue.push_back(next);
            }
        }
    }

    order
}

/// Ids of every task transitively blocked by `task_id`, or `None` if the id is
/// not in the graph.
pub fn downstream_ids<'a>(graph: &DependencyGraph<'a>, task_id: &str) -> Option<Vec<&'a str>> {
    let start = graph.node_id(task_id)?;
    Some(
        downstream_nodes(graph, start)
            .into_iter()
            .map(|id| graph.task(id).id.as_str())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FocusConfig;
    use crate::models::fixtures::*;

    #[test]
    fn test_transitive_closure() {
        // a -> b -> d
        // a -> c -> d -> e
        let tasks = vec![
            todo("a", 1.0),
            todo("b", 1.0),
            todo("c", 1.0),
            todo("d", 1.0),
            todo("e", 1.0),
            todo("unrelated", 1.0),
        ];
        let deps = vec![
            dep("a", "b"),
            dep("a", "c"),
            dep("b", "d"),
            dep("c", "d"),
            dep("d", "e"),
        ];
        let graph = DependencyGraph::build(&tasks, &deps, &FocusConfig::default()).unwrap();

        assert_eq!(
            downstream_ids(&graph, "a").unwrap(),
            vec!["b", "c", "d", "e"]
        );
        assert_eq!(downstream_ids(&graph, "c").unwrap(), vec!["d", "e"]);
        assert!(downstream_ids(&graph, "e").unwrap().is_empty());
        assert!(downstream_ids(&graph, "unrelated").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_id() {
        let tasks = vec![todo("a", 1.0)];
        let graph = DependencyGraph::build(&tasks, &[], &FocusConfig::default()).unwrap();
        assert!(downstream_ids(&graph, "missing").is_none());
    }

    #[test]
    fn test_cycle_terminates_and_includes_start() {
        // a -> b -> c -> a
        let tasks = vec![todo("a", 1.0), todo("b", 1.0), todo("c", 1.0)];
        let deps = vec![dep("a", "b"), dep("b", "c"), dep("c", "a")];
        let graph = DependencyGraph::build(&tasks, &deps, &FocusConfig::default()).unwrap();

        assert_eq!(downstream_ids(&graph, "a").unwrap(), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_duplicate_edges_do_not_duplicate_results() {
        let tasks = vec![todo("a", 1.0), todo("b", 1.0)];
        let deps = vec![dep("a", "b"), dep("a", "b")];
        let graph = DependencyGraph::build(&tasks, &deps, &FocusConfig::default()).unwrap();

        assert_eq!(downstream_ids(&graph, "a").unwrap(), vec!["b"]);
    }
}
