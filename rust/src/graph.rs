//! Dependency graph construction and validation.
//!
//! Task ids are mapped to dense integer node ids in input order so that the
//! traversals can use plain vectors instead of string-keyed maps. Adjacency
//! lists keep dependency input order.

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::config::FocusConfig;
use crate::models::{Dependency, Task};
use crate::{log_checks, log_debug};

/// Dense node id (position of the task among the graph's nodes).
pub type NodeId = u32;

/// Structurally invalid input. Empty input is never an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("Duplicate task id: {0}")]
    DuplicateTaskId(String),
    #[error("Dependency {from} -> {to} references unknown task {missing}")]
    DanglingReference {
        from: String,
        to: String,
        missing: String,
    },
    #[error("Task {task_id} has invalid estimate of {hours} hours")]
    InvalidEstimate { task_id: String, hours: f64 },
    #[error("Circular dependency detected among tasks: {}", .0.join(", "))]
    CircularDependency(Vec<String>),
}

/// Forward (dependents) and reverse (dependencies) adjacency over a task set.
#[derive(Debug, Clone)]
pub struct DependencyGraph<'a> {
    nodes: Vec<&'a Task>,
    index: FxHashMap<&'a str, NodeId>,
    dependents: Vec<Vec<NodeId>>,
    dependencies: Vec<Vec<NodeId>>,
    edge_count: usize,
}

impl<'a> DependencyGraph<'a> {
    /// Build the graph over every task.
    pub fn build(
        tasks: &'a [Task],
        dependencies: &[Dependency],
        config: &FocusConfig,
    ) -> Result<Self, GraphError> {
        Self::build_filtered(tasks, dependencies, config, |_| true)
    }

    /// Build the graph over unfinished tasks only. Edges touching a done task
    /// are treated as satisfied and dropped.
    pub fn build_incomplete(
        tasks: &'a [Task],
        dependencies: &[Dependency],
        config: &FocusConfig,
    ) -> Result<Self, GraphError> {
        Self::build_filtered(tasks, dependencies, config, |t| !t.is_done())
    }

    /// Build the graph over the tasks accepted by `keep`.
    ///
    /// Validation always runs against the full task collection, so a
    /// dependency on a done task is never mistaken for a dangling one.
    pub fn build_filtered<F>(
        tasks: &'a [Task],
        dependencies: &[Dependency],
        config: &FocusConfig,
        keep: F,
    ) -> Result<Self, GraphError>
    where
        F: Fn(&Task) -> bool,
    {
        let verbosity = config.verbosity;
        let known = validate_tasks(tasks, config)?;

        let mut nodes: Vec<&'a Task> = Vec::with_capacity(tasks.len());
        let mut index: FxHashMap<&'a str, NodeId> =
            FxHashMap::with_capacity_and_hasher(tasks.len(), Default::default());
        let mut seen: FxHashSet<&str> =
            FxHashSet::with_capacity_and_hasher(tasks.len(), Default::default());

        for task in tasks {
            // First occurrence of an id wins (duplicates only survive validation when lenient)
            if !seen.insert(task.id.as_str()) || !keep(task) {
                continue;
            }
            index.insert(task.id.as_str(), nodes.len() as NodeId);
            nodes.push(task);
        }

        let n = nodes.len();
        let mut dependents: Vec<Vec<NodeId>> = vec![Vec::new(); n];
        let mut reverse: Vec<Vec<NodeId>> = vec![Vec::new(); n];
        let mut seen_edges: FxHashSet<(NodeId, NodeId)> = FxHashSet::default();
        let mut edge_count = 0;

        for dep in dependencies {
            let missing = [&dep.from_task_id, &dep.to_task_id]
                .into_iter()
                .find(|id| !known.contains(id.as_str()));
            if let Some(missing) = missing {
                if config.strict_references {
                    return Err(GraphError::DanglingReference {
                        from: dep.from_task_id.clone(),
                        to: dep.to_task_id.clone(),
                        missing: missing.clone(),
                    });
                }
                log_checks!(
                    verbosity,
                    from = %dep.from_task_id,
                    to = %dep.to_task_id,
                    "Skipping dependency on unknown task {}",
                    missing
                );
                continue;
            }

            let (Some(&from), Some(&to)) = (
                index.get(dep.from_task_id.as_str()),
                index.get(dep.to_task_id.as_str()),
            ) else {
                log_debug!(
                    verbosity,
                    "Dropping edge {} -> {} outside the graph",
                    dep.from_task_id,
                    dep.to_task_id
                );
                continue;
            };

            if config.dedup_edges && !seen_edges.insert((from, to)) {
                log_debug!(
                    verbosity,
                    "Collapsing duplicate edge {} -> {}",
                    dep.from_task_id,
                    dep.to_task_id
                );
                continue;
            }

            dependents[from as usize].push(to);
            reverse[to as usize].push(from);
            edge_count += 1;
        }

        log_debug!(verbosity, "Built graph with {} nodes and {} edges", n, edge_count);

        Ok(Self {
            nodes,
            index,
            dependents,
            dependencies: reverse,
            edge_count,
        })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Node id for a task id, if the task is part of this graph.
    #[inline]
    pub fn node_id(&self, task_id: &str) -> Option<NodeId> {
        self.index.get(task_id).copied()
    }

    /// Task for a node id produced by this graph.
    #[inline]
    pub fn task(&self, node: NodeId) -> &'a Task {
        self.nodes[node as usize]
    }

    pub fn get(&self, task_id: &str) -> Option<&'a Task> {
        self.node_id(task_id).map(|id| self.task(id))
    }

    /// All nodes in input order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &'a Task)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, &task)| (i as NodeId, task))
    }

    /// Nodes blocked by `node` (forward edges).
    #[inline]
    pub fn dependents(&self, node: NodeId) -> &[NodeId] {
        &self.dependents[node as usize]
    }

    /// Nodes `node` is waiting on (reverse edges).
    #[inline]
    pub fn dependencies(&self, node: NodeId) -> &[NodeId] {
        &self.dependencies[node as usize]
    }

    /// Incoming edge count per node.
    pub fn in_degrees(&self) -> Vec<usize> {
        self.dependencies.iter().map(Vec::len).collect()
    }

    /// Tasks directly blocked by `task_id`, or `None` if it is not in the graph.
    pub fn dependents_of(&self, task_id: &str) -> Option<Vec<&'a Task>> {
        let node = self.node_id(task_id)?;
        Some(self.resolve(self.dependents(node)))
    }

    /// Tasks `task_id` directly waits on, or `None` if it is not in the graph.
    pub fn dependencies_of(&self, task_id: &str) -> Option<Vec<&'a Task>> {
        let node = self.node_id(task_id)?;
        Some(self.resolve(self.dependencies(node)))
    }

    /// Forward adjacency keyed by task id. Every node is a key.
    pub fn forward_adjacency(&self) -> FxHashMap<&'a str, Vec<&'a str>> {
        self.adjacency(&self.dependents)
    }

    /// Reverse adjacency keyed by task id. Every node is a key.
    pub fn reverse_adjacency(&self) -> FxHashMap<&'a str, Vec<&'a str>> {
        self.adjacency(&self.dependencies)
    }

    pub(crate) fn resolve(&self, ids: &[NodeId]) -> Vec<&'a Task> {
        ids.iter().map(|&id| self.task(id)).collect()
    }

    fn adjacency(&self, lists: &[Vec<NodeId>]) -> FxHashMap<&'a str, Vec<&'a str>> {
        self.nodes()
            .map(|(id, task)| {
                let targets = lists[id as usize]
                    .iter()
                    .map(|&t| self.task(t).id.as_str())
                    .collect();
                (task.id.as_str(), targets)
            })
            .collect()
    }
}

/// Check ids and estimates, returning the set of known task ids.
fn validate_tasks<'a>(
    tasks: &'a [Task],
    config: &FocusConfig,
) -> Result<FxHashSet<&'a str>, GraphError> {
    let mut known: FxHashSet<&str> =
        FxHashSet::with_capacity_and_hasher(tasks.len(), Default::default());

    for task in tasks {
        if !task.estimated_hours.is_finite() || task.estimated_hours < 0.0 {
            return Err(GraphError::InvalidEstimate {
                task_id: task.id.clone(),
                hours: task.estimated_hours,
            });
        }
        if !known.insert(task.id.as_str()) {
            if config.strict_references {
                return Err(GraphError::DuplicateTaskId(task.id.clone()));
            }
            log_checks!(config.verbosity, "Ignoring duplicate task id {}", task.id);
        }
    }

    Ok(known)
}
