//! Roll-ups of the critical path and bottleneck list for dashboards.

use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bottleneck::Bottleneck;
use crate::config::FocusConfig;
use crate::critical_path::CriticalPathNode;
use crate::models::TaskStatus;

/// Status breakdown and remaining effort along the critical path.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CriticalPathSummary {
    #[pyo3(get)]
    pub task_count: usize,
    #[pyo3(get)]
    pub in_progress: usize,
    #[pyo3(get)]
    pub blocked: usize,
    /// Todo and not blocked.
    #[pyo3(get)]
    pub pending: usize,
    /// Past due, including blocked nodes.
    #[pyo3(get)]
    pub overdue: usize,
    #[pyo3(get)]
    pub total_hours: f64,
    /// Whole workdays needed to burn down `total_hours`, rounded up.
    #[pyo3(get)]
    pub workdays_remaining: u32,
}

impl CriticalPathSummary {
    pub fn from_path(path: &[CriticalPathNode], config: &FocusConfig) -> Self {
        let count = |pred: fn(&CriticalPathNode) -> bool| path.iter().filter(|n| pred(n)).count();
        let total_hours: f64 = path.iter().map(|n| n.task.estimated_hours).sum();
        let workdays_remaining = if config.workday_hours > 0.0 {
            (total_hours / config.workday_hours).ceil() as u32
        } else {
            0
        };

        Self {
            task_count: path.len(),
            in_progress: count(|n| n.task.status == TaskStatus::InProgress),
            blocked: count(|n| n.is_blocked),
            pending: count(|n| n.task.status == TaskStatus::Todo && !n.is_blocked),
            overdue: count(|n| n.is_overdue),
            total_hours,
            workdays_remaining,
        }
    }
}

/// How much downstream work the highest-leverage blockers hold up.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeSummary {
    /// Ids of bottlenecks with at least `key_blocker_min_downstream` dependents, in rank order.
    #[pyo3(get)]
    pub key_blockers: Vec<String>,
    /// Downstream tasks that resolving the key blockers would release.
    #[pyo3(get)]
    pub unblockable_downstream: usize,
    /// Downstream count summed over every bottleneck.
    #[pyo3(get)]
    pub total_downstream: usize,
}

impl CascadeSummary {
    pub fn from_bottlenecks(bottlenecks: &[Bottleneck], config: &FocusConfig) -> Self {
        let key: Vec<&Bottleneck> = bottlenecks
            .iter()
            .filter(|b| b.downstream_count >= config.key_blocker_min_downstream)
            .collect();

        Self {
            key_blockers: key.iter().map(|b| b.task.id.clone()).collect(),
            unblockable_downstream: key.iter().map(|b| b.downstream_count).sum(),
            total_downstream: bottlenecks.iter().map(|b| b.downstream_count).sum(),
        }
    }
}
