//! Types for critical path results.

use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::Task;

/// One task on the critical path.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CriticalPathNode {
    #[pyo3(get)]
    pub task: Task,

    /// 1-based position along the path.
    #[pyo3(get)]
    pub position: usize,

    #[pyo3(get)]
    pub is_blocked: bool,

    #[pyo3(get)]
    pub is_overdue: bool,

    /// Signed days until due (negative = overdue).
    #[pyo3(get)]
    pub slack_days: i64,

    /// Cumulative estimated hours from the start of the path through this task.
    #[pyo3(get)]
    pub distance_hours: f64,

    /// Unfinished tasks this task waits on.
    #[pyo3(get)]
    pub dependencies: Vec<Task>,

    /// Unfinished tasks waiting on this task.
    #[pyo3(get)]
    pub dependents: Vec<Task>,
}

#[pymethods]
impl CriticalPathNode {
    fn __repr__(&self) -> String {
        format!(
            "CriticalPathNode(position={}, task_id={:?}, distance_hours={}, slack_days={})",
            self.position, self.task.id, self.distance_hours, self.slack_days
        )
    }
}

impl CriticalPathNode {
    /// Blocked or overdue nodes put the whole chain at risk.
    pub fn is_at_risk(&self) -> bool {
        self.is_blocked || self.is_overdue
    }
}
