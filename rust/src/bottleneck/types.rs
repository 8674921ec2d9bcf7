//! Types for bottleneck results.

use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{ReasonType, Task};

/// A blocked or overdue task weighted by the work waiting on it.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bottleneck {
    #[pyo3(get)]
    pub task: Task,

    /// Own hours plus hours of every unfinished downstream task.
    #[pyo3(get)]
    pub time_impact: f64,

    /// Time impact scaled by risk multipliers. Used for ranking only.
    #[pyo3(get)]
    pub impact_score: f64,

    #[pyo3(get)]
    pub downstream_count: usize,

    #[pyo3(get)]
    pub reason_type: ReasonType,

    #[pyo3(get)]
    pub notes: String,

    #[pyo3(get)]
    pub is_on_critical_path: bool,

    /// Unfinished downstream tasks in breadth-first order.
    #[pyo3(get)]
    pub dependent_tasks: Vec<Task>,

    /// Whole days since the task was last updated.
    #[pyo3(get)]
    pub age_in_days: i64,
}

#[pymethods]
impl Bottleneck {
    fn __repr__(&self) -> String {
        format!(
            "Bottleneck(task_id={:?}, impact_score={}, time_impact={}, downstream={})",
            self.task.id, self.impact_score, self.time_impact, self.downstream_count
        )
    }
}
