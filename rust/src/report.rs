//! One-shot analysis against a single snapshot and reference time.

use chrono::{DateTime, Utc};
use pyo3::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::bottleneck::{rank_bottlenecks, Bottleneck};
use crate::config::FocusConfig;
use crate::critical_path::{critical_path_from_graph, CriticalPathNode};
use crate::graph::{DependencyGraph, GraphError};
use crate::metrics::FocusMetrics;
use crate::models::{BottleneckEvent, Dependency, Task};
use crate::summary::{CascadeSummary, CriticalPathSummary};

/// Everything the focus view needs, computed against one `as_of` time.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FocusReport {
    #[pyo3(get)]
    pub as_of: DateTime<Utc>,
    #[pyo3(get)]
    pub critical_path: Vec<CriticalPathNode>,
    #[pyo3(get)]
    pub bottlenecks: Vec<Bottleneck>,
    #[pyo3(get)]
    pub metrics: FocusMetrics,
    #[pyo3(get)]
    pub path_summary: CriticalPathSummary,
    #[pyo3(get)]
    pub cascade: CascadeSummary,
}

#[pymethods]
impl FocusReport {
    fn __repr__(&self) -> String {
        format!(
            "FocusReport(as_of={}, path_len={}, bottlenecks={}, close_risk={})",
            self.as_of,
            self.critical_path.len(),
            self.bottlenecks.len(),
            self.metrics.close_risk
        )
    }
}

/// Compute the critical path once and derive bottlenecks, metrics and
/// summaries from it. Results match the individual operations run with the
/// same `now`.
pub fn analyze(
    tasks: &[Task],
    dependencies: &[Dependency],
    events: &[BottleneckEvent],
    now: DateTime<Utc>,
    config: &FocusConfig,
) -> Result<FocusReport, GraphError> {
    let incomplete = DependencyGraph::build_incomplete(tasks, dependencies, config)?;
    let critical_path = critical_path_from_graph(&incomplete, now.date_naive(), config)?;
    let critical_ids: FxHashSet<&str> =
        critical_path.iter().map(|n| n.task.id.as_str()).collect();
    let bottlenecks = rank_bottlenecks(tasks, dependencies, events, &critical_ids, now, config)?;

    let metrics = FocusMetrics::from_parts(tasks, &critical_path, &bottlenecks, config);
    let path_summary = CriticalPathSummary::from_path(&critical_path, config);
    let cascade = CascadeSummary::from_bottlenecks(&bottlenecks, config);

    Ok(FocusReport {
        as_of: now,
        critical_path,
        bottlenecks,
        metrics,
        path_summary,
        cascade,
    })
}
