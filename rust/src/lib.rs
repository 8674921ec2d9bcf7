//! Rust implementation of the focus analytics engine.
//!
//! Given tasks with estimated hours and a dependency graph, this crate computes
//! the critical path, ranks bottleneck tasks by downstream impact, and derives
//! close-risk metrics. Every operation is a pure function of its inputs and an
//! explicit reference time.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::{DateTime, Utc};
use pyo3::prelude::*;

pub mod bottleneck;
mod config;
pub mod critical_path;
pub mod downstream;
pub mod filters;
pub mod graph;
pub mod logging;
pub mod metrics;
mod models;
pub mod report;
pub mod summary;

#[doc(hidden)]
pub use tracing;

pub use bottleneck::{compute_bottlenecks, Bottleneck};
pub use config::FocusConfig;
pub use critical_path::{compute_critical_path, CriticalPathNode};
pub use downstream::{downstream_ids, downstream_nodes};
pub use filters::{filter_bottlenecks, filter_critical_path, TaskFilter};
pub use graph::{DependencyGraph, GraphError, NodeId};
pub use metrics::{compute_focus_metrics, FocusMetrics, NextMilestone, RiskLevel};
pub use models::{BottleneckEvent, Dependency, ReasonType, Task, TaskStatus};
pub use report::{analyze, FocusReport};
pub use summary::{CascadeSummary, CriticalPathSummary};

fn to_py_err(err: GraphError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// Read the wall clock only here, once per call, when the caller gave no time.
fn resolve_now(as_of: Option<DateTime<Utc>>) -> DateTime<Utc> {
    as_of.unwrap_or_else(Utc::now)
}

/// Compute the critical path over unfinished tasks.
///
/// # Arguments
/// * `tasks` - List of Task
/// * `dependencies` - List of Dependency (from blocks to)
/// * `as_of` - Reference time (defaults to now, UTC)
/// * `config` - FocusConfig (defaults if omitted)
///
/// # Returns
/// * List of CriticalPathNode in path order
///
/// # Raises
/// * ValueError on cycles, dangling references or invalid estimates
#[pyfunction]
#[pyo3(name = "compute_critical_path", signature = (tasks, dependencies, as_of=None, config=None))]
fn py_compute_critical_path(
    tasks: Vec<Task>,
    dependencies: Vec<Dependency>,
    as_of: Option<DateTime<Utc>>,
    config: Option<FocusConfig>,
) -> PyResult<Vec<CriticalPathNode>> {
    let config = config.unwrap_or_default();
    compute_critical_path(&tasks, &dependencies, resolve_now(as_of), &config).map_err(to_py_err)
}

/// Rank blocked and overdue tasks by impact score (highest first).
///
/// # Raises
/// * ValueError on cycles, dangling references or invalid estimates
#[pyfunction]
#[pyo3(name = "compute_bottlenecks", signature = (tasks, dependencies, events=None, as_of=None, config=None))]
fn py_compute_bottlenecks(
    tasks: Vec<Task>,
    dependencies: Vec<Dependency>,
    events: Option<Vec<BottleneckEvent>>,
    as_of: Option<DateTime<Utc>>,
    config: Option<FocusConfig>,
) -> PyResult<Vec<Bottleneck>> {
    let config = config.unwrap_or_default();
    let events = events.unwrap_or_default();
    compute_bottlenecks(
        &tasks,
        &dependencies,
        &events,
        resolve_now(as_of),
        &config,
    )
    .map_err(to_py_err)
}

/// Compute close risk, blocked count, time at risk and the next milestone.
///
/// # Raises
/// * ValueError on cycles, dangling references or invalid estimates
#[pyfunction]
#[pyo3(name = "compute_focus_metrics", signature = (tasks, dependencies, as_of=None, config=None))]
fn py_compute_focus_metrics(
    tasks: Vec<Task>,
    dependencies: Vec<Dependency>,
    as_of: Option<DateTime<Utc>>,
    config: Option<FocusConfig>,
) -> PyResult<FocusMetrics> {
    let config = config.unwrap_or_default();
    compute_focus_metrics(&tasks, &dependencies, resolve_now(as_of), &config).map_err(to_py_err)
}

/// Run every analysis against one reference time.
///
/// # Raises
/// * ValueError on cycles, dangling references or invalid estimates
#[pyfunction]
#[pyo3(name = "analyze", signature = (tasks, dependencies, events=None, as_of=None, config=None))]
fn py_analyze(
    tasks: Vec<Task>,
    dependencies: Vec<Dependency>,
    events: Option<Vec<BottleneckEvent>>,
    as_of: Option<DateTime<Utc>>,
    config: Option<FocusConfig>,
) -> PyResult<FocusReport> {
    let config = config.unwrap_or_default();
    let events = events.unwrap_or_default();
    analyze(
        &tasks,
        &dependencies,
        &events,
        resolve_now(as_of),
        &config,
    )
    .map_err(to_py_err)
}

/// Keep bottlenecks matching every given owner / category / entity criterion.
#[pyfunction]
#[pyo3(name = "filter_bottlenecks", signature = (bottlenecks, filter=None))]
fn py_filter_bottlenecks(
    bottlenecks: Vec<Bottleneck>,
    filter: Option<TaskFilter>,
) -> Vec<Bottleneck> {
    filter_bottlenecks(&bottlenecks, &filter.unwrap_or_default())
}

/// Keep critical path nodes matching every given owner / category / entity criterion.
#[pyfunction]
#[pyo3(name = "filter_critical_path", signature = (path, filter=None))]
fn py_filter_critical_path(
    path: Vec<CriticalPathNode>,
    filter: Option<TaskFilter>,
) -> Vec<CriticalPathNode> {
    filter_critical_path(&path, &filter.unwrap_or_default())
}

/// The focus.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Input types
    m.add_class::<TaskStatus>()?;
    m.add_class::<ReasonType>()?;
    m.add_class::<Task>()?;
    m.add_class::<Dependency>()?;
    m.add_class::<BottleneckEvent>()?;
    m.add_class::<TaskFilter>()?;

    // Config types
    m.add_class::<FocusConfig>()?;

    // Result types
    m.add_class::<CriticalPathNode>()?;
    m.add_class::<Bottleneck>()?;
    m.add_class::<RiskLevel>()?;
    m.add_class::<NextMilestone>()?;
    m.add_class::<FocusMetrics>()?;
    m.add_class::<CriticalPathSummary>()?;
    m.add_class::<CascadeSummary>()?;
    m.add_class::<FocusReport>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_compute_critical_path, m)?)?;
    m.add_function(wrap_pyfunction!(py_compute_bottlenecks, m)?)?;
    m.add_function(wrap_pyfunction!(py_compute_focus_metrics, m)?)?;
    m.add_function(wrap_pyfunction!(py_analyze, m)?)?;
    m.add_function(wrap_pyfunction!(py_filter_bottlenecks, m)?)?;
    m.add_function(wrap_pyfunction!(py_filter_critical_path, m)?)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_resolve_now_prefers_injected_time() {
        let fixed = Utc.with_ymd_and_hms(2026, 1, 20, 12, 0, 0).unwrap();
        assert_eq!(resolve_now(Some(fixed)), fixed);
    }
}
