//! Summary KPIs for the reporting period.

use chrono::{DateTime, NaiveDate, Utc};
use pyo3::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::bottleneck::{rank_bottlenecks, Bottleneck};
use crate::config::FocusConfig;
use crate::critical_path::{critical_path_from_graph, CriticalPathNode};
use crate::graph::{DependencyGraph, GraphError};
use crate::log_changes;
use crate::models::{Dependency, Task, TaskStatus};

/// Overall close risk.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    OnTrack,
    AtRisk,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::AtRisk => "at_risk",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The task closing out the critical path.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextMilestone {
    #[pyo3(get)]
    pub title: String,
    #[pyo3(get)]
    pub due_date: NaiveDate,
    /// Signed days from today until due (negative = overdue).
    #[pyo3(get)]
    pub days_remaining: i64,
}

#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FocusMetrics {
    #[pyo3(get)]
    pub close_risk: RiskLevel,
    /// Tasks whose status is blocked (overdue-only tasks are not counted).
    #[pyo3(get)]
    pub blocked_count: usize,
    /// Sum of bottleneck time impacts, in hours.
    #[pyo3(get)]
    pub total_time_impact: f64,
    #[pyo3(get)]
    pub next_milestone: Option<NextMilestone>,
    /// Remaining estimated hours on the critical path (a duration, not a day count).
    #[pyo3(get)]
    pub critical_path_length: f64,
}

#[pymethods]
impl FocusMetrics {
    fn __repr__(&self) -> String {
        format!(
            "FocusMetrics(close_risk={}, blocked_count={}, total_time_impact={}, critical_path_length={})",
            self.close_risk, self.blocked_count, self.total_time_impact, self.critical_path_length
        )
    }
}

impl FocusMetrics {
    /// Derive metrics from an already computed critical path and bottleneck list.
    pub fn from_parts(
        tasks: &[Task],
        critical_path: &[CriticalPathNode],
        bottlenecks: &[Bottleneck],
        config: &FocusConfig,
    ) -> Self {
        // First task with an id wins, matching graph construction
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let blocked_count = tasks
            .iter()
            .filter(|t| seen.insert(t.id.as_str()))
            .filter(|t| t.status == TaskStatus::Blocked)
            .count();
        let total_time_impact: f64 = bottlenecks.iter().map(|b| b.time_impact).sum();
        let close_risk = classify_risk(critical_path, blocked_count, total_time_impact, config);

        let next_milestone = critical_path.last().map(|node| NextMilestone {
            title: node.task.title.clone(),
            due_date: node.task.due_date,
            days_remaining: node.slack_days,
        });

        Self {
            close_risk,
            blocked_count,
            total_time_impact,
            next_milestone,
            critical_path_length: critical_path.iter().map(|n| n.task.estimated_hours).sum(),
        }
    }
}

/// Critical-path violations dominate; otherwise any blocked task or more than
/// the threshold of hours at risk.
pub fn classify_risk(
    critical_path: &[CriticalPathNode],
    blocked_count: usize,
    total_time_impact: f64,
    config: &FocusConfig,
) -> RiskLevel {
    if critical_path.iter().any(CriticalPathNode::is_at_risk) {
        RiskLevel::Critical
    } else if blocked_count > 0 || total_time_impact > config.at_risk_threshold_hours {
        RiskLevel::AtRisk
    } else {
        RiskLevel::OnTrack
    }
}

/// Compute the summary KPIs for the task set.
///
/// Bottleneck events only change reasons and notes, never time impact, so
/// they are not needed here.
pub fn compute_focus_metrics(
    tasks: &[Task],
    dependencies: &[Dependency],
    now: DateTime<Utc>,
    config: &FocusConfig,
) -> Result<FocusMetrics, GraphError> {
    let incomplete = DependencyGraph::build_incomplete(tasks, dependencies, config)?;
    let path = critical_path_from_graph(&incomplete, now.date_naive(), config)?;
    let critical_ids: FxHashSet<&str> = path.iter().map(|n| n.task.id.as_str()).collect();
    let bottlenecks = rank_bottlenecks(tasks, dependencies, &[], &critical_ids, now, config)?;

    let metrics = FocusMetrics::from_parts(tasks, &path, &bottlenecks, config);
    log_changes!(
        config.verbosity,
        "Close risk {} ({} blocked, {}h at risk)",
        metrics.close_risk,
        metrics.blocked_count,
        metrics.total_time_impact
    );
    Ok(metrics)
}
