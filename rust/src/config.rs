//! Configuration types for the focus analytics engine.

use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

/// Scoring constants and validation policy for every analytics operation.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FocusConfig {
    /// Score multiplier for bottlenecks on the critical path
    #[pyo3(get, set)]
    pub critical_path_multiplier: f64,
    /// Score multiplier for overdue bottlenecks
    #[pyo3(get, set)]
    pub overdue_multiplier: f64,
    /// Score multiplier for bottlenecks whose status is blocked
    #[pyo3(get, set)]
    pub blocked_multiplier: f64,
    /// Total bottleneck hours above which the close is at risk
    #[pyo3(get, set)]
    pub at_risk_threshold_hours: f64,
    /// Hours in one workday, for workday estimates
    #[pyo3(get, set)]
    pub workday_hours: f64,
    /// Minimum downstream count for a bottleneck to be a key blocker
    #[pyo3(get, set)]
    pub key_blocker_min_downstream: usize,
    /// Reject dangling references and duplicate task ids instead of skipping them
    #[pyo3(get, set)]
    pub strict_references: bool,
    /// Collapse repeated (from, to) dependency pairs into one edge
    #[pyo3(get, set)]
    pub dedup_edges: bool,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            critical_path_multiplier: 2.0,
            overdue_multiplier: 1.5,
            blocked_multiplier: 1.3,
            at_risk_threshold_hours: 16.0,
            workday_hours: 8.0,
            key_blocker_min_downstream: 2,
            strict_references: true,
            dedup_edges: false,
            verbosity: 0,
        }
    }
}

#[pymethods]
impl FocusConfig {
    #[new]
    #[pyo3(signature = (
        critical_path_multiplier=None,
        overdue_multiplier=None,
        blocked_multiplier=None,
        at_risk_threshold_hours=None,
        workday_hours=None,
        key_blocker_min_downstream=None,
        strict_references=None,
        dedup_edges=None,
        verbosity=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        critical_path_multiplier: Option<f64>,
        overdue_multiplier: Option<f64>,
        blocked_multiplier: Option<f64>,
        at_risk_threshold_hours: Option<f64>,
        workday_hours: Option<f64>,
        key_blocker_min_downstream: Option<usize>,
        strict_references: Option<bool>,
        dedup_edges: Option<bool>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            critical_path_multiplier: critical_path_multiplier
                .unwrap_or(defaults.critical_path_multiplier),
            overdue_multiplier: overdue_multiplier.unwrap_or(defaults.overdue_multiplier),
            blocked_multiplier: blocked_multiplier.unwrap_or(defaults.blocked_multiplier),
            at_risk_threshold_hours: at_risk_threshold_hours
                .unwrap_or(defaults.at_risk_threshold_hours),
            workday_hours: workday_hours.unwrap_or(defaults.workday_hours),
            key_blocker_min_downstream: key_blocker_min_downstream
                .unwrap_or(defaults.key_blocker_min_downstream),
            strict_references: strict_references.unwrap_or(defaults.strict_references),
            dedup_edges: dedup_edges.unwrap_or(defaults.dedup_edges),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "FocusConfig(multipliers=({}, {}, {}), at_risk_threshold_hours={}, strict_references={})",
            self.critical_path_multiplier,
            self.overdue_multiplier,
            self.blocked_multiplier,
            self.at_risk_threshold_hours,
            self.strict_references
        )
    }
}
