//! Intersection filters over computed results.

use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bottleneck::Bottleneck;
use crate::critical_path::CriticalPathNode;
use crate::models::Task;

/// Owner / category / entity criteria. Absent criteria match everything;
/// present criteria must all match.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    #[pyo3(get, set)]
    pub owner_id: Option<String>,
    #[pyo3(get, set)]
    pub category: Option<String>,
    #[pyo3(get, set)]
    pub entity: Option<String>,
}

#[pymethods]
impl TaskFilter {
    #[new]
    #[pyo3(signature = (owner_id=None, category=None, entity=None))]
    fn new(owner_id: Option<String>, category: Option<String>, entity: Option<String>) -> Self {
        Self {
            owner_id,
            category,
            entity,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskFilter(owner_id={:?}, category={:?}, entity={:?})",
            self.owner_id, self.category, self.entity
        )
    }
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.owner_id.is_none() && self.category.is_none() && self.entity.is_none()
    }

    pub fn matches(&self, task: &Task) -> bool {
        fn accepts(criterion: &Option<String>, value: &str) -> bool {
            criterion.as_deref().map_or(true, |c| c == value)
        }

        accepts(&self.owner_id, &task.owner_id)
            && accepts(&self.category, &task.category)
            && accepts(&self.entity, &task.entity)
    }
}

/// Bottlenecks whose task matches every given criterion, order preserved.
pub fn filter_bottlenecks(bottlenecks: &[Bottleneck], filter: &TaskFilter) -> Vec<Bottleneck> {
    bottlenecks
        .iter()
        .filter(|b| filter.matches(&b.task))
        .cloned()
        .collect()
}

/// Critical path nodes whose task matches every given criterion, order and
/// positions preserved.
pub fn filter_critical_path(path: &[CriticalPathNode], filter: &TaskFilter) -> Vec<CriticalPathNode> {
    if filter.is_empty() {
        return path.to_vec();
    }
    path.iter()
        .filter(|n| filter.matches(&n.task))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bottleneck::compute_bottlenecks;
    use crate::config::FocusConfig;
    use crate::critical_path::compute_critical_path;
    use crate::models::fixtures::*;
    use crate::models::TaskStatus;

    fn tagged(id: &str, owner: &str, category: &str, entity: &str) -> Task {
        let mut task = make_task(id, 2.0, TaskStatus::Blocked, d(2026, 2, 1));
        task.owner_id = owner.to_string();
        task.category = category.to_string();
        task.entity = entity.to_string();
        task
    }

    fn sample() -> Vec<Task> {
        vec![
            tagged("a", "u1", "Bank Reconciliation", "NL"),
            tagged("b", "u2", "Bank Reconciliation", "NL"),
            tagged("c", "u1", "Accruals", "US"),
            tagged("d", "u1", "Bank Reconciliation", "US"),
        ]
    }

    #[test]
    fn test_filter_intersection() {
        let tasks = sample();
        let bottlenecks =
            compute_bottlenecks(&tasks, &[], &[], now(), &FocusConfig::default()).unwrap();

        let filter = TaskFilter {
            owner_id: Some("u1".to_string()),
            entity: Some("US".to_string()),
            ..TaskFilter::default()
        };
        let filtered = filter_bottlenecks(&bottlenecks, &filter);
        let ids: Vec<&str> = filtered.iter().map(|b| b.task.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "d"]);
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let tasks = sample();
        let bottlenecks =
            compute_bottlenecks(&tasks, &[], &[], now(), &FocusConfig::default()).unwrap();
        assert_eq!(filter_bottlenecks(&bottlenecks, &TaskFilter::default()), bottlenecks);

        let deps = vec![dep("a", "b"), dep("b", "c")];
        let path = compute_critical_path(&tasks, &deps, now(), &FocusConfig::default()).unwrap();
        assert_eq!(filter_critical_path(&path, &TaskFilter::default()), path);
    }

    #[test]
    fn test_critical_path_filter_keeps_positions() {
        let tasks = sample();
        let deps = vec![dep("a", "b"), dep("b", "c")];
        let path = compute_critical_path(&tasks, &deps, now(), &FocusConfig::default()).unwrap();

        let filter = TaskFilter {
            category: Some("Bank Reconciliation".to_string()),
            ..TaskFilter::default()
        };
        let filtered = filter_critical_path(&path, &filter);
        let positions: Vec<usize> = filtered.iter().map(|n| n.position).collect();
        assert_eq!(positions, vec![1, 2]);

        let none = TaskFilter {
            owner_id: Some("nobody".to_string()),
            ..TaskFilter::default()
        };
        assert!(filter_critical_path(&path, &none).is_empty());
    }
}
