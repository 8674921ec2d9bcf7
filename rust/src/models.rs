//! Core data types for the focus analytics engine.

use chrono::{DateTime, NaiveDate, Utc};
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a task, owned by the external task-management system.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Blocked,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Blocked => "blocked",
            Self::Done => "done",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a task is holding up the close.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonType {
    Approval,
    Data,
    Exception,
    Dependency,
    Overdue,
}

impl ReasonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approval => "approval",
            Self::Data => "data",
            Self::Exception => "exception",
            Self::Dependency => "dependency",
            Self::Overdue => "overdue",
        }
    }
}

impl std::fmt::Display for ReasonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of close work.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub title: String,
    #[pyo3(get, set)]
    pub category: String,
    #[pyo3(get, set)]
    pub owner_id: String,
    #[pyo3(get, set)]
    pub reviewer_id: Option<String>,
    #[pyo3(get, set)]
    pub status: TaskStatus,
    #[pyo3(get, set)]
    pub due_date: NaiveDate,
    #[pyo3(get, set)]
    pub estimated_hours: f64,
    #[pyo3(get, set)]
    pub last_updated: DateTime<Utc>,
    #[pyo3(get, set)]
    pub entity: String,
    #[pyo3(get, set)]
    pub blocked_reason: Option<String>,
}

#[pymethods]
impl Task {
    #[new]
    #[pyo3(signature = (
        id,
        title,
        category,
        owner_id,
        status,
        due_date,
        estimated_hours,
        last_updated,
        entity,
        reviewer_id=None,
        blocked_reason=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: String,
        title: String,
        category: String,
        owner_id: String,
        status: TaskStatus,
        due_date: NaiveDate,
        estimated_hours: f64,
        last_updated: DateTime<Utc>,
        entity: String,
        reviewer_id: Option<String>,
        blocked_reason: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            category,
            owner_id,
            reviewer_id,
            status,
            due_date,
            estimated_hours,
            last_updated,
            entity,
            blocked_reason,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={:?}, status={}, due={}, hours={})",
            self.id, self.status, self.due_date, self.estimated_hours
        )
    }
}

impl Task {
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    pub fn is_blocked(&self) -> bool {
        self.status == TaskStatus::Blocked
    }

    /// A task is overdue when it is unfinished and its due date is strictly
    /// before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_done() && self.due_date < today
    }

    /// Signed whole days from `today` until the due date (negative = overdue).
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.due_date - today).num_days()
    }

    /// Whole days since the last update, floored and never negative.
    pub fn age_in_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.last_updated).num_days().max(0)
    }
}

/// `to_task_id` is blocked by `from_task_id`.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    #[pyo3(get, set)]
    pub from_task_id: String,
    #[pyo3(get, set)]
    pub to_task_id: String,
}

#[pymethods]
impl Dependency {
    #[new]
    fn new(from_task_id: String, to_task_id: String) -> Self {
        Self {
            from_task_id,
            to_task_id,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Dependency(from={:?}, to={:?})",
            self.from_task_id, self.to_task_id
        )
    }
}

/// Human-supplied context explaining why a task is stuck.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BottleneckEvent {
    #[pyo3(get, set)]
    pub task_id: String,
    #[pyo3(get, set)]
    pub reason_type: ReasonType,
    #[pyo3(get, set)]
    pub notes: String,
    #[pyo3(get, set)]
    pub created_at: DateTime<Utc>,
}

#[pymethods]
impl BottleneckEvent {
    #[new]
    fn new(
        task_id: String,
        reason_type: ReasonType,
        notes: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            task_id,
            reason_type,
            notes,
            created_at,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "BottleneckEvent(task_id={:?}, reason={}, created_at={})",
            self.task_id, self.reason_type, self.created_at
        )
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_overdue_is_strictly_before_today() {
        let today = d(2026, 1, 20);
        let due_today = make_task("a", 1.0, TaskStatus::Todo, today);
        let due_yesterday = make_task("b", 1.0, TaskStatus::InProgress, d(2026, 1, 19));
        let done_late = make_task("c", 1.0, TaskStatus::Done, d(2026, 1, 1));

        assert!(!due_today.is_overdue(today));
        assert!(due_yesterday.is_overdue(today));
        assert!(!done_late.is_overdue(today)); // finished work is never overdue
    }

    #[test]
    fn test_days_until_due_is_signed() {
        let today = d(2026, 1, 20);
        assert_eq!(todo("a", 1.0).days_until_due(today), 26);
        let late = make_task("b", 1.0, TaskStatus::Blocked, d(2026, 1, 18));
        assert_eq!(late.days_until_due(today), -2);
    }

    #[test]
    fn test_age_in_days_floors_and_clamps() {
        let mut task = todo("a", 1.0);
        // 2026-01-17 09:30 -> 2026-01-20 12:00 is 3 days and a bit
        assert_eq!(task.age_in_days(now()), 3);

        task.last_updated = Utc.with_ymd_and_hms(2026, 1, 21, 0, 0, 0).unwrap();
        assert_eq!(task.age_in_days(now()), 0);
    }

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let parsed: ReasonType = serde_json::from_str("\"approval\"").unwrap();
        assert_eq!(parsed, ReasonType::Approval);
        assert_eq!(TaskStatus::Blocked.to_string(), "blocked");
    }
}
