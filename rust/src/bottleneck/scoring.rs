//! Scoring and reason resolution for bottleneck candidates.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

use crate::config::FocusConfig;
use crate::models::{BottleneckEvent, ReasonType, Task};

/// Fallback note when neither an event nor the task explains the hold-up.
pub const OVERDUE_NOTE: &str = "Task is overdue";

/// Risk factors that scale a candidate's time impact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RiskFlags {
    pub on_critical_path: bool,
    pub overdue: bool,
    pub blocked: bool,
}

/// A task is a candidate when it is blocked, or unfinished and past due.
pub fn is_candidate(task: &Task, today: NaiveDate) -> bool {
    task.is_blocked() || task.is_overdue(today)
}

/// Scale `time_impact` by each applicable multiplier.
///
/// Multipliers compose independently: with defaults a blocked, overdue task
/// on the critical path scores `time_impact * 2.0 * 1.5 * 1.3`.
pub fn impact_score(time_impact: f64, flags: RiskFlags, config: &FocusConfig) -> f64 {
    let mut score = time_impact;
    if flags.on_critical_path {
        score *= config.critical_path_multiplier;
    }
    if flags.overdue {
        score *= config.overdue_multiplier;
    }
    if flags.blocked {
        score *= config.blocked_multiplier;
    }
    score
}

/// Pick the most relevant event per task: latest `created_at`, earliest in
/// input order on ties.
pub fn index_events(events: &[BottleneckEvent]) -> FxHashMap<&str, &BottleneckEvent> {
    let mut index: FxHashMap<&str, &BottleneckEvent> = FxHashMap::default();
    for event in events {
        index
            .entry(event.task_id.as_str())
            .and_modify(|current| {
                if event.created_at > current.created_at {
                    *current = event;
                }
            })
            .or_insert(event);
    }
    index
}

/// Reason when no event exists: blocked tasks wait on a dependency,
/// anything else is simply late.
pub fn default_reason(task: &Task) -> ReasonType {
    if task.is_blocked() {
        ReasonType::Dependency
    } else {
        ReasonType::Overdue
    }
}

/// Resolve reason type and notes. Empty notes fall through to the task's
/// blocked reason, then to [`OVERDUE_NOTE`].
pub fn resolve_reason(task: &Task, event: Option<&BottleneckEvent>) -> (ReasonType, String) {
    let reason_type = event
        .map(|e| e.reason_type)
        .unwrap_or_else(|| default_reason(task));

    let notes = event
        .map(|e| e.notes.as_str())
        .filter(|n| !n.is_empty())
        .or_else(|| task.blocked_reason.as_deref().filter(|r| !r.is_empty()))
        .unwrap_or(OVERDUE_NOTE)
        .to_string();

    (reason_type, notes)
}
