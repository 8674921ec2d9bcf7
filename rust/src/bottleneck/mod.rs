//! Bottleneck detection.
//!
//! A bottleneck is a blocked or overdue task, ranked by its own effort plus
//! the effort of everything transitively waiting on it, scaled by
//! critical-path, overdue and blocked multipliers.

mod ranking;
mod scoring;
mod types;

pub use ranking::compute_bottlenecks;
pub(crate) use ranking::rank_bottlenecks;
pub use scoring::{
    default_reason, impact_score, index_events, is_candidate, resolve_reason, RiskFlags,
    OVERDUE_NOTE,
};
pub use types::Bottleneck;
