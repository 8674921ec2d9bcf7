//! Critical path analysis.
//!
//! The critical path is the single longest chain of unfinished tasks through
//! the dependency graph, weighted by estimated hours. Finished tasks are
//! treated as satisfied prerequisites and removed before the search.

mod calculation;
mod types;

pub use calculation::{compute_critical_path, longest_path, LongestPath};
pub(crate) use calculation::critical_path_from_graph;
pub use types::CriticalPathNode;
