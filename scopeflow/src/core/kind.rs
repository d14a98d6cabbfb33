//! Group kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of grouping construct a group node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    /// The root group of a pipeline.
    Pipeline,
    /// Tasks guarded by an exit handler that always runs last.
    ExitHandler,
    /// Tasks that only run when a condition holds.
    Condition,
    /// Tasks fanned out once per loop item.
    ForLoop,
    /// Tasks sharing a concurrent-execution bound.
    ParallelLimit,
    /// A reusable sub-graph.
    Graph,
}

impl GroupKind {
    /// Returns the canonical spelling used as the name prefix.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pipeline => "pipeline",
            Self::ExitHandler => "exit_handler",
            Self::Condition => "condition",
            Self::ForLoop => "for_loop",
            Self::ParallelLimit => "parallel_limit",
            Self::Graph => "graph",
        }
    }

    /// Returns true if a group of this kind can be a recursive re-entry.
    ///
    /// Loop names come from fresh random codes and never identify an
    /// earlier loop.
    #[must_use]
    pub fn can_recurse(self) -> bool {
        !matches!(self, Self::ForLoop)
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
