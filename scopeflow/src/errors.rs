//! Error types for scope-tree construction.
//!
//! Every error is raised synchronously at the point of violation and is
//! expected to abort the current build. Each variant carries a stable code
//! so callers can report failures without matching on message text.

use crate::core::{GroupId, TaskId};
use std::collections::HashMap;
use thiserror::Error;

/// The error type for all scope-tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// A tree operation was attempted while no build was in progress.
    #[error("No active build context: call begin() before opening groups or adding tasks")]
    NoActiveContext,

    /// `begin` was called on a context that is already building.
    #[error("A build for pipeline '{pipeline}' is already in progress")]
    BuildInProgress {
        /// The pipeline currently being built.
        pipeline: String,
    },

    /// An exit handler was given a task that depends on other tasks.
    #[error("Exit task '{task}' cannot depend on other tasks (depends on: {})", .dependencies.join(", "))]
    InvalidExitOp {
        /// The offending task.
        task: String,
        /// The upstream tasks it depends on.
        dependencies: Vec<String>,
    },

    /// An exit task was given to a second exit handler.
    #[error("Task '{task}' is already the exit task of another exit handler")]
    ExitTaskReused {
        /// The offending task.
        task: String,
    },

    /// A parallelism bound was not a positive integer.
    #[error("Parallelism must be a positive integer, got {value}")]
    InvalidParallelism {
        /// The rejected bound.
        value: i64,
    },

    /// `pop_group` was called with an empty stack.
    #[error("Group stack underflow: pop called with no open group")]
    StackUnderflow,

    /// `finish` was called while groups other than the root were still open.
    #[error("Cannot finish build: groups still open: {}", .open.join(" > "))]
    ScopesStillOpen {
        /// Names of the open groups, outermost first.
        open: Vec<String>,
    },

    /// Opening a group would exceed the configured nesting limit.
    #[error("Group nesting exceeds the configured limit of {limit}")]
    NestingTooDeep {
        /// The configured limit.
        limit: usize,
    },

    /// A static item list could not be wrapped as loop arguments.
    #[error("Invalid loop items: {reason}")]
    InvalidLoopItems {
        /// Why the items were rejected.
        reason: String,
    },

    /// A field was requested that the static loop items do not have.
    #[error("Loop argument '{loop_name}' has no field '{field}'")]
    UnknownLoopField {
        /// The loop argument name.
        loop_name: String,
        /// The requested field.
        field: String,
    },

    /// A task handle did not belong to the active build.
    #[error("Unknown task: {0}")]
    UnknownTask(TaskId),

    /// A group handle did not belong to the active build.
    #[error("Unknown group: {0}")]
    UnknownGroup(GroupId),
}

impl ScopeError {
    /// Returns the stable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoActiveContext => "SCOPE-001-NO_CONTEXT",
            Self::InvalidExitOp { .. } => "SCOPE-002-EXIT_OP",
            Self::InvalidParallelism { .. } => "SCOPE-003-PARALLELISM",
            Self::StackUnderflow => "SCOPE-004-UNDERFLOW",
            Self::BuildInProgress { .. } => "SCOPE-005-IN_PROGRESS",
            Self::ScopesStillOpen { .. } => "SCOPE-006-OPEN_SCOPES",
            Self::NestingTooDeep { .. } => "SCOPE-007-DEPTH",
            Self::InvalidLoopItems { .. } => "SCOPE-008-LOOP_ITEMS",
            Self::UnknownLoopField { .. } => "SCOPE-009-LOOP_FIELD",
            Self::UnknownTask(_) => "SCOPE-010-UNKNOWN_TASK",
            Self::UnknownGroup(_) => "SCOPE-011-UNKNOWN_GROUP",
            Self::ExitTaskReused { .. } => "SCOPE-012-EXIT_REUSED",
        }
    }

    /// Returns a hint for fixing the error, if one applies.
    #[must_use]
    pub fn fix_hint(&self) -> Option<&'static str> {
        match self {
            Self::NoActiveContext => Some("Start a build with BuildContext::begin first."),
            Self::InvalidExitOp { .. } => Some(
                "Create the exit task without upstream dependencies; it always runs last.",
            ),
            Self::ExitTaskReused { .. } => {
                Some("Create a separate exit task for each exit handler.")
            }
            Self::InvalidParallelism { .. } => {
                Some("Pass a positive bound, or None for no limit.")
            }
            Self::StackUnderflow | Self::ScopesStillOpen { .. } => Some(
                "Open groups only through BuildContext::open and let each Scope drop before finishing.",
            ),
            Self::NestingTooDeep { .. } => {
                Some("Check for unbounded recursion or raise BuildConfig::max_depth.")
            }
            Self::InvalidLoopItems { .. } => Some(
                "Use a non-empty list of scalars, or of objects that all share the same keys.",
            ),
            _ => None,
        }
    }

    /// Returns true for errors that indicate a scope-discipline bug rather
    /// than invalid user input.
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::StackUnderflow | Self::ScopesStillOpen { .. })
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("code".to_string(), serde_json::json!(self.code()));
        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        if let Some(hint) = self.fix_hint() {
            map.insert("fix_hint".to_string(), serde_json::json!(hint));
        }
        match self {
            Self::InvalidExitOp { task, dependencies } => {
                map.insert("task".to_string(), serde_json::json!(task));
                map.insert("dependencies".to_string(), serde_json::json!(dependencies));
            }
            Self::ExitTaskReused { task } => {
                map.insert("task".to_string(), serde_json::json!(task));
            }
            Self::InvalidParallelism { value } => {
                map.insert("value".to_string(), serde_json::json!(value));
            }
            Self::ScopesStillOpen { open } => {
                map.insert("open".to_string(), serde_json::json!(open));
            }
            _ => {}
        }
        map
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = ScopeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_op_message_lists_dependencies() {
        let err = ScopeError::InvalidExitOp {
            task: "cleanup".to_string(),
            dependencies: vec!["train".to_string(), "eval".to_string()],
        };

        assert!(err.to_string().contains("train, eval"));
        assert_eq!(err.code(), "SCOPE-002-EXIT_OP");
    }

    #[test]
    fn test_to_dict() {
        let err = ScopeError::InvalidParallelism { value: -2 };
        let dict = err.to_dict();

        assert_eq!(dict["code"], "SCOPE-003-PARALLELISM");
        assert_eq!(dict["value"], -2);
        assert!(dict.contains_key("fix_hint"));
    }

    #[test]
    fn test_contract_violation() {
        assert!(ScopeError::StackUnderflow.is_contract_violation());
        assert!(!ScopeError::NoActiveContext.is_contract_violation());
    }

    #[test]
    fn test_unknown_field_has_no_hint() {
        let err = ScopeError::UnknownLoopField {
            loop_name: "loop-item-param-abc".to_string(),
            field: "c".to_string(),
        };
        assert!(err.fix_hint().is_none());
    }
}
