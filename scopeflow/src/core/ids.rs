//! Arena handles for groups and tasks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a group node inside one build.
///
/// Handles are plain indices: they never own the node and stay valid for the
/// lifetime of the build and of the finished tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub(crate) usize);

impl GroupId {
    /// Returns the arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group#{}", self.0)
    }
}

/// Handle to a task inside one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub(crate) usize);

impl TaskId {
    /// Returns the arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// Something a group can be ordered after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "id")]
pub enum DependencyRef {
    /// A task.
    Task(TaskId),
    /// Another group.
    Group(GroupId),
}

impl From<TaskId> for DependencyRef {
    fn from(id: TaskId) -> Self {
        Self::Task(id)
    }
}

impl From<GroupId> for DependencyRef {
    fn from(id: GroupId) -> Self {
        Self::Group(id)
    }
}
