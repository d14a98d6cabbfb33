//! The registry operations the scope tree is built on.

use crate::core::{GroupId, GroupKind, TaskId};
use crate::errors::Result;
use crate::groups::GroupNode;

/// Bookkeeping for one pipeline build: the open-group stack, the id counter
/// and the set of groups created so far.
pub trait GroupRegistry {
    /// Registers `node` as a child of the current group and makes it current.
    fn push_group(&mut self, node: GroupNode) -> Result<GroupId>;

    /// Closes the current group and returns it.
    fn pop_group(&mut self) -> Result<GroupId>;

    /// Returns the next group id. Ids are never reused within one build.
    fn next_group_id(&mut self) -> Result<u64>;

    /// Returns every group created so far, indexed by [`GroupId`].
    fn all_groups(&self) -> Result<&[GroupNode]>;

    /// Removes a task from every group. Returns true if it was attached.
    fn remove_task_from_groups(&mut self, task: TaskId) -> Result<bool>;
}

/// Structured identity used to recognize recursive re-entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct RecursionKey {
    kind: GroupKind,
    base_name: String,
}

impl RecursionKey {
    /// Underscores and hyphens are equivalent, matching the generated names.
    pub(crate) fn new(kind: GroupKind, base_name: &str) -> Self {
        Self {
            kind,
            base_name: base_name.replace('_', "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recursion_key_normalizes_underscores() {
        assert_eq!(
            RecursionKey::new(GroupKind::Graph, "flip_coin"),
            RecursionKey::new(GroupKind::Graph, "flip-coin")
        );
        assert_ne!(
            RecursionKey::new(GroupKind::Graph, "flip"),
            RecursionKey::new(GroupKind::Condition, "flip")
        );
    }
}
