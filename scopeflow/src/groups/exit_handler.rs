//! Exit handlers.

use super::{GroupNode, GroupPayload, GroupVariant};
use crate::context::{BuildContext, GroupRegistry};
use crate::core::TaskId;
use crate::errors::{Result, ScopeError};
use tracing::debug;

/// A group whose exit task runs when the group finishes, whatever the outcome
/// of the tasks inside it.
#[derive(Debug)]
pub struct ExitHandler {
    node: GroupNode,
}

impl ExitHandler {
    /// Creates an exit handler around `exit_task`.
    ///
    /// The task is detached from whatever group it was added to and flagged
    /// as an exit handler. It becomes the only task of the new group.
    ///
    /// # Errors
    ///
    /// Returns `InvalidExitOp` if the task depends on other tasks and
    /// `ExitTaskReused` if it already belongs to an exit handler; the tree is
    /// left untouched in both cases. Returns `NoActiveContext` or
    /// `UnknownTask` for an idle context or a foreign handle.
    pub fn new(ctx: &mut BuildContext, exit_task: TaskId) -> Result<Self> {
        let task = ctx.task(exit_task)?;
        if task.has_dependencies() {
            return Err(ScopeError::InvalidExitOp {
                task: task.name.clone(),
                dependencies: task.dependent_names.clone(),
            });
        }
        if task.is_exit_handler {
            return Err(ScopeError::ExitTaskReused {
                task: task.name.clone(),
            });
        }

        let detached = ctx.remove_task_from_groups(exit_task)?;
        let task = ctx.task_mut(exit_task)?;
        task.is_exit_handler = true;
        debug!(task = %task.name, detached, "Registered exit task");

        let mut node = GroupNode::new(GroupPayload::ExitHandler { exit_task }, None);
        node.push_task(exit_task);
        Ok(Self { node })
    }

    /// Returns the exit task.
    #[must_use]
    pub fn exit_task(&self) -> Option<TaskId> {
        self.node.exit_task()
    }
}

impl GroupVariant for ExitHandler {
    type Handle = ();

    fn node_mut(&mut self) -> &mut GroupNode {
        &mut self.node
    }

    fn into_parts(self) -> (GroupNode, Self::Handle) {
        (self.node, ())
    }
}
