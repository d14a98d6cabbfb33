//! The base group node shared by every grouping construct.

use super::{ConditionOperator, GraphSpec};
use crate::core::{DependencyRef, GroupId, GroupKind, TaskId};
use crate::loops::LoopArguments;
use serde::{Deserialize, Serialize};

/// Kind-specific data carried by a group node.
///
/// The node's kind is derived from this payload so the two cannot disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum GroupPayload {
    /// The pipeline root.
    Pipeline,
    /// An exit handler and the task it guarantees to run.
    ExitHandler {
        /// The guaranteed-to-run task.
        exit_task: TaskId,
    },
    /// A conditional branch.
    Condition {
        /// The recorded, unevaluated condition.
        condition: ConditionOperator,
    },
    /// A reusable sub-graph.
    Graph {
        /// Declared inputs and outputs.
        spec: GraphSpec,
    },
    /// A parallel-for loop.
    ForLoop {
        /// The iteration source.
        loop_args: LoopArguments,
    },
    /// A concurrency bound; `None` means unlimited.
    ParallelLimit {
        /// The positive bound, if any.
        parallelism: Option<u32>,
    },
}

impl GroupPayload {
    /// Returns the kind this payload belongs to.
    #[must_use]
    pub fn kind(&self) -> GroupKind {
        match self {
            Self::Pipeline => GroupKind::Pipeline,
            Self::ExitHandler { .. } => GroupKind::ExitHandler,
            Self::Condition { .. } => GroupKind::Condition,
            Self::Graph { .. } => GroupKind::Graph,
            Self::ForLoop { .. } => GroupKind::ForLoop,
            Self::ParallelLimit { .. } => GroupKind::ParallelLimit,
        }
    }
}

/// A node in the scope tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupNode {
    name: Option<String>,
    given_name: Option<String>,
    tasks: Vec<TaskId>,
    children: Vec<GroupId>,
    dependencies: Vec<DependencyRef>,
    recursive_ref: Option<GroupId>,
    payload: GroupPayload,
}

impl GroupNode {
    /// Creates an unattached node. Its name is assigned at scope entry.
    #[must_use]
    pub fn new(payload: GroupPayload, given_name: Option<String>) -> Self {
        Self {
            name: None,
            given_name,
            tasks: Vec::new(),
            children: Vec::new(),
            dependencies: Vec::new(),
            recursive_ref: None,
            payload,
        }
    }

    /// Returns the group kind.
    #[must_use]
    pub fn kind(&self) -> GroupKind {
        self.payload.kind()
    }

    /// Returns the assigned name, or an empty string before scope entry.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Returns true once a name has been assigned.
    #[must_use]
    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }

    /// Returns the caller-supplied base name.
    #[must_use]
    pub fn given_name(&self) -> Option<&str> {
        self.given_name.as_deref()
    }

    /// Returns the tasks directly inside this group, in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[TaskId] {
        &self.tasks
    }

    /// Returns the child groups, in insertion order.
    #[must_use]
    pub fn children(&self) -> &[GroupId] {
        &self.children
    }

    /// Returns the explicit dependencies added with [`after`](Self::after).
    #[must_use]
    pub fn dependencies(&self) -> &[DependencyRef] {
        &self.dependencies
    }

    /// Returns the earlier group this one recursively re-enters.
    #[must_use]
    pub fn recursive_ref(&self) -> Option<GroupId> {
        self.recursive_ref
    }

    /// Returns the kind-specific payload.
    #[must_use]
    pub fn payload(&self) -> &GroupPayload {
        &self.payload
    }

    /// Returns the exit task of an exit handler.
    #[must_use]
    pub fn exit_task(&self) -> Option<TaskId> {
        match self.payload {
            GroupPayload::ExitHandler { exit_task } => Some(exit_task),
            _ => None,
        }
    }

    /// Returns the condition of a condition group.
    #[must_use]
    pub fn condition(&self) -> Option<&ConditionOperator> {
        match &self.payload {
            GroupPayload::Condition { condition } => Some(condition),
            _ => None,
        }
    }

    /// Returns the inputs and outputs of a graph group.
    #[must_use]
    pub fn graph(&self) -> Option<&GraphSpec> {
        match &self.payload {
            GroupPayload::Graph { spec } => Some(spec),
            _ => None,
        }
    }

    /// Returns the graph spec for editing, e.g. to declare outputs once the
    /// producing tasks exist.
    pub fn graph_mut(&mut self) -> Option<&mut GraphSpec> {
        match &mut self.payload {
            GroupPayload::Graph { spec } => Some(spec),
            _ => None,
        }
    }

    /// Returns the loop arguments of a parallel-for group.
    #[must_use]
    pub fn loop_arguments(&self) -> Option<&LoopArguments> {
        match &self.payload {
            GroupPayload::ForLoop { loop_args } => Some(loop_args),
            _ => None,
        }
    }

    /// Returns the bound of a parallelism group. `None` for unlimited or for
    /// other kinds.
    #[must_use]
    pub fn parallelism(&self) -> Option<u32> {
        match self.payload {
            GroupPayload::ParallelLimit { parallelism } => parallelism,
            _ => None,
        }
    }

    /// Orders this group after a task or another group.
    pub fn after(&mut self, dependency: impl Into<DependencyRef>) -> &mut Self {
        self.dependencies.push(dependency.into());
        self
    }

    pub(crate) fn assign_name(&mut self, name: String) {
        debug_assert!(self.name.is_none(), "group name assigned twice");
        if self.name.is_none() {
            self.name = Some(name);
        }
    }

    pub(crate) fn set_recursive_ref(&mut self, target: GroupId) {
        self.recursive_ref = Some(target);
    }

    pub(crate) fn push_task(&mut self, task: TaskId) {
        self.tasks.push(task);
    }

    pub(crate) fn push_child(&mut self, child: GroupId) {
        self.children.push(child);
    }

    fn remove_task(&mut self, task: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| *t != task);
        self.tasks.len() != before
    }
}

/// Removes `task` from `start` and every group beneath it.
///
/// Returns true if the task was found anywhere. Groups outside the subtree
/// rooted at `start` are not touched.
pub(crate) fn remove_task_recursive(nodes: &mut [GroupNode], start: GroupId, task: TaskId) -> bool {
    let mut removed = false;
    let mut pending = vec![start];
    while let Some(id) = pending.pop() {
        let Some(node) = nodes.get_mut(id.0) else {
            continue;
        };
        removed |= node.remove_task(task);
        pending.extend(node.children.iter().copied());
    }
    removed
}

/// A grouping construct that can be opened as a scope.
///
/// Variants only build an unattached [`GroupNode`]; naming, recursion
/// detection and stack handling live in
/// [`BuildContext::open`](crate::context::BuildContext::open).
pub trait GroupVariant: Sized {
    /// What the scope hands back to authoring code on entry.
    type Handle;

    /// Gives access to the node under construction.
    fn node_mut(&mut self) -> &mut GroupNode;

    /// Splits the variant into its node and its scope handle.
    fn into_parts(self) -> (GroupNode, Self::Handle);

    /// Orders the group after a task or another group.
    #[must_use]
    fn after(mut self, dependency: impl Into<DependencyRef>) -> Self {
        self.node_mut().after(dependency);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_with(tasks: &[usize], children: &[usize]) -> GroupNode {
        let mut node = GroupNode::new(GroupPayload::ParallelLimit { parallelism: None }, None);
        for &t in tasks {
            node.push_task(TaskId(t));
        }
        for &c in children {
            node.push_child(GroupId(c));
        }
        node
    }

    #[test]
    fn test_kind_follows_payload() {
        let node = GroupNode::new(GroupPayload::ParallelLimit { parallelism: Some(2) }, None);
        assert_eq!(node.kind(), GroupKind::ParallelLimit);
        assert_eq!(node.parallelism(), Some(2));
        assert!(node.loop_arguments().is_none());
        assert!(!node.is_named());
        assert_eq!(node.name(), "");
    }

    #[test]
    fn test_after_chains() {
        let mut node = GroupNode::new(GroupPayload::Pipeline, None);
        node.after(TaskId(1)).after(GroupId(2));

        assert_eq!(
            node.dependencies(),
            &[DependencyRef::Task(TaskId(1)), DependencyRef::Group(GroupId(2))]
        );
    }

    #[test]
    fn test_remove_task_recursive_deep_child_only() {
        // 0 -> 1 -> 2 -> 3, and 0 -> 4 as an untouched sibling subtree.
        let mut nodes = vec![
            node_with(&[], &[1, 4]),
            node_with(&[], &[2]),
            node_with(&[], &[3]),
            node_with(&[7, 8], &[]),
            node_with(&[9], &[]),
        ];

        assert!(remove_task_recursive(&mut nodes, GroupId(1), TaskId(7)));
        assert_eq!(nodes[3].tasks(), &[TaskId(8)]);
        assert_eq!(nodes[4].tasks(), &[TaskId(9)]);

        assert!(!remove_task_recursive(&mut nodes, GroupId(4), TaskId(8)));
        assert_eq!(nodes[3].tasks(), &[TaskId(8)]);
    }
}
