//! The finished scope tree handed to the downstream compiler.

use crate::core::{GroupId, Task, TaskId};
use crate::groups::GroupNode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A finished, read-only tree of groups and the tasks they hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTree {
    pipeline_name: String,
    root: GroupId,
    groups: Vec<GroupNode>,
    tasks: Vec<Task>,
}

impl GroupTree {
    pub(crate) fn new(
        pipeline_name: String,
        root: GroupId,
        groups: Vec<GroupNode>,
        tasks: Vec<Task>,
    ) -> Self {
        Self {
            pipeline_name,
            root,
            groups,
            tasks,
        }
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn pipeline_name(&self) -> &str {
        &self.pipeline_name
    }

    /// Returns the root pipeline group.
    #[must_use]
    pub fn root(&self) -> GroupId {
        self.root
    }

    /// Returns a group.
    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&GroupNode> {
        self.groups.get(id.0)
    }

    /// Returns a task.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id.0)
    }

    /// Returns every group, indexed by [`GroupId`].
    #[must_use]
    pub fn groups(&self) -> &[GroupNode] {
        &self.groups
    }

    /// Returns every task, indexed by [`TaskId`].
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of groups, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if the tree has no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the child groups of `id`; empty for unknown ids.
    #[must_use]
    pub fn children(&self, id: GroupId) -> &[GroupId] {
        self.group(id).map(GroupNode::children).unwrap_or_default()
    }

    /// Returns the tasks directly inside `id`.
    #[must_use]
    pub fn tasks_of(&self, id: GroupId) -> Vec<&Task> {
        self.group(id)
            .map(|g| g.tasks().iter().filter_map(|t| self.task(*t)).collect())
            .unwrap_or_default()
    }

    /// Returns the group that has `id` as a child.
    #[must_use]
    pub fn parent_of(&self, id: GroupId) -> Option<GroupId> {
        self.groups
            .iter()
            .position(|g| g.children().contains(&id))
            .map(GroupId)
    }

    /// Returns every group holding `task`. A well-formed tree yields at most one.
    #[must_use]
    pub fn groups_containing(&self, task: TaskId) -> Vec<GroupId> {
        self.groups
            .iter()
            .enumerate()
            .filter(|(_, g)| g.tasks().contains(&task))
            .map(|(i, _)| GroupId(i))
            .collect()
    }

    /// Returns the first group, in creation order, with the given name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<GroupId> {
        self.groups.iter().position(|g| g.name() == name).map(GroupId)
    }

    /// Returns the task with the given name. Names are unique per build.
    #[must_use]
    pub fn find_task(&self, name: &str) -> Option<TaskId> {
        self.tasks.iter().position(|t| t.name == name).map(TaskId)
    }

    /// Follows `recursive_ref` links to the group that was actually built.
    #[must_use]
    pub fn resolve(&self, id: GroupId) -> GroupId {
        let mut current = id;
        // Each link points to an earlier group, so this terminates.
        while let Some(target) = self.group(current).and_then(GroupNode::recursive_ref) {
            if target >= current {
                break;
            }
            current = target;
        }
        current
    }

    /// Walks the tree depth-first in child order, yielding
    /// `(depth, id, group)` with the root at depth 0.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            tree: self,
            pending: vec![(0, self.root)],
        }
    }
}

/// Pre-order iterator over a [`GroupTree`].
#[derive(Debug)]
pub struct Walk<'a> {
    tree: &'a GroupTree,
    pending: Vec<(usize, GroupId)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, GroupId, &'a GroupNode);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (depth, id) = self.pending.pop()?;
            let Some(group) = self.tree.group(id) else {
                continue;
            };
            self.pending
                .extend(group.children().iter().rev().map(|child| (depth + 1, *child)));
            return Some((depth, id, group));
        }
    }
}

impl fmt::Display for GroupTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, _, group) in self.walk() {
            write!(f, "{:indent$}{} [{}]", "", group.name(), group.kind(), indent = depth * 2)?;
            if let Some(target) = group.recursive_ref() {
                write!(f, " -> {target}")?;
            }
            let tasks: Vec<&str> = group
                .tasks()
                .iter()
                .filter_map(|t| self.task(*t))
                .map(|t| t.name.as_str())
                .collect();
            if !tasks.is_empty() {
                write!(f, " tasks: {}", tasks.join(", "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
