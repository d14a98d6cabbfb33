//! Structural assertions over finished trees.

use crate::context::BuildContext;
use crate::core::{GroupId, GroupKind, TaskId};
use crate::tree::GroupTree;
use std::collections::HashSet;

/// Asserts that `child` is a direct child group of `parent`.
pub fn assert_child_of(tree: &GroupTree, parent: GroupId, child: GroupId) {
    assert!(
        tree.children(parent).contains(&child),
        "Expected {} to be a child of {}, children: {:?}",
        child,
        parent,
        tree.children(parent)
    );
}

/// Asserts that `task` sits in `group` and in no other group.
pub fn assert_task_only_in(tree: &GroupTree, task: TaskId, group: GroupId) {
    let holders = tree.groups_containing(task);
    assert_eq!(
        holders,
        vec![group],
        "Expected {} only in {}, found in {:?}",
        task,
        group,
        holders
    );
}

/// Asserts that no two freshly named groups share a name. Recursive
/// re-entries reuse a name on purpose and are skipped.
pub fn assert_names_unique(tree: &GroupTree) {
    let mut seen = HashSet::new();
    for group in tree.groups().iter().filter(|g| g.recursive_ref().is_none()) {
        assert!(
            seen.insert(group.name()),
            "Duplicate group name '{}'",
            group.name()
        );
    }
}

/// Asserts the kind of `group`.
pub fn assert_kind(tree: &GroupTree, group: GroupId, expected: GroupKind) {
    let actual = tree.group(group).map(|g| g.kind());
    assert_eq!(
        actual,
        Some(expected),
        "Expected {} to be {}, got {:?}",
        group,
        expected,
        actual
    );
}

/// Asserts that only the root is open.
pub fn assert_stack_balanced(ctx: &BuildContext) {
    assert_eq!(
        ctx.depth(),
        1,
        "Expected only the root open, depth is {}",
        ctx.depth()
    );
}
