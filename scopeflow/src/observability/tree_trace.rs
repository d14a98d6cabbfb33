//! Trace-level dump of a finished tree.

use crate::tree::GroupTree;
use tracing::trace;

/// Emits one trace event per group of `tree`, in pre-order.
pub fn trace_tree(tree: &GroupTree) {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }
    for (depth, id, group) in tree.walk() {
        trace!(
            pipeline = %tree.pipeline_name(),
            depth,
            id = %id,
            group = %group.name(),
            kind = %group.kind(),
            tasks = group.tasks().len(),
            children = group.children().len(),
            recursive = group.recursive_ref().is_some(),
            "Group"
        );
    }
}
