//! Testing utilities for code that builds scope trees.
//!
//! This module provides:
//! - Contexts with deterministic loop codes
//! - Structural assertions over finished trees

mod assertions;
mod fixtures;

pub use assertions::{
    assert_child_of, assert_kind, assert_names_unique, assert_stack_balanced,
    assert_task_only_in,
};
pub use fixtures::{build_tree, seeded_context, task_names, TEST_SEED};
