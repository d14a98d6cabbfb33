//! Fixtures for building trees in tests.

use crate::config::BuildConfig;
use crate::context::BuildContext;
use crate::core::GroupId;
use crate::errors::Result;
use crate::tree::GroupTree;

/// Seed used by [`seeded_context`].
pub const TEST_SEED: u64 = 0x5C0F_E5EE;

/// Returns a context that has begun building `pipeline` with seeded loop
/// codes, so names are stable across runs.
#[must_use]
pub fn seeded_context(pipeline: &str) -> BuildContext {
    let mut ctx = BuildContext::with_config(BuildConfig::new().with_loop_code_seed(TEST_SEED));
    if let Err(e) = ctx.begin(pipeline) {
        unreachable!("fresh context refused to begin: {e}");
    }
    ctx
}

/// Runs `body` against a seeded context and returns the finished tree.
///
/// # Errors
///
/// Returns the first error raised by `body` or by finishing the build.
pub fn build_tree<F>(pipeline: &str, body: F) -> Result<GroupTree>
where
    F: FnOnce(&mut BuildContext, GroupId) -> Result<()>,
{
    let mut ctx = seeded_context(pipeline);
    let root = ctx.root()?;
    body(&mut ctx, root)?;
    ctx.finish()
}

/// Returns the names of the tasks directly inside `group`.
#[must_use]
pub fn task_names(tree: &GroupTree, group: GroupId) -> Vec<String> {
    tree.tasks_of(group).iter().map(|t| t.name.clone()).collect()
}
