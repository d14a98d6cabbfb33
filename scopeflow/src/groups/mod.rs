//! Group nodes and the grouping constructs built on them.
//!
//! - [`ExitHandler`]: a cleanup task that always runs last
//! - [`Condition`]: tasks gated on a run time condition
//! - [`Graph`]: a reusable, possibly recursive, sub-graph
//! - [`ParallelFor`]: tasks fanned out per loop item
//! - [`Parallelism`]: a concurrency bound

mod condition;
mod exit_handler;
mod graph;
mod node;
mod parallel_for;
mod parallelism;


pub use condition::{ComparisonOp, Condition, ConditionOperator, Operand};
pub use exit_handler::ExitHandler;
pub use graph::{Graph, GraphSpec};
pub use node::{GroupNode, GroupPayload, GroupVariant};
pub use parallel_for::ParallelFor;
pub use parallelism::Parallelism;

pub(crate) use node::remove_task_recursive;
