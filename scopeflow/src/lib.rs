//! # Scopeflow
//!
//! Scope-tree construction for workflow pipeline definitions.
//!
//! While pipeline-definition code runs, scopeflow tracks which grouping
//! construct is open and files every task and nested group under it.
//! Group kinds are conditions, loops, exit handlers, parallelism limits and
//! sub-graphs. The result is a [`GroupTree`](tree::GroupTree) that a compiler
//! walks to emit an executable workflow.
//!
//! - **Explicit build context**: no global state; one [`BuildContext`](context::BuildContext) per build
//! - **Scope guards**: groups close when their guard drops, even on early return
//! - **Deterministic naming**: `<kind>-[<name>-]<id>` with seedable loop codes
//! - **Recursion detection**: a sub-graph that calls itself reuses the open group's name
//!
//! ## Quick Start
//!
//! ```rust
//! use scopeflow::prelude::*;
//!
//! # fn main() -> Result<(), ScopeError> {
//! let mut ctx = BuildContext::new();
//! ctx.begin("training")?;
//!
//! let flag = PipelineParam::output("check", "ready");
//! {
//!     let mut cond = ctx.open(Condition::new(ConditionOperator::equals(flag, serde_json::json!("yes"))))?;
//!     let items = vec![serde_json::json!(1), serde_json::json!(2)];
//!     let for_each = ParallelFor::new(&mut cond, items)?;
//!     let mut body = cond.open(for_each)?;
//!     let item = body.handle().clone();
//!     body.add_task(Task::new(format!("train {}", item.name())))?;
//! }
//!
//! let tree = ctx.finish()?;
//! assert_eq!(tree.len(), 3);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod context;
pub mod core;
pub mod errors;
pub mod groups;
pub mod loops;
pub mod observability;
pub mod testing;
pub mod tree;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::BuildConfig;
    pub use crate::context::{BuildContext, GroupRegistry, Scope};
    pub use crate::core::{DependencyRef, GroupId, GroupKind, PipelineParam, Task, TaskId};
    pub use crate::errors::{Result, ScopeError};
    pub use crate::groups::{
        ComparisonOp, Condition, ConditionOperator, ExitHandler, Graph, GraphSpec, GroupNode,
        GroupPayload, GroupVariant, Operand, ParallelFor, Parallelism,
    };
    pub use crate::loops::{LoopArgumentVariable, LoopArguments, LoopItems, LoopSource};
    pub use crate::tree::GroupTree;
}

pub use errors::{Result, ScopeError};
