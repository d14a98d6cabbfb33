//! Core types shared by the build context and the group variants.

mod ids;
mod kind;
mod param;
mod task;

pub use ids::{DependencyRef, GroupId, TaskId};
pub use kind::GroupKind;
pub use param::PipelineParam;
pub use task::Task;
