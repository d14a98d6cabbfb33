//! Naming helpers and loop code generation.

mod loop_codes;
mod naming;

pub use loop_codes::LoopCodeGenerator;
pub use naming::{group_name, sanitize_name, unique_name};
