//! The active build context and the scopes opened from it.
//!
//! This module provides:
//! - [`BuildContext`], the explicit per-build state (stack, counter, arenas)
//! - [`Scope`], the guard that keeps a group open
//! - [`GroupRegistry`], the registry operations the tree is built on

mod build;
mod registry;
mod scope;

pub use build::BuildContext;
pub use registry::GroupRegistry;
pub use scope::Scope;
