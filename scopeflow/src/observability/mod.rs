//! Logging setup and build tracing.

mod logging;
mod tree_trace;

pub use logging::{init_logging, init_test_logging, LogFormat};
pub use tree_trace::trace_tree;
