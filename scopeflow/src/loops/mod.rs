//! Loop-argument value types used by parallel-for groups.

mod arguments;

pub use arguments::{LoopArgumentVariable, LoopArguments, LoopItems, LoopSource};
