//! Parallel-for loops.

use super::{GroupNode, GroupPayload, GroupVariant};
use crate::context::BuildContext;
use crate::errors::Result;
use crate::loops::{LoopArguments, LoopSource};

/// A group whose tasks run once per loop item.
///
/// The fan-out itself belongs to the compiler; this group only records the
/// loop once. Entering its scope hands back the [`LoopArguments`] so the
/// body can refer to `item` or `item.<field>`.
#[derive(Debug, Clone)]
pub struct ParallelFor {
    node: GroupNode,
    code: String,
    loop_args: LoopArguments,
}

impl ParallelFor {
    /// Creates a loop over `source`.
    ///
    /// A fresh code names both the group (`for-loop-<code>`) and, for static
    /// items, the loop argument. Dynamic parameters become symbolic
    /// placeholders; wrapped arguments are used unchanged.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveContext` for an idle context and `InvalidLoopItems`
    /// for a malformed static list.
    pub fn new(ctx: &mut BuildContext, source: impl Into<LoopSource>) -> Result<Self> {
        let code = ctx.next_loop_code()?;
        let loop_args = match source.into() {
            LoopSource::Static(items) => LoopArguments::from_items(items, &code)?,
            LoopSource::Dynamic(param) => LoopArguments::from_param(param),
            LoopSource::Wrapped(args) => args,
        };

        let node = GroupNode::new(
            GroupPayload::ForLoop {
                loop_args: loop_args.clone(),
            },
            Some(format!("for-loop-{code}")),
        );
        Ok(Self {
            node,
            code,
            loop_args,
        })
    }

    /// Returns the code identifying this loop.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the loop arguments.
    #[must_use]
    pub fn loop_args(&self) -> &LoopArguments {
        &self.loop_args
    }
}

impl GroupVariant for ParallelFor {
    type Handle = LoopArguments;

    fn node_mut(&mut self) -> &mut GroupNode {
        &mut self.node
    }

    fn into_parts(self) -> (GroupNode, Self::Handle) {
        (self.node, self.loop_args)
    }
}
