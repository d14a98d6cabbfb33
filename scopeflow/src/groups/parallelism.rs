//! Concurrency bounds.

use super::{GroupNode, GroupPayload, GroupVariant};
use crate::errors::{Result, ScopeError};

/// A group capping how many of its tasks run at once.
#[derive(Debug, Clone)]
pub struct Parallelism {
    node: GroupNode,
}

impl Parallelism {
    /// Creates a parallelism group.
    ///
    /// `None` means no limit and is stored as absent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParallelism` for zero, negative, or out-of-range bounds.
    pub fn new(parallelism: Option<i64>) -> Result<Self> {
        let parallelism = parallelism
            .map(|value| {
                u32::try_from(value)
                    .ok()
                    .filter(|bound| *bound > 0)
                    .ok_or(ScopeError::InvalidParallelism { value })
            })
            .transpose()?;

        Ok(Self {
            node: GroupNode::new(GroupPayload::ParallelLimit { parallelism }, None),
        })
    }

    /// Creates a group without a bound.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            node: GroupNode::new(GroupPayload::ParallelLimit { parallelism: None }, None),
        }
    }

    /// Returns the bound.
    #[must_use]
    pub fn limit(&self) -> Option<u32> {
        self.node.parallelism()
    }
}

impl GroupVariant for Parallelism {
    type Handle = ();

    fn node_mut(&mut self) -> &mut GroupNode {
        &mut self.node
    }

    fn into_parts(self) -> (GroupNode, Self::Handle) {
        (self.node, ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_bound_stored() {
        assert_eq!(Parallelism::new(Some(3)).unwrap().limit(), Some(3));
    }

    #[test]
    fn test_absent_bound() {
        assert_eq!(Parallelism::new(None).unwrap().limit(), None);
        assert_eq!(Parallelism::unlimited().limit(), None);
    }

    #[test]
    fn test_non_positive_rejected() {
        for value in [0, -1, -100] {
            let err = Parallelism::new(Some(value)).unwrap_err();
            assert_eq!(err, ScopeError::InvalidParallelism { value });
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        let value = i64::from(u32::MAX) + 1;
        assert!(Parallelism::new(Some(value)).is_err());
    }
}
