//! Conditional branches.

use super::{GroupNode, GroupPayload, GroupVariant};
use crate::core::PipelineParam;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    /// `==`
    #[serde(rename = "==")]
    Eq,
    /// `!=`
    #[serde(rename = "!=")]
    Ne,
    /// `<`
    #[serde(rename = "<")]
    Lt,
    /// `<=`
    #[serde(rename = "<=")]
    Le,
    /// `>`
    #[serde(rename = ">")]
    Gt,
    /// `>=`
    #[serde(rename = ">=")]
    Ge,
}

impl ComparisonOp {
    /// Returns the operator symbol.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

/// One side of a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum Operand {
    /// A value resolved at run time.
    Param(PipelineParam),
    /// A constant.
    Literal(serde_json::Value),
}

impl From<PipelineParam> for Operand {
    fn from(param: PipelineParam) -> Self {
        Self::Param(param)
    }
}

impl From<serde_json::Value> for Operand {
    fn from(value: serde_json::Value) -> Self {
        Self::Literal(value)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Param(param) => write!(f, "{param}"),
            Self::Literal(value) => write!(f, "{value}"),
        }
    }
}

/// A condition recorded on a condition group.
///
/// It is never evaluated here; the downstream compiler turns it into a run
/// time check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionOperator {
    /// The comparison.
    pub operator: ComparisonOp,
    /// Left operand.
    pub left: Operand,
    /// Right operand.
    pub right: Operand,
}

impl ConditionOperator {
    /// Creates a condition.
    #[must_use]
    pub fn new(operator: ComparisonOp, left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self {
            operator,
            left: left.into(),
            right: right.into(),
        }
    }

    /// `left == right`
    #[must_use]
    pub fn equals(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::new(ComparisonOp::Eq, left, right)
    }

    /// `left != right`
    #[must_use]
    pub fn not_equals(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::new(ComparisonOp::Ne, left, right)
    }

    /// `left > right`
    #[must_use]
    pub fn greater_than(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::new(ComparisonOp::Gt, left, right)
    }

    /// `left < right`
    #[must_use]
    pub fn less_than(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::new(ComparisonOp::Lt, left, right)
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator.as_str(), self.right)
    }
}

/// A group whose tasks only run when its condition holds.
#[derive(Debug, Clone)]
pub struct Condition {
    node: GroupNode,
}

impl Condition {
    /// Creates an unnamed condition group.
    #[must_use]
    pub fn new(condition: ConditionOperator) -> Self {
        Self {
            node: GroupNode::new(GroupPayload::Condition { condition }, None),
        }
    }

    /// Creates a condition group with a base name.
    #[must_use]
    pub fn named(condition: ConditionOperator, name: impl Into<String>) -> Self {
        Self {
            node: GroupNode::new(GroupPayload::Condition { condition }, Some(name.into())),
        }
    }

    /// Returns the recorded condition.
    #[must_use]
    pub fn condition(&self) -> Option<&ConditionOperator> {
        self.node.condition()
    }
}

impl GroupVariant for Condition {
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
    use serde_json::json;

    #[test]
    fn test_condition_display() {
        let cond = ConditionOperator::equals(PipelineParam::output("flip", "output"), json!("heads"));
        assert_eq!(
            cond.to_string(),
            "{{pipelineparam:op=flip;name=output}} == \"heads\""
        );
    }

    #[test]
    fn test_named_condition_keeps_given_name() {
        let cond = Condition::named(ConditionOperator::greater_than(PipelineParam::input("n"), json!(3)), "big_n");
        let (node, ()) = cond.into_parts();

        assert_eq!(node.given_name(), Some("big_n"));
        assert_eq!(node.condition().unwrap().operator, ComparisonOp::Gt);
    }
}
