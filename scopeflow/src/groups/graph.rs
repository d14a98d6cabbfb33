//! Reusable sub-graphs.

use super::{GroupNode, GroupPayload, GroupVariant};
use crate::core::PipelineParam;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declared interface of a sub-graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSpec {
    /// Parameters passed into the sub-graph, in declaration order.
    #[serde(default)]
    pub inputs: Vec<PipelineParam>,
    /// Output name to the value producing it.
    #[serde(default)]
    pub outputs: BTreeMap<String, PipelineParam>,
}

impl GraphSpec {
    /// Declares an output.
    pub fn add_output(&mut self, name: impl Into<String>, value: PipelineParam) {
        self.outputs.insert(name.into(), value);
    }
}

/// A group packaging tasks as a callable unit.
///
/// A graph that is opened again, by name, while an earlier graph with the same
/// name is still open is a recursive call: the new group points back at the
/// open one instead of receiving a fresh name.
#[derive(Debug, Clone)]
pub struct Graph {
    node: GroupNode,
}

impl Graph {
    /// Creates a graph group named after the component it packages.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            node: GroupNode::new(
                GroupPayload::Graph {
                    spec: GraphSpec::default(),
                },
                Some(name.into()),
            ),
        }
    }

    /// Declares an input.
    #[must_use]
    pub fn with_input(mut self, input: PipelineParam) -> Self {
        if let Some(spec) = self.node.graph_mut() {
            spec.inputs.push(input);
        }
        self
    }

    /// Declares several inputs.
    #[must_use]
    pub fn with_inputs(mut self, inputs: impl IntoIterator<Item = PipelineParam>) -> Self {
        if let Some(spec) = self.node.graph_mut() {
            spec.inputs.extend(inputs);
        }
        self
    }

    /// Declares an output.
    #[must_use]
    pub fn with_output(mut self, name: impl Into<String>, value: PipelineParam) -> Self {
        if let Some(spec) = self.node.graph_mut() {
            spec.add_output(name, value);
        }
        self
    }

    /// Returns the declared interface.
    #[must_use]
    pub fn spec(&self) -> Option<&GraphSpec> {
        self.node.graph()
    }
}

impl GroupVariant for Graph {
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
    fn test_graph_interface() {
        let graph = Graph::new("flip_until_tails")
            .with_inputs([PipelineParam::input("seed"), PipelineParam::input("limit")])
            .with_output("result", PipelineParam::output("flip", "output"));

        let spec = graph.spec().unwrap();
        let names: Vec<&str> = spec.inputs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["seed", "limit"]);
        assert_eq!(spec.outputs["result"].full_name(), "flip-output");
    }
}
