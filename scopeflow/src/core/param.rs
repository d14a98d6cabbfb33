//! References to task outputs and pipeline inputs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference to a value produced by another task or passed into the
/// pipeline. The value itself is resolved by the runtime, never here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineParam {
    /// The parameter name.
    pub name: String,
    /// The task producing this value, if it is a task output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op_name: Option<String>,
    /// A default value, for pipeline inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl PipelineParam {
    /// Creates a pipeline-level input parameter.
    #[must_use]
    pub fn input(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            op_name: None,
            value: None,
        }
    }

    /// Creates a reference to the output `name` of task `op_name`.
    #[must_use]
    pub fn output(op_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            op_name: Some(op_name.into()),
            value: None,
        }
    }

    /// Sets a default value.
    #[must_use]
    pub fn with_value(mut self, value: serde_json::Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Returns the name qualified by the producing task, if any.
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.op_name {
            Some(op) => format!("{op}-{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for PipelineParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{pipelineparam:op={};name={}}}}}", self.op_name.as_deref().unwrap_or(""), self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        assert_eq!(PipelineParam::input("lr").full_name(), "lr");
        assert_eq!(PipelineParam::output("split", "rows").full_name(), "split-rows");
    }

    #[test]
    fn test_display_placeholder() {
        let param = PipelineParam::output("split", "rows");
        assert_eq!(param.to_string(), "{{pipelineparam:op=split;name=rows}}");
    }
}
