//! The task collaborator that groups hold references to.

use serde::{Deserialize, Serialize};

/// A task registered with a build.
///
/// Only the parts the scope tree cares about are modeled here: the name, the
/// upstream tasks this task depends on, and the exit-handler flag that the
/// downstream compiler must honor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// The task name, unique within one build once added.
    pub name: String,
    /// Names of upstream tasks this task depends on.
    #[serde(default)]
    pub dependent_names: Vec<String>,
    /// Whether this task is an exit handler's guaranteed-to-run task.
    #[serde(default)]
    pub is_exit_handler: bool,
}

impl Task {
    /// Creates a new task with no dependencies.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependent_names: Vec::new(),
            is_exit_handler: false,
        }
    }

    /// Adds an upstream dependency by name.
    #[must_use]
    pub fn with_dependency(mut self, name: impl Into<String>) -> Self {
        self.add_dependency(name);
        self
    }

    /// Adds an upstream dependency by name, ignoring duplicates.
    pub fn add_dependency(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.dependent_names.contains(&name) {
            self.dependent_names.push(name);
        }
    }

    /// Returns true if this task depends on any other task.
    #[must_use]
    pub fn has_dependencies(&self) -> bool {
        !self.dependent_names.is_empty()
    }
}
