//! Build configuration.

use crate::loops::LoopArguments;
use serde::{Deserialize, Serialize};

/// Configuration for a [`BuildContext`](crate::context::BuildContext).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Width of the random code used to name loops and their arguments.
    #[serde(default = "default_loop_code_chars")]
    pub loop_code_chars: usize,
    /// Seed for loop codes. When set, repeated builds produce identical names.
    #[serde(default)]
    pub loop_code_seed: Option<u64>,
    /// Maximum number of simultaneously open groups, root included.
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Whether task names are normalized to lowercase hyphenated form.
    #[serde(default = "default_sanitize_task_names")]
    pub sanitize_task_names: bool,
}

fn default_loop_code_chars() -> usize {
    LoopArguments::NUM_CODE_CHARS
}

fn default_sanitize_task_names() -> bool {
    true
}

/// Longest code a simple-format UUID can supply.
const MAX_LOOP_CODE_CHARS: usize = 32;

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            loop_code_chars: default_loop_code_chars(),
            loop_code_seed: None,
            max_depth: None,
            sanitize_task_names: default_sanitize_task_names(),
        }
    }
}

impl BuildConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the loop code width, clamped to `1..=32`.
    #[must_use]
    pub fn with_loop_code_chars(mut self, chars: usize) -> Self {
        self.loop_code_chars = chars;
        self
    }

    /// Seeds the loop code generator.
    #[must_use]
    pub fn with_loop_code_seed(mut self, seed: u64) -> Self {
        self.loop_code_seed = Some(seed);
        self
    }

    /// Limits group nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Enables or disables task name sanitization.
    #[must_use]
    pub fn with_sanitize_task_names(mut self, enabled: bool) -> Self {
        self.sanitize_task_names = enabled;
        self
    }

    /// Returns the loop code width actually used.
    #[must_use]
    pub fn effective_loop_code_chars(&self) -> usize {
        self.loop_code_chars.clamp(1, MAX_LOOP_CODE_CHARS)
    }
}
