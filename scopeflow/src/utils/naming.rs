//! Name generation for groups and tasks.

use crate::core::GroupKind;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

#[allow(clippy::expect_used)]
fn invalid_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[^-0-9a-z]+").expect("valid regex"))
}

#[allow(clippy::expect_used)]
fn repeated_hyphens() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("-+").expect("valid regex"))
}

/// Normalizes a name to lowercase alphanumerics separated by single hyphens.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let replaced = invalid_chars().replace_all(&lowered, "-");
    let collapsed = repeated_hyphens().replace_all(&replaced, "-");
    collapsed.trim_matches('-').to_string()
}

/// Builds the unique name of a group: `<kind>-[<given>-]<id>`.
///
/// Underscores are turned into hyphens so names are valid in downstream
/// formats that reject them.
#[must_use]
pub fn group_name(kind: GroupKind, given: Option<&str>, id: u64) -> String {
    let name = match given {
        Some(given) => format!("{}-{given}-{id}", kind.as_str()),
        None => format!("{}-{id}", kind.as_str()),
    };
    name.replace('_', "-")
}

/// Returns `base`, or `base-2`, `base-3`, ... whichever is not yet taken.
#[must_use]
pub fn unique_name(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Train Model"), "train-model");
        assert_eq!(sanitize_name("__fetch__data__"), "fetch-data");
        assert_eq!(sanitize_name("a!!b"), "a-b");
        assert_eq!(sanitize_name("ok-name"), "ok-name");
    }

    #[test]
    fn test_group_name_with_given() {
        assert_eq!(group_name(GroupKind::Graph, Some("my_sub"), 3), "graph-my-sub-3");
        assert_eq!(group_name(GroupKind::ExitHandler, None, 1), "exit-handler-1");
    }

    #[test]
    fn test_unique_name() {
        let mut taken = HashSet::new();
        assert_eq!(unique_name("step", &taken), "step");

        taken.insert("step".to_string());
        taken.insert("step-2".to_string());
        assert_eq!(unique_name("step", &taken), "step-3");
    }
}
