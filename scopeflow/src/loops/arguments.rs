//! Loop arguments: the per-iteration value exposed inside a parallel-for.

use crate::core::PipelineParam;
use crate::errors::{Result, ScopeError};
use serde::{Deserialize, Serialize};

const LOOP_ITEM_PARAM_NAME_BASE: &str = "loop-item-param";
const LOOP_ITEM_NAME_SUFFIX: &str = "loop-item";
const SUBVAR_NAME_INFIX: &str = "subvar";

/// Where a parallel-for gets its items from.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopSource {
    /// A fixed list known while the pipeline is being defined.
    Static(Vec<serde_json::Value>),
    /// A list produced at run time by an upstream task.
    Dynamic(PipelineParam),
    /// Arguments that were already wrapped, used unchanged.
    Wrapped(LoopArguments),
}

impl From<Vec<serde_json::Value>> for LoopSource {
    fn from(items: Vec<serde_json::Value>) -> Self {
        Self::Static(items)
    }
}

impl From<PipelineParam> for LoopSource {
    fn from(param: PipelineParam) -> Self {
        Self::Dynamic(param)
    }
}

impl From<LoopArguments> for LoopSource {
    fn from(args: LoopArguments) -> Self {
        Self::Wrapped(args)
    }
}

/// The items a loop iterates over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum LoopItems {
    /// Concrete items.
    Static(Vec<serde_json::Value>),
    /// A not-yet-materialized list from an upstream task.
    Dynamic(PipelineParam),
}

/// The loop-argument handle returned when a parallel-for scope is entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopArguments {
    name: String,
    op_name: Option<String>,
    items: LoopItems,
    fields: Vec<String>,
}

impl LoopArguments {
    /// Width of the code that names a loop and its arguments.
    pub const NUM_CODE_CHARS: usize = 8;

    /// Wraps a static item list.
    ///
    /// The list must be non-empty. Object items must all share one key set,
    /// which becomes the handle's fields; scalar items expose no fields.
    pub fn from_items(items: Vec<serde_json::Value>, code: &str) -> Result<Self> {
        let fields = item_fields(&items)?;
        Ok(Self {
            name: format!("{LOOP_ITEM_PARAM_NAME_BASE}-{code}"),
            op_name: None,
            items: LoopItems::Static(items),
            fields,
        })
    }

    /// Wraps a reference to an upstream output as a symbolic placeholder.
    #[must_use]
    pub fn from_param(param: PipelineParam) -> Self {
        Self {
            name: format!("{}-{LOOP_ITEM_NAME_SUFFIX}", param.name),
            op_name: param.op_name.clone(),
            items: LoopItems::Dynamic(param),
            fields: Vec::new(),
        }
    }

    /// Returns the argument name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the producing task for dynamic items.
    #[must_use]
    pub fn op_name(&self) -> Option<&str> {
        self.op_name.as_deref()
    }

    /// Returns the wrapped items.
    #[must_use]
    pub fn items(&self) -> &LoopItems {
        &self.items
    }

    /// Returns the per-item fields known statically.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns true when the items are not materialized yet.
    #[must_use]
    pub fn is_symbolic(&self) -> bool {
        matches!(self.items, LoopItems::Dynamic(_))
    }

    /// Returns the number of static items, or `None` for symbolic arguments.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match &self.items {
            LoopItems::Static(items) => Some(items.len()),
            LoopItems::Dynamic(_) => None,
        }
    }

    /// Returns true for a static list with no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Returns the variable for `item.<field>`.
    ///
    /// Symbolic arguments accept any field since their shape is only known
    /// at run time.
    pub fn field(&self, field: &str) -> Result<LoopArgumentVariable> {
        if !self.is_symbolic() && !self.fields.iter().any(|f| f == field) {
            return Err(ScopeError::UnknownLoopField {
                loop_name: self.name.clone(),
                field: field.to_string(),
            });
        }
        Ok(LoopArgumentVariable::new(&self.name, field))
    }
}

/// A single field of a loop item, e.g. `item.a`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopArgumentVariable {
    /// The variable name.
    pub name: String,
    /// The loop argument it belongs to.
    pub loop_args_name: String,
    /// The field within each item.
    pub field: String,
}

impl LoopArgumentVariable {
    fn new(loop_args_name: &str, field: &str) -> Self {
        Self {
            name: format!("{loop_args_name}-{SUBVAR_NAME_INFIX}-{field}"),
            loop_args_name: loop_args_name.to_string(),
            field: field.to_string(),
        }
    }
}

fn item_fields(items: &[serde_json::Value]) -> Result<Vec<String>> {
    let Some(first) = items.first() else {
        return Err(ScopeError::InvalidLoopItems {
            reason: "item list is empty".to_string(),
        });
    };

    let Some(first_obj) = first.as_object() else {
        if items.iter().any(serde_json::Value::is_object) {
            return Err(ScopeError::InvalidLoopItems {
                reason: "items mix objects and scalars".to_string(),
            });
        }
        return Ok(Vec::new());
    };

    let fields: Vec<String> = first_obj.keys().cloned().collect();
    for (index, item) in items.iter().enumerate().skip(1) {
        let Some(obj) = item.as_object() else {
            return Err(ScopeError::InvalidLoopItems {
                reason: "items mix objects and scalars".to_string(),
            });
        };
        let same_keys =
            obj.len() == fields.len() && fields.iter().all(|key| obj.contains_key(key));
        if !same_keys {
            return Err(ScopeError::InvalidLoopItems {
                reason: format!("item {index} does not have the same keys as item 0"),
            });
        }
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_static_objects_expose_fields() {
        let args =
            LoopArguments::from_items(vec![json!({"a": 1, "b": 10}), json!({"a": 2, "b": 20})], "abcd1234")
                .unwrap();

        assert_eq!(args.name(), "loop-item-param-abcd1234");
        assert_eq!(args.fields(), &["a".to_string(), "b".to_string()]);
        assert_eq!(args.len(), Some(2));
        assert!(!args.is_symbolic());

        let a = args.field("a").unwrap();
        assert_eq!(a.name, "loop-item-param-abcd1234-subvar-a");
    }

    #[test]
    fn test_static_unknown_field() {
        let args = LoopArguments::from_items(vec![json!({"a": 1})], "c0de").unwrap();
        let err = args.field("z").unwrap_err();
        assert_eq!(err.code(), "SCOPE-009-LOOP_FIELD");
    }

    #[test]
    fn test_scalars_have_no_fields() {
        let args = LoopArguments::from_items(vec![json!(1), json!(2), json!(3)], "c0de").unwrap();
        assert!(args.fields().is_empty());
        assert!(args.field("a").is_err());
    }

    #[test]
    fn test_mismatched_keys_rejected() {
        let result = LoopArguments::from_items(vec![json!({"a": 1}), json!({"b": 2})], "c0de");
        assert!(matches!(result, Err(ScopeError::InvalidLoopItems { .. })));
    }

    #[test]
    fn test_mixed_items_rejected() {
        let result = LoopArguments::from_items(vec![json!(1), json!({"a": 1})], "c0de");
        assert!(matches!(result, Err(ScopeError::InvalidLoopItems { .. })));

        let result = LoopArguments::from_items(vec![json!({"a": 1}), json!(1)], "c0de");
        assert!(matches!(result, Err(ScopeError::InvalidLoopItems { .. })));
    }

    #[test]
    fn test_empty_items_rejected() {
        assert!(LoopArguments::from_items(Vec::new(), "c0de").is_err());
    }

    #[test]
    fn test_dynamic_is_symbolic() {
        let args = LoopArguments::from_param(PipelineParam::output("list-files", "files"));

        assert!(args.is_symbolic());
        assert_eq!(args.name(), "files-loop-item");
        assert_eq!(args.op_name(), Some("list-files"));
        assert_eq!(args.len(), None);

        let field = args.field("path").unwrap();
        assert_eq!(field.name, "files-loop-item-subvar-path");
    }
}
