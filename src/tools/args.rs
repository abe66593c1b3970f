//! Argument binding
//!
//! The model hands us a raw JSON object; the binder checks it against the
//! tool's schema before the implementation ever runs. A mismatch becomes a
//! binding failure the dispatcher turns into a spoken sentence, never a
//! panic mid-call.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Error, Result};

use super::schema::{ParamType, ToolSchema};

/// A validated argument value
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// String argument
    Str(String),
    /// Integer argument
    Int(i64),
    /// Boolean argument
    Bool(bool),
}

/// Validated, schema-checked arguments for one tool call
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    values: BTreeMap<String, ArgValue>,
}

impl ToolArgs {
    /// String argument, if present
    #[must_use]
    pub fn str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// String argument or a default
    #[must_use]
    pub fn str_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.str(name).unwrap_or(default)
    }

    /// Integer argument, if present
    #[must_use]
    pub fn int(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(ArgValue::Int(i)) => Some(*i),
            _ => None,
        }
    }

    /// Integer argument or a default
    #[must_use]
    pub fn int_or(&self, name: &str, default: i64) -> i64 {
        self.int(name).unwrap_or(default)
    }

    /// Boolean argument or a default
    #[must_use]
    pub fn bool_or(&self, name: &str, default: bool) -> bool {
        match self.values.get(name) {
            Some(ArgValue::Bool(b)) => *b,
            _ => default,
        }
    }

    /// Number of bound arguments
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no arguments were bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Bind raw JSON arguments against a schema.
///
/// Checks, in order: the payload is an object (null counts as empty), every
/// required parameter is present, every present key is declared, and every
/// value matches its declared type. Enum constraints are not enforced here;
/// implementations handle out-of-range values themselves.
///
/// # Errors
///
/// Returns [`Error::InvalidArguments`] describing the first violation found.
pub fn bind(schema: &ToolSchema, raw: &Value) -> Result<ToolArgs> {
    let object = match raw {
        Value::Null => None,
        Value::Object(map) => Some(map),
        other => {
            return Err(Error::InvalidArguments(format!(
                "expected an object of arguments, got {}",
                json_type_name(other)
            )));
        }
    };

    for required in &schema.required {
        let present = object.is_some_and(|map| {
            map.get(required).is_some_and(|v| !v.is_null())
        });
        if !present {
            return Err(Error::InvalidArguments(format!(
                "missing required parameter '{required}'"
            )));
        }
    }

    let mut args = ToolArgs::default();
    let Some(map) = object else {
        return Ok(args);
    };

    for (key, value) in map {
        if value.is_null() {
            continue;
        }
        let Some(spec) = schema.param(key) else {
            return Err(Error::InvalidArguments(format!(
                "unexpected parameter '{key}'"
            )));
        };
        let bound = match (spec.ptype, value) {
            (ParamType::String, Value::String(s)) => ArgValue::Str(s.clone()),
            (ParamType::Integer, Value::Number(n)) if n.is_i64() => {
                ArgValue::Int(n.as_i64().unwrap_or_default())
            }
            (ParamType::Boolean, Value::Bool(b)) => ArgValue::Bool(*b),
            (expected, got) => {
                return Err(Error::InvalidArguments(format!(
                    "parameter '{key}' expects {}, got {}",
                    expected.as_str(),
                    json_type_name(got)
                )));
            }
        };
        args.values.insert(key.clone(), bound);
    }

    Ok(args)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::tools::schema::ParamSpec;

    fn schema() -> ToolSchema {
        ToolSchema::new(
            "read_file",
            "Read a text file.",
            vec![
                ParamSpec::string("path", "Path to the file"),
                ParamSpec::integer("max_lines", "Maximum lines to read"),
                ParamSpec::boolean("show_hidden", "Include hidden entries"),
            ],
            &["path"],
        )
    }

    #[test]
    fn binds_valid_arguments() {
        let args = bind(&schema(), &json!({"path": "~/notes.txt", "max_lines": 10})).unwrap();
        assert_eq!(args.str("path"), Some("~/notes.txt"));
        assert_eq!(args.int_or("max_lines", 50), 10);
        assert!(!args.bool_or("show_hidden", false));
    }

    #[test]
    fn missing_required_fails() {
        let err = bind(&schema(), &json!({})).unwrap_err();
        assert!(err.to_string().contains("missing required parameter 'path'"));
    }

    #[test]
    fn null_required_counts_as_missing() {
        let err = bind(&schema(), &json!({"path": null})).unwrap_err();
        assert!(err.to_string().contains("missing required"));
    }

    #[test]
    fn wrong_type_fails() {
        let err = bind(&schema(), &json!({"path": 42})).unwrap_err();
        assert!(err.to_string().contains("expects string"));
    }

    #[test]
    fn float_does_not_bind_as_integer() {
        let err = bind(&schema(), &json!({"path": "x", "max_lines": 2.5})).unwrap_err();
        assert!(err.to_string().contains("expects integer"));
    }

    #[test]
    fn unexpected_key_fails() {
        let err = bind(&schema(), &json!({"path": "x", "mode": "fast"})).unwrap_err();
        assert!(err.to_string().contains("unexpected parameter 'mode'"));
    }

    #[test]
    fn null_optional_is_dropped() {
        let args = bind(&schema(), &json!({"path": "x", "max_lines": null})).unwrap();
        assert_eq!(args.int("max_lines"), None);
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn non_object_payload_fails() {
        let err = bind(&schema(), &json!(["path"])).unwrap_err();
        assert!(err.to_string().contains("expected an object"));
    }

    #[test]
    fn null_payload_is_empty_when_nothing_required() {
        let schema = ToolSchema::new("get_system_stats", "Stats.", vec![], &[]);
        let args = bind(&schema, &Value::Null).unwrap();
        assert!(args.is_empty());
    }
}
