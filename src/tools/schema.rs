//! Tool schema types
//!
//! A [`ToolSchema`] is the immutable descriptor shown to the language model:
//! name, natural-language description, and a typed parameter list. Parameter
//! order is preserved so prompt rendering stays deterministic.

use serde_json::{Map, Value, json};

/// Primitive type tag for a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// UTF-8 string
    String,
    /// Exact integer (JSON numbers with a fractional part do not bind)
    Integer,
    /// true / false
    Boolean,
}

impl ParamType {
    /// JSON Schema type keyword for this tag
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

/// A single named parameter of a tool
#[derive(Debug, Clone)]
pub struct ParamSpec {
    /// Parameter name as it appears in tool calls
    pub name: String,
    /// Type tag
    pub ptype: ParamType,
    /// Description shown to the model
    pub description: String,
    /// Optional enum constraint; advisory for the model, not enforced by the
    /// binder (implementations treat out-of-range values leniently)
    pub allowed: Option<Vec<String>>,
}

impl ParamSpec {
    /// String parameter
    #[must_use]
    pub fn string(name: &str, description: &str) -> Self {
        Self::new(name, ParamType::String, description)
    }

    /// Integer parameter
    #[must_use]
    pub fn integer(name: &str, description: &str) -> Self {
        Self::new(name, ParamType::Integer, description)
    }

    /// Boolean parameter
    #[must_use]
    pub fn boolean(name: &str, description: &str) -> Self {
        Self::new(name, ParamType::Boolean, description)
    }

    fn new(name: &str, ptype: ParamType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            ptype,
            description: description.to_string(),
            allowed: None,
        }
    }

    /// Constrain this parameter to a fixed set of values
    #[must_use]
    pub fn one_of(mut self, values: &[&str]) -> Self {
        self.allowed = Some(values.iter().map(|v| (*v).to_string()).collect());
        self
    }
}

/// Immutable descriptor of a registered tool
#[derive(Debug, Clone)]
pub struct ToolSchema {
    /// Unique tool name
    pub name: String,
    /// Natural-language description shown to the model
    pub description: String,
    /// Ordered parameter list
    pub params: Vec<ParamSpec>,
    /// Names of parameters that must be present in every call
    pub required: Vec<String>,
}

impl ToolSchema {
    /// Build a schema. `required` names must reference declared params;
    /// violations are a programming error and panic at registration time.
    #[must_use]
    pub fn new(name: &str, description: &str, params: Vec<ParamSpec>, required: &[&str]) -> Self {
        let schema = Self {
            name: name.to_string(),
            description: description.to_string(),
            params,
            required: required.iter().map(|r| (*r).to_string()).collect(),
        };
        for req in &schema.required {
            assert!(
                schema.params.iter().any(|p| &p.name == req),
                "tool '{}': required parameter '{req}' is not declared",
                schema.name
            );
        }
        schema
    }

    /// Look up a declared parameter by name
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Whether a parameter is required
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// JSON Schema object for the parameter list:
    /// `{type: "object", properties: {..}, required: [..]}`
    #[must_use]
    pub fn parameters_json(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.params {
            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(param.ptype.as_str()));
            prop.insert("description".to_string(), json!(param.description));
            if let Some(allowed) = &param.allowed {
                prop.insert("enum".to_string(), json!(allowed));
            }
            properties.insert(param.name.clone(), Value::Object(prop));
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": self.required,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ToolSchema {
        ToolSchema::new(
            "find_files",
            "Search for files by name pattern.",
            vec![
                ParamSpec::string("pattern", "File name pattern"),
                ParamSpec::string("directory", "Directory to search in"),
                ParamSpec::string("file_type", "Filter by type").one_of(&["file", "directory"]),
            ],
            &["pattern"],
        )
    }

    #[test]
    fn required_is_subset_of_params() {
        let schema = sample();
        for req in &schema.required {
            assert!(schema.param(req).is_some());
        }
    }

    #[test]
    #[should_panic(expected = "is not declared")]
    fn undeclared_required_param_panics() {
        let _ = ToolSchema::new("bad", "desc", vec![], &["missing"]);
    }

    #[test]
    fn parameters_json_shape() {
        let json = sample().parameters_json();
        assert_eq!(json["type"], "object");
        assert_eq!(json["properties"]["pattern"]["type"], "string");
        assert_eq!(json["properties"]["file_type"]["enum"][0], "file");
        assert_eq!(json["required"][0], "pattern");
    }

    #[test]
    fn param_lookup() {
        let schema = sample();
        assert!(schema.is_required("pattern"));
        assert!(!schema.is_required("directory"));
        assert_eq!(schema.param("directory").unwrap().ptype, ParamType::String);
        assert!(schema.param("nope").is_none());
    }
}
