//! Schema export for prompt building
//!
//! Pure functions of registry state. The JSON form is the OpenAI-style
//! function-calling shape the orchestrator feeds to the model; the text form
//! is a flattened capability list for plain-prompt models. Both follow
//! registration order, so identical registries render identically.

use std::fmt::Write as _;

use serde_json::{Value, json};

use super::registry::ToolRegistry;

/// Ordered JSON capability list:
/// `[{type: "function", function: {name, description, parameters}}, ..]`
#[must_use]
pub fn schemas_json(registry: &ToolRegistry) -> Value {
    let tools: Vec<Value> = registry
        .all_schemas()
        .map(|schema| {
            json!({
                "type": "function",
                "function": {
                    "name": schema.name,
                    "description": schema.description,
                    "parameters": schema.parameters_json(),
                },
            })
        })
        .collect();
    Value::Array(tools)
}

/// Flattened text rendering of every tool: name, description, and one line
/// per parameter with its type tag and description.
#[must_use]
pub fn render_prompt(registry: &ToolRegistry) -> String {
    let mut out = String::new();
    for schema in registry.all_schemas() {
        let _ = writeln!(out, "{}: {}", schema.name, schema.description);
        for param in &schema.params {
            let required = if schema.is_required(&param.name) {
                ", required"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "  - {} ({}{required}): {}",
                param.name,
                param.ptype.as_str(),
                param.description
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::registry::{RegistryBuilder, ToolHandler};
    use crate::tools::schema::{ParamSpec, ToolSchema};

    fn noop() -> ToolHandler {
        Box::new(|_args, _ctx| Box::pin(async { Ok(String::new()) }))
    }

    fn registry() -> ToolRegistry {
        let mut builder = RegistryBuilder::new();
        builder.register(
            ToolSchema::new(
                "web_search",
                "Search the internet.",
                vec![
                    ParamSpec::string("query", "Search query"),
                    ParamSpec::string("timelimit", "Time limit").one_of(&["d", "w", "m", "y"]),
                ],
                &["query"],
            ),
            noop(),
        );
        builder.register(
            ToolSchema::new("check_internet", "Check connectivity.", vec![], &[]),
            noop(),
        );
        builder.build()
    }

    #[test]
    fn json_export_preserves_order_and_shape() {
        let json = schemas_json(&registry());
        let tools = json.as_array().unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["type"], "function");
        assert_eq!(tools[0]["function"]["name"], "web_search");
        assert_eq!(tools[1]["function"]["name"], "check_internet");
        assert_eq!(
            tools[0]["function"]["parameters"]["properties"]["timelimit"]["enum"][1],
            "w"
        );
    }

    #[test]
    fn json_export_round_trips() {
        let registry = registry();
        let exported = schemas_json(&registry);
        // A hypothetical consumer re-reading the export sees exactly what
        // was registered: names, descriptions, required sets, type tags.
        for (tool, schema) in exported.as_array().unwrap().iter().zip(registry.all_schemas()) {
            let function = &tool["function"];
            assert_eq!(function["name"], schema.name.as_str());
            assert_eq!(function["description"], schema.description.as_str());
            let required: Vec<&str> = function["parameters"]["required"]
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v.as_str().unwrap())
                .collect();
            assert_eq!(required, schema.required.iter().map(String::as_str).collect::<Vec<_>>());
            for param in &schema.params {
                assert_eq!(
                    function["parameters"]["properties"][&param.name]["type"],
                    param.ptype.as_str()
                );
            }
        }
    }

    #[test]
    fn prompt_rendering_is_deterministic() {
        let first = render_prompt(&registry());
        let second = render_prompt(&registry());
        assert_eq!(first, second);
        assert!(first.contains("web_search: Search the internet."));
        assert!(first.contains("- query (string, required): Search query"));
    }
}
