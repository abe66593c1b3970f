//! Tool dispatcher
//!
//! The single entry point the conversation loop calls. `execute` is total:
//! whatever goes wrong below this boundary, the caller gets back a sentence
//! it can speak. Tool implementations touch the filesystem, subprocesses,
//! and the network, and all of those fail in many ways; an autonomous model
//! can react to "Tool 'x' failed: permission denied", it cannot react to a
//! crashed conversation loop.

use std::sync::Arc;
use std::time::Instant;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::args::bind;
use super::context::ToolContext;
use super::registry::ToolRegistry;

/// A parsed tool invocation from the orchestrator layer
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    /// Tool name
    pub tool: String,
    /// Raw argument object
    #[serde(default)]
    pub args: Value,
}

/// Dispatches tool calls against a frozen registry
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    ctx: Arc<ToolContext>,
}

impl Dispatcher {
    /// Create a dispatcher over a registry and shared tool context
    #[must_use]
    pub fn new(registry: Arc<ToolRegistry>, ctx: Arc<ToolContext>) -> Self {
        Self { registry, ctx }
    }

    /// The registry this dispatcher serves
    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Execute one tool call. Never fails visibly: every outcome is a
    /// voice-renderable string.
    pub async fn execute(&self, name: &str, args: &Value) -> String {
        let started = Instant::now();
        let outcome = self.run(name, args).await;
        let elapsed_ms = started.elapsed().as_millis();

        match outcome {
            Ok(text) => {
                debug!(tool = name, elapsed_ms, "tool call succeeded");
                text
            }
            Err(err) => {
                warn!(tool = name, elapsed_ms, error = %err, "tool call failed");
                render_failure(name, &err)
            }
        }
    }

    /// Convenience wrapper for an already-parsed [`ToolCall`]
    pub async fn execute_call(&self, call: &ToolCall) -> String {
        self.execute(&call.tool, &call.args).await
    }

    /// Structured dispatch path; kept separate so tests and logging can see
    /// the failure category before it collapses to a string.
    async fn run(&self, name: &str, args: &Value) -> Result<String> {
        let entry = self
            .registry
            .lookup(name)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))?;
        let bound = bind(&entry.schema, args)?;
        (entry.handler)(bound, Arc::clone(&self.ctx)).await
    }
}

/// Collapse a structured failure into the uniform result contract
fn render_failure(name: &str, err: &Error) -> String {
    match err {
        Error::UnknownTool(tool) => format!("Unknown tool: {tool}"),
        Error::InvalidArguments(detail) => {
            format!("Tool '{name}' received invalid arguments: {detail}")
        }
        other => format!("Tool '{name}' failed: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn renders_unknown_tool() {
        let err = Error::UnknownTool("nope".to_string());
        assert_eq!(render_failure("nope", &err), "Unknown tool: nope");
    }

    #[test]
    fn renders_binding_failure() {
        let err = Error::InvalidArguments("missing required parameter 'pattern'".to_string());
        assert_eq!(
            render_failure("find_files", &err),
            "Tool 'find_files' received invalid arguments: missing required parameter 'pattern'"
        );
    }

    #[test]
    fn renders_implementation_failure() {
        let err = Error::Tool("permission denied".to_string());
        let text = render_failure("read_file", &err);
        assert!(text.starts_with("Tool 'read_file' failed:"));
        assert!(text.contains("permission denied"));
    }

    #[test]
    fn tool_call_parses_with_default_args() {
        let call: ToolCall = serde_json::from_value(json!({"tool": "get_system_stats"})).unwrap();
        assert_eq!(call.tool, "get_system_stats");
        assert!(call.args.is_null());
    }
}
