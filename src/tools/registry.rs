//! Tool registry
//!
//! Two-phase lifecycle: a [`RegistryBuilder`] collects registrations during
//! startup, then [`RegistryBuilder::build`] freezes them into a
//! [`ToolRegistry`] that only exposes read accessors. Registration order is
//! preserved so schema export and prompt rendering stay deterministic.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::Result;

use super::args::ToolArgs;
use super::context::ToolContext;
use super::schema::ToolSchema;

/// Executable capability behind a schema: validated args in, spoken-ready
/// string out
pub type ToolHandler =
    Box<dyn Fn(ToolArgs, Arc<ToolContext>) -> BoxFuture<'static, Result<String>> + Send + Sync>;

/// A schema paired with its implementation
pub struct ToolEntry {
    /// Descriptor shown to the model
    pub schema: ToolSchema,
    /// Implementation invoked by the dispatcher
    pub handler: ToolHandler,
}

/// Init-phase collector for tool registrations
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<ToolEntry>,
}

impl RegistryBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Panics on a duplicate name: two tools claiming the
    /// same name is a startup programming error, not something to paper
    /// over with last-write-wins.
    pub fn register(&mut self, schema: ToolSchema, handler: ToolHandler) {
        assert!(
            !self.entries.iter().any(|e| e.schema.name == schema.name),
            "duplicate tool registration: {}",
            schema.name
        );
        self.entries.push(ToolEntry { schema, handler });
    }

    /// Freeze into an immutable registry
    #[must_use]
    pub fn build(self) -> ToolRegistry {
        let index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.schema.name.clone(), i))
            .collect();
        ToolRegistry {
            entries: self.entries,
            index,
        }
    }
}

/// Frozen collection of tools; read-only after startup, so shared reads
/// need no locking
pub struct ToolRegistry {
    entries: Vec<ToolEntry>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Look up a tool by name
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&ToolEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// All schemas, in registration order
    pub fn all_schemas(&self) -> impl Iterator<Item = &ToolSchema> {
        self.entries.iter().map(|e| &e.schema)
    }

    /// Tool names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.schema.name.as_str())
    }

    /// Number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::schema::ParamSpec;

    fn noop_handler() -> ToolHandler {
        Box::new(|_args, _ctx| Box::pin(async { Ok("ok".to_string()) }))
    }

    fn schema(name: &str) -> ToolSchema {
        ToolSchema::new(name, "test tool", vec![ParamSpec::string("q", "query")], &[])
    }

    #[test]
    fn empty_registry() {
        let registry = RegistryBuilder::new().build();
        assert!(registry.is_empty());
        assert!(registry.lookup("anything").is_none());
    }

    #[test]
    fn register_and_lookup() {
        let mut builder = RegistryBuilder::new();
        builder.register(schema("web_search"), noop_handler());
        let registry = builder.build();

        assert_eq!(registry.len(), 1);
        let entry = registry.lookup("web_search").unwrap();
        assert_eq!(entry.schema.name, "web_search");
    }

    #[test]
    fn preserves_registration_order() {
        let mut builder = RegistryBuilder::new();
        for name in ["b_tool", "a_tool", "c_tool"] {
            builder.register(schema(name), noop_handler());
        }
        let registry = builder.build();

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["b_tool", "a_tool", "c_tool"]);
        // Idempotent: same order on every pass
        let again: Vec<&str> = registry.names().collect();
        assert_eq!(names, again);
    }

    #[test]
    #[should_panic(expected = "duplicate tool registration")]
    fn duplicate_registration_panics() {
        let mut builder = RegistryBuilder::new();
        builder.register(schema("dup"), noop_handler());
        builder.register(schema("dup"), noop_handler());
    }
}
