//! Tool registry and dispatch for the voice assistant
//!
//! The registry is populated once at startup via [`builtin_registry`] and is
//! read-only afterwards. Dispatch is strictly sequential: the orchestrator
//! awaits one call at a time, and every outcome comes back as a plain
//! string fit for speech.

mod apps;
mod args;
mod context;
mod dispatch;
mod export;
mod fs;
mod network;
mod paths;
mod probe;
mod registry;
mod schema;
mod system;
mod web;

pub use args::{ArgValue, ToolArgs, bind};
pub use context::ToolContext;
pub use dispatch::{Dispatcher, ToolCall};
pub use export::{render_prompt, schemas_json};
pub use registry::{RegistryBuilder, ToolEntry, ToolHandler, ToolRegistry};
pub use schema::{ParamSpec, ParamType, ToolSchema};
pub use web::{DuckDuckGoBackend, SearchBackend, SearchResult};

/// Build the registry with every built-in tool, in fixed registration
/// order: system, file, network, app, web. The order only matters for
/// prompt rendering determinism.
#[must_use]
pub fn builtin_registry() -> ToolRegistry {
    let mut builder = RegistryBuilder::new();
    system::register(&mut builder);
    fs::register(&mut builder);
    network::register(&mut builder);
    apps::register(&mut builder);
    web::register(&mut builder);
    builder.build()
}
