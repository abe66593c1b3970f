//! Murmur - Tool registry and dispatch core for a local voice assistant
//!
//! This library is the capability layer of a voice assistant: a fixed set of
//! host-system operations (file search, app launch, system stats, web
//! search) that a language model can invoke through a structured
//! call-and-result protocol. Every result is a plain sentence fit for
//! text-to-speech; nothing escapes the dispatcher as a fault.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │           Conversation Orchestrator                  │
//! │   mic → STT → LLM → {tool, args} │ plain reply      │
//! └────────────────────┬────────────────────────────────┘
//!                      │ execute(name, args) -> String
//! ┌────────────────────▼────────────────────────────────┐
//! │                  Dispatcher                          │
//! │   lookup │ bind args │ invoke │ time │ normalize    │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │            Tool Registry (frozen after init)         │
//! │   files  │  apps  │  system  │  network  │  web     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The orchestrator itself (audio capture, model loading, conversation
//! history) lives outside this crate; the boundary is a parsed
//! [`ToolCall`](tools::ToolCall) in and a spoken-ready `String` out.

pub mod config;
pub mod error;
pub mod tools;

pub use config::Config;
pub use error::{Error, Result};
pub use tools::{
    Dispatcher, ParamSpec, ParamType, RegistryBuilder, SearchBackend, SearchResult, ToolArgs,
    ToolCall, ToolContext, ToolRegistry, ToolSchema, builtin_registry,
};
