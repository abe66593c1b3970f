//! Error types for the Murmur tool core

use thiserror::Error;

/// Result type alias for Murmur operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the tool core
///
/// The dispatcher is the only place these are collapsed into user-facing
/// text; everything below that boundary stays structured so tests and logs
/// can distinguish an unknown tool from a binding failure from a tool that
/// ran and failed.
#[derive(Debug, Error)]
pub enum Error {
    /// Requested tool name is not registered
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// Argument binding failure (missing required field, wrong type, unexpected key)
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Tool implementation ran and failed
    #[error("tool error: {0}")]
    Tool(String),

    /// Web search backend error
    #[error("search error: {0}")]
    Search(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
