//! Shared context handed to tool implementations
//!
//! One [`ToolContext`] is built at startup and shared (via `Arc`) by every
//! registered handler. It carries the resolved home directory, bounded
//! timeouts, and the web search backend. Tests swap in a temp home and a
//! stub backend.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::Result;

use super::web::{DuckDuckGoBackend, SearchBackend};

/// Shared, read-only state for tool implementations
pub struct ToolContext {
    /// Resolved user home directory; filesystem tools never look above this
    /// by default
    pub home: PathBuf,
    /// Timeout for TCP reachability probes
    pub network_timeout: Duration,
    /// Timeout for subprocess probes (nmcli, df, nvidia-smi, ...)
    pub subprocess_timeout: Duration,
    /// Web search backend
    pub search: Arc<dyn SearchBackend>,
    /// Region code for search fallback logic
    pub search_region: String,
    /// Maximum search results to render
    pub search_max_results: usize,
}

impl ToolContext {
    /// Build a context from configuration, with the production search
    /// backend.
    ///
    /// # Errors
    ///
    /// Fails when the home directory cannot be resolved or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        let backend = DuckDuckGoBackend::new(Duration::from_secs(config.search.timeout_secs))?;
        Ok(Self {
            home: config.resolve_home()?,
            network_timeout: Duration::from_secs(config.network_timeout_secs),
            subprocess_timeout: Duration::from_secs(config.subprocess_timeout_secs),
            search: Arc::new(backend),
            search_region: config.search.region.clone(),
            search_max_results: config.search.max_results,
        })
    }

    /// Replace the home directory (used by tests to point at a tempdir)
    #[must_use]
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    /// Replace the search backend (used by tests to avoid the network)
    #[must_use]
    pub fn with_search_backend(mut self, backend: Arc<dyn SearchBackend>) -> Self {
        self.search = backend;
        self
    }
}
