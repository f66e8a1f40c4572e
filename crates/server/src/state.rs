// crates/server/src/state.rs
//! Application state for the Axum server.

use std::sync::Arc;
use std::time::Instant;

use jira_nlq_core::Translator;
use jira_nlq_store::{KeyValueStore, MemoryStore, SearchHistory};

/// Shared application state accessible from all route handlers.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    /// Translator carrying the server-wide project allow-list.
    pub translator: Translator,
    /// Recent and favorite searches.
    pub history: SearchHistory,
}

impl AppState {
    /// Create a new application state wrapped in an Arc for sharing.
    pub fn new(translator: Translator, history: SearchHistory) -> Arc<Self> {
        Arc::new(Self {
            start_time: Instant::now(),
            translator,
            history,
        })
    }

    /// State over the given store with no project allow-list.
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Arc<Self> {
        Self::new(Translator::new(), SearchHistory::new(store))
    }

    /// Ephemeral state; nothing survives a restart.
    pub fn in_memory() -> Arc<Self> {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Get the server uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
