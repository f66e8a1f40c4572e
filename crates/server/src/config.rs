// crates/server/src/config.rs
//! Server configuration read from the environment.
//!
//! | variable                 | default                                   |
//! |--------------------------|-------------------------------------------|
//! | `JIRA_NLQ_HOST`          | `127.0.0.1`                               |
//! | `JIRA_NLQ_PORT` / `PORT` | `47900`                                   |
//! | `JIRA_NLQ_STORE_PATH`    | `<data_dir>/jira-nlq/search-store.json`   |
//! | `JIRA_NLQ_PROJECT_KEYS`  | none (every project key is accepted)      |

use std::path::PathBuf;
use std::sync::Arc;

use jira_nlq_core::Translator;
use jira_nlq_store::{paths, FileStore, KeyValueStore, MemoryStore, SearchHistory};

use crate::state::AppState;

/// Default port for the server.
pub const DEFAULT_PORT: u16 = 47900;
/// Default bind address.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// `JIRA_NLQ_STORE_PATH` value selecting the in-memory store.
pub const MEMORY_STORE: &str = "memory";

/// Where search history is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreLocation,
    pub project_keys: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Unparseable or blank values
    /// fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = non_blank("JIRA_NLQ_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = non_blank("JIRA_NLQ_PORT")
            .or_else(|| non_blank("PORT"))
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let store = match non_blank("JIRA_NLQ_STORE_PATH") {
            Some(v) if v.trim().eq_ignore_ascii_case(MEMORY_STORE) => StoreLocation::Memory,
            Some(v) => StoreLocation::File(PathBuf::from(v.trim())),
            None => paths::store_path()
                .map(StoreLocation::File)
                .unwrap_or(StoreLocation::Memory),
        };

        let project_keys = non_blank("JIRA_NLQ_PROJECT_KEYS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            host,
            port,
            store,
            project_keys,
        }
    }

    /// `host:port` for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Open the configured store and wrap everything into shared state.
    pub fn build_state(&self) -> Arc<AppState> {
        let store: Arc<dyn KeyValueStore> = match &self.store {
            StoreLocation::Memory => Arc::new(MemoryStore::new()),
            StoreLocation::File(path) => Arc::new(FileStore::new(path)),
        };
        AppState::new(
            Translator::with_project_keys(self.project_keys.iter()),
            SearchHistory::new(store),
        )
    }
}
