// crates/store/src/history.rs
//! Recent and favorite searches, each persisted as one JSON array value.
//!
//! Reads never fail: a missing key, an unreadable store or a corrupt value
//! all read as an empty list. Writes are fire-and-forget; a failed write is
//! logged and the caller still gets the entry it asked to save.
//!
//! Every read-modify-write holds one lock, so concurrent saves through the
//! same `SearchHistory` never drop each other's entries.

use std::sync::{Arc, Mutex, MutexGuard};

use jira_nlq_types::{FavoriteSearch, RecentSearch};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::kv::KeyValueStore;

/// Store key holding the recent-search list.
pub const RECENT_SEARCHES_KEY: &str = "jira-recent-searches";
/// Store key holding the favorite-search list.
pub const FAVORITE_SEARCHES_KEY: &str = "jira-favorite-searches";
/// Recent searches kept; older entries are dropped.
pub const MAX_RECENT_SEARCHES: usize = 10;

/// Recent/favorite search lists over an injected store and clock.
pub struct SearchHistory {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    recent_key: String,
    favorite_key: String,
    update_lock: Mutex<()>,
}

impl SearchHistory {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            recent_key: RECENT_SEARCHES_KEY.to_string(),
            favorite_key: FAVORITE_SEARCHES_KEY.to_string(),
            update_lock: Mutex::new(()),
        }
    }

    /// Override the store keys, e.g. to keep several profiles in one store.
    pub fn with_keys(mut self, recent_key: impl Into<String>, favorite_key: impl Into<String>) -> Self {
        self.recent_key = recent_key.into();
        self.favorite_key = favorite_key.into();
        self
    }

    /// Poisoning is ignored: a panicked update never leaves a half-written list.
    fn lock_updates(&self) -> MutexGuard<'_, ()> {
        self.update_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Backend name of the underlying store, e.g. `"file"`.
    pub fn store_backend(&self) -> &'static str {
        self.store.backend()
    }

    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = key, error = %e, "Failed to read search list");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(e) => {
                warn!(key = key, error = %e, "Stored search list is not valid JSON, ignoring");
                Vec::new()
            }
        }
    }

    fn write_list<T: Serialize>(&self, key: &str, list: &[T]) {
        let encoded = match serde_json::to_string(list) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(key = key, error = %e, "Failed to encode search list");
                return;
            }
        };
        if let Err(e) = self.store.set(key, &encoded) {
            warn!(key = key, error = %e, "Failed to persist search list");
        }
    }

    fn remove_key(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            warn!(key = key, error = %e, "Failed to clear search list");
        }
    }

    /// Record a search at the front of the recent list.
    ///
    /// An existing entry with the exact same `natural_query` is replaced, and
    /// the list is capped at [`MAX_RECENT_SEARCHES`].
    pub fn save_recent_search(&self, natural_query: &str, query: &str) -> RecentSearch {
        let now = self.clock.now_millis();
        let entry = RecentSearch {
            id: now.to_string(),
            natural_query: natural_query.to_string(),
            query: query.to_string(),
            timestamp: now,
        };

        let _guard = self.lock_updates();
        let mut list: Vec<RecentSearch> = self.read_list(&self.recent_key);
        list.retain(|r| r.natural_query != natural_query);
        list.insert(0, entry.clone());
        list.truncate(MAX_RECENT_SEARCHES);
        self.write_list(&self.recent_key, &list);

        debug!(id = %entry.id, total = list.len(), "Saved recent search");
        entry
    }

    /// Most recent first.
    pub fn get_recent_searches(&self) -> Vec<RecentSearch> {
        self.read_list(&self.recent_key)
    }

    pub fn clear_recent_searches(&self) {
        let _guard = self.lock_updates();
        self.remove_key(&self.recent_key);
    }

    pub fn remove_recent_search(&self, id: &str) {
        let _guard = self.lock_updates();
        let mut list: Vec<RecentSearch> = self.read_list(&self.recent_key);
        list.retain(|r| r.id != id);
        self.write_list(&self.recent_key, &list);
    }

    /// Append a named favorite. No de-duplication, no cap.
    pub fn save_favorite_search(&self, name: &str, natural_query: &str, query: &str) -> FavoriteSearch {
        let now = self.clock.now_millis();
        let entry = FavoriteSearch {
            id: now.to_string(),
            name: name.to_string(),
            natural_query: natural_query.to_string(),
            query: query.to_string(),
            created_at: now,
        };

        let _guard = self.lock_updates();
        let mut list: Vec<FavoriteSearch> = self.read_list(&self.favorite_key);
        list.push(entry.clone());
        self.write_list(&self.favorite_key, &list);

        debug!(id = %entry.id, total = list.len(), "Saved favorite search");
        entry
    }

    /// In insertion order.
    pub fn get_favorite_searches(&self) -> Vec<FavoriteSearch> {
        self.read_list(&self.favorite_key)
    }

    pub fn remove_favorite_search(&self, id: &str) {
        let _guard = self.lock_updates();
        let mut list: Vec<FavoriteSearch> = self.read_list(&self.favorite_key);
        list.retain(|f| f.id != id);
        self.write_list(&self.favorite_key, &list);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::StepClock;
    use crate::error::{StoreError, StoreResult};
    use crate::kv::MemoryStore;
    use pretty_assertions::assert_eq;

    fn history() -> (SearchHistory, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let history = SearchHistory::with_clock(store.clone(), Arc::new(StepClock::starting_at(1_000)));
        (history, store)
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Poisoned)
        }
        fn remove(&self, _key: &str) -> StoreResult<()> {
            Err(StoreError::Poisoned)
        }
    }

    #[test]
    fn test_recent_capped_at_ten_newest_first() {
        let (history, _) = history();
        for i in 0..11 {
            history.save_recent_search(&format!("query {i}"), &format!("text ~ \"{i}\""));
        }
        let recent = history.get_recent_searches();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].natural_query, "query 10");
        assert_eq!(recent[9].natural_query, "query 1");
    }

    #[test]
    fn test_recent_dedup_replaces_and_moves_to_front() {
        let (history, _) = history();
        history.save_recent_search("x", "q1");
        history.save_recent_search("y", "q");
        history.save_recent_search("x", "q2");

        let recent = history.get_recent_searches();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].natural_query, "x");
        assert_eq!(recent[0].query, "q2");
        assert_eq!(recent[1].natural_query, "y");
    }

    #[test]
    fn test_recent_dedup_is_case_sensitive() {
        let (history, _) = history();
        history.save_recent_search("Bug", "q1");
        history.save_recent_search("bug", "q2");
        assert_eq!(history.get_recent_searches().len(), 2);
    }

    #[test]
    fn test_recent_entry_fields() {
        let (history, _) = history();
        let saved = history.save_recent_search("내 이슈", "assignee = currentUser() ORDER BY updated DESC");
        assert_eq!(saved.id, "1000");
        assert_eq!(saved.timestamp, 1000);
        assert_eq!(history.get_recent_searches(), vec![saved]);
    }

    #[test]
    fn test_remove_and_clear_recent() {
        let (history, store) = history();
        let a = history.save_recent_search("a", "qa");
        history.save_recent_search("b", "qb");

        history.remove_recent_search(&a.id);
        let recent = history.get_recent_searches();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].natural_query, "b");

        history.clear_recent_searches();
        assert!(history.get_recent_searches().is_empty());
        assert_eq!(store.get(RECENT_SEARCHES_KEY).unwrap(), None);
    }

    #[test]
    fn test_corrupt_value_reads_empty() {
        let (history, store) = history();
        store.set(RECENT_SEARCHES_KEY, "{oops").unwrap();
        store.set(FAVORITE_SEARCHES_KEY, "42").unwrap();
        assert!(history.get_recent_searches().is_empty());
        assert!(history.get_favorite_searches().is_empty());

        // A save over a corrupt value starts a fresh list.
        history.save_recent_search("a", "qa");
        assert_eq!(history.get_recent_searches().len(), 1);
    }

    #[test]
    fn test_favorites_append_without_dedup() {
        let (history, _) = history();
        history.save_favorite_search("mine", "내 이슈", "q");
        history.save_favorite_search("mine", "내 이슈", "q");
        let favorites = history.get_favorite_searches();
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0].created_at, 1000);
        assert_eq!(favorites[1].created_at, 1001);
    }

    #[test]
    fn test_favorites_not_capped() {
        let (history, _) = history();
        for i in 0..15 {
            history.save_favorite_search(&format!("f{i}"), "nq", "q");
        }
        assert_eq!(history.get_favorite_searches().len(), 15);
    }

    #[test]
    fn test_remove_unknown_favorite_is_noop() {
        let (history, _) = history();
        history.save_favorite_search("a", "nq", "q");
        history.remove_favorite_search("does-not-exist");
        assert_eq!(history.get_favorite_searches().len(), 1);
    }

    #[test]
    fn test_lists_are_independent() {
        let (history, _) = history();
        history.save_recent_search("r", "q");
        history.save_favorite_search("f", "nq", "q");
        history.clear_recent_searches();
        assert_eq!(history.get_favorite_searches().len(), 1);
    }

    #[test]
    fn test_failed_write_still_returns_entry() {
        let history = SearchHistory::with_clock(
            Arc::new(ReadOnlyStore),
            Arc::new(StepClock::starting_at(5)),
        );
        let saved = history.save_recent_search("a", "q");
        assert_eq!(saved.id, "5");
        assert!(history.get_recent_searches().is_empty());
        history.clear_recent_searches();
    }

    #[test]
    fn test_concurrent_saves_keep_every_entry() {
        let (history, _) = history();
        let history = Arc::new(history);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let history = Arc::clone(&history);
                std::thread::spawn(move || {
                    for j in 0..25 {
                        history.save_favorite_search(&format!("f{i}-{j}"), "nq", "q");
                    }
                    history.save_recent_search(&format!("recent {i}"), "q");
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(history.get_favorite_searches().len(), 200);
        assert_eq!(history.get_recent_searches().len(), 8);
    }

    #[test]
    fn test_custom_keys() {
        let (history, store) = history();
        let history = history.with_keys("team-recent", "team-favorites");
        history.save_recent_search("a", "q");
        assert!(store.get("team-recent").unwrap().is_some());
        assert_eq!(store.get(RECENT_SEARCHES_KEY).unwrap(), None);
    }
}
