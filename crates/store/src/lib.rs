// crates/store/src/lib.rs
//! Persistence for recent and favorite issue searches.
//!
//! # Architecture
//!
//! - **Seam**: [`KeyValueStore`] (`get` / `set` / `remove` of string values)
//! - **Backends**: [`MemoryStore`] for tests, [`FileStore`] for one JSON file on disk
//! - **Lists**: [`SearchHistory`] keeps each list as a JSON array under a fixed key

pub mod clock;
pub mod error;
pub mod history;
pub mod kv;
pub mod paths;

pub use clock::{Clock, StepClock, SystemClock};
pub use error::{StoreError, StoreResult};
pub use history::{SearchHistory, FAVORITE_SEARCHES_KEY, MAX_RECENT_SEARCHES, RECENT_SEARCHES_KEY};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
