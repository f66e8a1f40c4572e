// crates/store/src/paths.rs
//! Storage locations for the search history file.

use std::path::PathBuf;

/// App data root: `~/Library/Application Support/jira-nlq/` (macOS) or `~/.local/share/jira-nlq/` (Linux).
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("jira-nlq"))
}

/// Search history file: `<app_data_dir>/search-store.json`.
pub fn store_path() -> Option<PathBuf> {
    app_data_dir().map(|d| d.join("search-store.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_path() {
        // data_dir is unavailable in some sandboxes; only check the shape when present.
        if let Some(path) = store_path() {
            assert!(path.to_string_lossy().ends_with("search-store.json"));
            assert!(path.to_string_lossy().contains("jira-nlq"));
        }
    }
}
