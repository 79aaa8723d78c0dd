// HireScope - app/saved_searches.rs
//
// Named search queries persisted between runs.
//
// - The store is saved atomically (write temp, rename final) so a crash
//   during save never corrupts the previous good file.
// - Load problems (corrupt file, version mismatch) start an empty store
//   rather than failing; a missing file is the normal first run.
// - Queries are stored verbatim and replayed through the same evaluator,
//   so the evaluation order of AND/OR is part of their meaning.

use crate::util::constants::{
    MAX_SAVED_SEARCHES, MAX_SAVED_SEARCH_NAME_LENGTH, SAVED_SEARCHES_FILE_NAME,
};
use crate::util::error::SavedSearchError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version stamp for forward-compatibility checks.
///
/// Increment whenever `SavedSearches` changes shape in a breaking way.
/// Version mismatches silently discard the store.
pub const SAVED_SEARCHES_VERSION: u32 = 1;

/// One saved query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearch {
    pub name: String,
    pub query: String,
    pub saved_at: DateTime<Utc>,
}

/// On-disk store of saved searches, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearches {
    /// Schema version; must equal `SAVED_SEARCHES_VERSION` to be accepted.
    pub version: u32,

    #[serde(default)]
    pub searches: Vec<SavedSearch>,
}

impl Default for SavedSearches {
    fn default() -> Self {
        Self {
            version: SAVED_SEARCHES_VERSION,
            searches: Vec::new(),
        }
    }
}

/// Trim and check a saved search name.
fn normalise_name(name: &str) -> Result<String, SavedSearchError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SavedSearchError::InvalidName {
            name: name.to_string(),
            reason: "name is empty",
        });
    }
    if trimmed.chars().count() > MAX_SAVED_SEARCH_NAME_LENGTH {
        return Err(SavedSearchError::InvalidName {
            name: name.to_string(),
            reason: "name is longer than 64 characters",
        });
    }
    Ok(trimmed.to_string())
}

impl SavedSearches {
    /// Look up a saved search by name (trimmed, exact match).
    pub fn get(&self, name: &str) -> Option<&SavedSearch> {
        let name = name.trim();
        self.searches.iter().find(|s| s.name == name)
    }

    /// Save `query` under `name`, replacing any search with the same name.
    pub fn upsert(&mut self, name: &str, query: &str) -> Result<&SavedSearch, SavedSearchError> {
        let name = normalise_name(name)?;
        let entry = SavedSearch {
            name: name.clone(),
            query: query.to_string(),
            saved_at: Utc::now(),
        };

        let idx = match self.searches.iter().position(|s| s.name == name) {
            Some(pos) => {
                self.searches[pos] = entry;
                pos
            }
            None => {
                if self.searches.len() >= MAX_SAVED_SEARCHES {
                    return Err(SavedSearchError::TooMany {
                        max: MAX_SAVED_SEARCHES,
                    });
                }
                self.searches.push(entry);
                self.searches.len() - 1
            }
        };
        Ok(&self.searches[idx])
    }

    /// Remove the named search.
    pub fn remove(&mut self, name: &str) -> Result<SavedSearch, SavedSearchError> {
        let trimmed = name.trim();
        let pos = self
            .searches
            .iter()
            .position(|s| s.name == trimmed)
            .ok_or_else(|| SavedSearchError::NotFound {
                name: trimmed.to_string(),
            })?;
        Ok(self.searches.remove(pos))
    }
}

// =============================================================================
// I/O helpers
// =============================================================================

/// Resolve the store path from the platform data directory.
pub fn store_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SAVED_SEARCHES_FILE_NAME)
}

/// Save `store` to `path` atomically (write temp, then rename).
///
/// Creates all parent directories as needed.
pub fn save(store: &SavedSearches, path: &Path) -> Result<(), SavedSearchError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| SavedSearchError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let json =
        serde_json::to_string_pretty(store).map_err(|e| SavedSearchError::Json { source: e })?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes()).map_err(|e| SavedSearchError::Io {
        path: tmp.clone(),
        source: e,
    })?;

    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        SavedSearchError::Io {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    tracing::debug!(
        path = %path.display(),
        count = store.searches.len(),
        "Saved searches written"
    );
    Ok(())
}

/// Load the store from `path`.
///
/// Any problem (missing file, malformed JSON, version mismatch) yields an
/// empty store.
pub fn load(path: &Path) -> SavedSearches {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "Cannot read saved searches");
            }
            return SavedSearches::default();
        }
    };

    let store: SavedSearches = match serde_json::from_str(&content) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Saved searches file is malformed, starting empty"
            );
            return SavedSearches::default();
        }
    };

    if store.version != SAVED_SEARCHES_VERSION {
        tracing::warn!(
            found = store.version,
            expected = SAVED_SEARCHES_VERSION,
            "Saved searches version mismatch, starting empty"
        );
        return SavedSearches::default();
    }

    tracing::debug!(
        path = %path.display(),
        count = store.searches.len(),
        "Saved searches loaded"
    );
    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_load_keeps_queries_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = store_path(dir.path());

        let mut store = SavedSearches::default();
        store
            .upsert("frontend", r#"("Frontend" OR "Backend") NOT "Intern""#)
            .unwrap();
        store.upsert("  masters ", "master").unwrap();
        save(&store, &path).unwrap();

        let loaded = load(&path);
        assert_eq!(loaded, store);
        assert_eq!(
            loaded.get("frontend").map(|s| s.query.as_str()),
            Some(r#"("Frontend" OR "Backend") NOT "Intern""#)
        );
        assert!(loaded.get("masters").is_some());
    }

    #[test]
    fn test_upsert_replaces_same_name() {
        let mut store = SavedSearches::default();
        store.upsert("seniors", "senior").unwrap();
        store.upsert("seniors", r#""senior" NOT "junior""#).unwrap();
        assert_eq!(store.searches.len(), 1);
        assert_eq!(store.searches[0].query, r#""senior" NOT "junior""#);
    }

    #[test]
    fn test_upsert_rejects_bad_names() {
        let mut store = SavedSearches::default();
        assert!(matches!(
            store.upsert("   ", "x"),
            Err(SavedSearchError::InvalidName { .. })
        ));
        let long = "n".repeat(MAX_SAVED_SEARCH_NAME_LENGTH + 1);
        assert!(matches!(
            store.upsert(&long, "x"),
            Err(SavedSearchError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_upsert_enforces_limit() {
        let mut store = SavedSearches::default();
        for i in 0..MAX_SAVED_SEARCHES {
            store.upsert(&format!("s{i}"), "q").unwrap();
        }
        assert!(matches!(
            store.upsert("one-more", "q"),
            Err(SavedSearchError::TooMany { .. })
        ));
        // Replacing an existing name is still allowed at the limit.
        assert!(store.upsert("s0", "new").is_ok());
    }

    #[test]
    fn test_remove() {
        let mut store = SavedSearches::default();
        store.upsert("a", "alpha").unwrap();
        assert_eq!(store.remove(" a ").unwrap().query, "alpha");
        assert!(matches!(
            store.remove("a"),
            Err(SavedSearchError::NotFound { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load(&dir.path().join("none.json")), SavedSearches::default());
    }

    #[test]
    fn test_load_malformed_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = store_path(dir.path());
        std::fs::write(&path, b"not valid json {{{{").unwrap();
        assert!(load(&path).searches.is_empty());
    }

    #[test]
    fn test_load_wrong_version_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = store_path(dir.path());
        let mut store = SavedSearches::default();
        store.upsert("a", "alpha").unwrap();
        store.version = 99;
        save(&store, &path).unwrap();
        assert!(load(&path).searches.is_empty());
    }

    #[test]
    fn test_save_overwrites_leftover_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = store_path(dir.path().join("nested").as_path());

        let mut store = SavedSearches::default();
        store.upsert("a", "alpha").unwrap();
        save(&store, &path).unwrap();

        std::fs::write(path.with_extension("json.tmp"), b"garbage").unwrap();
        store.upsert("b", "beta").unwrap();
        save(&store, &path).unwrap();

        assert_eq!(load(&path).searches.len(), 2);
    }
}
