use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::KeyValueStore;

/// A persisted value plus the time it was written.
///
/// The timestamp is display metadata only; nothing expires based on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredValue {
    value: String,
    stored_at: DateTime<Utc>,
}

/// File-backed store holding one JSON file per key inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn load(&self, key: &str) -> Result<Option<StoredValue>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read stored value: {}", key))?;
        let stored: StoredValue = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse stored value: {}", key))?;

        Ok(Some(stored))
    }

    /// When the value for `key` was last written, if it exists.
    pub fn stored_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self.load(key)?.map(|stored| stored.stored_at))
    }

    /// Age of the value for `key` as a short display string ("5m ago").
    pub fn age_display(&self, key: &str) -> Result<Option<String>> {
        let Some(stored_at) = self.stored_at(key)? else {
            return Ok(None);
        };
        let minutes = (Utc::now() - stored_at).num_minutes();
        Ok(Some(format_age(minutes)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load(key)?.map(|stored| stored.value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let stored = StoredValue {
            value: value.to_string(),
            stored_at: Utc::now(),
        };
        let contents = serde_json::to_string_pretty(&stored)?;
        std::fs::write(self.entry_path(key), contents)
            .with_context(|| format!("Failed to write stored value: {}", key))
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove stored value: {}", key))?;
        }
        Ok(())
    }
}

/// Format an age in minutes for status display.
/// Negative ages (clock skew) read as "just now".
fn format_age(minutes: i64) -> String {
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / 1440)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn test_store() -> (TempDir, FileStore) {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path()).unwrap();
        (tmp, store)
    }

    #[test]
    fn test_get_missing_key_returns_none() {
        let (_tmp, store) = test_store();
        assert!(store.get("token").unwrap().is_none());
        assert!(store.stored_at("token").unwrap().is_none());
        assert!(store.age_display("token").unwrap().is_none());
    }

    #[test]
    fn test_set_get_roundtrip() {
        let (_tmp, store) = test_store();
        store.set("token", "abc123").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("abc123"));
        assert!(store.stored_at("token").unwrap().is_some());
        assert_eq!(store.age_display("token").unwrap().as_deref(), Some("just now"));
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let (_tmp, store) = test_store();
        store.set("token", "first").unwrap();
        store.set("token", "second").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_tmp, store) = test_store();
        store.remove("token").unwrap();

        store.set("token", "abc123").unwrap();
        store.remove("token").unwrap();
        store.remove("token").unwrap();
        assert!(store.get("token").unwrap().is_none());
    }

    #[test]
    fn test_values_survive_reopening_the_store() {
        let (tmp, store) = test_store();
        store.set("token", "abc123").unwrap();
        drop(store);

        let reopened = FileStore::new(tmp.path()).unwrap();
        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_format_age_buckets() {
        assert_eq!(format_age(-3), "just now");
        assert_eq!(format_age(0), "just now");
        assert_eq!(format_age(5), "5m ago");
        assert_eq!(format_age(90), "1h ago");
        assert_eq!(format_age(2000), "1d ago");
    }
}
