//! Storage traits and error types

use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable key/value slot for discovery state
///
/// The Discoverer owns the cursor for the duration of a session; this trait
/// is merely the slot it is read from at session start and written to at
/// session end.
pub trait SettingsStore {
    /// Reads a setting, returning `None` if the key has never been written
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes a setting, creating or replacing the slot
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// In-memory settings store
///
/// Used by tests and by one-shot commands that must not touch the database.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: HashMap<String, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor with a pre-seeded cursor
    pub fn with_cursor(cursor: &str) -> Self {
        let mut store = Self::new();
        store
            .values
            .insert(super::CURSOR_KEY.to_string(), cursor.to_string());
        store
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemorySettings::new();
        assert!(store.get("last_article_id").unwrap().is_none());

        store.set("last_article_id", "A00000136232").unwrap();
        assert_eq!(
            store.get("last_article_id").unwrap().as_deref(),
            Some("A00000136232")
        );

        store.set("last_article_id", "A00000136300").unwrap();
        assert_eq!(
            store.get("last_article_id").unwrap().as_deref(),
            Some("A00000136300")
        );
    }

    #[test]
    fn test_with_cursor_seeds_slot() {
        let store = MemorySettings::with_cursor("A00000136232");
        assert_eq!(
            store.get(crate::storage::CURSOR_KEY).unwrap().as_deref(),
            Some("A00000136232")
        );
    }
}
