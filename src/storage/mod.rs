//! Cursor persistence
//!
//! The discovery engine needs exactly one durable slot: the string form of
//! the last identifier confirmed to be a real article, stored under the
//! `last_article_id` settings key. This module defines the settings-store
//! trait and its SQLite and in-memory implementations.

mod sqlite;
mod traits;

pub use sqlite::SqliteSettings;
pub use traits::{MemorySettings, SettingsStore, StorageError, StorageResult};

/// Settings key under which the discovery cursor is persisted
pub const CURSOR_KEY: &str = "last_article_id";
