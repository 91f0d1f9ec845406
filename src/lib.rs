//! Newsprobe: an identifier-probing news discovery engine
//!
//! The target site exposes no listing or search endpoint, only individually
//! addressable article pages keyed by a monotonically-issued identifier.
//! This crate synthesizes a "list articles" capability out of that "get one
//! article by id" primitive: it probes identifiers adjacent to the last
//! confirmed one, classifies each response as article or not-found, and
//! assembles a category-balanced digest from the hits.
//!
//! Exactly one discovery session may run at a time. Probes are issued
//! strictly sequentially with a pacing delay, and the cursor is read once at
//! session start and written once at session end, so two concurrent sessions
//! would race on it. Nothing in this crate enforces single-flight; the
//! embedding service (cron trigger, job queue) must.

pub mod config;
pub mod crawler;
pub mod digest;
pub mod ident;
pub mod storage;

use thiserror::Error;

/// Main error type for newsprobe operations
#[derive(Debug, Error)]
pub enum NewsprobeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Identifier error: {0}")]
    Ident(#[from] ident::IdentError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid identifier in config: {0}")]
    InvalidIdentifier(String),
}

/// Result type alias for newsprobe operations
pub type Result<T> = std::result::Result<T, NewsprobeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Article, Discoverer, ExtractOutcome, Extractor, FetchOutcome, ProbeOutcome};
pub use ident::IdentCodec;
pub use storage::{MemorySettings, SettingsStore, SqliteSettings};
