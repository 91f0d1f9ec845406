//! Configuration module for newsprobe
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every probe cap, pacing delay, and site-specific markup heuristic
//! the discovery engine uses is configured here.
//!
//! # Example
//!
//! ```no_run
//! use newsprobe::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("newsprobe.toml")).unwrap();
//! println!("Sweep cap: {} probes", config.crawler.sweep_max_probes);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, SourceConfig, StorageConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
