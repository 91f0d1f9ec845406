//! Discovery engine: fetch, extract, probe
//!
//! This module contains the core discovery logic:
//! - HTTP fetching of single article pages with error classification
//! - HTML extraction of article content with fallback heuristics
//! - Probe-driven discovery strategies with pacing and miss tolerance

mod discoverer;
mod extractor;
mod fetcher;

pub use discoverer::{Article, Discoverer, ProbeOutcome};
pub use extractor::{ArticleContent, ExtractOutcome, Extractor};
pub use fetcher::{article_url, build_http_client, fetch_article, FetchOutcome};
