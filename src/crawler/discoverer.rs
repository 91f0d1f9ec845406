//! Discovery session logic
//!
//! The origin offers no listing endpoint, so discovery is synthesized from
//! the single-article primitive: probe identifiers adjacent to the last
//! confirmed one and classify each response. All strategies are built from
//! the same probe, which collapses fetch + extract into Hit/Miss after a
//! bounded retry for transient failures.
//!
//! Probes are strictly sequential with a fixed inter-request delay per
//! strategy. Fan-out probing would multiply load against a third-party
//! origin with no published rate-limit contract and risk an IP-level block.

use crate::config::{Config, CrawlerConfig, SourceConfig};
use crate::crawler::extractor::{ExtractOutcome, Extractor};
use crate::crawler::fetcher::{article_url, build_http_client, fetch_article, FetchOutcome};
use crate::digest;
use crate::ident::IdentCodec;
use crate::storage::{SettingsStore, CURSOR_KEY};
use crate::Result;
use chrono::{DateTime, Utc};
use rand::Rng;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// A discovered news article
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    /// String-form identifier, e.g. `A00000136232`
    pub id: String,

    /// Ordinal behind the identifier; drives all "most recent" ordering
    #[serde(skip)]
    pub ordinal: u64,

    /// Article title; never empty
    pub title: String,

    /// Article description; possibly empty, never null
    pub description: String,

    /// Thumbnail image URL; possibly empty
    pub thumbnail: String,

    /// Category label; always populated
    pub category: String,

    /// Canonical article page URL
    pub url: String,

    /// When this session discovered the article
    pub discovered_at: DateTime<Utc>,
}

/// Outcome of probing one candidate ordinal
#[derive(Debug)]
pub enum ProbeOutcome {
    /// A real article was fetched and extracted
    Hit(Box<Article>),

    /// Confirmed 404, placeholder page, or a transient failure that
    /// exhausted its retries
    Miss,
}

/// Drives fetch + extract across candidate identifier ranges
///
/// Owns the cursor for the duration of a session: it is read from the
/// settings store once at session start and written once at session end.
/// Callers must ensure only one session runs at a time.
pub struct Discoverer<S: SettingsStore> {
    client: Client,
    extractor: Extractor,
    codec: IdentCodec,
    source: SourceConfig,
    crawler: CrawlerConfig,
    store: S,
}

impl<S: SettingsStore> Discoverer<S> {
    pub fn new(config: &Config, store: S) -> Result<Self> {
        let client = build_http_client(&config.source)?;
        Ok(Self {
            client,
            extractor: Extractor::new(&config.source),
            codec: IdentCodec::new(config.source.id_prefix, config.source.id_width),
            source: config.source.clone(),
            crawler: config.crawler.clone(),
            store,
        })
    }

    /// Access to the settings store (for inspecting the cursor after a session)
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Forward sweep from the cursor: the daily catch-up strategy
    ///
    /// Probes sequentially from cursor+1 up to the sweep cap, pacing each
    /// probe except the first, and stops early after the configured run of
    /// consecutive misses. If anything was found, the cursor advances to the
    /// highest hit ordinal; it never decreases.
    pub async fn catch_up(&mut self) -> Result<Vec<Article>> {
        let cursor = self.load_cursor()?;
        tracing::info!(
            "Starting catch-up sweep from {}",
            self.codec.encode(cursor + 1)?
        );

        let mut hits = Vec::new();
        let mut consecutive_misses = 0u32;

        for i in 1..=self.crawler.sweep_max_probes {
            if i > 1 {
                tokio::time::sleep(Duration::from_millis(self.crawler.sweep_delay_ms)).await;
            }

            match self.probe(cursor + u64::from(i)).await? {
                ProbeOutcome::Hit(article) => {
                    tracing::info!("Found: {}", article.title);
                    hits.push(*article);
                    consecutive_misses = 0;
                }
                ProbeOutcome::Miss => {
                    consecutive_misses += 1;
                    if consecutive_misses >= self.crawler.sweep_miss_limit {
                        tracing::info!(
                            "{} consecutive misses, ending sweep",
                            consecutive_misses
                        );
                        break;
                    }
                }
            }
        }

        self.advance_cursor(cursor, &hits)?;
        tracing::info!("Catch-up sweep found {} articles", hits.len());
        Ok(hits)
    }

    /// Category-balanced digest of the most recent articles
    ///
    /// Relocates the frontier (the stored cursor may be stale), collects a
    /// pool backward from it, then hands the pool to the selector. The
    /// cursor advances to the frontier when one is found beyond it.
    pub async fn latest_digest<R: Rng>(
        &mut self,
        total_limit: usize,
        rng: &mut R,
    ) -> Result<Vec<Article>> {
        let cursor = self.load_cursor()?;
        let frontier = self.find_frontier(cursor).await?;
        if frontier > cursor {
            self.save_cursor(frontier)?;
        }

        let pool = self.collect_backward(frontier, total_limit).await?;
        Ok(digest::select(pool, total_limit, rng))
    }

    /// Most recent N articles, raw probe order (manual/ad-hoc path)
    ///
    /// Descends from the cursor collecting exactly `count` hits, bounded by
    /// three probes per requested article.
    pub async fn recent_raw(&mut self, count: usize) -> Result<Vec<Article>> {
        let cursor = self.load_cursor()?;
        let floor = self.floor_ordinal()?;
        let max_probes = count.saturating_mul(3);

        let mut hits = Vec::new();
        let mut ordinal = cursor;

        for i in 0..max_probes {
            if hits.len() >= count || ordinal < floor {
                break;
            }
            if i > 0 {
                tokio::time::sleep(Duration::from_millis(self.crawler.recent_delay_ms)).await;
            }

            if let ProbeOutcome::Hit(article) = self.probe(ordinal).await? {
                hits.push(*article);
            }

            if ordinal == 0 {
                break;
            }
            ordinal -= 1;
        }

        tracing::info!("Collected {} recent articles", hits.len());
        Ok(hits)
    }

    /// Forward sweep over a closed ordinal range (manual/test path)
    ///
    /// No cursor movement, no miss cutoff: every ordinal in the range is
    /// probed, paced like the catch-up sweep.
    pub async fn sweep_range(&mut self, start: u64, end: u64) -> Result<Vec<Article>> {
        let mut hits = Vec::new();

        for ordinal in start..=end {
            if ordinal > start {
                tokio::time::sleep(Duration::from_millis(self.crawler.sweep_delay_ms)).await;
            }
            if let ProbeOutcome::Hit(article) = self.probe(ordinal).await? {
                tracing::info!("Found: {} - {}", article.id, article.title);
                hits.push(*article);
            }
        }

        Ok(hits)
    }

    /// Probes a single string-form identifier (debug/ad-hoc path)
    pub async fn probe_ident(&mut self, ident: &str) -> Result<Option<Article>> {
        let ordinal = self.codec.decode(ident)?;
        match self.probe(ordinal).await? {
            ProbeOutcome::Hit(article) => Ok(Some(*article)),
            ProbeOutcome::Miss => Ok(None),
        }
    }

    /// Locates the current tip of the identifier range
    ///
    /// The stored cursor may be days stale; this probes forward from it,
    /// tracking the highest hit ordinal, with a shorter miss cutoff than the
    /// catch-up sweep. Returns the cursor itself when nothing newer exists.
    async fn find_frontier(&mut self, cursor: u64) -> Result<u64> {
        let mut frontier = cursor;
        let mut consecutive_misses = 0u32;

        for i in 1..=self.crawler.frontier_max_probes {
            if i > 1 {
                tokio::time::sleep(Duration::from_millis(self.crawler.collect_delay_ms)).await;
            }

            match self.probe(cursor + u64::from(i)).await? {
                ProbeOutcome::Hit(article) => {
                    frontier = frontier.max(article.ordinal);
                    consecutive_misses = 0;
                }
                ProbeOutcome::Miss => {
                    consecutive_misses += 1;
                    if consecutive_misses >= self.crawler.frontier_miss_limit {
                        break;
                    }
                }
            }
        }

        tracing::debug!("Frontier located at {}", self.codec.encode(frontier)?);
        Ok(frontier)
    }

    /// Collects a pool of articles descending from the frontier
    ///
    /// Stops once the pool reaches its target size, the probe budget is
    /// spent, or the ordinal would descend below the floor.
    async fn collect_backward(
        &mut self,
        frontier: u64,
        total_limit: usize,
    ) -> Result<Vec<Article>> {
        let target = pool_target(total_limit);
        let budget = probe_budget(target);
        let floor = self.floor_ordinal()?;

        let mut pool = Vec::new();
        let mut ordinal = frontier;

        for i in 0..budget {
            if pool.len() >= target || ordinal < floor {
                break;
            }
            if i > 0 {
                tokio::time::sleep(Duration::from_millis(self.crawler.collect_delay_ms)).await;
            }

            if let ProbeOutcome::Hit(article) = self.probe(ordinal).await? {
                pool.push(*article);
            }

            if ordinal == 0 {
                break;
            }
            ordinal -= 1;
        }

        tracing::info!("Collected pool of {} articles", pool.len());
        Ok(pool)
    }

    /// Fetch + extract one ordinal, collapsed to Hit/Miss
    ///
    /// Transient failures are retried with a fixed backoff before counting
    /// as a miss, and are logged distinctly from confirmed 404s so an
    /// unreachable origin is not mistaken for an exhausted article range.
    async fn probe(&mut self, ordinal: u64) -> Result<ProbeOutcome> {
        let ident = self.codec.encode(ordinal)?;
        let url = article_url(&self.source.base_url, &ident)?;

        let mut attempts_left = self.crawler.transient_retries + 1;

        loop {
            attempts_left -= 1;

            match fetch_article(&self.client, &url).await {
                FetchOutcome::Found { url, body } => {
                    return match self.extractor.extract(&body) {
                        ExtractOutcome::Article(content) => {
                            Ok(ProbeOutcome::Hit(Box::new(Article {
                                id: ident,
                                ordinal,
                                title: content.title,
                                description: content.description,
                                thumbnail: content.thumbnail,
                                category: content.category,
                                url,
                                discovered_at: Utc::now(),
                            })))
                        }
                        ExtractOutcome::SoftNotFound => {
                            tracing::debug!("{}: placeholder page", ident);
                            Ok(ProbeOutcome::Miss)
                        }
                    };
                }

                FetchOutcome::NotFound => {
                    tracing::debug!("{}: not found", ident);
                    return Ok(ProbeOutcome::Miss);
                }

                FetchOutcome::Transient { cause } => {
                    if attempts_left == 0 {
                        tracing::warn!(
                            "{}: transient failure ({}), retries exhausted, counting as miss",
                            ident,
                            cause
                        );
                        return Ok(ProbeOutcome::Miss);
                    }
                    tracing::warn!("{}: transient failure ({}), retrying", ident, cause);
                    tokio::time::sleep(Duration::from_millis(self.crawler.retry_backoff_ms))
                        .await;
                }
            }
        }
    }

    fn load_cursor(&self) -> Result<u64> {
        match self.store.get(CURSOR_KEY)? {
            Some(ident) => Ok(self.codec.decode(&ident)?),
            None => {
                tracing::info!(
                    "No stored cursor, seeding from {}",
                    self.source.start_id
                );
                Ok(self.codec.decode(&self.source.start_id)?)
            }
        }
    }

    fn save_cursor(&mut self, ordinal: u64) -> Result<()> {
        let ident = self.codec.encode(ordinal)?;
        self.store.set(CURSOR_KEY, &ident)?;
        tracing::info!("Cursor advanced to {}", ident);
        Ok(())
    }

    /// Advances the cursor to the highest hit ordinal, never decreasing it
    fn advance_cursor(&mut self, prior: u64, hits: &[Article]) -> Result<()> {
        let Some(max_hit) = hits.iter().map(|a| a.ordinal).max() else {
            return Ok(());
        };
        if max_hit > prior {
            self.save_cursor(max_hit)?;
        }
        Ok(())
    }

    fn floor_ordinal(&self) -> Result<u64> {
        match &self.source.floor_id {
            Some(ident) => Ok(self.codec.decode(ident)?),
            None => Ok(1),
        }
    }
}

/// Pool size target for backward collection
fn pool_target(total_limit: usize) -> usize {
    80.max(total_limit.saturating_mul(2))
}

/// Probe budget for backward collection: 1.5 times the pool target
fn probe_budget(target: usize) -> usize {
    target.saturating_mul(3) / 2
}
