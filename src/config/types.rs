use serde::Deserialize;

/// Main configuration structure for newsprobe
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    pub crawler: CrawlerConfig,
    pub storage: StorageConfig,
}

/// Origin site configuration
///
/// Everything site-specific lives here: the article URL base, the browser
/// headers the origin expects, the identifier format, and the markup
/// heuristics the extractor keys on.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Base URL that article identifiers are joined onto
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Browser user agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Accept-Language header value
    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Identifier prefix character
    #[serde(rename = "id-prefix", default = "default_id_prefix")]
    pub id_prefix: char,

    /// Identifier ordinal width in digits
    #[serde(rename = "id-width", default = "default_id_width")]
    pub id_width: usize,

    /// Identifier used when no cursor has been persisted yet
    #[serde(rename = "start-id")]
    pub start_id: String,

    /// Identifier below which backward collection never descends
    ///
    /// Guards against scanning into ancient identifier space when the
    /// frontier estimate is wrong.
    #[serde(rename = "floor-id", default)]
    pub floor_id: Option<String>,

    /// Site-name suffix stripped from `<title>` fallbacks
    #[serde(rename = "title-suffix", default = "default_title_suffix")]
    pub title_suffix: String,

    /// Title substrings that mark a 200 response as a placeholder page
    #[serde(rename = "soft-404-markers", default = "default_soft_404_markers")]
    pub soft_404_markers: Vec<String>,

    /// Generic site titles that mean "no article here"
    #[serde(rename = "landing-titles", default)]
    pub landing_titles: Vec<String>,

    /// Path segment in thumbnail URLs that precedes the category segment
    #[serde(rename = "category-marker", default = "default_category_marker")]
    pub category_marker: String,
}

/// Discovery behavior configuration
///
/// Probe caps, miss thresholds, and pacing delays for the four discovery
/// strategies, plus the transient-failure retry policy.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum probes in one forward sweep
    #[serde(rename = "sweep-max-probes", default = "default_sweep_max_probes")]
    pub sweep_max_probes: u32,

    /// Consecutive misses that end a forward sweep
    #[serde(rename = "sweep-miss-limit", default = "default_sweep_miss_limit")]
    pub sweep_miss_limit: u32,

    /// Delay between forward-sweep probes (milliseconds)
    #[serde(rename = "sweep-delay-ms", default = "default_sweep_delay_ms")]
    pub sweep_delay_ms: u64,

    /// Maximum probes when relocating the frontier
    #[serde(rename = "frontier-max-probes", default = "default_frontier_max_probes")]
    pub frontier_max_probes: u32,

    /// Consecutive misses that end a frontier probe
    #[serde(rename = "frontier-miss-limit", default = "default_frontier_miss_limit")]
    pub frontier_miss_limit: u32,

    /// Delay between backward-collection probes (milliseconds)
    #[serde(rename = "collect-delay-ms", default = "default_collect_delay_ms")]
    pub collect_delay_ms: u64,

    /// Delay between recent-N probes (milliseconds)
    #[serde(rename = "recent-delay-ms", default = "default_recent_delay_ms")]
    pub recent_delay_ms: u64,

    /// Retries for a transient failure before it counts as a miss
    #[serde(rename = "transient-retries", default = "default_transient_retries")]
    pub transient_retries: u32,

    /// Delay before each transient retry (milliseconds)
    #[serde(rename = "retry-backoff-ms", default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file holding the settings slot
    #[serde(rename = "database-path")]
    pub database_path: String,
}

fn default_user_agent() -> String {
    // A realistic mobile browser UA; the origin serves the lean mobile
    // markup for it, which is what the extractor selectors target.
    "Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X) AppleWebKit/605.1.15 \
     (KHTML, like Gecko) Version/16.0 Mobile/15E148 Safari/604.1"
        .to_string()
}

fn default_accept_language() -> String {
    "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_id_prefix() -> char {
    'A'
}

fn default_id_width() -> usize {
    11
}

fn default_title_suffix() -> String {
    " | TVING".to_string()
}

fn default_soft_404_markers() -> Vec<String> {
    vec!["404".to_string(), "찾을 수 없".to_string()]
}

fn default_category_marker() -> String {
    "news".to_string()
}

fn default_sweep_max_probes() -> u32 {
    600
}

fn default_sweep_miss_limit() -> u32 {
    20
}

fn default_sweep_delay_ms() -> u64 {
    500
}

fn default_frontier_max_probes() -> u32 {
    150
}

fn default_frontier_miss_limit() -> u32 {
    10
}

fn default_collect_delay_ms() -> u64 {
    50
}

fn default_recent_delay_ms() -> u64 {
    200
}

fn default_transient_retries() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    1000
}
