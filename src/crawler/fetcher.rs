//! HTTP fetcher for single article pages
//!
//! One bounded-timeout GET per candidate identifier, against the fixed
//! article base URL. The fetcher performs no retries; retry policy for
//! transient failures belongs to the discoverer.
//!
//! Distinguishing `NotFound` from `Transient` is the point of this module:
//! a network blip must never be mistaken for "this identifier does not
//! exist", or the discoverer would treat it as the end of the article range.

use crate::config::SourceConfig;
use crate::NewsprobeError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Result of fetching one candidate identifier
#[derive(Debug)]
pub enum FetchOutcome {
    /// 2xx response with a body
    Found {
        /// The article page URL that was fetched
        url: String,
        /// Raw HTML body
        body: String,
    },

    /// Origin confirms the identifier does not exist (HTTP 404)
    NotFound,

    /// Timeout, connection failure, or an unexpected status
    ///
    /// Retryable; must not be folded into `NotFound`.
    Transient {
        /// Error description for logs
        cause: String,
    },
}

/// Builds the HTTP client used for all probes in a session
///
/// Sends a realistic browser user agent and language headers; the origin
/// serves different markup to obvious bots.
pub fn build_http_client(source: &SourceConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    if let Ok(accept) = HeaderValue::from_str(ACCEPT_HTML) {
        headers.insert(ACCEPT, accept);
    }
    if let Ok(lang) = HeaderValue::from_str(&source.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, lang);
    }

    Client::builder()
        .user_agent(source.user_agent.clone())
        .default_headers(headers)
        .timeout(Duration::from_secs(source.request_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Joins the base URL with an identifier's string form
pub fn article_url(base_url: &str, ident: &str) -> Result<Url, NewsprobeError> {
    let base = Url::parse(base_url)?;
    Ok(base.join(ident)?)
}

/// Fetches one article page
///
/// | Response | Outcome |
/// |----------|---------|
/// | 2xx with body | `Found` |
/// | 404 | `NotFound` |
/// | Other status | `Transient` |
/// | Timeout / connect error | `Transient` |
pub async fn fetch_article(client: &Client, url: &Url) -> FetchOutcome {
    match client.get(url.clone()).send().await {
        Ok(response) => {
            let status = response.status();

            if status == StatusCode::NOT_FOUND {
                return FetchOutcome::NotFound;
            }

            if !status.is_success() {
                return FetchOutcome::Transient {
                    cause: format!("HTTP {}", status.as_u16()),
                };
            }

            match response.text().await {
                Ok(body) => FetchOutcome::Found {
                    url: url.to_string(),
                    body,
                },
                Err(e) => FetchOutcome::Transient {
                    cause: format!("Body read failed: {}", e),
                },
            }
        }
        Err(e) => {
            let cause = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection failed".to_string()
            } else {
                e.to_string()
            };
            FetchOutcome::Transient { cause }
        }
    }
}
