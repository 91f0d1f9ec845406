//! Article content extraction
//!
//! Pure transform of a fetched HTML document into structured article content,
//! or a soft-not-found verdict for 200 responses whose body is a generic
//! placeholder rather than a real article.
//!
//! The origin's markup is unstable, so everything below the Open-Graph tags
//! is best-effort: the description comes from an ordered list of fallback
//! rules tried until one produces text that looks substantial enough. New
//! rules slot into [`DESCRIPTION_RULES`] without touching control flow.

use crate::config::SourceConfig;
use scraper::{Html, Selector};
use url::Url;

/// Minimum description length (in characters) below which the next
/// fallback rule is consulted
const MIN_DESCRIPTION_CHARS: usize = 50;

/// Hard cap on the final description length, in characters
const MAX_DESCRIPTION_CHARS: usize = 200;

/// Boilerplate descriptions the origin stamps on non-article pages
const GENERIC_DESCRIPTIONS: &[&str] = &["대한민국 No.1 K콘텐츠 플랫폼", "TVING 뉴스"];

/// Minimum length for a paragraph to count toward the concatenated
/// paragraph fallback
const MIN_PARAGRAPH_LEN: usize = 10;

/// Ordered CSS selectors for locating the article body text
///
/// Earlier entries are more specific; the longest text block found across
/// all of them wins. The final `p` entry concatenates every non-trivial
/// paragraph as a last resort.
const BODY_SELECTORS: &[&str] = &[
    "[class*='content']",
    "[class*='body']",
    "[class*='article']",
    ".news_contents",
    "p",
];

/// Result of extracting one fetched document
#[derive(Debug)]
pub enum ExtractOutcome {
    /// The document is a real article
    Article(ArticleContent),

    /// 200 response, but the content is a placeholder or landing page
    SoftNotFound,
}

/// Content fields extracted from an article page
///
/// Identifier, canonical URL, and discovery timestamp are attached by the
/// discoverer; this struct is a pure function of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleContent {
    /// Article title; always non-empty
    pub title: String,
    /// Article description; possibly empty, never longer than ≈200 chars
    pub description: String,
    /// Thumbnail image URL; possibly empty
    pub thumbnail: String,
    /// Category label; always populated, defaults to "뉴스"
    pub category: String,
}

/// One description fallback rule: document in, candidate text out
type DescriptionRule = fn(&Html) -> Option<String>;

/// Fallback rules in priority order; see module docs
const DESCRIPTION_RULES: &[DescriptionRule] = &[
    meta_description,
    largest_body_block,
    json_ld_description,
];

/// Article content extractor, configured with the origin's markup quirks
#[derive(Debug, Clone)]
pub struct Extractor {
    title_suffix: String,
    soft_404_markers: Vec<String>,
    landing_titles: Vec<String>,
    category_marker: String,
}

impl Extractor {
    pub fn new(source: &SourceConfig) -> Self {
        Self {
            title_suffix: source.title_suffix.clone(),
            soft_404_markers: source.soft_404_markers.clone(),
            landing_titles: source.landing_titles.clone(),
            category_marker: source.category_marker.clone(),
        }
    }

    /// Extracts article content from a fetched document
    ///
    /// Deterministic: the same document always yields the same outcome.
    pub fn extract(&self, html: &str) -> ExtractOutcome {
        let document = Html::parse_document(html);

        let title = match self.title(&document) {
            Some(t) => t,
            None => return ExtractOutcome::SoftNotFound,
        };

        let description = self.description(&document, &title);
        let thumbnail = meta_content(&document, "og:image").unwrap_or_default();
        let category = self.category_from_thumbnail(&thumbnail);

        ExtractOutcome::Article(ArticleContent {
            title,
            description,
            thumbnail,
            category,
        })
    }

    /// Title extraction with soft-not-found detection
    ///
    /// Primary source is the Open-Graph title; fallback is the page
    /// `<title>` with the site-name suffix stripped. `None` means the page
    /// is not a real article.
    fn title(&self, document: &Html) -> Option<String> {
        let raw = meta_content(document, "og:title")
            .filter(|t| !t.trim().is_empty())
            .or_else(|| page_title(document))?;

        let title = raw
            .strip_suffix(&self.title_suffix)
            .unwrap_or(&raw)
            .trim()
            .to_string();

        if title.is_empty() {
            return None;
        }
        if self.soft_404_markers.iter().any(|m| title.contains(m.as_str())) {
            return None;
        }
        if self.landing_titles.iter().any(|t| t == &title) {
            return None;
        }

        Some(title)
    }

    /// Runs the description fallback cascade
    ///
    /// Each rule is consulted only while the current candidate still looks
    /// weak (empty, equal to the title, too short, or known boilerplate),
    /// and may only replace the candidate with strictly longer text.
    fn description(&self, document: &Html, title: &str) -> String {
        let mut candidate = String::new();

        for rule in DESCRIPTION_RULES {
            if !needs_fallback(&candidate, title) {
                break;
            }
            if let Some(text) = rule(document) {
                let text = normalize_whitespace(&text);
                if text.chars().count() > candidate.chars().count() {
                    candidate = text;
                }
            }
        }

        if candidate == title {
            candidate.clear();
        }
        truncate_chars(&candidate, MAX_DESCRIPTION_CHARS)
    }

    /// Maps the thumbnail URL to a category label
    ///
    /// The path segment immediately following the marker segment names the
    /// category. Unmapped segments pass through capitalized; a missing
    /// thumbnail or marker yields the general-news default.
    fn category_from_thumbnail(&self, thumbnail: &str) -> String {
        let segment = Url::parse(thumbnail).ok().and_then(|url| {
            let segments: Vec<String> = url
                .path_segments()
                .map(|s| s.map(str::to_string).collect())
                .unwrap_or_default();
            segments
                .iter()
                .position(|s| s == &self.category_marker)
                .and_then(|i| segments.get(i + 1))
                .cloned()
        });

        match segment.as_deref() {
            Some(s) => category_label(s),
            None => "뉴스".to_string(),
        }
    }
}

/// Fixed dictionary from thumbnail path segments to category labels
fn category_label(segment: &str) -> String {
    match segment {
        "culture" => "문화/연예".to_string(),
        "disaster" => "사회/재난".to_string(),
        "economy" => "경제".to_string(),
        "politics" => "정치".to_string(),
        "news" => "통합뉴스".to_string(),
        "sports" => "스포츠".to_string(),
        "world" => "국제".to_string(),
        "society" => "사회".to_string(),
        "science" => "IT/과학".to_string(),
        "entertainment" => "연예".to_string(),
        "lifestyle" => "생활/문화".to_string(),
        other => capitalize(other),
    }
}

/// Whether the current description candidate is weak enough to consult
/// the next fallback rule
fn needs_fallback(candidate: &str, title: &str) -> bool {
    candidate.is_empty()
        || candidate == title
        || candidate.chars().count() < MIN_DESCRIPTION_CHARS
        || GENERIC_DESCRIPTIONS.iter().any(|g| candidate.contains(g))
}

/// Rule 1: Open-Graph description, falling back to the plain meta description
fn meta_description(document: &Html) -> Option<String> {
    meta_content(document, "og:description").or_else(|| {
        let selector = Selector::parse("meta[name='description']").ok()?;
        document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(str::to_string)
    })
}

/// Rule 2: longest text block across the ordered body selectors
fn largest_body_block(document: &Html) -> Option<String> {
    let mut best: Option<String> = None;

    for css in BODY_SELECTORS {
        let selector = match Selector::parse(css) {
            Ok(s) => s,
            Err(_) => continue,
        };

        let text = if *css == "p" {
            // Last resort: concatenate every non-trivial paragraph
            let paragraphs: Vec<String> = document
                .select(&selector)
                .map(|el| el.text().collect::<String>().trim().to_string())
                .filter(|t| t.chars().count() > MIN_PARAGRAPH_LEN)
                .collect();
            paragraphs.join(" ")
        } else {
            document
                .select(&selector)
                .map(|el| el.text().collect::<String>())
                .max_by_key(|t| t.chars().count())
                .unwrap_or_default()
        };

        let text = text.trim().to_string();
        if text.chars().count() > best.as_deref().map_or(0, |b| b.chars().count()) {
            best = Some(text);
        }
    }

    best.filter(|t| !t.is_empty())
}

/// Rule 3: `description` or `articleBody` from a JSON-LD block
fn json_ld_description(document: &Html) -> Option<String> {
    let selector = Selector::parse("script[type='application/ld+json']").ok()?;
    let mut best: Option<String> = None;

    for script in document.select(&selector) {
        let raw = script.text().collect::<String>();
        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(_) => continue,
        };

        for node in json_ld_nodes(&value) {
            for field in ["description", "articleBody"] {
                if let Some(text) = node.get(field).and_then(|v| v.as_str()) {
                    if text.chars().count() > best.as_deref().map_or(0, |b| b.chars().count()) {
                        best = Some(text.to_string());
                    }
                }
            }
        }
    }

    best
}

/// Flattens a JSON-LD value into its candidate object nodes
///
/// Handles a bare object, a top-level array, and the `@graph` wrapper.
fn json_ld_nodes(value: &serde_json::Value) -> Vec<&serde_json::Value> {
    match value {
        serde_json::Value::Array(items) => items.iter().collect(),
        serde_json::Value::Object(map) => match map.get("@graph") {
            Some(serde_json::Value::Array(items)) => items.iter().collect(),
            _ => vec![value],
        },
        _ => Vec::new(),
    }
}

fn meta_content(document: &Html, property: &str) -> Option<String> {
    let css = format!("meta[property='{}']", property);
    let selector = Selector::parse(&css).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string)
}

fn page_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .filter(|t| !t.trim().is_empty())
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
