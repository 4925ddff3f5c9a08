use async_trait::async_trait;
use nw_core::{http, Article, Error, Result, Summarizer};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use tracing::debug;

/// Containers tried in order for the post body; `body` is the last resort.
const BODY_SELECTORS: &[&str] = &[".artclView", ".view-con", ".bbs_view", "article", "#content", "body"];

const DEFAULT_MAX_CHARS: usize = 200;

/// Summarizes a post by the opening text of its detail page.
#[derive(Clone)]
pub struct LeadSummarizer {
    client: Client,
    max_chars: usize,
}

impl LeadSummarizer {
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(http::build_client()?))
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }
}

impl fmt::Debug for LeadSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeadSummarizer")
            .field("client", &"<reqwest::Client>")
            .field("max_chars", &self.max_chars)
            .finish()
    }
}

#[async_trait]
impl Summarizer for LeadSummarizer {
    fn name(&self) -> &str {
        "lead"
    }

    async fn summarize(&self, article: &Article) -> Result<String> {
        let html = http::fetch_text(&self.client, &article.url)
            .await
            .map_err(|e| Error::Detail(format!("Failed to fetch {}: {}", article.url, e)))?;
        let summary = summarize_html(&html, self.max_chars)
            .ok_or_else(|| Error::Detail(format!("No body text in {}", article.url)))?;
        debug!("Summarized {} ({} chars)", article.id, summary.chars().count());
        Ok(summary)
    }
}

/// Opening text of the first non-empty body container, cut to `max_chars`
/// characters with a trailing ellipsis when shortened.
pub fn summarize_html(html: &str, max_chars: usize) -> Option<String> {
    let document = Html::parse_document(html);
    BODY_SELECTORS
        .iter()
        .filter_map(|css| Selector::parse(css).ok())
        .flat_map(|selector| document.select(&selector).map(visible_text).collect::<Vec<_>>())
        .find(|text| !text.is_empty())
        .map(|text| truncate(&text, max_chars))
}

fn visible_text(el: ElementRef) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for node in el.descendants() {
        if let Some(text) = node.value().as_text() {
            let hidden = node
                .parent()
                .and_then(ElementRef::wrap)
                .map_or(false, |p| matches!(p.value().name(), "script" | "style" | "noscript"));
            if !hidden {
                parts.push(&**text);
            }
        }
    }
    parts.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}…", text[..end].trim_end()),
        None => text.to_string(),
    }
}
