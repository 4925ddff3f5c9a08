//! Listing pages of boards served by the university's K2Web CMS.
//!
//! Posts are linked through `.../artclView.do`; the board table row holding a
//! link also carries the post date as `YYYY.MM.DD`.

use lazy_static::lazy_static;
use nw_core::{RawArticle, Result};
use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::debug;

use super::utils;

const POST_LINK: &str = r#"a[href*="artclView.do"]"#;

lazy_static! {
    static ref POST_DATE: Regex = Regex::new(r"\b(20\d{2}\.\d{2}\.\d{2})\b").unwrap();
}

/// Extracts post links from a listing page, in page order.
///
/// Links without an `href` or without visible text are skipped. Relative links
/// are resolved against `list_url`.
pub fn parse_listing(html: &str, list_url: &str) -> Result<Vec<RawArticle>> {
    let base = utils::parse_url(list_url)?;
    let document = Html::parse_document(html);
    let links = utils::selector(POST_LINK)?;

    let mut items = Vec::new();
    for link in document.select(&links) {
        let href = link.value().attr("href").unwrap_or("").trim();
        if href.is_empty() {
            continue;
        }

        let title = utils::element_text(&link);
        if title.is_empty() {
            continue;
        }

        let url = if href.starts_with("http") {
            href.to_string()
        } else {
            match base.join(href) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    debug!("Skipping unresolvable link {}: {}", href, e);
                    continue;
                }
            }
        };

        items.push(RawArticle {
            title,
            date: row_date(&link),
            url,
        });
    }

    Ok(items)
}

fn row_date(link: &ElementRef) -> Option<String> {
    let row = link
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "tr")?;
    let text = utils::element_text(&row);
    POST_DATE
        .captures(&text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
