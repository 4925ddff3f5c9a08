//! Stable identities for listed posts.
//!
//! Boards link posts as `/bbs/<site>/<board no>/<post no>/artclView.do`. The
//! post number is the identity when present, otherwise the whole URL is.

use std::cmp::Reverse;
use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use crate::types::{Article, RawArticle};

lazy_static! {
    static ref POST_ID: Regex = Regex::new(r"/bbs/[^/]+/\d+/(\d+)/artclView\.do").unwrap();
}

/// Resolves the deduplication key for a post URL.
pub fn resolve_identity(url: &str) -> String {
    if let Some(id) = POST_ID.captures(url).and_then(|c| c.get(1)) {
        return id.as_str().to_string();
    }
    normalize_url(url)
}

fn normalize_url(url: &str) -> String {
    Url::parse(url.trim())
        .map(|u| u.to_string())
        .unwrap_or_else(|_| url.trim().to_string())
}

/// Sort key of an identity: its integer value when it is all ASCII digits, else 0.
pub fn ordinal(id: &str) -> u128 {
    if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
        id.parse().unwrap_or(0)
    } else {
        0
    }
}

/// Turns one page of raw entries into articles, newest first.
///
/// Entries sharing an identity collapse into one: the entry seen last on the
/// page wins, placed where the identity first appeared. The result is then
/// stably sorted by [`ordinal`] descending, so URL identities trail in page order.
pub fn collect_listing(raw: Vec<RawArticle>) -> Vec<Article> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut articles: Vec<Article> = Vec::with_capacity(raw.len());

    for entry in raw {
        let id = resolve_identity(&entry.url);
        match slots.get(&id) {
            Some(&slot) => articles[slot] = Article::from_raw(id, entry),
            None => {
                slots.insert(id.clone(), articles.len());
                articles.push(Article::from_raw(id, entry));
            }
        }
    }

    articles.sort_by_key(|a| Reverse(ordinal(&a.id)));
    articles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, url: &str) -> RawArticle {
        RawArticle {
            title: title.to_string(),
            date: None,
            url: url.to_string(),
        }
    }

    #[test]
    fn test_resolve_numeric_identity() {
        assert_eq!(
            resolve_identity("https://www.mju.ac.kr/bbs/mjukr/143/215432/artclView.do"),
            "215432"
        );
        assert_eq!(
            resolve_identity("https://www.mju.ac.kr/bbs/mjukr/143/215432/artclView.do?page=2&srchColumn="),
            "215432"
        );
    }

    #[test]
    fn test_resolve_falls_back_to_url() {
        assert_eq!(
            resolve_identity("https://www.mju.ac.kr/mjukr/257/subview.do?enc=abc"),
            "https://www.mju.ac.kr/mjukr/257/subview.do?enc=abc"
        );
        assert_eq!(resolve_identity("  https://example.com "), "https://example.com/");
        assert_eq!(resolve_identity("not a url"), "not a url");
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal("102"), 102);
        assert_eq!(ordinal("007"), 7);
        assert_eq!(ordinal(""), 0);
        assert_eq!(ordinal("-5"), 0);
        assert_eq!(ordinal("12a"), 0);
        assert_eq!(ordinal("https://example.com/1"), 0);
        assert_eq!(ordinal("١٢"), 0);
    }

    #[test]
    fn test_collect_sorts_numeric_desc_and_url_last() {
        let articles = collect_listing(vec![
            raw("no id a", "https://example.com/a"),
            raw("99", "https://x.kr/bbs/s/1/99/artclView.do"),
            raw("no id b", "https://example.com/b"),
            raw("101", "https://x.kr/bbs/s/1/101/artclView.do"),
            raw("100", "https://x.kr/bbs/s/1/100/artclView.do"),
        ]);
        let ids: Vec<_> = articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["101", "100", "99", "https://example.com/a", "https://example.com/b"]
        );
    }

    #[test]
    fn test_collect_last_write_wins() {
        let articles = collect_listing(vec![
            raw("pinned copy", "https://x.kr/bbs/s/1/7/artclView.do"),
            raw("other", "https://example.com/other"),
            raw("listed copy", "https://x.kr/bbs/s/1/7/artclView.do?page=1"),
        ]);
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].id, "7");
        assert_eq!(articles[0].title, "listed copy");
        assert_eq!(articles[0].url, "https://x.kr/bbs/s/1/7/artclView.do?page=1");
        assert!(articles.iter().all(|a| a.summary.is_none()));
    }

    #[test]
    fn test_collect_keeps_first_position_for_url_ids() {
        let articles = collect_listing(vec![
            raw("a1", "https://example.com/a"),
            raw("b", "https://example.com/b"),
            raw("a2", "https://example.com/a"),
        ]);
        let titles: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["a2", "b"]);
    }
}
