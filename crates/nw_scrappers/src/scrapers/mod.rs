use async_trait::async_trait;
use nw_core::{http, ArticleSource, Board, RawArticle, Result};
use reqwest::Client;

pub mod k2web;

/// Reads the first listing page of a board over HTTP.
#[derive(Debug, Clone)]
pub struct ListingScraper {
    client: Client,
}

impl ListingScraper {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: http::build_client()?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ArticleSource for ListingScraper {
    async fn list_articles(&self, board: &Board) -> Result<Vec<RawArticle>> {
        let html = http::fetch_text(&self.client, &board.url).await?;
        k2web::parse_listing(&html, &board.url)
    }
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use nw_core::{Error, Result};
    use scraper::{ElementRef, Selector};
    use url::Url;

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::Upstream(format!("Failed to parse URL {}: {}", url, e)))
    }

    pub fn selector(css: &str) -> Result<Selector> {
        Selector::parse(css).map_err(|e| Error::Upstream(format!("Invalid selector {}: {:?}", css, e)))
    }

    /// All text below `el`, whitespace runs collapsed to single spaces.
    pub fn element_text(el: &ElementRef) -> String {
        collapse_whitespace(&el.text().collect::<Vec<_>>().join(" "))
    }

    pub fn collapse_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_parse_url() {
        assert!(utils::parse_url("https://www.mju.ac.kr/mjukr/257/subview.do").is_ok());
        assert!(utils::parse_url("invalid-url").is_err());
    }

    #[test]
    fn test_selector() {
        assert!(utils::selector(r#"a[href*="artclView.do"]"#).is_ok());
        assert!(utils::selector("a[").is_err());
    }

    #[test]
    fn test_element_text() {
        let html = Html::parse_fragment("<p>  2024학년도 <strong>1학기</strong>\n\t수강신청 <span></span> 안내 </p>");
        let p = html.select(&utils::selector("p").unwrap()).next().unwrap();
        assert_eq!(utils::element_text(&p), "2024학년도 1학기 수강신청 안내");
    }

    #[test]
    fn test_with_client() {
        let scraper = ListingScraper::with_client(Client::new());
        let _source: &dyn ArticleSource = &scraper;
    }
}
