use async_trait::async_trait;
use crate::types::{Board, RawArticle};
use crate::Result;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Fetch the first listing page of `board` and return its entries in page order
    async fn list_articles(&self, board: &Board) -> Result<Vec<RawArticle>>;
}
