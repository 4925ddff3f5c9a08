use async_trait::async_trait;
use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait Summarizer: Send + Sync {
    fn name(&self) -> &str;

    /// Produce a short plain-text summary of the post behind `article.url`
    async fn summarize(&self, article: &Article) -> Result<String>;
}
