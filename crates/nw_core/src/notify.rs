use async_trait::async_trait;
use crate::types::NewPostsByBoard;
use crate::Result;

#[async_trait]
pub trait Dispatcher: Send + Sync {
    fn name(&self) -> &str;

    /// Deliver one message covering every new post of the run
    async fn dispatch(&self, posts: &NewPostsByBoard) -> Result<()>;
}
