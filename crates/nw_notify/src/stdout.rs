use async_trait::async_trait;
use nw_core::{Dispatcher, NewPostsByBoard, Result};

use crate::render::{now_kst, render};

/// Prints the message instead of sending it. Used for dry runs.
#[derive(Debug, Clone, Default)]
pub struct StdoutDispatcher;

#[async_trait]
impl Dispatcher for StdoutDispatcher {
    fn name(&self) -> &str {
        "stdout"
    }

    async fn dispatch(&self, posts: &NewPostsByBoard) -> Result<()> {
        let message = render(posts, now_kst());
        println!("Subject: {}\n\n{}", message.subject, message.text);
        Ok(())
    }
}
