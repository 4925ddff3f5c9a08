use async_trait::async_trait;
use crate::state::SeenState;
use crate::Result;

#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the seen-state, or an empty one when nothing has been stored yet
    async fn load(&self) -> Result<SeenState>;

    /// Replace the stored seen-state
    async fn save(&self, state: &SeenState) -> Result<()>;

    /// Human readable location, for logs
    fn describe(&self) -> String;
}
