use async_trait::async_trait;
use nw_core::{Result, SeenState, StateStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Keeps the seen-state in process memory. Nothing survives the process.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<Option<SeenState>>>,
    saves: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: SeenState) -> Self {
        Self {
            state: Arc::new(RwLock::new(Some(state))),
            saves: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Last saved (or initial) state, if any.
    pub async fn snapshot(&self) -> Option<SeenState> {
        self.state.read().await.clone()
    }

    /// Number of completed saves.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self) -> Result<SeenState> {
        Ok(self.state.read().await.clone().unwrap_or_default())
    }

    async fn save(&self, state: &SeenState) -> Result<()> {
        *self.state.write().await = Some(state.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory://".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(store.load().await.unwrap().is_empty());
        assert!(store.snapshot().await.is_none());

        let mut state = SeenState::new();
        state.set("학사공지", vec!["102".to_string(), "101".to_string()]);
        store.save(&state).await.unwrap();

        assert_eq!(store.load().await.unwrap(), state);
        assert_eq!(store.snapshot().await, Some(state));
        assert_eq!(store.saves(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStore::with_state(SeenState::new());
        let handle = store.clone();

        let mut state = SeenState::new();
        state.set("a", vec!["1".to_string()]);
        handle.save(&state).await.unwrap();

        assert_eq!(store.load().await.unwrap().ids("a").unwrap(), ["1"]);
        assert_eq!(store.saves(), 1);
    }
}
