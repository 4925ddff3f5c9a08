use async_trait::async_trait;
use nw_core::{Error, Result, SeenState, StateStore};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Seen-state kept as a pretty-printed UTF-8 JSON object mapping board name
/// to an array of identities.
///
/// The file is read once per run and overwritten once per run. There is no
/// locking, so two runs must never share a path.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load(&self) -> Result<SeenState> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No state file at {}, starting empty", self.path.display());
                return Ok(SeenState::new());
            }
            Err(e) => {
                return Err(Error::State(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        serde_json::from_str(&text)
            .map_err(|e| Error::State(format!("Malformed state file {}: {}", self.path.display(), e)))
    }

    async fn save(&self, state: &SeenState) -> Result<()> {
        let text = serde_json::to_string_pretty(state)?;
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|e| Error::State(format!("Failed to write {}: {}", self.path.display(), e)))?;
        debug!("Saved state for {} boards to {}", state.len(), self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nw_core::ErrorKind as NwErrorKind;
    use tempfile::tempdir;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_state() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_keeps_order() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));

        let mut state = SeenState::new();
        state.set("학사공지", ids(&["102", "101", "100", "99", "98"]));
        state.set("장학/학자금공지", ids(&["7", "https://www.mju.ac.kr/x?y=1", "3"]));
        state.set("행사공지", vec![]);
        store.save(&state).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, state);
        assert_eq!(
            loaded.ids("장학/학자금공지").unwrap(),
            ids(&["7", "https://www.mju.ac.kr/x?y=1", "3"]).as_slice()
        );
    }

    #[tokio::test]
    async fn test_file_is_readable_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = JsonFileStore::new(&path);

        let mut state = SeenState::new();
        state.set("학사공지", ids(&["1"]));
        store.save(&state).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("학사공지"));
        assert!(text.contains("\n  \"학사공지\": [\n    \"1\"\n  ]"));
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));

        let mut state = SeenState::new();
        state.set("a", ids(&["1", "2", "3"]));
        store.save(&state).await.unwrap();

        let mut state = SeenState::new();
        state.set("b", ids(&["9"]));
        store.save(&state).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert!(!loaded.contains_board("a"));
        assert_eq!(loaded.ids("b").unwrap(), ["9"]);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_state_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{\"a\": [\"1\",").unwrap();

        let err = JsonFileStore::new(&path).load().await.unwrap_err();
        assert_eq!(err.kind(), NwErrorKind::State);
        assert!(!err.is_recoverable());
    }

    #[tokio::test]
    async fn test_unwritable_path_is_a_state_error() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("missing").join("state.json"));
        let err = store.save(&SeenState::new()).await.unwrap_err();
        assert_eq!(err.kind(), NwErrorKind::State);
    }
}
