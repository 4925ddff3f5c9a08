use std::path::Path;
use std::sync::Arc;

use nw_core::{Error, Result, StateStore};

pub mod backends;

pub use backends::*;

/// Builds the state backend named on the command line.
pub fn create_storage(kind: &str, path: &Path) -> Result<Arc<dyn StateStore>> {
    match kind {
        "json" | "file" => Ok(Arc::new(JsonFileStore::new(path))),
        "memory" => Ok(Arc::new(MemoryStore::new())),
        other => Err(Error::Config(format!(
            "Unknown storage backend: {} (expected json or memory)",
            other
        ))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::create_storage;
}

#[cfg(test)]
mod tests {
    use super::*;
    use nw_core::ErrorKind;

    #[test]
    fn test_create_storage() {
        let path = Path::new("state.json");
        assert_eq!(create_storage("json", path).unwrap().describe(), "state.json");
        assert_eq!(create_storage("memory", path).unwrap().describe(), "memory://");

        let err = create_storage("sqlite", path).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
