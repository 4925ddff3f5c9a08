use std::sync::Arc;

use nw_core::{Error, Result, Summarizer};

pub mod models;

pub use models::lead::LeadSummarizer;

/// Picks a summarizer by name. `none` disables summaries.
pub fn create_model(name: &str) -> Result<Option<Arc<dyn Summarizer>>> {
    match name {
        "lead" => Ok(Some(Arc::new(LeadSummarizer::new()?))),
        "none" => Ok(None),
        other => Err(Error::Config(format!(
            "Unknown summarizer: {} (expected lead or none)",
            other
        ))),
    }
}

pub mod prelude {
    pub use super::create_model;
    pub use super::models::lead::LeadSummarizer;
    pub use nw_core::{Article, Error, Result};
}
