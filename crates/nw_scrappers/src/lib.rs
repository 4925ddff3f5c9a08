pub mod logging;
pub mod manager;
pub mod scrapers;

pub use logging::{init_logging, Logger};
pub use manager::{BoardReport, RunPhase, RunReport, WatchManager};
pub use scrapers::ListingScraper;

pub mod prelude {
    pub use super::manager::{RunReport, WatchManager};
    pub use super::scrapers::ListingScraper;
    pub use nw_core::{Article, Error, Result};
}
