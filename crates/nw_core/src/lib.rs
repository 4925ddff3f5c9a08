pub mod config;
pub mod detect;
pub mod error;
pub mod http;
pub mod identity;
pub mod models;
pub mod notify;
pub mod source;
pub mod state;
pub mod storage;
pub mod types;

pub use config::{Policy, WatchConfig};
pub use detect::{detect, Detection};
pub use error::{Error, ErrorKind, Result};
pub use identity::{collect_listing, resolve_identity};
pub use models::Summarizer;
pub use notify::Dispatcher;
pub use source::ArticleSource;
pub use state::SeenState;
pub use storage::StateStore;
pub use types::{Article, Board, BoardPosts, NewPostsByBoard, RawArticle};

pub mod prelude {
    pub use super::{Article, Board, Error, NewPostsByBoard, Result, SeenState, WatchConfig};
}
