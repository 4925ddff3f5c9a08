pub mod config;
pub mod email;
pub mod render;
pub mod stdout;

pub use config::MailConfig;
pub use email::EmailDispatcher;
pub use render::{render, RenderedMessage};
pub use stdout::StdoutDispatcher;

pub mod prelude {
    pub use super::{EmailDispatcher, MailConfig, StdoutDispatcher};
    pub use nw_core::{Dispatcher, NewPostsByBoard, Result};
}
