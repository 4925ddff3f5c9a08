use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Detail page error: {0}")]
    Detail(String),

    #[error("State error: {0}")]
    State(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Notification error: {0}")]
    Notify(String),
}

/// Coarse failure classes a caller can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed settings.
    Config,
    /// A board listing could not be fetched or parsed.
    Upstream,
    /// A single post's detail page failed; the post degrades to no summary.
    Detail,
    /// The persisted seen-state could not be read or written.
    State,
    /// The notification transport failed.
    Notify,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::Upstream(_) | Error::Http(_) => ErrorKind::Upstream,
            Error::Detail(_) => ErrorKind::Detail,
            Error::State(_) | Error::Io(_) | Error::Serialization(_) => ErrorKind::State,
            Error::Notify(_) => ErrorKind::Notify,
        }
    }

    /// Only per-post detail failures are absorbed by a run.
    pub fn is_recoverable(&self) -> bool {
        self.kind() == ErrorKind::Detail
    }
}

pub type Result<T> = std::result::Result<T, Error>;
