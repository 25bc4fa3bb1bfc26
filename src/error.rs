//! Failure kinds raised while serving a single connection.
//!
//! Every variant except [`ServerError::ConnectionClosed`] is turned into an
//! HTTP response at the connection boundary; nothing escapes the task that
//! owns the connection.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The peer closed the stream without sending a request line.
    #[error("connection closed before a request was received")]
    ConnectionClosed,

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("invalid range header: {0}")]
    InvalidRange(String),

    /// Range start lies outside the file. Carries the file size.
    #[error("range not satisfiable for resource of {0} bytes")]
    RangeNotSatisfiable(u64),

    #[error("handler failed: {0:#}")]
    Handler(anyhow::Error),

    #[error("handler panicked: {0}")]
    Panic(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
