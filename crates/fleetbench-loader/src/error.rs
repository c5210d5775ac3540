//! Error types for the REST loader.

use thiserror::Error;

/// Loader errors. None of these are retried.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// The endpoint is not an `http://` URL.
    #[error("invalid endpoint {0:?}: expected http://host:port")]
    InvalidEndpoint(String),

    /// The request never produced an HTTP response.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Io(#[from] std::io::Error),

    /// The response body is not a query result.
    #[error("failed to decode query response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Non-success status without a decodable error message.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The database rejected the statement.
    #[error("query failed: {0}")]
    Remote(String),

    /// A result row does not have the expected shape.
    #[error("unexpected result shape: {0}")]
    UnexpectedShape(String),

    /// Benchmark tables are present and the policy forbids reusing them.
    #[error("benchmark tables already exist: {}", .0.join(", "))]
    TablesExist(Vec<String>),
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;
