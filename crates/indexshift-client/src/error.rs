//! Error types for indexshift-client

use thiserror::Error;

/// Client errors.
///
/// Non-2xx responses are not errors: they come back as an
/// [`IndexResponse`](crate::IndexResponse) for the caller to inspect.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection or protocol failure (C001)
    #[error("[C001] Transport error on {method} {url}: {message}")]
    Transport {
        method: &'static str,
        url: String,
        message: String,
    },

    /// Base address is not usable (C002)
    #[error("[C002] Invalid search-engine address '{0}'. Expected http://host:port or https://host:port")]
    InvalidAddress(String),

    /// HTTP client could not be constructed (C003)
    #[error("[C003] Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Result type alias for ClientError
pub type ClientResult<T> = Result<T, ClientError>;
