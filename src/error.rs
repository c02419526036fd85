//! Error types for wiki-info.
//!
//! Absent fields are not errors: extraction returns `Option` for those. The
//! variants here cover the auxiliary fetch path and configuration problems.

/// Error type for fetch and lookup operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The auxiliary page could not be fetched (network error or HTTP status).
    #[error("Fetching {url} failed: {message}")]
    Fetch {
        /// Requested URL.
        url: String,
        /// Transport or status description.
        message: String,
    },

    /// The auxiliary page did not answer within the fetch timeout.
    #[error("Fetching {url} timed out after {timeout_ms} ms")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Timeout that elapsed.
        timeout_ms: u128,
    },

    /// A URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// No site model is registered for the host.
    #[error("No site model registered for host {0}")]
    UnsupportedSite(String),

    /// Stored wiki data could not be (de)serialized.
    #[error("Wiki data JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for wiki-info operations.
pub type Result<T> = std::result::Result<T, Error>;
