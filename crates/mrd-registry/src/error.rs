//! Registry error types.

use thiserror::Error;

/// Errors that can occur when querying the package index.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// HTTP transport error (includes client-side timeouts).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Index API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the index.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The index returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}
