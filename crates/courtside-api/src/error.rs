//! Portal API error types.
//!
//! Typed so callers can classify failures without string matching. The
//! engine never retries on its own; these surface to the operator as-is.

use thiserror::Error;

/// Errors that can occur when talking to the portal backend.
#[derive(Debug, Error)]
pub enum PortalError {
    /// Authentication failed (missing or invalid API token).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The addressed record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl PortalError {
    /// Returns `true` if retrying the same call cannot succeed without the
    /// operator changing something first.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            PortalError::AuthenticationFailed(_) | PortalError::NotFound(_)
        )
    }
}
