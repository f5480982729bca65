//! Error types for the rd-api crate.
//!
//! This module provides the [`ApiError`] type for errors that can occur
//! while talking to the upstream REST API.

/// Errors that can occur during upstream requests.
///
/// # Error Recovery Strategy
///
/// - **Per-entity failures** ([`ApiError::Status`], [`ApiError::Decode`],
///   [`ApiError::MissingField`]): recoverable. The entity stays unresolved;
///   sibling fetches are unaffected.
/// - **Transport failures** ([`ApiError::Http`]): recoverable for detail
///   fetches, fatal for the catalog index.
/// - **Cancellation** ([`ApiError::Cancelled`]): not a failure. Callers
///   suppress it instead of reporting it.
///
/// # Examples
///
/// ```
/// use rd_api::ApiError;
///
/// let err = ApiError::status(404, "https://pokeapi.co/api/v2/pokemon/missingno");
/// assert!(err.is_recoverable());
/// assert!(!err.is_cancelled());
/// assert!(err.to_string().contains("404"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Response status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The body was not the expected JSON shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A field required to continue was absent.
    #[error("response is missing '{0}'")]
    MissingField(&'static str),

    /// The request was cancelled before it finished.
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Creates a new [`ApiError::Status`] error.
    #[inline]
    pub fn status(status: u16, url: impl Into<String>) -> Self {
        Self::Status {
            status,
            url: url.into(),
        }
    }

    /// Returns `true` for [`ApiError::Cancelled`].
    #[inline]
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns `true` if the failure only affects the entity being fetched.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !self.is_cancelled()
    }

    /// Returns `true` if the upstream reported that the resource does not exist.
    #[inline]
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}
