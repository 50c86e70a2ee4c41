use std::time::Duration;

/// Errors that can occur when fetching a metric from the Graphite render API.
///
/// # Examples
///
/// ```rust
/// use oxmon_graphite::error::FetchError;
///
/// let err = FetchError::Backend { status: 503, body: "busy".to_string() };
/// assert!(err.is_backend());
/// assert!(err.to_string().contains("503"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The backend answered 404, or answered 200 with no matching series.
    #[error("metric not found: {0}")]
    MetricNotFound(String),

    /// The backend answered 401.
    #[error("bad username/password")]
    AuthenticationFailed,

    /// Any other non-2xx status.
    #[error("graphite backend error: status={status}, body={body}")]
    Backend { status: u16, body: String },

    /// The request did not complete within the configured timeout.
    #[error("graphite request timed out after {0:?}")]
    Timeout(Duration),

    /// An underlying HTTP transport error from `reqwest`.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not the expected JSON shape.
    #[error("invalid graphite response: {0}")]
    Payload(#[from] serde_json::Error),

    /// A setting required to build the request is absent.
    #[error("{0} is not configured")]
    MissingConfig(&'static str),
}

impl FetchError {
    /// True for failures on the backend side: error statuses and timeouts.
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend { .. } | Self::Timeout(_))
    }
}

/// Convenience type alias so callers can write `error::Result<T>`.
pub type Result<T> = std::result::Result<T, FetchError>;
