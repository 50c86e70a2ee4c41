use oxmon_graphite::error::FetchError;
use oxmon_series::error::SeriesShapeError;

/// Errors raised while reading or evaluating a check expression.
///
/// Every variant ends the check as UNKNOWN; the runner never retries.
///
/// # Examples
///
/// ```rust
/// use oxmon_check::error::EvalError;
/// use oxmon_series::error::SeriesShapeError;
///
/// let err: EvalError = SeriesShapeError::ExpectingTimeSeries.into();
/// assert_eq!(err.to_string(), "expecting time series");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// The expression text is not well formed.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("unbound symbol: {0}")]
    UnboundSymbol(String),

    /// The head of a call form evaluated to something other than a function.
    #[error("not a function: {0}")]
    NotCallable(String),

    #[error("{name}: expected {expected} argument(s), got {found}")]
    Arity {
        name: String,
        expected: &'static str,
        found: usize,
    },

    #[error("{name}: expected {expected}, got {found}")]
    Type {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0}")]
    Arithmetic(String),

    /// A series reducer was handed a malformed series.
    #[error(transparent)]
    Series(#[from] SeriesShapeError),

    /// `get-metrics` failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Errors detected before any evaluation starts.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// Required inputs (method, thresholds) are missing.
    #[error("{0}")]
    Usage(String),

    /// The configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}
