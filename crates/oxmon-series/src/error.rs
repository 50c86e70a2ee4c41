/// Errors raised when a series argument has the wrong shape.
///
/// These always point at the check expression rather than the backend: a
/// reducer was handed something that is not a series, or a collection of
/// series that cannot be combined pointwise.
///
/// # Examples
///
/// ```rust
/// use oxmon_series::error::SeriesShapeError;
///
/// let err = SeriesShapeError::DifferingLengths { expected: 3, found: 2, index: 1 };
/// assert!(err.to_string().contains("differing lengths"));
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesShapeError {
    /// A value that should be a list of optional numbers was something else.
    #[error("expecting time series")]
    ExpectingTimeSeries,

    /// A value that should be a list of time series was something else.
    #[error("expecting multi series")]
    ExpectingMultiSeries,

    /// Member series of a multi series do not share one length.
    #[error("series are differing lengths: expected {expected}, series {index} has {found}")]
    DifferingLengths {
        expected: usize,
        found: usize,
        index: usize,
    },

    /// The operation needs at least one sample (or one member series).
    #[error("empty series")]
    Empty,

    /// The weighted average was seeded with an absent sample.
    #[error("weighted average cannot start from a null sample")]
    NullSeed,
}

/// Convenience type alias so callers can write `error::Result<T>`.
pub type Result<T> = std::result::Result<T, SeriesShapeError>;
