//! Numeric time series and the reducers used by check expressions.
//!
//! A [`TimeSeries`] is an ordered run of optional samples where `None`
//! marks a gap reported by the backend. A [`MultiSeries`] groups several
//! series of identical length, typically the result of a wildcard metric
//! match. The reducers in [`ops`] are pure and never touch I/O.

pub mod error;
pub mod ops;

#[cfg(test)]
mod tests;

use error::{Result, SeriesShapeError};

/// Default smoothing factor for [`ops::ewma`].
pub const DEFAULT_ALPHA: f64 = 0.4;

/// Ordered samples of one metric; `None` is a gap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries(Vec<Option<f64>>);

impl TimeSeries {
    pub fn new(samples: Vec<Option<f64>>) -> Self {
        Self(samples)
    }

    pub fn samples(&self) -> &[Option<f64>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Option<f64>> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<Option<f64>> {
        self.0
    }
}

impl From<Vec<Option<f64>>> for TimeSeries {
    fn from(samples: Vec<Option<f64>>) -> Self {
        Self(samples)
    }
}

impl FromIterator<Option<f64>> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = Option<f64>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A non-empty collection of equally long series.
///
/// # Examples
///
/// ```rust
/// use oxmon_series::{MultiSeries, TimeSeries};
///
/// let ok = MultiSeries::new(vec![
///     TimeSeries::new(vec![Some(1.0), Some(2.0)]),
///     TimeSeries::new(vec![Some(3.0), None]),
/// ]);
/// assert!(ok.is_ok());
///
/// let ragged = MultiSeries::new(vec![
///     TimeSeries::new(vec![Some(1.0), Some(2.0)]),
///     TimeSeries::new(vec![Some(3.0)]),
/// ]);
/// assert!(ragged.is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSeries(Vec<TimeSeries>);

impl MultiSeries {
    /// Validates the collection: at least one member, all of one length.
    pub fn new(series: Vec<TimeSeries>) -> Result<Self> {
        let expected = series.first().ok_or(SeriesShapeError::Empty)?.len();
        if let Some((index, odd)) = series
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, s)| s.len() != expected)
        {
            return Err(SeriesShapeError::DifferingLengths {
                expected,
                found: odd.len(),
                index,
            });
        }
        Ok(Self(series))
    }

    pub fn members(&self) -> &[TimeSeries] {
        &self.0
    }

    /// Number of member series.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length shared by every member series.
    pub fn series_len(&self) -> usize {
        self.0[0].len()
    }

    pub fn into_inner(self) -> Vec<TimeSeries> {
        self.0
    }
}
