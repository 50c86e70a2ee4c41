//! Reducers over [`TimeSeries`] and [`MultiSeries`].
//!
//! Every reducer rejects an empty series with [`SeriesShapeError::Empty`].
//! Gaps (`None`) never contribute to a result; a result is `None` only when
//! no present sample was seen.

use crate::error::{Result, SeriesShapeError};
use crate::{MultiSeries, TimeSeries};

/// Sum of present samples. Gaps count as zero.
pub fn sum(series: &TimeSeries) -> Result<f64> {
    non_empty(series)?;
    Ok(series.iter().flatten().sum())
}

/// Largest present sample, or `None` when every sample is a gap.
pub fn max(series: &TimeSeries) -> Result<Option<f64>> {
    fold_extreme(series, |candidate, current| candidate > current)
}

/// Smallest present sample, or `None` when every sample is a gap.
pub fn min(series: &TimeSeries) -> Result<Option<f64>> {
    fold_extreme(series, |candidate, current| candidate < current)
}

/// Pointwise sum across member series.
///
/// A gap at index `i` contributes nothing; the result at `i` is `None` only
/// when every member has a gap there.
pub fn multi_sum(series: &MultiSeries) -> TimeSeries {
    fold_pointwise(series, |acc, value| acc + value)
}

/// Pointwise maximum across member series.
pub fn multi_max(series: &MultiSeries) -> TimeSeries {
    fold_pointwise(series, |acc, value| if value > acc { value } else { acc })
}

/// Pointwise minimum across member series.
pub fn multi_min(series: &MultiSeries) -> TimeSeries {
    fold_pointwise(series, |acc, value| if value < acc { value } else { acc })
}

/// Every sample except the final one.
///
/// This drops the newest sample (usually still being filled in by the
/// backend) and returns the remaining prefix, not the most recent value.
pub fn last(series: &TimeSeries) -> Result<TimeSeries> {
    non_empty(series)?;
    let prefix = &series.samples()[..series.len() - 1];
    Ok(TimeSeries::new(prefix.to_vec()))
}

/// Exponentially weighted moving average.
///
/// Seeds with the first sample and folds each following sample `x` as
/// `x + alpha * (acc - x)`. Smoothing stops at the first gap and the value
/// accumulated so far is returned.
pub fn ewma(series: &TimeSeries, alpha: f64) -> Result<Option<f64>> {
    let (&seed, rest) = series
        .samples()
        .split_first()
        .ok_or(SeriesShapeError::Empty)?;

    if rest.is_empty() {
        return Ok(seed);
    }

    let mut acc = seed.ok_or(SeriesShapeError::NullSeed)?;
    for &sample in rest {
        match sample {
            Some(x) => acc = x + alpha * (acc - x),
            None => break,
        }
    }
    Ok(Some(acc))
}

fn non_empty(series: &TimeSeries) -> Result<()> {
    if series.is_empty() {
        Err(SeriesShapeError::Empty)
    } else {
        Ok(())
    }
}

/// Left fold seeded with the first sample. `replaces(candidate, current)`
/// decides whether a present sample displaces the current extreme; a `None`
/// extreme is displaced by any present sample.
fn fold_extreme(series: &TimeSeries, replaces: impl Fn(f64, f64) -> bool) -> Result<Option<f64>> {
    let (&first, rest) = series
        .samples()
        .split_first()
        .ok_or(SeriesShapeError::Empty)?;

    Ok(rest.iter().flatten().fold(first, |current, &candidate| match current {
        Some(c) if !replaces(candidate, c) => Some(c),
        _ => Some(candidate),
    }))
}

fn fold_pointwise(series: &MultiSeries, combine: impl Fn(f64, f64) -> f64) -> TimeSeries {
    let members = series.members();
    (0..series.series_len())
        .map(|i| {
            members.iter().fold(None, |acc, member| match (acc, member.samples()[i]) {
                (Some(a), Some(v)) => Some(combine(a, v)),
                (None, Some(v)) => Some(v),
                (acc, None) => acc,
            })
        })
        .collect()
}
