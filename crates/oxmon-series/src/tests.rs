use crate::error::SeriesShapeError;
use crate::ops::{ewma, last, max, min, multi_max, multi_min, multi_sum, sum};
use crate::{MultiSeries, TimeSeries, DEFAULT_ALPHA};

fn ts(samples: &[Option<f64>]) -> TimeSeries {
    TimeSeries::new(samples.to_vec())
}

fn multi(series: &[&[Option<f64>]]) -> MultiSeries {
    MultiSeries::new(series.iter().map(|s| ts(s)).collect()).unwrap()
}

#[test]
fn sum_adds_present_samples() {
    assert_eq!(sum(&ts(&[Some(1.0), Some(2.5), Some(3.5)])).unwrap(), 7.0);
    assert_eq!(sum(&ts(&[Some(1.0), None, Some(3.0)])).unwrap(), 4.0);
}

#[test]
fn sum_of_all_gaps_is_zero() {
    assert_eq!(sum(&ts(&[None, None])).unwrap(), 0.0);
}

#[test]
fn reducers_reject_empty_series() {
    let empty = TimeSeries::default();
    assert_eq!(sum(&empty), Err(SeriesShapeError::Empty));
    assert_eq!(max(&empty), Err(SeriesShapeError::Empty));
    assert_eq!(min(&empty), Err(SeriesShapeError::Empty));
    assert_eq!(last(&empty), Err(SeriesShapeError::Empty));
    assert_eq!(ewma(&empty, DEFAULT_ALPHA), Err(SeriesShapeError::Empty));
}

#[test]
fn max_and_min_skip_gaps() {
    let series = ts(&[Some(3.0), None, Some(1.0), Some(5.0)]);
    assert_eq!(max(&series).unwrap(), Some(5.0));
    assert_eq!(min(&series).unwrap(), Some(1.0));
}

#[test]
fn max_and_min_recover_from_leading_gap() {
    let series = ts(&[None, Some(2.0), Some(-4.0)]);
    assert_eq!(max(&series).unwrap(), Some(2.0));
    assert_eq!(min(&series).unwrap(), Some(-4.0));
}

#[test]
fn max_and_min_of_all_gaps_is_none() {
    let series = ts(&[None, None, None]);
    assert_eq!(max(&series).unwrap(), None);
    assert_eq!(min(&series).unwrap(), None);
}

#[test]
fn multi_sum_adds_pointwise() {
    let series = multi(&[&[Some(1.0), Some(2.0)], &[Some(3.0), None]]);
    assert_eq!(multi_sum(&series), ts(&[Some(4.0), Some(2.0)]));
}

#[test]
fn multi_sum_keeps_gap_only_when_every_member_has_one() {
    let series = multi(&[&[None, None], &[Some(3.0), None], &[Some(1.0), None]]);
    assert_eq!(multi_sum(&series), ts(&[Some(4.0), None]));
}

#[test]
fn multi_max_and_min_fold_pointwise() {
    let series = multi(&[&[Some(1.0), Some(5.0)], &[Some(3.0), None]]);
    assert_eq!(multi_max(&series), ts(&[Some(3.0), Some(5.0)]));
    assert_eq!(multi_min(&series), ts(&[Some(1.0), Some(5.0)]));
}

#[test]
fn multi_series_rejects_differing_lengths() {
    let err = MultiSeries::new(vec![ts(&[Some(1.0), Some(2.0)]), ts(&[Some(1.0)])]).unwrap_err();
    assert_eq!(
        err,
        SeriesShapeError::DifferingLengths {
            expected: 2,
            found: 1,
            index: 1
        }
    );
}

#[test]
fn multi_series_rejects_empty_collection() {
    assert_eq!(MultiSeries::new(Vec::new()), Err(SeriesShapeError::Empty));
}

#[test]
fn last_drops_the_final_sample() {
    let series = ts(&[Some(1.0), Some(2.0), Some(3.0)]);
    assert_eq!(last(&series).unwrap(), ts(&[Some(1.0), Some(2.0)]));
    assert_eq!(last(&ts(&[Some(9.0)])).unwrap(), TimeSeries::default());
}

#[test]
fn ewma_of_single_sample_is_that_sample() {
    assert_eq!(ewma(&ts(&[Some(10.0)]), DEFAULT_ALPHA).unwrap(), Some(10.0));
    assert_eq!(ewma(&ts(&[None]), DEFAULT_ALPHA).unwrap(), None);
}

#[test]
fn ewma_follows_recursive_definition() {
    // 20 + 0.4 * (10 - 20) = 16
    let two = ewma(&ts(&[Some(10.0), Some(20.0)]), 0.4).unwrap().unwrap();
    assert!((two - 16.0).abs() < 1e-9);

    // 30 + 0.4 * (16 - 30) = 24.4
    let three = ewma(&ts(&[Some(10.0), Some(20.0), Some(30.0)]), 0.4)
        .unwrap()
        .unwrap();
    assert!((three - 24.4).abs() < 1e-9);
}

#[test]
fn ewma_stops_at_first_gap() {
    let value = ewma(&ts(&[Some(10.0), Some(20.0), None, Some(1000.0)]), 0.4)
        .unwrap()
        .unwrap();
    assert!((value - 16.0).abs() < 1e-9);
}

#[test]
fn ewma_rejects_null_seed() {
    assert_eq!(
        ewma(&ts(&[None, Some(1.0)]), DEFAULT_ALPHA),
        Err(SeriesShapeError::NullSeed)
    );
}
