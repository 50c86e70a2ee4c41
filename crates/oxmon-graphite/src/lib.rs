//! Metric retrieval from a Graphite-compatible render API.
//!
//! A metric name resolves to either one [`TimeSeries`] or, when the backend
//! matches several targets (e.g. a wildcard), one series per target in
//! response order. Timestamps are discarded; only the value column is kept.

pub mod client;
pub mod error;


use oxmon_series::TimeSeries;
use serde::de::IgnoredAny;
use serde::Deserialize;

pub use client::GraphiteClient;

/// HTTP basic-auth credentials for the render API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// One render request: `GET {endpoint}?target={metric}&format=json&from=-{interval}`.
#[derive(Debug, Clone)]
pub struct MetricQuery {
    pub metric: String,
    pub endpoint: String,
    pub interval: String,
    pub credentials: Option<Credentials>,
}

/// A resolved metric.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricData {
    /// The backend returned exactly one series.
    Single(TimeSeries),
    /// The backend returned several series. Lengths are whatever the backend
    /// sent; consumers that combine them pointwise validate the shape.
    Multi(Vec<TimeSeries>),
}

impl MetricData {
    /// Number of series carried.
    pub fn series_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi(series) => series.len(),
        }
    }
}

/// Source of metric data, abstracted so checks can run against a stub.
pub trait MetricFetcher: Send + Sync {
    fn fetch(&self, query: &MetricQuery) -> error::Result<MetricData>;
}

/// One element of the render API's JSON array. Fields other than
/// `datapoints` are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct SeriesPayload {
    #[serde(default)]
    pub target: Option<String>,
    pub datapoints: Vec<(Option<f64>, IgnoredAny)>,
}

impl SeriesPayload {
    fn into_series(self) -> TimeSeries {
        self.datapoints.into_iter().map(|(value, _)| value).collect()
    }
}

/// Normalize the render API's array into [`MetricData`].
pub(crate) fn normalize(metric: &str, mut payload: Vec<SeriesPayload>) -> error::Result<MetricData> {
    match payload.len() {
        0 => Err(error::FetchError::MetricNotFound(metric.to_string())),
        1 => {
            let only = payload.remove(0);
            Ok(MetricData::Single(only.into_series()))
        }
        _ => Ok(MetricData::Multi(
            payload.into_iter().map(SeriesPayload::into_series).collect(),
        )),
    }
}
