use crate::error::{FetchError, Result};
use crate::{normalize, MetricData, MetricFetcher, MetricQuery, SeriesPayload};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;

/// Default request timeout for render API calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking client for the Graphite render API.
///
/// Calls are sequential; a check that fetches several metrics waits for
/// each response in turn. No retries are attempted.
pub struct GraphiteClient {
    client: Client,
    timeout: Duration,
}

impl GraphiteClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()?;

        Ok(Self { client, timeout })
    }

    fn transport_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Network(err)
        }
    }
}

impl MetricFetcher for GraphiteClient {
    fn fetch(&self, query: &MetricQuery) -> Result<MetricData> {
        let from = format!("-{}", query.interval);
        let mut request = self.client.get(&query.endpoint).query(&[
            ("target", query.metric.as_str()),
            ("format", "json"),
            ("from", from.as_str()),
        ]);

        if let Some(credentials) = &query.credentials {
            request = request.basic_auth(&credentials.username, credentials.password.as_deref());
        }

        tracing::debug!(
            metric = %query.metric,
            endpoint = %query.endpoint,
            from = %from,
            auth = query.credentials.is_some(),
            "--> render request"
        );

        let response = request.send().map_err(|e| self.transport_error(e))?;
        let status = response.status();

        match status {
            StatusCode::NOT_FOUND => {
                tracing::warn!(metric = %query.metric, "Render API returned 404");
                return Err(FetchError::MetricNotFound(query.metric.clone()));
            }
            StatusCode::UNAUTHORIZED => {
                tracing::warn!(endpoint = %query.endpoint, "Render API rejected credentials");
                return Err(FetchError::AuthenticationFailed);
            }
            _ => {}
        }

        let body = response.text().map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), metric = %query.metric, "Render API error");
            return Err(FetchError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Vec<SeriesPayload> = serde_json::from_str(&body)?;
        let targets: Vec<&str> = payload.iter().filter_map(|s| s.target.as_deref()).collect();
        tracing::debug!(
            metric = %query.metric,
            series = payload.len(),
            targets = ?targets,
            "<-- render response"
        );

        normalize(&query.metric, payload)
    }
}
