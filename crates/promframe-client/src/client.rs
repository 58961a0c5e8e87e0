//! HTTP client for the Prometheus range-query API.
//!
//! This is the external collaborator the core store deliberately does not
//! contain: it performs the `GET /api/v1/query_range` call and hands the
//! body to `promframe-metrics` for decoding. There is no retry policy here;
//! transport failures surface to the caller.
//!
//! # Example
//!
//! ```rust,no_run
//! use promframe_client::{PrometheusClient, QueryWindow, queries};
//!
//! # async fn example() -> Result<(), promframe_client::ClientError> {
//! let client = PrometheusClient::new("http://localhost:9090")?;
//! let window = QueryWindow::last_hours(4, 60);
//! let store = client
//!     .fetch_store(&queries::cpu_utilization_by_container("prod"), &window)
//!     .await?;
//! println!("got {} series", store.len());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use tracing::debug;
use url::Url;

use promframe_metrics::{MetricStore, RangeResponse};

use crate::error::{ClientError, Result};
use crate::window::QueryWindow;

/// Default request timeout.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The range-query API path, relative to the server base URL.
const QUERY_RANGE_PATH: &str = "api/v1/query_range";

/// Client for one Prometheus server.
#[derive(Debug, Clone)]
pub struct PrometheusClient {
    /// Server base URL, without the API path.
    base_url: Url,
    /// The underlying HTTP client.
    http: reqwest::Client,
    /// Per-request timeout.
    request_timeout: Duration,
}

impl PrometheusClient {
    /// Creates a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUrl` if the URL does not parse or is not
    /// `http`/`https`.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl {
            reason: e.to_string(),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl {
                reason: format!("unsupported scheme {:?}", base_url.scheme()),
            });
        }
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Sets the per-request timeout.
    pub fn set_request_timeout(&mut self, timeout: Duration) {
        self.request_timeout = timeout;
    }

    /// Returns the server base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Issues a range query and returns the raw response body.
    ///
    /// The body is returned untouched so callers can snapshot it to disk in
    /// its original wire form and re-read it later.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` on connect/timeout/read failures and
    /// `ClientError::Status` on a non-success HTTP status.
    pub async fn query_range_raw(&self, query: &str, window: &QueryWindow) -> Result<String> {
        let url = self.endpoint_url()?;

        debug!(url = %url, step = window.step_seconds, "issuing range query");

        let response = self
            .http
            .get(url.clone())
            .query(&[
                ("query", query),
                ("start", &window.start_epoch().to_string()),
                ("end", &window.end_epoch().to_string()),
                ("step", &window.step_seconds.to_string()),
            ])
            .timeout(self.request_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!(url = %url, bytes = body.len(), "range query complete");
        Ok(body)
    }

    /// Issues a range query and decodes the response body.
    ///
    /// # Errors
    ///
    /// As [`PrometheusClient::query_range_raw`], plus
    /// `MetricsError::MalformedBody` (via `ClientError::Metrics`) when the
    /// body is not a range-query response.
    pub async fn query_range(&self, query: &str, window: &QueryWindow) -> Result<RangeResponse> {
        let body = self.query_range_raw(query, window).await?;
        Ok(RangeResponse::from_json_str(&body)?)
    }

    /// Issues a range query and builds a validated metric store from it.
    ///
    /// # Errors
    ///
    /// As [`PrometheusClient::query_range`], plus every store construction
    /// error (non-success status, inconsistent schema, bad samples).
    pub async fn fetch_store(&self, query: &str, window: &QueryWindow) -> Result<MetricStore> {
        let response = self.query_range(query, window).await?;
        Ok(MetricStore::from_response(&response)?)
    }

    fn endpoint_url(&self) -> Result<Url> {
        // Keep any path prefix the base URL carries (e.g. /prometheus).
        let joined = format!(
            "{}/{QUERY_RANGE_PATH}",
            self.base_url.as_str().trim_end_matches('/')
        );
        Url::parse(&joined).map_err(|e| ClientError::InvalidUrl {
            reason: e.to_string(),
        })
    }
}
