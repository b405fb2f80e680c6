//! Admin API client for the usage and cost reporting endpoints.
//!
//! One [`AdminApiClient`] is constructed per credential and handed by
//! reference to every call; there is no ambient shared HTTP state. The
//! usage fetch is the core output and propagates every failure; the cost
//! fetch is best-effort and degrades to an empty result so a cost-reporting
//! outage never blocks usage reporting.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{CostBucket, CostReportResponse, TimeWindow, UsageBucket, UsageReportResponse};
use crate::timeframe::Timeframe;

/// Protocol version header required by the Admin API.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Grouping dimension for the usage report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Model,
    ApiKeyId,
}

impl GroupBy {
    pub fn as_query_value(&self) -> &'static str {
        match self {
            GroupBy::Model => "model",
            GroupBy::ApiKeyId => "api_key_id",
        }
    }
}

/// HTTP client for the organization reporting endpoints.
pub struct AdminApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl AdminApiClient {
    /// Build a client around one admin API key.
    ///
    /// The key travels in the `x-api-key` default header on every request;
    /// the timeout bounds each call end to end.
    pub fn new(admin_api_key: &str, config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        let mut key_value =
            HeaderValue::from_str(admin_api_key).map_err(|_| ApiError::CredentialUnavailable)?;
        key_value.set_sensitive(true);
        headers.insert("x-api-key", key_value);
        headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch day-bucketed usage rows over the window.
    ///
    /// Any non-success status or transport failure is returned as an error;
    /// the caller aborts the whole refresh on it.
    pub async fn fetch_usage(
        &self,
        window: &TimeWindow,
        group_by: Option<GroupBy>,
    ) -> Result<Vec<UsageBucket>, ApiError> {
        let url = format!("{}/organizations/usage_report/messages", self.base_url);

        let mut query = vec![
            ("starting_at", window.starting_at()),
            ("ending_at", window.ending_at()),
            ("bucket_width", "1d".to_string()),
        ];
        if let Some(group_by) = group_by {
            query.push(("group_by[]", group_by.as_query_value().to_string()));
        }

        debug!(url = %url, group_by = ?group_by, "fetching usage report");

        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::from_status(status));
        }

        let body: UsageReportResponse = response.json().await.map_err(ApiError::from_reqwest)?;
        Ok(body.data)
    }

    /// Fetch day-bucketed cost rows covering the window.
    ///
    /// The cost endpoint only understands whole days, so the window is
    /// widened to day bounds first. Best-effort: every failure is logged
    /// and collapses to an empty bucket list.
    pub async fn fetch_cost(&self, window: &TimeWindow) -> Vec<CostBucket> {
        let widened = window.widened_to_day_bounds();
        match self.fetch_cost_buckets(&widened).await {
            Ok(buckets) => buckets,
            Err(err) => {
                warn!(error = %err, "cost fetch failed, reporting zero cost");
                Vec::new()
            }
        }
    }

    async fn fetch_cost_buckets(&self, window: &TimeWindow) -> Result<Vec<CostBucket>, ApiError> {
        let url = format!("{}/organizations/cost_report", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("starting_at", window.starting_at()),
                ("ending_at", window.ending_at()),
            ])
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::from_status(status));
        }

        let body: CostReportResponse = response.json().await.map_err(ApiError::from_reqwest)?;
        Ok(body.data)
    }

    /// Validate the credential with a minimal usage request for today.
    pub async fn test_connection(&self) -> Result<(), ApiError> {
        let window = TimeWindow::resolve(Timeframe::Today);
        self.fetch_usage(&window, None).await.map(|_| ())
    }
}
