//! Session usage poller for the rolling quota endpoint.
//!
//! Independent of the aggregation path: its own client, its own cadence
//! (owned by the caller), and its own failure policy. Absence of a snapshot
//! is a first-class, displayable state, so every failure here collapses to
//! `None` rather than an error.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use tracing::{debug, warn};

use crate::models::SessionUsageSnapshot;

/// Fixed session-utilization endpoint.
const SESSION_USAGE_URL: &str = "https://api.anthropic.com/api/oauth/usage";

/// Feature-flag marker the endpoint requires.
const OAUTH_BETA_FLAG: &str = "oauth-2025-04-20";

/// Client-identity string the endpoint expects.
const CLIENT_IDENTITY: &str = "claude-code/2.1.34";

const POLL_TIMEOUT: Duration = Duration::from_secs(10);

/// Single-call client for the session-utilization snapshot.
pub struct SessionUsagePoller {
    http: reqwest::Client,
    endpoint: String,
}

impl Default for SessionUsagePoller {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionUsagePoller {
    pub fn new() -> Self {
        Self::with_endpoint(SESSION_USAGE_URL)
    }

    /// Point the poller at a non-default endpoint (tests).
    pub fn with_endpoint(endpoint: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("anthropic-beta", HeaderValue::from_static(OAUTH_BETA_FLAG));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(CLIENT_IDENTITY)
            .timeout(POLL_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http,
            endpoint: endpoint.to_string(),
        }
    }

    /// Fetch one utilization snapshot with the given bearer token.
    ///
    /// Non-success status, transport failure, and undecodable bodies all
    /// yield `None`; the display layer renders that as a neutral state.
    pub async fn poll(&self, bearer_token: &str) -> Option<SessionUsageSnapshot> {
        let response = match self
            .http
            .get(&self.endpoint)
            .bearer_auth(bearer_token)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "session usage request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "session usage endpoint returned non-success");
            return None;
        }

        match response.json::<SessionUsageSnapshot>().await {
            Ok(snapshot) => {
                debug!("session usage snapshot received");
                Some(snapshot)
            }
            Err(err) => {
                warn!(error = %err, "session usage response not decodable");
                None
            }
        }
    }
}
