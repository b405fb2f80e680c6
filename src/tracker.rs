//! Refresh Orchestration
//!
//! [`UsageTracker`] drives one refresh cycle: resolve the timeframe to a
//! window, issue the three report fetches concurrently, and combine them
//! into a single immutable [`AggregateReport`] for the caller. The tracker
//! holds no state between refreshes; periodic re-invocation is the caller's
//! job and the only recovery mechanism.
//!
//! The two usage fetches are failure-coupled - either both contribute or the
//! refresh fails - while the cost fetch degrades to zero cost on its own.

use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::admin_api::{AdminApiClient, GroupBy};
use crate::aggregation;
use crate::error::ApiError;
use crate::models::{AggregateReport, TimeWindow};
use crate::timeframe::Timeframe;

pub struct UsageTracker {
    client: AdminApiClient,
}

impl UsageTracker {
    pub fn new(client: AdminApiClient) -> Self {
        Self { client }
    }

    /// Run one refresh cycle for the timeframe.
    ///
    /// On success the caller owns the returned report; on failure no partial
    /// report is produced and the caller keeps whatever it had before.
    pub async fn refresh(&self, timeframe: Timeframe) -> Result<AggregateReport, ApiError> {
        let refresh_id = Uuid::new_v4();
        let span = info_span!("refresh", %refresh_id, timeframe = timeframe.as_str());

        async {
            let window = TimeWindow::resolve(timeframe);

            let (model_buckets, credential_buckets, cost_buckets) = futures::join!(
                self.client.fetch_usage(&window, Some(GroupBy::Model)),
                self.client.fetch_usage(&window, Some(GroupBy::ApiKeyId)),
                self.client.fetch_cost(&window),
            );

            let model_buckets = model_buckets?;
            let credential_buckets = credential_buckets?;

            let report = aggregation::combine(&model_buckets, &credential_buckets, &cost_buckets);
            info!(
                total_tokens = report.total.total_tokens,
                cost_usd = report.total.cost_usd,
                models = report.by_model.len(),
                credentials = report.by_credential.len(),
                "refresh complete"
            );
            Ok(report)
        }
        .instrument(span)
        .await
    }
}
