//! Core Data Models
//!
//! This module defines the data structures used throughout the usage tracker,
//! covering both the wire format of the remote reporting endpoints and the
//! aggregated report handed to the display layer.
//!
//! ## Data Flow
//!
//! 1. **Wire types**: [`UsageBucket`] / [`CostBucket`] - day buckets decoded
//!    from the Admin API responses, with absent fields defaulting to zero
//! 2. **Aggregation**: [`UsageFigures`] - token and cost totals accumulated
//!    across buckets
//! 3. **Output**: [`AggregateReport`] - per-model and per-credential
//!    summaries for display or JSON export
//!
//! The session-limits endpoint has its own payload, [`SessionUsageSnapshot`],
//! which is decoded directly and never merged with the aggregation path.
//!
//! ## Defaulting
//!
//! Every numeric field on the wire types carries `#[serde(default)]`: the
//! reporting endpoints omit fields that are zero for a bucket, and a missing
//! field means zero, not an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Token and cost totals for one summary line or for the whole report.
///
/// Forms a monoid under `+` with [`UsageFigures::default`] as identity.
/// `total_tokens` is always `input_tokens + output_tokens`; construct via
/// [`UsageFigures::from_tokens`] to keep the invariant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct UsageFigures {
    #[serde(rename = "inputTokens")]
    pub input_tokens: u64,
    #[serde(rename = "outputTokens")]
    pub output_tokens: u64,
    #[serde(rename = "totalTokens")]
    pub total_tokens: u64,
    #[serde(rename = "costUSD")]
    pub cost_usd: f64,
}

impl UsageFigures {
    pub fn from_tokens(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
            cost_usd: 0.0,
        }
    }
}

impl Add for UsageFigures {
    type Output = UsageFigures;

    fn add(self, other: UsageFigures) -> UsageFigures {
        UsageFigures {
            input_tokens: self.input_tokens + other.input_tokens,
            output_tokens: self.output_tokens + other.output_tokens,
            total_tokens: self.total_tokens + other.total_tokens,
            cost_usd: self.cost_usd + other.cost_usd,
        }
    }
}

impl AddAssign for UsageFigures {
    fn add_assign(&mut self, other: UsageFigures) {
        *self = *self + other;
    }
}

/// Usage rolled up under one friendly model name.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub figures: UsageFigures,
}

/// Usage rolled up under one API credential.
///
/// Rows without an attributable credential collapse into the synthetic
/// `workbench` entry (interactive console usage).
#[derive(Debug, Clone, Serialize)]
pub struct CredentialSummary {
    #[serde(rename = "credentialId")]
    pub credential_id: String,
    #[serde(rename = "displayHint")]
    pub display_hint: String,
    pub figures: UsageFigures,
}

/// One refresh cycle's complete output.
///
/// Both breakdowns are sorted by `total_tokens` descending; ties keep the
/// order in which the name was first seen in the response, so the same input
/// always renders the same report.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub total: UsageFigures,
    #[serde(rename = "byModel")]
    pub by_model: Vec<ModelSummary>,
    #[serde(rename = "byCredential")]
    pub by_credential: Vec<CredentialSummary>,
}

/// A concrete UTC start/end pair resolved from a timeframe token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Query-parameter form of the window start (`YYYY-MM-DDTHH:MM:SSZ`).
    pub fn starting_at(&self) -> String {
        self.start.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    /// Query-parameter form of the window end (`YYYY-MM-DDTHH:MM:SSZ`).
    pub fn ending_at(&self) -> String {
        self.end.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

// ---------------------------------------------------------------------------
// Usage report wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct UsageReportResponse {
    #[serde(default)]
    pub data: Vec<UsageBucket>,
}

/// One day's worth of usage rows for a grouping dimension.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageBucket {
    #[serde(default)]
    pub results: Vec<UsageRow>,
}

/// A single result row within a day bucket.
///
/// Which grouping key is present depends on the `group_by[]` the request
/// asked for: `model` for model grouping, `api_key_id` for credential
/// grouping. Absent token counts mean zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageRow {
    pub model: Option<String>,
    pub api_key_id: Option<String>,
    #[serde(default)]
    pub uncached_input_tokens: u64,
    #[serde(default)]
    pub cache_read_input_tokens: u64,
    #[serde(default)]
    pub cache_creation: CacheCreation,
    #[serde(default)]
    pub output_tokens: u64,
}

/// Cache-write token counts, split by ephemeral cache TTL.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CacheCreation {
    #[serde(default)]
    pub ephemeral_1h_input_tokens: u64,
    #[serde(default)]
    pub ephemeral_5m_input_tokens: u64,
}

// ---------------------------------------------------------------------------
// Cost report wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CostReportResponse {
    #[serde(default)]
    pub data: Vec<CostBucket>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CostBucket {
    #[serde(default)]
    pub results: Vec<CostRow>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CostRow {
    #[serde(default)]
    pub amount: f64,
}

// ---------------------------------------------------------------------------
// Session usage (rolling quota) wire format
// ---------------------------------------------------------------------------

/// Rolling quota utilization snapshot from the session usage endpoint.
///
/// Every category is independently optional: accounts on tiers without a
/// given limit simply do not receive that key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionUsageSnapshot {
    pub five_hour: Option<LimitWindow>,
    pub seven_day: Option<LimitWindow>,
    pub seven_day_sonnet: Option<LimitWindow>,
    pub extra_usage: Option<ExtraUsage>,
}

/// Consumption of one rolling quota window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitWindow {
    /// Percent of the window consumed; may exceed 100 during overage.
    #[serde(default)]
    pub utilization: f64,
    pub resets_at: Option<String>,
}

/// Supplemental metered credits beyond the standard quota.
///
/// `used_credits` and `monthly_limit` are in minor currency units (cents).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraUsage {
    #[serde(default)]
    pub is_enabled: bool,
    #[serde(default)]
    pub used_credits: u64,
    #[serde(default)]
    pub monthly_limit: u64,
    #[serde(default)]
    pub utilization: f64,
}
