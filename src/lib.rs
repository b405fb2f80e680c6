//! Claude Usage Tracker Library
//!
//! A Rust library for reporting usage and cost on an Anthropic API account.
//! It pulls time-bucketed token and cost metrics from the Admin API,
//! collapses them into per-model and per-credential summaries, and
//! separately polls the session-utilization endpoint for rolling quota
//! consumption.
//!
//! ## Core Features
//!
//! - **Timeframe windows**: today / 7 days / 30 days, resolved to concrete
//!   UTC instants with day-aligned widening for the cost endpoint
//! - **Unified aggregation**: model-grouped usage, credential-grouped usage
//!   and cost merged into one deterministic report per refresh
//! - **Graceful degradation**: a cost outage reports zero cost, a session
//!   poll failure reports "no snapshot"; only the usage fetches abort a
//!   refresh
//! - **Flexible output**: colored terminal reports and JSON
//!
//! ## Architecture Overview
//!
//! - [`models`] - Report types and the wire format of the remote endpoints
//! - [`timeframe`] - Named-timeframe resolution and day-bound widening
//! - [`admin_api`] - Admin API client (usage report, cost report)
//! - [`aggregation`] - The combine step producing [`AggregateReport`]
//! - [`session_usage`] - Independent rolling-quota poller
//! - [`reset_time`] - Human-relative reset-instant rendering
//! - [`tracker`] - Refresh orchestration over the above
//! - [`credentials`] - Keychain/environment/config credential resolution
//! - [`display`] - Terminal and JSON rendering
//! - [`config`] - Configuration management with environment overrides
//! - [`logging`] - Structured logging setup
//!
//! ## Main Entry Point
//!
//! The primary interface is [`UsageTracker`], one refresh per call:
//!
//! ```rust,no_run
//! use claude_usage_tracker::admin_api::AdminApiClient;
//! use claude_usage_tracker::config::Config;
//! use claude_usage_tracker::timeframe::Timeframe;
//! use claude_usage_tracker::UsageTracker;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::default();
//! let client = AdminApiClient::new("sk-ant-admin-...", &config.api)?;
//! let tracker = UsageTracker::new(client);
//!
//! let report = tracker.refresh(Timeframe::Today).await?;
//! println!("{} tokens", report.total.total_tokens);
//! # Ok(())
//! # }
//! ```

pub mod admin_api;
pub mod aggregation;
pub mod config;
pub mod credentials;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reset_time;
pub mod session_usage;
pub mod timeframe;
pub mod tracker;

pub use error::ApiError;
pub use models::*;
pub use tracker::UsageTracker;
