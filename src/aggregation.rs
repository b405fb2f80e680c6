//! Report Aggregation Engine
//!
//! Collapses the three raw fetch results (model-grouped usage buckets,
//! credential-grouped usage buckets, cost buckets) into one
//! [`AggregateReport`].
//!
//! ## Token accounting
//!
//! Per-model effective input counts every input-side category: uncached
//! input, cache reads, and both ephemeral cache-write sub-categories.
//! Per-credential effective input counts uncached input and cache reads
//! only. The asymmetry comes from the original tracker and is kept as-is;
//! see DESIGN.md before changing either formula.
//!
//! ## Ordering
//!
//! Accumulation preserves first-encounter order, and the final sort by
//! total tokens is stable, so ties render in the order the API returned
//! them. The same input always produces the same report.

use std::collections::HashMap;

use crate::models::{
    AggregateReport, CostBucket, CredentialSummary, ModelSummary, UsageBucket, UsageFigures,
};

/// Grouping key for usage rows with no credential attribution.
const WORKBENCH_ID: &str = "workbench";

/// Collapse a raw model identifier to its coarse display name.
///
/// Keywords are checked in priority order so an identifier matching more
/// than one resolves consistently: opus, then sonnet, then haiku. Anything
/// else is its own display name.
pub fn friendly_model_name(raw: &str) -> String {
    let lower = raw.to_lowercase();
    if lower.contains("opus") {
        "Opus".to_string()
    } else if lower.contains("sonnet") {
        "Sonnet".to_string()
    } else if lower.contains("haiku") {
        "Haiku".to_string()
    } else {
        raw.to_string()
    }
}

/// Short display form of a credential identifier.
fn credential_hint(credential_id: &str) -> String {
    if credential_id == WORKBENCH_ID {
        "Workbench".to_string()
    } else if credential_id.len() > 6 {
        format!("...{}", &credential_id[credential_id.len() - 6..])
    } else {
        credential_id.to_string()
    }
}

/// Token totals accumulated per grouping key, preserving first-seen order.
#[derive(Default)]
struct TokenAccumulator {
    order: Vec<String>,
    totals: HashMap<String, (u64, u64)>,
}

impl TokenAccumulator {
    fn add(&mut self, key: &str, input_tokens: u64, output_tokens: u64) {
        if !self.totals.contains_key(key) {
            self.order.push(key.to_string());
        }
        let entry = self.totals.entry(key.to_string()).or_insert((0, 0));
        entry.0 += input_tokens;
        entry.1 += output_tokens;
    }

    fn into_figures(self) -> Vec<(String, UsageFigures)> {
        let TokenAccumulator { order, totals } = self;
        order
            .into_iter()
            .map(|key| {
                let (input, output) = totals[&key];
                let figures = UsageFigures::from_tokens(input, output);
                (key, figures)
            })
            .collect()
    }
}

/// Combine the three fetch results into one report.
pub fn combine(
    model_buckets: &[UsageBucket],
    credential_buckets: &[UsageBucket],
    cost_buckets: &[CostBucket],
) -> AggregateReport {
    // Model breakdown: rows whose raw identifiers share a friendly name
    // merge into one line.
    let mut model_totals = TokenAccumulator::default();
    for bucket in model_buckets {
        for row in &bucket.results {
            let raw_model = row.model.as_deref().unwrap_or("unknown");
            let input = row.uncached_input_tokens
                + row.cache_read_input_tokens
                + row.cache_creation.ephemeral_1h_input_tokens
                + row.cache_creation.ephemeral_5m_input_tokens;
            model_totals.add(&friendly_model_name(raw_model), input, row.output_tokens);
        }
    }

    let mut total = UsageFigures::default();
    let mut by_model: Vec<ModelSummary> = model_totals
        .into_figures()
        .into_iter()
        .map(|(display_name, figures)| {
            total += figures;
            ModelSummary {
                display_name,
                figures,
            }
        })
        .collect();
    by_model.sort_by(|a, b| b.figures.total_tokens.cmp(&a.figures.total_tokens));

    // Credential breakdown. Cache-write tokens are not counted here.
    let mut credential_totals = TokenAccumulator::default();
    for bucket in credential_buckets {
        for row in &bucket.results {
            let credential_id = row.api_key_id.as_deref().unwrap_or(WORKBENCH_ID);
            let input = row.uncached_input_tokens + row.cache_read_input_tokens;
            credential_totals.add(credential_id, input, row.output_tokens);
        }
    }

    let mut by_credential: Vec<CredentialSummary> = credential_totals
        .into_figures()
        .into_iter()
        .map(|(credential_id, figures)| CredentialSummary {
            display_hint: credential_hint(&credential_id),
            credential_id,
            figures,
        })
        .collect();
    by_credential.sort_by(|a, b| b.figures.total_tokens.cmp(&a.figures.total_tokens));

    // Cost attaches to the grand total only, never to individual lines.
    total.cost_usd = cost_buckets
        .iter()
        .flat_map(|bucket| &bucket.results)
        .map(|row| row.amount)
        .sum();

    AggregateReport {
        total,
        by_model,
        by_credential,
    }
}
