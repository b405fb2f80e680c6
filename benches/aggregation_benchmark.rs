use criterion::{black_box, criterion_group, criterion_main, Criterion};

use claude_usage_tracker::aggregation::combine;
use claude_usage_tracker::models::{CacheCreation, CostBucket, CostRow, UsageBucket, UsageRow};

const MODELS: &[&str] = &[
    "claude-opus-4-20250514",
    "claude-opus-4-20250601",
    "claude-sonnet-4-20250514",
    "claude-3-5-sonnet-20241022",
    "claude-3-haiku-20240307",
];

fn usage_buckets(days: usize, rows_per_day: usize, keyed: bool) -> Vec<UsageBucket> {
    (0..days)
        .map(|day| UsageBucket {
            results: (0..rows_per_day)
                .map(|i| UsageRow {
                    model: (!keyed).then(|| MODELS[i % MODELS.len()].to_string()),
                    api_key_id: keyed.then(|| format!("sk-ant-api03-key{:04}", i % 40)),
                    uncached_input_tokens: (day * 1000 + i * 17) as u64,
                    cache_read_input_tokens: (i * 5) as u64,
                    cache_creation: CacheCreation {
                        ephemeral_1h_input_tokens: (i % 3) as u64,
                        ephemeral_5m_input_tokens: (i % 7) as u64,
                    },
                    output_tokens: (day * 100 + i) as u64,
                })
                .collect(),
        })
        .collect()
}

fn cost_buckets(days: usize) -> Vec<CostBucket> {
    (0..days)
        .map(|day| CostBucket {
            results: vec![CostRow {
                amount: day as f64 * 0.37,
            }],
        })
        .collect()
}

fn benchmark_combine(c: &mut Criterion) {
    let model_buckets = usage_buckets(30, 10, false);
    let credential_buckets = usage_buckets(30, 50, true);
    let costs = cost_buckets(30);

    c.bench_function("combine_30_day_window", |b| {
        b.iter(|| {
            combine(
                black_box(&model_buckets),
                black_box(&credential_buckets),
                black_box(&costs),
            )
        })
    });
}

criterion_group!(benches, benchmark_combine);
criterion_main!(benches);
