//! Output Formatting and Display Management
//!
//! Renders one refresh cycle's results for the terminal: a colored usage
//! report with per-model and per-credential breakdowns, and the session
//! limits snapshot. Every view also has a `--json` form for programmatic
//! consumption.
//!
//! The pure helpers [`format_tokens`] and [`format_cost`] are shared with
//! anything else that needs to render counts and amounts.

use colored::Colorize;

use crate::models::{AggregateReport, ExtraUsage, LimitWindow, SessionUsageSnapshot};
use crate::reset_time::format_reset_time;
use crate::timeframe::Timeframe;

/// Compact token count: thousands and millions get a suffix.
pub fn format_tokens(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Currency display: two decimals under $1000, whole thousands-separated
/// dollars above.
pub fn format_cost(amount: f64) -> String {
    if amount >= 1000.0 {
        format!("${}", group_thousands(amount.round() as u64))
    } else {
        format!("${:.2}", amount)
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn limit_line(label: &str, window: Option<&LimitWindow>) -> String {
    match window {
        Some(w) => format!(
            "{}: {}% (resets {})",
            label,
            w.utilization as i64,
            format_reset_time(w.resets_at.as_deref())
        ),
        None => format!("{}: --", label),
    }
}

fn extra_usage_line(extra: Option<&ExtraUsage>) -> String {
    match extra {
        Some(e) if e.is_enabled => format!(
            "Extra: ${:.2}/${:.0} ({}%)",
            e.used_credits as f64 / 100.0,
            e.monthly_limit as f64 / 100.0,
            e.utilization as i64
        ),
        _ => "Extra: disabled".to_string(),
    }
}

pub struct DisplayManager;

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayManager {
    pub fn new() -> Self {
        Self
    }

    pub fn display_report(&self, report: &AggregateReport, timeframe: Timeframe, json_output: bool) {
        if json_output {
            let output = serde_json::json!({
                "timeframe": timeframe.as_str(),
                "report": report,
            });
            match serde_json::to_string_pretty(&output) {
                Ok(json_str) => println!("{}", json_str),
                Err(e) => eprintln!("Error serializing report to JSON: {}", e),
            }
            return;
        }

        println!("\n{}", "=".repeat(60).bright_cyan());
        println!(
            "{}",
            format!("Claude API Usage — {}", timeframe.as_str())
                .bright_white()
                .bold()
        );
        println!("{}", "=".repeat(60).bright_cyan());

        println!(
            "\n{} {} tokens • {} in • {} out • {}\n",
            "📊".bright_yellow(),
            format_tokens(report.total.total_tokens).bright_white().bold(),
            format_tokens(report.total.input_tokens).bright_white(),
            format_tokens(report.total.output_tokens).bright_white(),
            format_cost(report.total.cost_usd).bright_green().bold()
        );

        if !report.by_model.is_empty() {
            println!("{}", "By model:".bright_white().bold());
            for model in &report.by_model {
                println!(
                    "   {}: {} ({} in, {} out)",
                    model.display_name.bright_cyan(),
                    format_tokens(model.figures.total_tokens).bright_white().bold(),
                    format_tokens(model.figures.input_tokens),
                    format_tokens(model.figures.output_tokens)
                );
            }
            println!();
        }

        if !report.by_credential.is_empty() {
            println!("{}", "By API key:".bright_white().bold());
            for credential in &report.by_credential {
                println!(
                    "   {}: {} ({} in, {} out)",
                    credential.display_hint.bright_cyan(),
                    format_tokens(credential.figures.total_tokens)
                        .bright_white()
                        .bold(),
                    format_tokens(credential.figures.input_tokens),
                    format_tokens(credential.figures.output_tokens)
                );
            }
            println!();
        }
    }

    pub fn display_limits(&self, snapshot: Option<&SessionUsageSnapshot>, json_output: bool) {
        if json_output {
            let output = serde_json::json!({ "limits": snapshot });
            match serde_json::to_string_pretty(&output) {
                Ok(json_str) => println!("{}", json_str),
                Err(e) => eprintln!("Error serializing limits to JSON: {}", e),
            }
            return;
        }

        let snapshot = match snapshot {
            Some(snapshot) => snapshot,
            None => {
                println!("{}", "Session usage unavailable".bright_yellow());
                return;
            }
        };

        println!("{}", limit_line("5-hour", snapshot.five_hour.as_ref()));
        println!("{}", limit_line("Weekly", snapshot.seven_day.as_ref()));
        println!("{}", limit_line("Sonnet", snapshot.seven_day_sonnet.as_ref()));
        println!("{}", extra_usage_line(snapshot.extra_usage.as_ref()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tokens() {
        assert_eq!(format_tokens(0), "0");
        assert_eq!(format_tokens(999), "999");
        assert_eq!(format_tokens(1_000), "1.0K");
        assert_eq!(format_tokens(45_300), "45.3K");
        assert_eq!(format_tokens(2_500_000), "2.5M");
    }

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(0.0), "$0.00");
        assert_eq!(format_cost(12.345), "$12.35");
        assert_eq!(format_cost(999.99), "$999.99");
        assert_eq!(format_cost(1000.0), "$1,000");
        assert_eq!(format_cost(1234567.4), "$1,234,567");
    }

    #[test]
    fn test_limit_line() {
        let window = LimitWindow {
            utilization: 42.9,
            resets_at: None,
        };
        assert_eq!(limit_line("5-hour", Some(&window)), "5-hour: 42% (resets --)");
        assert_eq!(limit_line("Weekly", None), "Weekly: --");
    }

    #[test]
    fn test_extra_usage_disabled_regardless_of_numbers() {
        let extra = ExtraUsage {
            is_enabled: false,
            used_credits: 1234,
            monthly_limit: 5000,
            utilization: 24.7,
        };
        assert_eq!(extra_usage_line(Some(&extra)), "Extra: disabled");
        assert_eq!(extra_usage_line(None), "Extra: disabled");
    }

    #[test]
    fn test_extra_usage_enabled() {
        let extra = ExtraUsage {
            is_enabled: true,
            used_credits: 1234,
            monthly_limit: 5000,
            utilization: 24.7,
        };
        assert_eq!(extra_usage_line(Some(&extra)), "Extra: $12.34/$50 (24%)");
    }
}
