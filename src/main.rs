use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;

use claude_usage_tracker::admin_api::AdminApiClient;
use claude_usage_tracker::config::get_config;
use claude_usage_tracker::credentials;
use claude_usage_tracker::display::DisplayManager;
use claude_usage_tracker::error::ApiError;
use claude_usage_tracker::logging::init_logging;
use claude_usage_tracker::session_usage::SessionUsagePoller;
use claude_usage_tracker::timeframe::Timeframe;
use claude_usage_tracker::UsageTracker;

#[derive(Parser)]
#[command(name = "claude-usage-tracker")]
#[command(about = "Usage and cost reporting for Anthropic API accounts")]
#[command(version = "1.0.1")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show token usage and cost for a timeframe
    Report {
        /// Timeframe: today, 7days, or 30days
        #[arg(long)]
        timeframe: Option<String>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Show rolling session quota utilization
    Limits {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Validate the configured admin API key
    Check,
    /// Store an admin API key in the credential store
    SetKey {
        /// The admin API key (sk-ant-admin-...)
        key: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Report {
        timeframe: None,
        json: false,
    }) {
        Commands::Report { timeframe, json } => match run_report(timeframe, json).await {
            Ok(_) => Ok(()),
            Err(e) => handle_error(e, json),
        },
        Commands::Limits { json } => {
            run_limits(json).await;
            Ok(())
        }
        Commands::Check => run_check().await,
        Commands::SetKey { key } => run_set_key(&key),
    }
}

async fn run_report(timeframe: Option<String>, json: bool) -> Result<()> {
    let config = get_config();

    let timeframe = Timeframe::parse(
        timeframe
            .as_deref()
            .unwrap_or(&config.refresh.default_timeframe),
    );

    let api_key = credentials::admin_api_key(config).ok_or(ApiError::CredentialUnavailable)?;
    let client = AdminApiClient::new(&api_key, &config.api)?;
    let tracker = UsageTracker::new(client);

    let report = tracker.refresh(timeframe).await?;
    DisplayManager::new().display_report(&report, timeframe, json);
    Ok(())
}

async fn run_limits(json: bool) {
    // No token and poll failure render the same way: no snapshot.
    let snapshot = match credentials::bearer_token() {
        Some(token) => SessionUsagePoller::new().poll(&token).await,
        None => None,
    };
    DisplayManager::new().display_limits(snapshot.as_ref(), json);
}

async fn run_check() -> Result<()> {
    let config = get_config();

    let api_key = match credentials::admin_api_key(config) {
        Some(key) => key,
        None => {
            eprintln!("❌ No admin API key found (keychain, ANTHROPIC_ADMIN_API_KEY, or config)");
            process::exit(1);
        }
    };

    let client = AdminApiClient::new(&api_key, &config.api)?;
    match client.test_connection().await {
        Ok(()) => {
            println!("✅ Connected successfully");
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            process::exit(1);
        }
    }
}

fn run_set_key(key: &str) -> Result<()> {
    if credentials::store_admin_api_key(key) {
        println!("API key stored in keychain");
        Ok(())
    } else {
        eprintln!("Could not store the key in the credential store on this platform.");
        eprintln!("Set ANTHROPIC_ADMIN_API_KEY or add it to the config file instead.");
        process::exit(1);
    }
}

fn handle_error(e: anyhow::Error, json: bool) -> Result<()> {
    if json {
        println!("{{\"error\": \"{}\"}}", e);
    } else {
        eprintln!("Error: {}", e);
    }
    process::exit(1);
}
