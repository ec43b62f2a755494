//! TRON Wallet Monitor - Headless Server
//!
//! Polls TronGrid for new USDT (TRC20) transfers on registered wallet
//! addresses and pushes a wallet report to each address's Telegram chat.

mod config;
mod db;
mod telegram;

use clap::Parser;
use config::ServerConfig;
use db::Database;
use std::time::Duration;
use telegram::TelegramNotifier;
use tokio_util::sync::CancellationToken;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use tronwatch_chain::{RetryPolicy, RetryingFetcher, TronGridClient, TRONGRID_BASE_URL};
use tronwatch_monitor::{MonitorConfig, StateFile, WalletMonitor};

/// Wallet Monitor CLI
#[derive(Parser, Debug)]
#[command(name = "tronwatch")]
#[command(about = "TRON USDT wallet transfer monitor", long_about = None)]
struct Args {
    /// Seconds between poll cycles
    #[arg(short = 'i', long, default_value_t = 45)]
    poll_interval: u64,

    /// Maximum simultaneous address checks
    #[arg(short = 'c', long, default_value_t = 5)]
    concurrency: usize,

    /// Flush dedup state every N cycles
    #[arg(long, default_value_t = 10)]
    flush_every: u64,

    /// Attempts per chain API call before giving up
    #[arg(long, default_value_t = 3)]
    retries: u32,

    /// Dedup state file path (overrides STATE_FILE)
    #[arg(long)]
    state_file: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let server_config = ServerConfig::from_env()?;
    let state_path = args
        .state_file
        .unwrap_or_else(|| server_config.state_path.clone());

    info!(
        database_url = %server_config.database_url,
        state_file = %state_path,
        poll_interval = args.poll_interval,
        concurrency = args.concurrency,
        "Starting wallet monitor"
    );

    let db = Database::connect(&server_config.database_url).await?;
    let notifier = TelegramNotifier::new(&server_config.bot_token);

    let fetcher = RetryingFetcher::with_policy(RetryPolicy {
        attempts: args.retries,
        ..RetryPolicy::default()
    });
    let client = TronGridClient::with_base_url(TRONGRID_BASE_URL, fetcher);

    let monitor_config = MonitorConfig {
        poll_interval: Duration::from_secs(args.poll_interval),
        concurrency: args.concurrency,
        flush_every: args.flush_every,
        ..MonitorConfig::default()
    };

    let monitor = WalletMonitor::new(client, db, notifier, StateFile::new(&state_path))
        .with_config(monitor_config);

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received, flushing state");
            shutdown.cancel();
        }
    });

    monitor.run(cancel).await?;
    info!("Wallet monitor stopped");
    Ok(())
}
