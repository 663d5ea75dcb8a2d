//! # Marble Node
//!
//! Runs a single marble exchange function and prints its result.
//!
//! ```text
//! marble-node [--ledger PATH | --in-memory] <function> [args...]
//! ```
//!
//! Payments are verified against the Horizon server named by
//! `--horizon-url` or `MARBLE_HORIZON_URL`. Logs go to stderr and honour
//! `RUST_LOG`.

mod config;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use marble_exchange::{
    ExchangeConfig, FileLedger, HorizonClient, InMemoryLedger, LedgerStore, MarbleExchangeService,
};

use crate::config::{apply_overrides, load_config};

/// Marble exchange node
#[derive(Parser, Debug)]
#[command(name = "marble-node")]
#[command(about = "Invoke marble exchange functions against a ledger")]
struct Args {
    /// Ledger file shared across invocations
    #[arg(short, long, default_value = "marbles-ledger.json")]
    ledger: PathBuf,

    /// Use a throwaway in-memory ledger instead of the ledger file
    #[arg(long, conflicts_with = "ledger")]
    in_memory: bool,

    /// Horizon server base URL
    #[arg(long)]
    horizon_url: Option<String>,

    /// Horizon request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Function to invoke (e.g. init_owner, payment_complete_against_offer)
    function: String,

    /// Function arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

async fn run<L: LedgerStore>(
    ledger: L,
    config: ExchangeConfig,
    function: &str,
    args: &[String],
) -> Result<ExitCode> {
    let payments =
        HorizonClient::new(&config.horizon).context("Failed to create Horizon client")?;
    let service = MarbleExchangeService::new(ledger, payments, config);

    let response = service.invoke(function, args).await;
    if !response.is_ok() {
        eprintln!("Error: {}", response.message);
        return Ok(ExitCode::FAILURE);
    }

    let mut stdout = std::io::stdout().lock();
    if response.payload.is_empty() {
        writeln!(stdout, "OK")?;
    } else {
        stdout.write_all(&response.payload)?;
        writeln!(stdout)?;
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    // Load configuration
    let config = apply_overrides(load_config(), args.horizon_url, args.timeout);
    info!(
        horizon = %config.horizon.base_url,
        function = %args.function,
        "[marbles] Starting marble node"
    );

    if args.in_memory {
        run(InMemoryLedger::new(), config, &args.function, &args.args).await
    } else {
        let ledger = FileLedger::open(&args.ledger)
            .with_context(|| format!("Failed to open ledger {}", args.ledger.display()))?;
        run(ledger, config, &args.function, &args.args).await
    }
}
