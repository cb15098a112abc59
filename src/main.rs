//! Wallet Ledger CLI
//!
//! Command-line interface for inspecting and converting ledger dumps.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- summary --dir ./dump
//! cargo run -- --strategy sequential summary --dir ./dump
//! cargo run -- --workers 4 history --dir ./dump --account 1 --out ./history --chunk 50
//! cargo run -- convert --file accounts.txt --out ./dump
//! ```
//!
//! Reports go to stdout; logs go to stderr and are filtered with `RUST_LOG`
//! (default `info`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, unknown account, etc.)

use std::process;
use tracing_subscriber::EnvFilter;
use wallet_ledger::cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let mut output = std::io::stdout();
    if let Err(e) = cli::run(&args, &mut output) {
        tracing::error!(error = %e, kind = ?e.kind(), "command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
