use crate::core::{LedgerConfig, RejectPolicy};
use crate::strategy::WorkerConfig;
use crate::types::AccountId;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Inspect and convert wallet ledger dumps
#[derive(Parser, Debug)]
#[command(name = "wallet-ledger")]
#[command(about = "Inspect and convert wallet ledger dumps", long_about = None)]
pub struct CliArgs {
    /// Aggregation strategy used for payment queries
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "parallel",
        global = true,
        help = "Query strategy: 'sequential' or 'parallel'"
    )]
    pub strategy: StrategyType,

    /// Number of partitions for parallel queries
    #[arg(
        long = "workers",
        value_name = "COUNT",
        global = true,
        help = "Number of parallel query workers (default: CPU cores)"
    )]
    pub workers: Option<usize>,

    /// What rejecting an already rejected payment does
    #[arg(
        long = "reject-policy",
        value_name = "POLICY",
        default_value = "strict",
        global = true,
        help = "Repeated reject handling: 'strict' or 'recredit'"
    )]
    pub reject_policy: RejectPolicyType,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Import a directory dump and print balances and the payment total
    Summary {
        /// Directory holding accounts.dump, payments.dump and favorites.dump
        #[arg(long, value_name = "DIR")]
        dir: PathBuf,
    },

    /// Import a directory dump and write one account's history in chunks
    History {
        /// Directory holding the dump files
        #[arg(long, value_name = "DIR")]
        dir: PathBuf,

        /// Account whose payments are exported
        #[arg(long, value_name = "ID")]
        account: AccountId,

        /// Directory the history files are written to
        #[arg(long, value_name = "DIR")]
        out: PathBuf,

        /// Maximum payments per file
        #[arg(long, value_name = "RECORDS", default_value_t = 100)]
        chunk: usize,
    },

    /// Convert a single-file account export into a directory dump
    Convert {
        /// Single-file account export
        #[arg(long, value_name = "FILE")]
        file: PathBuf,

        /// Directory the dump is written to
        #[arg(long, value_name = "DIR")]
        out: PathBuf,
    },
}

/// Available strategies for payment aggregations
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sequential,
    Parallel,
}

/// Repeated reject handling selectable from the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RejectPolicyType {
    Strict,
    Recredit,
}

impl From<RejectPolicyType> for RejectPolicy {
    fn from(policy: RejectPolicyType) -> Self {
        match policy {
            RejectPolicyType::Strict => RejectPolicy::Strict,
            RejectPolicyType::Recredit => RejectPolicy::Recredit,
        }
    }
}

impl CliArgs {
    /// Create a WorkerConfig from CLI arguments
    ///
    /// Falls back to the default when `--workers` is absent; an explicit zero
    /// also falls back, with a warning.
    pub fn to_worker_config(&self) -> WorkerConfig {
        match self.workers {
            Some(workers) => WorkerConfig::new(workers),
            None => WorkerConfig::default(),
        }
    }

    pub fn to_ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            reject_policy: self.reject_policy.into(),
        }
    }
}
