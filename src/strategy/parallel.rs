//! Parallel query strategy
//!
//! This module provides a multi-threaded implementation of the QueryStrategy
//! trait. Each call snapshots the payment history and hands it to the
//! [`Aggregator`], which splits it into contiguous partitions processed on a
//! tokio multi-threaded runtime owned by the strategy.
//!
//! # Architecture
//!
//! ```text
//! ParallelStrategy
//!     ├── WorkerConfig (workers)
//!     ├── tokio Runtime (at most one worker thread per CPU)
//!     └── Aggregator (partition → spawn → join → fold)
//! ```
//!
//! The strategy blocks on its own runtime, so it must not be called from
//! inside another async context. Async callers use [`SharedLedger`]
//! instead.
//!
//! [`SharedLedger`]: crate::core::SharedLedger

use crate::core::{Aggregator, Ledger};
use crate::strategy::{PaymentPredicate, QueryStrategy};
use crate::types::{AccountId, LedgerError, Money, Payment};
use tokio::runtime::Runtime;

/// Configuration for parallel aggregation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Number of partitions
    pub workers: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
        }
    }
}

impl WorkerConfig {
    /// Create a WorkerConfig, falling back to the default for zero
    pub fn new(workers: usize) -> Self {
        if workers == 0 {
            let default = Self::default();
            tracing::warn!(
                workers,
                default = default.workers,
                "invalid worker count, using default"
            );
            return default;
        }

        Self { workers }
    }
}

/// Parallel query strategy
#[derive(Debug)]
pub struct ParallelStrategy {
    config: WorkerConfig,
    runtime: Runtime,
}

impl ParallelStrategy {
    /// Create a strategy with its own multi-threaded runtime
    ///
    /// # Errors
    ///
    /// Returns `WorkerFailed` if the runtime cannot be built.
    pub fn new(config: WorkerConfig) -> Result<Self, LedgerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(config.workers.clamp(1, num_cpus::get().max(1)))
            .thread_name("ledger-worker")
            .build()
            .map_err(|e| LedgerError::worker_failed(format!("failed to build runtime: {}", e)))?;

        Ok(Self { config, runtime })
    }
}

impl QueryStrategy for ParallelStrategy {
    fn sum_payments(&self, ledger: &Ledger) -> Result<Money, LedgerError> {
        let aggregator = Aggregator::new(ledger.payments_snapshot());
        self.runtime
            .block_on(aggregator.sum(self.config.workers))
    }

    fn filter_payments(
        &self,
        ledger: &Ledger,
        account_id: AccountId,
    ) -> Result<Vec<Payment>, LedgerError> {
        ledger.find_account_by_id(account_id)?;

        let aggregator = Aggregator::new(ledger.payments_snapshot());
        self.runtime
            .block_on(aggregator.filter_by_account(account_id, self.config.workers))
    }

    fn filter_payments_by_fn(
        &self,
        ledger: &Ledger,
        predicate: PaymentPredicate,
    ) -> Result<Vec<Payment>, LedgerError> {
        let aggregator = Aggregator::new(ledger.payments_snapshot());
        self.runtime.block_on(
            aggregator.filter(move |payment| predicate(payment), self.config.workers),
        )
    }
}
