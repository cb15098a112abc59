//! Partitioned parallel aggregation over the payment history
//!
//! This module provides the `Aggregator` struct, which fans read-only work out
//! over contiguous partitions of a payment snapshot and folds the partial
//! results back together.
//!
//! # Design
//!
//! 1. Compute partition boundaries from the snapshot length and worker count
//! 2. Spawn one tokio task per partition
//! 3. Wait for every task to complete
//! 4. Combine partial results in partition order
//!
//! Because the boundaries are deterministic and partials are combined in
//! partition order, results are identical for every worker count and match a
//! sequential scan. Filter results keep the original relative order.
//!
//! # Thread Safety
//!
//! The snapshot is an `Arc<[Payment]>`; each task only reads its own range
//! and nothing is written while the aggregation runs.

use std::sync::Arc;

use futures::future::join_all;

use crate::core::partition::{checked_sum, effective_workers, partition_bounds};
use crate::types::{AccountId, LedgerError, Money, Payment};

/// Parallel aggregator over a payment snapshot
#[derive(Debug, Clone)]
pub struct Aggregator {
    /// Read-only payment history shared with every worker task
    payments: Arc<[Payment]>,
}

impl Aggregator {
    /// Create an aggregator over a detached payment snapshot
    pub fn new(payments: Arc<[Payment]>) -> Self {
        Self { payments }
    }

    /// Run `work` over every non-empty partition concurrently
    ///
    /// Must be called from within a tokio runtime. A worker count of zero is
    /// treated as one.
    ///
    /// # Returns
    ///
    /// One result per non-empty partition, in partition order.
    ///
    /// # Errors
    ///
    /// Returns `WorkerFailed` if any task panicked or was cancelled.
    pub async fn run<T, F>(&self, workers: usize, work: F) -> Result<Vec<T>, LedgerError>
    where
        F: Fn(&[Payment]) -> T + Send + Sync + 'static,
        T: Send + 'static,
    {
        let workers = effective_workers(workers);
        let work = Arc::new(work);

        let tasks: Vec<_> = partition_bounds(self.payments.len(), workers)
            .into_iter()
            .map(|range| {
                let payments = Arc::clone(&self.payments);
                let work = Arc::clone(&work);
                tokio::spawn(async move { work(&payments[range]) })
            })
            .collect();

        tracing::debug!(
            payments = self.payments.len(),
            workers,
            partitions = tasks.len(),
            "aggregation dispatched"
        );

        join_all(tasks)
            .await
            .into_iter()
            .map(|joined| joined.map_err(|e| LedgerError::worker_failed(e.to_string())))
            .collect()
    }

    /// Total amount of all payments
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the total does not fit in `Money`.
    pub async fn sum(&self, workers: usize) -> Result<Money, LedgerError> {
        let partials = self.run(workers, checked_sum).await?;

        partials.into_iter().try_fold(0 as Money, |total, partial| {
            total
                .checked_add(partial?)
                .ok_or_else(|| LedgerError::arithmetic_overflow("sum_payments", 0))
        })
    }

    /// Payments of one account, in original order
    pub async fn filter_by_account(
        &self,
        account_id: AccountId,
        workers: usize,
    ) -> Result<Vec<Payment>, LedgerError> {
        self.filter(move |payment| payment.account_id == account_id, workers)
            .await
    }

    /// Payments matching `predicate`, in original order
    pub async fn filter<P>(&self, predicate: P, workers: usize) -> Result<Vec<Payment>, LedgerError>
    where
        P: Fn(&Payment) -> bool + Send + Sync + 'static,
    {
        let partials = self
            .run(workers, move |partition: &[Payment]| -> Vec<Payment> {
                partition
                    .iter()
                    .filter(|payment| predicate(*payment))
                    .cloned()
                    .collect()
            })
            .await?;

        Ok(partials.into_iter().flatten().collect())
    }
}
