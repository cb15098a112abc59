//! Query strategy module for payment aggregations
//!
//! This module defines the Strategy pattern for the read-only aggregations over
//! a ledger's payment history. A sequential scan and a partitioned parallel
//! implementation can be selected at runtime and must produce identical
//! results.

use crate::cli::StrategyType;
use crate::core::Ledger;
use crate::types::{AccountId, LedgerError, Money, Payment};
use std::sync::Arc;

pub mod parallel;
pub mod sequential;

pub use parallel::{ParallelStrategy, WorkerConfig};
pub use sequential::SequentialStrategy;

/// Caller-supplied payment filter shared with worker tasks
pub type PaymentPredicate = Arc<dyn Fn(&Payment) -> bool + Send + Sync>;

/// Aggregation strategy over a ledger's payments
///
/// Implementations never mutate the ledger. Results are in payment creation
/// order regardless of how the work is split.
pub trait QueryStrategy: Send + Sync {
    /// Total amount of all payments
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the total does not fit in `Money`.
    fn sum_payments(&self, ledger: &Ledger) -> Result<Money, LedgerError>;

    /// Payments belonging to `account_id`
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist.
    fn filter_payments(
        &self,
        ledger: &Ledger,
        account_id: AccountId,
    ) -> Result<Vec<Payment>, LedgerError>;

    /// Payments for which `predicate` returns true
    fn filter_payments_by_fn(
        &self,
        ledger: &Ledger,
        predicate: PaymentPredicate,
    ) -> Result<Vec<Payment>, LedgerError>;
}

/// Create a query strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - Sequential or Parallel
/// * `config` - Worker configuration for the parallel strategy (ignored for sequential)
///
/// # Errors
///
/// Returns `WorkerFailed` if the parallel strategy's runtime cannot be built.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<WorkerConfig>,
) -> Result<Box<dyn QueryStrategy>, LedgerError> {
    match strategy_type {
        StrategyType::Sequential => Ok(Box::new(SequentialStrategy)),
        StrategyType::Parallel => {
            let config = config.unwrap_or_default();
            Ok(Box::new(ParallelStrategy::new(config)?))
        }
    }
}
