//! Deterministic partitioning of the payment history
//!
//! Every aggregation splits the history the same way, so sequential and
//! parallel paths see identical partitions and produce identical results.

use crate::types::{LedgerError, Money, Payment};
use std::ops::Range;

/// Worker count actually used for a requested count; zero means one
pub fn effective_workers(workers: usize) -> usize {
    workers.max(1)
}

/// Split `len` items into contiguous ranges for `workers` workers
///
/// Each range holds `ceil(len / workers)` items except the last, which holds
/// the remainder. Only non-empty ranges are produced, so at most
/// `min(workers, len)` ranges come back and they cover `0..len` in order.
pub fn partition_bounds(len: usize, workers: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let size = len.div_ceil(effective_workers(workers));

    (0..len)
        .step_by(size)
        .map(|start| start..(start.saturating_add(size)).min(len))
        .collect()
}

/// Sum of payment amounts with overflow checking
pub fn checked_sum(payments: &[Payment]) -> Result<Money, LedgerError> {
    payments.iter().try_fold(0 as Money, |total, payment| {
        total
            .checked_add(payment.amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("sum_payments", 0))
    })
}
