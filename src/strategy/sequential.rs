//! Sequential query strategy
//!
//! Single-threaded iterator scans over the payment history. This is the
//! reference path the parallel strategy is measured and tested against.

use crate::core::partition::checked_sum;
use crate::core::Ledger;
use crate::strategy::{PaymentPredicate, QueryStrategy};
use crate::types::{AccountId, LedgerError, Money, Payment};

/// Sequential query strategy
#[derive(Debug, Clone, Copy)]
pub struct SequentialStrategy;

impl QueryStrategy for SequentialStrategy {
    fn sum_payments(&self, ledger: &Ledger) -> Result<Money, LedgerError> {
        checked_sum(ledger.payments())
    }

    fn filter_payments(
        &self,
        ledger: &Ledger,
        account_id: AccountId,
    ) -> Result<Vec<Payment>, LedgerError> {
        ledger.find_account_by_id(account_id)?;

        Ok(ledger
            .payments()
            .iter()
            .filter(|payment| payment.account_id == account_id)
            .cloned()
            .collect())
    }

    fn filter_payments_by_fn(
        &self,
        ledger: &Ledger,
        predicate: PaymentPredicate,
    ) -> Result<Vec<Payment>, LedgerError> {
        Ok(ledger
            .payments()
            .iter()
            .filter(|payment| predicate(*payment))
            .cloned()
            .collect())
    }
}
