//! Payment history storage
//!
//! This module provides the PaymentStore component that keeps every payment
//! ever made, in creation order, together with an ID index for constant-time
//! lookup. Payments are never removed; the only in-place change after
//! creation is the status flip on rejection (or an overwrite on import).

use crate::types::{AccountId, LedgerError, Payment, PaymentId, PaymentStatus};
use std::collections::HashMap;
use std::sync::Arc;

/// Ordered payment history with an ID index
#[derive(Debug, Default)]
pub struct PaymentStore {
    /// Payments in creation order
    payments: Vec<Payment>,

    /// Payment ID to position in `payments`
    index: HashMap<PaymentId, usize>,
}

impl PaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a payment
    ///
    /// If a payment with the same ID is already stored, the earlier one stays
    /// the lookup target.
    pub fn insert(&mut self, payment: Payment) -> &Payment {
        let position = self.payments.len();
        self.index.entry(payment.id.clone()).or_insert(position);
        self.payments.push(payment);
        &self.payments[position]
    }

    /// Get a payment by ID
    pub fn get(&self, id: &str) -> Option<&Payment> {
        self.index.get(id).map(|&position| &self.payments[position])
    }

    /// Get a payment by ID, failing with `PaymentNotFound`
    pub fn find(&self, id: &str) -> Result<&Payment, LedgerError> {
        self.get(id).ok_or_else(|| LedgerError::payment_not_found(id))
    }

    /// Set the status of a stored payment
    pub fn set_status(&mut self, id: &str, status: PaymentStatus) -> Result<(), LedgerError> {
        let position = *self
            .index
            .get(id)
            .ok_or_else(|| LedgerError::payment_not_found(id))?;
        self.payments[position].status = status;
        Ok(())
    }

    /// Insert a payment, or overwrite every field of the one with the same ID
    ///
    /// Returns `true` when a new payment was inserted.
    pub fn upsert(&mut self, payment: Payment) -> bool {
        match self.index.get(&payment.id) {
            Some(&position) => {
                self.payments[position] = payment;
                false
            }
            None => {
                self.insert(payment);
                true
            }
        }
    }

    /// Payments of one account, in creation order
    pub fn for_account(&self, account_id: AccountId) -> impl Iterator<Item = &Payment> + '_ {
        self.payments
            .iter()
            .filter(move |payment| payment.account_id == account_id)
    }

    /// All payments in creation order
    pub fn all(&self) -> &[Payment] {
        &self.payments
    }

    /// Owned copy of the history that can be shared with worker tasks
    pub fn snapshot(&self) -> Arc<[Payment]> {
        Arc::from(self.payments.as_slice())
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}
