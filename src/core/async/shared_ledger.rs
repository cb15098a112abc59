//! Shared ledger handle for concurrent async callers
//!
//! This module provides the `SharedLedger` struct, a cloneable handle around a
//! single [`Ledger`] guarded by a tokio `RwLock`.
//!
//! # Design
//!
//! - Every mutation takes the write lock, so exactly one mutation is in
//!   flight at a time no matter how many tasks hold a handle
//! - Lookups take the read lock and return owned copies
//! - Aggregations take the read lock only long enough to validate their
//!   arguments and snapshot the payment history, then fan out through the
//!   [`Aggregator`] without holding any lock
//!
//! ```text
//! SharedLedger
//!     └── Arc<RwLock<Ledger>>
//!             ├── AccountManager
//!             ├── PaymentStore  ──snapshot──► Aggregator (one task per partition)
//!             └── FavoriteStore
//! ```

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::Aggregator;
use crate::core::Ledger;
use crate::types::{Account, AccountId, Favorite, LedgerError, Money, Payment};

/// Cloneable, task-safe handle to one ledger
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    /// Wrap a ledger for shared use
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Shared read access for callers that need several reads at once
    pub async fn read(&self) -> RwLockReadGuard<'_, Ledger> {
        self.inner.read().await
    }

    /// Exclusive access, e.g. for imports
    pub async fn write(&self) -> RwLockWriteGuard<'_, Ledger> {
        self.inner.write().await
    }

    pub async fn register_account(&self, phone: &str) -> Result<Account, LedgerError> {
        self.inner.write().await.register_account(phone)
    }

    pub async fn deposit(&self, account_id: AccountId, amount: Money) -> Result<(), LedgerError> {
        self.inner.write().await.deposit(account_id, amount)
    }

    pub async fn pay(
        &self,
        account_id: AccountId,
        amount: Money,
        category: &str,
    ) -> Result<Payment, LedgerError> {
        self.inner.write().await.pay(account_id, amount, category)
    }

    pub async fn reject(&self, payment_id: &str) -> Result<(), LedgerError> {
        self.inner.write().await.reject(payment_id)
    }

    pub async fn repeat(&self, payment_id: &str) -> Result<Payment, LedgerError> {
        self.inner.write().await.repeat(payment_id)
    }

    pub async fn favorite_payment(
        &self,
        payment_id: &str,
        name: &str,
    ) -> Result<Favorite, LedgerError> {
        self.inner.write().await.favorite_payment(payment_id, name)
    }

    pub async fn pay_from_favorite(&self, favorite_id: &str) -> Result<Payment, LedgerError> {
        self.inner.write().await.pay_from_favorite(favorite_id)
    }

    pub async fn find_account_by_id(&self, account_id: AccountId) -> Result<Account, LedgerError> {
        self.inner
            .read()
            .await
            .find_account_by_id(account_id)
            .cloned()
    }

    pub async fn find_payment_by_id(&self, payment_id: &str) -> Result<Payment, LedgerError> {
        self.inner
            .read()
            .await
            .find_payment_by_id(payment_id)
            .cloned()
    }

    pub async fn find_favorite_by_id(&self, favorite_id: &str) -> Result<Favorite, LedgerError> {
        self.inner
            .read()
            .await
            .find_favorite_by_id(favorite_id)
            .cloned()
    }

    pub async fn export_account_history(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Payment>, LedgerError> {
        self.inner.read().await.export_account_history(account_id)
    }

    /// Total amount of all payments, computed over `workers` partitions
    pub async fn sum_payments(&self, workers: usize) -> Result<Money, LedgerError> {
        let snapshot = self.inner.read().await.payments_snapshot();
        Aggregator::new(snapshot).sum(workers).await
    }

    /// Payments of one account, computed over `workers` partitions
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` before any work is dispatched if the account
    /// does not exist.
    pub async fn filter_payments(
        &self,
        account_id: AccountId,
        workers: usize,
    ) -> Result<Vec<Payment>, LedgerError> {
        let snapshot = {
            let ledger = self.inner.read().await;
            ledger.find_account_by_id(account_id)?;
            ledger.payments_snapshot()
        };
        Aggregator::new(snapshot)
            .filter_by_account(account_id, workers)
            .await
    }

    /// Payments matching `predicate`, computed over `workers` partitions
    pub async fn filter_payments_by_fn<P>(
        &self,
        predicate: P,
        workers: usize,
    ) -> Result<Vec<Payment>, LedgerError>
    where
        P: Fn(&Payment) -> bool + Send + Sync + 'static,
    {
        let snapshot = self.inner.read().await.payments_snapshot();
        Aggregator::new(snapshot).filter(predicate, workers).await
    }
}
