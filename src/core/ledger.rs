//! Ledger state machine
//!
//! This module provides the Ledger that owns accounts, payments and favorites
//! and is the only component allowed to change balances or payment status.
//!
//! The ledger enforces business rules such as:
//! - Phone uniqueness at registration
//! - Positive amounts for deposits and payments
//! - No payment larger than the account balance
//! - Every payment debit is either kept or credited back exactly once on reject
//!
//! Every operation validates before it mutates, so a failed call leaves the
//! ledger exactly as it was.

use crate::core::account_manager::AccountManager;
use crate::core::favorite_store::FavoriteStore;
use crate::core::id_source::UuidSource;
use crate::core::payment_store::PaymentStore;
use crate::core::traits::IdSource;
use crate::types::{
    Account, AccountId, Favorite, LedgerError, Money, Payment, PaymentStatus,
};
use std::sync::Arc;

/// What `reject` does with a payment that is already rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RejectPolicy {
    /// Fail with `PaymentAlreadyRejected` and credit nothing
    #[default]
    Strict,

    /// Credit the amount back again on every call
    Recredit,
}

/// Ledger behaviour settings
#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerConfig {
    pub reject_policy: RejectPolicy,
}

/// In-memory wallet ledger
///
/// Coordinates the AccountManager, PaymentStore and FavoriteStore. All
/// mutators take `&mut self`, so a single owner serializes every write; wrap
/// it in [`SharedLedger`](crate::core::SharedLedger) to share it between tasks.
pub struct Ledger {
    accounts: AccountManager,
    payments: PaymentStore,
    favorites: FavoriteStore,
    ids: Box<dyn IdSource>,
    config: LedgerConfig,
}

impl Ledger {
    /// Create an empty ledger with random UUID identifiers and default config
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Create an empty ledger with the given configuration
    pub fn with_config(config: LedgerConfig) -> Self {
        Ledger {
            accounts: AccountManager::new(),
            payments: PaymentStore::new(),
            favorites: FavoriteStore::new(),
            ids: Box::new(UuidSource),
            config,
        }
    }

    /// Replace the identifier source used for new payments and favorites
    pub fn with_id_source(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Register a new account under `phone`
    ///
    /// # Errors
    ///
    /// Returns `PhoneAlreadyRegistered` if the phone is already in use.
    pub fn register_account(&mut self, phone: &str) -> Result<Account, LedgerError> {
        let account = self.accounts.register(phone)?.clone();
        tracing::debug!(account_id = account.id, phone, "account registered");
        Ok(account)
    }

    /// Add `amount` to an account balance
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `amount` is zero or negative
    /// - The account does not exist
    /// - The balance would overflow
    pub fn deposit(&mut self, account_id: AccountId, amount: Money) -> Result<(), LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::invalid_amount(amount, "deposit"));
        }

        let balance = self.accounts.credit(account_id, amount, "deposit")?;
        tracing::debug!(account_id, amount, balance, "deposit applied");
        Ok(())
    }

    /// Debit an account and record the payment
    ///
    /// The debit and the new `in_progress` payment appear together; if any
    /// check fails neither happens.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `amount` is zero or negative
    /// - The account does not exist
    /// - The balance is smaller than `amount`
    pub fn pay(
        &mut self,
        account_id: AccountId,
        amount: Money,
        category: &str,
    ) -> Result<Payment, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::invalid_amount(amount, "pay"));
        }

        let balance = self.accounts.debit(account_id, amount)?;

        let payment = Payment {
            id: self.ids.next_id(),
            account_id,
            amount,
            category: category.to_string(),
            status: PaymentStatus::InProgress,
        };
        let payment = self.payments.insert(payment).clone();

        tracing::debug!(
            payment_id = %payment.id,
            account_id,
            amount,
            balance,
            "payment recorded"
        );
        Ok(payment)
    }

    /// Look up an account by ID
    pub fn find_account_by_id(&self, account_id: AccountId) -> Result<&Account, LedgerError> {
        self.accounts.find(account_id)
    }

    /// Look up a payment by ID
    pub fn find_payment_by_id(&self, payment_id: &str) -> Result<&Payment, LedgerError> {
        self.payments.find(payment_id)
    }

    /// Look up a favorite by ID
    pub fn find_favorite_by_id(&self, favorite_id: &str) -> Result<&Favorite, LedgerError> {
        self.favorites.find(favorite_id)
    }

    /// Reverse a payment: mark it `fail` and credit its amount back
    ///
    /// An already rejected payment is handled according to
    /// [`RejectPolicy`]: `Strict` fails with `PaymentAlreadyRejected`,
    /// `Recredit` credits the account again.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The payment does not exist
    /// - The payment's account does not exist
    /// - The payment is already rejected under `RejectPolicy::Strict`
    pub fn reject(&mut self, payment_id: &str) -> Result<(), LedgerError> {
        let payment = self.payments.find(payment_id)?;
        let (account_id, amount, status) = (payment.account_id, payment.amount, payment.status);

        self.accounts.find(account_id)?;

        if status == PaymentStatus::Fail && self.config.reject_policy == RejectPolicy::Strict {
            return Err(LedgerError::payment_already_rejected(payment_id));
        }

        let balance = self.accounts.credit(account_id, amount, "reject")?;
        self.payments.set_status(payment_id, PaymentStatus::Fail)?;

        tracing::debug!(payment_id, account_id, amount, balance, "payment rejected");
        Ok(())
    }

    /// Make a new payment with the same account, amount and category
    ///
    /// # Errors
    ///
    /// Returns `PaymentNotFound`, or whatever [`Ledger::pay`] fails with.
    pub fn repeat(&mut self, payment_id: &str) -> Result<Payment, LedgerError> {
        let original = self.payments.find(payment_id)?;
        let (account_id, amount, category) =
            (original.account_id, original.amount, original.category.clone());

        self.pay(account_id, amount, &category)
    }

    /// Snapshot a payment into a named favorite
    ///
    /// # Errors
    ///
    /// Returns `PaymentNotFound` if the payment does not exist.
    pub fn favorite_payment(
        &mut self,
        payment_id: &str,
        name: &str,
    ) -> Result<Favorite, LedgerError> {
        let payment = self.payments.find(payment_id)?;
        let favorite = Favorite::from_payment(self.ids.next_id(), payment, name);
        let favorite = self.favorites.insert(favorite).clone();

        tracing::debug!(favorite_id = %favorite.id, payment_id, name, "favorite created");
        Ok(favorite)
    }

    /// Make a payment from a favorite's snapshot fields
    ///
    /// # Errors
    ///
    /// Returns `FavoriteNotFound`, or whatever [`Ledger::pay`] fails with.
    pub fn pay_from_favorite(&mut self, favorite_id: &str) -> Result<Payment, LedgerError> {
        let favorite = self.favorites.find(favorite_id)?;
        let (account_id, amount, category) =
            (favorite.account_id, favorite.amount, favorite.category.clone());

        self.pay(account_id, amount, &category)
    }

    /// All payments of an account, in creation order
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist. An existing
    /// account without payments yields an empty vector.
    pub fn export_account_history(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Payment>, LedgerError> {
        let account = self.accounts.find(account_id)?;
        Ok(self.payments.for_account(account.id).cloned().collect())
    }

    /// All accounts in registration order
    pub fn accounts(&self) -> &[Account] {
        self.accounts.all()
    }

    /// All payments in creation order
    pub fn payments(&self) -> &[Payment] {
        self.payments.all()
    }

    /// All favorites in creation order
    pub fn favorites(&self) -> &[Favorite] {
        self.favorites.all()
    }

    /// Detached copy of the payment history for aggregation workers
    pub fn payments_snapshot(&self) -> Arc<[Payment]> {
        self.payments.snapshot()
    }

    /// ID the next registered account will receive
    pub fn next_account_id(&self) -> AccountId {
        self.accounts.next_id()
    }

    /// Append an imported account without merging
    pub fn append_account(&mut self, account: Account) {
        self.accounts.append(account);
    }

    /// Insert or overwrite an imported account; `true` if inserted
    pub fn upsert_account(&mut self, account: Account) -> bool {
        self.accounts.upsert(account)
    }

    /// Insert or overwrite an imported payment; `true` if inserted
    pub fn upsert_payment(&mut self, payment: Payment) -> bool {
        self.payments.upsert(payment)
    }

    /// Insert or overwrite an imported favorite; `true` if inserted
    pub fn upsert_favorite(&mut self, favorite: Favorite) -> bool {
        self.favorites.upsert(favorite)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("accounts", &self.accounts.len())
            .field("payments", &self.payments.len())
            .field("favorites", &self.favorites.len())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::id_source::SequentialIds;
    use rstest::rstest;

    fn ledger() -> Ledger {
        Ledger::new().with_id_source(SequentialIds::new("id"))
    }

    fn funded(balance: Money) -> (Ledger, AccountId) {
        let mut ledger = ledger();
        let account = ledger.register_account("+992000000001").unwrap();
        ledger.deposit(account.id, balance).unwrap();
        (ledger, account.id)
    }

    #[test]
    fn test_register_account_then_find() {
        let mut ledger = ledger();

        let registered = ledger.register_account("+992000000001").unwrap();
        let found = ledger.find_account_by_id(1).unwrap();

        assert_eq!(&registered, found);
        assert_eq!(found.balance, 0);
    }

    #[test]
    fn test_find_unregistered_account() {
        let mut ledger = ledger();
        ledger.register_account("+992000000001").unwrap();

        assert_eq!(
            ledger.find_account_by_id(2).unwrap_err(),
            LedgerError::account_not_found(2)
        );
    }

    #[test]
    fn test_register_same_phone_twice() {
        let mut ledger = ledger();
        ledger.register_account("+992000000001").unwrap();

        let result = ledger.register_account("+992000000001");

        assert_eq!(
            result.unwrap_err(),
            LedgerError::phone_already_registered("+992000000001")
        );
        let matching = ledger
            .accounts()
            .iter()
            .filter(|a| a.phone == "+992000000001")
            .count();
        assert_eq!(matching, 1);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-100)]
    fn test_deposit_non_positive_amount(#[case] amount: Money) {
        let (mut ledger, id) = funded(500);

        let result = ledger.deposit(id, amount);

        assert_eq!(
            result.unwrap_err(),
            LedgerError::invalid_amount(amount, "deposit")
        );
        assert_eq!(ledger.find_account_by_id(id).unwrap().balance, 500);
    }

    #[test]
    fn test_deposit_unknown_account() {
        let mut ledger = ledger();
        assert_eq!(
            ledger.deposit(5, 100).unwrap_err(),
            LedgerError::account_not_found(5)
        );
    }

    #[test]
    fn test_deposit_adds_exact_amount() {
        let (mut ledger, id) = funded(500);
        ledger.deposit(id, 250).unwrap();
        assert_eq!(ledger.find_account_by_id(id).unwrap().balance, 750);
    }

    #[test]
    fn test_pay_debits_and_records_payment() {
        let (mut ledger, id) = funded(1_000_000);

        let payment = ledger.pay(id, 100_000, "auto").unwrap();

        assert_eq!(payment.id, "id-1");
        assert_eq!(payment.account_id, id);
        assert_eq!(payment.amount, 100_000);
        assert_eq!(payment.category, "auto");
        assert_eq!(payment.status, PaymentStatus::InProgress);
        assert_eq!(ledger.find_account_by_id(id).unwrap().balance, 900_000);
        assert_eq!(ledger.find_payment_by_id("id-1").unwrap(), &payment);
    }

    #[rstest]
    #[case::zero_amount(1, 0, LedgerError::invalid_amount(0, "pay"))]
    #[case::negative_amount(1, -1, LedgerError::invalid_amount(-1, "pay"))]
    #[case::unknown_account(2, 100, LedgerError::account_not_found(2))]
    #[case::insufficient_balance(1, 501, LedgerError::insufficient_balance(1, 500, 501))]
    fn test_pay_failures_leave_ledger_unchanged(
        #[case] account_id: AccountId,
        #[case] amount: Money,
        #[case] expected: LedgerError,
    ) {
        let (mut ledger, id) = funded(500);

        let result = ledger.pay(account_id, amount, "auto");

        assert_eq!(result.unwrap_err(), expected);
        assert_eq!(ledger.find_account_by_id(id).unwrap().balance, 500);
        assert!(ledger.payments().is_empty());
    }

    #[test]
    fn test_reject_restores_balance() {
        let (mut ledger, id) = funded(1_000_000);
        let payment = ledger.pay(id, 100_000, "auto").unwrap();

        ledger.reject(&payment.id).unwrap();

        assert_eq!(ledger.find_account_by_id(id).unwrap().balance, 1_000_000);
        assert_eq!(
            ledger.find_payment_by_id(&payment.id).unwrap().status,
            PaymentStatus::Fail
        );
    }

    #[test]
    fn test_reject_unknown_payment() {
        let (mut ledger, _) = funded(100);
        assert_eq!(
            ledger.reject("nope").unwrap_err(),
            LedgerError::payment_not_found("nope")
        );
    }

    #[test]
    fn test_reject_twice_is_refused_under_strict_policy() {
        let (mut ledger, id) = funded(1_000);
        let payment = ledger.pay(id, 400, "auto").unwrap();
        ledger.reject(&payment.id).unwrap();

        let result = ledger.reject(&payment.id);

        assert_eq!(
            result.unwrap_err(),
            LedgerError::payment_already_rejected(&payment.id)
        );
        assert_eq!(ledger.find_account_by_id(id).unwrap().balance, 1_000);
    }

    #[test]
    fn test_reject_twice_credits_again_under_recredit_policy() {
        let mut ledger = Ledger::with_config(LedgerConfig {
            reject_policy: RejectPolicy::Recredit,
        })
        .with_id_source(SequentialIds::new("id"));
        let id = ledger.register_account("+992000000001").unwrap().id;
        ledger.deposit(id, 1_000).unwrap();
        let payment = ledger.pay(id, 400, "auto").unwrap();

        ledger.reject(&payment.id).unwrap();
        ledger.reject(&payment.id).unwrap();

        assert_eq!(ledger.find_account_by_id(id).unwrap().balance, 1_400);
        assert_eq!(
            ledger.find_payment_by_id(&payment.id).unwrap().status,
            PaymentStatus::Fail
        );
    }

    #[test]
    fn test_reject_payment_of_missing_account() {
        let mut ledger = ledger();
        ledger.upsert_payment(Payment {
            id: "orphan".to_string(),
            account_id: 77,
            amount: 10,
            category: "auto".to_string(),
            status: PaymentStatus::InProgress,
        });

        assert_eq!(
            ledger.reject("orphan").unwrap_err(),
            LedgerError::account_not_found(77)
        );
        assert_eq!(
            ledger.find_payment_by_id("orphan").unwrap().status,
            PaymentStatus::InProgress
        );
    }

    #[test]
    fn test_repeat_creates_independent_payment() {
        let (mut ledger, id) = funded(1_000);
        let original = ledger.pay(id, 300, "food").unwrap();

        let repeated = ledger.repeat(&original.id).unwrap();

        assert_ne!(repeated.id, original.id);
        assert_eq!(repeated.account_id, original.account_id);
        assert_eq!(repeated.amount, original.amount);
        assert_eq!(repeated.category, original.category);
        assert_eq!(ledger.payments().len(), 2);
        assert_eq!(ledger.find_account_by_id(id).unwrap().balance, 400);
    }

    #[test]
    fn test_repeat_failures() {
        let (mut ledger, id) = funded(500);
        let original = ledger.pay(id, 300, "food").unwrap();

        assert_eq!(
            ledger.repeat("missing").unwrap_err(),
            LedgerError::payment_not_found("missing")
        );
        assert_eq!(
            ledger.repeat(&original.id).unwrap_err(),
            LedgerError::insufficient_balance(id, 200, 300)
        );
        assert_eq!(ledger.payments().len(), 1);
    }

    #[test]
    fn test_favorite_payment_snapshots_fields() {
        let (mut ledger, id) = funded(1_000);
        let payment = ledger.pay(id, 250, "mobile").unwrap();

        let favorite = ledger.favorite_payment(&payment.id, "phone bill").unwrap();
        ledger.reject(&payment.id).unwrap();

        let stored = ledger.find_favorite_by_id(&favorite.id).unwrap();
        assert_eq!(stored.account_id, id);
        assert_eq!(stored.amount, 250);
        assert_eq!(stored.category, "mobile");
        assert_eq!(stored.name, "phone bill");
    }

    #[test]
    fn test_favorite_payment_unknown_payment() {
        let (mut ledger, _) = funded(100);
        assert_eq!(
            ledger.favorite_payment("missing", "x").unwrap_err(),
            LedgerError::payment_not_found("missing")
        );
        assert!(ledger.favorites().is_empty());
    }

    #[test]
    fn test_pay_from_favorite() {
        let (mut ledger, id) = funded(1_000);
        let payment = ledger.pay(id, 250, "mobile").unwrap();
        let favorite = ledger.favorite_payment(&payment.id, "phone bill").unwrap();

        let spawned = ledger.pay_from_favorite(&favorite.id).unwrap();

        assert_eq!(spawned.amount, 250);
        assert_eq!(spawned.category, "mobile");
        assert_eq!(spawned.status, PaymentStatus::InProgress);
        assert_eq!(ledger.find_account_by_id(id).unwrap().balance, 500);
    }

    #[test]
    fn test_pay_from_unknown_favorite() {
        let (mut ledger, _) = funded(100);
        assert_eq!(
            ledger.pay_from_favorite("missing").unwrap_err(),
            LedgerError::favorite_not_found("missing")
        );
    }

    #[test]
    fn test_export_account_history() {
        let mut ledger = ledger();
        let first = ledger.register_account("+992000000001").unwrap().id;
        let second = ledger.register_account("+992000000002").unwrap().id;
        ledger.deposit(first, 1_000).unwrap();
        ledger.deposit(second, 1_000).unwrap();
        ledger.pay(first, 100, "a").unwrap();
        ledger.pay(second, 200, "b").unwrap();
        ledger.pay(first, 300, "c").unwrap();

        let history = ledger.export_account_history(first).unwrap();
        let amounts: Vec<Money> = history.iter().map(|p| p.amount).collect();

        assert_eq!(amounts, vec![100, 300]);
    }

    #[test]
    fn test_export_account_history_empty_and_missing() {
        let (ledger, id) = funded(100);

        assert!(ledger.export_account_history(id).unwrap().is_empty());
        assert_eq!(
            ledger.export_account_history(99).unwrap_err(),
            LedgerError::account_not_found(99)
        );
    }

    #[test]
    fn test_balance_conservation_over_mixed_operations() {
        let (mut ledger, id) = funded(10_000);
        let a = ledger.pay(id, 1_000, "a").unwrap();
        let b = ledger.pay(id, 2_000, "b").unwrap();
        let _c = ledger.repeat(&a.id).unwrap();
        ledger.reject(&b.id).unwrap();

        let retained: Money = ledger
            .payments()
            .iter()
            .filter(|p| p.status == PaymentStatus::InProgress)
            .map(|p| p.amount)
            .sum();
        let balance = ledger.find_account_by_id(id).unwrap().balance;

        assert_eq!(balance + retained, 10_000);
    }
}
