//! Account management module
//!
//! This module provides the `AccountManager` struct which maintains the state
//! of all registered accounts and provides operations for managing balances.
//!
//! The AccountManager is responsible for:
//! - Registering accounts under unique phone numbers
//! - Assigning sequential account IDs
//! - Crediting and debiting balances with checked arithmetic
//! - Keeping registration order for export

use crate::types::{Account, AccountId, LedgerError, Money, Phone};
use std::collections::HashMap;

/// Manages all accounts and their balances
///
/// Accounts are kept in registration order. Two indexes (by ID and by phone)
/// point into that sequence and are updated on every insert.
#[derive(Debug, Default)]
pub struct AccountManager {
    /// Accounts in registration (or import) order
    accounts: Vec<Account>,

    /// Account ID to position in `accounts`
    by_id: HashMap<AccountId, usize>,

    /// Phone to position in `accounts`
    by_phone: HashMap<Phone, usize>,

    /// Highest account ID assigned or imported so far
    last_id: AccountId,
}

impl AccountManager {
    /// Create a new AccountManager with no accounts
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new account with a zero balance
    ///
    /// # Errors
    ///
    /// Returns `PhoneAlreadyRegistered` if any account already uses `phone`.
    pub fn register(&mut self, phone: &str) -> Result<&Account, LedgerError> {
        if self.by_phone.contains_key(phone) {
            return Err(LedgerError::phone_already_registered(phone));
        }

        let id = self.next_id();
        let index = self.push(Account::new(id, phone));
        Ok(&self.accounts[index])
    }

    /// Get an account by ID
    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.by_id.get(&id).map(|&index| &self.accounts[index])
    }

    /// Get an account by ID, failing with `AccountNotFound`
    pub fn find(&self, id: AccountId) -> Result<&Account, LedgerError> {
        self.get(id).ok_or_else(|| LedgerError::account_not_found(id))
    }

    fn find_mut(&mut self, id: AccountId) -> Result<&mut Account, LedgerError> {
        match self.by_id.get(&id) {
            Some(&index) => Ok(&mut self.accounts[index]),
            None => Err(LedgerError::account_not_found(id)),
        }
    }

    /// Add funds to an account
    ///
    /// Used for deposits and for crediting rejected payments back.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist
    /// - Adding the amount would overflow the balance
    pub fn credit(
        &mut self,
        id: AccountId,
        amount: Money,
        operation: &str,
    ) -> Result<Money, LedgerError> {
        let account = self.find_mut(id)?;

        let new_balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow(operation, id))?;

        account.balance = new_balance;
        Ok(new_balance)
    }

    /// Remove funds from an account
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist
    /// - The balance is smaller than the amount
    pub fn debit(&mut self, id: AccountId, amount: Money) -> Result<Money, LedgerError> {
        let account = self.find_mut(id)?;

        if account.balance < amount {
            return Err(LedgerError::insufficient_balance(
                id,
                account.balance,
                amount,
            ));
        }

        let new_balance = account
            .balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("pay", id))?;

        account.balance = new_balance;
        Ok(new_balance)
    }

    /// Append an account exactly as given, without merging
    ///
    /// If the ID or phone is already indexed, the earlier account stays the
    /// lookup target. The ID counter moves past the appended ID.
    pub fn append(&mut self, account: Account) {
        self.push(account);
    }

    /// Insert an account, or overwrite the one with the same ID
    ///
    /// Returns `true` when a new account was inserted.
    pub fn upsert(&mut self, account: Account) -> bool {
        let Some(&index) = self.by_id.get(&account.id) else {
            self.push(account);
            return true;
        };

        let existing = &mut self.accounts[index];
        if existing.phone != account.phone {
            if self.by_phone.get(&existing.phone) == Some(&index) {
                self.by_phone.remove(&existing.phone);
            }
            self.by_phone.entry(account.phone.clone()).or_insert(index);
        }
        existing.phone = account.phone;
        existing.balance = account.balance;
        false
    }

    /// All accounts in registration order
    pub fn all(&self) -> &[Account] {
        &self.accounts
    }

    /// ID the next registration will receive
    pub fn next_id(&self) -> AccountId {
        self.last_id + 1
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn push(&mut self, account: Account) -> usize {
        let index = self.accounts.len();
        // first occurrence wins for lookups
        self.by_id.entry(account.id).or_insert(index);
        self.by_phone.entry(account.phone.clone()).or_insert(index);
        self.last_id = self.last_id.max(account.id);
        self.accounts.push(account);
        index
    }
}
