//! Account-related types for the wallet ledger
//!
//! This module defines the Account structure and the identifiers used to
//! address it.

/// Account identifier
///
/// Positive, assigned sequentially by the ledger starting at 1.
pub type AccountId = i64;

/// Phone number an account is registered under
pub type Phone = String;

/// Money amount in the smallest currency unit
pub type Money = i64;

/// Balance-holding account keyed by phone number
///
/// Accounts are created by registration and never deleted. The balance is
/// only changed by deposits, payment debits and rejection credits, and is
/// never negative after a successful operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Sequentially assigned account ID
    pub id: AccountId,

    /// Phone number, unique across all registered accounts
    pub phone: Phone,

    /// Current balance in the smallest currency unit
    pub balance: Money,
}

impl Account {
    /// Create a new account with a zero balance
    ///
    /// # Arguments
    ///
    /// * `id` - The account ID assigned by the ledger
    /// * `phone` - The phone number the account is registered under
    pub fn new(id: AccountId, phone: impl Into<Phone>) -> Self {
        Account {
            id,
            phone: phone.into(),
            balance: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_starts_empty() {
        let account = Account::new(7, "+992000000001");

        assert_eq!(account.id, 7);
        assert_eq!(account.phone, "+992000000001");
        assert_eq!(account.balance, 0);
    }
}
