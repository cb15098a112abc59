//! Payment-related types for the wallet ledger
//!
//! This module defines payments, their status lifecycle, and the favorite
//! templates that are snapshotted from them.

use super::account::{AccountId, Money};
use serde::{Deserialize, Serialize};

/// Payment identifier, an opaque string from the identifier source
pub type PaymentId = String;

/// Favorite identifier, an opaque string from the identifier source
pub type FavoriteId = String;

/// Free-form payment category label
pub type PaymentCategory = String;

/// Status of a recorded payment
///
/// Every payment starts `InProgress`. Rejection moves it to `Fail`; there is
/// no transition back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Debited from the account and not reversed
    InProgress,

    /// Rejected; the amount has been credited back to the account
    Fail,
}

/// A recorded debit against an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    /// Unique payment ID
    pub id: PaymentId,

    /// The account that was debited
    pub account_id: AccountId,

    /// Debited amount, always positive
    pub amount: Money,

    /// Free-form category label
    pub category: PaymentCategory,

    /// Whether the payment is still in effect or was rejected
    pub status: PaymentStatus,
}

/// Reusable payment template
///
/// The account, amount and category are copied from the source payment when
/// the favorite is created; later changes to that payment do not affect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    /// Unique favorite ID
    pub id: FavoriteId,

    /// Account the spawned payments are debited from
    pub account_id: AccountId,

    /// Caller-supplied label
    pub name: String,

    /// Amount of every spawned payment
    pub amount: Money,

    /// Category of every spawned payment
    pub category: PaymentCategory,
}

impl Favorite {
    /// Snapshot a payment into a favorite template
    pub fn from_payment(id: FavoriteId, payment: &Payment, name: impl Into<String>) -> Self {
        Favorite {
            id,
            account_id: payment.account_id,
            name: name.into(),
            amount: payment.amount,
            category: payment.category.clone(),
        }
    }
}
