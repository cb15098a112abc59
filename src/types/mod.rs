//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account type and the account/money identifiers
//! - `payment`: Payment, payment status and favorite templates
//! - `error`: Error types for the ledger

pub mod account;
pub mod error;
pub mod payment;

pub use account::{Account, AccountId, Money, Phone};
pub use error::{ErrorKind, LedgerError};
pub use payment::{Favorite, FavoriteId, Payment, PaymentCategory, PaymentId, PaymentStatus};
