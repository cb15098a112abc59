//! Error types for the wallet ledger
//!
//! This module defines all error types that can occur while mutating or
//! querying the ledger and while moving its contents to and from disk.
//!
//! # Error Categories
//!
//! - **Lookup Errors**: Account, payment or favorite not found
//! - **Validation Errors**: Non-positive amounts, insufficient balance, duplicate phone
//! - **File I/O Errors**: File not found, permission denied, malformed dump records
//! - **Arithmetic Errors**: Overflow in balance or sum calculations

use super::account::{AccountId, Money};
use thiserror::Error;

/// Coarse classification of a [`LedgerError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidAmount,
    InsufficientBalance,
    AlreadyExists,
    Conflict,
    InvalidInput,
    Io,
    Parse,
    Internal,
}

/// Main error type for the wallet ledger
///
/// Every ledger mutation that returns one of these leaves the ledger
/// unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// No account with the given ID
    #[error("Account {account_id} not found")]
    AccountNotFound {
        /// The ID that was looked up
        account_id: AccountId,
    },

    /// No payment with the given ID
    #[error("Payment {payment_id} not found")]
    PaymentNotFound {
        /// The ID that was looked up
        payment_id: String,
    },

    /// No favorite with the given ID
    #[error("Favorite {favorite_id} not found")]
    FavoriteNotFound {
        /// The ID that was looked up
        favorite_id: String,
    },

    /// Amount supplied to a deposit or payment was zero or negative
    #[error("Invalid amount {amount} for {operation}: amount must be greater than zero")]
    InvalidAmount {
        /// The rejected amount
        amount: Money,
        /// Operation that received it
        operation: String,
    },

    /// Payment exceeds the account balance
    #[error("Insufficient balance for account {account_id}: balance {balance}, requested {requested}")]
    InsufficientBalance {
        /// Account ID
        account_id: AccountId,
        /// Balance at the time of the request
        balance: Money,
        /// Requested payment amount
        requested: Money,
    },

    /// Phone is already registered to another account
    #[error("Phone {phone} is already registered")]
    PhoneAlreadyRegistered {
        /// The duplicate phone
        phone: String,
    },

    /// Payment was already rejected and its amount already credited back
    #[error("Payment {payment_id} is already rejected")]
    PaymentAlreadyRejected {
        /// Payment ID
        payment_id: String,
    },

    /// Checked arithmetic would overflow
    #[error("Arithmetic overflow in {operation} for account {account_id}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account ID (0 for aggregations over all accounts)
        account_id: AccountId,
    },

    /// Chunked export requested with zero records per chunk
    #[error("Invalid chunk size {records}: at least one record per file is required")]
    InvalidChunkSize {
        /// Requested records per file
        records: usize,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// Dump record could not be parsed
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// An aggregation worker panicked or was cancelled
    #[error("Aggregation worker failed: {message}")]
    WorkerFailed {
        /// Description of the failure
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        if error.is_io_error() {
            return LedgerError::IoError {
                message: error.to_string(),
            };
        }

        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an AccountNotFound error
    pub fn account_not_found(account_id: AccountId) -> Self {
        LedgerError::AccountNotFound { account_id }
    }

    /// Create a PaymentNotFound error
    pub fn payment_not_found(payment_id: &str) -> Self {
        LedgerError::PaymentNotFound {
            payment_id: payment_id.to_string(),
        }
    }

    /// Create a FavoriteNotFound error
    pub fn favorite_not_found(favorite_id: &str) -> Self {
        LedgerError::FavoriteNotFound {
            favorite_id: favorite_id.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Money, operation: &str) -> Self {
        LedgerError::InvalidAmount {
            amount,
            operation: operation.to_string(),
        }
    }

    /// Create an InsufficientBalance error
    pub fn insufficient_balance(account_id: AccountId, balance: Money, requested: Money) -> Self {
        LedgerError::InsufficientBalance {
            account_id,
            balance,
            requested,
        }
    }

    /// Create a PhoneAlreadyRegistered error
    pub fn phone_already_registered(phone: &str) -> Self {
        LedgerError::PhoneAlreadyRegistered {
            phone: phone.to_string(),
        }
    }

    /// Create a PaymentAlreadyRejected error
    pub fn payment_already_rejected(payment_id: &str) -> Self {
        LedgerError::PaymentAlreadyRejected {
            payment_id: payment_id.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account_id: AccountId) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account_id,
        }
    }

    /// Map a failure to open `path` onto FileNotFound or IoError
    pub fn open_failed(path: &std::path::Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            return LedgerError::FileNotFound {
                path: path.display().to_string(),
            };
        }

        LedgerError::IoError {
            message: format!("Failed to open '{}': {}", path.display(), error),
        }
    }

    /// Create a ParseError for a record that parses but breaks a ledger rule
    pub fn invalid_record(message: impl Into<String>) -> Self {
        LedgerError::ParseError {
            line: None,
            message: message.into(),
        }
    }

    /// Create a WorkerFailed error
    pub fn worker_failed(message: impl Into<String>) -> Self {
        LedgerError::WorkerFailed {
            message: message.into(),
        }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::AccountNotFound { .. }
            | LedgerError::PaymentNotFound { .. }
            | LedgerError::FavoriteNotFound { .. }
            | LedgerError::FileNotFound { .. } => ErrorKind::NotFound,
            LedgerError::InvalidAmount { .. } => ErrorKind::InvalidAmount,
            LedgerError::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            LedgerError::InvalidChunkSize { .. } => ErrorKind::InvalidInput,
            LedgerError::PhoneAlreadyRegistered { .. } => ErrorKind::AlreadyExists,
            LedgerError::PaymentAlreadyRejected { .. } => ErrorKind::Conflict,
            LedgerError::IoError { .. } => ErrorKind::Io,
            LedgerError::ParseError { .. } => ErrorKind::Parse,
            LedgerError::ArithmeticOverflow { .. } | LedgerError::WorkerFailed { .. } => {
                ErrorKind::Internal
            }
        }
    }
}
