//! Wallet Ledger Library
//! # Overview
//!
//! This library provides an in-memory wallet ledger with parallel payment
//! aggregation and file-based persistence
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Payment, Favorite, LedgerError)
//! - [`cli`] - CLI arguments parsing and subcommands
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Ledger state machine and business rules
//!   - [`core::account_manager`] - Account registration and balance operations
//!   - [`core::payment_store`] - Ordered payment history
//!   - [`core::r#async`] - Partitioned aggregation and the shared ledger handle
//! - [`strategy`] - Sequential and parallel query strategies
//! - [`io`] - Single-file, directory and chunked history persistence
//!
//! # Operations
//!
//! - **Register**: Create an account with a unique phone and zero balance
//! - **Deposit**: Credit a positive amount to an account
//! - **Pay**: Debit an account and record an `in_progress` payment
//! - **Reject**: Mark a payment `fail` and credit its amount back
//! - **Repeat**: Pay again with the same account, amount and category
//! - **Favorite**: Save a payment as a named template and pay from it later
//!
//! # Money
//!
//! Amounts are signed 64-bit integers in minor units. Every balance change is
//! overflow checked.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{Aggregator, Ledger, LedgerConfig, RejectPolicy, SharedLedger};
pub use strategy::{create_strategy, QueryStrategy};
pub use types::{
    Account, AccountId, ErrorKind, Favorite, FavoriteId, LedgerError, Money, Payment, PaymentId,
    PaymentStatus, Phone,
};
