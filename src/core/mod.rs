//! Core business logic module
//!
//! This module contains the ledger components:
//! - `traits` - Trait seams (identifier source)
//! - `id_source` - UUID and sequential identifier sources
//! - `ledger` - Ledger state machine coordinating the stores
//! - `account_manager` - Account registration and balance operations
//! - `payment_store` - Ordered payment history with ID index
//! - `favorite_store` - Favorite templates with ID index
//! - `partition` - Deterministic partitioning shared by all aggregations
//! - `async` - Parallel aggregation and the shared ledger handle

pub mod account_manager;
pub mod r#async;
pub mod favorite_store;
pub mod id_source;
pub mod ledger;
pub mod partition;
pub mod payment_store;
pub mod traits;

pub use account_manager::AccountManager;
pub use favorite_store::FavoriteStore;
pub use id_source::{SequentialIds, UuidSource};
pub use ledger::{Ledger, LedgerConfig, RejectPolicy};
pub use payment_store::PaymentStore;
pub use r#async::{Aggregator, SharedLedger};
pub use traits::IdSource;
