//! Asynchronous components of the ledger
//!
//! This module provides the task-based side of the ledger:
//!
//! - **Aggregator**: Partitioned fan-out of read-only work over a payment
//!   snapshot, one tokio task per partition
//! - **SharedLedger**: Cloneable handle that serializes mutations behind an
//!   async `RwLock` and routes aggregations through the `Aggregator`
//!
//! # Thread Safety
//!
//! - Workers never touch the live ledger, only an `Arc<[Payment]>` snapshot
//! - Mutations through a `SharedLedger` run one at a time
//! - Concurrent lookups and aggregations only take the read lock

pub mod aggregator;
pub mod shared_ledger;

pub use aggregator::Aggregator;
pub use shared_ledger::SharedLedger;
