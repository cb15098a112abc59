//! Core traits for the seams the ledger is built around
//!
//! The ledger never generates identifiers itself; it asks an [`IdSource`] so
//! production code can use random UUIDs while tests and benchmarks use a
//! deterministic sequence.

/// Source of unique opaque identifiers for payments and favorites
///
/// Implementations must never return the same identifier twice within the
/// lifetime of a ledger.
pub trait IdSource: Send + Sync {
    /// Produce the next identifier
    fn next_id(&self) -> String;
}
