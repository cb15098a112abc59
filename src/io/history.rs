//! Chunked payment history export
//!
//! Splits a payment list into files of at most `records` lines each, using
//! the `payments.dump` record layout. The first chunk is `payments.dump`, the
//! K-th chunk (K >= 2) is `paymentsK.dump`.

use crate::io::dump_format::{writer_builder, PaymentRow};
use crate::types::{LedgerError, Payment};
use csv::Terminator;
use std::path::{Path, PathBuf};

/// File name of the `index`-th chunk, counting from zero
pub fn chunk_file_name(index: usize) -> String {
    match index {
        0 => "payments.dump".to_string(),
        n => format!("payments{}.dump", n + 1),
    }
}

/// Write `payments` to `dir` in chunks of at most `records` lines
///
/// An empty payment list writes nothing.
///
/// # Returns
///
/// Paths of the files written, in chunk order.
///
/// # Errors
///
/// Returns an error if:
/// - `records` is zero
/// - A chunk file cannot be created or written
pub fn history_to_files(
    payments: &[Payment],
    dir: &Path,
    records: usize,
) -> Result<Vec<PathBuf>, LedgerError> {
    if records == 0 {
        return Err(LedgerError::InvalidChunkSize { records });
    }

    let mut written = Vec::with_capacity(payments.len().div_ceil(records));
    for (index, chunk) in payments.chunks(records).enumerate() {
        let path = dir.join(chunk_file_name(index));
        let mut writer = writer_builder(Terminator::Any(b'\n')).from_path(&path)?;
        for payment in chunk {
            writer.serialize(PaymentRow::from(payment))?;
        }
        writer.flush()?;
        written.push(path);
    }

    tracing::info!(
        dir = %dir.display(),
        payments = payments.len(),
        files = written.len(),
        "history exported"
    );
    Ok(written)
}
