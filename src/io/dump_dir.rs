//! Directory dumps
//!
//! A ledger is dumped as up to three files in one directory, one record per
//! line:
//!
//! - `accounts.dump` - `id;phone;balance`
//! - `payments.dump` - `id;account_id;amount;category;status`
//! - `favorites.dump` - `id;account_id;name;amount;category`
//!
//! # Error Handling
//!
//! - An empty collection writes no file, and a missing file imports nothing
//! - A malformed record stops that file's import with a warning; the rest of
//!   the import still runs and the call succeeds. A negative balance or a
//!   non-positive payment or favorite amount counts as malformed
//! - Failures to open, read or write a file are returned

use crate::core::Ledger;
use crate::io::dump_format::{read_rows, writer_builder, AccountRow, FavoriteRow, PaymentRow};
use crate::types::{Account, Favorite, LedgerError, Payment};
use csv::Terminator;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

pub const ACCOUNTS_FILE: &str = "accounts.dump";
pub const PAYMENTS_FILE: &str = "payments.dump";
pub const FAVORITES_FILE: &str = "favorites.dump";

/// Entities touched by an import, per file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpSummary {
    pub accounts: usize,
    pub payments: usize,
    pub favorites: usize,
}

/// Write the ledger to `dir`, one file per non-empty collection
///
/// Existing dump files are overwritten. `dir` must exist.
///
/// # Errors
///
/// Returns `IoError` if a file cannot be created or written.
pub fn export(ledger: &Ledger, dir: &Path) -> Result<(), LedgerError> {
    write_dump(dir, ACCOUNTS_FILE, ledger.accounts().iter().map(AccountRow::from))?;
    write_dump(dir, PAYMENTS_FILE, ledger.payments().iter().map(PaymentRow::from))?;
    write_dump(dir, FAVORITES_FILE, ledger.favorites().iter().map(FavoriteRow::from))?;

    tracing::info!(
        dir = %dir.display(),
        accounts = ledger.accounts().len(),
        payments = ledger.payments().len(),
        favorites = ledger.favorites().len(),
        "ledger exported"
    );
    Ok(())
}

/// Upsert every record found in `dir` into the ledger
///
/// Records are matched by ID: an existing entity is overwritten, a new one is
/// appended. Imported account IDs move the account ID counter forward.
///
/// # Errors
///
/// Returns `IoError` if an existing file cannot be opened or read.
pub fn import(ledger: &mut Ledger, dir: &Path) -> Result<DumpSummary, LedgerError> {
    let mut summary = DumpSummary::default();

    if let Some(accounts) = read_dump::<AccountRow, Account>(dir, ACCOUNTS_FILE)? {
        summary.accounts = accounts.len();
        for account in accounts {
            ledger.upsert_account(account);
        }
    }

    if let Some(payments) = read_dump::<PaymentRow, Payment>(dir, PAYMENTS_FILE)? {
        summary.payments = payments.len();
        for payment in payments {
            ledger.upsert_payment(payment);
        }
    }

    if let Some(favorites) = read_dump::<FavoriteRow, Favorite>(dir, FAVORITES_FILE)? {
        summary.favorites = favorites.len();
        for favorite in favorites {
            ledger.upsert_favorite(favorite);
        }
    }

    tracing::info!(
        dir = %dir.display(),
        accounts = summary.accounts,
        payments = summary.payments,
        favorites = summary.favorites,
        "ledger imported"
    );
    Ok(summary)
}

fn write_dump<T, I>(dir: &Path, name: &str, rows: I) -> Result<(), LedgerError>
where
    T: Serialize,
    I: ExactSizeIterator<Item = T>,
{
    if rows.len() == 0 {
        return Ok(());
    }

    let mut writer = writer_builder(Terminator::Any(b'\n')).from_path(dir.join(name))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn read_dump<Row, T>(dir: &Path, name: &str) -> Result<Option<Vec<T>>, LedgerError>
where
    Row: DeserializeOwned,
    T: TryFrom<Row, Error = LedgerError>,
{
    let path = dir.join(name);
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no dump file, skipping");
            return Ok(None);
        }
        Err(e) => return Err(LedgerError::open_failed(&path, e)),
    };

    let source = path.display().to_string();
    read_rows::<Row, T, _>(file, Terminator::CRLF, &source).map(Some)
}
