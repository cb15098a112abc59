//! Single-file account export
//!
//! All accounts on one line: records separated by `|`, fields by `;`, no
//! trailing separator.
//!
//! ```text
//! 1;+992000000001;1000000|2;+992000000002;0
//! ```

use crate::core::Ledger;
use crate::io::dump_format::{read_rows, writer_builder, AccountRow};
use crate::types::{Account, LedgerError};
use csv::Terminator;
use std::fs::{self, File};
use std::path::Path;

/// Record separator of the single-file format
pub const RECORD_SEPARATOR: u8 = b'|';

/// Write every account to `path` in store order, replacing the file
///
/// # Errors
///
/// Returns `IoError` if the file cannot be written.
pub fn export_to_file(ledger: &Ledger, path: &Path) -> Result<(), LedgerError> {
    let mut writer = writer_builder(Terminator::Any(RECORD_SEPARATOR)).from_writer(Vec::new());
    for account in ledger.accounts() {
        writer.serialize(AccountRow::from(account))?;
    }

    let mut content = writer
        .into_inner()
        .map_err(|e| LedgerError::IoError {
            message: e.to_string(),
        })?;
    if content.last() == Some(&RECORD_SEPARATOR) {
        content.pop();
    }

    fs::write(path, content)?;

    tracing::info!(
        path = %path.display(),
        accounts = ledger.accounts().len(),
        "accounts exported"
    );
    Ok(())
}

/// Append every account found in `path` to the ledger
///
/// Accounts are appended as-is, without merging with existing accounts. A
/// malformed record stops the import; the records before it are kept.
///
/// # Returns
///
/// The number of accounts appended.
///
/// # Errors
///
/// Returns `FileNotFound` or `IoError` if the file cannot be read.
pub fn import_from_file(ledger: &mut Ledger, path: &Path) -> Result<usize, LedgerError> {
    let file = File::open(path).map_err(|e| LedgerError::open_failed(path, e))?;
    let source = path.display().to_string();

    let accounts: Vec<Account> =
        read_rows::<AccountRow, _, _>(file, Terminator::Any(RECORD_SEPARATOR), &source)?;
    let imported = accounts.len();
    for account in accounts {
        ledger.append_account(account);
    }

    tracing::info!(path = %source, accounts = imported, "accounts imported");
    Ok(imported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn ledger_with(phones: &[&str]) -> Ledger {
        let mut ledger = Ledger::new();
        for (i, phone) in phones.iter().enumerate() {
            let id = ledger.register_account(phone).unwrap().id;
            ledger.deposit(id, (i as i64 + 1) * 100).unwrap();
        }
        ledger
    }

    #[test]
    fn test_export_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.txt");
        let ledger = ledger_with(&["+992000000001", "+992000000002"]);

        export_to_file(&ledger, &path).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "1;+992000000001;100|2;+992000000002;200"
        );
    }

    #[test]
    fn test_export_empty_ledger_writes_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.txt");

        export_to_file(&Ledger::new(), &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_round_trip_into_empty_ledger() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.txt");
        let source = ledger_with(&["+992000000001", "+992000000002", "+992000000003"]);
        export_to_file(&source, &path).unwrap();

        let mut target = Ledger::new();
        let imported = import_from_file(&mut target, &path).unwrap();

        assert_eq!(imported, 3);
        assert_eq!(target.accounts(), source.accounts());
        assert_eq!(target.next_account_id(), 4);
    }

    #[test]
    fn test_import_appends_without_merging() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.txt");
        fs::write(&path, "1;+992000000009;900").unwrap();
        let mut ledger = ledger_with(&["+992000000001"]);

        import_from_file(&mut ledger, &path).unwrap();

        assert_eq!(ledger.accounts().len(), 2);
        assert_eq!(ledger.find_account_by_id(1).unwrap().phone, "+992000000001");
        let registered = ledger.register_account("+992000000002").unwrap();
        assert_eq!(registered.id, 2);
    }

    #[test]
    fn test_import_stops_at_malformed_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.txt");
        fs::write(&path, "1;+992000000001;100|2;+992000000002;oops|3;+992000000003;300").unwrap();
        let mut ledger = Ledger::new();

        let imported = import_from_file(&mut ledger, &path).unwrap();

        assert_eq!(imported, 1);
        assert_eq!(ledger.accounts().len(), 1);
    }

    #[test]
    fn test_import_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        let mut ledger = Ledger::new();

        let result = import_from_file(&mut ledger, &path);

        assert!(matches!(result, Err(LedgerError::FileNotFound { .. })));
    }
}
