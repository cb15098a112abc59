//! Dump record format
//!
//! This module centralizes the on-disk record layout shared by every
//! persistence path:
//! - Row structures for serde (de)serialization, one per entity
//! - Conversion between rows and domain types; reading a row back is
//!   fallible and rejects negative balances and non-positive amounts
//! - csv reader/writer builders for `;`-separated, unquoted records
//!
//! Fields are never quoted or escaped, so a phone, category or name that
//! contains `;`, `|` or a newline does not survive a round trip.

use crate::types::{Account, AccountId, Favorite, LedgerError, Money, Payment, PaymentStatus};
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Field delimiter for every dump format
pub const FIELD_DELIMITER: u8 = b';';

/// Account record: `id;phone;balance`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRow {
    pub id: AccountId,
    pub phone: String,
    pub balance: Money,
}

/// Payment record: `id;account_id;amount;category;status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRow {
    pub id: String,
    pub account_id: AccountId,
    pub amount: Money,
    pub category: String,
    pub status: PaymentStatus,
}

/// Favorite record: `id;account_id;name;amount;category`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRow {
    pub id: String,
    pub account_id: AccountId,
    pub name: String,
    pub amount: Money,
    pub category: String,
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            phone: account.phone.clone(),
            balance: account.balance,
        }
    }
}

impl TryFrom<AccountRow> for Account {
    type Error = LedgerError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        if row.balance < 0 {
            return Err(LedgerError::invalid_record(format!(
                "account {} has negative balance {}",
                row.id, row.balance
            )));
        }

        Ok(Self {
            id: row.id,
            phone: row.phone,
            balance: row.balance,
        })
    }
}

impl From<&Payment> for PaymentRow {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.id.clone(),
            account_id: payment.account_id,
            amount: payment.amount,
            category: payment.category.clone(),
            status: payment.status,
        }
    }
}

impl TryFrom<PaymentRow> for Payment {
    type Error = LedgerError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        if row.amount <= 0 {
            return Err(LedgerError::invalid_record(format!(
                "payment {} has non-positive amount {}",
                row.id, row.amount
            )));
        }

        Ok(Self {
            id: row.id,
            account_id: row.account_id,
            amount: row.amount,
            category: row.category,
            status: row.status,
        })
    }
}

impl From<&Favorite> for FavoriteRow {
    fn from(favorite: &Favorite) -> Self {
        Self {
            id: favorite.id.clone(),
            account_id: favorite.account_id,
            name: favorite.name.clone(),
            amount: favorite.amount,
            category: favorite.category.clone(),
        }
    }
}

impl TryFrom<FavoriteRow> for Favorite {
    type Error = LedgerError;

    fn try_from(row: FavoriteRow) -> Result<Self, Self::Error> {
        if row.amount <= 0 {
            return Err(LedgerError::invalid_record(format!(
                "favorite {} has non-positive amount {}",
                row.id, row.amount
            )));
        }

        Ok(Self {
            id: row.id,
            account_id: row.account_id,
            name: row.name,
            amount: row.amount,
            category: row.category,
        })
    }
}

/// Reader configuration for records separated by `terminator`
pub fn reader_builder(terminator: Terminator) -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .quoting(false)
        .terminator(terminator);
    builder
}

/// Writer configuration for records separated by `terminator`
pub fn writer_builder(terminator: Terminator) -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(terminator);
    builder
}

/// Read records until the first malformed one
///
/// Each `Row` is deserialized and converted into `T`. A record that fails to
/// parse or to convert ends the read: it and everything after it are dropped
/// with a warning, and the records converted so far are returned.
///
/// # Errors
///
/// Returns `IoError` if the underlying reader fails.
pub fn read_rows<Row, T, R>(
    reader: R,
    terminator: Terminator,
    source: &str,
) -> Result<Vec<T>, LedgerError>
where
    Row: DeserializeOwned,
    T: TryFrom<Row, Error = LedgerError>,
    R: Read,
{
    let mut reader = reader_builder(terminator).from_reader(reader);
    let mut records = Vec::new();

    for result in reader.deserialize::<Row>() {
        let converted = match result {
            Ok(row) => T::try_from(row),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => Err(LedgerError::from(e)),
        };

        match converted {
            Ok(record) => records.push(record),
            Err(error) => {
                tracing::warn!(source, kept = records.len(), %error, "malformed record, skipping rest of file");
                break;
            }
        }
    }

    Ok(records)
}
