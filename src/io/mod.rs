//! I/O module
//!
//! Handles ledger persistence. All file I/O is synchronous.
//!
//! # Components
//!
//! - `dump_format` - Record layout, row types and csv reader/writer configuration
//! - `single_file` - All accounts on one `|`-separated line
//! - `dump_dir` - Directory dumps of accounts, payments and favorites
//! - `history` - Payment history split into fixed-size files

pub mod dump_dir;
pub mod dump_format;
pub mod history;
pub mod single_file;

pub use dump_dir::{export, import, DumpSummary};
pub use dump_format::{AccountRow, FavoriteRow, PaymentRow};
pub use history::history_to_files;
pub use single_file::{export_to_file, import_from_file};
