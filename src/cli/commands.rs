//! Subcommand execution
//!
//! Each subcommand builds a fresh ledger from the CLI configuration, loads
//! its input and writes a human-readable report to `output`.

use crate::cli::{CliArgs, Command};
use crate::core::Ledger;
use crate::io;
use crate::strategy::{create_strategy, QueryStrategy};
use crate::types::{AccountId, LedgerError};
use std::io::Write;
use std::path::Path;

/// Run the parsed command, writing its report to `output`
///
/// # Errors
///
/// Returns the first ledger, strategy or I/O error encountered.
pub fn run(args: &CliArgs, output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut ledger = Ledger::with_config(args.to_ledger_config());

    match &args.command {
        Command::Summary { dir } => {
            let strategy = create_strategy(args.strategy, Some(args.to_worker_config()))?;
            summary(&mut ledger, strategy.as_ref(), dir, output)
        }
        Command::History {
            dir,
            account,
            out,
            chunk,
        } => history(&mut ledger, dir, *account, out, *chunk, output),
        Command::Convert { file, out } => convert(&mut ledger, file, out, output),
    }
}

fn summary(
    ledger: &mut Ledger,
    strategy: &dyn QueryStrategy,
    dir: &Path,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    io::import(ledger, dir)?;

    writeln!(output, "id;phone;balance")?;
    for account in ledger.accounts() {
        writeln!(output, "{};{};{}", account.id, account.phone, account.balance)?;
    }

    let total = strategy.sum_payments(ledger)?;
    writeln!(output, "payments: {}", ledger.payments().len())?;
    writeln!(output, "total: {}", total)?;
    Ok(())
}

fn history(
    ledger: &mut Ledger,
    dir: &Path,
    account_id: AccountId,
    out: &Path,
    records: usize,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    io::import(ledger, dir)?;

    let payments = ledger.export_account_history(account_id)?;
    let written = io::history_to_files(&payments, out, records)?;

    writeln!(
        output,
        "{} payments of account {} written to {} file(s)",
        payments.len(),
        account_id,
        written.len()
    )?;
    for path in written {
        writeln!(output, "{}", path.display())?;
    }
    Ok(())
}

fn convert(
    ledger: &mut Ledger,
    file: &Path,
    out: &Path,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let imported = io::import_from_file(ledger, file)?;
    io::export(ledger, out)?;

    writeln!(output, "{} accounts converted", imported)?;
    Ok(())
}
