// CLI module
// Command-line interface, argument parsing and subcommand execution

mod args;
mod commands;

pub use args::{CliArgs, Command, RejectPolicyType, StrategyType};
pub use commands::run;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// On invalid arguments, or `--help`, clap prints the message and exits the
/// process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
