//! clipforge: selection-to-clipboard front end for an external agent program.
//!
//! This is the main entry point for the `clipforge` CLI. It parses arguments,
//! sets up logging, dispatches to the appropriate command handler, and maps
//! errors to exit codes.

mod cli;
mod collaborator;
mod commands;
mod compose;
pub mod config;
mod desktop;
pub mod error;
pub mod exit_codes;
mod logging;
mod pipeline;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init_logging(cli.verbose);

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Errors from run/ask were already shown in a dialog
            if !err.reported {
                eprintln!("Error: {}", err);
            }

            ExitCode::from(err.error.exit_code() as u8)
        }
    }
}
