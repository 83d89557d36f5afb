//! CLI module for ssefeed.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version display
//! - Streaming a file or stdin to JSON lines
//!
//! # Usage
//!
//! ```ignore
//! use ssefeed::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! run_cli_command(command).await?;
//! ```

pub mod args;
pub mod run;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, RunOptions, USAGE};
pub use run::{handle_run_command, stream_to_writer};
pub use version::{version_string, VERSION};

use color_eyre::Result;

/// Run a parsed CLI command.
pub async fn run_cli_command(command: CliCommand) -> Result<()> {
    match command {
        CliCommand::Version => {
            println!("{}", version_string());
            Ok(())
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliCommand::Run(options) => handle_run_command(options).await,
    }
}
