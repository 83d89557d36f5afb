//! Command-line argument parsing for the ssefeed CLI.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use std::path::PathBuf;

use thiserror::Error;

/// Usage text printed by `--help`.
pub const USAGE: &str = "\
Usage: ssefeed [OPTIONS] [FILE]

Parse an event stream from FILE (or stdin) and print one JSON object per message.

Options:
  -s, --sentinel <TEXT>  Treat a payload as complete once it ends with TEXT
  -c, --capacity <N>     Messages buffered between reader and printer
  -h, --help             Show this help
  -V, --version          Show version information

Environment:
  SSEFEED_CHANNEL_CAPACITY, SSEFEED_READ_BUFFER, RUST_LOG";

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Stream the input (default)
    Run(RunOptions),
}

/// Options for streaming an input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    /// File to read; stdin when absent
    pub input: Option<PathBuf>,
    /// Payload terminator enabling early decoding of the trailing message
    pub sentinel: Option<String>,
    /// Channel capacity override
    pub capacity: Option<usize>,
}

/// Errors from argument parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid value {value:?} for {flag}")]
    InvalidValue { flag: String, value: String },
    #[error("unknown option {0}")]
    UnknownOption(String),
    #[error("unexpected argument {0}")]
    UnexpectedArgument(String),
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use ssefeed::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["ssefeed".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut options = RunOptions::default();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--sentinel" | "-s" => {
                let value = args.next().ok_or_else(|| ArgsError::MissingValue(arg.clone()))?;
                options.sentinel = Some(value);
            }
            "--capacity" | "-c" => {
                let value = args.next().ok_or_else(|| ArgsError::MissingValue(arg.clone()))?;
                let capacity = value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or(ArgsError::InvalidValue {
                        flag: arg.clone(),
                        value,
                    })?;
                options.capacity = Some(capacity);
            }
            "-" => set_input(&mut options, arg)?,
            flag if flag.starts_with('-') => return Err(ArgsError::UnknownOption(arg)),
            _ => set_input(&mut options, arg)?,
        }
    }

    Ok(CliCommand::Run(options))
}

fn set_input(options: &mut RunOptions, arg: String) -> Result<(), ArgsError> {
    if options.input.is_some() {
        return Err(ArgsError::UnexpectedArgument(arg));
    }
    // "-" means stdin, same as no argument
    if arg != "-" {
        options.input = Some(PathBuf::from(arg));
    }
    Ok(())
}
