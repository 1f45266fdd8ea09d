mod cli;
mod dispatch;
mod output;
mod stdout_io;
mod watch;

use std::process::ExitCode;
use std::time::Instant;

use bankdash_client::ClientError;
use bankdash_client::refresh::RefreshPolicy;
use clap::{Parser, error::ErrorKind};
use stdout_io::{write_stdout_line, write_stdout_text};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_VAR: &str = "BANKDASH_LOG";

const ROOT_HELP: &str = "bankdash - bank account history and analytics in the terminal

Usage:
  bankdash <command>

Start here:
  bankdash account list --snapshot customer.json
  bankdash history --account <number>
  bankdash analytics --account <number> --month 2024-03
";

const TOP_LEVEL_HELP: &str = "bankdash - bank account history and analytics in the terminal

USAGE: bankdash [--api-url <url> | --snapshot <path>] <command>

Choose a data source:
  --api-url <url>          Bank backend (or BANKDASH_API_URL, token in BANKDASH_TOKEN)
  --snapshot <path>        Saved customer JSON with embedded transactions (or BANKDASH_SNAPSHOT)

Commands:
  bankdash account list                               Show accounts, balances, and cards
  bankdash history --account <number>                 List transactions, newest first
  bankdash history --input <path> --card <card>       List a raw JSON/CSV transaction export
  bankdash analytics --account <number>               Monthly income and expenses vs last month
  bankdash watch --account <number>                   Refresh analytics every 30 seconds

Every command accepts --json for machine-readable output.
Set BANKDASH_LOG=debug to see diagnostics on stderr.
Run `bankdash <command> --help` for command usage.
";

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }
    let cli = match cli::Cli::try_parse() {
        Ok(value) => value,
        Err(err) => return handle_parse_error(&err, &raw_args),
    };
    let mode = output::mode_for_command(&cli.command);

    if let cli::Commands::Watch { max_refreshes, .. } = &cli.command {
        let watched = watch::run_watch(
            RefreshPolicy::default(),
            *max_refreshes,
            Instant::now(),
            |refresh| {
                let success = dispatch::dispatch(&cli, dispatch::today())?;
                if refresh > 1 && mode == output::OutputMode::Text {
                    write_stdout_line("").map_err(watch::output_error)?;
                }
                output::print_success(&success, mode).map_err(watch::output_error)
            },
            watch::sleep_for,
        );
        return match watched {
            Ok(_) => Ok(ExitCode::SUCCESS),
            Err(error) => report_failure(&error, mode),
        };
    }

    match dispatch::dispatch(&cli, dispatch::today()) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => report_failure(&error, mode),
    }
}

fn handle_parse_error(err: &clap::Error, raw_args: &[String]) -> Result<ExitCode, ExitCode> {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let text = if is_top_level_help_request(raw_args) {
                TOP_LEVEL_HELP.to_string()
            } else {
                err.to_string()
            };
            if write_stdout_text(&text).is_err() {
                return Err(ExitCode::from(2));
            }
            return Ok(ExitCode::SUCCESS);
        }
        ErrorKind::DisplayVersion => {
            if write_stdout_text(&err.to_string()).is_err() {
                return Err(ExitCode::from(2));
            }
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let command_hint = if matches!(
        err.kind(),
        ErrorKind::MissingRequiredArgument
            | ErrorKind::InvalidValue
            | ErrorKind::ValueValidation
            | ErrorKind::ArgumentConflict
            | ErrorKind::UnknownArgument
            | ErrorKind::InvalidSubcommand
    ) {
        command_path_from_args(raw_args)
    } else {
        None
    };
    let clean_message = strip_clap_boilerplate(&err.to_string());
    let parse_error =
        ClientError::invalid_argument_for_command(&clean_message, command_hint.as_deref());
    report_failure(&parse_error, infer_requested_output_mode(raw_args))
}

fn report_failure(error: &ClientError, mode: output::OutputMode) -> Result<ExitCode, ExitCode> {
    tracing::debug!(code = %error.code, "command failed");
    if output::print_failure(error, mode).is_err() {
        return Err(ExitCode::from(2));
    }
    Err(exit_code_for_error(error))
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Drops clap's usage footer so "What to do next" is the only guidance shown.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_start_matches("error: ").trim_end().to_string()
}

fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let mut words = raw_args.iter().skip(1).map(String::as_str);
    let first = words.find(|value| matches!(*value, "account" | "history" | "analytics" | "watch"))?;
    let hint = match (first, words.next()) {
        ("account", Some("list")) => "account list",
        (command, _) => command,
    };
    Some(hint.to_string())
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if error.is_internal() {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}
