use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoMonth(pub String);

impl IsoMonth {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && [0usize, 1, 2, 3, 5, 6, 8, 9]
            .iter()
            .all(|index| bytes[*index].is_ascii_digit());
    if !shaped {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

pub fn parse_iso_month(value: &str) -> Result<IsoMonth, String> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 7
        && bytes[4] == b'-'
        && [0usize, 1, 2, 3, 5, 6]
            .iter()
            .all(|index| bytes[*index].is_ascii_digit());
    if !shaped {
        return Err("month must use YYYY-MM format".to_string());
    }

    match value[5..].parse::<u32>() {
        Ok(1..=12) => Ok(IsoMonth(value.to_string())),
        _ => Err("month must be between 01 and 12".to_string()),
    }
}

pub fn parse_direction(value: &str) -> Result<String, String> {
    match value {
        "all" | "sent" | "received" => Ok(value.to_string()),
        _ => Err("direction must be one of: all, sent, received".to_string()),
    }
}

pub const HISTORY_AFTER_HELP: &str = "\
Data sources:
  --account <number>   Read the account from the bank backend (`--api-url` /
                       BANKDASH_API_URL) or from a saved customer snapshot
                       (`--snapshot` / BANKDASH_SNAPSHOT). The last digits of the
                       account number are enough when they are unique.
  --input <path>       Read a raw transaction list instead. Use `-` for stdin.
                       Requires `--card`, the card the list is viewed from.

Input formats:
  JSON: one top-level array of backend transaction objects
  CSV:  header row with
        transactionDate,amount,currencyCode,senderCardNumber,receiverCardNumber,status[,description]

Rules:
  Duplicate records are dropped before anything else.
  `--from`/`--to` include the whole day. Records whose date cannot be read are
  left out of date-bounded listings.
  Incoming means the viewed card received the money.
";

#[derive(Debug, Parser)]
#[command(
    name = "bankdash",
    version,
    about = "terminal dashboard for bank account history and analytics",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Bank backend base URL (overrides BANKDASH_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
    /// Customer snapshot JSON file (overrides BANKDASH_SNAPSHOT)
    #[arg(long, global = true, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Args)]
pub struct SubjectArgs {
    /// Account number, or its unique trailing digits
    #[arg(long, required_unless_present = "input", conflicts_with = "input")]
    pub account: Option<String>,
    /// Raw JSON or CSV transaction list (use `-` for stdin)
    #[arg(long, requires = "card")]
    pub input: Option<String>,
    /// Card number the raw input is viewed from
    #[arg(long, requires = "input")]
    pub card: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Customer accounts
    #[command(arg_required_else_help = true)]
    Account {
        #[command(subcommand)]
        command: AccountCommand,
    },
    /// List an account's transactions, newest first
    #[command(after_long_help = HISTORY_AFTER_HELP)]
    History {
        #[command(flatten)]
        subject: SubjectArgs,
        /// First day to include (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        from: Option<IsoDate>,
        /// Last day to include (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        to: Option<IsoDate>,
        /// all, sent, or received
        #[arg(long, value_parser = parse_direction)]
        direction: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Monthly income, expenses, and insights compared with the previous month
    #[command(after_long_help = HISTORY_AFTER_HELP)]
    Analytics {
        #[command(flatten)]
        subject: SubjectArgs,
        /// Month to report (YYYY-MM); defaults to the current month
        #[arg(long, value_parser = parse_iso_month)]
        month: Option<IsoMonth>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Re-render analytics every 30 seconds until idle for 5 minutes
    Watch {
        /// Account number, or its unique trailing digits
        #[arg(long)]
        account: String,
        /// Month to report (YYYY-MM); defaults to the current month
        #[arg(long, value_parser = parse_iso_month)]
        month: Option<IsoMonth>,
        /// Stop after this many refreshes
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_refreshes: Option<u32>,
        /// Emit one JSON document per refresh
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum AccountCommand {
    /// Show the customer's accounts, balances, and cards
    List {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::{AccountCommand, Commands, parse_from, parse_iso_month};

    #[test]
    fn parse_command_paths() {
        let cases: [Vec<&str>; 10] = [
            vec!["bankdash", "account", "list"],
            vec!["bankdash", "account", "list", "--json"],
            vec!["bankdash", "--snapshot", "c.json", "account", "list"],
            vec!["bankdash", "history", "--account", "6001"],
            vec![
                "bankdash", "history", "--account", "6001", "--from", "2024-03-01", "--to",
                "2024-03-31", "--direction", "sent", "--json",
            ],
            vec!["bankdash", "history", "--input", "-", "--card", "4111"],
            vec!["bankdash", "analytics", "--account", "6001", "--month", "2024-03"],
            vec!["bankdash", "analytics", "--input", "rows.csv", "--card", "4111", "--json"],
            vec!["bankdash", "watch", "--account", "6001", "--max-refreshes", "2"],
            vec![
                "bankdash", "watch", "--account", "6001", "--api-url", "http://localhost:8080",
            ],
        ];

        for case in cases {
            let parsed = parse_from(case.clone());
            assert!(parsed.is_ok(), "failed to parse: {case:?}");
        }
    }

    #[test]
    fn parse_account_list_subcommand() {
        let parsed = parse_from(["bankdash", "account", "list", "--json"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Account {
                    command: AccountCommand::List { json: true }
                }
            ));
        }
    }

    #[test]
    fn global_source_flags_follow_the_subcommand() {
        let parsed = parse_from([
            "bankdash",
            "history",
            "--account",
            "6001",
            "--snapshot",
            "customer.json",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(
                cli.snapshot.map(|path| path.display().to_string()),
                Some("customer.json".to_string())
            );
        }
    }

    #[test]
    fn subject_requires_account_or_input_with_card() {
        assert!(parse_from(["bankdash", "history"]).is_err());
        assert!(parse_from(["bankdash", "history", "--input", "rows.json"]).is_err());
        assert!(parse_from(["bankdash", "history", "--card", "4111"]).is_err());
        assert!(
            parse_from([
                "bankdash", "history", "--account", "6001", "--input", "-", "--card", "1"
            ])
            .is_err()
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(parse_from(["bankdash", "history", "--account", "1", "--from", "2024-02-30"]).is_err());
        assert!(parse_from(["bankdash", "history", "--account", "1", "--direction", "out"]).is_err());
        assert!(parse_from(["bankdash", "analytics", "--account", "1", "--month", "2024-13"]).is_err());
        assert!(
            parse_from(["bankdash", "watch", "--account", "1", "--max-refreshes", "0"]).is_err()
        );
        assert!(parse_iso_month("2024-00").is_err());
        assert!(parse_iso_month("2024-12").is_ok());
    }

    #[test]
    fn bare_account_shows_help() {
        let parsed = parse_from(["bankdash", "account"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(
                err.kind(),
                ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            );
        }
    }
}
