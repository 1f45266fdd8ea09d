use bankdash_client::commands;
use bankdash_client::commands::accounts::AccountListOptions;
use bankdash_client::commands::analytics::AnalyticsOptions;
use bankdash_client::commands::common::{SourceOptions, Subject};
use bankdash_client::commands::history::HistoryOptions;
use bankdash_client::{ClientError, ClientResult, SuccessEnvelope};
use chrono::{Datelike, Local, NaiveDate};

use crate::cli::{AccountCommand, Cli, Commands, IsoMonth, SubjectArgs};

pub fn dispatch(cli: &Cli, today: NaiveDate) -> ClientResult<SuccessEnvelope> {
    let source = source_options(cli);
    match &cli.command {
        Commands::Account {
            command: AccountCommand::List { .. },
        } => commands::accounts::list(&AccountListOptions {
            source,
            current_year: today.year(),
        }),
        Commands::History {
            subject,
            from,
            to,
            direction,
            ..
        } => commands::history::run(&HistoryOptions {
            source,
            subject: subject_from_args(subject, "history")?,
            from: from.as_ref().map(|value| value.as_str().to_string()),
            to: to.as_ref().map(|value| value.as_str().to_string()),
            direction: direction.clone(),
            stdin_override: None,
        }),
        Commands::Analytics { subject, month, .. } => commands::analytics::run(&analytics_options(
            source,
            subject_from_args(subject, "analytics")?,
            month.as_ref(),
            today,
        )),
        Commands::Watch { account, month, .. } => commands::analytics::run(&analytics_options(
            source,
            Subject::Account(account.clone()),
            month.as_ref(),
            today,
        )),
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn analytics_options(
    source: SourceOptions,
    subject: Subject,
    month: Option<&IsoMonth>,
    today: NaiveDate,
) -> AnalyticsOptions {
    AnalyticsOptions {
        source,
        subject,
        month: month.map(|value| value.as_str().to_string()),
        today,
        stdin_override: None,
    }
}

pub fn source_options(cli: &Cli) -> SourceOptions {
    SourceOptions {
        api_url: cli.api_url.clone(),
        snapshot: cli.snapshot.clone(),
    }
}

fn subject_from_args(args: &SubjectArgs, command: &str) -> ClientResult<Subject> {
    match (&args.account, &args.input, &args.card) {
        (Some(account), _, _) => Ok(Subject::Account(account.clone())),
        (None, Some(path), Some(card)) => Ok(Subject::Input {
            path: path.clone(),
            card: card.clone(),
        }),
        _ => Err(ClientError::invalid_argument_for_command(
            "Pass `--account <number>` or `--input <path> --card <card>`.",
            Some(command),
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use bankdash_client::commands::common::Subject;
    use chrono::NaiveDate;

    use super::{dispatch, source_options, subject_from_args};
    use crate::cli::{Commands, SubjectArgs, parse_from};

    fn march() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 17).unwrap_or(NaiveDate::MIN)
    }

    #[test]
    fn global_flags_become_source_options() {
        let parsed = parse_from([
            "bankdash",
            "--api-url",
            "http://localhost:8080",
            "account",
            "list",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            let options = source_options(&cli);
            assert_eq!(options.api_url.as_deref(), Some("http://localhost:8080"));
            assert!(options.snapshot.is_none());
        }
    }

    #[test]
    fn subject_prefers_account_then_input() {
        let account = subject_from_args(
            &SubjectArgs {
                account: Some("6001".to_string()),
                input: None,
                card: None,
            },
            "history",
        );
        assert!(matches!(account, Ok(Subject::Account(ref number)) if number == "6001"));

        let input = subject_from_args(
            &SubjectArgs {
                account: None,
                input: Some("-".to_string()),
                card: Some("4111".to_string()),
            },
            "history",
        );
        assert!(matches!(input, Ok(Subject::Input { ref path, ref card }) if path == "-" && card == "4111"));

        let missing = subject_from_args(
            &SubjectArgs {
                account: None,
                input: None,
                card: None,
            },
            "analytics",
        );
        assert!(missing.is_err());
        if let Err(error) = missing {
            assert_eq!(error.code, "invalid_argument");
        }
    }

    #[test]
    fn missing_snapshot_fails_with_snapshot_error() {
        let parsed = parse_from([
            "bankdash",
            "--snapshot",
            "/nonexistent/bankdash/customer.json",
            "account",
            "list",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(cli.snapshot, Some(PathBuf::from("/nonexistent/bankdash/customer.json")));
            let response = dispatch(&cli, march());
            assert!(response.is_err());
            if let Err(error) = response {
                assert_eq!(error.code, "snapshot_unreadable");
            }
        }
    }

    #[test]
    fn invalid_input_card_is_rejected_before_reading() {
        let parsed = parse_from(["bankdash", "analytics", "--input", "rows.json", "--card", " "]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(cli.command, Commands::Analytics { .. }));
            let response = dispatch(&cli, march());
            assert!(response.is_err());
            if let Err(error) = response {
                assert_eq!(error.code, "invalid_argument");
            }
        }
    }
}
