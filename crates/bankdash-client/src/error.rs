use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `bankdash {cmd} --help` for usage."),
            None => "Run `bankdash --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn input_schema_mismatch(
        required_headers: Vec<String>,
        optional_headers: Vec<String>,
        actual_headers: Vec<String>,
    ) -> Self {
        Self::new(
            "input_schema_mismatch",
            "CSV headers do not match the transaction input schema.",
            vec![
                "Include all required headers; optional headers may be omitted.".to_string(),
                "Do not include unknown headers.".to_string(),
                "Run `bankdash history --help` to review the input fields.".to_string(),
            ],
        )
        .with_data(json!({
            "required_headers": required_headers,
            "optional_headers": optional_headers,
            "actual_headers": actual_headers,
        }))
    }

    pub fn config_invalid(variable: &str, value: &str, expectation: &str) -> Self {
        Self::new(
            "config_invalid",
            &format!("`{variable}` has invalid value `{value}`: {expectation}."),
            vec![format!(
                "Fix or unset `{variable}` and rerun the command."
            )],
        )
        .with_data(json!({
            "variable": variable,
            "value": value,
        }))
    }

    pub fn source_missing() -> Self {
        Self::new(
            "source_missing",
            "No bank data source is configured.",
            vec![
                "Pass `--api-url <url>` or set `BANKDASH_API_URL` to read from the backend."
                    .to_string(),
                "Or pass `--snapshot <path>` to read a saved customer snapshot.".to_string(),
                "Or pass `--input <path> --card <card>` to analyse a raw transaction list."
                    .to_string(),
            ],
        )
    }

    pub fn snapshot_unreadable(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "snapshot_unreadable",
            &format!("Could not load snapshot `{location}`: {detail}"),
            vec![
                "Verify the path exists and contains a customer JSON document.".to_string(),
                "Accounts must embed their transactions under `transactions`.".to_string(),
            ],
        )
    }

    pub fn account_not_found(account_number: &str, known: Vec<String>) -> Self {
        Self::new(
            "account_not_found",
            &format!("Account `{account_number}` was not found."),
            vec![
                "Run `bankdash account list` to see available accounts.".to_string(),
                "Pass the full account number or its last digits.".to_string(),
            ],
        )
        .with_data(json!({
            "account_number": account_number,
            "known_accounts": known,
        }))
    }

    pub fn account_ambiguous(account_number: &str, matches: Vec<String>) -> Self {
        Self::new(
            "account_ambiguous",
            &format!("Account suffix `{account_number}` matches more than one account."),
            vec!["Pass more digits of the account number.".to_string()],
        )
        .with_data(json!({
            "account_number": account_number,
            "matches": matches,
        }))
    }

    pub fn backend_unreachable(url: &str, detail: &str) -> Self {
        Self::new(
            "backend_unreachable",
            &format!("Could not reach the bank backend at `{url}`: {detail}"),
            vec![
                "Check that the backend is running and `BANKDASH_API_URL` is correct.".to_string(),
                "Retry the command.".to_string(),
            ],
        )
    }

    pub fn backend_unauthorized(url: &str, status: u16) -> Self {
        Self::new(
            "backend_unauthorized",
            &format!("The bank backend rejected the request to `{url}` with status {status}."),
            vec![
                "Sign in through the bank web client to obtain a fresh access token.".to_string(),
                "Export it as `BANKDASH_TOKEN` and rerun the command.".to_string(),
            ],
        )
        .with_data(json!({
            "status": status,
        }))
    }

    pub fn backend_request_failed(url: &str, status: u16, detail: Option<&str>) -> Self {
        let message = match detail {
            Some(text) => format!("Request to `{url}` failed with status {status}: {text}"),
            None => format!("Request to `{url}` failed with status {status}."),
        };
        Self::new("backend_request_failed", &message, vec!["Retry the command.".to_string()])
            .with_data(json!({
                "status": status,
            }))
    }

    pub fn backend_decode_failed(url: &str, detail: &str) -> Self {
        Self::new(
            "backend_decode_failed",
            &format!("Response from `{url}` could not be decoded: {detail}"),
            vec!["Check that `BANKDASH_API_URL` points at the bank backend.".to_string()],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn internal_output(message: &str) -> Self {
        Self::new(
            "internal_output_error",
            &format!("Could not write command output: {message}"),
            Vec::new(),
        )
    }

    pub fn is_internal(&self) -> bool {
        self.code.starts_with("internal_")
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
