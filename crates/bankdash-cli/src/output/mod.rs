mod accounts_text;
mod analytics_text;
mod error_text;
mod format;
mod history_text;
mod json;
mod mode;

use std::io;

use bankdash_client::{ClientError, CommandName, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command {
        CommandName::AccountList => accounts_text::render_accounts(&success.data),
        CommandName::History => history_text::render_history(&success.data),
        CommandName::Analytics => analytics_text::render_analytics(&success.data),
    }
}
