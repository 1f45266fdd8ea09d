use crate::aggregate::date::build_range;
use crate::aggregate::direction::counterparty_card;
use crate::aggregate::{
    DirectionFilter, HistoryFilter, classify_direction, dedupe_batch, select_history,
};
use crate::commands::common::{SourceOptions, Subject, load_subject};
use crate::contracts::envelope::{CommandName, SuccessEnvelope, success};
use crate::contracts::types::{HistoryData, HistoryFilterEcho, HistoryRow, HistorySummary};
use crate::model::{Transaction, last_four};
use crate::{ClientError, ClientResult};

const COMMAND: &str = CommandName::History.as_str();

#[derive(Debug, Clone)]
pub struct HistoryOptions {
    pub source: SourceOptions,
    pub subject: Subject,
    pub from: Option<String>,
    pub to: Option<String>,
    pub direction: Option<String>,
    pub stdin_override: Option<String>,
}

pub fn run(options: &HistoryOptions) -> ClientResult<SuccessEnvelope> {
    let filter = parse_filter(options)?;
    let loaded = load_subject(
        &options.source,
        &options.subject,
        options.stdin_override.clone(),
        COMMAND,
    )?;

    let batch = dedupe_batch(&loaded.transactions);
    let listed = select_history(&batch.unique, &loaded.card, &filter);
    let rows = listed
        .iter()
        .map(|transaction| history_row(transaction, &loaded.card))
        .collect::<Vec<HistoryRow>>();

    let data = HistoryData {
        account_number: loaded.masked_account_number(),
        card: loaded.masked_card(),
        filter: HistoryFilterEcho {
            from: options.from.clone(),
            to: options.to.clone(),
            direction: filter.direction.as_str().to_string(),
        },
        summary: HistorySummary {
            rows_read: loaded.transactions.len(),
            duplicates_removed: batch.duplicates.len(),
            rows_returned: rows.len(),
        },
        rows,
    };
    success(CommandName::History, data)
}

fn parse_filter(options: &HistoryOptions) -> ClientResult<HistoryFilter> {
    let range = build_range(options.from.as_deref(), options.to.as_deref(), COMMAND)?;
    let direction = match options.direction.as_deref() {
        Some(value) => DirectionFilter::parse(value).ok_or_else(|| {
            ClientError::invalid_argument_for_command(
                "`direction` must be one of: all, sent, received.",
                Some(COMMAND),
            )
        })?,
        None => DirectionFilter::All,
    };
    Ok(HistoryFilter { range, direction })
}

fn history_row(transaction: &Transaction, card: &str) -> HistoryRow {
    let counterparty = counterparty_card(transaction, card);
    HistoryRow {
        transaction_date: transaction.transaction_date.clone(),
        direction: classify_direction(transaction, card).as_str().to_string(),
        amount: transaction.amount,
        currency: transaction.currency_code.clone(),
        status: transaction.status.as_str().to_string(),
        description: transaction.description.clone(),
        counterparty_card: if counterparty.is_empty() {
            String::new()
        } else {
            format!("**** {}", last_four(&counterparty))
        },
        sender_name: transaction.sender.as_ref().and_then(|party| party.full_name()),
        receiver_name: transaction
            .receiver
            .as_ref()
            .and_then(|party| party.full_name()),
    }
}
