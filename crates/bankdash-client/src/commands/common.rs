use std::path::PathBuf;

use crate::analytics::currency_symbol;
use crate::config::{Settings, SettingsOverrides, SourceSetting};
use crate::input::load_transactions;
use crate::model::{Account, Transaction, mask_account_number, mask_card_number};
use crate::source::{
    BankSource, HttpBankSource, SnapshotBankSource, fetch_account_transactions, find_account,
};
use crate::{ClientError, ClientResult};

/// Currency assumed for raw input that carries no currency code.
pub const FALLBACK_CURRENCY: &str = "UAH";

/// Source selection shared by every command.
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    pub api_url: Option<String>,
    pub snapshot: Option<PathBuf>,
}

impl SourceOptions {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            api_url: self.api_url.clone(),
            snapshot: self.snapshot.clone(),
        }
    }
}

/// Whose transactions a command looks at.
#[derive(Debug, Clone)]
pub enum Subject {
    Account(String),
    Input { path: String, card: String },
}

/// Transactions plus the context needed to interpret them.
#[derive(Debug, Clone)]
pub(crate) struct LoadedSubject {
    pub(crate) account: Option<Account>,
    pub(crate) accounts: Vec<Account>,
    pub(crate) card: String,
    pub(crate) currency: String,
    pub(crate) transactions: Vec<Transaction>,
}

impl LoadedSubject {
    pub(crate) fn masked_account_number(&self) -> Option<String> {
        self.account
            .as_ref()
            .map(|account| mask_account_number(&account.account_number))
    }

    pub(crate) fn masked_card(&self) -> String {
        mask_card_number(&self.card)
    }

    pub(crate) fn currency_symbol(&self) -> String {
        currency_symbol(&self.currency).to_string()
    }
}

pub(crate) fn open_source(settings: &Settings) -> ClientResult<Box<dyn BankSource>> {
    match &settings.source {
        SourceSetting::Api { base_url } => Ok(Box::new(HttpBankSource::new(
            base_url,
            settings.token.clone(),
            settings.timeout,
        )?)),
        SourceSetting::Snapshot { path } => Ok(Box::new(SnapshotBankSource::open(path)?)),
        SourceSetting::Unset => Err(ClientError::source_missing()),
    }
}

pub(crate) fn resolve_settings(options: &SourceOptions) -> ClientResult<Settings> {
    Settings::from_env(&options.overrides())
}

pub(crate) fn load_subject(
    options: &SourceOptions,
    subject: &Subject,
    stdin_override: Option<String>,
    command: &str,
) -> ClientResult<LoadedSubject> {
    match subject {
        Subject::Account(account_number) => {
            let settings = resolve_settings(options)?;
            let source = open_source(&settings)?;
            load_account(source.as_ref(), account_number, settings.page_size)
        }
        Subject::Input { path, card } => {
            let card = card.trim();
            if card.is_empty() {
                return Err(ClientError::invalid_argument_for_command(
                    "`--card` must name the card the input is viewed from.",
                    Some(command),
                ));
            }
            let transactions = load_transactions(path, stdin_override, command)?;
            let currency = transactions
                .iter()
                .map(|transaction| transaction.currency_code.trim())
                .find(|code| !code.is_empty())
                .unwrap_or(FALLBACK_CURRENCY)
                .to_string();
            Ok(LoadedSubject {
                account: None,
                accounts: Vec::new(),
                card: card.to_string(),
                currency,
                transactions,
            })
        }
    }
}

pub(crate) fn load_account(
    source: &dyn BankSource,
    account_number: &str,
    page_size: u32,
) -> ClientResult<LoadedSubject> {
    let customer = source.customer()?;
    let account = find_account(&customer, account_number)?.clone();
    let transactions =
        fetch_account_transactions(source, &account.account_number, page_size)?;
    tracing::info!(
        account = %mask_account_number(&account.account_number),
        transactions = transactions.len(),
        "loaded account history"
    );

    Ok(LoadedSubject {
        card: account.card_number().to_string(),
        currency: account.currency.clone(),
        accounts: customer.accounts,
        account: Some(account),
        transactions,
    })
}
