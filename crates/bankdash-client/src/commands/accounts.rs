use crate::ClientResult;
use crate::analytics::{available_years, currency_symbol};
use crate::commands::common::{SourceOptions, open_source, resolve_settings};
use crate::contracts::envelope::{CommandName, SuccessEnvelope, success};
use crate::contracts::types::{AccountRow, AccountsData, CustomerSummary};
use crate::model::{Customer, mask_account_number, mask_card_number};

#[derive(Debug, Clone)]
pub struct AccountListOptions {
    pub source: SourceOptions,
    pub current_year: i32,
}

pub fn list(options: &AccountListOptions) -> ClientResult<SuccessEnvelope> {
    let settings = resolve_settings(&options.source)?;
    let source = open_source(&settings)?;
    let customer = source.customer()?;
    success(CommandName::AccountList, accounts_data(&customer, options.current_year))
}

pub(crate) fn accounts_data(customer: &Customer, current_year: i32) -> AccountsData {
    let accounts = customer
        .accounts
        .iter()
        .map(|account| AccountRow {
            account_number: account.account_number.clone(),
            masked_account_number: mask_account_number(&account.account_number),
            masked_card_number: mask_card_number(account.card_number()),
            balance: account.balance,
            currency: account.currency.clone(),
            currency_symbol: currency_symbol(&account.currency).to_string(),
            status: account.status.clone(),
            card_expiration_year: account.expiration_year(),
        })
        .collect::<Vec<AccountRow>>();

    AccountsData {
        customer: CustomerSummary {
            name: format!("{} {}", customer.first_name, customer.last_name)
                .trim()
                .to_string(),
            email: customer.email.clone(),
        },
        accounts,
        available_years: available_years(&customer.accounts, current_year),
    }
}
