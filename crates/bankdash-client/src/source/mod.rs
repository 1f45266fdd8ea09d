//! Where customer and transaction data comes from.

pub mod http;
pub mod snapshot;

use crate::model::{Account, Customer, Page, Transaction};
use crate::{ClientError, ClientResult};

pub use http::HttpBankSource;
pub use snapshot::SnapshotBankSource;

/// Upper bound on pages read for one account, in case a backend keeps
/// reporting more pages than it serves.
pub const MAX_PAGES: u32 = 1_000;

pub trait BankSource {
    fn customer(&self) -> ClientResult<Customer>;

    fn transactions_page(
        &self,
        account_number: &str,
        page: u32,
        size: u32,
    ) -> ClientResult<Page<Transaction>>;
}

/// Reads every page of an account's history, oldest page first.
pub fn fetch_account_transactions(
    source: &dyn BankSource,
    account_number: &str,
    page_size: u32,
) -> ClientResult<Vec<Transaction>> {
    let mut transactions = Vec::new();

    for page_number in 0..MAX_PAGES {
        let page = source.transactions_page(account_number, page_number, page_size)?;
        tracing::debug!(
            account = account_number,
            page = page_number,
            rows = page.content.len(),
            total_pages = page.total_pages,
            "fetched transaction page"
        );
        let is_last = page.is_last();
        transactions.extend(page.content);
        if is_last {
            return Ok(transactions);
        }
    }

    tracing::warn!(
        account = account_number,
        max_pages = MAX_PAGES,
        "stopped paging before the backend reported the last page"
    );
    Ok(transactions)
}

/// Resolves an account by its full number or by a unique suffix.
pub fn find_account<'a>(customer: &'a Customer, account_number: &str) -> ClientResult<&'a Account> {
    let wanted = account_number.trim();
    if wanted.is_empty() {
        return Err(ClientError::invalid_argument(
            "Account number must not be empty.",
        ));
    }

    if let Some(account) = customer
        .accounts
        .iter()
        .find(|account| account.account_number == wanted)
    {
        return Ok(account);
    }

    let matches = customer
        .accounts
        .iter()
        .filter(|account| account.account_number.ends_with(wanted))
        .collect::<Vec<&Account>>();

    match matches.as_slice() {
        [account] => Ok(account),
        [] => Err(ClientError::account_not_found(
            wanted,
            customer
                .accounts
                .iter()
                .map(|account| account.account_number.clone())
                .collect(),
        )),
        _ => Err(ClientError::account_ambiguous(
            wanted,
            matches
                .iter()
                .map(|account| account.account_number.clone())
                .collect(),
        )),
    }
}
