use std::fs;
use std::path::Path;

use crate::model::{Customer, Page, Transaction};
use crate::source::{BankSource, find_account};
use crate::{ClientError, ClientResult};

/// A saved customer document whose accounts embed their transactions.
#[derive(Debug, Clone)]
pub struct SnapshotBankSource {
    customer: Customer,
}

impl SnapshotBankSource {
    pub fn open(path: &Path) -> ClientResult<Self> {
        let body = fs::read_to_string(path)
            .map_err(|error| ClientError::snapshot_unreadable(path, &error.to_string()))?;
        let customer = serde_json::from_str::<Customer>(&body)
            .map_err(|error| ClientError::snapshot_unreadable(path, &error.to_string()))?;

        tracing::debug!(
            path = %path.display(),
            accounts = customer.accounts.len(),
            "loaded customer snapshot"
        );
        Ok(Self { customer })
    }

    #[cfg(test)]
    pub(crate) fn from_customer(customer: Customer) -> Self {
        Self { customer }
    }
}

impl BankSource for SnapshotBankSource {
    fn customer(&self) -> ClientResult<Customer> {
        Ok(self.customer.clone())
    }

    fn transactions_page(
        &self,
        account_number: &str,
        page: u32,
        size: u32,
    ) -> ClientResult<Page<Transaction>> {
        if size == 0 {
            return Err(ClientError::invalid_argument("Page size must be at least 1."));
        }

        let account = find_account(&self.customer, account_number)?;
        let rows = &account.transactions;
        let page_size = size as usize;
        let total_pages = rows.len().div_ceil(page_size);
        let content = rows
            .iter()
            .skip((page as usize).saturating_mul(page_size))
            .take(page_size)
            .cloned()
            .collect::<Vec<Transaction>>();

        Ok(Page {
            content,
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
            total_elements: rows.len() as u64,
            number: page,
            size,
        })
    }
}
