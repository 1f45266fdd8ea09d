use std::collections::HashMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::model::{Transaction, TransactionStatus};

/// Identity of a transaction for duplicate detection.
///
/// Timestamps compare by parsed instant so that `.408172200` and `.408` collide.
/// Unparseable timestamps fall back to their raw text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupeKey {
    posted_at: PostedAtKey,
    amount: Decimal,
    currency: String,
    sender_card: String,
    receiver_card: String,
    status: TransactionStatus,
    description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PostedAtKey {
    Parsed(NaiveDateTime),
    Raw(String),
}

impl DedupeKey {
    pub fn of(transaction: &Transaction) -> Self {
        let posted_at = match transaction.posted_at() {
            Some(value) => PostedAtKey::Parsed(value),
            None => PostedAtKey::Raw(transaction.transaction_date.clone()),
        };
        Self {
            posted_at,
            // Normalized so 100 and 100.00 are the same amount.
            amount: transaction.amount.normalize(),
            currency: transaction.currency_code.clone(),
            sender_card: transaction.sender_card().to_string(),
            receiver_card: transaction.receiver_card().to_string(),
            status: transaction.status.clone(),
            description: transaction.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateRecord {
    pub transaction: Transaction,
    /// Zero-based position in the input.
    pub source_index: usize,
    /// Zero-based position of the first occurrence it matched.
    pub matched_index: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DedupeResult {
    pub unique: Vec<Transaction>,
    pub duplicates: Vec<DuplicateRecord>,
}

pub fn dedupe_batch(transactions: &[Transaction]) -> DedupeResult {
    let mut seen: HashMap<DedupeKey, usize> = HashMap::new();
    let mut result = DedupeResult::default();

    for (source_index, transaction) in transactions.iter().enumerate() {
        let key = DedupeKey::of(transaction);
        if let Some(matched_index) = seen.get(&key) {
            result.duplicates.push(DuplicateRecord {
                transaction: transaction.clone(),
                source_index,
                matched_index: *matched_index,
            });
            continue;
        }

        seen.insert(key, source_index);
        result.unique.push(transaction.clone());
    }

    if !result.duplicates.is_empty() {
        tracing::debug!(
            duplicates = result.duplicates.len(),
            unique = result.unique.len(),
            "dropped duplicate transactions"
        );
    }

    result
}

/// First occurrence per [`DedupeKey`] wins; relative order is kept.
pub fn deduplicate(transactions: &[Transaction]) -> Vec<Transaction> {
    dedupe_batch(transactions).unique
}
