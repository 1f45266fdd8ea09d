use std::cmp::Reverse;

use crate::aggregate::date::DateRange;
use crate::aggregate::dedupe::deduplicate;
use crate::aggregate::direction::{DirectionFilter, classify_direction};
use crate::model::Transaction;

/// Keeps records inside `range`. Undated records survive only an unbounded range.
pub fn filter_by_date_range(transactions: &[Transaction], range: &DateRange) -> Vec<Transaction> {
    if !range.is_bounded() {
        return transactions.to_vec();
    }

    let mut undated = 0usize;
    let kept = transactions
        .iter()
        .filter(|transaction| {
            let posted_at = transaction.posted_at();
            if posted_at.is_none() {
                undated += 1;
            }
            range.contains(posted_at.as_ref())
        })
        .cloned()
        .collect::<Vec<Transaction>>();

    if undated > 0 {
        tracing::debug!(undated, "excluded transactions with unparseable timestamps");
    }
    kept
}

pub fn filter_by_direction(
    transactions: &[Transaction],
    reference_card: &str,
    mode: DirectionFilter,
) -> Vec<Transaction> {
    if mode == DirectionFilter::All {
        return transactions.to_vec();
    }

    transactions
        .iter()
        .filter(|transaction| mode.admits(classify_direction(transaction, reference_card)))
        .cloned()
        .collect()
}

/// Newest first. Ties keep input order; undated records go last.
pub fn sort_by_date_descending(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by_cached_key(|transaction| Reverse(transaction.posted_at()));
    sorted
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub range: DateRange,
    pub direction: DirectionFilter,
}

/// The transaction list as the history view shows it.
pub fn history(
    transactions: &[Transaction],
    reference_card: &str,
    filter: &HistoryFilter,
) -> Vec<Transaction> {
    select_history(&deduplicate(transactions), reference_card, filter)
}

/// [`history`] over records that are already deduplicated.
pub fn select_history(
    unique: &[Transaction],
    reference_card: &str,
    filter: &HistoryFilter,
) -> Vec<Transaction> {
    let in_range = filter_by_date_range(unique, &filter.range);
    let matching = filter_by_direction(&in_range, reference_card, filter.direction);
    sort_by_date_descending(&matching)
}
