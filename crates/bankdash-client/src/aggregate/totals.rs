use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::direction::{Direction, classify_direction};
use crate::model::Transaction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PeriodTotals {
    pub income: Decimal,
    pub expenses: Decimal,
}

impl PeriodTotals {
    pub fn net(&self) -> Decimal {
        self.income.saturating_sub(self.expenses)
    }

    /// Sums clamp at the `Decimal` range instead of overflowing.
    fn add(&mut self, direction: Direction, amount: Decimal) {
        let slot = match direction {
            Direction::Incoming => &mut self.income,
            Direction::Outgoing => &mut self.expenses,
        };
        *slot = slot.checked_add(amount).unwrap_or_else(|| {
            tracing::warn!("transaction total exceeds the decimal range; clamping");
            slot.saturating_add(amount)
        });
    }
}

/// Sums COMPLETED amounts by direction relative to `reference_card`.
pub fn aggregate_period(transactions: &[Transaction], reference_card: &str) -> PeriodTotals {
    let mut totals = PeriodTotals::default();
    for transaction in transactions {
        if !transaction.status.is_completed() {
            continue;
        }
        totals.add(
            classify_direction(transaction, reference_card),
            transaction.amount,
        );
    }
    totals
}

/// Per day-of-month totals of COMPLETED records, ascending by day.
///
/// Callers pass a single month's window; undated records are skipped.
pub fn bucket_by_day(
    transactions: &[Transaction],
    reference_card: &str,
) -> BTreeMap<u32, PeriodTotals> {
    let mut buckets: BTreeMap<u32, PeriodTotals> = BTreeMap::new();
    for transaction in transactions {
        if !transaction.status.is_completed() {
            continue;
        }
        let Some(posted_at) = transaction.posted_at() else {
            continue;
        };
        buckets.entry(posted_at.day()).or_default().add(
            classify_direction(transaction, reference_card),
            transaction.amount,
        );
    }
    buckets
}

/// `(current - previous) / previous * 100`, or `None` when there is no previous value.
pub fn compute_percent_change(current: Decimal, previous: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }
    current
        .checked_sub(previous)?
        .checked_div(previous)?
        .checked_mul(Decimal::ONE_HUNDRED)
}
