//! Month-over-month analytics for a single account.

pub mod calendar;
pub mod insights;

use rust_decimal::Decimal;

use crate::aggregate::{
    Period, PeriodTotals, aggregate_period, bucket_by_day, compute_percent_change, deduplicate,
};
use crate::model::Transaction;

pub use calendar::available_years;
pub use insights::{Insight, derive_insights};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTotals {
    pub day: u32,
    pub totals: PeriodTotals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownKind {
    Income,
    Expenses,
}

impl BreakdownKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expenses => "expenses",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakdownSlice {
    pub kind: BreakdownKind,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyAnalytics {
    pub period: Period,
    pub previous_period: Option<Period>,
    pub currency: String,
    pub current: PeriodTotals,
    pub previous: PeriodTotals,
    /// Every record in the month, completed or not.
    pub transaction_count: usize,
    pub income_change: Option<Decimal>,
    pub expenses_change: Option<Decimal>,
    pub daily: Vec<DailyTotals>,
    pub breakdown: Vec<BreakdownSlice>,
    pub insights: Vec<Insight>,
}

impl MonthlyAnalytics {
    pub fn build(
        transactions: &[Transaction],
        reference_card: &str,
        currency: &str,
        period: Period,
    ) -> Self {
        let unique = deduplicate(transactions);
        let previous_period = period.previous();

        let current_window = window(&unique, Some(period));
        let previous_window = window(&unique, previous_period);

        let current = aggregate_period(&current_window, reference_card);
        let previous = aggregate_period(&previous_window, reference_card);
        let transaction_count = current_window.len();

        let daily = bucket_by_day(&current_window, reference_card)
            .into_iter()
            .map(|(day, totals)| DailyTotals { day, totals })
            .collect::<Vec<DailyTotals>>();

        let mut breakdown = Vec::new();
        if current.income > Decimal::ZERO {
            breakdown.push(BreakdownSlice {
                kind: BreakdownKind::Income,
                value: current.income,
            });
        }
        if current.expenses > Decimal::ZERO {
            breakdown.push(BreakdownSlice {
                kind: BreakdownKind::Expenses,
                value: current.expenses,
            });
        }

        let insights = derive_insights(&current, &previous, period, transaction_count, currency);

        Self {
            period,
            previous_period,
            currency: currency.to_string(),
            current,
            previous,
            transaction_count,
            income_change: compute_percent_change(current.income, previous.income),
            expenses_change: compute_percent_change(current.expenses, previous.expenses),
            daily,
            breakdown,
            insights,
        }
    }

    pub fn net(&self) -> Decimal {
        self.current.net()
    }
}

pub fn currency_symbol(currency: &str) -> &'static str {
    match currency.to_ascii_uppercase().as_str() {
        "USD" => "$",
        "EUR" => "€",
        _ => "₴",
    }
}

fn window(transactions: &[Transaction], period: Option<Period>) -> Vec<Transaction> {
    let Some(period) = period else {
        return Vec::new();
    };
    transactions
        .iter()
        .filter(|transaction| {
            transaction
                .posted_at()
                .is_some_and(|posted_at| period.contains(&posted_at))
        })
        .cloned()
        .collect()
}
