use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CustomerSummary {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountRow {
    pub account_number: String,
    pub masked_account_number: String,
    pub masked_card_number: String,
    pub balance: Decimal,
    pub currency: String,
    pub currency_symbol: String,
    pub status: String,
    pub card_expiration_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountsData {
    pub customer: CustomerSummary,
    pub accounts: Vec<AccountRow>,
    pub available_years: Vec<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryFilterEcho {
    pub from: Option<String>,
    pub to: Option<String>,
    pub direction: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistorySummary {
    pub rows_read: usize,
    pub duplicates_removed: usize,
    pub rows_returned: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryRow {
    pub transaction_date: String,
    pub direction: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: String,
    pub description: String,
    pub counterparty_card: String,
    pub sender_name: Option<String>,
    pub receiver_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryData {
    pub account_number: Option<String>,
    pub card: String,
    pub filter: HistoryFilterEcho,
    pub summary: HistorySummary,
    pub rows: Vec<HistoryRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodTotalsRow {
    pub period: Option<String>,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyRow {
    pub day: u32,
    pub income: Decimal,
    pub expenses: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct BreakdownRow {
    pub label: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsightRow {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsData {
    pub account_number: Option<String>,
    pub card: String,
    pub currency: String,
    pub currency_symbol: String,
    pub current: PeriodTotalsRow,
    pub previous: PeriodTotalsRow,
    pub transaction_count: usize,
    pub income_change: Option<Decimal>,
    pub expenses_change: Option<Decimal>,
    pub daily: Vec<DailyRow>,
    pub breakdown: Vec<BreakdownRow>,
    pub insights: Vec<InsightRow>,
    pub available_years: Vec<i32>,
}
