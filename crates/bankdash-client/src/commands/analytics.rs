use chrono::{Datelike, NaiveDate};

use crate::aggregate::date::parse_period_strict;
use crate::aggregate::{Period, PeriodTotals};
use crate::analytics::{MonthlyAnalytics, available_years};
use crate::commands::common::{LoadedSubject, SourceOptions, Subject, load_subject};
use crate::contracts::envelope::{CommandName, SuccessEnvelope, success};
use crate::contracts::types::{AnalyticsData, BreakdownRow, DailyRow, InsightRow, PeriodTotalsRow};
use crate::{ClientError, ClientResult};

const COMMAND: &str = CommandName::Analytics.as_str();

#[derive(Debug, Clone)]
pub struct AnalyticsOptions {
    pub source: SourceOptions,
    pub subject: Subject,
    /// `YYYY-MM`; defaults to the month containing `today`.
    pub month: Option<String>,
    pub today: NaiveDate,
    pub stdin_override: Option<String>,
}

pub fn run(options: &AnalyticsOptions) -> ClientResult<SuccessEnvelope> {
    let period = resolve_period(options.month.as_deref(), options.today)?;
    let loaded = load_subject(
        &options.source,
        &options.subject,
        options.stdin_override.clone(),
        COMMAND,
    )?;
    let report = MonthlyAnalytics::build(&loaded.transactions, &loaded.card, &loaded.currency, period);
    success(CommandName::Analytics, analytics_data(&loaded, &report, options.today.year()))
}

pub(crate) fn resolve_period(month: Option<&str>, today: NaiveDate) -> ClientResult<Period> {
    match month {
        Some(value) => parse_period_strict(value, COMMAND),
        None => Period::containing(today).ok_or_else(|| {
            ClientError::invalid_argument_for_command(
                "Could not determine the current month; pass `--month YYYY-MM`.",
                Some(COMMAND),
            )
        }),
    }
}

fn analytics_data(
    loaded: &LoadedSubject,
    report: &MonthlyAnalytics,
    current_year: i32,
) -> AnalyticsData {
    let symbol = loaded.currency_symbol();
    AnalyticsData {
        account_number: loaded.masked_account_number(),
        card: loaded.masked_card(),
        currency: report.currency.clone(),
        currency_symbol: symbol.clone(),
        current: totals_row(Some(report.period), &report.current),
        previous: totals_row(report.previous_period, &report.previous),
        transaction_count: report.transaction_count,
        income_change: report.income_change.map(|value| value.round_dp(2)),
        expenses_change: report.expenses_change.map(|value| value.round_dp(2)),
        daily: report
            .daily
            .iter()
            .map(|day| DailyRow {
                day: day.day,
                income: day.totals.income,
                expenses: day.totals.expenses,
            })
            .collect(),
        breakdown: report
            .breakdown
            .iter()
            .map(|slice| BreakdownRow {
                label: slice.kind.as_str().to_string(),
                value: slice.value,
            })
            .collect(),
        insights: report
            .insights
            .iter()
            .map(|insight| InsightRow {
                code: insight.code().to_string(),
                message: insight.message(&symbol),
            })
            .collect(),
        available_years: available_years(&loaded.accounts, current_year),
    }
}

fn totals_row(period: Option<Period>, totals: &PeriodTotals) -> PeriodTotalsRow {
    PeriodTotalsRow {
        period: period.map(|value| value.to_string()),
        income: totals.income,
        expenses: totals.expenses,
        net: totals.net(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::resolve_period;
    use crate::aggregate::Period;

    #[test]
    fn month_defaults_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 17);
        assert!(today.is_some());
        if let Some(today) = today {
            let period = resolve_period(None, today);
            assert!(period.is_ok());
            if let Ok(period) = period {
                assert_eq!(Some(period), Period::new(2024, 3));
            }

            let explicit = resolve_period(Some("2023-12"), today);
            assert!(explicit.is_ok());
            if let Ok(period) = explicit {
                assert_eq!(period.to_string(), "2023-12");
            }

            let invalid = resolve_period(Some("2023-13"), today);
            assert!(invalid.is_err());
            if let Err(error) = invalid {
                assert_eq!(error.code, "invalid_argument");
            }
        }
    }
}
