use rust_decimal::Decimal;

use crate::aggregate::{Period, PeriodTotals};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insight {
    BudgetDeficit { shortfall: Decimal },
    ExpensesDecreased { saved: Decimal },
    IncomeGrew { gain: Decimal },
    SavingsRate { percent: Decimal },
    SavingsAdvice,
    PeriodStats {
        period: Period,
        operations: usize,
        currency: String,
    },
}

impl Insight {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BudgetDeficit { .. } => "budget_deficit",
            Self::ExpensesDecreased { .. } => "expenses_decreased",
            Self::IncomeGrew { .. } => "income_grew",
            Self::SavingsRate { .. } => "savings_rate",
            Self::SavingsAdvice => "savings_advice",
            Self::PeriodStats { .. } => "period_stats",
        }
    }

    pub fn message(&self, currency_symbol: &str) -> String {
        match self {
            Self::BudgetDeficit { shortfall } => format!(
                "Expenses exceed income by {} {currency_symbol} this month.",
                shortfall.round_dp(2).normalize()
            ),
            Self::ExpensesDecreased { saved } => format!(
                "Expenses fell by {} {currency_symbol} compared with the previous month.",
                saved.round_dp(2).normalize()
            ),
            Self::IncomeGrew { gain } => format!(
                "Income grew by {} {currency_symbol} compared with the previous month.",
                gain.round_dp(2).normalize()
            ),
            Self::SavingsRate { percent } => {
                format!("You are saving {}% of your income.", percent.round_dp(1).normalize())
            }
            Self::SavingsAdvice => "Aim to save at least 10-20% of your income.".to_string(),
            Self::PeriodStats {
                period,
                operations,
                currency,
            } => format!("{period}: {operations} operations in {currency}."),
        }
    }
}

pub fn derive_insights(
    current: &PeriodTotals,
    previous: &PeriodTotals,
    period: Period,
    operations: usize,
    currency: &str,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    if current.expenses > current.income {
        insights.push(Insight::BudgetDeficit {
            shortfall: current.expenses.saturating_sub(current.income),
        });
    }

    if previous.expenses > Decimal::ZERO && current.expenses < previous.expenses {
        insights.push(Insight::ExpensesDecreased {
            saved: previous.expenses.saturating_sub(current.expenses),
        });
    }

    if previous.income > Decimal::ZERO && current.income > previous.income {
        insights.push(Insight::IncomeGrew {
            gain: current.income.saturating_sub(previous.income),
        });
    }

    if current.income > Decimal::ZERO && current.expenses > Decimal::ZERO {
        match savings_rate(current) {
            Some(percent) if current.income > current.expenses => {
                insights.push(Insight::SavingsRate { percent });
            }
            _ => insights.push(Insight::SavingsAdvice),
        }
    }

    insights.push(Insight::PeriodStats {
        period,
        operations,
        currency: currency.to_string(),
    });
    insights
}

fn savings_rate(totals: &PeriodTotals) -> Option<Decimal> {
    totals
        .net()
        .checked_div(totals.income)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::{Insight, derive_insights};
    use crate::aggregate::{Period, PeriodTotals};

    fn totals(income: i64, expenses: i64) -> PeriodTotals {
        PeriodTotals {
            income: income.into(),
            expenses: expenses.into(),
        }
    }

    #[test]
    fn deficit_month_with_lower_spending_than_before() {
        let period = Period::new(2024, 3);
        assert!(period.is_some());
        if let Some(period) = period {
            let insights = derive_insights(&totals(100, 150), &totals(80, 300), period, 4, "UAH");
            let codes = insights.iter().map(Insight::code).collect::<Vec<&str>>();
            assert_eq!(
                codes,
                vec![
                    "budget_deficit",
                    "expenses_decreased",
                    "income_grew",
                    "savings_advice",
                    "period_stats"
                ]
            );
            assert_eq!(
                insights[0],
                Insight::BudgetDeficit {
                    shortfall: dec!(50)
                }
            );
        }
    }

    #[test]
    fn savings_rate_when_income_exceeds_expenses() {
        let period = Period::new(2024, 3);
        assert!(period.is_some());
        if let Some(period) = period {
            let insights = derive_insights(&totals(1000, 250), &totals(0, 0), period, 2, "USD");
            assert_eq!(insights[0], Insight::SavingsRate { percent: dec!(75) });
            assert_eq!(insights[0].message("$"), "You are saving 75% of your income.");
            assert_eq!(insights.len(), 2);
        }
    }

    #[test]
    fn extreme_totals_do_not_overflow_the_deficit() {
        let period = Period::new(2024, 3);
        assert!(period.is_some());
        if let Some(period) = period {
            let current = PeriodTotals {
                income: Decimal::MIN,
                expenses: Decimal::MAX,
            };
            let insights = derive_insights(&current, &PeriodTotals::default(), period, 2, "UAH");
            assert_eq!(
                insights[0],
                Insight::BudgetDeficit {
                    shortfall: Decimal::MAX
                }
            );
        }
    }

    #[test]
    fn quiet_month_only_reports_stats() {
        let period = Period::new(2024, 3);
        assert!(period.is_some());
        if let Some(period) = period {
            let insights = derive_insights(&totals(0, 0), &totals(0, 0), period, 0, "EUR");
            assert_eq!(insights.len(), 1);
            assert_eq!(
                insights[0].message("€"),
                "2024-03: 0 operations in EUR."
            );
        }
    }
}
