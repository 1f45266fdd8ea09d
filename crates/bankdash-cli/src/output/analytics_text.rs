use std::io;

use serde_json::Value;

use super::format::{
    Align, Column, format_amount, format_change, key_value_rows, number_field, render_table,
    string_field,
};

pub fn render_analytics(data: &Value) -> io::Result<String> {
    let current = data
        .get("current")
        .ok_or_else(|| io::Error::other("analytics output requires current totals"))?;
    let previous = data
        .get("previous")
        .ok_or_else(|| io::Error::other("analytics output requires previous totals"))?;
    let symbol = string_field(data, "currency_symbol");
    let money = |value: &Value, key: &str| format_amount(number_field(value, key), &symbol);

    let mut header = Vec::new();
    if let Some(account) = data.get("account_number").and_then(Value::as_str) {
        header.push(("Account", account.to_string()));
    }
    header.push(("Card", string_field(data, "card")));
    header.push(("Currency", string_field(data, "currency")));
    header.push((
        "Transactions",
        data.get("transaction_count")
            .and_then(Value::as_u64)
            .unwrap_or(0)
            .to_string(),
    ));

    let mut lines = vec![format!("Analytics for {}:", string_field(current, "period"))];
    lines.extend(key_value_rows(&header, 2));

    lines.push(String::new());
    lines.push("Totals:".to_string());
    let previous_label = match previous.get("period").and_then(Value::as_str) {
        Some(period) => period.to_string(),
        None => "Previous".to_string(),
    };
    lines.extend(render_table(
        &[
            Column {
                name: "",
                align: Align::Left,
            },
            Column {
                name: "This month",
                align: Align::Right,
            },
            Column {
                name: &previous_label,
                align: Align::Right,
            },
            Column {
                name: "Change",
                align: Align::Right,
            },
        ],
        &[
            vec![
                "Income".to_string(),
                money(current, "income"),
                money(previous, "income"),
                format_change(data.get("income_change").unwrap_or(&Value::Null)),
            ],
            vec![
                "Expenses".to_string(),
                money(current, "expenses"),
                money(previous, "expenses"),
                format_change(data.get("expenses_change").unwrap_or(&Value::Null)),
            ],
            vec![
                "Net".to_string(),
                money(current, "net"),
                money(previous, "net"),
                String::new(),
            ],
        ],
    ));

    let active_days = data
        .get("daily")
        .and_then(Value::as_array)
        .map(|days| {
            days.iter()
                .filter(|day| {
                    number_field(day, "income") != 0.0 || number_field(day, "expenses") != 0.0
                })
                .map(|day| {
                    vec![
                        day.get("day").and_then(Value::as_u64).unwrap_or(0).to_string(),
                        money(day, "income"),
                        money(day, "expenses"),
                    ]
                })
                .collect::<Vec<Vec<String>>>()
        })
        .unwrap_or_default();
    lines.push(String::new());
    if active_days.is_empty() {
        lines.push("No activity this month.".to_string());
    } else {
        lines.push("Daily activity:".to_string());
        lines.extend(render_table(
            &[
                Column {
                    name: "Day",
                    align: Align::Right,
                },
                Column {
                    name: "Income",
                    align: Align::Right,
                },
                Column {
                    name: "Expenses",
                    align: Align::Right,
                },
            ],
            &active_days,
        ));
    }

    let insights = data
        .get("insights")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .map(|insight| string_field(insight, "message"))
                .filter(|message| !message.is_empty())
                .collect::<Vec<String>>()
        })
        .unwrap_or_default();
    if !insights.is_empty() {
        lines.push(String::new());
        lines.push("Insights:".to_string());
        for message in insights {
            lines.push(format!("  - {message}"));
        }
    }

    Ok(lines.join("\n"))
}
