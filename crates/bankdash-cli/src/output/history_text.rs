use std::io;

use serde_json::Value;

use super::format::{Align, Column, key_value_rows, number_field, render_table, string_field};

pub fn render_history(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("history output requires rows"))?;
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("history output requires summary"))?;
    let filter = data.get("filter").cloned().unwrap_or(Value::Null);

    let mut header = Vec::new();
    if let Some(account) = data.get("account_number").and_then(Value::as_str) {
        header.push(("Account", account.to_string()));
    }
    header.push(("Card", string_field(data, "card")));
    header.push(("Period", period_label(&filter)));
    header.push(("Direction", string_field(&filter, "direction")));
    header.push((
        "Rows",
        format!(
            "{} shown, {} read, {} duplicates removed",
            count_field(summary, "rows_returned"),
            count_field(summary, "rows_read"),
            count_field(summary, "duplicates_removed"),
        ),
    ));

    let mut lines = vec!["Transaction history:".to_string()];
    lines.extend(key_value_rows(&header, 2));
    lines.push(String::new());

    if rows.is_empty() {
        lines.push("No transactions match this filter.".to_string());
        return Ok(lines.join("\n"));
    }

    let table_rows = rows.iter().map(history_cells).collect::<Vec<Vec<String>>>();
    lines.extend(render_table(
        &[
            Column {
                name: "Date",
                align: Align::Left,
            },
            Column {
                name: "Amount",
                align: Align::Right,
            },
            Column {
                name: "Counterparty",
                align: Align::Left,
            },
            Column {
                name: "Status",
                align: Align::Left,
            },
            Column {
                name: "Description",
                align: Align::Left,
            },
        ],
        &table_rows,
    ));

    Ok(lines.join("\n"))
}

fn history_cells(row: &Value) -> Vec<String> {
    let sign = if string_field(row, "direction") == "outgoing" {
        "-"
    } else {
        "+"
    };
    let date = string_field(row, "transaction_date");
    vec![
        if date.is_empty() { "unknown".to_string() } else { date },
        format!(
            "{sign}{:.2} {}",
            number_field(row, "amount").abs(),
            string_field(row, "currency")
        ),
        string_field(row, "counterparty_card"),
        string_field(row, "status"),
        string_field(row, "description"),
    ]
}

fn period_label(filter: &Value) -> String {
    let from = filter.get("from").and_then(Value::as_str);
    let to = filter.get("to").and_then(Value::as_str);
    match (from, to) {
        (None, None) => "all time".to_string(),
        (Some(start), None) => format!("from {start}"),
        (None, Some(end)) => format!("through {end}"),
        (Some(start), Some(end)) => format!("{start} to {end}"),
    }
}

fn count_field(value: &Value, key: &str) -> u64 {
    value.get(key).and_then(Value::as_u64).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_history;

    #[test]
    fn renders_signed_amounts_and_summary() {
        let data = json!({
            "account_number": "UA21****6001",
            "card": "**** **** **** 2222",
            "filter": {"from": "2024-03-01", "to": null, "direction": "all"},
            "summary": {"rows_read": 3, "duplicates_removed": 1, "rows_returned": 2},
            "rows": [
                {
                    "transaction_date": "2024-03-05T10:00:00.000",
                    "direction": "outgoing",
                    "amount": 120.0,
                    "currency": "UAH",
                    "status": "COMPLETED",
                    "description": "Groceries",
                    "counterparty_card": "**** 9999"
                },
                {
                    "transaction_date": "2024-03-02T08:30:00.000",
                    "direction": "incoming",
                    "amount": 500.25,
                    "currency": "UAH",
                    "status": "COMPLETED",
                    "description": "",
                    "counterparty_card": "**** 4444"
                }
            ]
        });

        let rendered = render_history(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("from 2024-03-01"));
            assert!(text.contains("2 shown, 3 read, 1 duplicates removed"));
            assert!(text.contains("-120.00 UAH"));
            assert!(text.contains("+500.25 UAH"));
            assert!(text.contains("**** 9999"));
        }
    }

    #[test]
    fn empty_listing_says_so() {
        let data = json!({
            "card": "**** **** **** 2222",
            "filter": {"from": null, "to": null, "direction": "sent"},
            "summary": {"rows_read": 0, "duplicates_removed": 0, "rows_returned": 0},
            "rows": []
        });
        let rendered = render_history(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("all time"));
            assert!(text.contains("No transactions match this filter."));
            assert!(!text.contains("Account"));
        }
    }
}
