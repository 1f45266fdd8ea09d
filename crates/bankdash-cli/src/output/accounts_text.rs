use std::io;

use serde_json::Value;

use super::format::{
    Align, Column, format_amount, key_value_rows, number_field, render_table, string_field,
};

pub fn render_accounts(data: &Value) -> io::Result<String> {
    let customer = data
        .get("customer")
        .ok_or_else(|| io::Error::other("account list output requires customer"))?;
    let accounts = data
        .get("accounts")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("account list output requires accounts"))?;

    let mut lines = vec!["Customer:".to_string()];
    lines.extend(key_value_rows(
        &[
            ("Name", string_field(customer, "name")),
            ("Email", string_field(customer, "email")),
        ],
        2,
    ));

    if accounts.is_empty() {
        lines.push(String::new());
        lines.push("This customer has no accounts.".to_string());
        return Ok(lines.join("\n"));
    }

    let rows = accounts
        .iter()
        .map(|account| {
            vec![
                string_field(account, "account_number"),
                string_field(account, "masked_card_number"),
                format_amount(
                    number_field(account, "balance"),
                    &string_field(account, "currency_symbol"),
                ),
                string_field(account, "currency"),
                string_field(account, "status"),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    lines.push(String::new());
    lines.push("Accounts:".to_string());
    lines.extend(render_table(
        &[
            Column {
                name: "Account",
                align: Align::Left,
            },
            Column {
                name: "Card",
                align: Align::Left,
            },
            Column {
                name: "Balance",
                align: Align::Right,
            },
            Column {
                name: "Currency",
                align: Align::Left,
            },
            Column {
                name: "Status",
                align: Align::Left,
            },
        ],
        &rows,
    ));

    let years = data
        .get("available_years")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_i64)
                .map(|year| year.to_string())
                .collect::<Vec<String>>()
        })
        .unwrap_or_default();
    if !years.is_empty() {
        lines.push(String::new());
        lines.push(format!("Years with history: {}", years.join(", ")));
    }

    Ok(lines.join("\n"))
}
