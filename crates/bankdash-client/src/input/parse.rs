use std::collections::HashMap;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::model::{Transaction, TransactionStatus};
use crate::{ClientError, ClientResult};

pub const REQUIRED_CSV_HEADERS: [&str; 6] = [
    "transactionDate",
    "amount",
    "currencyCode",
    "senderCardNumber",
    "receiverCardNumber",
    "status",
];

pub const OPTIONAL_CSV_HEADERS: [&str; 1] = ["description"];

/// Parses a JSON array of wire-shape transactions or a CSV with headers.
pub fn parse_transactions(content: &str, command: &str) -> ClientResult<Vec<Transaction>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(invalid_input("Transaction input is empty.", command));
    }

    if looks_like_ndjson(trimmed) {
        return Err(invalid_input(
            "NDJSON is not supported. Provide a JSON array or CSV.",
            command,
        ));
    }

    if trimmed.starts_with('[') {
        return parse_json_array(trimmed, command);
    }

    if serde_json::from_str::<Value>(trimmed).is_ok() {
        return Err(invalid_input(
            "JSON input must be a top-level array of transaction objects.",
            command,
        ));
    }

    if looks_like_csv(trimmed) {
        return parse_csv(trimmed, command);
    }

    Err(invalid_input(
        "Unsupported input format. Provide a JSON array or CSV with headers.",
        command,
    ))
}

fn parse_json_array(content: &str, command: &str) -> ClientResult<Vec<Transaction>> {
    let parsed = serde_json::from_str::<Value>(content)
        .map_err(|_| invalid_input("Invalid JSON input. Provide a valid JSON array.", command))?;

    let Value::Array(items) = parsed else {
        return Err(invalid_input(
            "JSON input must be a top-level array of transaction objects.",
            command,
        ));
    };

    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            return Err(invalid_input(
                "JSON array entries must all be objects with transaction fields.",
                command,
            ));
        }
        let transaction = serde_json::from_value::<Transaction>(item).map_err(|error| {
            invalid_input(&format!("Row {}: {error}", index + 1), command)
        })?;
        rows.push(transaction);
    }

    Ok(rows)
}

fn parse_csv(content: &str, command: &str) -> ClientResult<Vec<Transaction>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| invalid_input("CSV header row is missing or unreadable.", command))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    if !headers_are_valid(&headers) {
        return Err(ClientError::input_schema_mismatch(
            REQUIRED_CSV_HEADERS.iter().map(|name| name.to_string()).collect(),
            OPTIONAL_CSV_HEADERS.iter().map(|name| name.to_string()).collect(),
            headers,
        ));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.as_str(), index))
        .collect::<HashMap<&str, usize>>();

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let row_number = row_index + 1;
        let record = result_row
            .map_err(|_| invalid_input("CSV rows are malformed or not UTF-8.", command))?;
        let field = |name: &str| value_for(&record, &index_by_name, name);

        let raw_amount = field("amount").unwrap_or_default();
        let amount = raw_amount.parse::<Decimal>().map_err(|_| {
            invalid_input(
                &format!("Row {row_number}: amount `{raw_amount}` is not a number."),
                command,
            )
        })?;

        rows.push(Transaction {
            sender_card_number: field("senderCardNumber"),
            receiver_card_number: field("receiverCardNumber"),
            amount,
            currency_code: field("currencyCode").unwrap_or_default(),
            status: TransactionStatus::from(field("status").unwrap_or_default()),
            transaction_date: field("transactionDate").unwrap_or_default(),
            description: field("description").unwrap_or_default(),
            transaction_type: None,
            sender: None,
            receiver: None,
            number_of_card: None,
            is_recipient: None,
        });
    }

    Ok(rows)
}

fn value_for(
    record: &csv::StringRecord,
    index_by_name: &HashMap<&str, usize>,
    field_name: &str,
) -> Option<String> {
    let index = index_by_name.get(field_name)?;
    let value = record.get(*index)?;
    Some(value.to_string())
}

fn headers_are_valid(actual_headers: &[String]) -> bool {
    let has_required = REQUIRED_CSV_HEADERS
        .iter()
        .all(|required| actual_headers.iter().any(|header| header == required));
    let all_known = actual_headers.iter().all(|header| {
        REQUIRED_CSV_HEADERS.contains(&header.as_str())
            || OPTIONAL_CSV_HEADERS.contains(&header.as_str())
    });
    has_required && all_known
}

fn looks_like_ndjson(content: &str) -> bool {
    let lines = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<&str>>();
    if lines.len() < 2 {
        return false;
    }

    lines.iter().all(|line| {
        serde_json::from_str::<Value>(line.trim()).is_ok_and(|value| value.is_object())
    })
}

fn looks_like_csv(content: &str) -> bool {
    content
        .lines()
        .find(|line| !line.trim().is_empty())
        .is_some_and(|line| line.contains(','))
}

fn invalid_input(message: &str, command: &str) -> ClientError {
    ClientError::invalid_argument_for_command(message, Some(command))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::parse_transactions;

    #[test]
    fn json_array_uses_wire_shape() {
        let parsed = parse_transactions(
            r#"[{"amount": 12.5, "currencyCode": "UAH", "status": "COMPLETED",
                 "transactionDate": "2024-03-05T10:00:00.123456",
                 "senderCardNumber": "A", "receiverCardNumber": "B"}]"#,
            "history",
        );
        assert!(parsed.is_ok());
        if let Ok(rows) = parsed {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].amount, dec!(12.5));
            assert_eq!(rows[0].receiver_card(), "B");
        }
    }

    #[test]
    fn csv_with_optional_description_omitted() {
        let parsed = parse_transactions(
            "transactionDate,amount,currencyCode,senderCardNumber,receiverCardNumber,status\n\
             2024-03-05T10:00:00,100.25,UAH,B,A,COMPLETED\n\
             2024-03-06T10:00:00,7,UAH,A,C,CANCELED\n",
            "analytics",
        );
        assert!(parsed.is_ok());
        if let Ok(rows) = parsed {
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].amount, dec!(100.25));
            assert!(rows[0].status.is_completed());
            assert_eq!(rows[1].status.as_str(), "CANCELED");
            assert_eq!(rows[1].description, "");
        }
    }

    #[test]
    fn unknown_csv_header_is_schema_mismatch() {
        let parsed = parse_transactions(
            "transactionDate,amount,currencyCode,senderCardNumber,receiverCardNumber,status,memo\n\
             2024-03-05,1,UAH,A,B,COMPLETED,x\n",
            "history",
        );
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "input_schema_mismatch");
            assert!(error.data.is_some());
        }
    }

    #[test]
    fn bad_amount_names_the_row() {
        let parsed = parse_transactions(
            "transactionDate,amount,currencyCode,senderCardNumber,receiverCardNumber,status\n\
             2024-03-05,lots,UAH,A,B,COMPLETED\n",
            "history",
        );
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.message.starts_with("Row 1:"));
        }
    }

    #[test]
    fn rejected_shapes() {
        for content in [
            "",
            "{\"amount\": 1}\n{\"amount\": 2}",
            "{\"amount\": 1}",
            "just some text",
            "[1, 2]",
        ] {
            let parsed = parse_transactions(content, "history");
            assert!(parsed.is_err(), "expected rejection for {content:?}");
        }
    }
}
