#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use bankdash_client::commands::common::{SourceOptions, Subject};
use bankdash_client::{ClientResult, SuccessEnvelope};
use serde_json::{Value, json};
use tempfile::{Builder, TempDir};

pub const ACCOUNT_NUMBER: &str = "UA213223130000026007233566001";
pub const CARD: &str = "4111000011112222";
pub const FRIEND_CARD: &str = "5500000000004444";
pub const SHOP_CARD: &str = "6011000000009999";

pub fn temp_dir(prefix: &str) -> std::io::Result<TempDir> {
    Builder::new().prefix(prefix).tempdir()
}

pub fn transfer(
    sender: &str,
    receiver: &str,
    amount: f64,
    status: &str,
    transaction_date: &str,
    description: &str,
) -> Value {
    json!({
        "senderCardNumber": sender,
        "receiverCardNumber": receiver,
        "amount": amount,
        "currencyCode": "UAH",
        "status": status,
        "transactionDate": transaction_date,
        "description": description,
        "transactionType": "TRANSFER",
    })
}

pub fn incoming(amount: f64, transaction_date: &str) -> Value {
    transfer(FRIEND_CARD, CARD, amount, "COMPLETED", transaction_date, "Salary")
}

pub fn outgoing(amount: f64, transaction_date: &str) -> Value {
    transfer(CARD, SHOP_CARD, amount, "COMPLETED", transaction_date, "Groceries")
}

pub fn customer(transactions: &[Value]) -> Value {
    json!({
        "firstName": "Olena",
        "lastName": "Koval",
        "email": "olena@example.com",
        "phoneNumber": "+380000000000",
        "accounts": [
            {
                "accountNumber": ACCOUNT_NUMBER,
                "balance": 1520.75,
                "currency": "UAH",
                "status": "ACTIVE",
                "card": {"cardNumber": CARD, "expirationDate": "2028-06-30T00:00:00"},
                "transactions": transactions,
            },
            {
                "accountNumber": "UA903052992990004149123456789",
                "balance": 40,
                "currency": "USD",
                "status": "ACTIVE",
                "card": {"cardNumber": "4000123412341234", "expirationDate": "2030-01-31"},
            }
        ]
    })
}

pub fn write_json(dir: &Path, name: &str, value: &Value) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, value.to_string())?;
    Ok(path)
}

pub fn snapshot_options(path: &Path) -> SourceOptions {
    SourceOptions {
        api_url: None,
        snapshot: Some(path.to_path_buf()),
    }
}

pub fn account_subject() -> Subject {
    Subject::Account("6001".to_string())
}

pub fn payload(result: ClientResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok(), "command failed: {:?}", result.as_ref().err());
    if let Ok(success) = result {
        let value = serde_json::to_value(success);
        assert!(value.is_ok());
        if let Ok(value) = value {
            return value;
        }
    }
    Value::Null
}
