//! Wire model of the bank backend. Field names follow the backend's camelCase JSON.

use std::fmt;

use chrono::{Datelike, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::date::parse_timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Completed,
    Other(String),
}

impl TransactionStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Completed => "COMPLETED",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for TransactionStatus {
    fn from(value: String) -> Self {
        if value == "COMPLETED" {
            Self::Completed
        } else {
            Self::Other(value)
        }
    }
}

impl From<TransactionStatus> for String {
    fn from(value: TransactionStatus) -> Self {
        match value {
            TransactionStatus::Completed => "COMPLETED".to_string(),
            TransactionStatus::Other(raw) => raw,
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
}

impl Party {
    pub fn full_name(&self) -> Option<String> {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_card_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_card_number: Option<String>,
    pub amount: Decimal,
    #[serde(default)]
    pub currency_code: String,
    pub status: TransactionStatus,
    pub transaction_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<Party>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Party>,
    /// Legacy single-card field; paired with `is_recipient`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_card: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recipient: Option<bool>,
}

impl Transaction {
    pub fn sender_card(&self) -> &str {
        if let Some(card) = self.sender_card_number.as_deref() {
            return card;
        }
        match (self.is_recipient, self.number_of_card.as_deref()) {
            (Some(false), Some(card)) => card,
            _ => "",
        }
    }

    pub fn receiver_card(&self) -> &str {
        if let Some(card) = self.receiver_card_number.as_deref() {
            return card;
        }
        match (self.is_recipient, self.number_of_card.as_deref()) {
            (Some(true), Some(card)) => card,
            _ => "",
        }
    }

    pub fn posted_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.transaction_date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub card_number: String,
    #[serde(default)]
    pub expiration_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_number: String,
    pub balance: Decimal,
    pub currency: String,
    #[serde(default)]
    pub status: String,
    pub card: Card,
    /// Inline history from older backend versions. Prefer paged fetches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transactions: Vec<Transaction>,
}

impl Account {
    pub fn card_number(&self) -> &str {
        &self.card.card_number
    }

    pub fn expiration_year(&self) -> Option<i32> {
        parse_timestamp(&self.card.expiration_date).map(|value| value.year())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_pages: u32,
    pub total_elements: u64,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

impl<T> Page<T> {
    pub fn is_last(&self) -> bool {
        self.content.is_empty() || self.number.saturating_add(1) >= self.total_pages
    }
}

/// `**** **** **** 1234`
pub fn mask_card_number(card_number: &str) -> String {
    format!("**** **** **** {}", last_four(card_number))
}

/// Keeps the first and last four characters of account numbers longer than eight.
pub fn mask_account_number(account_number: &str) -> String {
    let chars = account_number.chars().collect::<Vec<char>>();
    if chars.len() <= 8 {
        return account_number.to_string();
    }
    let head = chars[..4].iter().collect::<String>();
    let tail = chars[chars.len() - 4..].iter().collect::<String>();
    format!("{head}****{tail}")
}

pub fn last_four(value: &str) -> String {
    let chars = value.chars().collect::<Vec<char>>();
    let start = chars.len().saturating_sub(4);
    chars[start..].iter().collect()
}
