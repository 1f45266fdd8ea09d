mod support;

use bankdash_client::commands::accounts::{self, AccountListOptions};
use bankdash_client::commands::analytics::{self, AnalyticsOptions};
use bankdash_client::commands::common::{SourceOptions, Subject};
use chrono::NaiveDate;
use serde_json::{Value, json};
use support::bank_testkit::{
    CARD, SHOP_CARD, account_subject, customer, incoming, outgoing, payload, snapshot_options,
    temp_dir, transfer, write_json,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 28).unwrap_or_default()
}

fn options(source: SourceOptions, subject: Subject, month: Option<&str>) -> AnalyticsOptions {
    AnalyticsOptions {
        source,
        subject,
        month: month.map(str::to_string),
        today: today(),
        stdin_override: None,
    }
}

fn codes(insights: &Value) -> Vec<String> {
    insights
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["code"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn march_report_against_february() {
    let dir = temp_dir("bankdash-analytics");
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let snapshot = customer(&[
            incoming(500.0, "2024-03-05T10:00:00"),
            incoming(500.0, "2024-03-05T10:00:00"),
            transfer(CARD, SHOP_CARD, 9_999_999.0, "CANCELED", "2024-03-06T10:00:00", "Car"),
            outgoing(100.0, "2024-03-20T10:00:00.123456789"),
            incoming(400.0, "2024-02-10T10:00:00"),
            outgoing(200.0, "2024-02-11T10:00:00"),
            incoming(1.0, "garbled"),
        ]);
        let path = write_json(dir.path(), "customer.json", &snapshot);
        assert!(path.is_ok());
        if let Ok(path) = path {
            let value = payload(analytics::run(&options(
                snapshot_options(&path),
                account_subject(),
                None,
            )));
            let data = &value["data"];
            assert_eq!(value["command"], "analytics");
            assert_eq!(data["currency_symbol"], "₴");
            assert_eq!(data["current"]["period"], "2024-03");
            assert_eq!(data["previous"]["period"], "2024-02");
            assert_eq!(data["current"]["income"], json!(500.0));
            assert_eq!(data["current"]["expenses"], json!(100.0));
            assert_eq!(data["current"]["net"], json!(400.0));
            assert_eq!(data["transaction_count"], 3);
            assert_eq!(data["income_change"], json!(25.0));
            assert_eq!(data["expenses_change"], json!(-50.0));
            assert_eq!(data["daily"][0]["day"], 5);
            assert_eq!(data["daily"][1]["day"], 20);
            assert_eq!(data["breakdown"][0]["label"], "income");
            assert_eq!(data["breakdown"][1]["label"], "expenses");
            assert_eq!(
                codes(&data["insights"]),
                vec!["expenses_decreased", "income_grew", "savings_rate", "period_stats"]
            );
            assert_eq!(
                data["insights"][2]["message"],
                "You are saving 80% of your income."
            );
            assert_eq!(data["available_years"], json!([2024, 2023]));
        }
    }
}

#[test]
fn january_compares_with_previous_december() {
    let dir = temp_dir("bankdash-analytics-wrap");
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let snapshot = customer(&[
            outgoing(300.0, "2023-12-31T23:59:59.999"),
            outgoing(150.0, "2024-01-01T00:00:00"),
        ]);
        let path = write_json(dir.path(), "customer.json", &snapshot);
        assert!(path.is_ok());
        if let Ok(path) = path {
            let value = payload(analytics::run(&options(
                snapshot_options(&path),
                account_subject(),
                Some("2024-01"),
            )));
            let data = &value["data"];
            assert_eq!(data["previous"]["period"], "2023-12");
            assert_eq!(data["previous"]["expenses"], json!(300.0));
            assert_eq!(data["current"]["expenses"], json!(150.0));
            assert_eq!(data["income_change"], Value::Null);
            assert_eq!(
                codes(&data["insights"]),
                vec!["budget_deficit", "expenses_decreased", "period_stats"]
            );
            assert_eq!(data["breakdown"].as_array().map(Vec::len), Some(1));
        }
    }
}

#[test]
fn analytics_over_raw_json_input() {
    let rows = json!([
        {"amount": 100, "currencyCode": "USD", "status": "COMPLETED",
         "transactionDate": "2024-03-05T10:00:00", "senderCardNumber": "B", "receiverCardNumber": "A"},
        {"amount": 100, "currencyCode": "USD", "status": "COMPLETED",
         "transactionDate": "2024-03-05T10:00:00", "senderCardNumber": "B", "receiverCardNumber": "A"}
    ]);
    let mut input = options(
        SourceOptions::default(),
        Subject::Input {
            path: "-".to_string(),
            card: "A".to_string(),
        },
        Some("2024-03"),
    );
    input.stdin_override = Some(rows.to_string());

    let value = payload(analytics::run(&input));
    let data = &value["data"];
    assert_eq!(data["currency"], "USD");
    assert_eq!(data["currency_symbol"], "$");
    assert_eq!(data["current"]["income"], json!(100.0));
    assert_eq!(data["transaction_count"], 1);
    assert_eq!(data["available_years"], json!([2024]));
}

#[test]
fn unknown_account_lists_known_ones() {
    let dir = temp_dir("bankdash-analytics-missing");
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let path = write_json(dir.path(), "customer.json", &customer(&[]));
        assert!(path.is_ok());
        if let Ok(path) = path {
            let result = analytics::run(&options(
                snapshot_options(&path),
                Subject::Account("0000".to_string()),
                None,
            ));
            assert!(result.is_err());
            if let Err(error) = result {
                assert_eq!(error.code, "account_not_found");
                assert!(error.data.is_some());
            }
        }
    }
}

#[test]
fn account_list_reads_snapshot_accounts() {
    let dir = temp_dir("bankdash-accounts");
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let path = write_json(dir.path(), "customer.json", &customer(&[]));
        assert!(path.is_ok());
        if let Ok(path) = path {
            let value = payload(accounts::list(&AccountListOptions {
                source: snapshot_options(&path),
                current_year: 2024,
            }));
            let data = &value["data"];
            assert_eq!(value["command"], "account list");
            assert_eq!(data["customer"]["name"], "Olena Koval");
            assert_eq!(data["accounts"].as_array().map(Vec::len), Some(2));
            assert_eq!(data["accounts"][1]["currency_symbol"], "$");
            assert_eq!(data["accounts"][0]["card_expiration_year"], 2028);
            assert_eq!(data["available_years"], json!([2024, 2023]));
        }
    }
}
