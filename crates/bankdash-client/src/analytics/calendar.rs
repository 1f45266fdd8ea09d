use crate::model::Account;

/// Card lifetime assumed when inferring how far back an account's history can go.
const CARD_LIFETIME_YEARS: i32 = 5;

/// Years selectable in the analytics view, newest first.
///
/// Starts at the earliest `expiration year - 5` across `accounts` and ends at
/// `current_year`. Accounts whose expiration date does not parse are ignored.
pub fn available_years(accounts: &[Account], current_year: i32) -> Vec<i32> {
    let earliest = accounts
        .iter()
        .filter_map(Account::expiration_year)
        .map(|year| year - CARD_LIFETIME_YEARS)
        .min()
        .map_or(current_year, |year| year.min(current_year));

    (earliest..=current_year).rev().collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::available_years;
    use crate::model::{Account, Card};

    fn account(expiration_date: &str) -> Account {
        Account {
            account_number: "UA00".to_string(),
            balance: Decimal::ZERO,
            currency: "UAH".to_string(),
            status: "ACTIVE".to_string(),
            card: Card {
                card_number: "4111".to_string(),
                expiration_date: expiration_date.to_string(),
            },
            transactions: Vec::new(),
        }
    }

    #[test]
    fn years_span_from_earliest_card_issue() {
        let accounts = vec![
            account("2029-08-01T00:00:00"),
            account("2027-01-31"),
            account("unknown"),
        ];
        assert_eq!(
            available_years(&accounts, 2024),
            vec![2024, 2023, 2022]
        );
    }

    #[test]
    fn no_parseable_cards_yield_current_year() {
        assert_eq!(available_years(&[], 2024), vec![2024]);
        assert_eq!(available_years(&[account("")], 2024), vec![2024]);
    }

    #[test]
    fn future_issue_years_clamp_to_current() {
        assert_eq!(available_years(&[account("2035-01-01")], 2024), vec![2024]);
    }
}
