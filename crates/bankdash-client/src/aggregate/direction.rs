use serde::Serialize;

use crate::model::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
        }
    }
}

/// History view selector: everything, only money out, or only money in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionFilter {
    #[default]
    All,
    Sent,
    Received,
}

impl DirectionFilter {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Sent => "sent",
            Self::Received => "received",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "sent" => Some(Self::Sent),
            "received" => Some(Self::Received),
            _ => None,
        }
    }

    pub fn admits(self, direction: Direction) -> bool {
        match self {
            Self::All => true,
            Self::Sent => direction == Direction::Outgoing,
            Self::Received => direction == Direction::Incoming,
        }
    }
}

/// Incoming iff the receiver card is the viewed card.
pub fn classify_direction(transaction: &Transaction, reference_card: &str) -> Direction {
    if transaction.receiver_card() == reference_card {
        Direction::Incoming
    } else {
        Direction::Outgoing
    }
}

/// The card on the other side of the transfer, from the viewed card's perspective.
pub fn counterparty_card(transaction: &Transaction, reference_card: &str) -> String {
    match classify_direction(transaction, reference_card) {
        Direction::Incoming => transaction.sender_card().to_string(),
        Direction::Outgoing => transaction.receiver_card().to_string(),
    }
}
