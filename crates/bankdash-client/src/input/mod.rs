//! Raw transaction lists supplied on the command line.

pub mod parse;
pub mod resolve;

use crate::ClientResult;
use crate::model::Transaction;

pub use parse::parse_transactions;
pub use resolve::{ResolvedInput, SourceKind, resolve_input};

pub fn load_transactions(
    path: &str,
    stdin_override: Option<String>,
    command: &str,
) -> ClientResult<Vec<Transaction>> {
    let input = resolve_input(path, stdin_override, command)?;
    let rows = parse_transactions(&input.content, command)?;
    tracing::debug!(
        source = input.kind.as_str(),
        rows = rows.len(),
        "parsed transaction input"
    );
    Ok(rows)
}
