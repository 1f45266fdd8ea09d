//! Pure transaction aggregation over an in-memory snapshot.
//!
//! Nothing here performs I/O or mutates its input. Callers refetch and call again.

pub mod date;
pub mod dedupe;
pub mod direction;
pub mod filter;
pub mod totals;

pub use date::{DateRange, Period, normalize_timestamp, parse_timestamp};
pub use dedupe::{DedupeResult, DuplicateRecord, dedupe_batch, deduplicate};
pub use direction::{Direction, DirectionFilter, classify_direction};
pub use filter::{
    HistoryFilter, filter_by_date_range, filter_by_direction, history, select_history,
    sort_by_date_descending,
};
pub use totals::{PeriodTotals, aggregate_period, bucket_by_day, compute_percent_change};
