use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{ClientError, ClientResult};

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Truncates the fractional seconds of an ISO-8601 timestamp to three digits.
///
/// `2025-09-05T02:41:24.408172200` becomes `2025-09-05T02:41:24.408`. Every other
/// character, including a trailing zone designator, is left as is. Input without a
/// `THH:MM:SS.` fraction of more than three digits is returned unchanged.
pub fn normalize_timestamp(value: &str) -> Cow<'_, str> {
    let bytes = value.as_bytes();

    for (index, byte) in bytes.iter().enumerate() {
        if *byte != b'T' || !has_time_with_fraction(bytes, index) {
            continue;
        }

        let fraction_start = index + 10;
        let digit_count = bytes[fraction_start..]
            .iter()
            .take_while(|candidate| candidate.is_ascii_digit())
            .count();
        if digit_count <= 3 {
            continue;
        }

        let keep_until = fraction_start + 3;
        let resume_at = fraction_start + digit_count;
        let mut normalized = String::with_capacity(value.len());
        normalized.push_str(&value[..keep_until]);
        normalized.push_str(&value[resume_at..]);
        return Cow::Owned(normalized);
    }

    Cow::Borrowed(value)
}

/// Parses a backend timestamp after [`normalize_timestamp`].
///
/// Zone-less timestamps are wall-clock times. Timestamps with `Z` or an offset keep
/// the wall clock of that offset. A bare `YYYY-MM-DD` means midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let normalized = normalize_timestamp(value.trim());
    let text = normalized.as_ref();
    if text.is_empty() {
        return None;
    }

    for format in TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed);
        }
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.naive_local());
    }

    if looks_like_iso_date(text) {
        return NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .map(|date| date.and_time(NaiveTime::MIN));
    }

    None
}

/// A calendar month, used as the half-open window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
}

impl Period {
    /// `month` is 1-based.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(Self { start, end })
    }

    pub fn containing(date: NaiveDate) -> Option<Self> {
        Self::new(date.year(), date.month())
    }

    /// Parses `YYYY-MM`.
    pub fn parse(value: &str) -> Option<Self> {
        let bytes = value.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return None;
        }
        for index in [0usize, 1, 2, 3, 5, 6] {
            if !bytes[index].is_ascii_digit() {
                return None;
            }
        }
        let year = value[..4].parse::<i32>().ok()?;
        let month = value[5..].parse::<u32>().ok()?;
        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end.and_time(NaiveTime::MIN)
    }

    pub fn previous(&self) -> Option<Self> {
        let last_day_before = self.start.pred_opt()?;
        Self::containing(last_day_before)
    }

    pub fn contains(&self, timestamp: &NaiveDateTime) -> bool {
        *timestamp >= self.start() && *timestamp < self.end()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Inclusive day range. A missing side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_bounded(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Undated records only pass an unbounded range.
    pub fn contains(&self, timestamp: Option<&NaiveDateTime>) -> bool {
        if !self.is_bounded() {
            return true;
        }
        let Some(value) = timestamp else {
            return false;
        };

        if let Some(start) = self.start
            && *value < start.and_time(NaiveTime::MIN)
        {
            return false;
        }
        if let Some(end) = self.end
            && let Some(end_of_day) = end.and_hms_milli_opt(23, 59, 59, 999)
            && *value > end_of_day
        {
            return false;
        }
        true
    }
}

pub fn build_range(
    from: Option<&str>,
    to: Option<&str>,
    command: &str,
) -> ClientResult<DateRange> {
    let parsed_from = match from {
        Some(value) => Some(parse_iso_date_strict(value, "from", command)?),
        None => None,
    };
    let parsed_to = match to {
        Some(value) => Some(parse_iso_date_strict(value, "to", command)?),
        None => None,
    };

    if let (Some(start), Some(end)) = (parsed_from, parsed_to)
        && start > end
    {
        return Err(ClientError::invalid_argument_for_command(
            "Invalid date range: `from` must be on or before `to`.",
            Some(command),
        ));
    }

    Ok(DateRange::new(parsed_from, parsed_to))
}

pub fn parse_period_strict(value: &str, command: &str) -> ClientResult<Period> {
    Period::parse(value).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            "`month` must use YYYY-MM format with a month between 01 and 12.",
            Some(command),
        )
    })
}

fn parse_iso_date_strict(value: &str, field_name: &str, command: &str) -> ClientResult<NaiveDate> {
    if !looks_like_iso_date(value) {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with a real calendar date."),
            Some(command),
        ));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with valid calendar values."),
            Some(command),
        )
    })
}

fn has_time_with_fraction(bytes: &[u8], t_index: usize) -> bool {
    let Some(window) = bytes.get(t_index + 1..t_index + 10) else {
        return false;
    };
    window[0].is_ascii_digit()
        && window[1].is_ascii_digit()
        && window[2] == b':'
        && window[3].is_ascii_digit()
        && window[4].is_ascii_digit()
        && window[5] == b':'
        && window[6].is_ascii_digit()
        && window[7].is_ascii_digit()
        && window[8] == b'.'
}

fn looks_like_iso_date(value: &str) -> bool {
    if value.len() != 10 {
        return false;
    }
    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return false;
        }
    }
    true
}
