//! Lenient date/time parsing for mixed-format date columns.
//!
//! News datasets mix formats within one column (`2020-06-05 10:30:54-04:00`
//! next to `2020-05-22 00:00:00`). Each value is tried against a fixed list
//! of layouts. Values carrying a UTC offset keep their wall-clock time in
//! that offset.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%z",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Parse a date or date-time string, trying every known layout.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_local());
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// Parse and normalize to the calendar date (time of day dropped).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    parse_datetime(raw).map(|dt| dt.date())
}

/// Outcome of parsing a whole date column.
#[derive(Debug, Clone, PartialEq)]
pub struct DateParseOutcome {
    /// `(row index, parsed value)` for every row that parsed, in row order.
    pub parsed: Vec<(usize, NaiveDateTime)>,
    /// Rows that were null or failed to parse.
    pub dropped: usize,
}

/// Parse every value of a column; nulls and failures are counted, not kept.
pub fn parse_column(values: &[Option<String>]) -> DateParseOutcome {
    let mut parsed = Vec::with_capacity(values.len());
    let mut dropped = 0;

    for (i, value) in values.iter().enumerate() {
        match value.as_deref().and_then(parse_datetime) {
            Some(dt) => parsed.push((i, dt)),
            None => dropped += 1,
        }
    }

    DateParseOutcome { parsed, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn parses_offset_timestamps_as_wall_clock() {
        assert_eq!(
            parse_datetime("2020-06-05 10:30:54-04:00"),
            Some(ymd_hms(2020, 6, 5, 10, 30, 54))
        );
    }

    #[test]
    fn parses_rfc3339() {
        assert_eq!(
            parse_datetime("2020-06-05T10:30:54Z"),
            Some(ymd_hms(2020, 6, 5, 10, 30, 54))
        );
    }

    #[test]
    fn parses_naive_datetime_and_date() {
        assert_eq!(
            parse_datetime("2020-05-22 00:00:00"),
            Some(ymd_hms(2020, 5, 22, 0, 0, 0))
        );
        assert_eq!(
            parse_datetime("2024-01-01"),
            Some(ymd_hms(2024, 1, 1, 0, 0, 0))
        );
        assert_eq!(
            parse_datetime("01/15/2024 09:45"),
            Some(ymd_hms(2024, 1, 15, 9, 45, 0))
        );
    }

    #[test]
    fn parse_date_strips_time_of_day() {
        assert_eq!(
            parse_date("2024-03-04 23:59:59"),
            NaiveDate::from_ymd_opt(2024, 3, 4)
        );
    }

    #[test]
    fn garbage_and_blank_fail() {
        assert_eq!(parse_datetime("not a date"), None);
        assert_eq!(parse_datetime("   "), None);
        assert_eq!(parse_datetime("2024-13-45"), None);
    }

    #[test]
    fn parse_column_counts_drops() {
        let values = vec![
            Some("2024-01-01".to_string()),
            None,
            Some("nope".to_string()),
            Some("2024-01-02 08:00:00".to_string()),
        ];
        let outcome = parse_column(&values);
        assert_eq!(outcome.dropped, 2);
        assert_eq!(outcome.parsed.len(), 2);
        assert_eq!(outcome.parsed[0].0, 0);
        assert_eq!(outcome.parsed[1].0, 3);
    }
}
