// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Calendar date helpers shared by ingestion, storage, and reminders.
//!
//! All stored and displayed dates use ISO 8601 `YYYY-MM-DD`.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Format string for store keys and reminder text.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
}

/// The calendar date of `now` as observed in `tz`.
pub fn local_date(now: DateTime<Utc>, tz: FixedOffset) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Parse a time zone given as `UTC`, `Z`, or a fixed offset such as `+08:00`.
///
/// Returns `None` for anything else, including offsets beyond +/-23:59.
pub fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("utc") || raw == "Z" {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };
    if !rest.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return None;
    }

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };
    if hours.is_empty() || hours.len() > 2 || minutes.len() > 2 {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn format_and_parse_agree() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(format_date(date), "2024-03-10");
        assert_eq!(parse_date("2024-03-10").unwrap(), date);
    }

    #[test]
    fn parse_date_rejects_other_layouts() {
        assert!(parse_date("10/03/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn local_date_crosses_midnight_with_offset() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 20, 0, 0).unwrap();
        let sgt = parse_offset("+08:00").unwrap();
        assert_eq!(
            local_date(now, sgt),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
        assert_eq!(
            local_date(now, parse_offset("UTC").unwrap()),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
    }

    #[test]
    fn parse_offset_accepts_common_spellings() {
        assert_eq!(parse_offset("utc").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_offset("+08:00").unwrap().local_minus_utc(), 8 * 3600);
        assert_eq!(parse_offset("-0530").unwrap().local_minus_utc(), -(5 * 3600 + 30 * 60));
        assert_eq!(parse_offset("+9").unwrap().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn parse_offset_rejects_garbage() {
        assert!(parse_offset("Asia/Singapore").is_none());
        assert!(parse_offset("+25:00").is_none());
        assert!(parse_offset("+08:75").is_none());
        assert!(parse_offset("").is_none());
    }

    #[test]
    fn parse_offset_rejects_non_ascii_without_panicking() {
        assert!(parse_offset("+1é1").is_none());
        assert!(parse_offset("-é").is_none());
        assert!(parse_offset("+08：00").is_none());
        assert!(parse_offset("+٠٨٠٠").is_none());
    }
}
