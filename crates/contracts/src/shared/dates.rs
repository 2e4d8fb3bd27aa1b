//! Date parsing and formatting shared by the inventory, stock and sale screens.
//!
//! The backend mixes two encodings: inventory lots carry `DD-MM-YYYY` strings,
//! everything else uses ISO-8601 timestamps.

use chrono::{Datelike, DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Timelike, Utc};

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Strict `DD-MM-YYYY`. Blank, partial or impossible dates yield `None`.
pub fn parse_dmy(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    let mut parts = trimmed.split('-');
    let day = parts.next()?;
    let month = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let widths_ok = day.len() == 2 && month.len() == 2 && year.len() == 4;
    let digits_ok = [day, month, year]
        .iter()
        .all(|p| p.chars().all(|c| c.is_ascii_digit()));
    if !widths_ok || !digits_ok {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Parse an ISO-8601 timestamp. Offset-less values are read as UTC and a bare
/// `YYYY-MM-DD` is midnight UTC.
pub fn parse_iso(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-03-15T00:00:00.000Z`.
pub fn to_iso_millis(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Midnight UTC of a calendar day.
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Value for an `<input type="date">`.
pub fn to_input_date(value: &DateTime<Utc>) -> String {
    value.date_naive().format("%Y-%m-%d").to_string()
}

/// Inverse of [`to_input_date`].
pub fn from_input_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .map(start_of_day_utc)
}

/// Short display form used in tables: `15/03/2024`.
pub fn format_short(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Long Spanish form used on receipts: `15 marzo 2024, 02:30:05 PM`.
pub fn format_long_es(value: &NaiveDateTime) -> String {
    let month = MONTHS_ES[value.month0() as usize];
    let (is_pm, hour12) = value.hour12();
    format!(
        "{} {} {}, {:02}:{:02}:{:02} {}",
        value.format("%d"),
        month,
        value.format("%Y"),
        hour12,
        value.minute(),
        value.second(),
        if is_pm { "PM" } else { "AM" }
    )
}

/// Whole days elapsed from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_dmy() {
        assert_eq!(parse_dmy("15-03-2024"), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_dmy(" 01-12-2023 "), Some(ymd(2023, 12, 1)));
        assert_eq!(parse_dmy(""), None);
        assert_eq!(parse_dmy("2024-03-15"), None);
        assert_eq!(parse_dmy("5-3-2024"), None);
        assert_eq!(parse_dmy("31-02-2024"), None);
        assert_eq!(parse_dmy("aa-bb-cccc"), None);
    }

    #[test]
    fn test_parse_iso_variants() {
        let expected = ymd(2024, 3, 15).and_hms_opt(6, 0, 0).unwrap().and_utc();
        assert_eq!(parse_iso("2024-03-15T06:00:00.000Z"), Some(expected));
        assert_eq!(parse_iso("2024-03-15T00:00:00-06:00"), Some(expected));
        assert_eq!(parse_iso("2024-03-15T06:00:00"), Some(expected));
        assert_eq!(
            parse_iso("2024-03-15"),
            Some(start_of_day_utc(ymd(2024, 3, 15)))
        );
        assert_eq!(parse_iso("not a date"), None);
        assert_eq!(parse_iso(""), None);
    }

    #[test]
    fn test_to_iso_millis() {
        let dt = start_of_day_utc(ymd(2024, 3, 15));
        assert_eq!(to_iso_millis(&dt), "2024-03-15T00:00:00.000Z");
    }

    #[test]
    fn test_input_date_round_trip() {
        let dt = from_input_date("2025-01-31").unwrap();
        assert_eq!(to_input_date(&dt), "2025-01-31");
        assert_eq!(from_input_date(""), None);
    }

    #[test]
    fn test_format_long_es() {
        let dt = ymd(2024, 3, 5).and_hms_opt(14, 30, 5).unwrap();
        assert_eq!(format_long_es(&dt), "05 marzo 2024, 02:30:05 PM");
        let morning = ymd(2024, 12, 25).and_hms_opt(0, 15, 0).unwrap();
        assert_eq!(format_long_es(&morning), "25 diciembre 2024, 12:15:00 AM");
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(ymd(2024, 3, 1), ymd(2024, 3, 15)), 14);
        assert_eq!(days_between(ymd(2024, 3, 15), ymd(2024, 3, 1)), -14);
    }
}
