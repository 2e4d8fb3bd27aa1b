//! Browser clock helpers. Dates coming from the backend are UTC; what the
//! user sees is the browser's local calendar.

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use contracts::shared::dates::{format_short, parse_iso};

/// Browser's current UTC offset.
pub fn local_offset() -> FixedOffset {
    let minutes_west = js_sys::Date::new_0().get_timezone_offset() as i32;
    FixedOffset::west_opt(minutes_west * 60).unwrap_or_else(|| Utc.fix())
}

/// Today's date in the browser's timezone.
pub fn local_today() -> NaiveDate {
    Utc::now().with_timezone(&local_offset()).date_naive()
}

/// `dd/mm/yyyy` of a backend timestamp in local time, `—` when absent or
/// unparseable.
pub fn local_date_text(iso: Option<&str>) -> String {
    iso.and_then(parse_iso)
        .map(|dt| format_short(dt.with_timezone(&local_offset()).date_naive()))
        .unwrap_or_else(|| "—".to_string())
}
