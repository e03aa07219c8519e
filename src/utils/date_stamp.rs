use chrono::{NaiveDate, NaiveTime};

use crate::utils::constants::{DATE_STAMP_LEN, DATE_STAMP_SEPARATOR};

/// Time-of-day format shared by the feeds and the interchange format.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Convert an upstream date stamp to `YYYY-MM-DD` by taking its first ten
/// characters and mapping the underscore separators to hyphens.
///
/// # Examples
/// ```
/// use lpo_weather::utils::normalize_date_stamp;
///
/// assert_eq!(normalize_date_stamp("2015_02_03"), "2015-02-03");
/// ```
pub fn normalize_date_stamp(stamp: &str) -> String {
    stamp
        .chars()
        .take(DATE_STAMP_LEN)
        .map(|c| if c == DATE_STAMP_SEPARATOR { '-' } else { c })
        .collect()
}

/// Parse a `YYYY_MM_DD` stamp. Hyphenated stamps are accepted as well.
pub fn parse_date_stamp(stamp: &str) -> Option<NaiveDate> {
    if stamp.len() != DATE_STAMP_LEN {
        return None;
    }
    NaiveDate::parse_from_str(&normalize_date_stamp(stamp), "%Y-%m-%d").ok()
}

/// Format a date as the upstream `YYYY_MM_DD` stamp.
pub fn format_date_stamp(date: NaiveDate) -> String {
    date.format("%Y_%m_%d").to_string()
}

pub fn parse_time(token: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(token, TIME_FORMAT).ok()
}
