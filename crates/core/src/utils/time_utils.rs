use chrono::{DateTime, Local, NaiveDate, Utc};

/// Today's calendar date in the local timezone.
///
/// This is the single source of "today" for day counts such as days since buy
/// and for rejecting future dates.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole days from `start` to `end`. Negative when `end` precedes `start`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Fractional days elapsed from `start` to `end`, at second resolution.
pub fn fractional_days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_seconds() as f64 / 86_400.0
}

/// Midnight UTC at the start of `date`.
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_iso_date(value: &str) -> crate::Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")?)
}
