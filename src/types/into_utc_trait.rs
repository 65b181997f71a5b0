use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Timelike, Utc};

/// Conversion of any supported timestamp into UTC.
///
/// Naive timestamps are taken to already be in UTC; aware ones are converted.
pub trait IntoUtcDateTime {
    fn into_utc(self) -> DateTime<Utc>;
}

impl IntoUtcDateTime for NaiveDateTime {
    fn into_utc(self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self)
    }
}

impl IntoUtcDateTime for DateTime<Local> {
    fn into_utc(self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }
}

impl IntoUtcDateTime for DateTime<Utc> {
    fn into_utc(self) -> DateTime<Utc> {
        self
    }
}

impl IntoUtcDateTime for DateTime<FixedOffset> {
    fn into_utc(self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }
}

/// Canonicalizes a timestamp to UTC, truncated to the top of the hour.
///
/// # Examples
///
/// ```
/// use chrono::{DateTime, TimeZone, Utc};
/// use seastate::normalize_to_hour;
///
/// let local = DateTime::parse_from_rfc3339("2024-03-05T14:47:12.5+02:00").unwrap();
/// assert_eq!(
///     normalize_to_hour(local),
///     Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap()
/// );
/// ```
pub fn normalize_to_hour(timestamp: impl IntoUtcDateTime) -> DateTime<Utc> {
    let utc = timestamp.into_utc();
    // Zeroing minute/second/nanosecond on a valid UTC instant cannot leave the valid range.
    utc.with_minute(0)
        .and_then(|dt| dt.with_second(0))
        .and_then(|dt| dt.with_nanosecond(0))
        .unwrap_or(utc)
}
