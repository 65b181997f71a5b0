use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Lenient ISO-8601 parsing into a UTC instant.
///
/// Accepts the shapes upstream services emit on their time axis: minute
/// precision without offset (`2024-01-01T00:00`), seconds, fractional
/// seconds, RFC 3339 with `Z` or an offset, and plain dates. Anything
/// without offset information is taken as UTC.
pub trait AnyDateTime {
    fn parse_utc(self) -> Option<DateTime<Utc>>;
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

impl AnyDateTime for &str {
    fn parse_utc(self) -> Option<DateTime<Utc>> {
        let s = self.trim();
        if s.is_empty() {
            return None;
        }
        // Try full RFC 3339 (Z or +02:00)
        if let Ok(dt) = DateTime::<FixedOffset>::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        // Offset without seconds, e.g. 2024-01-01T00:00+01:00
        if let Ok(dt) = DateTime::<FixedOffset>::parse_from_str(s, "%Y-%m-%dT%H:%M%:z") {
            return Some(dt.with_timezone(&Utc));
        }
        let bare = s.strip_suffix('Z').unwrap_or(s);
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(bare, format) {
                return Some(Utc.from_utc_datetime(&naive));
            }
        }
        NaiveDate::parse_from_str(bare, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    }
}

impl AnyDateTime for &String {
    fn parse_utc(self) -> Option<DateTime<Utc>> {
        self.as_str().parse_utc()
    }
}
