//! Nearest-hour selection over a source's reported time axis.

use crate::types::any_datetime::AnyDateTime;
use chrono::{DateTime, Utc};

/// Returns the index of the entry in `times` closest to `target`.
///
/// * An empty axis or a missing target yields `0`; callers index defensively.
/// * Entries that do not parse are skipped.
/// * Ties keep the earliest index.
///
/// If no entry parses at all the result is `0`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use seastate::pick_index;
///
/// let times = ["2024-01-01T00:00", "2024-01-01T01:00", "2024-01-01T02:00"];
/// let target = Utc.with_ymd_and_hms(2024, 1, 1, 1, 20, 0).unwrap();
/// assert_eq!(pick_index(&times, Some(target)), 1);
/// assert_eq!(pick_index(&times, None), 0);
/// ```
pub fn pick_index<S: AsRef<str>>(times: &[S], target: Option<DateTime<Utc>>) -> usize {
    let Some(target) = target else {
        return 0;
    };

    let mut best: Option<(usize, i64)> = None;
    for (i, t) in times.iter().enumerate() {
        let Some(dt) = t.as_ref().parse_utc() else {
            continue;
        };
        let distance = (dt - target).num_seconds().abs();
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((i, distance));
        }
    }
    best.map_or(0, |(i, _)| i)
}

/// [`pick_index`] with the target given as a string; an unparsable or
/// missing target degrades to index `0`.
pub fn pick_index_str<S: AsRef<str>>(times: &[S], target: Option<&str>) -> usize {
    pick_index(times, target.and_then(|t| t.parse_utc()))
}
