//! Normalization of alternate variable encodings before extraction.

use crate::types::hourly_series::HourlySeries;
use log::debug;

/// Applies `(legacy, canonical)` renames to a series.
///
/// A legacy variable is only exposed under its canonical name when the
/// canonical variable itself is absent, so a document carrying both keeps
/// the canonical values.
pub fn apply_aliases(series: HourlySeries, aliases: &[(&str, &str)]) -> HourlySeries {
    aliases.iter().fold(series, |series, (legacy, canonical)| {
        if series.has_variable(legacy) && !series.has_variable(canonical) {
            debug!("Reading legacy variable '{}' as '{}'", legacy, canonical);
        }
        series.with_alias(legacy, canonical)
    })
}
