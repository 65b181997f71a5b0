//! Config-driven extraction of named values from one source's hourly document.
//!
//! A single algorithm serves every source family: pick the hour nearest the
//! target on the source's own time axis, then read each configured variable at
//! that index. Families differ only in their [`ExtractorConfig`].

use crate::alignment::nearest::pick_index;
use crate::alignment::polar::to_speed_bearing;
use crate::extract::normalize::apply_aliases;
use crate::types::data_source::Source;
use crate::types::hourly_series::HourlySeries;
use crate::types::observation::{Field, ObservationRecord};
use chrono::{DateTime, Utc};
use log::debug;
use serde_json::Value;

/// How a family recovers fields its preferred variables did not supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Missing variables stay `None`.
    None,
    /// Fill a still-missing speed and/or direction from u/v components.
    ///
    /// Only fields that are still `None` after the direct read are written.
    Vector {
        u: &'static str,
        v: &'static str,
        speed: Field,
        direction: Field,
    },
}

impl Fallback {
    /// Variables to request when the preferred encoding is unavailable.
    pub fn variables(&self) -> Option<Vec<&'static str>> {
        match self {
            Fallback::None => None,
            Fallback::Vector { u, v, .. } => Some(vec![*u, *v]),
        }
    }
}

/// Field table and fallback strategy for one source family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractorConfig {
    pub source: Source,
    /// Canonical field and the source-specific variable it is read from.
    pub fields: &'static [(Field, &'static str)],
    /// `(legacy, canonical)` variable renames applied before extraction.
    pub aliases: &'static [(&'static str, &'static str)],
    pub fallback: Fallback,
}

impl ExtractorConfig {
    /// Preferred variable list, in table order.
    pub fn variables(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(_, variable)| *variable).collect()
    }

    /// Whether `series` carries at least one of the preferred variables.
    pub fn has_any_variable(&self, series: &HourlySeries) -> bool {
        self.fields
            .iter()
            .any(|(_, variable)| series.has_variable(variable))
    }
}

pub const WIND: ExtractorConfig = ExtractorConfig {
    source: Source::Forecast,
    fields: &[
        (Field::WindSpeed, "windspeed_10m"),
        (Field::WindDirection, "winddirection_10m"),
    ],
    aliases: &[],
    fallback: Fallback::None,
};

pub const WAVE: ExtractorConfig = ExtractorConfig {
    source: Source::Marine,
    fields: &[
        (Field::WaveHeight, "wave_height"),
        (Field::WaveDirection, "wave_direction"),
        (Field::SwellHeight, "swell_wave_height"),
        (Field::SwellDirection, "swell_wave_direction"),
        (Field::WindWaveHeight, "wind_wave_height"),
        (Field::WindWaveDirection, "wind_wave_direction"),
    ],
    aliases: &[],
    fallback: Fallback::None,
};

pub const CURRENT: ExtractorConfig = ExtractorConfig {
    source: Source::Ocean,
    fields: &[
        (Field::CurrentSpeed, "current_speed"),
        (Field::CurrentDirection, "current_direction"),
    ],
    aliases: &[("current", "current_speed")],
    fallback: Fallback::Vector {
        u: "current_u",
        v: "current_v",
        speed: Field::CurrentSpeed,
        direction: Field::CurrentDirection,
    },
};

/// Extracts one family's fields from a raw source document.
#[derive(Debug, Clone, Copy)]
pub struct SourceExtractor {
    config: ExtractorConfig,
}

impl SourceExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Returns a partial record holding this family's fields, with
    /// `iso_time` set to the time-axis entry actually used.
    ///
    /// A document without a time axis yields an all-`None` record. Each field
    /// is read independently; a missing variable or short array only affects
    /// that field.
    pub fn extract(&self, document: &Value, target: Option<DateTime<Utc>>) -> ObservationRecord {
        let series = apply_aliases(HourlySeries::from_document(document), self.config.aliases);
        let mut record = ObservationRecord::empty();

        if !series.has_time_axis() {
            debug!("No time axis in {} document", self.config.source);
            return record;
        }

        let index = pick_index(series.times(), target);
        record.iso_time = series.time_at(index).map(str::to_string);

        for (field, variable) in self.config.fields {
            record.set(*field, series.number(variable, index));
        }

        if let Fallback::Vector {
            u,
            v,
            speed,
            direction,
        } = self.config.fallback
        {
            if record.get(speed).is_none() || record.get(direction).is_none() {
                let polar = series
                    .value(u, index)
                    .zip(series.value(v, index))
                    .and_then(|(u, v)| to_speed_bearing(u, v));
                if let Some((vector_speed, bearing)) = polar {
                    if record.get(speed).is_none() {
                        record.set(speed, Some(vector_speed));
                    }
                    if record.get(direction).is_none() {
                        record.set(direction, Some(bearing));
                    }
                }
            }
        }

        record
    }
}
