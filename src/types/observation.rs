//! The merged point observation and its canonical field names.

use serde::Serialize;
use std::fmt;

/// Canonical name of one scalar in an [`ObservationRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    WindSpeed,
    WindDirection,
    WaveHeight,
    WaveDirection,
    SwellHeight,
    SwellDirection,
    WindWaveHeight,
    WindWaveDirection,
    CurrentSpeed,
    CurrentDirection,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::WindSpeed,
        Field::WindDirection,
        Field::WaveHeight,
        Field::WaveDirection,
        Field::SwellHeight,
        Field::SwellDirection,
        Field::WindWaveHeight,
        Field::WindWaveDirection,
        Field::CurrentSpeed,
        Field::CurrentDirection,
    ];

    /// Key used for this field in the flat output mapping.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Field::WindSpeed => "windSpeed",
            Field::WindDirection => "windDirection",
            Field::WaveHeight => "waveHeight",
            Field::WaveDirection => "waveDirection",
            Field::SwellHeight => "swellHeight",
            Field::SwellDirection => "swellDirection",
            Field::WindWaveHeight => "windWaveHeight",
            Field::WindWaveDirection => "windWaveDirection",
            Field::CurrentSpeed => "currentSpeed",
            Field::CurrentDirection => "currentDirection",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Units the numeric fields are reported in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Units {
    /// Wind speed unit, requested from the forecast source directly.
    pub wind: String,
    /// Current speed unit as delivered by the ocean source.
    pub current: String,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            wind: "kn".to_string(),
            current: "mps".to_string(),
        }
    }
}

/// One merged observation for a point and hour.
///
/// Serializes to a flat mapping in which every key is always present and each
/// value is either a number or `null`:
///
/// ```
/// use seastate::ObservationRecord;
///
/// let json = serde_json::to_value(ObservationRecord::empty()).unwrap();
/// let map = json.as_object().unwrap();
/// assert_eq!(map.len(), 11);
/// assert!(map["iso_time"].is_null());
/// assert!(map["currentDirection"].is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationRecord {
    /// Hour actually used, as reported on the first source's time axis.
    #[serde(rename = "iso_time")]
    pub iso_time: Option<String>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub wave_height: Option<f64>,
    pub wave_direction: Option<f64>,
    pub swell_height: Option<f64>,
    pub swell_direction: Option<f64>,
    pub wind_wave_height: Option<f64>,
    pub wind_wave_direction: Option<f64>,
    pub current_speed: Option<f64>,
    pub current_direction: Option<f64>,
    #[serde(skip)]
    pub units: Units,
}

impl ObservationRecord {
    /// A record with every value unset.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::WindSpeed => self.wind_speed,
            Field::WindDirection => self.wind_direction,
            Field::WaveHeight => self.wave_height,
            Field::WaveDirection => self.wave_direction,
            Field::SwellHeight => self.swell_height,
            Field::SwellDirection => self.swell_direction,
            Field::WindWaveHeight => self.wind_wave_height,
            Field::WindWaveDirection => self.wind_wave_direction,
            Field::CurrentSpeed => self.current_speed,
            Field::CurrentDirection => self.current_direction,
        }
    }

    pub fn set(&mut self, field: Field, value: Option<f64>) {
        let slot = match field {
            Field::WindSpeed => &mut self.wind_speed,
            Field::WindDirection => &mut self.wind_direction,
            Field::WaveHeight => &mut self.wave_height,
            Field::WaveDirection => &mut self.wave_direction,
            Field::SwellHeight => &mut self.swell_height,
            Field::SwellDirection => &mut self.swell_direction,
            Field::WindWaveHeight => &mut self.wind_wave_height,
            Field::WindWaveDirection => &mut self.wind_wave_direction,
            Field::CurrentSpeed => &mut self.current_speed,
            Field::CurrentDirection => &mut self.current_direction,
        };
        *slot = value;
    }

    /// Merges data from `other` into `self`, filling in `None` fields.
    ///
    /// `iso_time` follows the same rule, so merging partial records in
    /// [`crate::Source::PRIORITY`] order keeps the first available hour.
    pub fn merge_from(&mut self, other: &Self) {
        if self.iso_time.is_none() {
            self.iso_time = other.iso_time.clone();
        }
        for field in Field::ALL {
            if self.get(field).is_none() {
                self.set(field, other.get(field));
            }
        }
    }

    /// Whether every scalar field is still unset.
    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_none())
    }
}
